//! Link verdicts.
//!
//! A verdict is computed from stateless host and substring heuristics (see
//! [`checks`]). Each finding carries risk points; the total decides whether a
//! link looks genuine, fake, or cannot be judged, and how confident the
//! verdict is. No network lookups are made.

pub mod checks;

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use url::Url;

use crate::config::{COLOR_FAKE, COLOR_GENUINE, COLOR_UNKNOWN};
pub use checks::{registrable_domain, run_checks, Finding, HeuristicCheck};

/// Total risk at or above which a link is reported as fake.
pub const FAKE_RISK_THRESHOLD: u32 = 40;
/// Total risk below which a link is reported as genuine.
pub const GENUINE_RISK_CEILING: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    Genuine,
    Fake,
    Unknown,
}

impl std::fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerdictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictKind::Genuine => "genuine",
            VerdictKind::Fake => "fake",
            VerdictKind::Unknown => "unknown",
        }
    }

    /// Headline shown on the result card.
    pub fn title(&self) -> &'static str {
        match self {
            VerdictKind::Genuine => "Looks genuine",
            VerdictKind::Fake => "Likely fake",
            VerdictKind::Unknown => "Could not verify",
        }
    }

    /// Colour token for the card accent and gauge arc.
    pub fn color(&self) -> &'static str {
        match self {
            VerdictKind::Genuine => COLOR_GENUINE,
            VerdictKind::Fake => COLOR_FAKE,
            VerdictKind::Unknown => COLOR_UNKNOWN,
        }
    }
}

/// Outcome of checking one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub url: String,
    pub kind: VerdictKind,
    /// Heuristic certainty, 0-100.
    pub confidence: u8,
    pub risk: u32,
    pub findings: Vec<Finding>,
}

impl Verdict {
    pub fn color(&self) -> &'static str {
        self.kind.color()
    }
}

/// Runs every heuristic against `url` and scores the result.
pub fn analyze(url: &Url) -> Verdict {
    let findings = run_checks(url);
    let risk: u32 = findings.iter().map(|f| f.risk).sum();
    let trusted = findings
        .iter()
        .any(|f| f.check == HeuristicCheck::TrustedDomain);
    let shortened = findings
        .iter()
        .any(|f| f.check == HeuristicCheck::UrlShortener);

    let (kind, confidence) = if risk >= FAKE_RISK_THRESHOLD {
        (VerdictKind::Fake, (50 + risk).min(99))
    } else if shortened {
        (VerdictKind::Unknown, 50)
    } else if risk < GENUINE_RISK_CEILING {
        if trusted {
            (VerdictKind::Genuine, 95)
        } else {
            (VerdictKind::Genuine, 80 - risk)
        }
    } else {
        (VerdictKind::Unknown, 50)
    };

    log::debug!(
        "Verdict for {}: {} ({}%, risk {}, {} findings)",
        url,
        kind,
        confidence,
        risk,
        findings.len()
    );

    Verdict {
        url: url.to_string(),
        kind,
        // Bounded above by 99.
        confidence: confidence as u8,
        risk,
        findings,
    }
}
