//! Share and copy actions for a verdict.
//!
//! Builds the text a user would share or copy, and intent links for the
//! common share targets. Nothing here talks to the network.

use url::form_urlencoded;

use crate::config::SHARE_SITE_URL;
use crate::verdict::Verdict;

/// A share destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    X,
    WhatsApp,
    Telegram,
    Email,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 4] = [
        ShareTarget::X,
        ShareTarget::WhatsApp,
        ShareTarget::Telegram,
        ShareTarget::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::X => "Share on X",
            ShareTarget::WhatsApp => "Share on WhatsApp",
            ShareTarget::Telegram => "Share on Telegram",
            ShareTarget::Email => "Share by e-mail",
        }
    }
}

/// A rendered share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub target: ShareTarget,
    pub href: String,
}

/// One-line summary of a verdict, used for sharing.
pub fn share_text(verdict: &Verdict) -> String {
    format!(
        "Link check: {} is {} ({}% confidence). Check your own links at {}",
        verdict.url,
        verdict.kind.as_str().to_uppercase(),
        verdict.confidence,
        SHARE_SITE_URL
    )
}

/// Text placed on the clipboard by the copy action: the summary plus findings.
pub fn copy_payload(verdict: &Verdict) -> String {
    let mut payload = share_text(verdict);
    for finding in &verdict.findings {
        payload.push_str("\n- ");
        payload.push_str(finding.check.description());
        if !finding.detail.is_empty() {
            payload.push_str(" (");
            payload.push_str(&finding.detail);
            payload.push(')');
        }
    }
    payload
}

/// Intent link for one target.
pub fn share_link(target: ShareTarget, verdict: &Verdict) -> ShareLink {
    let text = share_text(verdict);
    let href = match target {
        ShareTarget::X => format!("https://twitter.com/intent/tweet?{}", encode(&[("text", text.as_str())])),
        ShareTarget::WhatsApp => format!("https://wa.me/?{}", encode(&[("text", text.as_str())])),
        ShareTarget::Telegram => format!(
            "https://t.me/share/url?{}",
            encode(&[("url", verdict.url.as_str()), ("text", text.as_str())])
        ),
        // mailto wants %20 rather than '+' for spaces.
        ShareTarget::Email => format!(
            "mailto:?{}",
            encode(&[("subject", "Link check result"), ("body", text.as_str())]).replace('+', "%20")
        ),
    };
    ShareLink { target, href }
}

/// Intent links for every target.
pub fn share_links(verdict: &Verdict) -> Vec<ShareLink> {
    ShareTarget::ALL
        .iter()
        .map(|target| share_link(*target, verdict))
        .collect()
}

fn encode(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish()
}
