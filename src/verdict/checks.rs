//! Individual link heuristics.
//!
//! Every check looks only at the URL text and its parsed host. A check that
//! fires produces a [`Finding`] with the risk points it contributes.

use std::sync::LazyLock;

use psl::Psl;
use regex::Regex;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use url::{Host, Url};

use crate::config::{LONG_URL_THRESHOLD, MAX_HOST_LABELS};

/// Words that show up in credential-harvesting and prize-scam links.
const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "signin", "verify", "account", "update", "secure", "banking", "confirm", "password",
    "wallet", "free", "gift", "prize", "winner", "bonus", "claim", "urgent", "suspend",
];

/// At most this many keyword hits are scored.
const MAX_SCORED_KEYWORDS: u32 = 2;

const SUSPICIOUS_TLDS: &[&str] = &[
    "xyz", "top", "tk", "ml", "ga", "cf", "gq", "zip", "click", "country", "work", "loan", "men",
    "rest",
];

const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "is.gd",
    "ow.ly",
    "buff.ly",
    "rebrand.ly",
    "cutt.ly",
    "shorturl.at",
];

const TRUSTED_DOMAINS: &[&str] = &[
    "google.com",
    "youtube.com",
    "github.com",
    "wikipedia.org",
    "amazon.com",
    "apple.com",
    "microsoft.com",
    "paypal.com",
    "netflix.com",
    "facebook.com",
    "instagram.com",
    "whatsapp.com",
    "linkedin.com",
    "mozilla.org",
    "rust-lang.org",
];

/// Brands commonly impersonated, matched against host tokens.
const BRANDS: &[&str] = &[
    "paypal",
    "amazon",
    "apple",
    "google",
    "microsoft",
    "netflix",
    "facebook",
    "instagram",
    "whatsapp",
    "chase",
    "wellsfargo",
    "bankofamerica",
];

static KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("({})", SUSPICIOUS_KEYWORDS.join("|")))
        .expect("keyword pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicCheck {
    InsecureScheme,
    IpAddressHost,
    UserInfo,
    SuspiciousKeyword,
    SuspiciousTld,
    ExcessiveSubdomains,
    LongUrl,
    Punycode,
    HyphenatedHost,
    BrandImpersonation,
    UrlShortener,
    TrustedDomain,
}

impl HeuristicCheck {
    /// Risk points contributed when the check fires.
    pub fn base_risk(&self) -> u32 {
        match self {
            HeuristicCheck::InsecureScheme => 15,
            HeuristicCheck::IpAddressHost => 30,
            HeuristicCheck::UserInfo => 30,
            HeuristicCheck::SuspiciousKeyword => 15,
            HeuristicCheck::SuspiciousTld => 20,
            HeuristicCheck::ExcessiveSubdomains => 15,
            HeuristicCheck::LongUrl => 10,
            HeuristicCheck::Punycode => 20,
            HeuristicCheck::HyphenatedHost => 10,
            HeuristicCheck::BrandImpersonation => 35,
            HeuristicCheck::UrlShortener => 0,
            HeuristicCheck::TrustedDomain => 0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HeuristicCheck::InsecureScheme => "Connection is not encrypted (http)",
            HeuristicCheck::IpAddressHost => "Uses a raw IP address instead of a domain",
            HeuristicCheck::UserInfo => "Contains '@', which hides the real destination",
            HeuristicCheck::SuspiciousKeyword => "Contains words common in scam links",
            HeuristicCheck::SuspiciousTld => "Uses a domain ending often abused by scams",
            HeuristicCheck::ExcessiveSubdomains => "Has an unusual number of subdomains",
            HeuristicCheck::LongUrl => "Is unusually long",
            HeuristicCheck::Punycode => "Uses look-alike international characters",
            HeuristicCheck::HyphenatedHost => "Domain is built from several hyphenated words",
            HeuristicCheck::BrandImpersonation => "Mentions a well-known brand it does not belong to",
            HeuristicCheck::UrlShortener => "Is a shortened link; the destination is hidden",
            HeuristicCheck::TrustedDomain => "Belongs to a well-known domain",
        }
    }
}

/// One fired heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub check: HeuristicCheck,
    pub risk: u32,
    pub detail: String,
}

impl Finding {
    fn new(check: HeuristicCheck, detail: impl Into<String>) -> Self {
        Self {
            check,
            risk: check.base_risk(),
            detail: detail.into(),
        }
    }
}

/// Runs every heuristic in declaration order and collects the ones that fire.
pub fn run_checks(url: &Url) -> Vec<Finding> {
    HeuristicCheck::iter()
        .filter_map(|check| evaluate(check, url))
        .collect()
}

fn evaluate(check: HeuristicCheck, url: &Url) -> Option<Finding> {
    match check {
        HeuristicCheck::InsecureScheme => {
            (url.scheme() == "http").then(|| Finding::new(check, "http://"))
        }
        HeuristicCheck::IpAddressHost => match url.host() {
            Some(Host::Ipv4(ip)) => Some(Finding::new(check, ip.to_string())),
            Some(Host::Ipv6(ip)) => Some(Finding::new(check, ip.to_string())),
            _ => None,
        },
        HeuristicCheck::UserInfo => (!url.username().is_empty() || url.password().is_some())
            .then(|| Finding::new(check, url.username().to_string())),
        HeuristicCheck::SuspiciousKeyword => {
            let haystack = keyword_haystack(url);
            let mut hits: Vec<&str> = KEYWORD_PATTERN
                .find_iter(&haystack)
                .map(|m| m.as_str())
                .collect();
            hits.sort_unstable();
            hits.dedup();
            if hits.is_empty() {
                return None;
            }
            let scored = (hits.len() as u32).min(MAX_SCORED_KEYWORDS);
            Some(Finding {
                check,
                risk: check.base_risk() * scored,
                detail: hits.join(", "),
            })
        }
        HeuristicCheck::SuspiciousTld => {
            let tld = domain_host(url)?.rsplit('.').next()?.to_string();
            SUSPICIOUS_TLDS
                .contains(&tld.as_str())
                .then(|| Finding::new(check, format!(".{tld}")))
        }
        HeuristicCheck::ExcessiveSubdomains => {
            let labels = domain_host(url)?.split('.').count();
            (labels > MAX_HOST_LABELS).then(|| Finding::new(check, format!("{labels} labels")))
        }
        HeuristicCheck::LongUrl => {
            let length = url.as_str().len();
            (length > LONG_URL_THRESHOLD)
                .then(|| Finding::new(check, format!("{length} characters")))
        }
        HeuristicCheck::Punycode => {
            let host = domain_host(url)?;
            let encoded = host.split('.').any(|label| label.starts_with("xn--"));
            encoded.then(|| Finding::new(check, host))
        }
        HeuristicCheck::HyphenatedHost => {
            let domain = registrable_domain(&domain_host(url)?)?;
            let first_label = domain.split('.').next().unwrap_or_default();
            let hyphens = first_label.matches('-').count();
            (hyphens >= 2).then(|| Finding::new(check, domain.clone()))
        }
        HeuristicCheck::BrandImpersonation => {
            let host = domain_host(url)?;
            let domain = registrable_domain(&host)?;
            let owner = domain.split('.').next().unwrap_or_default().to_string();
            let folded = fold_lookalikes(&host);
            let brand = BRANDS.iter().find(|brand| {
                folded
                    .split(['.', '-'])
                    .any(|token| token.starts_with(*brand))
            })?;
            (owner != *brand).then(|| Finding::new(check, format!("{brand} on {domain}")))
        }
        HeuristicCheck::UrlShortener => {
            let domain = registrable_domain(&domain_host(url)?)?;
            URL_SHORTENERS
                .contains(&domain.as_str())
                .then(|| Finding::new(check, domain.clone()))
        }
        HeuristicCheck::TrustedDomain => {
            let domain = registrable_domain(&domain_host(url)?)?;
            TRUSTED_DOMAINS
                .contains(&domain.as_str())
                .then(|| Finding::new(check, domain.clone()))
        }
    }
}

/// Lowercased host without a trailing dot.
fn host_name(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
}

/// Host name for domain-based checks; `None` for IP addresses.
fn domain_host(url: &Url) -> Option<String> {
    match url.host() {
        Some(Host::Domain(_)) => host_name(url),
        _ => None,
    }
}

/// Host, path and query, lowercased, for keyword matching.
fn keyword_haystack(url: &Url) -> String {
    let mut haystack = host_name(url).unwrap_or_default();
    haystack.push_str(url.path());
    if let Some(query) = url.query() {
        haystack.push('?');
        haystack.push_str(query);
    }
    haystack.to_ascii_lowercase()
}

/// Undoes common digit-for-letter swaps (`paypa1` -> `paypal`).
fn fold_lookalikes(host: &str) -> String {
    host.chars()
        .map(|c| match c {
            '0' => 'o',
            '1' => 'l',
            '3' => 'e',
            '4' => 'a',
            '5' => 's',
            _ => c,
        })
        .collect()
}

/// Registrable domain of `host` ("login.example.co.uk" -> "example.co.uk").
///
/// Looked up in the Public Suffix List. Returns `None` for IP literals, empty
/// hosts and hosts that are themselves a public suffix.
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() || host.parse::<std::net::IpAddr>().is_ok() || host.starts_with('[') {
        return None;
    }
    let domain = psl::List.domain(host.as_bytes())?;
    Some(String::from_utf8_lossy(domain.as_bytes()).to_string())
}
