//! URL validation and normalization utilities.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::CheckError;

/// Validates and normalizes a pasted link.
///
/// Trims whitespace, adds an `https://` prefix if no scheme is present, then
/// validates that the URL is syntactically valid, uses http/https and has a
/// host. Rejects input longer than [`MAX_URL_LENGTH`] before and after
/// normalization.
///
/// # Errors
///
/// Returns a [`CheckError`] describing why the input was rejected. A warning
/// is logged for every rejection.
pub fn normalize_url(input: &str) -> Result<Url, CheckError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        warn!("Skipping empty URL");
        return Err(CheckError::Empty);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            trimmed.len(),
            MAX_URL_LENGTH,
            preview(trimmed)
        );
        return Err(CheckError::TooLong {
            length: trimmed.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let normalized = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            preview(&normalized)
        );
        return Err(CheckError::TooLong {
            length: normalized.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let parsed = match Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("Skipping invalid URL: {trimmed}");
            return Err(CheckError::InvalidUrl(trimmed.to_string()));
        }
    };

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            warn!("Skipping unsupported scheme for URL: {trimmed}");
            return Err(CheckError::UnsupportedScheme {
                scheme: other.to_string(),
                url: trimmed.to_string(),
            });
        }
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => {
            warn!("Skipping URL without host: {trimmed}");
            Err(CheckError::MissingHost(trimmed.to_string()))
        }
    }
}

/// Returns true when `input` starts with an explicit `scheme://`.
fn has_scheme(input: &str) -> bool {
    match input.find("://") {
        Some(pos) => {
            let scheme = &input[..pos];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .next()
                    .map(|c| c.is_ascii_alphabetic())
                    .unwrap_or(false)
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn preview(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(50)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}
