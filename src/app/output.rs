//! Writing rendered result cards to disk.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error_handling::CheckError;
use crate::page::CheckOutcome;

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:32rem;margin:2rem auto}\
.result-card{border:3px solid;border-radius:8px;padding:1rem}\
.confidence-gauge{width:100%;height:auto}\
.gauge-label.pulse{animation:pulse .6s ease-out 1}\
@keyframes pulse{50%{opacity:.4}}";

/// File name stem for the `index`-th checked link, e.g. `003-example.com`.
pub fn card_file_stem(index: usize, url: &str) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "link".to_string());
    let safe: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') { c } else { '_' })
        .collect();
    format!("{index:03}-{safe}")
}

/// Writes `<stem>.html` (standalone page with the card) and `<stem>.json`
/// (the verdict) into `dir`. Returns the HTML path.
///
/// # Errors
///
/// Returns `CheckError::Output` when a file cannot be written.
pub fn write_card(dir: &Path, stem: &str, outcome: &CheckOutcome) -> Result<PathBuf, CheckError> {
    let html_path = dir.join(format!("{stem}.html"));
    let json_path = dir.join(format!("{stem}.json"));

    let document = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        crate::dom::escape(outcome.verdict.kind.title()),
        PAGE_STYLE,
        outcome.markup
    );
    std::fs::write(&html_path, document).map_err(|source| CheckError::Output {
        path: html_path.clone(),
        source,
    })?;

    let json = serde_json::to_string_pretty(&outcome.verdict)
        .map_err(|e| CheckError::Output {
            path: json_path.clone(),
            source: e.into(),
        })?;
    std::fs::write(&json_path, json).map_err(|source| CheckError::Output {
        path: json_path.clone(),
        source,
    })?;

    debug!("Wrote {} and {}", html_path.display(), json_path.display());
    Ok(html_path)
}
