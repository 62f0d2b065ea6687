//! Terminal rendering of verdicts and the gauge.

use std::io::Write;

use colored::*;
use log::debug;
use strum::IntoEnumIterator;

use crate::dom::Element;
use crate::gauge::label_text;
use crate::verdict::{Verdict, VerdictKind};

const BAR_WIDTH: usize = 30;

/// One-line gauge for the terminal, e.g. `[#########.....] Confidence: 64%`.
pub fn gauge_line(value: f64, kind: VerdictKind) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    let bar = match kind {
        VerdictKind::Genuine => bar.green(),
        VerdictKind::Fake => bar.red(),
        VerdictKind::Unknown => bar.yellow(),
    };
    format!("[{}] {}", bar, label_text(value))
}

/// Redraws the gauge line in place, coloured by the card's verdict.
///
/// A failing terminal only costs the frame; the error is logged.
pub fn print_frame(card: &Element, value: f64) {
    if let Err(e) = write_frame(&mut std::io::stdout(), card, value) {
        debug!("Failed to draw gauge frame: {e}");
    }
}

fn write_frame<W: Write>(out: &mut W, card: &Element, value: f64) -> std::io::Result<()> {
    let kind = card
        .attr("data-verdict")
        .and_then(|raw| VerdictKind::iter().find(|k| k.as_str() == raw))
        .unwrap_or(VerdictKind::Unknown);
    write!(out, "\r{}", gauge_line(value, kind))?;
    out.flush()
}

/// Prints the settled verdict with its findings.
pub fn print_verdict(verdict: &Verdict) {
    let title = match verdict.kind {
        VerdictKind::Genuine => verdict.kind.title().green().bold(),
        VerdictKind::Fake => verdict.kind.title().red().bold(),
        VerdictKind::Unknown => verdict.kind.title().yellow().bold(),
    };
    println!(
        "\r{}\n{} {}",
        gauge_line(f64::from(verdict.confidence), verdict.kind),
        title,
        verdict.url
    );
    for finding in &verdict.findings {
        if finding.detail.is_empty() {
            println!("  - {}", finding.check.description());
        } else {
            println!("  - {} ({})", finding.check.description(), finding.detail.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_line_fill() {
        colored::control::set_override(false);
        assert_eq!(
            gauge_line(50.0, VerdictKind::Unknown),
            format!("[{}{}] Confidence: 50%", "#".repeat(15), ".".repeat(15))
        );
        assert!(gauge_line(0.0, VerdictKind::Fake).starts_with("[...."));
        assert!(gauge_line(250.0, VerdictKind::Genuine).ends_with("Confidence: 100%"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_write_frame_uses_card_verdict() {
        colored::control::set_override(false);
        let card = Element::new("section").with_attr("data-verdict", "fake");
        let mut out = Vec::new();
        write_frame(&mut out, &card, 40.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\r'));
        assert!(text.ends_with("Confidence: 40%"));
    }

    #[test]
    fn test_write_frame_reports_terminal_errors() {
        let card = Element::new("section");
        let err = write_frame(&mut BrokenPipe, &card, 10.0).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        // print_frame swallows the same error after logging it
        print_frame(&card, 10.0);
    }
}
