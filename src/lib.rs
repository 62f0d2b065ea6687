//! link_checker library: heuristic link checks with an animated confidence gauge
//!
//! A pasted link is validated, scored by stateless host and substring
//! heuristics, and shown on a result card whose SVG gauge animates from 0 to
//! the verdict's confidence. The card lives in a small in-memory document
//! ([`dom::Element`]) and the gauge is driven by the tokio timer.
//!
//! # Example
//!
//! ```no_run
//! use link_checker::{run_checks, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     urls: vec!["paypa1-login.xyz/verify".to_string()],
//!     reduce_motion: true,
//!     ..Default::default()
//! };
//!
//! let report = run_checks(config).await?;
//! println!("{} fake, {} genuine", report.fake, report.genuine);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Checking and animating require a Tokio runtime. The gauge state machine in
//! [`gauge::GaugeAnimator`] itself is synchronous and can be ticked by hand.

mod app;
pub mod config;
pub mod dom;
pub mod error_handling;
pub mod gauge;
pub mod initialization;
pub mod page;
pub mod share;
pub mod verdict;

// Re-export public API
pub use app::normalize_url;
pub use config::{Config, LogFormat, LogLevel};
pub use page::{CheckOutcome, LinkCheckPage};
pub use run::{run_checks, CheckReport};
pub use verdict::{analyze, Verdict, VerdictKind};

// Internal run module (checks every input link in turn)
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;

    use log::{info, warn};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

    use crate::app::{card_file_stem, print_check_statistics, print_frame, print_verdict, write_card};
    use crate::config::Config;
    use crate::error_handling::{CheckStats, SkipReason};
    use crate::initialization::init_ctrl_c_cancellation;
    use crate::page::LinkCheckPage;
    use crate::verdict::VerdictKind;

    /// Results of a checking run.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// Number of links read from the arguments and input file
        pub total: usize,
        /// Links judged genuine
        pub genuine: usize,
        /// Links judged fake
        pub fake: usize,
        /// Links that could not be judged
        pub unknown: usize,
        /// Invalid or cancelled links
        pub skipped: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Directory the result cards were written to, if any
        pub output_dir: Option<PathBuf>,
    }

    /// Checks every link named by `config` and plays each verdict's gauge.
    ///
    /// Links come from `config.urls` followed by the lines of `config.file`
    /// (`-` reads stdin); blank lines and `#` comments are ignored. Invalid
    /// links are logged and counted as skipped. Ctrl-C cancels the pending
    /// check and every remaining one.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No links were given
    /// - The input file cannot be read
    /// - The output directory cannot be created or a card cannot be written
    pub async fn run_checks(config: Config) -> Result<CheckReport> {
        let mut inputs = config.urls.clone();
        if let Some(path) = &config.file {
            if path.as_os_str() == "-" {
                info!("Reading URLs from stdin");
                inputs.extend(read_lines(BufReader::new(tokio::io::stdin())).await?);
            } else {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open input file {}", path.display()))?;
                inputs.extend(read_lines(BufReader::new(file)).await?);
            }
        }
        if inputs.is_empty() {
            anyhow::bail!("No URLs to check: pass them as arguments or with --file");
        }
        info!("Checking {} link{}", inputs.len(), if inputs.len() == 1 { "" } else { "s" });

        if let Some(dir) = &config.output {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        }

        let start_time = std::time::Instant::now();
        let stats = CheckStats::new();
        let mut page = LinkCheckPage::from_config(&config);
        let ctrl_c = init_ctrl_c_cancellation(page.cancel_token());

        for (index, input) in inputs.iter().enumerate() {
            let quiet = config.quiet;
            let result = page
                .check(input, |card, value| {
                    if !quiet {
                        print_frame(card, value);
                    }
                })
                .await;

            match result {
                Ok(Some(outcome)) => {
                    stats.record_verdict(outcome.verdict.kind);
                    print_verdict(&outcome.verdict);
                    if let Some(dir) = &config.output {
                        let stem = card_file_stem(index + 1, &outcome.verdict.url);
                        let path = write_card(dir, &stem, &outcome)
                            .context("Failed to write result card")?;
                        info!("Result card saved to {}", path.display());
                    }
                }
                Ok(None) => {
                    warn!("Check of {input} was cancelled");
                    stats.record_skip(SkipReason::Cancelled);
                }
                Err(_) => {
                    // normalize_url already logged the reason
                    stats.record_skip(SkipReason::InvalidUrl);
                }
            }
        }
        ctrl_c.abort();

        print_check_statistics(&stats);

        Ok(CheckReport {
            total: inputs.len(),
            genuine: stats.verdict_count(VerdictKind::Genuine),
            fake: stats.verdict_count(VerdictKind::Fake),
            unknown: stats.verdict_count(VerdictKind::Unknown),
            skipped: stats.total_skipped(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
            output_dir: config.output.clone(),
        })
    }

    async fn read_lines<R>(reader: R) -> Result<Vec<String>>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut urls = Vec::new();
        while let Some(line) = lines.next_line().await.context("Failed to read input line")? {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            urls.push(trimmed.to_string());
        }
        Ok(urls)
    }

}
