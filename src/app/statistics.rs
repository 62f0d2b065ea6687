//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{CheckStats, SkipReason};
use crate::verdict::VerdictKind;

/// Logs verdict and skip counts for a finished run.
pub fn print_check_statistics(stats: &CheckStats) {
    let total_verdicts = stats.total_verdicts();
    let total_skipped = stats.total_skipped();

    if total_verdicts > 0 {
        info!("Verdict Counts ({} total):", total_verdicts);
        for kind in VerdictKind::iter() {
            let count = stats.verdict_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.title(), count);
            }
        }
    }

    if total_skipped > 0 {
        info!("Skipped Links ({} total):", total_skipped);
        for reason in SkipReason::iter() {
            let count = stats.skip_count(reason);
            if count > 0 {
                info!("   {}: {}", reason.as_str(), count);
            }
        }
    }
}
