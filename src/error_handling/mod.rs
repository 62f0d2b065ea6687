//! Error handling and check statistics.
//!
//! This module provides:
//! - Error type definitions for initialization and link intake
//! - Check statistics tracking (verdicts per kind, skipped links per reason)

mod stats;
mod types;

// Re-export public API
pub use stats::CheckStats;
pub use types::{CheckError, InitializationError, SkipReason};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::VerdictKind;
    use strum::IntoEnumIterator;

    #[test]
    fn test_check_stats_initialization() {
        let stats = CheckStats::new();
        for kind in VerdictKind::iter() {
            assert_eq!(stats.verdict_count(kind), 0);
        }
        for reason in SkipReason::iter() {
            assert_eq!(stats.skip_count(reason), 0);
        }
    }

    #[test]
    fn test_check_stats_increment() {
        let stats = CheckStats::new();
        stats.record_verdict(VerdictKind::Fake);
        stats.record_verdict(VerdictKind::Fake);
        stats.record_verdict(VerdictKind::Genuine);
        stats.record_skip(SkipReason::InvalidUrl);

        assert_eq!(stats.verdict_count(VerdictKind::Fake), 2);
        assert_eq!(stats.verdict_count(VerdictKind::Unknown), 0);
        assert_eq!(stats.total_verdicts(), 3);
        assert_eq!(stats.total_skipped(), 1);
    }
}
