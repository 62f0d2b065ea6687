//! Check statistics tracking.
//!
//! This module provides thread-safe counters for verdicts and skipped links
//! during a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::SkipReason;
use crate::verdict::VerdictKind;

/// Thread-safe check statistics tracker.
///
/// Counts verdicts per kind and skipped links per reason using atomic
/// counters. All variants are initialized to zero on creation.
pub struct CheckStats {
    verdicts: HashMap<VerdictKind, AtomicUsize>,
    skipped: HashMap<SkipReason, AtomicUsize>,
}

impl Default for CheckStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckStats {
    pub fn new() -> Self {
        let mut verdicts = HashMap::new();
        for kind in VerdictKind::iter() {
            verdicts.insert(kind, AtomicUsize::new(0));
        }

        let mut skipped = HashMap::new();
        for reason in SkipReason::iter() {
            skipped.insert(reason, AtomicUsize::new(0));
        }

        CheckStats { verdicts, skipped }
    }

    pub fn record_verdict(&self, kind: VerdictKind) {
        if let Some(counter) = self.verdicts.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment verdict counter for {:?} which is not in the map",
                kind
            );
        }
    }

    pub fn record_skip(&self, reason: SkipReason) {
        if let Some(counter) = self.skipped.get(&reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment skip counter for {:?} which is not in the map",
                reason
            );
        }
    }

    pub fn verdict_count(&self, kind: VerdictKind) -> usize {
        self.verdicts
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped
            .get(&reason)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_verdicts(&self) -> usize {
        VerdictKind::iter().map(|k| self.verdict_count(k)).sum()
    }

    pub fn total_skipped(&self) -> usize {
        SkipReason::iter().map(|r| self.skip_count(r)).sum()
    }
}
