//! Per-run outcome statistics.
//!
//! Thread-safe counters keyed by outcome kind, shared between the
//! classify-and-report consumer and the run driver via `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::OutcomeKind;

/// Thread-safe outcome counters. Every kind is initialized to zero on
/// creation, so lookups never miss.
pub struct ProbeStats {
    counts: HashMap<OutcomeKind, AtomicUsize>,
}

impl ProbeStats {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for kind in OutcomeKind::iter() {
            counts.insert(kind, AtomicUsize::new(0));
        }
        ProbeStats { counts }
    }

    pub fn increment(&self, kind: OutcomeKind) {
        if let Some(counter) = self.counts.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Outcome kind {:?} missing from stats map; counters were not initialized properly",
                kind
            );
        }
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.counts
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total outcomes recorded across all kinds. Equals the number of
    /// dispatched requests once the run has drained.
    pub fn total(&self) -> usize {
        OutcomeKind::iter().map(|k| self.count(k)).sum()
    }

    /// Total reportable outcomes (everything except suppressed).
    pub fn total_reported(&self) -> usize {
        self.total() - self.count(OutcomeKind::Suppressed)
    }

    /// Logs one line per non-zero outcome kind.
    pub fn log_summary(&self) {
        for kind in OutcomeKind::iter() {
            let count = self.count(kind);
            if count > 0 {
                log::info!("{}: {}", kind, count);
            }
        }
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}
