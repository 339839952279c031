//! Outcome classification and statistics.
//!
//! This module provides:
//! - The raw and classified outcome types
//! - The deterministic classification function
//! - Thread-safe per-run outcome counters
//!
//! The taxonomy: `Suppressed` is expected and never reported; `Timeout`,
//! `TransportFailure`, and `HttpError` are reportable. Reportable outcomes
//! are handled where they occur and never escalate into a run-level failure.

mod classification;
mod stats;
mod types;

// Re-export public API
pub use classification::classify;
pub use stats::ProbeStats;
pub use types::{Outcome, OutcomeKind, RawOutcome};
