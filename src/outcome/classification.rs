//! Outcome classification.

use super::types::{Outcome, RawOutcome};

/// Maps a raw transport result to its classified outcome.
///
/// Pure and deterministic. The check order is significant: a 304/307
/// short-circuits everything else, and a timeout is recognized before the
/// generic no-response case even though both leave `status` at 0.
pub fn classify(raw: &RawOutcome) -> Outcome {
    match raw.status {
        304 | 307 => Outcome::Suppressed,
        _ if raw.timed_out => Outcome::Timeout,
        0 => Outcome::TransportFailure(raw.transport_error.clone().unwrap_or_default()),
        code => Outcome::HttpError(code),
    }
}
