//! Outcome type definitions.

use strum_macros::EnumIter as EnumIterMacro;

/// The raw result of executing one probe request, as observed at the
/// transport layer. Exactly one of `status` (an HTTP response was obtained)
/// or `transport_error` (it was not) is meaningful; `timed_out` is set by the
/// transport on deadline expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutcome {
    /// HTTP status code, or 0 when no HTTP response was obtained.
    pub status: u16,
    /// True when the transport deadline expired.
    pub timed_out: bool,
    /// Transport-layer failure message (DNS, connect, reset, ...).
    pub transport_error: Option<String>,
}

/// Classified result of one probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Expected/benign response (304 Not Modified or 307 Temporary Redirect);
    /// never reported.
    Suppressed,
    /// The transport deadline expired before a response arrived.
    Timeout,
    /// No HTTP response was obtained; carries the transport message.
    TransportFailure(String),
    /// Any other HTTP status, reported verbatim as its numeric code. A plain
    /// 200 lands here too: a fresh cache should have answered 304.
    HttpError(u16),
}

impl Outcome {
    /// The counter bucket this outcome falls into.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Suppressed => OutcomeKind::Suppressed,
            Outcome::Timeout => OutcomeKind::Timeout,
            Outcome::TransportFailure(_) => OutcomeKind::TransportFailure,
            Outcome::HttpError(_) => OutcomeKind::HttpError,
        }
    }

    /// Human-readable description for the report line, or `None` for
    /// suppressed outcomes.
    pub fn description(&self) -> Option<String> {
        match self {
            Outcome::Suppressed => None,
            Outcome::Timeout => Some("time out".to_string()),
            Outcome::TransportFailure(message) => Some(message.clone()),
            Outcome::HttpError(code) => Some(code.to_string()),
        }
    }
}

/// Outcome categories tracked by [`ProbeStats`](super::ProbeStats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeKind {
    Suppressed,
    Timeout,
    TransportFailure,
    HttpError,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Suppressed => "suppressed (304/307)",
            OutcomeKind::Timeout => "timed out",
            OutcomeKind::TransportFailure => "transport failure",
            OutcomeKind::HttpError => "unexpected HTTP status",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
