//! Conditional HEAD request construction.
//!
//! A probe request is a HEAD request for one sampled repository file with an
//! `If-Modified-Since` header carrying the current date. A fresh cache that
//! has the file answers `304 Not Modified` without transferring the body;
//! anything else is worth a look.

use chrono::{DateTime, Utc};

use crate::sample::Target;

/// IMF-fixdate layout from RFC 7231, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// An immutable probe request, built once per sampled target.
///
/// The method is always HEAD; only the URL and the freshness header vary.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// Fully formed request URL.
    pub url: String,
    /// `If-Modified-Since` header value (RFC 7231 IMF-fixdate).
    pub if_modified_since: String,
}

impl ProbeRequest {
    /// Builds the request for a target. `now` is passed in rather than read
    /// from the clock so the header value is testable.
    pub fn build(target: &Target, port: u16, prefix: &str, now: DateTime<Utc>) -> Self {
        ProbeRequest {
            url: format!(
                "http://{}:{}/{}/{}",
                target.host, port, prefix, target.file
            ),
            if_modified_since: now.format(HTTP_DATE_FORMAT).to_string(),
        }
    }
}
