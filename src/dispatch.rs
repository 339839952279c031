//! Probe execution.
//!
//! Runs a single built request against the network and folds whatever
//! happened into a [`RawOutcome`]. Transport errors and timeouts are ordinary
//! results here, never propagated; the classifier decides what they mean.

use crate::outcome::RawOutcome;
use crate::request::ProbeRequest;

/// A finished request on its way to the classify-and-report consumer.
#[derive(Debug)]
pub struct Completion {
    pub url: String,
    pub raw: RawOutcome,
}

/// Executes one conditional HEAD request.
///
/// The client carries the transport timeout and has redirect following
/// disabled, so a 307 arrives here as a status code rather than being
/// followed.
pub async fn execute_probe(client: &reqwest::Client, request: &ProbeRequest) -> RawOutcome {
    let response = client
        .head(&request.url)
        .header(
            reqwest::header::IF_MODIFIED_SINCE,
            &request.if_modified_since,
        )
        .send()
        .await;

    match response {
        Ok(resp) => RawOutcome {
            status: resp.status().as_u16(),
            timed_out: false,
            transport_error: None,
        },
        Err(e) if e.is_timeout() => RawOutcome {
            status: 0,
            timed_out: true,
            transport_error: None,
        },
        Err(e) => RawOutcome {
            status: 0,
            timed_out: false,
            transport_error: Some(transport_message(&e)),
        },
    }
}

/// Extracts the innermost cause of a transport error. reqwest wraps the
/// interesting part ("connection refused", "dns error", ...) several layers
/// deep; the outermost message is just "error sending request".
fn transport_message(error: &reqwest::Error) -> String {
    let mut cause: &(dyn std::error::Error + 'static) = error;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
