//! Configuration constants.
//!
//! Defaults for the probe run. All of these can be overridden on the command
//! line; the values below reproduce the original stress scenario against a
//! locally running mirror cache.

/// Default mirror host to probe.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port the mirror cache listens on.
pub const DEFAULT_PORT: u16 = 9129;

/// Default URL path prefix under which the repository is served.
pub const DEFAULT_PREFIX: &str = "repo";

/// Default candidate file paths, sampled uniformly per request.
///
/// A mix of repository databases and packages (including one that does not
/// exist) so that a healthy cache still produces a few reportable outcomes.
pub const DEFAULT_FILES: [&str; 6] = [
    "extra/os/x86_64/extra.db",
    "core/os/x86_64/core.db",
    "testing/os/x86_64/testing.db",
    "core/os/x86_64/linux-3.19-1-x86_64.pkg.tar.xz",
    "community/os/x86_64/atop-2.0.2-2-x86_64.pkg.tar.xz",
    "extra/os/x86_64/foo-bar.pkg.tar.xz",
];

/// Default total number of requests per run.
pub const DEFAULT_REQUEST_COUNT: usize = 3000;

/// Default concurrency budget (requests in flight at once).
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Default per-request transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default failure percentage threshold for `--fail-on pct-greater-than`.
pub const DEFAULT_FAIL_PCT: u8 = 10;

/// Depth of the completion channel between probe workers and the
/// classify-and-report consumer. Workers have already released their
/// concurrency permit by the time they send, so this only smooths bursts.
pub const COMPLETION_CHANNEL_DEPTH: usize = 64;
