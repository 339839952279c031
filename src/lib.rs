//! mirror_probe library: synthetic load generation against repository mirrors.
//!
//! Issues randomized conditional HEAD requests against a set of mirror hosts,
//! bounded to a fixed number of requests in flight, and classifies every
//! completed request as suppressed (cache answered 304/307 as expected),
//! timed out, transport failure, or unexpected HTTP status. Reportable
//! outcomes become one stdout line each.
//!
//! # Example
//!
//! ```no_run
//! use mirror_probe::{run_probe, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     hosts: vec!["localhost".to_string()],
//!     requests: 100,
//!     concurrency: 3,
//!     ..Default::default()
//! };
//!
//! let report = run_probe(config).await?;
//! println!("dispatched {}, reported {}", report.dispatched, report.reported);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions from within an async context.

pub mod config;
mod dispatch;
pub mod initialization;
pub mod outcome;
mod report;
mod request;
mod sample;

// Re-export public API
pub use config::{Config, FailOn, LogFormat, LogLevel};
pub use run::{evaluate_exit_code, run_probe, ProbeReport};
pub use sample::{ConfigurationError, Target, TargetSet};

// Internal run module (contains the dispatcher driving the whole run)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    use crate::config::{Config, FailOn, COMPLETION_CHANNEL_DEPTH};
    use crate::dispatch::{execute_probe, Completion};
    use crate::initialization::{init_client, init_semaphore};
    use crate::outcome::{classify, OutcomeKind, ProbeStats};
    use crate::report::Reporter;
    use crate::request::ProbeRequest;
    use crate::sample::TargetSet;

    /// Results of a completed probe run.
    #[derive(Debug, Clone)]
    pub struct ProbeReport {
        /// Number of requests that reached a terminal classification
        pub dispatched: usize,
        /// Outcomes suppressed as expected (304/307)
        pub suppressed: usize,
        /// Outcomes reported as anomalies
        pub reported: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a probe session to completion.
    ///
    /// Dispatches `config.requests` conditional HEAD requests against
    /// uniformly sampled targets, never holding more than
    /// `config.concurrency` in flight. Each completed request is classified
    /// and, unless suppressed, reported as one stdout line. Individual
    /// failures and timeouts never abort the run.
    ///
    /// Returns only after every dispatched request has reached a terminal
    /// state and its report line (if any) has been written.
    ///
    /// # Errors
    ///
    /// Fails up front if the host or file set is empty or the HTTP client
    /// cannot be built. Per-request errors are outcomes, not `Err`s.
    pub async fn run_probe(config: Config) -> Result<ProbeReport> {
        let targets = TargetSet::new(config.hosts.clone(), config.files.clone())
            .context("Invalid probe configuration")?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let semaphore = init_semaphore(config.concurrency);

        info!(
            "Starting probe run: {} requests, {} in flight, {} host(s), {} file(s)",
            config.requests,
            config.concurrency,
            config.hosts.len(),
            config.files.len()
        );

        let stats = Arc::new(ProbeStats::new());

        // Completed requests flow over this channel to a single
        // classify-and-report consumer, so every request is handled exactly
        // once and handlers never occupy a concurrency slot.
        let (tx, mut rx) = mpsc::channel::<Completion>(COMPLETION_CHANNEL_DEPTH);

        let consumer_stats = Arc::clone(&stats);
        let consumer = tokio::spawn(async move {
            let mut reporter = Reporter::stdout();
            while let Some(completion) = rx.recv().await {
                let outcome = classify(&completion.raw);
                consumer_stats.increment(outcome.kind());
                if let Err(e) = reporter.report(&completion.url, &outcome) {
                    warn!("Failed to write report line for {}: {e}", completion.url);
                }
            }
        });

        let start_time = Instant::now();
        let mut workers = FuturesUnordered::new();

        for _ in 0..config.requests {
            let target = targets.sample(&mut rng);
            let request = ProbeRequest::build(&target, config.port, &config.prefix, Utc::now());

            // Admission control: the producer waits here whenever the budget
            // is exhausted, so at most `concurrency` requests are executing
            // network I/O at any instant.
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping {}", request.url);
                    continue;
                }
            };

            let client = Arc::clone(&client);
            let tx = tx.clone();
            workers.push(tokio::spawn(async move {
                let raw = execute_probe(&client, &request).await;
                // The permit covers network I/O only; classification and
                // reporting happen on the consumer side of the channel.
                drop(permit);

                if tx
                    .send(Completion {
                        url: request.url,
                        raw,
                    })
                    .await
                    .is_err()
                {
                    warn!("Completion channel closed before delivery");
                }
            }));
        }
        drop(tx);

        while let Some(joined) = workers.next().await {
            if let Err(join_error) = joined {
                warn!("Probe task panicked: {:?}", join_error);
            }
        }

        // All worker-held senders are gone once the joins finish, so the
        // consumer drains the channel and exits.
        consumer
            .await
            .context("Classify-and-report consumer failed")?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        stats.log_summary();

        let dispatched = stats.total();
        let suppressed = stats.count(OutcomeKind::Suppressed);
        let reported = stats.total_reported();
        info!(
            "Probe run complete: dispatched={}, suppressed={}, reported={}, elapsed={:.1}s",
            dispatched, suppressed, reported, elapsed_seconds
        );

        Ok(ProbeReport {
            dispatched,
            suppressed,
            reported,
            elapsed_seconds,
        })
    }

    /// Maps a finished run to a process exit code under the configured
    /// policy. `0` is success, `2` means the failure policy tripped, and `3`
    /// means the run dispatched nothing to judge.
    pub fn evaluate_exit_code(fail_on: &FailOn, fail_pct: u8, report: &ProbeReport) -> i32 {
        match fail_on {
            FailOn::Never => 0,
            FailOn::AnyError => {
                if report.reported > 0 {
                    2
                } else {
                    0
                }
            }
            FailOn::PctGreaterThan => {
                if report.dispatched == 0 {
                    return 3;
                }
                #[allow(clippy::cast_precision_loss)]
                let reported_pct = (report.reported as f64 / report.dispatched as f64) * 100.0;
                if reported_pct > f64::from(fail_pct) {
                    2
                } else {
                    0
                }
            }
        }
    }
}
