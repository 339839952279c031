//! Shared resource setup.
//!
//! Initializers for the pieces every run needs: the HTTP client, the logger,
//! and the admission semaphore.

mod client;
mod logger;

use std::sync::Arc;

use log::SetLoggerError;
use thiserror::Error;
use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Creates the admission semaphore bounding in-flight requests.
///
/// The run driver acquires one owned permit per request before spawning its
/// worker; the worker drops the permit as soon as its network I/O finishes.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
