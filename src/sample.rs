//! Target sampling.
//!
//! Each probe request targets a `(host, file)` pair drawn uniformly at random,
//! with replacement, from the configured candidate sets. The random source is
//! injected so that sampling is reproducible under a seeded generator.

use rand::Rng;
use thiserror::Error;

/// Error raised when the candidate sets cannot support sampling.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No hosts were configured.
    #[error("host set is empty; at least one --host is required")]
    EmptyHostSet,

    /// No file paths were configured.
    #[error("file set is empty; at least one --file is required")]
    EmptyFileSet,
}

/// A single probe target, constructed per request and discarded after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub file: String,
}

/// Fixed candidate sets for a run.
#[derive(Debug, Clone)]
pub struct TargetSet {
    hosts: Vec<String>,
    files: Vec<String>,
}

impl TargetSet {
    /// Builds a target set, rejecting empty candidate lists up front so the
    /// dispatcher never has to deal with an unsatisfiable draw.
    pub fn new(hosts: Vec<String>, files: Vec<String>) -> Result<Self, ConfigurationError> {
        if hosts.is_empty() {
            return Err(ConfigurationError::EmptyHostSet);
        }
        if files.is_empty() {
            return Err(ConfigurationError::EmptyFileSet);
        }
        Ok(TargetSet { hosts, files })
    }

    /// Draws one `(host, file)` pair. Host and file are drawn independently,
    /// so repeats and adjacent duplicates are expected.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Target {
        let host = &self.hosts[rng.random_range(0..self.hosts.len())];
        let file = &self.files[rng.random_range(0..self.files.len())];
        Target {
            host: host.clone(),
            file: file.clone(),
        }
    }
}
