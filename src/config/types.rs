//! Configuration types and CLI options.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_FAIL_PCT, DEFAULT_FILES, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PREFIX, DEFAULT_REQUEST_COUNT, DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit-code policy applied after the run completes.
///
/// The probe itself never aborts on per-request errors; this only decides
/// what the process exit code says about the run as a whole.
#[derive(Clone, Debug, ValueEnum)]
pub enum FailOn {
    /// Always exit 0, regardless of reported outcomes (original behavior)
    Never,
    /// Exit 2 if any request produced a reportable outcome
    AnyError,
    /// Exit 2 if the reported percentage exceeds `--fail-pct`
    PctGreaterThan,
}

/// Probe run configuration.
///
/// Doubles as the CLI surface (`clap` derive) and the library configuration;
/// tests construct it directly with small injected host/file sets.
#[derive(Debug, Clone, Parser)]
#[command(name = "mirror_probe", version, about)]
pub struct Config {
    /// Mirror host to probe (repeatable)
    #[arg(long = "host", value_name = "HOST", default_values_t = [DEFAULT_HOST.to_string()])]
    pub hosts: Vec<String>,

    /// Repository file path to sample (repeatable)
    #[arg(long = "file", value_name = "PATH", default_values_t = DEFAULT_FILES.iter().map(ToString::to_string))]
    pub files: Vec<String>,

    /// Port the mirrors listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// URL path prefix under which the repository is served
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Total number of requests to dispatch
    #[arg(long, default_value_t = DEFAULT_REQUEST_COUNT)]
    pub requests: usize,

    /// Maximum requests in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request transport timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Seed for the target sampler (omit for a random run)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Exit-code policy for the run
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,

    /// Failure percentage threshold for --fail-on pct-greater-than
    #[arg(long, default_value_t = DEFAULT_FAIL_PCT)]
    pub fail_pct: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts: vec![DEFAULT_HOST.to_string()],
            files: DEFAULT_FILES.iter().map(ToString::to_string).collect(),
            port: DEFAULT_PORT,
            prefix: DEFAULT_PREFIX.to_string(),
            requests: DEFAULT_REQUEST_COUNT,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            seed: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            fail_on: FailOn::Never,
            fail_pct: DEFAULT_FAIL_PCT,
        }
    }
}
