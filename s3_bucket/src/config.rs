//! Session configuration read from the process environment

use std::env;
use std::str::FromStr;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig};

use crate::{BucketError, BucketResult};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;
const INITIAL_BACKOFF: Duration = Duration::from_millis(50);

/// SDK-level settings applied when a session is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Endpoint override, e.g. `http://localhost:4566` for `LocalStack`
    pub endpoint_url: Option<String>,
    /// Use path-style addressing instead of virtual-hosted buckets
    pub force_path_style: bool,
    /// Maximum attempts of the SDK standard retry strategy
    pub max_attempts: u32,
    /// Upper bound for a whole SDK operation, retries included
    pub operation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            force_path_style: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            operation_timeout: Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS),
        }
    }
}

impl SessionConfig {
    /// Reads the session configuration from environment variables
    ///
    /// * `S3_ENDPOINT_URL` - optional endpoint override
    /// * `S3_FORCE_PATH_STYLE` - `true` or `false` (default `false`)
    /// * `S3_MAX_ATTEMPTS` - retry attempts (default 3)
    /// * `S3_OPERATION_TIMEOUT_SECS` - operation timeout (default 30)
    ///
    /// # Errors
    ///
    /// Returns `BucketError::ConfigError` if a variable is set but cannot be parsed,
    /// or if the attempts or timeout are zero
    pub fn from_env() -> BucketResult<Self> {
        let endpoint_url = env::var("S3_ENDPOINT_URL")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());

        let force_path_style = parse_var("S3_FORCE_PATH_STYLE")?.unwrap_or(false);
        let max_attempts = parse_non_zero("S3_MAX_ATTEMPTS")?.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let operation_timeout = Duration::from_secs(
            parse_non_zero("S3_OPERATION_TIMEOUT_SECS")?.unwrap_or(DEFAULT_OPERATION_TIMEOUT_SECS),
        );

        Ok(Self {
            endpoint_url,
            force_path_style,
            max_attempts,
            operation_timeout,
        })
    }

    /// Standard SDK retry policy with the configured attempts
    #[must_use]
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::standard()
            .with_max_attempts(self.max_attempts)
            .with_initial_backoff(INITIAL_BACKOFF)
    }

    /// SDK timeout settings
    #[must_use]
    pub fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::builder()
            .operation_timeout(self.operation_timeout)
            .build()
    }
}

fn parse_var<T: FromStr>(name: &str) -> BucketResult<Option<T>> {
    match env::var(name) {
        Ok(val) => val
            .trim()
            .to_lowercase()
            .parse::<T>()
            .map(Some)
            .map_err(|_| BucketError::ConfigError(format!("invalid value for {name}: {val}"))),
        Err(_) => Ok(None),
    }
}

fn parse_non_zero<T: FromStr + Default + PartialEq>(name: &str) -> BucketResult<Option<T>> {
    match parse_var::<T>(name)? {
        Some(val) if val == T::default() => Err(BucketError::ConfigError(format!(
            "{name} must be greater than zero"
        ))),
        val => Ok(val),
    }
}
