//! Configuration validation module.
//!
//! Collects every problem in one pass so a misconfigured deployment fails
//! fast at startup with the full list instead of one error at a time.

use crate::{AppConfig, CacheConfig, RedisConfig, RetryConfig, SearchConfig};
use catalog_core::telemetry::TelemetryConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout or TTL value must be positive.
    NonPositiveDuration { name: String },
    /// Pool size must be positive.
    InvalidPoolSize { value: u32 },
    /// Retry attempts must be at least one.
    InvalidRetryAttempts { value: u32 },
    /// Backoff multiplier must be at least 1.0.
    InvalidBackoffMultiplier { value: f64 },
    /// Initial retry delay exceeds the configured cap.
    RetryDelayAboveCap { initial_ms: u64, max_ms: u64 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveDuration { name } => {
                write!(f, "'{}' must be positive", name)
            }
            Self::InvalidPoolSize { value } => {
                write!(f, "Invalid pool size: {} (must be at least 1)", value)
            }
            Self::InvalidRetryAttempts { value } => {
                write!(f, "Invalid retry attempts: {} (must be at least 1)", value)
            }
            Self::InvalidBackoffMultiplier { value } => {
                write!(f, "Invalid backoff multiplier: {} (must be >= 1.0)", value)
            }
            Self::RetryDelayAboveCap { initial_ms, max_ms } => {
                write!(
                    f,
                    "Initial retry delay ({}ms) exceeds max delay ({}ms)",
                    initial_ms, max_ms
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_redis(&config.redis, &mut errors);
        Self::validate_search(&config.search, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_retry(&config.retry, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_redis(config: &RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }

        if !config.url.starts_with("redis://") && !config.url.starts_with("rediss://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            });
        }
        if config.pool_size == 0 {
            errors.push(ConfigValidationError::InvalidPoolSize {
                value: config.pool_size,
            });
        }
        if config.op_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "redis.op_timeout_ms".to_string(),
            });
        }
    }

    fn validate_search(config: &SearchConfig, errors: &mut Vec<ConfigValidationError>) {
        match Url::parse(&config.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "search".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "search".to_string(),
                message: e.to_string(),
            }),
        }
        if config.request_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "search.request_timeout_ms".to_string(),
            });
        }
    }

    fn validate_cache(config: &CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string(),
            });
        }
    }

    fn validate_retry(config: &RetryConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.max_attempts == 0 {
            errors.push(ConfigValidationError::InvalidRetryAttempts {
                value: config.max_attempts,
            });
        }
        if config.multiplier < 1.0 || !config.multiplier.is_finite() {
            errors.push(ConfigValidationError::InvalidBackoffMultiplier {
                value: config.multiplier,
            });
        }
        if config.initial_delay_ms > config.max_delay_ms {
            errors.push(ConfigValidationError::RetryDelayAboveCap {
                initial_ms: config.initial_delay_ms,
                max_ms: config.max_delay_ms,
            });
        }
    }

    fn validate_observability(config: &TelemetryConfig, errors: &mut Vec<ConfigValidationError>) {
        // Directives look like "info" or "info,catalog=debug"; check every level named.
        let invalid = config
            .level
            .split(',')
            .map(|directive| directive.rsplit('=').next().unwrap_or(directive).trim())
            .find(|level| !Self::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()));

        if let Some(level) = invalid {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: level.to_string(),
            });
        }
    }
}
