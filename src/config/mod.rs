//! Configuration loaded from environment variables, with a `.env`
//! fallback, plus the boundary-layer request guard.

use std::env;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Input limits
    pub limits: LimitsConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable console output
    Pretty,
    /// Structured JSON output
    Json,
}

/// Input limits enforced by the boundary, never by the pipeline core
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum request length in characters. Longer requests are
    /// rejected before the pipeline runs.
    pub max_request_chars: usize,
}

/// Default request length cap, matching the HTTP boundary contract.
pub const DEFAULT_MAX_REQUEST_CHARS: usize = 5000;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: parse_log_format(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
        };

        let limits = LimitsConfig {
            max_request_chars: parse_max_request_chars(env::var("MAX_REQUEST_CHARS").ok())?,
        };

        Ok(Config { logging, limits })
    }

    /// Reject requests longer than the configured cap.
    ///
    /// This is the boundary-layer guard; the core itself accepts any
    /// string, including empty ones.
    pub fn validate_request(&self, request: &str) -> Result<(), AppError> {
        let len = request.chars().count();
        if len > self.limits.max_request_chars {
            return Err(AppError::InvalidInput {
                message: format!(
                    "request is {} characters, maximum is {}",
                    len, self.limits.max_request_chars
                ),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
            limits: LimitsConfig {
                max_request_chars: DEFAULT_MAX_REQUEST_CHARS,
            },
        }
    }
}

fn parse_log_format(value: &str) -> LogFormat {
    match value.to_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

// Unset means the default; a set but malformed value is a hard
// configuration error, never a silent fallback.
fn parse_max_request_chars(raw: Option<String>) -> Result<usize, AppError> {
    match raw {
        None => Ok(DEFAULT_MAX_REQUEST_CHARS),
        Some(value) => value.parse().map_err(|_| AppError::Config {
            message: format!(
                "MAX_REQUEST_CHARS must be a positive integer, got {:?}",
                value
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format("json"), LogFormat::Json);
        assert_eq!(parse_log_format("JSON"), LogFormat::Json);
        assert_eq!(parse_log_format("pretty"), LogFormat::Pretty);
        assert_eq!(parse_log_format("anything-else"), LogFormat::Pretty);
    }

    #[test]
    fn test_parse_max_request_chars_unset_uses_default() {
        assert_eq!(
            parse_max_request_chars(None).unwrap(),
            DEFAULT_MAX_REQUEST_CHARS
        );
        assert_eq!(
            parse_max_request_chars(Some("250".to_string())).unwrap(),
            250
        );
    }

    #[test]
    fn test_parse_max_request_chars_rejects_malformed_value() {
        let err = parse_max_request_chars(Some("plenty".to_string())).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("MAX_REQUEST_CHARS"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.limits.max_request_chars, DEFAULT_MAX_REQUEST_CHARS);
    }

    #[test]
    fn test_validate_request_within_cap() {
        let config = Config::default();
        assert!(config.validate_request("a short request").is_ok());
        assert!(config.validate_request("").is_ok());
    }

    #[test]
    fn test_validate_request_over_cap() {
        let config = Config {
            limits: LimitsConfig {
                max_request_chars: 10,
            },
            ..Config::default()
        };
        let err = config.validate_request("this is well over ten characters");
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("maximum is 10"));
    }
}
