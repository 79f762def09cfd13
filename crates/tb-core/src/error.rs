//! Typed error definitions for the trading CLI.
//!
//! Provides [`TradeError`] for domain-specific errors that are more
//! informative than plain `anyhow::Error` strings. All variants implement
//! `std::error::Error` via `thiserror`, so they integrate seamlessly with
//! `anyhow::Result`.
//!
//! The variants map directly onto the failure stages of an order placement:
//! validation and configuration errors never reach the network; transport
//! errors carry the HTTP status (and venue error code where available) so
//! the retry loop can classify them via [`TradeError::is_retryable`].

use thiserror::Error;

/// Domain-specific errors for the trading CLI.
#[derive(Debug, Error)]
pub enum TradeError {
    /// Caller-supplied order parameter failed validation. Never reaches the
    /// network.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field (e.g. `"price"`).
        field: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Missing or malformed credentials / configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The venue rejected the signature or the key lacks permissions
    /// (HTTP 401/403). Fatal, never retried.
    #[error("authentication rejected (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// The venue rejected the request parameters (HTTP 400 or a negative
    /// error code in the body). Fatal, never retried.
    #[error("venue rejected request [{code}]: {message}")]
    Request { code: i64, message: String },

    /// Rate limited (HTTP 429). Transient — retried with backoff.
    #[error("rate limited (HTTP {status})")]
    RateLimit { status: u16 },

    /// Venue-side failure (HTTP 5xx). Transient — retried with backoff.
    #[error("venue service error (HTTP {status})")]
    Service { status: u16 },

    /// Transport-level failure (connect refused, timeout, TLS). Transient —
    /// retried with backoff.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be parsed into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl TradeError {
    /// Whether the retry loop may re-attempt after this error.
    ///
    /// Only transient transport-level failures qualify; validation, config,
    /// authentication, and parameter rejections surface immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TradeError::RateLimit { .. } | TradeError::Service { .. } | TradeError::Network(_)
        )
    }

    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TradeError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_retryable() {
        assert!(TradeError::RateLimit { status: 429 }.is_retryable());
        assert!(TradeError::Service { status: 503 }.is_retryable());
        assert!(TradeError::Network("connection refused".into()).is_retryable());
    }

    #[test]
    fn fatal_errors_are_not_retryable() {
        assert!(!TradeError::validation("price", "must be positive").is_retryable());
        assert!(!TradeError::Config("missing api key".into()).is_retryable());
        assert!(
            !TradeError::Authentication {
                status: 401,
                message: "bad signature".into()
            }
            .is_retryable()
        );
        assert!(
            !TradeError::Request {
                code: -1102,
                message: "mandatory parameter missing".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn validation_error_names_the_field() {
        let err = TradeError::validation("quantity", "must be greater than 0");
        assert_eq!(err.to_string(), "invalid quantity: must be greater than 0");
    }
}
