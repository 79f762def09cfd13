//! HTTPS transport with retry/backoff and response classification.
//!
//! Executes a [`SignedRequest`] and maps the outcome onto the
//! [`TradeError`] taxonomy:
//!
//! | Outcome                  | Error            | Retried |
//! |--------------------------|------------------|---------|
//! | 2xx                      | —                | —       |
//! | 401 / 403                | `Authentication` | no      |
//! | other 4xx                | `Request`        | no      |
//! | 429                      | `RateLimit`      | yes     |
//! | 5xx                      | `Service`        | yes     |
//! | connect/timeout failure  | `Network`        | yes     |
//!
//! Transient failures back off exponentially (base delay doubling per
//! attempt, capped). The backoff sleep and the request itself are the only
//! await points, so dropping the future cancels any remaining retries.
//!
//! The signed query string is transmitted byte-for-byte as built by the
//! signer; parameters are never re-encoded here. The API key travels in the
//! `X-MBX-APIKEY` header only, and all request logging uses
//! [`SignedRequest::redacted_query`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use tb_core::config::ClientConfig;
use tb_core::error::{Result, TradeError};

use crate::auth::SignedRequest;

/// Connectivity-check endpoint (unsigned).
const PING_ENDPOINT: &str = "/fapi/v1/ping";

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Exponential backoff settings for transient failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = `max_retries + 1`).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): `base * 2^retry`, capped.
    pub fn delay(&self, retry: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(retry));
        doubled.min(self.max_delay)
    }
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Executes signed requests against the venue.
///
/// The executor is generic over this trait so tests can substitute a double
/// that records or rejects invocations.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    /// Transmit a signed request and return the parsed JSON body.
    async fn send(&self, request: &SignedRequest) -> Result<serde_json::Value>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Production transport over `reqwest`.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    policy: RetryPolicy,
}

impl HttpTransport {
    /// Build a transport from the client config.
    pub fn new(config: &ClientConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TradeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            policy: RetryPolicy {
                max_retries: config.max_retries,
                base_delay: Duration::from_millis(config.base_delay_ms),
                max_delay: Duration::from_millis(config.max_delay_ms),
            },
        })
    }

    /// Override the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Unsigned connectivity check against `/fapi/v1/ping`.
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}{}", self.base_url, PING_ENDPOINT);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TradeError::Network(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            debug!("ping ok");
            Ok(())
        } else {
            Err(classify_status(status.as_u16(), &resp.text().await.unwrap_or_default()))
        }
    }

    /// One HTTP attempt, classified but not retried.
    async fn attempt(&self, request: &SignedRequest) -> Result<serde_json::Value> {
        let url = format!(
            "{}{}?{}",
            self.base_url,
            request.endpoint(),
            request.query()
        );

        let resp = self
            .http
            .request(request.method().clone(), &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TradeError::Network(format!("request timed out: {e}"))
                } else {
                    TradeError::Network(e.to_string())
                }
            })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TradeError::Network(format!("failed to read response body: {e}")))?;

        debug!(
            "← {} {} | status={}",
            request.method(),
            request.endpoint(),
            status,
        );

        if !(200..300).contains(&status) {
            return Err(classify_status(status, &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| TradeError::Parse(format!("invalid JSON in response: {e}")))?;

        // Binance error payloads carry a negative `code` even under 2xx.
        if let Some(code) = value.get("code").and_then(|c| c.as_i64()) {
            if code < 0 {
                let message = value
                    .get("msg")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown venue error")
                    .to_string();
                return Err(TradeError::Request { code, message });
            }
        }

        Ok(value)
    }
}

#[async_trait]
impl OrderTransport for HttpTransport {
    async fn send(&self, request: &SignedRequest) -> Result<serde_json::Value> {
        debug!(
            "→ {} {} | params={}",
            request.method(),
            request.endpoint(),
            request.redacted_query(),
        );

        let mut retries = 0u32;
        loop {
            match self.attempt(request).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && retries < self.policy.max_retries => {
                    let delay = self.policy.delay(retries);
                    retries += 1;
                    warn!(
                        "{} {} failed ({err}), retry {retries}/{} in {delay:?}",
                        request.method(),
                        request.endpoint(),
                        self.policy.max_retries,
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    error!(
                        "{} {} failed after {retries} retr{}: {err}",
                        request.method(),
                        request.endpoint(),
                        if retries == 1 { "y" } else { "ies" },
                    );
                    return Err(err);
                }
            }
        }
    }
}

/// Map a non-2xx status (and its body) onto the error taxonomy.
fn classify_status(status: u16, body: &str) -> TradeError {
    match status {
        401 | 403 => TradeError::Authentication {
            status,
            message: venue_message(body),
        },
        429 => TradeError::RateLimit { status },
        400..=499 => TradeError::Request {
            code: venue_code(body).unwrap_or(i64::from(status)),
            message: venue_message(body),
        },
        _ => TradeError::Service { status },
    }
}

/// Extract the venue's numeric error code from an error body, if present.
fn venue_code(body: &str) -> Option<i64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("code")?
        .as_i64()
}

/// Extract the venue's error message, falling back to the raw body.
fn venue_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "no response body".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
        };
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
        // Capped from 8s.
        assert_eq!(policy.delay(3), Duration::from_secs(5));
        assert_eq!(policy.delay(4), Duration::from_secs(5));
    }

    #[test]
    fn classify_auth_vs_request_vs_service() {
        assert!(matches!(
            classify_status(401, r#"{"code":-2014,"msg":"API-key format invalid."}"#),
            TradeError::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            classify_status(403, ""),
            TradeError::Authentication { status: 403, .. }
        ));
        assert!(matches!(
            classify_status(429, ""),
            TradeError::RateLimit { status: 429 }
        ));
        assert!(matches!(
            classify_status(503, ""),
            TradeError::Service { status: 503 }
        ));
        match classify_status(400, r#"{"code":-1102,"msg":"Mandatory parameter missing"}"#) {
            TradeError::Request { code, message } => {
                assert_eq!(code, -1102);
                assert_eq!(message, "Mandatory parameter missing");
            }
            other => panic!("expected Request, got {other}"),
        }
    }

    #[test]
    fn request_error_without_json_body_keeps_the_status() {
        match classify_status(404, "not found") {
            TradeError::Request { code, message } => {
                assert_eq!(code, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected Request, got {other}"),
        }
    }
}
