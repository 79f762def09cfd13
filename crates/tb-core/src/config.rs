//! Trading client configuration.
//!
//! Holds API credentials, the REST base URL, and signing/retry timing. URL
//! and timing fields have testnet defaults so only the credentials need to
//! be supplied. Credentials are normally loaded from the environment
//! ([`Credentials::from_env`]) and held in memory for the process lifetime;
//! they are never logged.

use serde::Deserialize;

use crate::error::TradeError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";
/// Environment variable overriding the REST base URL.
pub const BASE_URL_ENV: &str = "BINANCE_BASE_URL";

/// API credentials for signed requests.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// API key (sent in the `X-MBX-APIKEY` header).
    pub api_key: String,
    /// Secret key for HMAC-SHA256 signing.
    pub api_secret: String,
}

// Manual Debug so a stray `{:?}` can never leak the secret.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Build credentials, failing fast when either value is blank.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self, TradeError> {
        let api_key = api_key.into().trim().to_string();
        let api_secret = api_secret.into().trim().to_string();
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(TradeError::Config(format!(
                "{API_KEY_ENV} and {API_SECRET_ENV} must both be set and non-empty"
            )));
        }
        Ok(Self { api_key, api_secret })
    }

    /// Load credentials from the environment.
    pub fn from_env() -> Result<Self, TradeError> {
        Self::new(
            std::env::var(API_KEY_ENV).unwrap_or_default(),
            std::env::var(API_SECRET_ENV).unwrap_or_default(),
        )
    }
}

/// Show only the first few characters of an identifier.
fn redact(s: &str) -> String {
    let prefix: String = s.chars().take(4).collect();
    format!("{prefix}…")
}

/// Configuration for the trading client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// REST API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `recvWindow` for signed requests (milliseconds).
    #[serde(default = "default_recv_window")]
    pub recv_window: u64,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries after the first attempt on transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds (doubles per retry).
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Cap on the backoff delay in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recv_window: default_recv_window(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Default config with the base URL taken from the environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Default helpers (used by serde)
// ---------------------------------------------------------------------------

fn default_base_url() -> String {
    "https://testnet.binancefuture.com".into()
}

fn default_recv_window() -> u64 {
    5000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}
