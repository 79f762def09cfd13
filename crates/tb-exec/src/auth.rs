//! Request signing utilities.
//!
//! Binance authenticates signed endpoints with an HMAC-SHA256 signature
//! computed over the URL-encoded query string and appended as the final
//! `signature` parameter. The venue validates the signature against the
//! exact bytes it receives, so the query string built here is transmitted
//! verbatim — [`SignedRequest`] is immutable once built and the transport
//! never reorders or re-encodes it.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;

use tb_core::config::Credentials;
use tb_core::error::{Result, TradeError};

type HmacSha256 = Hmac<Sha256>;

/// Compute an HMAC-SHA256 signature and return it as a lowercase hex string.
///
/// # Arguments
///
/// * `secret` — the API secret key (UTF-8 string).
/// * `message` — the data to sign (typically the query string).
pub fn hmac_sha256_sign(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Build a URL-encoded, HMAC-SHA256–signed query string.
///
/// Takes a slice of `(key, value)` parameter pairs, joins them with `&` in
/// the given order, computes the HMAC-SHA256 signature over the resulting
/// string, and appends `&signature=<hex>`.
pub fn build_signed_query(params: &[(&str, &str)], secret: &str) -> String {
    let query: String = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let signature = hmac_sha256_sign(secret, &query);
    format!("{query}&signature={signature}")
}

// ---------------------------------------------------------------------------
// SignedRequest
// ---------------------------------------------------------------------------

/// A fully signed, ready-to-transmit request.
///
/// The query string already includes `timestamp`, `recvWindow`, and the
/// trailing `signature`; mutating it after construction would invalidate the
/// signature, so all fields are read-only.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    method: Method,
    endpoint: String,
    query: String,
}

impl SignedRequest {
    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Endpoint path (e.g. `/fapi/v1/order`).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The exact query string to transmit, signature included.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query string with the `signature` parameter stripped, for
    /// logging.
    pub fn redacted_query(&self) -> &str {
        match self.query.rfind("&signature=") {
            Some(idx) => &self.query[..idx],
            None => &self.query,
        }
    }
}

// ---------------------------------------------------------------------------
// Signer
// ---------------------------------------------------------------------------

/// Builds [`SignedRequest`]s from parameter lists.
///
/// Stateless apart from the credentials and `recvWindow`; signing the same
/// parameters with the same timestamp always yields the same request.
pub struct Signer {
    credentials: Credentials,
    recv_window: u64,
}

impl Signer {
    /// Create a signer.
    ///
    /// Fails with a config error when either credential is blank — an
    /// unsigned request must never be produced silently.
    pub fn new(credentials: Credentials, recv_window: u64) -> Result<Self> {
        if credentials.api_key.trim().is_empty() || credentials.api_secret.trim().is_empty() {
            return Err(TradeError::Config(
                "cannot sign requests with blank credentials".into(),
            ));
        }
        Ok(Self {
            credentials,
            recv_window,
        })
    }

    /// API key to carry in the `X-MBX-APIKEY` header.
    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    /// Sign a request using the current wall clock for `timestamp`.
    pub fn sign(&self, method: Method, endpoint: &str, params: &[(&str, String)]) -> SignedRequest {
        self.sign_at(method, endpoint, params, current_timestamp_ms())
    }

    /// Sign a request with an explicit millisecond timestamp.
    ///
    /// `timestamp` and `recvWindow` are appended after the caller's
    /// parameters, then the whole string is signed.
    pub fn sign_at(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        timestamp_ms: u64,
    ) -> SignedRequest {
        let timestamp = timestamp_ms.to_string();
        let recv_window = self.recv_window.to_string();

        let mut pairs: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        pairs.push(("timestamp", &timestamp));
        pairs.push(("recvWindow", &recv_window));

        let query = build_signed_query(&pairs, &self.credentials.api_secret);

        SignedRequest {
            method,
            endpoint: endpoint.to_string(),
            query,
        }
    }
}

/// Returns the current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
