//! # tb-exec
//!
//! Signed-request execution pipeline for Binance USDT-M Futures.
//!
//! An order placement is a single forward pass through four stages:
//!
//! ```text
//! OrderIntent ──build──▶ params ──sign──▶ SignedRequest ──send──▶ JSON ──parse──▶ OrderResult
//!              order.rs          auth.rs                transport.rs      order.rs
//! ```
//!
//! - **`auth`** — HMAC-SHA256 request signing over the canonical query string
//! - **`transport`** — HTTPS execution with retry/backoff and response
//!   classification
//! - **`order`** — per-type payload construction and response parsing
//! - **`executor`** — the orchestrator tying the stages together
//!
//! Validation happens upstream in `tb-core::validate`; nothing here accepts
//! an unvalidated intent.

pub mod auth;
pub mod executor;
pub mod order;
pub mod transport;

pub use auth::{SignedRequest, Signer};
pub use executor::OrderExecutor;
pub use transport::{HttpTransport, OrderTransport, RetryPolicy};
