//! # tb-core
//!
//! Core crate for the futures trading CLI, providing:
//!
//! - **Types** (`types`) — order enums, the validated [`OrderIntent`], and
//!   the parsed [`OrderResult`]
//! - **Validation** (`validate`) — pure input checks that run before any
//!   network call
//! - **Configuration** (`config`) — credentials and endpoint settings
//! - **Error types** (`error`) — domain-specific `TradeError` via thiserror
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod validate;

// Re-export the common types at crate root for convenience.
pub use error::TradeError;
pub use types::enums::{OrderStatus, OrderType, Side, TimeInForce};
pub use types::order::{OrderIntent, OrderResult};
