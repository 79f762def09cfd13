//! Order execution orchestrator.
//!
//! Combines the payload builder, signer, and transport into single forward
//! passes: build → sign → send → parse. No stage is revisited; the only
//! internal retries live in the transport.

use reqwest::Method;
use tracing::{debug, info};

use tb_core::error::Result;
use tb_core::types::order::{OrderIntent, OrderResult};

use crate::auth::Signer;
use crate::order::{ORDER_ENDPOINT, build_order_params, parse_order_result};
use crate::transport::OrderTransport;

/// High-level order placement controller.
///
/// Generic over the transport so tests can substitute a double. One
/// executor serves one credential set; each call is an independent unit of
/// work with its own freshly signed timestamp.
pub struct OrderExecutor<T: OrderTransport> {
    signer: Signer,
    transport: T,
}

impl<T: OrderTransport> OrderExecutor<T> {
    /// Create an executor from a signer and transport.
    pub fn new(signer: Signer, transport: T) -> Self {
        Self { signer, transport }
    }

    /// Return the parameter set that [`place`](Self::place) would transmit,
    /// without signing or any network activity.
    pub fn dry_run(&self, intent: &OrderIntent) -> Vec<(&'static str, String)> {
        build_order_params(intent)
    }

    /// Place a new order.
    pub async fn place(&self, intent: &OrderIntent) -> Result<OrderResult> {
        let params = build_order_params(intent);
        info!(
            "placing order: {} {} {} qty={}",
            intent.side, intent.symbol, intent.order_type, intent.quantity,
        );

        let request = self.signer.sign(Method::POST, ORDER_ENDPOINT, &params);
        let response = self.transport.send(&request).await?;
        let result = parse_order_result(&response)?;

        info!(
            "order placed: orderId={} status={}",
            result.order_id, result.status,
        );
        Ok(result)
    }

    /// Retrieve an existing order.
    pub async fn query_order(&self, symbol: &str, order_id: u64) -> Result<OrderResult> {
        let params = [
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];
        let request = self.signer.sign(Method::GET, ORDER_ENDPOINT, &params);
        let response = self.transport.send(&request).await?;
        let result = parse_order_result(&response)?;
        debug!(
            "order queried: orderId={} status={}",
            result.order_id, result.status,
        );
        Ok(result)
    }

    /// Cancel an open order.
    pub async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<OrderResult> {
        let params = [
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];
        let request = self.signer.sign(Method::DELETE, ORDER_ENDPOINT, &params);
        let response = self.transport.send(&request).await?;
        let result = parse_order_result(&response)?;
        info!(
            "order cancelled: orderId={} status={}",
            result.order_id, result.status,
        );
        Ok(result)
    }
}
