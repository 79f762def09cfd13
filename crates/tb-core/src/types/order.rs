//! Order intent and result structures.
//!
//! [`OrderIntent`] is the validated, immutable input to the execution
//! pipeline; [`OrderResult`] is the typed view of the venue's order
//! response. Prices and quantities use `rust_decimal::Decimal` so the
//! serialized form matches the caller's input exactly — the signed query
//! string must be byte-identical to what is transmitted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderStatus, OrderType, Side, TimeInForce};

// ---------------------------------------------------------------------------
// Order intent (caller → executor)
// ---------------------------------------------------------------------------

/// A validated order request.
///
/// Construct via [`crate::validate::validate_intent`]; field-presence
/// invariants (price iff LIMIT/STOP, stopPrice iff STOP_MARKET/STOP) hold by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Trading pair, uppercase alphanumeric (e.g. `"BTCUSDT"`).
    pub symbol: String,
    /// Buy or sell.
    pub side: Side,
    /// Order type.
    pub order_type: OrderType,
    /// Order quantity in the base asset, strictly positive.
    pub quantity: Decimal,
    /// Limit price — `Some` iff the type requires it.
    pub price: Option<Decimal>,
    /// Stop trigger price — `Some` iff the type requires it.
    pub stop_price: Option<Decimal>,
    /// Time-in-force. Always assigned; only transmitted for types that
    /// take it.
    pub time_in_force: TimeInForce,
}

// ---------------------------------------------------------------------------
// Order result (venue → caller)
// ---------------------------------------------------------------------------

/// Structured representation of a Binance order response.
///
/// Built once per successful HTTP exchange and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    /// Exchange-assigned order ID.
    pub order_id: u64,
    /// Client-generated order ID echoed by the venue.
    pub client_order_id: String,
    /// Trading pair.
    pub symbol: String,
    /// Echoed side.
    pub side: Side,
    /// Echoed order type (wire string, e.g. `"STOP"`).
    pub order_type: String,
    /// Order status (NEW, FILLED, PARTIALLY_FILLED, ...).
    pub status: OrderStatus,
    /// Original order quantity.
    pub orig_qty: Decimal,
    /// Quantity executed so far.
    pub executed_qty: Decimal,
    /// Average fill price — present only when partially or fully filled.
    pub avg_price: Option<Decimal>,
    /// Limit price, if any.
    pub price: Option<Decimal>,
}

impl OrderResult {
    /// Return a concise human-readable summary for CLI output.
    pub fn summary(&self) -> String {
        let rule = "-".repeat(52);
        let fmt_opt = |v: &Option<Decimal>| match v {
            Some(d) => d.to_string(),
            None => "N/A".to_string(),
        };
        [
            rule.clone(),
            "  ORDER RESULT".to_string(),
            rule.clone(),
            format!("  Order ID       : {}", self.order_id),
            format!("  Client OID     : {}", self.client_order_id),
            format!("  Symbol         : {}", self.symbol),
            format!("  Side           : {}", self.side),
            format!("  Type           : {}", self.order_type),
            format!("  Status         : {}", self.status),
            format!("  Orig Qty       : {}", self.orig_qty),
            format!("  Executed Qty   : {}", self.executed_qty),
            format!("  Avg Fill Price : {}", fmt_opt(&self.avg_price)),
            format!("  Limit Price    : {}", fmt_opt(&self.price)),
            rule,
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_contains_key_fields() {
        let result = OrderResult {
            order_id: 4063291,
            client_order_id: "x-abc123".into(),
            symbol: "BTCUSDT".into(),
            side: Side::Buy,
            order_type: "MARKET".into(),
            status: OrderStatus::Filled,
            orig_qty: "0.001".parse().unwrap(),
            executed_qty: "0.001".parse().unwrap(),
            avg_price: Some("86421.5".parse().unwrap()),
            price: None,
        };
        let s = result.summary();
        assert!(s.contains("4063291"));
        assert!(s.contains("FILLED"));
        assert!(s.contains("86421.5"));
        assert!(s.contains("N/A"));
    }
}
