//! Input validation for order parameters.
//!
//! All functions are pure — no I/O, no clock — and return
//! [`TradeError::Validation`] naming the offending field. A failed
//! validation must prevent any signing or network activity, so the CLI runs
//! [`validate_intent`] before constructing the executor.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, TradeError};
use crate::types::enums::{OrderType, Side, TimeInForce};
use crate::types::order::OrderIntent;

/// Normalize and check a trading pair symbol.
///
/// Uppercased, non-empty, alphanumeric only (e.g. `BTCUSDT`).
pub fn validate_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(TradeError::validation("symbol", "must not be empty"));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TradeError::validation(
            "symbol",
            format!("'{symbol}' contains invalid characters; use alphanumeric only (e.g. BTCUSDT)"),
        ));
    }
    Ok(symbol)
}

/// Parse `value` as a strictly positive decimal, attributing failures to
/// `field`.
fn positive_decimal(field: &'static str, value: &str) -> Result<Decimal> {
    let parsed = Decimal::from_str(value.trim())
        .map_err(|_| TradeError::validation(field, format!("'{value}' is not a valid number")))?;
    if parsed <= Decimal::ZERO {
        return Err(TradeError::validation(
            field,
            format!("must be greater than 0 (got {parsed})"),
        ));
    }
    Ok(parsed)
}

/// Validate the order quantity.
pub fn validate_quantity(quantity: &str) -> Result<Decimal> {
    positive_decimal("quantity", quantity)
}

/// Validate the limit price against the order type's field table.
///
/// Required and positive for types that transmit `price`; a price supplied
/// for MARKET/STOP_MARKET is not an error but is dropped.
pub fn validate_price(price: Option<&str>, order_type: OrderType) -> Result<Option<Decimal>> {
    if !order_type.requires_price() {
        return Ok(None);
    }
    match price {
        Some(p) => positive_decimal("price", p).map(Some),
        None => Err(TradeError::validation(
            "price",
            format!("required for {order_type} orders"),
        )),
    }
}

/// Validate the stop trigger price against the order type's field table.
pub fn validate_stop_price(
    stop_price: Option<&str>,
    order_type: OrderType,
) -> Result<Option<Decimal>> {
    if !order_type.requires_stop_price() {
        return Ok(None);
    }
    match stop_price {
        Some(sp) => positive_decimal("stopPrice", sp).map(Some),
        None => Err(TradeError::validation(
            "stopPrice",
            format!("required for {order_type} orders"),
        )),
    }
}

/// Parse the time-in-force, defaulting to GTC when absent.
///
/// A default is assigned even for types that never transmit it, so the
/// intent is uniform.
pub fn validate_time_in_force(tif: Option<&str>) -> Result<TimeInForce> {
    match tif {
        Some(s) => TimeInForce::from_str(s).map_err(|e| TradeError::validation("timeInForce", e)),
        None => Ok(TimeInForce::default()),
    }
}

/// Run all validations and assemble an [`OrderIntent`].
///
/// The returned intent satisfies the per-type field-presence invariants by
/// construction.
pub fn validate_intent(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
    stop_price: Option<&str>,
    time_in_force: Option<&str>,
) -> Result<OrderIntent> {
    let symbol = validate_symbol(symbol)?;
    let side = Side::from_str(side).map_err(|e| TradeError::validation("side", e))?;
    let order_type = OrderType::from_str(order_type).map_err(|e| TradeError::validation("type", e))?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, order_type)?;
    let stop_price = validate_stop_price(stop_price, order_type)?;
    let time_in_force = validate_time_in_force(time_in_force)?;

    Ok(OrderIntent {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
        time_in_force,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: TradeError) -> &'static str {
        match err {
            TradeError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn symbol_is_normalized() {
        assert_eq!(validate_symbol(" btcusdt ").unwrap(), "BTCUSDT");
    }

    #[test]
    fn symbol_rejects_empty_and_separators() {
        assert_eq!(field_of(validate_symbol("  ").unwrap_err()), "symbol");
        assert_eq!(field_of(validate_symbol("BTC-USDT").unwrap_err()), "symbol");
        assert_eq!(field_of(validate_symbol("BTC/USDT").unwrap_err()), "symbol");
    }

    #[test]
    fn quantity_must_be_positive_number() {
        assert_eq!(validate_quantity("0.001").unwrap(), "0.001".parse().unwrap());
        assert_eq!(field_of(validate_quantity("0").unwrap_err()), "quantity");
        assert_eq!(field_of(validate_quantity("-1").unwrap_err()), "quantity");
        assert_eq!(field_of(validate_quantity("abc").unwrap_err()), "quantity");
    }

    #[test]
    fn price_required_for_limit_and_stop_limit() {
        assert_eq!(
            field_of(validate_price(None, OrderType::Limit).unwrap_err()),
            "price"
        );
        assert_eq!(
            field_of(validate_price(None, OrderType::StopLimit).unwrap_err()),
            "price"
        );
    }

    #[test]
    fn price_dropped_for_market_types() {
        // Supplying a price for MARKET is not an error, it is ignored.
        assert_eq!(validate_price(Some("90000"), OrderType::Market).unwrap(), None);
        assert_eq!(
            validate_price(Some("90000"), OrderType::StopMarket).unwrap(),
            None
        );
    }

    #[test]
    fn stop_price_required_for_stop_types() {
        assert_eq!(
            field_of(validate_stop_price(None, OrderType::StopMarket).unwrap_err()),
            "stopPrice"
        );
        assert_eq!(
            field_of(validate_stop_price(None, OrderType::StopLimit).unwrap_err()),
            "stopPrice"
        );
        assert_eq!(validate_stop_price(Some("85000"), OrderType::Limit).unwrap(), None);
    }

    #[test]
    fn tif_defaults_to_gtc() {
        assert_eq!(validate_time_in_force(None).unwrap(), TimeInForce::Gtc);
        assert_eq!(validate_time_in_force(Some("fok")).unwrap(), TimeInForce::Fok);
        assert_eq!(
            field_of(validate_time_in_force(Some("GTD")).unwrap_err()),
            "timeInForce"
        );
    }

    #[test]
    fn market_intent_has_no_price_fields() {
        let intent =
            validate_intent("btcusdt", "BUY", "MARKET", "0.001", Some("90000"), None, None)
                .unwrap();
        assert_eq!(intent.symbol, "BTCUSDT");
        assert_eq!(intent.price, None);
        assert_eq!(intent.stop_price, None);
        assert_eq!(intent.time_in_force, TimeInForce::Gtc);
    }

    #[test]
    fn stop_limit_missing_price_names_price() {
        // Scenario: STOP intent with stopPrice but no limit price.
        let err = validate_intent(
            "BTCUSDT",
            "SELL",
            "STOP",
            "0.001",
            None,
            Some("85000"),
            None,
        )
        .unwrap_err();
        assert_eq!(field_of(err), "price");
    }

    #[test]
    fn unknown_type_rejected() {
        let err =
            validate_intent("BTCUSDT", "BUY", "ICEBERG", "0.001", None, None, None).unwrap_err();
        assert_eq!(field_of(err), "type");
    }
}
