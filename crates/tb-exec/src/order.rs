//! Order payload construction and response parsing.
//!
//! [`build_order_params`] is the single source of truth for how a logical
//! order type becomes a wire-level request: it walks the per-type field
//! table ([`OrderType::wire_fields`]) and emits parameters in fixed wire
//! order. [`parse_order_result`] is the inverse direction, turning the
//! venue's JSON order payload into a typed [`OrderResult`].

use rust_decimal::Decimal;
use serde_json::Value;

use tb_core::error::{Result, TradeError};
use tb_core::types::enums::{OrderStatus, Side, WireField};
use tb_core::types::order::{OrderIntent, OrderResult};

/// Order placement / query / cancel endpoint.
pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";

/// Map a validated intent to the parameter list for `POST /fapi/v1/order`.
///
/// Parameters are emitted in the order the field table lists them; the
/// signer appends `timestamp` and `recvWindow` afterwards. The intent's
/// field-presence invariants hold by construction, so a missing required
/// value here is a programming error, not a user error.
pub fn build_order_params(intent: &OrderIntent) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(7);
    for field in intent.order_type.wire_fields() {
        match field {
            WireField::Symbol => params.push(("symbol", intent.symbol.clone())),
            WireField::Side => params.push(("side", intent.side.as_str().to_string())),
            WireField::Type => params.push(("type", intent.order_type.as_str().to_string())),
            WireField::Quantity => params.push(("quantity", intent.quantity.to_string())),
            WireField::Price => {
                if let Some(price) = intent.price {
                    params.push(("price", price.to_string()));
                }
            }
            WireField::StopPrice => {
                if let Some(stop) = intent.stop_price {
                    params.push(("stopPrice", stop.to_string()));
                }
            }
            WireField::TimeInForce => {
                params.push(("timeInForce", intent.time_in_force.as_str().to_string()));
            }
        }
    }
    params
}

/// Parse a Binance order response into an [`OrderResult`].
///
/// Binance reports unfilled prices as the string `"0"`; those map to `None`
/// so `avg_price` is only present when something actually executed.
pub fn parse_order_result(value: &Value) -> Result<OrderResult> {
    let order_id = value
        .get("orderId")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| TradeError::Parse("orderId missing from order response".into()))?;

    let symbol = str_field(value, "symbol")?.to_string();
    let side: Side = str_field(value, "side")?
        .parse()
        .map_err(|e: String| TradeError::Parse(format!("side: {e}")))?;
    let status = OrderStatus::from_wire(str_field(value, "status")?);

    Ok(OrderResult {
        order_id,
        client_order_id: value
            .get("clientOrderId")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        symbol,
        side,
        order_type: str_field(value, "type")?.to_string(),
        status,
        orig_qty: decimal_field(value, "origQty")?.unwrap_or(Decimal::ZERO),
        executed_qty: decimal_field(value, "executedQty")?.unwrap_or(Decimal::ZERO),
        avg_price: decimal_field(value, "avgPrice")?,
        price: decimal_field(value, "price")?,
    })
}

/// Required string field.
fn str_field<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| TradeError::Parse(format!("{key} missing from order response")))
}

/// Optional decimal field carried as a string; `"0"` and absent both map to
/// `None`.
fn decimal_field(value: &Value, key: &str) -> Result<Option<Decimal>> {
    match value.get(key).and_then(|v| v.as_str()) {
        None => Ok(None),
        Some(raw) => {
            let parsed: Decimal = raw
                .parse()
                .map_err(|_| TradeError::Parse(format!("{key} is not a valid decimal: '{raw}'")))?;
            if parsed.is_zero() {
                Ok(None)
            } else {
                Ok(Some(parsed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_core::types::enums::{OrderType, TimeInForce};
    use tb_core::validate::validate_intent;

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    fn value_of<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn market_params_have_no_price_fields() {
        let intent =
            validate_intent("BTCUSDT", "BUY", "MARKET", "0.001", None, None, None).unwrap();
        let params = build_order_params(&intent);
        assert_eq!(keys(&params), ["symbol", "side", "type", "quantity"]);
        assert_eq!(value_of(&params, "type"), Some("MARKET"));
        assert_eq!(value_of(&params, "quantity"), Some("0.001"));
    }

    #[test]
    fn limit_params_carry_price_and_tif() {
        let intent = validate_intent(
            "BTCUSDT",
            "SELL",
            "LIMIT",
            "0.001",
            Some("90000"),
            None,
            None,
        )
        .unwrap();
        let params = build_order_params(&intent);
        assert_eq!(
            keys(&params),
            ["symbol", "side", "type", "quantity", "price", "timeInForce"]
        );
        assert_eq!(value_of(&params, "price"), Some("90000"));
        assert_eq!(value_of(&params, "timeInForce"), Some("GTC"));
    }

    #[test]
    fn stop_market_params_carry_stop_price_only() {
        let intent = validate_intent(
            "BTCUSDT",
            "BUY",
            "STOP_MARKET",
            "0.001",
            None,
            Some("85000"),
            None,
        )
        .unwrap();
        let params = build_order_params(&intent);
        assert_eq!(
            keys(&params),
            ["symbol", "side", "type", "quantity", "stopPrice"]
        );
        assert_eq!(value_of(&params, "stopPrice"), Some("85000"));
    }

    #[test]
    fn stop_limit_maps_to_stop_wire_type_with_both_prices() {
        let intent = validate_intent(
            "BTCUSDT",
            "SELL",
            "STOP",
            "0.001",
            Some("84900"),
            Some("85000"),
            Some("IOC"),
        )
        .unwrap();
        assert_eq!(intent.order_type, OrderType::StopLimit);
        assert_eq!(intent.time_in_force, TimeInForce::Ioc);

        let params = build_order_params(&intent);
        assert_eq!(
            keys(&params),
            ["symbol", "side", "type", "quantity", "price", "stopPrice", "timeInForce"]
        );
        assert_eq!(value_of(&params, "type"), Some("STOP"));
        assert_eq!(value_of(&params, "price"), Some("84900"));
        assert_eq!(value_of(&params, "stopPrice"), Some("85000"));
        assert_eq!(value_of(&params, "timeInForce"), Some("IOC"));
    }

    #[test]
    fn parses_filled_market_response() {
        let body = serde_json::json!({
            "orderId": 4063291u64,
            "clientOrderId": "x-testnet-1",
            "symbol": "BTCUSDT",
            "side": "BUY",
            "type": "MARKET",
            "status": "FILLED",
            "origQty": "0.001",
            "executedQty": "0.001",
            "avgPrice": "86421.50",
            "price": "0",
        });
        let result = parse_order_result(&body).unwrap();
        assert_eq!(result.order_id, 4063291);
        assert_eq!(result.status, OrderStatus::Filled);
        assert_eq!(result.avg_price, Some("86421.50".parse().unwrap()));
        // "0" price means no limit price.
        assert_eq!(result.price, None);
    }

    #[test]
    fn parses_new_limit_response_without_fills() {
        let body = serde_json::json!({
            "orderId": 4063292u64,
            "clientOrderId": "x-testnet-2",
            "symbol": "BTCUSDT",
            "side": "SELL",
            "type": "LIMIT",
            "status": "NEW",
            "origQty": "0.001",
            "executedQty": "0",
            "avgPrice": "0",
            "price": "90000",
        });
        let result = parse_order_result(&body).unwrap();
        assert_eq!(result.status, OrderStatus::New);
        assert_eq!(result.executed_qty, Decimal::ZERO);
        assert_eq!(result.avg_price, None);
        assert_eq!(result.price, Some("90000".parse().unwrap()));
    }

    #[test]
    fn missing_order_id_is_a_parse_error() {
        let body = serde_json::json!({ "symbol": "BTCUSDT" });
        assert!(matches!(
            parse_order_result(&body),
            Err(TradeError::Parse(_))
        ));
    }
}
