//! Order enumerations and the per-type wire field table.
//!
//! Each enum knows its Binance wire name (`as_str`) and parses
//! case-insensitively from caller input (`FromStr`). The required-field set
//! for each order type is a data artifact ([`OrderType::wire_fields`])
//! shared by the validator and the payload builder, so adding a new order
//! type is a table edit rather than new branching.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Binance wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(format!("'{other}' is not one of: BUY, SELL")),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Wire fields
// ---------------------------------------------------------------------------

/// A parameter slot in the order-placement payload.
///
/// `Symbol`, `Side`, `Type`, and `Quantity` are common to every order type;
/// the rest vary per [`OrderType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireField {
    Symbol,
    Side,
    Type,
    Quantity,
    Price,
    StopPrice,
    TimeInForce,
}

// ---------------------------------------------------------------------------
// Order type
// ---------------------------------------------------------------------------

/// Supported order types.
///
/// `StopLimit` maps to Binance's `STOP` wire type (a stop order that rests
/// as a limit order once triggered), carrying both `price` and `stopPrice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    StopMarket,
    StopLimit,
}

impl OrderType {
    /// Binance wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopMarket => "STOP_MARKET",
            Self::StopLimit => "STOP",
        }
    }

    /// The exact field set transmitted for this order type, in wire order.
    ///
    /// | type        | price | stopPrice | timeInForce |
    /// |-------------|-------|-----------|-------------|
    /// | MARKET      |   –   |     –     |      –      |
    /// | LIMIT       |   ✓   |     –     |      ✓      |
    /// | STOP_MARKET |   –   |     ✓     |      –      |
    /// | STOP        |   ✓   |     ✓     |      ✓      |
    pub fn wire_fields(self) -> &'static [WireField] {
        use WireField::*;
        match self {
            Self::Market => &[Symbol, Side, Type, Quantity],
            Self::Limit => &[Symbol, Side, Type, Quantity, Price, TimeInForce],
            Self::StopMarket => &[Symbol, Side, Type, Quantity, StopPrice],
            Self::StopLimit => &[Symbol, Side, Type, Quantity, Price, StopPrice, TimeInForce],
        }
    }

    /// Whether `price` must be supplied for this type.
    pub fn requires_price(self) -> bool {
        self.wire_fields().contains(&WireField::Price)
    }

    /// Whether `stopPrice` must be supplied for this type.
    pub fn requires_stop_price(self) -> bool {
        self.wire_fields().contains(&WireField::StopPrice)
    }

    /// Whether `timeInForce` is transmitted for this type.
    pub fn takes_time_in_force(self) -> bool {
        self.wire_fields().contains(&WireField::TimeInForce)
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Ok(Self::Market),
            "LIMIT" => Ok(Self::Limit),
            "STOP_MARKET" => Ok(Self::StopMarket),
            "STOP" | "STOP_LIMIT" => Ok(Self::StopLimit),
            other => Err(format!(
                "'{other}' is not one of: MARKET, LIMIT, STOP_MARKET, STOP"
            )),
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Time in force
// ---------------------------------------------------------------------------

/// How long a resting order remains active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-canceled.
    #[default]
    Gtc,
    /// Immediate-or-cancel.
    Ioc,
    /// Fill-or-kill.
    Fok,
}

impl TimeInForce {
    /// Binance wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
            Self::Ioc => "IOC",
            Self::Fok => "FOK",
        }
    }
}

impl FromStr for TimeInForce {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GTC" => Ok(Self::Gtc),
            "IOC" => Ok(Self::Ioc),
            "FOK" => Ok(Self::Fok),
            other => Err(format!("'{other}' is not one of: GTC, IOC, FOK")),
        }
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Order status
// ---------------------------------------------------------------------------

/// Order status as reported by the venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
    /// A status string this client does not model (passed through verbatim).
    Other(String),
}

impl OrderStatus {
    /// Map a Binance status string to a typed status.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "NEW" => Self::New,
            "PARTIALLY_FILLED" => Self::PartiallyFilled,
            "FILLED" => Self::Filled,
            "CANCELED" => Self::Canceled,
            "REJECTED" => Self::Rejected,
            "EXPIRED" | "EXPIRED_IN_MATCH" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether any quantity has been executed in this status.
    pub fn has_fills(&self) -> bool {
        matches!(self, Self::PartiallyFilled | Self::Filled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => f.write_str("NEW"),
            Self::PartiallyFilled => f.write_str("PARTIALLY_FILLED"),
            Self::Filled => f.write_str("FILLED"),
            Self::Canceled => f.write_str("CANCELED"),
            Self::Rejected => f.write_str("REJECTED"),
            Self::Expired => f.write_str("EXPIRED"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" SELL ".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("market".parse::<OrderType>().unwrap(), OrderType::Market);
        assert_eq!("stop".parse::<OrderType>().unwrap(), OrderType::StopLimit);
        assert_eq!("ioc".parse::<TimeInForce>().unwrap(), TimeInForce::Ioc);
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!("HOLD".parse::<Side>().is_err());
        assert!("TRAILING_STOP".parse::<OrderType>().is_err());
        assert!("GTD".parse::<TimeInForce>().is_err());
    }

    #[test]
    fn wire_field_table_matches_type_rules() {
        assert!(!OrderType::Market.requires_price());
        assert!(!OrderType::Market.requires_stop_price());
        assert!(!OrderType::Market.takes_time_in_force());

        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Limit.requires_stop_price());
        assert!(OrderType::Limit.takes_time_in_force());

        assert!(!OrderType::StopMarket.requires_price());
        assert!(OrderType::StopMarket.requires_stop_price());

        assert!(OrderType::StopLimit.requires_price());
        assert!(OrderType::StopLimit.requires_stop_price());
        assert!(OrderType::StopLimit.takes_time_in_force());
    }

    #[test]
    fn stop_limit_uses_binance_stop_wire_name() {
        assert_eq!(OrderType::StopLimit.as_str(), "STOP");
    }

    #[test]
    fn status_from_wire() {
        assert_eq!(OrderStatus::from_wire("FILLED"), OrderStatus::Filled);
        assert_eq!(OrderStatus::from_wire("EXPIRED_IN_MATCH"), OrderStatus::Expired);
        assert_eq!(
            OrderStatus::from_wire("PENDING_CANCEL"),
            OrderStatus::Other("PENDING_CANCEL".into())
        );
        assert!(OrderStatus::PartiallyFilled.has_fills());
        assert!(!OrderStatus::New.has_fills());
    }
}
