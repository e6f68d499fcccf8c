//! Admission of raw client orders.
//!
//! Raw records arrive as JSON objects from the order stream:
//!
//! ```json
//! {"user_id": "u-17", "timestamp_ns": "1700000000000000000", "price": "187.35",
//!  "symbol": "AAPL", "quantity": 40, "order_type": "bid", "trader_type": "retail"}
//! ```
//!
//! Numeric fields may be JSON numbers or numeric strings. A record that
//! passes [`RawOrder::validate`] is stripped of its client-only fields
//! (user, timestamp, trader type) and can be sequenced into an engine
//! [`Order`].

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AdmissionError;
use crate::types::price::decimal_to_fixed;
use crate::types::{Order, Side};

/// Accepted symbol lengths
const SYMBOL_LEN: std::ops::RangeInclusive<usize> = 4..=5;

/// A JSON number or a string holding one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Numeric {
    fn raw(&self) -> String {
        match self {
            Numeric::Number(n) => n.to_string(),
            Numeric::Text(s) => s.clone(),
        }
    }

    fn to_decimal(&self) -> Option<Decimal> {
        let raw = self.raw();
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    }

    fn decimal(&self, field: &'static str) -> Result<Decimal, AdmissionError> {
        self.to_decimal().ok_or_else(|| AdmissionError::NotNumeric {
            field,
            value: self.raw(),
        })
    }
}

/// Who submitted the order; only used for admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraderType {
    MarketMaker,
    Institutional,
    Retail,
}

impl FromStr for TraderType {
    type Err = AdmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "market_maker" => Ok(TraderType::MarketMaker),
            "institutional" => Ok(TraderType::Institutional),
            "retail" => Ok(TraderType::Retail),
            other => Err(AdmissionError::TraderType(other.to_string())),
        }
    }
}

/// Client order record as received from the order stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrder {
    pub user_id: String,
    pub timestamp_ns: Numeric,
    pub price: Numeric,
    pub symbol: String,
    pub quantity: Numeric,
    pub order_type: String,
    pub trader_type: String,
}

/// A validated order waiting for its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedOrder {
    pub symbol: String,
    pub side: Side,
    /// Fixed-point price (scaled by 10^8)
    pub price: u64,
    pub quantity: u64,
}

impl AdmittedOrder {
    /// Attach the arrival sequence number
    pub fn sequence(self, sequence_number: u64) -> Order {
        Order::new(
            self.symbol,
            self.side,
            self.price,
            self.quantity,
            sequence_number,
        )
    }
}

impl RawOrder {
    pub fn parse(line: &str) -> Result<Self, AdmissionError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Apply the gateway checks and convert to engine units.
    pub fn validate(&self) -> Result<AdmittedOrder, AdmissionError> {
        self.timestamp_ns.decimal("timestamp_ns")?;
        let price = self.price.decimal("price")?;
        let quantity = self.quantity.decimal("quantity")?;

        if !SYMBOL_LEN.contains(&self.symbol.chars().count()) {
            return Err(AdmissionError::SymbolLength(self.symbol.clone()));
        }
        let side = match self.order_type.as_str() {
            "bid" => Side::Bid,
            "ask" => Side::Ask,
            other => return Err(AdmissionError::OrderType(other.to_string())),
        };
        self.trader_type.parse::<TraderType>()?;

        let price = match decimal_to_fixed(price) {
            Some(fixed) if fixed > 0 => fixed,
            _ => return Err(AdmissionError::Price(price.to_string())),
        };
        let quantity = match quantity.to_u64() {
            Some(units) if units > 0 && quantity.fract().is_zero() => units,
            _ => return Err(AdmissionError::Quantity(quantity.to_string())),
        };

        Ok(AdmittedOrder {
            symbol: self.symbol.clone(),
            side,
            price,
            quantity,
        })
    }
}

/// Parse and validate one JSON line
pub fn admit(line: &str) -> Result<AdmittedOrder, AdmissionError> {
    RawOrder::parse(line)?.validate()
}
