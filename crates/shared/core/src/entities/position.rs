use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::TransactionType;
use crate::values::{Price, Quantity, Symbol};

/// Position side - long (net bought) or short (net sold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// The transaction that flattens a position on this side
    pub fn reversing_transaction(&self) -> TransactionType {
        match self {
            PositionSide::Long => TransactionType::Sell,
            PositionSide::Short => TransactionType::Buy,
        }
    }
}

/// A server-reported open exposure in an instrument
///
/// Entirely server-derived: the local copy is a cache that is wholly
/// replaced on every successful fetch, never incrementally patched.
/// P&L sign and magnitude are taken as-is from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Display symbol
    pub symbol: Symbol,
    /// Backend trade key; the sole correlation key for close requests
    pub security_id: String,
    /// Exchange segment, e.g. "NSE_EQ"
    pub exchange: String,
    /// Open quantity (always positive; side carries the direction)
    pub quantity: Quantity,
    /// Average entry price
    pub avg_price: Price,
    /// Last traded price
    pub ltp: Price,
    /// Profit and loss as reported by the backend
    pub pnl: Decimal,
    #[serde(rename = "positionType")]
    pub side: PositionSide,
    /// Broker product type, passed back verbatim when closing
    pub product_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversing_transaction_flips_the_side() {
        assert_eq!(
            PositionSide::Long.reversing_transaction(),
            TransactionType::Sell
        );
        assert_eq!(
            PositionSide::Short.reversing_transaction(),
            TransactionType::Buy
        );
    }

    #[test]
    fn position_deserializes_from_wire_names() {
        let json = serde_json::json!({
            "symbol": "TCS",
            "securityId": "11536",
            "exchange": "NSE_EQ",
            "quantity": 10,
            "avgPrice": "3500.00",
            "ltp": "3505.00",
            "pnl": "50.00",
            "positionType": "LONG",
            "productType": "INTRADAY"
        });

        let pos: Position = serde_json::from_value(json).unwrap();
        assert_eq!(pos.security_id, "11536");
        assert_eq!(pos.side, PositionSide::Long);
        assert_eq!(pos.quantity, 10);
    }
}
