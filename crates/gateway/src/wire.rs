//! Wire DTOs and payload normalization
//!
//! The trading service wraps every payload in a
//! `{success, message, data}` envelope. Position records arrive as the
//! broker's raw book-keeping rows and are normalized here: closed rows
//! are dropped, the net-quantity sign becomes the position side, and
//! the average price is recovered through the broker's fallback chain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{Account, Instrument, OrderReceipt, Position, PositionSide, Timestamp};
use orderdesk_ports::{ServiceError, ServiceResult};

/// Response envelope used by every trading-service endpoint
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, mapping a false/absent success indicator to
    /// a rejection carrying the backend message
    pub fn into_result(self) -> ServiceResult<T> {
        if self.success {
            if let Some(data) = self.data {
                return Ok(data);
            }
        }
        Err(ServiceError::Rejected(
            self.message
                .unwrap_or_else(|| "trading service reported failure".to_string()),
        ))
    }
}

/// Account payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAccount {
    pub client_id: String,
    #[serde(default)]
    pub linked_at: Option<Timestamp>,
}

impl WireAccount {
    pub fn into_account(self, fallback_linked_at: Timestamp) -> Account {
        Account {
            client_id: self.client_id,
            linked_at: self.linked_at.unwrap_or(fallback_linked_at),
        }
    }
}

/// Instrument payload - field names match the core entity directly
pub type WireInstrument = Instrument;

/// Order acknowledgement payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub order_status: String,
}

impl From<WireOrder> for OrderReceipt {
    fn from(wire: WireOrder) -> Self {
        OrderReceipt {
            order_id: wire.order_id,
            status: wire.order_status,
        }
    }
}

/// Raw broker position row
///
/// Every field is defaulted: brokers omit keys freely and a missing
/// number must read as zero, exactly like the upstream book-keeping.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WirePosition {
    pub trading_symbol: String,
    pub security_id: String,
    pub exchange_segment: String,
    pub product_type: String,
    pub net_qty: i64,
    pub buy_avg: Decimal,
    pub sell_avg: Decimal,
    pub avg_price: Decimal,
    pub day_buy_value: Decimal,
    pub day_buy_qty: i64,
    pub realized_profit: Decimal,
    pub unrealized_profit: Decimal,
    pub last_traded_price: Decimal,
    pub ltp: Decimal,
}

impl WirePosition {
    /// Normalize a raw row into a displayable open position
    ///
    /// Returns `None` for rows with `netQty == 0` (closed intraday
    /// legs) and for rows whose quantity does not fit the domain type.
    pub fn normalize(self) -> Option<Position> {
        if self.net_qty == 0 {
            return None;
        }
        let side = if self.net_qty > 0 {
            PositionSide::Long
        } else {
            PositionSide::Short
        };
        let quantity = u32::try_from(self.net_qty.unsigned_abs()).ok()?;

        // Average price: side-specific average, then the generic
        // average, then the day-buy turnover as a last resort
        let mut avg_price = match side {
            PositionSide::Long => self.buy_avg,
            PositionSide::Short => self.sell_avg,
        };
        if avg_price.is_zero() {
            avg_price = self.avg_price;
        }
        if avg_price.is_zero() && self.day_buy_qty > 0 {
            avg_price = self.day_buy_value / Decimal::from(self.day_buy_qty);
        }

        let ltp = if self.last_traded_price.is_zero() {
            self.ltp
        } else {
            self.last_traded_price
        };

        Some(Position {
            symbol: self.trading_symbol,
            security_id: self.security_id,
            exchange: self.exchange_segment,
            quantity,
            avg_price,
            ltp,
            // Taken as-is from the backend, never recomputed locally
            pnl: self.realized_profit + self.unrealized_profit,
            side,
            product_type: self.product_type,
        })
    }
}

/// Link request payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountBody<'a> {
    pub client_id: &'a str,
    pub access_token: &'a str,
}

/// Symbol search payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSearchBody<'a> {
    pub query: &'a str,
    pub exchange: &'a str,
    pub limit: usize,
}

/// Order placement payload
///
/// `security_id` is the trade key; `price` is present only for LIMIT
/// orders. Validity is always DAY.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderBody<'a> {
    pub client_id: &'a str,
    pub security_id: &'a str,
    pub exchange_segment: &'a str,
    pub transaction_type: orderdesk_core::TransactionType,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub order_type: orderdesk_core::OrderType,
    pub product_type: orderdesk_core::ProductType,
    pub validity: &'a str,
}

/// Close payload - a reverse MARKET/DAY order keyed by the position's
/// trade identity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionBody<'a> {
    pub client_id: &'a str,
    pub security_id: &'a str,
    pub exchange_segment: &'a str,
    pub quantity: u32,
    pub product_type: &'a str,
    pub position_type: PositionSide,
    /// Derived: closing a long sells, closing a short buys
    pub transaction_type: orderdesk_core::TransactionType,
    pub order_type: orderdesk_core::OrderType,
    pub validity: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> WirePosition {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn closed_rows_are_dropped() {
        let row = parse(json!({
            "tradingSymbol": "TCS",
            "securityId": "11536",
            "netQty": 0
        }));
        assert!(row.normalize().is_none());
    }

    #[test]
    fn positive_net_qty_is_a_long_priced_from_buy_avg() {
        let row = parse(json!({
            "tradingSymbol": "TCS",
            "securityId": "11536",
            "exchangeSegment": "NSE_EQ",
            "productType": "INTRADAY",
            "netQty": 10,
            "buyAvg": "3500.50",
            "sellAvg": "0",
            "realizedProfit": "10.00",
            "unrealizedProfit": "40.00",
            "lastTradedPrice": "3505.00"
        }));

        let pos = row.normalize().unwrap();
        assert_eq!(pos.side, PositionSide::Long);
        assert_eq!(pos.quantity, 10);
        assert_eq!(pos.avg_price, dec!(3500.50));
        assert_eq!(pos.pnl, dec!(50.00));
        assert_eq!(pos.ltp, dec!(3505.00));
    }

    #[test]
    fn negative_net_qty_is_a_short_priced_from_sell_avg() {
        let row = parse(json!({
            "tradingSymbol": "SBIN",
            "securityId": "3045",
            "netQty": -25,
            "sellAvg": "601.10"
        }));

        let pos = row.normalize().unwrap();
        assert_eq!(pos.side, PositionSide::Short);
        assert_eq!(pos.quantity, 25);
        assert_eq!(pos.avg_price, dec!(601.10));
    }

    #[test]
    fn avg_price_falls_back_to_generic_then_day_turnover() {
        let generic = parse(json!({
            "securityId": "1",
            "netQty": 5,
            "avgPrice": "99.00"
        }));
        assert_eq!(generic.normalize().unwrap().avg_price, dec!(99.00));

        let turnover = parse(json!({
            "securityId": "2",
            "netQty": 4,
            "dayBuyValue": "400.00",
            "dayBuyQty": 4
        }));
        assert_eq!(turnover.normalize().unwrap().avg_price, dec!(100.00));
    }

    #[test]
    fn ltp_falls_back_to_the_short_key() {
        let row = parse(json!({
            "securityId": "3",
            "netQty": 1,
            "ltp": "12.34"
        }));
        assert_eq!(row.normalize().unwrap().ltp, dec!(12.34));
    }

    #[test]
    fn pnl_is_the_backend_sum_even_when_negative() {
        let row = parse(json!({
            "securityId": "4",
            "netQty": 2,
            "realizedProfit": "-30.00",
            "unrealizedProfit": "10.00"
        }));
        assert_eq!(row.normalize().unwrap().pnl, dec!(-20.00));
    }

    #[test]
    fn envelope_failure_maps_to_rejection_with_message() {
        let env: ApiEnvelope<Vec<WireInstrument>> = serde_json::from_value(json!({
            "success": false,
            "message": "Failed to fetch positions: token expired"
        }))
        .unwrap();

        let err = env.into_result().unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected("Failed to fetch positions: token expired".to_string())
        );
    }

    #[test]
    fn envelope_success_without_data_is_still_a_failure() {
        let env: ApiEnvelope<WireOrder> =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(env.into_result().is_err());
    }

    #[test]
    fn order_ack_maps_to_a_receipt() {
        let env: ApiEnvelope<WireOrder> = serde_json::from_value(json!({
            "success": true,
            "message": "Order created successfully",
            "data": { "orderId": "112111182045", "orderStatus": "TRANSIT" }
        }))
        .unwrap();

        let receipt: OrderReceipt = env.into_result().unwrap().into();
        assert_eq!(receipt.order_id, "112111182045");
        assert_eq!(receipt.status, "TRANSIT");
    }

    #[test]
    fn close_body_serializes_the_reverse_market_order() {
        use orderdesk_core::{OrderType, TransactionType};

        let body = ClosePositionBody {
            client_id: "C1",
            security_id: "3045",
            exchange_segment: "NSE_EQ",
            quantity: 25,
            product_type: "INTRADAY",
            position_type: PositionSide::Short,
            transaction_type: PositionSide::Short.reversing_transaction(),
            order_type: OrderType::Market,
            validity: "DAY",
        };
        assert_eq!(body.transaction_type, TransactionType::Buy);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["positionType"], "SHORT");
        assert_eq!(json["transactionType"], "BUY");
        assert_eq!(json["orderType"], "MARKET");
        assert_eq!(json["validity"], "DAY");
    }
}
