use serde::{Deserialize, Serialize};

use crate::entities::Instrument;
use crate::values::{Price, Quantity, Symbol};

/// Order direction (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    /// Returns the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            TransactionType::Buy => TransactionType::Sell,
            TransactionType::Sell => TransactionType::Buy,
        }
    }
}

/// Order pricing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Execute at the prevailing market price; draft price is ignored
    Market,
    /// Execute at the trader-supplied price; price is required
    Limit,
}

/// Product type for the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Intraday,
    /// Delivery (also reported as CNC by some broker endpoints)
    #[serde(alias = "CNC")]
    Delivery,
}

/// Default exchange segment for new drafts
pub const DEFAULT_EXCHANGE: &str = "NSE_EQ";

/// The not-yet-submitted order being composed by the trader
///
/// A draft is invalid until an instrument has been selected
/// (`security_id` non-empty) and `quantity > 0`. It is consumed on
/// successful submission: identifying fields reset to empty and
/// quantity/price return to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Display symbol, never transmitted as the trade key
    pub symbol: Symbol,
    /// Backend trade key, set only by selecting a resolver result
    pub security_id: String,
    /// Exchange segment, e.g. "NSE_EQ"
    pub exchange: String,
    pub transaction_type: TransactionType,
    pub quantity: Quantity,
    /// Required positive for LIMIT orders, ignored for MARKET
    pub price: Price,
    pub order_type: OrderType,
    pub product_type: ProductType,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            security_id: String::new(),
            exchange: DEFAULT_EXCHANGE.to_string(),
            transaction_type: TransactionType::Buy,
            quantity: 1,
            price: Price::ZERO,
            order_type: OrderType::Market,
            product_type: ProductType::Intraday,
        }
    }
}

impl OrderDraft {
    /// Copy an instrument's identity into the draft
    ///
    /// This is the only way a `security_id` enters a draft; free-typed
    /// text alone can never produce a valid draft.
    pub fn select_instrument(&mut self, instrument: &Instrument) {
        self.symbol = instrument.trading_symbol.clone();
        self.security_id = instrument.security_id.clone();
        self.exchange = instrument.exchange_segment.clone();
    }

    /// Whether an instrument has been selected
    pub fn has_instrument(&self) -> bool {
        !self.security_id.is_empty()
    }

    /// Clear identifying fields and restore default quantity/price
    ///
    /// The trader's mode selections (side, order type, product type)
    /// are kept for the next order.
    pub fn reset(&mut self) {
        self.symbol.clear();
        self.security_id.clear();
        self.exchange = DEFAULT_EXCHANGE.to_string();
        self.quantity = 1;
        self.price = Price::ZERO;
    }
}

/// Broker acknowledgement of an accepted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Broker-assigned order id
    pub order_id: String,
    /// Broker-reported status, e.g. "TRANSIT" or "PENDING"
    pub status: String,
}
