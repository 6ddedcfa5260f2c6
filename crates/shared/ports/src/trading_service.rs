use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use orderdesk_core::{
    Account, Credentials, Instrument, OrderReceipt, OrderType, Position, PositionSide, Price,
    ProductType, Quantity, TransactionType,
};

use crate::error::ServiceResult;

/// A submit-ready order, serialized from a validated draft
///
/// `security_id` is the transmitted instrument identifier; the
/// human-readable symbol is never sent as the trade key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub security_id: String,
    pub exchange: String,
    pub transaction_type: TransactionType,
    pub quantity: Quantity,
    /// Present only for LIMIT orders
    pub price: Option<Price>,
    pub order_type: OrderType,
    pub product_type: ProductType,
}

/// A close request keyed by the position's trade identity
///
/// Carries the position side so the reversing transaction can be
/// derived (closing a long sells, closing a short buys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRequest {
    pub security_id: String,
    pub exchange: String,
    pub quantity: Quantity,
    /// Broker product type, passed back verbatim from the position
    pub product_type: String,
    #[serde(rename = "positionType")]
    pub side: PositionSide,
}

/// Port for the remote trading-service boundary
///
/// The five logical operations the engine depends on, plus the
/// best-effort account lookup used at startup. The wire format is
/// owned by the adapter; every response carries a success indicator
/// that adapters map to `ServiceError::Rejected` when false or absent.
#[async_trait]
pub trait TradingService: Send + Sync {
    /// Fetch the currently linked account, if any
    async fn active_account(&self) -> ServiceResult<Option<Account>>;

    /// Link a brokerage account with the given credentials
    async fn link_account(&self, credentials: &Credentials) -> ServiceResult<Account>;

    /// Search tradable instruments by free-text query
    async fn search_instruments(
        &self,
        query: &str,
        exchange: &str,
        limit: usize,
    ) -> ServiceResult<Vec<Instrument>>;

    /// Fetch all open positions
    async fn positions(&self) -> ServiceResult<Vec<Position>>;

    /// Submit an order
    async fn place_order(&self, request: &OrderRequest) -> ServiceResult<OrderReceipt>;

    /// Close an open position
    async fn close_position(&self, request: &CloseRequest) -> ServiceResult<OrderReceipt>;
}
