//! Orderdesk Ports
//!
//! Port definitions (traits) for the orderdesk trading client.
//! These define the boundaries between the engine and infrastructure.

mod clock;
mod error;
mod trading_service;

pub use clock::Clock;
pub use error::{ServiceError, ServiceResult};
pub use trading_service::{CloseRequest, OrderRequest, TradingService};
