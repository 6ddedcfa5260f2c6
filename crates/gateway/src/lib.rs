//! Orderdesk Gateway
//!
//! REST adapter for the remote trading service. Implements the
//! `TradingService` port over HTTP:
//!
//! - every response carries the `{success, message, data}` envelope;
//!   a false or absent success indicator maps to
//!   `ServiceError::Rejected` with the backend message
//! - the access token obtained at link time is attached to every
//!   subsequent request as the `access-token` header
//! - raw broker position records are normalized locally (net-quantity
//!   sign, average-price fallbacks, combined P&L) before they reach
//!   the engine
//!
//! The engine never sees any of this: it talks to the
//! `TradingService` trait only.

pub mod clock;
pub mod config;
pub mod rest;
pub mod wire;

pub use clock::SystemClock;
pub use config::GatewayConfig;
pub use rest::RestTradingService;
