//! Domain entities for the trading client

mod account;
mod instrument;
mod order;
mod position;

pub use account::{Account, Credentials};
pub use instrument::Instrument;
pub use order::{DEFAULT_EXCHANGE, OrderDraft, OrderReceipt, OrderType, ProductType, TransactionType};
pub use position::{Position, PositionSide};
