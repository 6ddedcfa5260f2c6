//! Orderdesk Core Domain
//!
//! Pure domain types for the orderdesk trading client.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Account,
    DEFAULT_EXCHANGE,
    Credentials,
    Instrument,
    OrderDraft,
    OrderReceipt,
    OrderType,
    Position,
    PositionSide,
    ProductType,
    TransactionType,
};
pub use values::{Price, Quantity, Symbol, Timestamp};
