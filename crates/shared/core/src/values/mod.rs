use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - equity lots are integral, always positive
pub type Quantity = u32;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Human-readable trading symbol (display only, never a trade key)
pub type Symbol = String;
