//! Orderdesk Engine
//!
//! The order-entry and position-synchronization engine. Four components
//! sit behind the `TradingDesk` facade:
//!
//! - **Session Manager**: holds the single linked-account identity and
//!   gates whether polling and trading operations are active
//! - **Instrument Resolver**: turns free-text queries into ranked
//!   instrument candidates, debounced per keystroke
//! - **Order Composer**: holds the mutable draft order, enforces field
//!   constraints, and serializes a submit-ready request
//! - **Position Tracker**: keeps the local position list consistent
//!   with server state through polling and post-action refreshes
//!
//! ## Architecture
//!
//! ```text
//!  keystrokes ──► ┌────────────────────┐
//!                 │ Instrument Resolver│── selection ──┐
//!                 └────────────────────┘               ▼
//!                 ┌────────────────────┐      ┌────────────────┐
//!  link/unlink ──►│  Session Manager   │      │ Order Composer │
//!                 └─────────┬──────────┘      └───────┬────────┘
//!                           │ arms/stops              │ submit ok
//!                           ▼                         ▼
//!                 ┌──────────────────────────────────────────┐
//!                 │             Position Tracker             │
//!                 │   5 s poll loop + out-of-band refreshes  │
//!                 └─────────────────────┬────────────────────┘
//!                                       │ TradingService port
//!                                       ▼
//!                              remote trading API
//! ```
//!
//! All remote access goes through the `TradingService` port; the engine
//! never sees the wire format. Timers are spawned tasks whose join
//! handles are aborted on supersession (debounce) and on deactivation
//! (polling), so no timer outlives the state that scheduled it.

pub mod composer;
pub mod desk;
pub mod error;
pub mod resolver;
pub mod session;
pub mod tracker;

// Re-export main types
pub use composer::OrderComposer;
pub use desk::{DeskConfig, TradingDesk};
pub use error::{AuthError, CloseError, SubmissionError, ValidationError};
pub use resolver::{InstrumentResolver, ResolverConfig};
pub use session::SessionManager;
pub use tracker::{PositionTracker, POLL_INTERVAL};
