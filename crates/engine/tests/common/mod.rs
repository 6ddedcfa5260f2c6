//! Shared test double for the remote trading-service boundary
//!
//! Records every call with atomic counters and lets tests script the
//! response for each operation, including an artificial delay on
//! search so in-flight supersession can be exercised under paused
//! time.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use orderdesk_core::{
    Account, Credentials, Instrument, OrderReceipt, Position, PositionSide, Quantity,
};
use orderdesk_ports::{CloseRequest, OrderRequest, ServiceResult, TradingService};

pub struct MockTradingService {
    /// Account returned by `active_account`, if any
    pub restored: Mutex<Option<Account>>,
    /// When set, `link_account` fails with this error
    pub link_error: Mutex<Option<orderdesk_ports::ServiceError>>,
    pub search_response: Mutex<ServiceResult<Vec<Instrument>>>,
    /// Simulated round-trip time for search requests
    pub search_delay: Mutex<Duration>,
    pub positions_response: Mutex<ServiceResult<Vec<Position>>>,
    pub order_response: Mutex<ServiceResult<OrderReceipt>>,
    pub close_response: Mutex<ServiceResult<OrderReceipt>>,

    pub link_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub position_calls: AtomicUsize,
    pub order_calls: AtomicUsize,
    pub close_calls: AtomicUsize,

    pub last_search: Mutex<Option<(String, String, usize)>>,
    pub last_order: Mutex<Option<OrderRequest>>,
    pub last_close: Mutex<Option<CloseRequest>>,
}

impl Default for MockTradingService {
    fn default() -> Self {
        Self {
            restored: Mutex::new(None),
            link_error: Mutex::new(None),
            search_response: Mutex::new(Ok(Vec::new())),
            search_delay: Mutex::new(Duration::ZERO),
            positions_response: Mutex::new(Ok(Vec::new())),
            order_response: Mutex::new(Ok(receipt("112111182045", "TRANSIT"))),
            close_response: Mutex::new(Ok(receipt("112111182046", "TRANSIT"))),
            link_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            position_calls: AtomicUsize::new(0),
            order_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            last_search: Mutex::new(None),
            last_order: Mutex::new(None),
            last_close: Mutex::new(None),
        }
    }
}

impl MockTradingService {
    /// Total calls that reached the network boundary
    pub fn total_calls(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
            + self.search_calls.load(Ordering::SeqCst)
            + self.position_calls.load(Ordering::SeqCst)
            + self.order_calls.load(Ordering::SeqCst)
            + self.close_calls.load(Ordering::SeqCst)
    }

    pub fn set_positions(&self, positions: Vec<Position>) {
        *self.positions_response.lock().unwrap() = Ok(positions);
    }

    pub fn fail_positions(&self, message: &str) {
        *self.positions_response.lock().unwrap() =
            Err(orderdesk_ports::ServiceError::Transport(message.to_string()));
    }
}

#[async_trait]
impl TradingService for MockTradingService {
    async fn active_account(&self) -> ServiceResult<Option<Account>> {
        Ok(self.restored.lock().unwrap().clone())
    }

    async fn link_account(&self, credentials: &Credentials) -> ServiceResult<Account> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.link_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(Account::new(credentials.client_id.clone(), Utc::now()))
    }

    async fn search_instruments(
        &self,
        query: &str,
        exchange: &str,
        limit: usize,
    ) -> ServiceResult<Vec<Instrument>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() =
            Some((query.to_string(), exchange.to_string(), limit));

        let delay = *self.search_delay.lock().unwrap();
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
        self.search_response.lock().unwrap().clone()
    }

    async fn positions(&self) -> ServiceResult<Vec<Position>> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        self.positions_response.lock().unwrap().clone()
    }

    async fn place_order(&self, request: &OrderRequest) -> ServiceResult<OrderReceipt> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_order.lock().unwrap() = Some(request.clone());
        self.order_response.lock().unwrap().clone()
    }

    async fn close_position(&self, request: &CloseRequest) -> ServiceResult<OrderReceipt> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_close.lock().unwrap() = Some(request.clone());
        self.close_response.lock().unwrap().clone()
    }
}

pub fn receipt(order_id: &str, status: &str) -> OrderReceipt {
    OrderReceipt {
        order_id: order_id.to_string(),
        status: status.to_string(),
    }
}

pub fn instrument(symbol: &str, security_id: &str) -> Instrument {
    Instrument {
        trading_symbol: symbol.to_string(),
        security_id: security_id.to_string(),
        name: format!("{symbol} Ltd"),
        exchange_segment: "NSE_EQ".to_string(),
    }
}

pub fn position(symbol: &str, security_id: &str, quantity: Quantity, pnl: Decimal) -> Position {
    Position {
        symbol: symbol.to_string(),
        security_id: security_id.to_string(),
        exchange: "NSE_EQ".to_string(),
        quantity,
        avg_price: dec!(100.00),
        ltp: dec!(101.00),
        pnl,
        side: PositionSide::Long,
        product_type: "INTRADAY".to_string(),
    }
}

/// Let spawned engine tasks run to their next await point
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
