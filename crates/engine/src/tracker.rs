//! Position Tracker
//!
//! Maintains the authoritative local view of open positions. While an
//! account is linked, a spawned poll task fetches on a fixed interval
//! (immediately on activation, then every tick); submit and close
//! trigger out-of-band refreshes. Every successful fetch wholly
//! replaces the list, so stale entries disappear on their own and
//! overlapping fetches need no coordination beyond last-response-wins.
//!
//! Poll-tick failures are logged and swallowed; persistent failure is
//! only visible as a stale list.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use orderdesk_core::{OrderReceipt, Position};
use orderdesk_ports::{CloseRequest, ServiceResult, TradingService};

use crate::error::CloseError;

/// Fixed polling interval while an account is linked
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Local cache of server-side open positions
pub struct PositionTracker {
    service: Arc<dyn TradingService>,
    positions: Arc<RwLock<Vec<Position>>>,
    interval: Duration,
    poll: Option<JoinHandle<()>>,
}

impl PositionTracker {
    pub fn new(service: Arc<dyn TradingService>) -> Self {
        Self::with_interval(service, POLL_INTERVAL)
    }

    pub fn with_interval(service: Arc<dyn TradingService>, interval: Duration) -> Self {
        Self {
            service,
            positions: Arc::new(RwLock::new(Vec::new())),
            interval,
            poll: None,
        }
    }

    /// Arm the polling loop
    ///
    /// Fetches immediately, then on every interval tick. Restarting an
    /// already-armed tracker replaces the poll task rather than
    /// stacking a second one.
    pub fn start(&mut self) {
        self.abort_poll();

        let service = Arc::clone(&self.service);
        let positions = Arc::clone(&self.positions);
        let interval = self.interval;

        self.poll = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // A slow fetch must not be followed by a burst of catch-up ticks
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match service.positions().await {
                    Ok(list) => {
                        debug!("poll fetched {} open positions", list.len());
                        *positions.write().unwrap() = list;
                    }
                    // Swallowed: a missed tick must not disrupt the UI
                    Err(err) => warn!("position poll failed: {}", err.message()),
                }
            }
        }));
    }

    /// Disarm the polling loop and clear the list
    ///
    /// The position list is only valid while an account is linked, so
    /// deactivation both cancels the timer and empties the cache.
    pub fn stop(&mut self) {
        self.abort_poll();
        self.positions.write().unwrap().clear();
    }

    /// Whether the poll task is currently armed
    pub fn is_polling(&self) -> bool {
        self.poll.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// On-demand fetch, replacing the list on success
    ///
    /// Used after order placement and position close instead of
    /// waiting for the next poll tick.
    pub async fn refresh(&self) -> ServiceResult<()> {
        let list = self.service.positions().await?;
        debug!("refresh fetched {} open positions", list.len());
        *self.positions.write().unwrap() = list;
        Ok(())
    }

    /// Snapshot of the displayed position list
    pub fn positions(&self) -> Vec<Position> {
        self.positions.read().unwrap().clone()
    }

    /// Close an open position
    ///
    /// `confirmed` is the explicit precondition standing in for the
    /// trader's confirmation: when false, nothing is sent. A position
    /// without a security id fails locally for the same reason. The
    /// request carries the position side so the backend applies the
    /// correct reversing transaction; success triggers an immediate
    /// refresh.
    pub async fn close(
        &self,
        position: &Position,
        confirmed: bool,
    ) -> Result<OrderReceipt, CloseError> {
        if !confirmed {
            return Err(CloseError::NotConfirmed);
        }
        if position.security_id.is_empty() {
            return Err(CloseError::MissingSecurityId);
        }

        let request = CloseRequest {
            security_id: position.security_id.clone(),
            exchange: position.exchange.clone(),
            quantity: position.quantity,
            product_type: position.product_type.clone(),
            side: position.side,
        };

        let receipt = self.service.close_position(&request).await?;

        if let Err(err) = self.refresh().await {
            warn!("post-close refresh failed: {}", err.message());
        }
        Ok(receipt)
    }

    fn abort_poll(&mut self) {
        if let Some(handle) = self.poll.take() {
            handle.abort();
        }
    }
}

impl Drop for PositionTracker {
    fn drop(&mut self) {
        // Teardown must not leak an active timer
        self.abort_poll();
    }
}
