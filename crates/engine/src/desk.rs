//! Trading Desk facade
//!
//! Owns the four engine components and wires the control flow between
//! them: session activation arms the position poll, deactivation stops
//! it, and successful order placement or position close triggers an
//! out-of-band refresh. The desk is an owned session-state object -
//! tests run several independent desks side by side.

use std::sync::Arc;
use std::time::Duration;

use log::warn;

use orderdesk_core::{Account, Credentials, Instrument, OrderDraft, OrderReceipt, Position};
use orderdesk_ports::TradingService;

use crate::composer::OrderComposer;
use crate::error::{AuthError, CloseError, SubmissionError};
use crate::resolver::{InstrumentResolver, ResolverConfig};
use crate::session::SessionManager;
use crate::tracker::{POLL_INTERVAL, PositionTracker};

/// Desk-wide tuning
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub resolver: ResolverConfig,
    pub poll_interval: Duration,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Facade over session, resolver, composer and tracker
pub struct TradingDesk {
    session: SessionManager,
    resolver: InstrumentResolver,
    composer: OrderComposer,
    tracker: PositionTracker,
}

impl TradingDesk {
    pub fn new(service: Arc<dyn TradingService>) -> Self {
        Self::with_config(service, DeskConfig::default())
    }

    pub fn with_config(service: Arc<dyn TradingService>, config: DeskConfig) -> Self {
        Self {
            session: SessionManager::new(Arc::clone(&service)),
            resolver: InstrumentResolver::new(Arc::clone(&service), config.resolver),
            composer: OrderComposer::new(Arc::clone(&service)),
            tracker: PositionTracker::with_interval(service, config.poll_interval),
        }
    }

    // --- session ---

    /// Best-effort restore of an already-linked account at startup
    ///
    /// If an account comes back, polling is armed just as it is after
    /// an explicit link.
    pub async fn restore(&mut self) -> Option<Account> {
        let account = self.session.restore().await.cloned();
        if account.is_some() {
            self.tracker.start();
        }
        account
    }

    /// Link a brokerage account; success arms the position poll
    pub async fn link(&mut self, credentials: &Credentials) -> Result<Account, AuthError> {
        let account = self.session.link(credentials).await?;
        self.tracker.start();
        Ok(account)
    }

    /// Unlink the account; polling stops and the position list clears
    pub fn unlink(&mut self) {
        self.session.unlink();
        self.tracker.stop();
    }

    pub fn account(&self) -> Option<&Account> {
        self.session.active_account()
    }

    // --- instrument search ---

    /// Feed one symbol-input edit to the resolver
    pub fn search_input(&mut self, query: &str) {
        self.resolver.on_input(query);
    }

    /// Current resolver candidates
    pub fn search_results(&self) -> Vec<Instrument> {
        self.resolver.results()
    }

    /// Adopt a resolver candidate into the draft and clear the search
    pub fn select_instrument(&mut self, instrument: &Instrument) {
        self.composer.select_instrument(instrument);
        self.resolver.clear();
    }

    // --- order entry ---

    pub fn draft(&self) -> &OrderDraft {
        self.composer.draft()
    }

    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        self.composer.draft_mut()
    }

    /// Submit the draft; acceptance triggers an immediate refresh
    pub async fn submit_order(&mut self) -> Result<OrderReceipt, SubmissionError> {
        let receipt = self.composer.submit().await?;
        if let Err(err) = self.tracker.refresh().await {
            warn!("post-order refresh failed: {}", err.message());
        }
        Ok(receipt)
    }

    // --- positions ---

    /// Displayed position list
    pub fn positions(&self) -> Vec<Position> {
        self.tracker.positions()
    }

    /// On-demand position refresh (the manual refresh button)
    pub async fn refresh_positions(&self) {
        if let Err(err) = self.tracker.refresh().await {
            warn!("position refresh failed: {}", err.message());
        }
    }

    /// Close a position; `confirmed` carries the trader's explicit
    /// confirmation and must be true for anything to be sent
    pub async fn close_position(
        &self,
        position: &Position,
        confirmed: bool,
    ) -> Result<OrderReceipt, CloseError> {
        self.tracker.close(position, confirmed).await
    }
}
