//! Instrument Resolver
//!
//! Turns free-text input into a ranked set of candidate instruments.
//! Each keystroke cancels the previous debounce timer, so at most one
//! search is issued per settling period; a generation counter discards
//! any response that arrives for a superseded query (last-query-wins,
//! never merged).

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::warn;
use tokio::task::JoinHandle;

use orderdesk_core::Instrument;
use orderdesk_ports::TradingService;

/// Quiet period before a search is issued
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this clear results without a request
pub const MIN_QUERY_LEN: usize = 2;

/// Default cap on returned candidates
pub const DEFAULT_LIMIT: usize = 10;

/// Resolver tuning
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Exchange segment searched, e.g. "NSE_EQ"
    pub exchange: String,
    /// Maximum candidates returned per search
    pub limit: usize,
    /// Input quiet period before issuing a search
    pub debounce: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            exchange: orderdesk_core::DEFAULT_EXCHANGE.to_string(),
            limit: DEFAULT_LIMIT,
            debounce: DEBOUNCE,
        }
    }
}

/// Debounced free-text instrument search
pub struct InstrumentResolver {
    service: Arc<dyn TradingService>,
    config: ResolverConfig,
    /// Bumped on every keystroke; a search only publishes its results
    /// while it still holds the latest generation
    generation: Arc<AtomicU64>,
    results: Arc<Mutex<Vec<Instrument>>>,
    pending: Option<JoinHandle<()>>,
}

impl InstrumentResolver {
    pub fn new(service: Arc<dyn TradingService>, config: ResolverConfig) -> Self {
        Self {
            service,
            config,
            generation: Arc::new(AtomicU64::new(0)),
            results: Arc::new(Mutex::new(Vec::new())),
            pending: None,
        }
    }

    /// Feed one input edit to the resolver
    ///
    /// Cancels any pending debounce timer. Queries shorter than
    /// `MIN_QUERY_LEN` clear the results immediately and issue no
    /// request.
    pub fn on_input(&mut self, query: &str) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim().to_uppercase();
        if query.chars().count() < MIN_QUERY_LEN {
            self.results.lock().unwrap().clear();
            return;
        }

        let service = Arc::clone(&self.service);
        let results = Arc::clone(&self.results);
        let latest = Arc::clone(&self.generation);
        let exchange = self.config.exchange.clone();
        let limit = self.config.limit;
        let debounce = self.config.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            let outcome = service.search_instruments(&query, &exchange, limit).await;

            // A newer query settled while this one was in flight:
            // its results own the display, ours are stale.
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            let mut slot = results.lock().unwrap();
            match outcome {
                Ok(list) => *slot = list,
                Err(err) => {
                    warn!("symbol search failed: {}", err.message());
                    slot.clear();
                }
            }
        }));
    }

    /// Snapshot of the current candidate list
    pub fn results(&self) -> Vec<Instrument> {
        self.results.lock().unwrap().clone()
    }

    /// Cancel any pending search and clear the candidates
    pub fn clear(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.results.lock().unwrap().clear();
    }
}

impl Drop for InstrumentResolver {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
