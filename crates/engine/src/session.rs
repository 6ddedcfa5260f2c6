//! Session Manager
//!
//! Holds the single linked-account identity. Linking is single-shot:
//! on success the account is established atomically; on failure the
//! prior state (no account) is retained and the caller decides whether
//! to resubmit. Nothing here retries automatically.

use std::sync::Arc;

use log::{debug, info};

use orderdesk_core::{Account, Credentials};
use orderdesk_ports::TradingService;

use crate::error::AuthError;

/// Owns the session's account state
///
/// Exactly one account is active at a time. The tracker's polling loop
/// is armed and disarmed by the `TradingDesk` facade in lockstep with
/// this state.
pub struct SessionManager {
    service: Arc<dyn TradingService>,
    account: Option<Account>,
}

impl SessionManager {
    pub fn new(service: Arc<dyn TradingService>) -> Self {
        Self {
            service,
            account: None,
        }
    }

    /// Best-effort fetch of an already-linked account at startup
    ///
    /// Absence of an account is not an error, it is the logged-out
    /// state; lookup failures are treated the same way.
    pub async fn restore(&mut self) -> Option<&Account> {
        match self.service.active_account().await {
            Ok(Some(account)) => {
                info!("restored linked account {}", account.client_id);
                self.account = Some(account);
            }
            Ok(None) => debug!("no account linked"),
            Err(err) => debug!("account restore skipped: {}", err.message()),
        }
        self.account.as_ref()
    }

    /// Link a brokerage account
    ///
    /// On failure no session is formed and any prior state is kept.
    pub async fn link(&mut self, credentials: &Credentials) -> Result<Account, AuthError> {
        let account = self.service.link_account(credentials).await?;
        info!("account {} linked", account.client_id);
        self.account = Some(account.clone());
        Ok(account)
    }

    /// Drop the active account, returning to the logged-out state
    pub fn unlink(&mut self) {
        if let Some(account) = self.account.take() {
            info!("account {} unlinked", account.client_id);
        }
    }

    pub fn active_account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_linked(&self) -> bool {
        self.account.is_some()
    }
}
