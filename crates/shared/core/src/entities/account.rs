use serde::{Deserialize, Serialize};

use crate::values::Timestamp;

/// Credentials supplied by the trader to link a brokerage account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Broker-issued client identifier
    pub client_id: String,
    /// Access token for the trading API
    pub access_token: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            access_token: access_token.into(),
        }
    }
}

/// The single linked brokerage account for this session
///
/// Created on a successful link call, destroyed on unlink. Exactly one
/// account is active at a time; trading and polling are gated on its
/// presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Broker-issued client identifier
    pub client_id: String,
    /// When the account was linked
    pub linked_at: Timestamp,
}

impl Account {
    pub fn new(client_id: impl Into<String>, linked_at: Timestamp) -> Self {
        Self {
            client_id: client_id.into(),
            linked_at,
        }
    }
}
