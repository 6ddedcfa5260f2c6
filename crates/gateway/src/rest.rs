use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use orderdesk_core::{
    Account, Credentials, Instrument, OrderReceipt, OrderType, Position, TransactionType,
};
use orderdesk_ports::{
    Clock, CloseRequest, OrderRequest, ServiceError, ServiceResult, TradingService,
};

use crate::config::GatewayConfig;
use crate::wire::{
    ApiEnvelope, ClosePositionBody, LinkAccountBody, PlaceOrderBody, SymbolSearchBody,
    WireAccount, WireOrder, WirePosition,
};

/// Header carrying the broker access token on authenticated requests
const ACCESS_TOKEN_HEADER: &str = "access-token";

/// `TradingService` adapter over the remote REST surface
///
/// Credentials supplied at link time are retained for the life of the
/// adapter: the access token rides on every subsequent request and the
/// client id is stamped into order and close payloads.
pub struct RestTradingService {
    http: reqwest::Client,
    config: GatewayConfig,
    clock: Arc<dyn Clock>,
    session: RwLock<Option<WireSession>>,
}

#[derive(Clone)]
struct WireSession {
    client_id: String,
    access_token: String,
}

impl RestTradingService {
    pub fn new(config: GatewayConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            clock,
            session: RwLock::new(None),
        }
    }

    fn client_id(&self) -> ServiceResult<String> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.client_id.clone())
            .ok_or_else(|| ServiceError::Rejected("no account linked".to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.read().unwrap().as_ref() {
            Some(session) => request.header(ACCESS_TOKEN_HEADER, &session.access_token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<ApiEnvelope<T>> {
        let request = self.http.get(self.config.endpoint(path));
        self.send(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ServiceResult<ApiEnvelope<T>> {
        let request = self.http.post(self.config.endpoint(path)).json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ServiceResult<ApiEnvelope<T>> {
        let response = self
            .authorize(request.timeout(self.config.timeout))
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|err| ServiceError::Transport(format!("malformed response: {err}")))
    }
}

#[async_trait]
impl TradingService for RestTradingService {
    async fn active_account(&self) -> ServiceResult<Option<Account>> {
        let envelope: ApiEnvelope<WireAccount> = self.get("account").await?;
        if !envelope.success {
            return Err(ServiceError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "trading service reported failure".to_string()),
            ));
        }
        Ok(envelope.data.map(|wire| {
            let account = wire.into_account(self.clock.now());
            // Remember the client id so order payloads can be stamped
            // after a restore; the token cannot be recovered this way
            // and stays whatever link_account last stored.
            let mut session = self.session.write().unwrap();
            if session.is_none() {
                *session = Some(WireSession {
                    client_id: account.client_id.clone(),
                    access_token: String::new(),
                });
            }
            account
        }))
    }

    async fn link_account(&self, credentials: &Credentials) -> ServiceResult<Account> {
        let body = LinkAccountBody {
            client_id: &credentials.client_id,
            access_token: &credentials.access_token,
        };
        let envelope: ApiEnvelope<WireAccount> = self.post("link-account", &body).await?;
        let account = envelope.into_result()?.into_account(self.clock.now());

        *self.session.write().unwrap() = Some(WireSession {
            client_id: credentials.client_id.clone(),
            access_token: credentials.access_token.clone(),
        });
        Ok(account)
    }

    async fn search_instruments(
        &self,
        query: &str,
        exchange: &str,
        limit: usize,
    ) -> ServiceResult<Vec<Instrument>> {
        let body = SymbolSearchBody {
            query,
            exchange,
            limit,
        };
        let envelope: ApiEnvelope<Vec<Instrument>> = self.post("symbols/search", &body).await?;
        envelope.into_result()
    }

    async fn positions(&self) -> ServiceResult<Vec<Position>> {
        let envelope: ApiEnvelope<Vec<serde_json::Value>> = self.get("positions").await?;
        let rows = envelope.into_result()?;

        // Tolerate individual malformed rows rather than failing the
        // whole book.
        let mut positions = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<WirePosition>(row) {
                Ok(wire) => {
                    if let Some(position) = wire.normalize() {
                        positions.push(position);
                    }
                }
                Err(err) => warn!("Skipping malformed position record: {err}"),
            }
        }
        Ok(positions)
    }

    async fn place_order(&self, request: &OrderRequest) -> ServiceResult<OrderReceipt> {
        let client_id = self.client_id()?;
        let body = PlaceOrderBody {
            client_id: &client_id,
            security_id: &request.security_id,
            exchange_segment: &request.exchange,
            transaction_type: request.transaction_type,
            quantity: request.quantity,
            price: request.price,
            order_type: request.order_type,
            product_type: request.product_type,
            validity: "DAY",
        };
        let envelope: ApiEnvelope<WireOrder> = self.post("orders", &body).await?;
        envelope.into_result().map(OrderReceipt::from)
    }

    async fn close_position(&self, request: &CloseRequest) -> ServiceResult<OrderReceipt> {
        let client_id = self.client_id()?;
        let transaction_type: TransactionType = request.side.reversing_transaction();
        let body = ClosePositionBody {
            client_id: &client_id,
            security_id: &request.security_id,
            exchange_segment: &request.exchange,
            quantity: request.quantity,
            product_type: &request.product_type,
            position_type: request.side,
            transaction_type,
            order_type: OrderType::Market,
            validity: "DAY",
        };
        let envelope: ApiEnvelope<WireOrder> = self.post("positions/close", &body).await?;
        envelope.into_result().map(OrderReceipt::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use orderdesk_core::{PositionSide, ProductType};

    fn service() -> RestTradingService {
        RestTradingService::new(GatewayConfig::default(), Arc::new(SystemClock::new()))
    }

    #[tokio::test]
    async fn orders_are_refused_locally_before_any_link() {
        let svc = service();
        let request = OrderRequest {
            security_id: "11536".to_string(),
            exchange: "NSE_EQ".to_string(),
            transaction_type: TransactionType::Buy,
            quantity: 1,
            price: None,
            order_type: OrderType::Market,
            product_type: ProductType::Intraday,
        };

        let err = svc.place_order(&request).await.unwrap_err();
        assert_eq!(err, ServiceError::Rejected("no account linked".to_string()));
    }

    #[tokio::test]
    async fn closes_are_refused_locally_before_any_link() {
        let svc = service();
        let request = CloseRequest {
            security_id: "3045".to_string(),
            exchange: "NSE_EQ".to_string(),
            quantity: 25,
            product_type: "INTRADAY".to_string(),
            side: PositionSide::Short,
        };

        let err = svc.close_position(&request).await.unwrap_err();
        assert_eq!(err, ServiceError::Rejected("no account linked".to_string()));
    }
}
