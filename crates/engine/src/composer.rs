//! Order Composer
//!
//! Holds the mutable draft order. `submit` runs the local guards
//! first - a draft with no selected instrument never produces a
//! network call - then transmits the draft keyed by `security_id`.
//! On acceptance the draft is consumed (reset to defaults); on any
//! failure it is left untouched so the trader can correct and resubmit.

use std::sync::Arc;

use log::info;

use orderdesk_core::{Instrument, OrderDraft, OrderReceipt, OrderType, Price};
use orderdesk_ports::{OrderRequest, TradingService};

use crate::error::{SubmissionError, ValidationError};

/// Draft-order state machine
pub struct OrderComposer {
    service: Arc<dyn TradingService>,
    draft: OrderDraft,
}

impl OrderComposer {
    pub fn new(service: Arc<dyn TradingService>) -> Self {
        Self {
            service,
            draft: OrderDraft::default(),
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Mutable access for field edits (quantity, price, side, ...)
    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        &mut self.draft
    }

    /// Adopt a resolver selection as the draft's instrument
    pub fn select_instrument(&mut self, instrument: &Instrument) {
        self.draft.select_instrument(instrument);
    }

    /// Local pre-submit guards, checked before any request is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.draft.has_instrument() {
            return Err(ValidationError::MissingInstrument);
        }
        if self.draft.quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }
        if self.draft.order_type == OrderType::Limit && self.draft.price <= Price::ZERO {
            return Err(ValidationError::MissingLimitPrice);
        }
        Ok(())
    }

    /// Submit the draft
    ///
    /// The transmitted instrument identifier is `security_id`; the
    /// display symbol is never sent as the trade key. Success resets
    /// the draft; the caller is expected to refresh the position list.
    pub async fn submit(&mut self) -> Result<OrderReceipt, SubmissionError> {
        self.validate()?;

        let request = OrderRequest {
            security_id: self.draft.security_id.clone(),
            exchange: self.draft.exchange.clone(),
            transaction_type: self.draft.transaction_type,
            quantity: self.draft.quantity,
            price: match self.draft.order_type {
                OrderType::Limit => Some(self.draft.price),
                OrderType::Market => None,
            },
            order_type: self.draft.order_type,
            product_type: self.draft.product_type,
        };

        let receipt = self.service.place_order(&request).await?;
        info!(
            "order {} accepted with status {}",
            receipt.order_id, receipt.status
        );

        self.draft.reset();
        Ok(receipt)
    }
}
