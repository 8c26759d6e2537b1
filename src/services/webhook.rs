// ABOUTME: Applies payment gateway webhook events to stored orders
// ABOUTME: Maps order events to status changes and fires customer and owner notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Payment webhooks
//!
//! | event | status | customer message | owner alert |
//! |---|---|---|---|
//! | `order.paid` | `paid` | confirmation template | yes |
//! | `order.pending_payment` | `pending` | payment instructions | yes |
//! | `order.expired` | `cancelled` | expiry notice | no |
//!
//! Charge events are logged only. A failed status update on `order.paid`
//! is returned to the caller so the gateway retries the delivery; failures
//! on the other events are logged and acknowledged.

use super::notifications::{OrderNotifier, Recipient};
use crate::database::Database;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::models::OrderStatus;
use muscle_meals_providers::conekta::{ConektaChargeObject, ConektaEvent, ConektaOrderObject};
use muscle_meals_providers::whatsapp::AlertKind;
use tracing::{debug, info, warn};

const PROVIDER: &str = "conekta";

/// Handles parsed Conekta events
pub struct WebhookService<'a> {
    database: &'a Database,
    notifier: OrderNotifier<'a>,
}

impl<'a> WebhookService<'a> {
    /// Create a webhook service
    #[must_use]
    pub const fn new(database: &'a Database, notifier: OrderNotifier<'a>) -> Self {
        Self { database, notifier }
    }

    /// Apply one event
    ///
    /// # Errors
    ///
    /// Returns a database error when an `order.paid` status update fails
    pub async fn handle_event(&self, event: &ConektaEvent) -> AppResult<()> {
        AppLogger::log_webhook_event(
            PROVIDER,
            event.event_type(),
            event.order().and_then(ConektaOrderObject::our_order_id),
        );

        match event {
            ConektaEvent::OrderPaid(order) => self.order_paid(order).await,
            ConektaEvent::OrderPendingPayment(order) => {
                if let Err(e) = self.order_pending(order).await {
                    warn!(error = %e, "Failed to process order.pending_payment");
                }
                Ok(())
            }
            ConektaEvent::OrderExpired(order) => {
                if let Err(e) = self.order_expired(order).await {
                    warn!(error = %e, "Failed to process order.expired");
                }
                Ok(())
            }
            ConektaEvent::ChargePaid(charge) => {
                log_charge(charge, "Charge paid");
                Ok(())
            }
            ConektaEvent::ChargeRefunded(charge) => {
                log_charge(charge, "Charge refunded");
                Ok(())
            }
            ConektaEvent::ChargeChargeback(charge) => {
                log_charge(charge, "Charge disputed");
                Ok(())
            }
            ConektaEvent::Other(event_type) => {
                info!(webhook.event = %event_type, "Unhandled webhook event acknowledged");
                Ok(())
            }
        }
    }

    async fn order_paid(&self, order: &ConektaOrderObject) -> AppResult<()> {
        let Some(order_id) = order.our_order_id() else {
            warn!(conekta_order_id = %order.id, "order.paid without metadata.order_id");
            return Ok(());
        };

        self.set_status(order_id, OrderStatus::Paid).await?;
        self.notifier
            .payment_confirmed(&recipient(order), order_id, order.amount)
            .await;
        self.alert_owner(order_id, AlertKind::Paid).await;

        Ok(())
    }

    async fn order_pending(&self, order: &ConektaOrderObject) -> AppResult<()> {
        let Some(order_id) = order.our_order_id() else {
            debug!(conekta_order_id = %order.id, "order.pending_payment without metadata.order_id");
            return Ok(());
        };

        self.set_status(order_id, OrderStatus::Pending).await?;
        self.notifier
            .payment_pending(&recipient(order), order_id, order.amount)
            .await;
        self.alert_owner(order_id, AlertKind::PendingPayment).await;

        Ok(())
    }

    async fn order_expired(&self, order: &ConektaOrderObject) -> AppResult<()> {
        let Some(order_id) = order.our_order_id() else {
            debug!(conekta_order_id = %order.id, "order.expired without metadata.order_id");
            return Ok(());
        };

        self.set_status(order_id, OrderStatus::Cancelled).await?;
        self.notifier.order_expired(&recipient(order), order_id).await;

        Ok(())
    }

    async fn set_status(&self, order_id: &str, status: OrderStatus) -> AppResult<()> {
        let updated = self
            .database
            .orders()
            .update_status(order_id, status)
            .await?;

        if updated {
            AppLogger::log_order_status(order_id, status.as_str(), PROVIDER);
        } else {
            warn!(order.id = %order_id, status = %status, "Webhook references an unknown order");
        }
        Ok(())
    }

    async fn alert_owner(&self, order_id: &str, kind: AlertKind) {
        match self.database.orders().get_order_with_items(order_id).await {
            Ok(Some(order)) => {
                self.notifier.owner_alert(&order, kind).await;
            }
            Ok(None) => debug!(order.id = %order_id, "Owner alert skipped, order not stored"),
            Err(e) => warn!(order.id = %order_id, error = %e, "Owner alert skipped"),
        }
    }
}

fn recipient(order: &ConektaOrderObject) -> Recipient {
    Recipient {
        name: order.customer_info.name.clone(),
        phone: order.customer_info.phone.clone(),
    }
}

fn log_charge(charge: &ConektaChargeObject, message: &str) {
    info!(
        charge.id = %charge.id,
        conekta_order_id = charge.order_id.as_deref().unwrap_or("unknown"),
        charge.amount = charge.amount,
        "{message}"
    );
}
