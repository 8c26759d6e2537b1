// ABOUTME: WhatsApp notifications for order status changes
// ABOUTME: Customer confirmation, pending and expiry messages plus the owner order alert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::logging::AppLogger;
use crate::models::OrderWithItems;
use muscle_meals_calc::whatsapp_phone;
use muscle_meals_providers::whatsapp::{
    order_expired_text, payment_confirmation, payment_pending_text, AlertItem, AlertKind,
    InternalOrderAlert,
};
use muscle_meals_providers::MessagingChannel;
use tracing::debug;

/// Customer name and phone as reported by the payment gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Customer name
    pub name: String,
    /// Phone in any formatting; blank skips the message
    pub phone: String,
}

/// Sends order messages through a messaging channel
pub struct OrderNotifier<'a> {
    channel: &'a dyn MessagingChannel,
    owner_phone: Option<&'a str>,
}

impl<'a> OrderNotifier<'a> {
    /// Create a notifier; alerts are skipped without an owner phone
    #[must_use]
    pub const fn new(channel: &'a dyn MessagingChannel, owner_phone: Option<&'a str>) -> Self {
        Self {
            channel,
            owner_phone,
        }
    }

    /// Payment confirmation template
    pub async fn payment_confirmed(
        &self,
        recipient: &Recipient,
        order_id: &str,
        amount: i64,
    ) -> bool {
        let Some(to) = customer_phone(recipient) else {
            debug!(order.id = %order_id, "No customer phone, confirmation skipped");
            return false;
        };

        let template = payment_confirmation(&recipient.name, order_id, amount);
        let delivered = self.channel.send_template(&to, &template).await;
        AppLogger::log_notification(
            self.channel.name(),
            "payment_confirmed",
            order_id,
            delivered,
        );
        delivered
    }

    /// Cash payment instructions notice
    pub async fn payment_pending(
        &self,
        recipient: &Recipient,
        order_id: &str,
        amount: i64,
    ) -> bool {
        let Some(to) = customer_phone(recipient) else {
            debug!(order.id = %order_id, "No customer phone, pending notice skipped");
            return false;
        };

        let body = payment_pending_text(&recipient.name, order_id, amount);
        let delivered = self.channel.send_text(&to, &body).await;
        AppLogger::log_notification(self.channel.name(), "payment_pending", order_id, delivered);
        delivered
    }

    /// Expired payment link notice
    pub async fn order_expired(&self, recipient: &Recipient, order_id: &str) -> bool {
        let Some(to) = customer_phone(recipient) else {
            debug!(order.id = %order_id, "No customer phone, expiry notice skipped");
            return false;
        };

        let body = order_expired_text(&recipient.name, order_id);
        let delivered = self.channel.send_text(&to, &body).await;
        AppLogger::log_notification(self.channel.name(), "order_expired", order_id, delivered);
        delivered
    }

    /// Internal alert to the business phone
    pub async fn owner_alert(&self, order: &OrderWithItems, kind: AlertKind) -> bool {
        let Some(owner_phone) = self.owner_phone else {
            debug!(order.id = %order.order.id, "No owner phone, internal alert skipped");
            return false;
        };

        let body = build_alert(order, kind).render();
        let delivered = self
            .channel
            .send_text(&whatsapp_phone(owner_phone), &body)
            .await;
        AppLogger::log_notification(
            self.channel.name(),
            "owner_alert",
            &order.order.id,
            delivered,
        );
        delivered
    }
}

/// Alert content for a stored order
#[must_use]
pub fn build_alert(order: &OrderWithItems, kind: AlertKind) -> InternalOrderAlert {
    let (customer_name, customer_phone) = order
        .customer
        .as_ref()
        .map(|c| (c.full_name.clone(), c.phone.clone()))
        .unwrap_or_default();

    let customer_address = order.order.delivery_address.clone().or_else(|| {
        order
            .pickup_spot
            .as_ref()
            .map(|spot| format!("Pickup: {}", spot.name))
    });

    InternalOrderAlert {
        order_number: order.order.order_number.clone(),
        kind,
        customer_name,
        customer_phone,
        customer_address,
        items: order
            .items
            .iter()
            .map(|detail| AlertItem {
                meal_name: detail.meal_name.clone(),
                size_name: detail.size_name.clone(),
                qty: detail.item.qty,
                unit_price: detail.item.unit_price,
            })
            .collect(),
        shipping_method: order.order.shipping_method,
        shipping_cost: order.order.shipping_cost,
        total_amount: order.order.total_amount,
    }
}

fn customer_phone(recipient: &Recipient) -> Option<String> {
    let phone = recipient.phone.trim();
    (!phone.is_empty()).then(|| whatsapp_phone(phone))
}
