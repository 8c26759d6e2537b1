// ABOUTME: Customer and internal WhatsApp messages for order status changes
// ABOUTME: Payment confirmation template, pending and expired texts, owner alert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use muscle_meals_core::models::{short_order_id, ShippingMethod};

use crate::core::TemplateMessage;

/// Approved template sent when a payment is confirmed
pub const PAYMENT_CONFIRMED_TEMPLATE: &str = "pago_confirmado";

/// Language of every template
pub const TEMPLATE_LANGUAGE: &str = "es_MX";

/// Pesos with two decimals (`31050` -> `310.50`)
#[must_use]
pub fn format_amount(centavos: i64) -> String {
    let sign = if centavos < 0 { "-" } else { "" };
    let abs = centavos.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Whole pesos rounded half up (`31050` -> `311`)
#[must_use]
pub fn format_whole_pesos(centavos: i64) -> String {
    ((centavos as f64) / 100.0).round().to_string()
}

/// Template confirming a payment
#[must_use]
pub fn payment_confirmation(customer_name: &str, order_id: &str, amount: i64) -> TemplateMessage {
    TemplateMessage {
        name: PAYMENT_CONFIRMED_TEMPLATE.to_owned(),
        language: TEMPLATE_LANGUAGE.to_owned(),
        header: Some(short_order_id(order_id)),
        body: vec![customer_name.to_owned(), format_amount(amount)],
    }
}

/// Text sent when a cash order waits for payment
#[must_use]
pub fn payment_pending_text(customer_name: &str, order_id: &str, amount: i64) -> String {
    format!(
        "Hola {customer_name}! Tu pedido (#{}) por ${} está pendiente de pago. \
         Te enviaremos las instrucciones de pago pronto.",
        short_order_id(order_id),
        format_amount(amount)
    )
}

/// Text sent when the payment link expired
#[must_use]
pub fn order_expired_text(customer_name: &str, order_id: &str) -> String {
    format!(
        "Hola {customer_name}! Tu pedido (#{}) ha expirado por falta de pago. \
         Si aún te interesa, puedes hacer un nuevo pedido en nuestra página.",
        short_order_id(order_id)
    )
}

/// Which event triggered an owner alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Payment confirmed
    Paid,
    /// Cash payment pending
    PendingPayment,
}

/// One line of an owner alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertItem {
    /// Meal name
    pub meal_name: String,
    /// Size name
    pub size_name: String,
    /// Quantity
    pub qty: u32,
    /// Unit price in centavos
    pub unit_price: i64,
}

/// Internal alert sent to the business phone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalOrderAlert {
    /// Friendly order number
    pub order_number: String,
    /// Triggering event
    pub kind: AlertKind,
    /// Customer name
    pub customer_name: String,
    /// Customer phone
    pub customer_phone: String,
    /// Delivery address, absent for pickup
    pub customer_address: Option<String>,
    /// Ordered items
    pub items: Vec<AlertItem>,
    /// Fulfilment method
    pub shipping_method: ShippingMethod,
    /// Shipping cost in centavos
    pub shipping_cost: i64,
    /// Order total in centavos
    pub total_amount: i64,
}

impl InternalOrderAlert {
    /// Render the alert as a WhatsApp text
    #[must_use]
    pub fn render(&self) -> String {
        let header = match self.kind {
            AlertKind::Paid => "🔔 *NUEVO PEDIDO PAGADO*",
            AlertKind::PendingPayment => "⏳ *PEDIDO PENDIENTE DE PAGO (OXXO/Efectivo)*",
        };

        let item_lines = self
            .items
            .iter()
            .map(|item| {
                format!(
                    "  • {} ({}) ×{} — ${}",
                    item.meal_name,
                    item.size_name,
                    item.qty,
                    format_whole_pesos(item.unit_price * i64::from(item.qty))
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let label = self.shipping_method.label();
        let shipping_line = if self.shipping_cost > 0 {
            format!("{label} — ${} MXN", format_whole_pesos(self.shipping_cost))
        } else {
            format!("{label} — Gratis")
        };

        let mut lines = vec![
            header.to_owned(),
            String::new(),
            format!("📋 *{}*", self.order_number),
            String::new(),
            "👤 *CLIENTE*".to_owned(),
            format!("  {}", self.customer_name),
            format!("  📱 {}", self.customer_phone),
        ];
        if let Some(address) = &self.customer_address {
            lines.push(format!("  📍 {address}"));
        }
        lines.extend([
            String::new(),
            "🍽️ *PEDIDO*".to_owned(),
            item_lines,
            String::new(),
            "🚚 *ENVÍO*".to_owned(),
            format!("  {shipping_line}"),
            String::new(),
            format!(
                "💰 *TOTAL: ${} MXN*",
                format_whole_pesos(self.total_amount)
            ),
        ]);

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(31_050), "310.50");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_whole_pesos(31_050), "311");
        assert_eq!(format_whole_pesos(0), "0");
    }

    #[test]
    fn test_payment_confirmation_template() {
        let template = payment_confirmation("Ana", "3f2a9c1e-0000", 31_000);
        assert_eq!(template.name, "pago_confirmado");
        assert_eq!(template.header.as_deref(), Some("3F2A9C1E"));
        assert_eq!(template.body, vec!["Ana".to_owned(), "310.00".to_owned()]);
    }

    #[test]
    fn test_customer_texts() {
        assert_eq!(
            payment_pending_text("Ana", "abcdefgh-1", 15_500),
            "Hola Ana! Tu pedido (#ABCDEFGH) por $155.00 está pendiente de pago. \
             Te enviaremos las instrucciones de pago pronto."
        );
        assert!(order_expired_text("Ana", "abcdefgh-1").contains("(#ABCDEFGH) ha expirado"));
    }

    #[test]
    fn test_internal_alert_render() {
        let alert = InternalOrderAlert {
            order_number: "MM-0007".to_owned(),
            kind: AlertKind::Paid,
            customer_name: "Ana".to_owned(),
            customer_phone: "8112345678".to_owned(),
            customer_address: None,
            items: vec![AlertItem {
                meal_name: "Pollo teriyaki".to_owned(),
                size_name: "FIT".to_owned(),
                qty: 2,
                unit_price: 15_500,
            }],
            shipping_method: ShippingMethod::Pickup,
            shipping_cost: 0,
            total_amount: 31_000,
        };

        let text = alert.render();

        assert!(text.starts_with("🔔 *NUEVO PEDIDO PAGADO*"));
        assert!(text.contains("📋 *MM-0007*"));
        assert!(text.contains("  • Pollo teriyaki (FIT) ×2 — $310"));
        assert!(text.contains("Pickup (recoger en local) — Gratis"));
        assert!(text.contains("💰 *TOTAL: $310 MXN*"));
        assert!(!text.contains("📍"));
    }
}
