// ABOUTME: Checkout orchestration from cart to hosted payment link
// ABOUTME: Validates contact and fulfilment, re-prices the cart, stores the order and opens a payment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Checkout
//!
//! Prices sent by the browser are display values only. Every line is
//! re-priced from the stored size: individual meals at `price`, meals inside
//! a package at `package_price`. The order is stored as `pending` before the
//! gateway is called, so a gateway failure leaves a pending order behind and
//! surfaces as an external service error.

use std::collections::HashMap;

use crate::cart::{Cart, CartItem};
use crate::config::ShippingConfig;
use crate::constants::orders::{CHECKOUT_EXPIRY_SECS, MAX_LINE_QTY};
use crate::database::{Database, NewOrder, NewOrderItem};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{CustomerInfo, Meal, PickupSpot, ShippingMethod, Size};
use chrono::Utc;
use muscle_meals_calc::{is_valid_phone, is_well_formed_postal_code, DeliveryAddress, ZoneTable};
use muscle_meals_providers::{
    PaymentCustomer, PaymentGateway, PaymentLineItem, PaymentMethod, PaymentOrderRequest,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How the order reaches the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fulfillment {
    /// Home delivery
    Delivery {
        /// Where to deliver
        address: DeliveryAddress,
        /// `standard` or `priority`
        shipping_method: ShippingMethod,
    },
    /// Collection at a pickup spot
    Pickup {
        /// Chosen pickup spot
        pickup_spot_id: String,
    },
}

/// Checkout form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Contact data
    pub customer: CustomerInfo,
    /// Delivery or pickup
    pub fulfillment: Fulfillment,
    /// Cart lines
    pub items: Vec<CartItem>,
}

/// Stored order and where to pay it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Order id
    pub order_id: String,
    /// Human-friendly order number
    pub order_number: String,
    /// Items plus shipping in centavos
    pub total_amount: i64,
    /// Hosted payment page
    pub checkout_url: Option<String>,
}

/// Dependencies of the checkout flow
pub struct CheckoutService<'a> {
    database: &'a Database,
    gateway: &'a dyn PaymentGateway,
    zones: &'a ZoneTable,
    shipping: ShippingConfig,
    public_base_url: &'a str,
}

struct ResolvedFulfillment {
    shipping_method: ShippingMethod,
    delivery_address: Option<String>,
    postal_code: Option<String>,
    pickup_spot: Option<PickupSpot>,
}

struct PricedLine {
    order_item: NewOrderItem,
    label: String,
}

impl<'a> CheckoutService<'a> {
    /// Create a checkout service
    #[must_use]
    pub const fn new(
        database: &'a Database,
        gateway: &'a dyn PaymentGateway,
        zones: &'a ZoneTable,
        shipping: ShippingConfig,
        public_base_url: &'a str,
    ) -> Self {
        Self {
            database,
            gateway,
            zones,
            shipping,
            public_base_url,
        }
    }

    /// Validate the request, store a pending order and open a hosted payment
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad contact data, an empty cart, an
    /// undeliverable postal code, an unavailable pickup spot or an incomplete
    /// package; `ResourceNotFound` for unknown meals, sizes or packages; or
    /// `ExternalServiceError` when the payment gateway fails
    pub async fn place_order(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse> {
        let customer_info = validate_customer(&request.customer)?;
        let cart = Cart::from_items(request.items.clone());
        validate_cart(&cart)?;

        let fulfillment = self.resolve_fulfillment(&request.fulfillment).await?;
        self.validate_packages(&cart).await?;
        let lines = self.price_lines(&cart).await?;

        let customer = self
            .database
            .customers()
            .upsert_by_email(&customer_info)
            .await?;

        let shipping_cost = self.shipping.cost_for(fulfillment.shipping_method);
        let order = self
            .database
            .orders()
            .create_order(&NewOrder {
                customer_id: customer.id.clone(),
                shipping_method: fulfillment.shipping_method,
                shipping_cost,
                delivery_address: fulfillment.delivery_address,
                postal_code: fulfillment.postal_code,
                pickup_spot_id: fulfillment.pickup_spot.map(|spot| spot.id),
                items: lines.iter().map(|line| line.order_item.clone()).collect(),
            })
            .await?;

        AppLogger::log_order_created(
            &order.id,
            &order.order_number,
            order.total_amount,
            lines.len(),
        );

        let payment_request = PaymentOrderRequest {
            order_id: order.id.clone(),
            customer: PaymentCustomer {
                name: customer.full_name.clone(),
                phone: customer.phone.clone(),
            },
            line_items: payment_lines(&lines, fulfillment.shipping_method, shipping_cost),
            method: PaymentMethod::HostedCheckout {
                success_url: format!(
                    "{}/order-success?our_order_id={}",
                    self.public_base_url, order.id
                ),
                failure_url: format!("{}/order-failed", self.public_base_url),
                expires_at: Utc::now().timestamp() + CHECKOUT_EXPIRY_SECS,
            },
        };

        let payment = self
            .gateway
            .create_order(&payment_request)
            .await
            .map_err(|e| {
                warn!(
                    order.id = %order.id,
                    gateway = self.gateway.name(),
                    error = %e,
                    "Payment order creation failed, order left pending"
                );
                AppError::from(e)
            })?;

        self.database
            .orders()
            .set_gateway_order_id(&order.id, &payment.gateway_order_id)
            .await?;

        info!(
            order.id = %order.id,
            gateway = self.gateway.name(),
            gateway_order_id = %payment.gateway_order_id,
            "Payment link created"
        );

        Ok(CheckoutResponse {
            order_id: order.id,
            order_number: order.order_number,
            total_amount: order.total_amount,
            checkout_url: payment.checkout_url,
        })
    }

    async fn resolve_fulfillment(
        &self,
        fulfillment: &Fulfillment,
    ) -> AppResult<ResolvedFulfillment> {
        match fulfillment {
            Fulfillment::Delivery {
                address,
                shipping_method,
            } => {
                if *shipping_method == ShippingMethod::Pickup {
                    return Err(AppError::invalid_input(
                        "Delivery orders need a standard or priority shipping method",
                    ));
                }
                validate_address(address)?;

                let postal_code = address.postal_code.trim();
                if !is_well_formed_postal_code(postal_code) {
                    return Err(AppError::invalid_format(
                        "Postal code must be exactly 5 digits",
                    ));
                }
                if !self.zones.is_valid_postal_code(postal_code) {
                    return Err(AppError::invalid_input(format!(
                        "We do not deliver to postal code {postal_code} yet"
                    )));
                }

                Ok(ResolvedFulfillment {
                    shipping_method: *shipping_method,
                    delivery_address: Some(address.full_address()),
                    postal_code: Some(postal_code.to_owned()),
                    pickup_spot: None,
                })
            }
            Fulfillment::Pickup { pickup_spot_id } => {
                let spot = self
                    .database
                    .pickup_spots()
                    .get_pickup_spot(pickup_spot_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found("Pickup spot").with_resource_id(pickup_spot_id.clone())
                    })?;
                if !spot.active {
                    return Err(AppError::unavailable(format!(
                        "Pickup spot {} is not taking orders",
                        spot.name
                    )));
                }

                Ok(ResolvedFulfillment {
                    shipping_method: ShippingMethod::Pickup,
                    delivery_address: None,
                    postal_code: None,
                    pickup_spot: Some(spot),
                })
            }
        }
    }

    async fn validate_packages(&self, cart: &Cart) -> AppResult<()> {
        let catalog = self.database.catalog();

        for group in cart.package_groups() {
            let package_id = group.package_id.as_deref().ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Package items in group {} have no package id",
                    group.package_instance_id
                ))
            })?;
            let package = catalog
                .get_package(package_id)
                .await?
                .filter(|package| package.active)
                .ok_or_else(|| AppError::not_found("Package").with_resource_id(package_id))?;

            if group.total_meals != package.meals_included {
                return Err(AppError::invalid_input(format!(
                    "{} needs exactly {} meals, {} selected",
                    package.name, package.meals_included, group.total_meals
                )));
            }
        }

        Ok(())
    }

    async fn price_lines(&self, cart: &Cart) -> AppResult<Vec<PricedLine>> {
        let meals = self.load_meals(cart).await?;
        let sizes = self.load_sizes(cart).await?;

        cart.items
            .iter()
            .map(|item| {
                let (Some(meal), Some(size)) = (meals.get(&item.meal_id), sizes.get(&item.size_id))
                else {
                    return Err(AppError::internal("Catalog lookup missed a cart item"));
                };

                let unit_price = if item.is_package_item() {
                    size.package_price
                } else {
                    size.price
                };

                Ok(PricedLine {
                    order_item: NewOrderItem {
                        meal_id: meal.id.clone(),
                        size_id: size.id.clone(),
                        qty: item.qty,
                        unit_price,
                        package_id: item.package_id.clone(),
                        package_instance_id: item.package_instance_id.clone(),
                    },
                    label: format!("{} ({})", meal.name, size.name),
                })
            })
            .collect()
    }

    async fn load_meals(&self, cart: &Cart) -> AppResult<HashMap<String, Meal>> {
        let catalog = self.database.catalog();
        let mut meals = HashMap::new();

        for item in &cart.items {
            if meals.contains_key(&item.meal_id) {
                continue;
            }
            let meal = catalog
                .get_meal(&item.meal_id)
                .await?
                .filter(|meal| meal.active)
                .ok_or_else(|| AppError::not_found("Meal").with_resource_id(&item.meal_id))?;
            meals.insert(item.meal_id.clone(), meal);
        }

        Ok(meals)
    }

    async fn load_sizes(&self, cart: &Cart) -> AppResult<HashMap<String, Size>> {
        let manager = self.database.sizes();
        let mut sizes = HashMap::new();

        for item in &cart.items {
            if sizes.contains_key(&item.size_id) {
                continue;
            }
            let size = manager
                .get_size(&item.size_id)
                .await?
                .ok_or_else(|| AppError::not_found("Size").with_resource_id(&item.size_id))?;
            sizes.insert(item.size_id.clone(), size);
        }

        Ok(sizes)
    }
}

/// Trimmed contact data with a lower-cased email
///
/// # Errors
///
/// Returns `MissingRequiredField` for blank fields and `InvalidFormat` for a
/// malformed email or a phone without ten digits
pub fn validate_customer(info: &CustomerInfo) -> AppResult<CustomerInfo> {
    let name = info.name.trim();
    let email = info.email.trim().to_lowercase();
    let phone = info.phone.trim();

    if name.is_empty() {
        return Err(AppError::missing_field("name"));
    }
    if email.is_empty() {
        return Err(AppError::missing_field("email"));
    }
    if phone.is_empty() {
        return Err(AppError::missing_field("phone"));
    }
    if !is_plausible_email(&email) {
        return Err(AppError::invalid_format(format!("Invalid email: {email}")));
    }
    if !is_valid_phone(phone) {
        return Err(AppError::invalid_format("Phone number must have 10 digits"));
    }

    Ok(CustomerInfo {
        name: name.to_owned(),
        email,
        phone: phone.to_owned(),
    })
}

fn validate_cart(cart: &Cart) -> AppResult<()> {
    if cart.is_empty() {
        return Err(AppError::invalid_input("Cart is empty"));
    }
    if let Some(item) = cart.items.iter().find(|item| item.qty == 0) {
        return Err(AppError::invalid_input(format!(
            "Quantity for {} must be at least 1",
            item.meal_name
        )));
    }
    if let Some(item) = cart.items.iter().find(|item| item.qty > MAX_LINE_QTY) {
        return Err(AppError::invalid_input(format!(
            "Quantity for {} must be at most {MAX_LINE_QTY}",
            item.meal_name
        )));
    }
    Ok(())
}

fn validate_address(address: &DeliveryAddress) -> AppResult<()> {
    let required = [
        ("street", &address.street),
        ("ext_number", &address.ext_number),
        ("colonia", &address.colonia),
        ("postal_code", &address.postal_code),
        ("city", &address.city),
        ("state", &address.state),
    ];

    required
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(AppError::missing_field(field)))
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

fn payment_lines(
    lines: &[PricedLine],
    shipping_method: ShippingMethod,
    shipping_cost: i64,
) -> Vec<PaymentLineItem> {
    let mut items: Vec<PaymentLineItem> = lines
        .iter()
        .map(|line| PaymentLineItem {
            name: line.label.clone(),
            unit_price: line.order_item.unit_price,
            quantity: line.order_item.qty,
        })
        .collect();

    if shipping_cost > 0 {
        items.push(PaymentLineItem {
            name: format!("Envío {}", shipping_method.label()),
            unit_price: shipping_cost,
            quantity: 1,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, email: &str, phone: &str) -> CustomerInfo {
        CustomerInfo {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
        }
    }

    #[test]
    fn test_validate_customer_normalizes() {
        let valid =
            validate_customer(&info(" Ana ", " Ana@Example.COM ", "81 1234 5678")).unwrap();

        assert_eq!(valid.name, "Ana");
        assert_eq!(valid.email, "ana@example.com");
        assert_eq!(valid.phone, "81 1234 5678");
    }

    #[test]
    fn test_validate_customer_rejects_blank_and_bad_phone() {
        let missing = validate_customer(&info("Ana", "  ", "8112345678")).unwrap_err();
        assert_eq!(missing.message, "email is required");

        let short_phone =
            validate_customer(&info("Ana", "ana@example.com", "81123")).unwrap_err();
        assert_eq!(short_phone.message, "Phone number must have 10 digits");

        let bad_email = validate_customer(&info("Ana", "ana.example.com", "8112345678"));
        assert!(bad_email.is_err());
    }

    #[test]
    fn test_payment_lines_add_shipping_only_when_charged() {
        let lines = vec![PricedLine {
            order_item: NewOrderItem {
                meal_id: "m".to_owned(),
                size_id: "s".to_owned(),
                qty: 2,
                unit_price: 15_500,
                package_id: None,
                package_instance_id: None,
            },
            label: "Pollo chipotle (FIT)".to_owned(),
        }];

        let delivered = payment_lines(&lines, ShippingMethod::Standard, 5_000);
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[1].name, "Envío Estándar");

        let picked_up = payment_lines(&lines, ShippingMethod::Pickup, 0);
        assert_eq!(picked_up.len(), 1);
        assert_eq!(picked_up[0].name, "Pollo chipotle (FIT)");
    }

    #[test]
    fn test_fulfillment_json_shape() {
        let pickup: Fulfillment =
            serde_json::from_str(r#"{"type":"pickup","pickup_spot_id":"spot-1"}"#).unwrap();
        assert_eq!(
            pickup,
            Fulfillment::Pickup {
                pickup_spot_id: "spot-1".to_owned()
            }
        );
    }
}
