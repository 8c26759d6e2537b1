// ABOUTME: WhatsApp Cloud API messaging
// ABOUTME: HTTP client, log-only fallback, and order notification builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Graph API client implementing `MessagingChannel`
pub mod client;
/// Logging fallback channel
pub mod log_only;
/// Order notification builders
pub mod messages;

pub use client::{WhatsAppClient, WhatsAppConfig};
pub use log_only::LogOnlyChannel;
pub use messages::{
    order_expired_text, payment_confirmation, payment_pending_text, AlertItem, AlertKind,
    InternalOrderAlert,
};
