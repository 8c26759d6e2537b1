// ABOUTME: Messaging channel that only writes messages to the log
// ABOUTME: Used when WhatsApp credentials are not configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::info;

use crate::core::{MessagingChannel, TemplateMessage};

/// Channel that logs instead of sending
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyChannel;

#[async_trait]
impl MessagingChannel for LogOnlyChannel {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send_text(&self, to: &str, body: &str) -> bool {
        info!(to, body, "Message not sent: messaging is not configured");
        true
    }

    async fn send_template(&self, to: &str, template: &TemplateMessage) -> bool {
        info!(
            to,
            template = %template.name,
            params = ?template.body,
            "Template not sent: messaging is not configured"
        );
        true
    }
}
