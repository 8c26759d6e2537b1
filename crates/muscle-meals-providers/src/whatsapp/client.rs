// ABOUTME: WhatsApp Cloud API client for text and template messages
// ABOUTME: Implements MessagingChannel; failures are logged and reported as false
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::core::{MessagingChannel, TemplateMessage};
use crate::http_client::shared_client;

/// Graph API base including version
pub const GRAPH_API_URL: &str = "https://graph.facebook.com/v23.0";

/// WhatsApp Cloud API settings
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Graph API base URL
    pub api_url: String,
    /// Business phone number id
    pub phone_id: String,
    /// Permanent access token
    pub access_token: String,
}

impl WhatsAppConfig {
    /// Settings against the public Graph API
    #[must_use]
    pub fn new(phone_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_url: GRAPH_API_URL.to_owned(),
            phone_id: phone_id.into(),
            access_token: access_token.into(),
        }
    }
}

/// WhatsApp Cloud API client
pub struct WhatsAppClient {
    config: WhatsAppConfig,
}

impl WhatsAppClient {
    /// Create a client
    #[must_use]
    pub const fn new(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.api_url.trim_end_matches('/'),
            self.config.phone_id
        )
    }

    async fn post(&self, kind: &'static str, to: &str, payload: Value) -> bool {
        let response = match shared_client()
            .post(self.messages_url())
            .bearer_auth(&self.config.access_token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(kind, to, error = %e, "WhatsApp request failed");
                return false;
            }
        };

        let status = response.status();
        let body: Value = response.json().await.unwrap_or_default();

        if !status.is_success() {
            error!(kind, to, status = status.as_u16(), body = %body, "WhatsApp API error");
            return false;
        }

        let message_id = body["messages"][0]["id"].as_str().unwrap_or_default();
        info!(kind, to, message_id, "WhatsApp message sent");
        true
    }
}

/// Request body for a text message
#[must_use]
pub fn text_payload(to: &str, body: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "type": "text",
        "to": to,
        "text": { "body": body }
    })
}

/// Request body for a template message
#[must_use]
pub fn template_payload(to: &str, template: &TemplateMessage) -> Value {
    let mut components = Vec::with_capacity(2);
    if let Some(header) = &template.header {
        components.push(json!({
            "type": "header",
            "parameters": [{ "type": "text", "text": header }]
        }));
    }
    components.push(json!({
        "type": "body",
        "parameters": template
            .body
            .iter()
            .map(|text| json!({ "type": "text", "text": text }))
            .collect::<Vec<_>>()
    }));

    json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "type": "template",
        "to": to,
        "template": {
            "name": template.name,
            "language": { "code": template.language },
            "components": components
        }
    })
}

#[async_trait]
impl MessagingChannel for WhatsAppClient {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn send_text(&self, to: &str, body: &str) -> bool {
        self.post("text", to, text_payload(to, body)).await
    }

    async fn send_template(&self, to: &str, template: &TemplateMessage) -> bool {
        self.post("template", to, template_payload(to, template))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let client = WhatsAppClient::new(WhatsAppConfig::new("1234", "token"));
        assert_eq!(
            client.messages_url(),
            "https://graph.facebook.com/v23.0/1234/messages"
        );
    }

    #[test]
    fn test_template_payload_shape() {
        let template = TemplateMessage {
            name: "pago_confirmado".to_owned(),
            language: "es_MX".to_owned(),
            header: Some("ABC12345".to_owned()),
            body: vec!["Ana".to_owned(), "310.00".to_owned()],
        };

        let payload = template_payload("+5218112345678", &template);

        assert_eq!(payload["type"], "template");
        assert_eq!(payload["template"]["language"]["code"], "es_MX");
        let components = &payload["template"]["components"];
        assert_eq!(components[0]["type"], "header");
        assert_eq!(components[0]["parameters"][0]["text"], "ABC12345");
        assert_eq!(components[1]["parameters"][1]["text"], "310.00");
    }

    #[test]
    fn test_text_payload_shape() {
        let payload = text_payload("+5218112345678", "Hola");
        assert_eq!(payload["messaging_product"], "whatsapp");
        assert_eq!(payload["text"]["body"], "Hola");
    }
}
