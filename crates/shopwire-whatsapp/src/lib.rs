// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Business Cloud API integration for Shopwire.
//!
//! Implements [`Transport`] over the Cloud API `/messages` endpoint and
//! parses inbound webhook envelopes into engine events. The engine never
//! sees HTTP; this crate owns all of it.

pub mod webhook;
pub mod wire;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use shopwire_config::model::WhatsAppConfig;
use shopwire_core::ShopwireError;
use shopwire_core::traits::Transport;
use shopwire_core::types::{MessageId, OutboundPayload, RemoteId};

pub use webhook::{WebhookEnvelope, extract_events};

/// Transport over the Cloud API, authenticated with a bearer token.
pub struct CloudApiTransport {
    http: reqwest::Client,
    api_base: String,
    phone_number_id: String,
    access_token: String,
}

/// The interesting part of a successful `/messages` response.
#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    #[serde(default)]
    id: String,
}

impl CloudApiTransport {
    /// Build a transport from configuration.
    ///
    /// Requires `whatsapp.access_token` and `whatsapp.phone_number_id`.
    pub fn new(config: &WhatsAppConfig) -> Result<Self, ShopwireError> {
        let access_token = config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ShopwireError::Config("whatsapp.access_token is required to send messages".into())
            })?
            .to_string();
        let phone_number_id = config
            .phone_number_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ShopwireError::Config(
                    "whatsapp.phone_number_id is required to send messages".into(),
                )
            })?
            .to_string();

        Ok(Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            phone_number_id,
            access_token,
        })
    }
}

#[async_trait]
impl Transport for CloudApiTransport {
    async fn send(
        &self,
        to: &RemoteId,
        payload: &OutboundPayload,
    ) -> Result<MessageId, ShopwireError> {
        let url = format!("{}/{}/messages", self.api_base, self.phone_number_id);
        let body = wire::message_body(to, payload);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ShopwireError::Transport {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ShopwireError::Transport {
                message: format!("cloud api returned {status}: {detail}"),
                source: None,
            });
        }

        let parsed: SendResponse =
            response.json().await.map_err(|e| ShopwireError::Transport {
                message: format!("cloud api response was not valid JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        let id = parsed
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ShopwireError::Transport {
                message: "cloud api response carried no message id".into(),
                source: None,
            })?;

        debug!(remote = %to, message_id = %id, "message accepted by cloud api");
        Ok(MessageId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: &str) -> WhatsAppConfig {
        WhatsAppConfig {
            access_token: Some("token-123".to_string()),
            phone_number_id: Some("5550001".to_string()),
            verify_token: None,
            api_base: api_base.to_string(),
            admins: Vec::new(),
        }
    }

    #[test]
    fn new_requires_access_token() {
        let mut cfg = config("https://example.invalid");
        cfg.access_token = None;
        assert!(CloudApiTransport::new(&cfg).is_err());

        cfg.access_token = Some(String::new());
        assert!(CloudApiTransport::new(&cfg).is_err());
    }

    #[test]
    fn new_requires_phone_number_id() {
        let mut cfg = config("https://example.invalid");
        cfg.phone_number_id = None;
        assert!(CloudApiTransport::new(&cfg).is_err());
    }

    #[tokio::test]
    async fn send_posts_to_messages_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/5550001/messages"))
            .and(bearer_token("token-123"))
            .and(body_partial_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "5511987654321",
                "type": "text",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": [{ "id": "wamid.out.1" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = CloudApiTransport::new(&config(&server.uri())).unwrap();
        let id = transport
            .send(
                &RemoteId("5511987654321".to_string()),
                &OutboundPayload::Text {
                    body: "hello".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(id.0, "wamid.out.1");
    }

    #[tokio::test]
    async fn send_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let transport = CloudApiTransport::new(&config(&server.uri())).unwrap();
        let err = transport
            .send(
                &RemoteId("5511987654321".to_string()),
                &OutboundPayload::Text {
                    body: "hello".to_string(),
                },
            )
            .await
            .unwrap_err();

        match err {
            ShopwireError::Transport { message, .. } => {
                assert!(message.contains("401"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
