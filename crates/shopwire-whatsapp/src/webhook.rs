// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook envelope parsing.
//!
//! The platform delivers batched notifications: an envelope of entries,
//! each holding changes, each holding messages and/or delivery statuses.
//! Only messages become engine events; statuses and unsupported message
//! kinds are dropped. The sender identifier is normalized to digits before
//! it becomes a session key.

use serde::Deserialize;
use tracing::debug;

use shopwire_core::types::{InboundEvent, RemoteId};

/// The webhook body as posted by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub interactive: Option<InteractiveContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractiveContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub button_reply: Option<Reply>,
    #[serde(default)]
    pub list_reply: Option<Reply>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Lift every supported message out of the envelope as an engine event
/// paired with its normalized sender.
pub fn extract_events(envelope: &WebhookEnvelope) -> Vec<(RemoteId, InboundEvent)> {
    let mut events = Vec::new();

    for entry in &envelope.entry {
        for change in &entry.changes {
            for message in &change.value.messages {
                match to_event(message) {
                    Some(event) => {
                        events.push((RemoteId::normalize(&message.from), event));
                    }
                    None => {
                        debug!(
                            message_id = %message.id,
                            kind = %message.kind,
                            "ignoring unsupported webhook message"
                        );
                    }
                }
            }
        }
    }

    events
}

fn to_event(message: &WebhookMessage) -> Option<InboundEvent> {
    match message.kind.as_str() {
        "text" => message.text.as_ref().map(|t| InboundEvent::Text {
            body: t.body.clone(),
        }),
        "interactive" => {
            let interactive = message.interactive.as_ref()?;
            let reply = interactive
                .button_reply
                .as_ref()
                .or(interactive.list_reply.as_ref())?;
            Some(InboundEvent::Selection {
                id: reply.id.clone(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> WebhookEnvelope {
        serde_json::from_value(value).expect("envelope should deserialize")
    }

    fn text_envelope(from: &str, body: &str) -> WebhookEnvelope {
        parse(serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "1001",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "messages": [{
                            "from": from,
                            "id": "wamid.1",
                            "timestamp": "1700000000",
                            "type": "text",
                            "text": { "body": body }
                        }]
                    }
                }]
            }]
        }))
    }

    #[test]
    fn text_message_becomes_text_event() {
        let events = extract_events(&text_envelope("5511987654321", "hello"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0.as_str(), "5511987654321");
        assert_eq!(
            events[0].1,
            InboundEvent::Text {
                body: "hello".to_string()
            }
        );
    }

    #[test]
    fn sender_is_normalized_to_digits() {
        let events = extract_events(&text_envelope("+55 11 98765-4321", "hi"));
        assert_eq!(events[0].0.as_str(), "5511987654321");
    }

    #[test]
    fn button_reply_becomes_selection() {
        let envelope = parse(serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messages": [{
                            "from": "5511987654321",
                            "id": "wamid.2",
                            "type": "interactive",
                            "interactive": {
                                "type": "button_reply",
                                "button_reply": { "id": "flow:cancel", "title": "Cancel" }
                            }
                        }]
                    }
                }]
            }]
        }));
        let events = extract_events(&envelope);
        assert_eq!(
            events[0].1,
            InboundEvent::Selection {
                id: "flow:cancel".to_string()
            }
        );
    }

    #[test]
    fn list_reply_becomes_selection() {
        let envelope = parse(serde_json::json!({
            "entry": [{
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messages": [{
                            "from": "5511987654321",
                            "id": "wamid.3",
                            "type": "interactive",
                            "interactive": {
                                "type": "list_reply",
                                "list_reply": { "id": "crs:42", "title": "Old Name" }
                            }
                        }]
                    }
                }]
            }]
        }));
        let events = extract_events(&envelope);
        assert_eq!(
            events[0].1,
            InboundEvent::Selection {
                id: "crs:42".to_string()
            }
        );
    }

    #[test]
    fn statuses_only_envelope_yields_no_events() {
        let envelope = parse(serde_json::json!({
            "entry": [{
                "changes": [{
                    "field": "messages",
                    "value": {
                        "statuses": [{ "id": "wamid.4", "status": "delivered" }]
                    }
                }]
            }]
        }));
        assert!(extract_events(&envelope).is_empty());
    }

    #[test]
    fn unsupported_message_kind_is_dropped() {
        let envelope = parse(serde_json::json!({
            "entry": [{
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messages": [{
                            "from": "5511987654321",
                            "id": "wamid.5",
                            "type": "image",
                            "image": { "id": "media-1" }
                        }]
                    }
                }]
            }]
        }));
        assert!(extract_events(&envelope).is_empty());
    }

    #[test]
    fn multiple_messages_keep_order() {
        let envelope = parse(serde_json::json!({
            "entry": [{
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messages": [
                            { "from": "551100", "id": "a", "type": "text", "text": { "body": "one" } },
                            { "from": "551100", "id": "b", "type": "text", "text": { "body": "two" } }
                        ]
                    }
                }]
            }]
        }));
        let events = extract_events(&envelope);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].1, InboundEvent::Text { body: "one".into() });
        assert_eq!(events[1].1, InboundEvent::Text { body: "two".into() });
    }
}
