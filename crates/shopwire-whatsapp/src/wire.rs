// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound payload wire serialization.
//!
//! Maps the engine's payload shapes onto the Cloud API `/messages` JSON
//! bodies. Hard platform limits (three reply buttons, 20-character button
//! titles) are enforced here as a last line of defense; the builders
//! upstream already respect them.

use serde_json::{Value, json};

use shopwire_core::types::{BUTTON_TITLE_MAX, OutboundPayload, RemoteId};

/// Build the `/messages` request body for `payload` addressed to `to`.
pub fn message_body(to: &RemoteId, payload: &OutboundPayload) -> Value {
    let mut object = serde_json::Map::new();
    object.insert("messaging_product".into(), json!("whatsapp"));
    object.insert("recipient_type".into(), json!("individual"));
    object.insert("to".into(), json!(to.as_str()));

    match payload {
        OutboundPayload::Text { body: text } => {
            object.insert("type".into(), json!("text"));
            object.insert("text".into(), json!({ "body": text }));
        }
        OutboundPayload::Buttons {
            header,
            body: text,
            footer,
            buttons,
        } => {
            let rendered: Vec<Value> = buttons
                .iter()
                .take(3)
                .map(|b| {
                    json!({
                        "type": "reply",
                        "reply": {
                            "id": b.id,
                            "title": clamp(&b.title, BUTTON_TITLE_MAX),
                        }
                    })
                })
                .collect();

            let mut interactive = json!({
                "type": "button",
                "body": { "text": text },
                "action": { "buttons": rendered },
            });
            attach_header_footer(&mut interactive, header, footer);

            object.insert("type".into(), json!("interactive"));
            object.insert("interactive".into(), interactive);
        }
        OutboundPayload::List {
            header,
            body: text,
            footer,
            button,
            sections,
        } => {
            let rendered: Vec<Value> = sections
                .iter()
                .map(|section| {
                    let rows: Vec<Value> = section
                        .rows
                        .iter()
                        .map(|row| {
                            let mut value = json!({ "id": row.id, "title": row.title });
                            if let Some(description) = &row.description {
                                value["description"] = json!(description);
                            }
                            value
                        })
                        .collect();
                    match &section.title {
                        Some(title) => json!({ "title": title, "rows": rows }),
                        None => json!({ "rows": rows }),
                    }
                })
                .collect();

            let mut interactive = json!({
                "type": "list",
                "body": { "text": text },
                "action": { "button": button, "sections": rendered },
            });
            attach_header_footer(&mut interactive, header, footer);

            object.insert("type".into(), json!("interactive"));
            object.insert("interactive".into(), interactive);
        }
    }

    Value::Object(object)
}

fn attach_header_footer(interactive: &mut Value, header: &Option<String>, footer: &Option<String>) {
    if let Some(header) = header {
        interactive["header"] = json!({ "type": "text", "text": header });
    }
    if let Some(footer) = footer {
        interactive["footer"] = json!({ "text": footer });
    }
}

fn clamp(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
