// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Shopwire workspace.
//!
//! The conversational engine, the storage layer, and the messaging
//! integration all speak in these types: identifiers, flow states,
//! read-only domain summaries, inbound events, and outbound payloads.

use serde::{Deserialize, Serialize};

/// Maximum selectable rows an interactive list payload may carry.
pub const MAX_LIST_ROWS: usize = 10;
/// Maximum characters in a list row title.
pub const ROW_TITLE_MAX: usize = 24;
/// Maximum characters in a list row description.
pub const ROW_DESC_MAX: usize = 60;
/// Maximum characters in a reply button title.
pub const BUTTON_TITLE_MAX: usize = 20;
/// Maximum characters in an interactive payload body.
pub const BODY_MAX: usize = 1024;

/// The messaging platform's contact identifier, normalized to digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteId(pub String);

impl RemoteId {
    /// Normalize a raw platform identifier by stripping every non-digit.
    pub fn normalize(raw: &str) -> Self {
        RemoteId(raw.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a delivered message, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// The active multi-step conversation state of a session.
///
/// Each variant carries exactly the data needed to resume the flow. The
/// serialized form embeds its own tag so a stored record can be checked
/// for consistency against the state-name column on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum FlowState {
    /// Awaiting the new name for a category.
    CategoryRenameInput { category_id: i64 },
    /// Awaiting the new price for a category.
    CategoryPriceInput { category_id: i64 },
    /// Awaiting the new SKU for a category.
    CategorySkuInput { category_id: i64 },
    /// Awaiting a phone number to look up a customer for editing.
    CustomerLookupInput,
    /// A customer is selected; awaiting a choice of what to edit.
    CustomerEditMenu { customer_id: i64 },
    /// Awaiting the new display name for a customer.
    CustomerEditNameInput { customer_id: i64 },
    /// Awaiting a signed balance delta for a customer.
    CustomerEditBalanceInput { customer_id: i64 },
}

impl FlowState {
    /// The tag string embedded in the serialized form of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            FlowState::CategoryRenameInput { .. } => "category_rename_input",
            FlowState::CategoryPriceInput { .. } => "category_price_input",
            FlowState::CategorySkuInput { .. } => "category_sku_input",
            FlowState::CustomerLookupInput => "customer_lookup_input",
            FlowState::CustomerEditMenu { .. } => "customer_edit_menu",
            FlowState::CustomerEditNameInput { .. } => "customer_edit_name_input",
            FlowState::CustomerEditBalanceInput { .. } => "customer_edit_balance_input",
        }
    }
}

/// A session binding a remote messaging identifier to its owning tenant
/// and (at most one) active flow.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub remote_id: RemoteId,
    pub owner_id: i64,
    /// `None` means idle, awaiting a menu selection.
    pub flow: Option<FlowState>,
    pub created_at: String,
    pub last_interaction_at: String,
}

/// Read-only projection of a sales category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub sku: Option<String>,
    /// Number of deliverable items currently in stock for this category.
    pub stock_count: i64,
}

/// Read-only projection of a storefront customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: i64,
    pub name: String,
    /// Digits-only phone number.
    pub phone: String,
    pub balance: f64,
    pub blocked: bool,
    pub purchase_count: i64,
}

/// An inbound conversational event, already lifted out of the webhook envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A button tap or list row selection, carrying the element's opaque id.
    Selection { id: String },
    /// A free-text message body.
    Text { body: String },
}

/// A reply button on an interactive button payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyButton {
    pub id: String,
    /// At most [`BUTTON_TITLE_MAX`] characters.
    pub title: String,
}

/// A selectable row on an interactive list payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    /// At most [`ROW_TITLE_MAX`] characters.
    pub title: String,
    /// At most [`ROW_DESC_MAX`] characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A titled group of rows inside an interactive list payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rows: Vec<Row>,
}

/// A structured outbound message handed to the transport.
///
/// The engine only ever constructs these shapes; turning them into API
/// calls is the transport's concern.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPayload {
    /// Plain text body.
    Text { body: String },
    /// Header/body/footer with up to three reply buttons.
    Buttons {
        header: Option<String>,
        body: String,
        footer: Option<String>,
        buttons: Vec<ReplyButton>,
    },
    /// Header/body/footer with a list-opening button label and row sections.
    List {
        header: Option<String>,
        body: String,
        footer: Option<String>,
        button: String,
        sections: Vec<Section>,
    },
}

impl OutboundPayload {
    /// The body text of this payload, whatever its shape.
    pub fn body(&self) -> &str {
        match self {
            OutboundPayload::Text { body } => body,
            OutboundPayload::Buttons { body, .. } => body,
            OutboundPayload::List { body, .. } => body,
        }
    }
}
