// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The flow state machine.
//!
//! Given an inbound event and the sender's persisted session, [`FlowEngine`]
//! decides the next session state, performs the domain mutation when a flow
//! completes, and selects the outbound payload. Flow state lives only in the
//! session store, never in memory, so concurrent request handlers need no
//! coordination beyond the store's last-write-wins writes. A rapid double
//! tap or a redelivered webhook may interleave two transitions; the second
//! write overwrites the first, and no dedup key guards side-effecting
//! actions such as balance deltas (deliberately so, see DESIGN.md).
//!
//! Every successful mutation clears the flow; there is no undo. Delivery
//! failures never roll a transition back.

use std::sync::Arc;

use tracing::{debug, info};

use shopwire_core::ShopwireError;
use shopwire_core::traits::{CatalogStore, CustomerDirectory, SessionStore};
use shopwire_core::types::{
    CustomerSummary, FlowState, InboundEvent, OutboundPayload, RemoteId, ReplyButton, Row,
    Section,
};

use crate::codec::{self, RowPrefix};
use crate::dispatch::Dispatcher;
use crate::menu::{self, MenuItem, MenuSpec, clip_body};
use crate::template::{self, money, render};
use crate::validate;

/// The category selection menus differ only in what picking a row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryMenu {
    /// Read-only browsing.
    Browse,
    Rename,
    Price,
    Sku,
}

impl CategoryMenu {
    fn select_prefix(self) -> RowPrefix {
        match self {
            CategoryMenu::Browse => RowPrefix::CategoryListRow,
            CategoryMenu::Rename => RowPrefix::CategoryRenameSelect,
            CategoryMenu::Price => RowPrefix::CategoryPriceSelect,
            CategoryMenu::Sku => RowPrefix::CategorySkuSelect,
        }
    }

    fn page_prefix(self) -> RowPrefix {
        match self {
            CategoryMenu::Browse => RowPrefix::CategoryListPage,
            CategoryMenu::Rename => RowPrefix::CategoryRenamePage,
            CategoryMenu::Price => RowPrefix::CategoryPricePage,
            CategoryMenu::Sku => RowPrefix::CategorySkuPage,
        }
    }

    fn body(self) -> &'static str {
        match self {
            CategoryMenu::Browse => "Your categories.",
            CategoryMenu::Rename => "Pick the category to rename.",
            CategoryMenu::Price => "Pick the category to reprice.",
            CategoryMenu::Sku => "Pick the category whose SKU to change.",
        }
    }
}

/// The administrative conversational engine.
pub struct FlowEngine {
    sessions: Arc<dyn SessionStore>,
    catalog: Arc<dyn CatalogStore>,
    customers: Arc<dyn CustomerDirectory>,
    dispatcher: Dispatcher,
}

impl FlowEngine {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        catalog: Arc<dyn CatalogStore>,
        customers: Arc<dyn CustomerDirectory>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            sessions,
            catalog,
            customers,
            dispatcher,
        }
    }

    /// Process one inbound event from `remote` on behalf of `owner_id`.
    ///
    /// Errors returned here are storage failures only; everything
    /// user-facing (unknown ids, validation failures, vanished targets,
    /// delivery failures) is communicated through the conversation itself.
    pub async fn handle(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        metrics::counter!("shopwire_events_total").increment(1);
        let session = self.sessions.upsert(remote, owner_id).await?;
        debug!(
            remote = %remote,
            owner_id,
            flow = session.flow.as_ref().map(|f| f.tag()).unwrap_or("idle"),
            "handling inbound event"
        );

        // The generic cancel button is honored in every non-idle state.
        if session.flow.is_some() {
            if let InboundEvent::Selection { id } = &event {
                if id == codec::CANCEL {
                    self.sessions.set_flow(remote, None).await?;
                    self.send_main_menu(remote, template::MAIN_MENU_CANCELLED_BODY)
                        .await;
                    return Ok(());
                }
            }
        }

        match session.flow {
            None => self.on_idle(remote, owner_id, event).await,
            Some(FlowState::CategoryRenameInput { category_id }) => {
                self.on_category_input(remote, owner_id, category_id, CategoryMenu::Rename, event)
                    .await
            }
            Some(FlowState::CategoryPriceInput { category_id }) => {
                self.on_category_input(remote, owner_id, category_id, CategoryMenu::Price, event)
                    .await
            }
            Some(FlowState::CategorySkuInput { category_id }) => {
                self.on_category_input(remote, owner_id, category_id, CategoryMenu::Sku, event)
                    .await
            }
            Some(FlowState::CustomerLookupInput) => {
                self.on_customer_lookup(remote, owner_id, event).await
            }
            Some(FlowState::CustomerEditMenu { customer_id }) => {
                self.on_customer_edit_menu(remote, owner_id, customer_id, event)
                    .await
            }
            Some(FlowState::CustomerEditNameInput { customer_id }) => {
                self.on_customer_name_input(remote, owner_id, customer_id, event)
                    .await
            }
            Some(FlowState::CustomerEditBalanceInput { customer_id }) => {
                self.on_customer_balance_input(remote, owner_id, customer_id, event)
                    .await
            }
        }
    }

    // ----- idle -----

    async fn on_idle(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        let id = match event {
            InboundEvent::Text { .. } => {
                self.send_main_menu(remote, template::MAIN_MENU_BODY).await;
                return Ok(());
            }
            InboundEvent::Selection { id } => id,
        };

        match id.as_str() {
            codec::MENU_CATEGORIES => {
                return self
                    .send_category_menu(remote, owner_id, CategoryMenu::Browse, 1)
                    .await;
            }
            codec::MENU_RENAME => {
                return self
                    .send_category_menu(remote, owner_id, CategoryMenu::Rename, 1)
                    .await;
            }
            codec::MENU_PRICE => {
                return self
                    .send_category_menu(remote, owner_id, CategoryMenu::Price, 1)
                    .await;
            }
            codec::MENU_SKU => {
                return self
                    .send_category_menu(remote, owner_id, CategoryMenu::Sku, 1)
                    .await;
            }
            codec::MENU_CUSTOMER => {
                self.sessions
                    .set_flow(remote, Some(&FlowState::CustomerLookupInput))
                    .await?;
                self.send_prompt(remote, template::CUSTOMER_LOOKUP_PROMPT.to_string())
                    .await;
                return Ok(());
            }
            // A back row, or a cancel tap that raced a completed flow:
            // both just reopen the menu.
            codec::MENU_BACK | codec::CANCEL => {
                self.send_main_menu(remote, template::MAIN_MENU_BODY).await;
                return Ok(());
            }
            _ => {}
        }

        // Page jumps keep the session idle.
        for kind in [
            CategoryMenu::Browse,
            CategoryMenu::Rename,
            CategoryMenu::Price,
            CategoryMenu::Sku,
        ] {
            if let Some(page) = kind.page_prefix().decode(&id) {
                let page = usize::try_from(page).unwrap_or(1);
                return self.send_category_menu(remote, owner_id, kind, page).await;
            }
        }

        // Category selections start a flow (or show detail for browsing).
        if let Some(category_id) = RowPrefix::CategoryListRow.decode(&id) {
            return self.send_category_detail(remote, owner_id, category_id).await;
        }
        for kind in [CategoryMenu::Rename, CategoryMenu::Price, CategoryMenu::Sku] {
            if let Some(category_id) = kind.select_prefix().decode(&id) {
                return self
                    .start_category_flow(remote, owner_id, category_id, kind)
                    .await;
            }
        }

        debug!(remote = %remote, id = %id, "unrecognized selection while idle");
        self.send_main_menu(remote, template::MAIN_MENU_UNRECOGNIZED_BODY)
            .await;
        Ok(())
    }

    // ----- category flows -----

    async fn start_category_flow(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        category_id: i64,
        kind: CategoryMenu,
    ) -> Result<(), ShopwireError> {
        let Some(category) = self.catalog.get_category(owner_id, category_id).await? else {
            self.send_text(remote, template::TARGET_GONE.to_string()).await;
            return Ok(());
        };

        let (flow, prompt) = match kind {
            CategoryMenu::Rename => (
                FlowState::CategoryRenameInput { category_id },
                render(
                    template::CATEGORY_RENAME_PROMPT,
                    &[("category", category.name.clone())],
                ),
            ),
            CategoryMenu::Price => (
                FlowState::CategoryPriceInput { category_id },
                render(
                    template::CATEGORY_PRICE_PROMPT,
                    &[
                        ("category", category.name.clone()),
                        ("price", money(category.price)),
                    ],
                ),
            ),
            CategoryMenu::Sku => (
                FlowState::CategorySkuInput { category_id },
                render(
                    template::CATEGORY_SKU_PROMPT,
                    &[("category", category.name.clone())],
                ),
            ),
            CategoryMenu::Browse => unreachable!("browse rows never start a flow"),
        };

        self.sessions.set_flow(remote, Some(&flow)).await?;
        self.send_prompt(remote, prompt).await;
        Ok(())
    }

    async fn on_category_input(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        category_id: i64,
        kind: CategoryMenu,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        let body = match event {
            InboundEvent::Text { body } => body,
            InboundEvent::Selection { id } => {
                debug!(remote = %remote, id = %id, "unrecognized selection during input flow");
                self.send_text(remote, template::UNRECOGNIZED_IN_FLOW.to_string())
                    .await;
                return Ok(());
            }
        };

        let (updated, confirmation) = match kind {
            CategoryMenu::Rename => match validate::category_name(&body) {
                None => {
                    self.send_prompt(remote, template::INVALID_CATEGORY_NAME.to_string())
                        .await;
                    return Ok(());
                }
                Some(name) => {
                    let updated = self.catalog.rename_category(owner_id, category_id, &name).await?;
                    let confirm = updated.as_ref().map(|c| {
                        render(template::CATEGORY_RENAMED, &[("category", c.name.clone())])
                    });
                    (updated, confirm)
                }
            },
            CategoryMenu::Price => match validate::price(&body) {
                None => {
                    self.send_prompt(remote, template::INVALID_PRICE.to_string())
                        .await;
                    return Ok(());
                }
                Some(price) => {
                    let updated = self
                        .catalog
                        .set_category_price(owner_id, category_id, price)
                        .await?;
                    let confirm = updated.as_ref().map(|c| {
                        render(
                            template::CATEGORY_PRICE_UPDATED,
                            &[("category", c.name.clone()), ("price", money(c.price))],
                        )
                    });
                    (updated, confirm)
                }
            },
            CategoryMenu::Sku => match validate::sku(&body) {
                None => {
                    self.send_prompt(remote, template::INVALID_SKU.to_string())
                        .await;
                    return Ok(());
                }
                Some(sku) => {
                    let updated = self
                        .catalog
                        .set_category_sku(owner_id, category_id, &sku)
                        .await?;
                    let confirm = updated.as_ref().map(|c| {
                        render(
                            template::CATEGORY_SKU_UPDATED,
                            &[
                                ("category", c.name.clone()),
                                ("sku", c.sku.clone().unwrap_or_default()),
                            ],
                        )
                    });
                    (updated, confirm)
                }
            },
            CategoryMenu::Browse => unreachable!("browse rows never start a flow"),
        };

        // Whether the mutation landed or the target vanished, the flow ends
        // here; retrying against a stale id helps no one.
        self.sessions.set_flow(remote, None).await?;

        match (updated, confirmation) {
            (Some(_), Some(confirmation)) => {
                info!(remote = %remote, category_id, "category updated");
                self.send_text(remote, confirmation).await;
            }
            _ => {
                self.send_text(remote, template::TARGET_GONE.to_string()).await;
            }
        }
        Ok(())
    }

    async fn send_category_menu(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        kind: CategoryMenu,
        page: usize,
    ) -> Result<(), ShopwireError> {
        let categories = self.catalog.list_categories(owner_id).await?;
        if categories.is_empty() {
            self.send_text(remote, template::EMPTY_CATALOG.to_string()).await;
            return Ok(());
        }

        let items: Vec<MenuItem> = categories
            .iter()
            .map(|c| MenuItem {
                id: c.id,
                title: c.name.clone(),
                description: format!("{} · stock {}", money(c.price), c.stock_count),
            })
            .collect();

        let spec = MenuSpec {
            header: "Categories",
            body: kind.body(),
            button: "Pick one",
            select_prefix: kind.select_prefix(),
            page_prefix: kind.page_prefix(),
            trailing: vec![Row {
                id: codec::MENU_BACK.to_string(),
                title: "Back".to_string(),
                description: None,
            }],
        };

        let menu_page = menu::build_menu(&items, page, &spec);
        self.dispatcher
            .send(
                remote,
                menu_page.payload,
                "category menu delivered",
                "category menu delivery failed",
            )
            .await;
        Ok(())
    }

    async fn send_category_detail(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        category_id: i64,
    ) -> Result<(), ShopwireError> {
        match self.catalog.get_category(owner_id, category_id).await? {
            Some(c) => {
                let body = render(
                    template::CATEGORY_DETAIL,
                    &[
                        ("category", c.name.clone()),
                        ("price", money(c.price)),
                        ("sku", c.sku.clone().unwrap_or_else(|| "none".to_string())),
                        ("stock", c.stock_count.to_string()),
                    ],
                );
                self.send_text(remote, body).await;
            }
            None => {
                self.send_text(remote, template::TARGET_GONE.to_string()).await;
            }
        }
        Ok(())
    }

    // ----- customer flows -----

    async fn on_customer_lookup(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        let body = match event {
            InboundEvent::Text { body } => body,
            InboundEvent::Selection { id } => {
                debug!(remote = %remote, id = %id, "unrecognized selection during lookup");
                self.send_text(remote, template::UNRECOGNIZED_IN_FLOW.to_string())
                    .await;
                return Ok(());
            }
        };

        let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            self.send_prompt(remote, template::CUSTOMER_NOT_FOUND.to_string())
                .await;
            return Ok(());
        }

        match self.customers.find_by_phone(owner_id, &digits).await? {
            Some(customer) => {
                self.sessions
                    .set_flow(
                        remote,
                        Some(&FlowState::CustomerEditMenu {
                            customer_id: customer.id,
                        }),
                    )
                    .await?;
                self.send_customer_edit_menu(remote, &customer).await;
            }
            None => {
                self.send_prompt(remote, template::CUSTOMER_NOT_FOUND.to_string())
                    .await;
            }
        }
        Ok(())
    }

    async fn on_customer_edit_menu(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        customer_id: i64,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        let id = match event {
            InboundEvent::Text { .. } => {
                // Free text here isn't an answer to anything; re-show the menu.
                match self.customers.get_customer(owner_id, customer_id).await? {
                    Some(customer) => self.send_customer_edit_menu(remote, &customer).await,
                    None => {
                        self.sessions.set_flow(remote, None).await?;
                        self.send_text(remote, template::TARGET_GONE.to_string()).await;
                    }
                }
                return Ok(());
            }
            InboundEvent::Selection { id } => id,
        };

        // Only ids minted for THIS customer count; a stale tap from an
        // earlier menu (different customer id) falls through to the
        // didn't-understand reply.
        if RowPrefix::CustomerEditName.decode(&id) == Some(customer_id) {
            match self.customers.get_customer(owner_id, customer_id).await? {
                Some(customer) => {
                    self.sessions
                        .set_flow(remote, Some(&FlowState::CustomerEditNameInput { customer_id }))
                        .await?;
                    let prompt = render(
                        template::CUSTOMER_NAME_PROMPT,
                        &[("name", customer.name.clone())],
                    );
                    self.send_prompt(remote, prompt).await;
                }
                None => {
                    self.sessions.set_flow(remote, None).await?;
                    self.send_text(remote, template::TARGET_GONE.to_string()).await;
                }
            }
            return Ok(());
        }

        if RowPrefix::CustomerEditBalance.decode(&id) == Some(customer_id) {
            match self.customers.get_customer(owner_id, customer_id).await? {
                Some(customer) => {
                    self.sessions
                        .set_flow(
                            remote,
                            Some(&FlowState::CustomerEditBalanceInput { customer_id }),
                        )
                        .await?;
                    let prompt = render(
                        template::CUSTOMER_BALANCE_PROMPT,
                        &[
                            ("name", customer.name.clone()),
                            ("balance", money(customer.balance)),
                        ],
                    );
                    self.send_prompt(remote, prompt).await;
                }
                None => {
                    self.sessions.set_flow(remote, None).await?;
                    self.send_text(remote, template::TARGET_GONE.to_string()).await;
                }
            }
            return Ok(());
        }

        if RowPrefix::CustomerEditToggleBlock.decode(&id) == Some(customer_id) {
            // A toggle is a single-step action: mutate and return to idle.
            // Invoking it twice lands back on the original value, so a
            // duplicated webhook is tolerable.
            self.sessions.set_flow(remote, None).await?;
            match self.customers.toggle_block(owner_id, customer_id).await? {
                Some(updated) => {
                    info!(remote = %remote, customer_id, blocked = updated.blocked, "block flag toggled");
                    let tpl = if updated.blocked {
                        template::CUSTOMER_BLOCKED
                    } else {
                        template::CUSTOMER_UNBLOCKED
                    };
                    self.send_text(remote, render(tpl, &[("name", updated.name.clone())]))
                        .await;
                }
                None => {
                    self.send_text(remote, template::TARGET_GONE.to_string()).await;
                }
            }
            return Ok(());
        }

        if RowPrefix::CustomerEditBack.decode(&id) == Some(customer_id) {
            self.sessions.set_flow(remote, None).await?;
            self.send_main_menu(remote, template::MAIN_MENU_BODY).await;
            return Ok(());
        }

        debug!(remote = %remote, id = %id, "unrecognized selection in customer edit menu");
        self.send_text(remote, template::UNRECOGNIZED_IN_FLOW.to_string())
            .await;
        Ok(())
    }

    async fn on_customer_name_input(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        customer_id: i64,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        let body = match event {
            InboundEvent::Text { body } => body,
            InboundEvent::Selection { id } => {
                debug!(remote = %remote, id = %id, "unrecognized selection during input flow");
                self.send_text(remote, template::UNRECOGNIZED_IN_FLOW.to_string())
                    .await;
                return Ok(());
            }
        };

        let Some(name) = validate::customer_name(&body) else {
            self.send_prompt(remote, template::INVALID_CUSTOMER_NAME.to_string())
                .await;
            return Ok(());
        };

        self.sessions.set_flow(remote, None).await?;
        match self
            .customers
            .rename_customer(owner_id, customer_id, &name)
            .await?
        {
            Some(updated) => {
                info!(remote = %remote, customer_id, "customer renamed");
                self.send_text(
                    remote,
                    render(template::CUSTOMER_RENAMED, &[("name", updated.name.clone())]),
                )
                .await;
            }
            None => {
                self.send_text(remote, template::TARGET_GONE.to_string()).await;
            }
        }
        Ok(())
    }

    async fn on_customer_balance_input(
        &self,
        remote: &RemoteId,
        owner_id: i64,
        customer_id: i64,
        event: InboundEvent,
    ) -> Result<(), ShopwireError> {
        let body = match event {
            InboundEvent::Text { body } => body,
            InboundEvent::Selection { id } => {
                debug!(remote = %remote, id = %id, "unrecognized selection during input flow");
                self.send_text(remote, template::UNRECOGNIZED_IN_FLOW.to_string())
                    .await;
                return Ok(());
            }
        };

        let Some(delta) = validate::balance_delta(&body) else {
            self.send_prompt(remote, template::INVALID_BALANCE.to_string())
                .await;
            return Ok(());
        };

        // The delta goes through untouched; the directory clamps the
        // resulting balance, not us.
        self.sessions.set_flow(remote, None).await?;
        match self
            .customers
            .adjust_balance(owner_id, customer_id, delta)
            .await?
        {
            Some(updated) => {
                info!(remote = %remote, customer_id, delta, "balance adjusted");
                self.send_text(
                    remote,
                    render(
                        template::CUSTOMER_BALANCE_UPDATED,
                        &[
                            ("name", updated.name.clone()),
                            ("balance", money(updated.balance)),
                        ],
                    ),
                )
                .await;
            }
            None => {
                self.send_text(remote, template::TARGET_GONE.to_string()).await;
            }
        }
        Ok(())
    }

    async fn send_customer_edit_menu(&self, remote: &RemoteId, customer: &CustomerSummary) {
        let body = render(
            template::CUSTOMER_EDIT_BODY,
            &[
                ("name", customer.name.clone()),
                ("phone", customer.phone.clone()),
                ("balance", money(customer.balance)),
                ("blocked", if customer.blocked { "yes" } else { "no" }.to_string()),
                ("purchases", customer.purchase_count.to_string()),
            ],
        );

        let rows = vec![
            Row {
                id: RowPrefix::CustomerEditName.encode(customer.id),
                title: "Edit name".to_string(),
                description: None,
            },
            Row {
                id: RowPrefix::CustomerEditBalance.encode(customer.id),
                title: "Edit balance".to_string(),
                description: Some("Add or remove credit".to_string()),
            },
            Row {
                id: RowPrefix::CustomerEditToggleBlock.encode(customer.id),
                title: if customer.blocked { "Unblock" } else { "Block" }.to_string(),
                description: None,
            },
            Row {
                id: RowPrefix::CustomerEditBack.encode(customer.id),
                title: "Back".to_string(),
                description: None,
            },
        ];

        let payload = OutboundPayload::List {
            header: Some("Customer".to_string()),
            body: clip_body(&body),
            footer: None,
            button: "Options".to_string(),
            sections: vec![Section { title: None, rows }],
        };

        self.dispatcher
            .send(
                remote,
                payload,
                "customer edit menu delivered",
                "customer edit menu delivery failed",
            )
            .await;
    }

    // ----- shared payloads -----

    async fn send_main_menu(&self, remote: &RemoteId, body: &str) {
        let rows = vec![
            Row {
                id: codec::MENU_CATEGORIES.to_string(),
                title: "Categories".to_string(),
                description: Some("Browse prices and stock".to_string()),
            },
            Row {
                id: codec::MENU_RENAME.to_string(),
                title: "Rename a category".to_string(),
                description: None,
            },
            Row {
                id: codec::MENU_PRICE.to_string(),
                title: "Change a price".to_string(),
                description: None,
            },
            Row {
                id: codec::MENU_SKU.to_string(),
                title: "Change a SKU".to_string(),
                description: None,
            },
            Row {
                id: codec::MENU_CUSTOMER.to_string(),
                title: "Edit a customer".to_string(),
                description: Some("Search by phone number".to_string()),
            },
        ];

        let payload = OutboundPayload::List {
            header: Some("Storefront admin".to_string()),
            body: clip_body(body),
            footer: None,
            button: "Open menu".to_string(),
            sections: vec![Section { title: None, rows }],
        };

        self.dispatcher
            .send(
                remote,
                payload,
                "main menu delivered",
                "main menu delivery failed",
            )
            .await;
    }

    async fn send_prompt(&self, remote: &RemoteId, body: String) {
        let payload = OutboundPayload::Buttons {
            header: None,
            body: clip_body(&body),
            footer: None,
            buttons: vec![ReplyButton {
                id: codec::CANCEL.to_string(),
                title: "Cancel".to_string(),
            }],
        };
        self.dispatcher
            .send(remote, payload, "prompt delivered", "prompt delivery failed")
            .await;
    }

    async fn send_text(&self, remote: &RemoteId, body: String) {
        self.dispatcher
            .send(
                remote,
                OutboundPayload::Text { body },
                "reply delivered",
                "reply delivery failed",
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopwire_core::types::{CategorySummary, InboundEvent};
    use shopwire_test_utils::{MemoryCatalog, MemoryDirectory, MemorySessionStore, MockTransport};

    struct Harness {
        engine: FlowEngine,
        transport: Arc<MockTransport>,
        sessions: Arc<MemorySessionStore>,
        catalog: Arc<MemoryCatalog>,
        customers: Arc<MemoryDirectory>,
    }

    const OWNER: i64 = 1;

    fn remote() -> RemoteId {
        RemoteId("5511987654321".to_string())
    }

    fn selection(id: &str) -> InboundEvent {
        InboundEvent::Selection { id: id.to_string() }
    }

    fn text(body: &str) -> InboundEvent {
        InboundEvent::Text {
            body: body.to_string(),
        }
    }

    async fn harness() -> Harness {
        let transport = Arc::new(MockTransport::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let catalog = Arc::new(MemoryCatalog::new());
        let customers = Arc::new(MemoryDirectory::new());

        catalog
            .insert(
                OWNER,
                CategorySummary {
                    id: 42,
                    name: "Old Name".to_string(),
                    price: 10.0,
                    sku: Some("OLD42".to_string()),
                    stock_count: 5,
                },
            )
            .await;
        customers
            .insert(
                OWNER,
                CustomerSummary {
                    id: 7,
                    name: "Ana".to_string(),
                    phone: "5511988887777".to_string(),
                    balance: 3.0,
                    blocked: false,
                    purchase_count: 2,
                },
            )
            .await;

        let engine = FlowEngine::new(
            sessions.clone(),
            catalog.clone(),
            customers.clone(),
            Dispatcher::new(transport.clone()),
        );

        Harness {
            engine,
            transport,
            sessions,
            catalog,
            customers,
        }
    }

    async fn current_flow(h: &Harness) -> Option<FlowState> {
        h.sessions.get(&remote()).await.unwrap().and_then(|s| s.flow)
    }

    #[tokio::test]
    async fn idle_text_opens_main_menu() {
        let h = harness().await;
        h.engine.handle(&remote(), OWNER, text("hi")).await.unwrap();

        assert!(current_flow(&h).await.is_none());
        match h.transport.last_sent().await.unwrap() {
            OutboundPayload::List { sections, .. } => {
                assert_eq!(sections[0].rows.len(), 5);
            }
            other => panic!("expected main menu list, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rename_flow_end_to_end() {
        let h = harness().await;

        // Selecting "rename category 42" enters the input state and prompts.
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryRenameSelect.encode(42)))
            .await
            .unwrap();
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CategoryRenameInput { category_id: 42 })
        );
        assert!(h.transport.last_sent().await.unwrap().body().contains("Old Name"));

        // Free text completes the mutation, clears the flow, confirms from
        // the updated record.
        h.engine.handle(&remote(), OWNER, text("New Name")).await.unwrap();
        assert!(current_flow(&h).await.is_none());

        let renamed = h.catalog.get_category(OWNER, 42).await.unwrap().unwrap();
        assert_eq!(renamed.name, "New Name");
        assert!(h.transport.last_sent().await.unwrap().body().contains("New Name"));
    }

    #[tokio::test]
    async fn price_flow_accepts_comma_decimal() {
        let h = harness().await;
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryPriceSelect.encode(42)))
            .await
            .unwrap();
        h.engine.handle(&remote(), OWNER, text("12,50")).await.unwrap();

        let updated = h.catalog.get_category(OWNER, 42).await.unwrap().unwrap();
        assert_eq!(updated.price, 12.5);
        assert!(current_flow(&h).await.is_none());
        assert!(h.transport.last_sent().await.unwrap().body().contains("12.50"));
    }

    #[tokio::test]
    async fn invalid_price_reprompts_in_place() {
        let h = harness().await;
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryPriceSelect.encode(42)))
            .await
            .unwrap();
        h.engine.handle(&remote(), OWNER, text("free")).await.unwrap();

        // Flow unchanged, price unchanged, nudge delivered.
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CategoryPriceInput { category_id: 42 })
        );
        let unchanged = h.catalog.get_category(OWNER, 42).await.unwrap().unwrap();
        assert_eq!(unchanged.price, 10.0);
    }

    #[tokio::test]
    async fn sku_flow_end_to_end() {
        let h = harness().await;
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategorySkuSelect.encode(42)))
            .await
            .unwrap();
        h.engine.handle(&remote(), OWNER, text(" NEW99 ")).await.unwrap();

        let updated = h.catalog.get_category(OWNER, 42).await.unwrap().unwrap();
        assert_eq!(updated.sku.as_deref(), Some("NEW99"));
        assert!(current_flow(&h).await.is_none());
    }

    #[tokio::test]
    async fn unknown_selection_during_input_keeps_state() {
        let h = harness().await;
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryRenameSelect.encode(42)))
            .await
            .unwrap();

        // A stale tap from a different family is not misattributed.
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryPriceSelect.encode(42)))
            .await
            .unwrap();
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CategoryRenameInput { category_id: 42 })
        );
    }

    #[tokio::test]
    async fn cancel_returns_to_idle_from_every_state() {
        let h = harness().await;
        let states = [
            FlowState::CategoryRenameInput { category_id: 42 },
            FlowState::CategoryPriceInput { category_id: 42 },
            FlowState::CategorySkuInput { category_id: 42 },
            FlowState::CustomerLookupInput,
            FlowState::CustomerEditMenu { customer_id: 7 },
            FlowState::CustomerEditNameInput { customer_id: 7 },
            FlowState::CustomerEditBalanceInput { customer_id: 7 },
        ];

        for state in states {
            h.sessions.upsert(&remote(), OWNER).await.unwrap();
            h.sessions.set_flow(&remote(), Some(&state)).await.unwrap();

            h.engine
                .handle(&remote(), OWNER, selection(codec::CANCEL))
                .await
                .unwrap();
            assert!(current_flow(&h).await.is_none(), "stuck in {state:?}");
        }
    }

    #[tokio::test]
    async fn lookup_normalizes_phone_and_advances() {
        let h = harness().await;
        h.engine
            .handle(&remote(), OWNER, selection(codec::MENU_CUSTOMER))
            .await
            .unwrap();
        assert_eq!(current_flow(&h).await, Some(FlowState::CustomerLookupInput));

        h.engine
            .handle(&remote(), OWNER, text("+55 (11) 98888-7777"))
            .await
            .unwrap();
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CustomerEditMenu { customer_id: 7 })
        );
        // The edit menu shows the customer and their balance.
        let menu = h.transport.last_sent().await.unwrap();
        assert!(menu.body().contains("Ana"));
        assert!(menu.body().contains("3.00"));
    }

    #[tokio::test]
    async fn lookup_miss_reprompts_in_place() {
        let h = harness().await;
        h.sessions.upsert(&remote(), OWNER).await.unwrap();
        h.sessions
            .set_flow(&remote(), Some(&FlowState::CustomerLookupInput))
            .await
            .unwrap();

        h.engine
            .handle(&remote(), OWNER, text("5511900000000"))
            .await
            .unwrap();
        assert_eq!(current_flow(&h).await, Some(FlowState::CustomerLookupInput));
    }

    #[tokio::test]
    async fn balance_delta_is_submitted_raw_and_clamped_downstream() {
        let h = harness().await;
        h.sessions.upsert(&remote(), OWNER).await.unwrap();
        h.sessions
            .set_flow(&remote(), Some(&FlowState::CustomerEditBalanceInput { customer_id: 7 }))
            .await
            .unwrap();

        // Balance is 3; the admin sends -5. The engine must hand the raw
        // delta over; the directory is the one that clamps to zero.
        h.engine.handle(&remote(), OWNER, text("-5")).await.unwrap();

        assert_eq!(h.customers.applied_deltas().await, vec![-5.0]);
        let updated = h.customers.get_customer(OWNER, 7).await.unwrap().unwrap();
        assert_eq!(updated.balance, 0.0);
        assert!(current_flow(&h).await.is_none());
        assert!(h.transport.last_sent().await.unwrap().body().contains("0.00"));
    }

    #[tokio::test]
    async fn customer_rename_flow() {
        let h = harness().await;
        h.sessions.upsert(&remote(), OWNER).await.unwrap();
        h.sessions
            .set_flow(&remote(), Some(&FlowState::CustomerEditMenu { customer_id: 7 }))
            .await
            .unwrap();

        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CustomerEditName.encode(7)))
            .await
            .unwrap();
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CustomerEditNameInput { customer_id: 7 })
        );

        h.engine.handle(&remote(), OWNER, text("Ana Maria")).await.unwrap();
        let updated = h.customers.get_customer(OWNER, 7).await.unwrap().unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert!(current_flow(&h).await.is_none());
    }

    #[tokio::test]
    async fn toggle_block_is_single_step() {
        let h = harness().await;
        h.sessions.upsert(&remote(), OWNER).await.unwrap();
        h.sessions
            .set_flow(&remote(), Some(&FlowState::CustomerEditMenu { customer_id: 7 }))
            .await
            .unwrap();

        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CustomerEditToggleBlock.encode(7)))
            .await
            .unwrap();

        let updated = h.customers.get_customer(OWNER, 7).await.unwrap().unwrap();
        assert!(updated.blocked);
        assert!(current_flow(&h).await.is_none());
    }

    #[tokio::test]
    async fn stale_edit_menu_tap_for_other_customer_is_ignored() {
        let h = harness().await;
        h.sessions.upsert(&remote(), OWNER).await.unwrap();
        h.sessions
            .set_flow(&remote(), Some(&FlowState::CustomerEditMenu { customer_id: 7 }))
            .await
            .unwrap();

        // An id minted for customer 9 must not act on customer 7's menu.
        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CustomerEditToggleBlock.encode(9)))
            .await
            .unwrap();

        let untouched = h.customers.get_customer(OWNER, 7).await.unwrap().unwrap();
        assert!(!untouched.blocked);
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CustomerEditMenu { customer_id: 7 })
        );
    }

    #[tokio::test]
    async fn vanished_target_clears_flow_and_reports() {
        let h = harness().await;
        h.sessions.upsert(&remote(), OWNER).await.unwrap();
        h.sessions
            .set_flow(&remote(), Some(&FlowState::CategoryRenameInput { category_id: 999 }))
            .await
            .unwrap();

        h.engine.handle(&remote(), OWNER, text("Whatever")).await.unwrap();

        assert!(current_flow(&h).await.is_none());
        assert!(
            h.transport
                .last_sent()
                .await
                .unwrap()
                .body()
                .contains("no longer exists")
        );
    }

    #[tokio::test]
    async fn delivery_failure_does_not_roll_back_transition() {
        let h = harness().await;
        h.transport.set_failing(true);

        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryRenameSelect.encode(42)))
            .await
            .unwrap();

        // The prompt was lost, but the flow is committed.
        assert_eq!(
            current_flow(&h).await,
            Some(FlowState::CategoryRenameInput { category_id: 42 })
        );
        assert_eq!(h.transport.sent_count().await, 0);
    }

    #[tokio::test]
    async fn page_jump_keeps_session_idle() {
        let h = harness().await;
        for i in 0..15 {
            h.catalog
                .insert(
                    OWNER,
                    CategorySummary {
                        id: 100 + i,
                        name: format!("Extra {i:02}"),
                        price: 1.0,
                        sku: None,
                        stock_count: 0,
                    },
                )
                .await;
        }

        h.engine
            .handle(&remote(), OWNER, selection(&RowPrefix::CategoryRenamePage.encode(2)))
            .await
            .unwrap();

        assert!(current_flow(&h).await.is_none());
        assert!(h.transport.last_sent().await.unwrap().body().contains("(2/2)"));
    }

    #[tokio::test]
    async fn session_is_created_lazily_on_first_event() {
        let h = harness().await;
        assert!(h.sessions.get(&remote()).await.unwrap().is_none());

        h.engine.handle(&remote(), OWNER, text("hello")).await.unwrap();

        let session = h.sessions.get(&remote()).await.unwrap().unwrap();
        assert_eq!(session.owner_id, OWNER);
        assert!(session.flow.is_none());
    }
}
