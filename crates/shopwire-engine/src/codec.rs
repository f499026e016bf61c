// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row/button id codec.
//!
//! Every selectable UI element carries an opaque string id: a short prefix
//! naming the action family followed by a decimal integer (a category id,
//! customer id, or page number). Decoding is always attempted against the
//! specific prefix expected for the current session state, never by
//! scanning all known prefixes, so a stale tap from a previous flow
//! cannot be misattributed to the current one.

/// Fixed id of the generic cancel button, valid in every non-idle state.
pub const CANCEL: &str = "flow:cancel";

/// Fixed ids of the top-level menu rows.
pub const MENU_CATEGORIES: &str = "menu:categories";
pub const MENU_RENAME: &str = "menu:rename";
pub const MENU_PRICE: &str = "menu:price";
pub const MENU_SKU: &str = "menu:sku";
pub const MENU_CUSTOMER: &str = "menu:customer";
/// Fixed id of the "back to menu" trailing row on selection lists.
pub const MENU_BACK: &str = "menu:back";

/// One prefix per action family. No prefix is a prefix of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPrefix {
    /// Pick a category to rename.
    CategoryRenameSelect,
    /// Jump to a page of the rename-selection list.
    CategoryRenamePage,
    /// Pick a category to reprice.
    CategoryPriceSelect,
    /// Jump to a page of the price-selection list.
    CategoryPricePage,
    /// Pick a category to re-SKU.
    CategorySkuSelect,
    /// Jump to a page of the SKU-selection list.
    CategorySkuPage,
    /// Open a category's read-only detail.
    CategoryListRow,
    /// Jump to a page of the plain category listing.
    CategoryListPage,
    /// Start editing a customer's name.
    CustomerEditName,
    /// Start editing a customer's balance.
    CustomerEditBalance,
    /// Toggle a customer's block flag.
    CustomerEditToggleBlock,
    /// Leave the customer edit menu.
    CustomerEditBack,
}

impl RowPrefix {
    /// The literal prefix string for this action family.
    pub fn as_str(self) -> &'static str {
        match self {
            RowPrefix::CategoryRenameSelect => "crs:",
            RowPrefix::CategoryRenamePage => "crp:",
            RowPrefix::CategoryPriceSelect => "cps:",
            RowPrefix::CategoryPricePage => "cpp:",
            RowPrefix::CategorySkuSelect => "css:",
            RowPrefix::CategorySkuPage => "csp:",
            RowPrefix::CategoryListRow => "clr:",
            RowPrefix::CategoryListPage => "clp:",
            RowPrefix::CustomerEditName => "uen:",
            RowPrefix::CustomerEditBalance => "ueb:",
            RowPrefix::CustomerEditToggleBlock => "uet:",
            RowPrefix::CustomerEditBack => "ubk:",
        }
    }

    /// Tag a numeric id with this action family.
    pub fn encode(self, id: i64) -> String {
        format!("{}{id}", self.as_str())
    }

    /// Strip this family's prefix and parse the remainder as an integer.
    ///
    /// Returns `None` when the candidate does not start with the exact
    /// prefix or the remainder is not a plain decimal integer.
    pub fn decode(self, candidate: &str) -> Option<i64> {
        let rest = candidate.strip_prefix(self.as_str())?;
        if rest.is_empty() {
            return None;
        }
        rest.parse::<i64>().ok()
    }
}

/// All prefixes, for exhaustive property checks.
pub const ALL_PREFIXES: [RowPrefix; 12] = [
    RowPrefix::CategoryRenameSelect,
    RowPrefix::CategoryRenamePage,
    RowPrefix::CategoryPriceSelect,
    RowPrefix::CategoryPricePage,
    RowPrefix::CategorySkuSelect,
    RowPrefix::CategorySkuPage,
    RowPrefix::CategoryListRow,
    RowPrefix::CategoryListPage,
    RowPrefix::CustomerEditName,
    RowPrefix::CustomerEditBalance,
    RowPrefix::CustomerEditToggleBlock,
    RowPrefix::CustomerEditBack,
];
