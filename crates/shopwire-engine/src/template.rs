// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt and confirmation templates with token substitution.
//!
//! `render` replaces `{token}` occurrences from an explicit binding list;
//! unknown tokens are left unresolved rather than causing a failure.

/// Replace each `{token}` from `bindings` in `template`.
pub fn render(template: &str, bindings: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (token, value) in bindings {
        out = out.replace(&format!("{{{token}}}"), value);
    }
    out
}

/// Format a monetary amount the way every template shows it.
pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

// Top-level menu.
pub const MAIN_MENU_BODY: &str = "What would you like to manage?";
pub const MAIN_MENU_CANCELLED_BODY: &str = "Okay, cancelled. What would you like to manage?";
pub const MAIN_MENU_UNRECOGNIZED_BODY: &str =
    "Sorry, I didn't understand that. What would you like to manage?";

// Category flow prompts.
pub const CATEGORY_RENAME_PROMPT: &str =
    "Renaming *{category}*.\n\nSend the new name, or tap Cancel.";
pub const CATEGORY_PRICE_PROMPT: &str =
    "Changing the price of *{category}* (currently {price}).\n\nSend the new price, or tap Cancel.";
pub const CATEGORY_SKU_PROMPT: &str =
    "Changing the SKU of *{category}*.\n\nSend the new SKU (letters and digits, up to 32), or tap Cancel.";

// Category confirmations.
pub const CATEGORY_RENAMED: &str = "Done. The category is now called *{category}*.";
pub const CATEGORY_PRICE_UPDATED: &str = "Done. *{category}* now costs {price}.";
pub const CATEGORY_SKU_UPDATED: &str = "Done. *{category}* now has SKU {sku}.";

// Category detail (read-only listing row).
pub const CATEGORY_DETAIL: &str =
    "*{category}*\nPrice: {price}\nSKU: {sku}\nIn stock: {stock}";

// Customer flow prompts.
pub const CUSTOMER_LOOKUP_PROMPT: &str =
    "Send the customer's phone number (digits only is fine), or tap Cancel.";
pub const CUSTOMER_EDIT_BODY: &str =
    "*{name}*\nPhone: {phone}\nBalance: {balance}\nBlocked: {blocked}\nPurchases: {purchases}";
pub const CUSTOMER_NAME_PROMPT: &str =
    "Editing *{name}*.\n\nSend the new display name (at least 2 characters), or tap Cancel.";
pub const CUSTOMER_BALANCE_PROMPT: &str =
    "Editing the balance of *{name}* (currently {balance}).\n\nSend a signed amount like +10, -5 or 0, or tap Cancel.";

// Customer confirmations.
pub const CUSTOMER_RENAMED: &str = "Done. The customer is now called *{name}*.";
pub const CUSTOMER_BALANCE_UPDATED: &str = "Done. *{name}* now has a balance of {balance}.";
pub const CUSTOMER_BLOCKED: &str = "Done. *{name}* is now blocked.";
pub const CUSTOMER_UNBLOCKED: &str = "Done. *{name}* is no longer blocked.";

// Validation nudges: flow stays put, the admin tries again.
pub const INVALID_CATEGORY_NAME: &str =
    "That name won't work: it must be 1 to 60 characters. Try again, or tap Cancel.";
pub const INVALID_PRICE: &str =
    "That doesn't look like a price. Send a positive amount like 9.90 or 9,90, or tap Cancel.";
pub const INVALID_SKU: &str =
    "That SKU won't work: letters and digits only, up to 32 characters. Try again, or tap Cancel.";
pub const INVALID_CUSTOMER_NAME: &str =
    "That name won't work: it must be 2 to 60 characters. Try again, or tap Cancel.";
pub const INVALID_BALANCE: &str =
    "That doesn't look like an amount. Send something like +10, -5 or 0, or tap Cancel.";
pub const CUSTOMER_NOT_FOUND: &str =
    "No customer with that number. Check it and try again, or tap Cancel.";

pub const UNRECOGNIZED_IN_FLOW: &str =
    "Sorry, I didn't understand that. Send the value I asked for, or tap Cancel.";

// Failure notices.
pub const TARGET_GONE: &str =
    "That record no longer exists. Open the menu again for a fresh list.";
pub const EMPTY_CATALOG: &str = "There are no categories yet.";
