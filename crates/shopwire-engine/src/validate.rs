// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text validators for flow input.
//!
//! Each returns the cleaned value on success and `None` on rejection;
//! the engine re-prompts in place on `None` without touching the flow.

/// Upper bound for category and customer names.
pub const NAME_MAX: usize = 60;
/// Upper bound for SKUs.
pub const SKU_MAX: usize = 32;

/// Category name: trimmed, non-empty, length-bounded.
pub fn category_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().count() > NAME_MAX {
        return None;
    }
    Some(trimmed.to_string())
}

/// Customer display name: trimmed, at least two characters, length-bounded.
pub fn customer_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let len = trimmed.chars().count();
    if len < 2 || len > NAME_MAX {
        return None;
    }
    Some(trimmed.to_string())
}

/// Price: decimal with comma or dot as the fractional separator,
/// strictly positive and finite.
pub fn price(input: &str) -> Option<f64> {
    let parsed = parse_decimal(input)?;
    if parsed > 0.0 { Some(parsed) } else { None }
}

/// SKU: alphanumeric, length-bounded.
pub fn sku(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > SKU_MAX {
        return None;
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Signed balance delta: `+10`, `-5`, or `0` for a no-op. Comma or dot
/// decimals accepted. The result is the raw delta; clamping a negative
/// outcome is the persistence layer's job, not ours.
pub fn balance_delta(input: &str) -> Option<f64> {
    parse_decimal(input)
}

/// Parse a decimal accepting both `,` and `.` as the fractional
/// separator, rejecting anything non-finite (including `inf`/`nan`
/// spellings, which `f64::from_str` would otherwise accept).
fn parse_decimal(input: &str) -> Option<f64> {
    let cleaned = input.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '+' || c == '-')
    {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
