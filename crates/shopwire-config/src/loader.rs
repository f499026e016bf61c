// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shopwire.toml` > `~/.config/shopwire/shopwire.toml`
//! > `/etc/shopwire/shopwire.toml` with environment variable overrides via the
//! `SHOPWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShopwireConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shopwire/shopwire.toml` (system-wide)
/// 3. `~/.config/shopwire/shopwire.toml` (user XDG config)
/// 4. `./shopwire.toml` (local directory)
/// 5. `SHOPWIRE_*` environment variables
pub fn load_config() -> Result<ShopwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShopwireConfig::default()))
        .merge(Toml::file("/etc/shopwire/shopwire.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("shopwire/shopwire.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("shopwire.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ShopwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShopwireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShopwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShopwireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SHOPWIRE_WHATSAPP_ACCESS_TOKEN` must map
/// to `whatsapp.access_token`, not `whatsapp.access.token`.
fn env_provider() -> Env {
    Env::prefixed("SHOPWIRE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: SHOPWIRE_WHATSAPP_ACCESS_TOKEN -> "whatsapp_access_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("whatsapp_", "whatsapp.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
