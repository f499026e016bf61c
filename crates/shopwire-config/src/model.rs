// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Shopwire storefront.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Shopwire configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShopwireConfig {
    /// Webhook server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Messaging platform integration settings.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8466
}

/// Messaging platform (WhatsApp Business Cloud API) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Bearer token for the Cloud API.
    #[serde(default)]
    pub access_token: Option<String>,

    /// The business phone number id messages are sent from.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Shared secret echoed during webhook subscription verification.
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Cloud API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Administrators allowed to drive the conversational dashboard.
    /// Empty list rejects everyone.
    #[serde(default)]
    pub admins: Vec<AdminBinding>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            verify_token: None,
            api_base: default_api_base(),
            admins: Vec::new(),
        }
    }
}

fn default_api_base() -> String {
    "https://graph.facebook.com/v19.0".to_string()
}

/// Binds an administrator's phone number to the tenant they manage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminBinding {
    /// Digits-only phone number of the administrator.
    pub phone: String,

    /// The tenant this administrator's sessions belong to.
    pub owner_id: i64,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "shopwire.db".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ShopwireConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8466);
        assert_eq!(config.storage.database_path, "shopwire.db");
        assert_eq!(config.log.level, "info");
        assert!(config.whatsapp.admins.is_empty());
        assert!(config.whatsapp.access_token.is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = ShopwireConfig::default();
        config.whatsapp.access_token = Some("token".to_string());
        config.whatsapp.phone_number_id = Some("5550001".to_string());
        config.whatsapp.verify_token = Some("secret".to_string());
        config.whatsapp.admins.push(AdminBinding {
            phone: "5511999990000".to_string(),
            owner_id: 1,
        });

        let serialized = toml::to_string(&config).unwrap();
        let parsed: ShopwireConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.whatsapp.admins.len(), 1);
    }
}
