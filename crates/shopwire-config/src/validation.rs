// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and
//! digits-only admin phone numbers.

use crate::diagnostic::ConfigError;
use crate::model::ShopwireConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShopwireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !config.whatsapp.api_base.starts_with("http://")
        && !config.whatsapp.api_base.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "whatsapp.api_base must be an http(s) URL, got `{}`",
                config.whatsapp.api_base
            ),
        });
    }

    for (i, admin) in config.whatsapp.admins.iter().enumerate() {
        if admin.phone.is_empty() || !admin.phone.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "whatsapp.admins[{i}].phone must be digits only, got `{}`",
                    admin.phone
                ),
            });
        }
        if admin.owner_id <= 0 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "whatsapp.admins[{i}].owner_id must be positive, got {}",
                    admin.owner_id
                ),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
