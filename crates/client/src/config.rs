//! Client configuration

use std::env;

use crate::routing::DEFAULT_ADMIN_PATH;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    // Routing
    pub admin_path: String,

    // Identity storage keys
    pub user_storage_key: String,
    pub anonymous_id_storage_key: String,

    // API paths
    pub logs_path: String,
    pub price_plans_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
            user_storage_key: "user".to_string(),
            anonymous_id_storage_key: "tempUserId".to_string(),
            logs_path: "/logs".to_string(),
            price_plans_path: "/price-plans".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            // Routing
            admin_path: path_var("TENANTWEB_ADMIN_PATH", defaults.admin_path)?,

            // Identity storage keys
            user_storage_key: key_var("TENANTWEB_USER_STORAGE_KEY", defaults.user_storage_key)?,
            anonymous_id_storage_key: key_var(
                "TENANTWEB_ANON_ID_STORAGE_KEY",
                defaults.anonymous_id_storage_key,
            )?,

            // API paths
            logs_path: path_var("TENANTWEB_LOGS_PATH", defaults.logs_path)?,
            price_plans_path: path_var("TENANTWEB_PRICE_PLANS_PATH", defaults.price_plans_path)?,
        })
    }
}

/// Read a URL path, which must be absolute
fn path_var(name: &'static str, default: String) -> Result<String, ConfigError> {
    let value = env::var(name).unwrap_or(default);
    if !value.starts_with('/') {
        return Err(ConfigError::Invalid(name, "must start with '/'"));
    }
    Ok(value)
}

/// Read a storage key, which must not be blank
fn key_var(name: &'static str, default: String) -> Result<String, ConfigError> {
    let value = env::var(name).unwrap_or(default);
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(name, "must not be empty"));
    }
    Ok(value)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
