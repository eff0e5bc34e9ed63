//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use rocket_cart::DEFAULT_CART_KEY;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["rocket.toml", ".rocket.toml", "rocket.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RocketConfig {
    /// Product and stock lookup.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local cart persistence.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl RocketConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Lookup service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `products/{id}` and `stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Serve lookups from a local `db.json` instead of `base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            catalog_file: None,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file, relative to the config file's directory.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_path() -> String {
    ".rocket/storage.json".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            cart_key: default_cart_key(),
        }
    }
}

/// Generate a default rocket.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# RocketCart CLI configuration

[api]
base_url = "{base_url}"
# timeout_secs = 10
# catalog_file = "db.json"

[storage]
path = "{path}"
cart_key = "{cart_key}"
"#,
        base_url = default_base_url(),
        path = default_storage_path(),
        cart_key = DEFAULT_CART_KEY,
    )
}
