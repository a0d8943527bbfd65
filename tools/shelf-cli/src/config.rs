//! CLI configuration.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shelf_client::DEFAULT_API_URL;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local cart storage.
    #[serde(default)]
    pub cart: CartConfig,

    /// Checkout defaults.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// API connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront API.
    #[serde(default = "default_api_url")]
    pub url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

/// Where the cart is kept between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Storage directory (default: ~/.local/share/shelf).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Session name; each session has its own cart.
    #[serde(default = "default_session")]
    pub session: String,
}

fn default_session() -> String {
    "default".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            session: default_session(),
        }
    }
}

/// Checkout defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Account orders are placed for.
    #[serde(default = "default_user_id")]
    pub user_id: u64,

    /// Payment method preselected at checkout.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

fn default_user_id() -> u64 {
    shelf_commerce::ids::DEMO_USER_ID.get()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            payment_method: PaymentMethod::default(),
        }
    }
}

/// Payment method chosen at checkout. Recorded for display only; no payment
/// is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Credit,
    Paypal,
    Bank,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "Credit card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Bank => "Bank transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Generate a default config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shelf storefront CLI configuration

[api]
url = "{url}"

[cart]
# data_dir = "/path/to/cart/storage"
session = "default"

[checkout]
user_id = {user_id}
# credit, paypal or bank
payment_method = "credit"
"#,
        url = DEFAULT_API_URL,
        user_id = default_user_id(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            url = "http://shop.internal:8080"

            [checkout]
            payment_method = "paypal"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.url, "http://shop.internal:8080");
        assert_eq!(config.cart.session, "default");
        assert_eq!(config.checkout.user_id, 1);
        assert_eq!(config.checkout.payment_method, PaymentMethod::Paypal);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.json");
        std::fs::write(
            &path,
            r#"{"cart": {"data_dir": "/var/lib/shelf", "session": "work"}}"#,
        )
        .unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.cart.session, "work");
        assert_eq!(config.cart.data_dir, Some(PathBuf::from("/var/lib/shelf")));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.toml");
        assert!(CliConfig::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_payment_method_names() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Credit);
        assert_eq!(PaymentMethod::Bank.to_string(), "Bank transfer");
        assert_eq!(
            PaymentMethod::from_str("paypal", true).unwrap(),
            PaymentMethod::Paypal
        );
    }
}
