//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use shelf_cache::{Cache, CartSession, SessionId};
use shelf_client::ApiClient;
use shelf_commerce::ids::UserId;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// API URL given on the command line or in `SHELF_API_URL`.
    api_url_override: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        api_url_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
            api_url_override,
        })
    }

    /// Context with a fixed config, bypassing file discovery.
    #[cfg(test)]
    pub(crate) fn with_config(
        config: CliConfig,
        output: Output,
        api_url_override: Option<String>,
    ) -> Self {
        Self {
            config,
            output,
            cwd: PathBuf::from("."),
            api_url_override,
        }
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// The API base URL in effect.
    pub fn api_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .unwrap_or(&self.config.api.url)
    }

    /// Client for the storefront API.
    pub fn client(&self) -> Result<ApiClient> {
        self.output.debug(&format!("API: {}", self.api_url()));
        ApiClient::new(self.api_url()).context("Invalid API URL")
    }

    /// Directory holding the persisted cart.
    pub fn data_dir(&self) -> PathBuf {
        self.config
            .cart
            .data_dir
            .clone()
            .unwrap_or_else(|| dirs_path().join("shelf"))
    }

    /// Open the configured cart session.
    pub fn cart(&self) -> Result<CartSession> {
        let dir = self.data_dir();
        self.output.debug(&format!("Cart storage: {}", dir.display()));
        let cache = Cache::open_dir(&dir).context("Failed to open cart storage")?;
        Ok(CartSession::open(
            cache,
            SessionId::new(self.config.cart.session.as_str()),
        ))
    }

    /// The account orders are placed for.
    pub fn user_id(&self) -> Result<UserId> {
        match self.config.checkout.user_id {
            0 => bail!("checkout.user_id must be a positive integer"),
            id => Ok(UserId::new(id)),
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_commerce::catalog::{NewProduct, ProductType};
    use shelf_commerce::ids::{CategoryId, ProductId};
    use shelf_commerce::Money;

    fn context(config: CliConfig, api_url_override: Option<String>) -> Context {
        Context::with_config(config, Output::new(false, true), api_url_override)
    }

    #[test]
    fn test_api_url_override_wins() {
        let ctx = context(CliConfig::default(), None);
        assert_eq!(ctx.api_url(), shelf_client::DEFAULT_API_URL);

        let ctx = context(CliConfig::default(), Some("http://shop:9000".to_string()));
        assert_eq!(ctx.api_url(), "http://shop:9000");
        assert_eq!(ctx.client().unwrap().base_url(), "http://shop:9000");
    }

    #[test]
    fn test_cart_uses_configured_dir_and_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.cart.data_dir = Some(dir.path().to_path_buf());
        config.cart.session = "work".to_string();
        let ctx = context(config, None);

        let product = NewProduct {
            name: "Book".to_string(),
            slug: "book".to_string(),
            description: String::new(),
            price: Money::from_cents(8900),
            image_url: String::new(),
            category_id: CategoryId::new(1),
            product_type: ProductType::Ebook,
            is_bestseller: false,
            is_featured: false,
        }
        .with_id(ProductId::new(1));
        ctx.cart().unwrap().add_item(&product, 2).unwrap();

        assert!(dir.path().join("cart:work.json").is_file());
        assert_eq!(ctx.cart().unwrap().item_count(), 2);
    }

    #[test]
    fn test_zero_user_id_is_rejected() {
        let mut config = CliConfig::default();
        config.checkout.user_id = 0;
        assert!(context(config, None).user_id().is_err());
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("shelf.toml"),
            "[api]\nurl = \"http://found:1234\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.api.url, "http://found:1234");
    }
}
