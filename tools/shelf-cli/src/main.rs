//! Shelf CLI - Command line storefront for digital goods.
//!
//! Commands:
//! - `shelf categories` - List categories
//! - `shelf products` - Browse products
//! - `shelf product` - Show one product
//! - `shelf reviews` - Read or add product reviews
//! - `shelf cart` - Manage the cart
//! - `shelf checkout` - Place an order from the cart
//! - `shelf orders` - Track orders
//! - `shelf config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CartArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductArgs, ProductsArgs, ReviewsArgs,
};

/// Shelf CLI - Browse and buy digital goods from the terminal
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storefront API URL
    #[arg(long, global = true, env = "SHELF_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories,

    /// Browse products
    Products(ProductsArgs),

    /// Show a product
    Product(ProductArgs),

    /// Read a product's reviews, or add one
    Reviews(ReviewsArgs),

    /// Manage your cart
    Cart(CartArgs),

    /// Place an order for the items in your cart
    Checkout(CheckoutArgs),

    /// Track your orders
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Route library logs to stderr; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, cli.api_url, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Product(args) => commands::catalog::product(args, &ctx).await,
        Commands::Reviews(args) => commands::catalog::reviews(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shelf_commerce::catalog::{PriceBand, ProductType, SortOption};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_set() {
        let cli = Cli::parse_from(["shelf", "--json", "cart", "set", "7", "3"]);
        assert!(cli.json);
        match cli.command {
            Commands::Cart(CartArgs {
                command: Some(commands::CartCommand::Set {
                    product_id,
                    quantity,
                }),
            }) => {
                assert_eq!(product_id.get(), 7);
                assert_eq!(quantity, 3);
            }
            _ => panic!("expected cart set"),
        }
    }

    #[test]
    fn test_non_numeric_order_id_is_rejected() {
        assert!(Cli::try_parse_from(["shelf", "orders", "show", "abc"]).is_err());
    }

    #[test]
    fn test_parse_product_list_filter() {
        let cli = Cli::parse_from([
            "shelf", "products", "--type", "template", "--price", "100to200", "--sort",
            "price-low",
        ]);
        let Commands::Products(args) = cli.command else {
            panic!("expected products");
        };
        let filter = args.filter();
        assert_eq!(filter.product_type, Some(ProductType::Template));
        assert_eq!(filter.price, Some(PriceBand::From100To200));
        assert_eq!(filter.sort, Some(SortOption::PriceLow));
    }

    #[test]
    fn test_unknown_filter_values_are_rejected() {
        assert!(Cli::try_parse_from(["shelf", "products", "--price", "cheap"]).is_err());
        assert!(Cli::try_parse_from(["shelf", "products", "--type", "course"]).is_err());
        assert!(Cli::try_parse_from(["shelf", "products", "--sort", "oldest"]).is_err());
    }

    #[test]
    fn test_featured_conflicts_with_bestsellers() {
        assert!(Cli::try_parse_from(["shelf", "products", "--featured", "--bestsellers"]).is_err());
    }
}
