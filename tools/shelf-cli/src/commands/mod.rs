//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;

use clap::{Args, Subcommand};
use shelf_commerce::catalog::{PriceBand, ProductFilter, ProductType, SortOption};
use shelf_commerce::ids::{OrderId, ProductId};

use crate::config::PaymentMethod;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products in this category (slug).
    #[arg(long)]
    pub category: Option<String>,

    /// Only featured products.
    #[arg(long, conflicts_with_all = ["bestsellers", "category"])]
    pub featured: bool,

    /// Only bestsellers.
    #[arg(long, conflicts_with = "category")]
    pub bestsellers: bool,

    /// Only this kind of product (ebook, template).
    #[arg(long = "type", value_name = "TYPE")]
    pub product_type: Option<ProductType>,

    /// Price band: under100, 100to200 or over200.
    #[arg(long, value_name = "BAND")]
    pub price: Option<PriceBand>,

    /// Order: newest, price-low, price-high or rating.
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortOption>,
}

impl ProductsArgs {
    /// Type, price and sort options as a list filter.
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            product_type: self.product_type,
            price: self.price,
            sort: self.sort,
        }
    }
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug.
    pub slug: String,
}

/// Arguments for the reviews command.
#[derive(Args)]
pub struct ReviewsArgs {
    /// Product ID.
    pub product_id: ProductId,

    /// Add a review with this rating (1-5).
    #[arg(long)]
    pub rating: Option<i64>,

    /// Comment for the new review.
    #[arg(long, requires = "rating")]
    pub comment: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product slug.
        slug: String,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart.
    Set {
        /// Product ID.
        product_id: ProductId,
        /// New quantity (at least 1).
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Payment method (default from config).
    #[arg(short, long, value_enum)]
    pub payment: Option<PaymentMethod>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders.
    List,
    /// Show an order and its items.
    Show {
        /// Order ID.
        id: OrderId,
    },
    /// Mark an order as completed.
    Complete {
        /// Order ID.
        id: OrderId,
    },
    /// Cancel an order.
    Cancel {
        /// Order ID.
        id: OrderId,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
