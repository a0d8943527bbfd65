//! Cart management.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use shelf_cache::CartSession;
use shelf_commerce::cart::TAX_RATE;
use shelf_commerce::ids::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

const CART_WIDTHS: [usize; 5] = [4, 40, 12, 4, 12];

/// Run the cart command. Without a subcommand the cart is shown.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx),
        CartCommand::Add { slug, quantity } => add(&slug, quantity, ctx).await,
        CartCommand::Remove { product_id } => remove(product_id, ctx),
        CartCommand::Set {
            product_id,
            quantity,
        } => set(product_id, quantity, ctx),
        CartCommand::Clear { yes } => clear(yes, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let session = ctx.cart()?;
    print_cart(&session, ctx);
    Ok(())
}

/// Print the cart lines and the priced totals.
pub fn print_cart(session: &CartSession, ctx: &Context) {
    let cart = session.cart();
    let totals = session.totals();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart,
            "itemCount": session.item_count(),
            "totals": totals,
        }));
        return;
    }

    ctx.output.header("Your cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty. Browse with `shelf products`.");
        return;
    }

    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &CART_WIDTHS);
    for item in &cart.items {
        let id = item.product_id.to_string();
        let name = truncate(&item.product.name, CART_WIDTHS[1]);
        let price = item.unit_price().display();
        let quantity = item.quantity.to_string();
        let line_total = item.line_total().display();
        ctx.output.table_row(
            &[
                id.as_str(),
                name.as_str(),
                price.as_str(),
                quantity.as_str(),
                line_total.as_str(),
            ],
            &CART_WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv(
        &format!("Tax ({:.0}%)", TAX_RATE.as_fraction() * 100.0),
        &totals.tax.display(),
    );
    ctx.output.kv("Total", &totals.total.display());
}

async fn add(slug: &str, quantity: u32, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Looking up product...");
    let product = client.product(slug).await;
    spinner.finish_and_clear();

    let product = product
        .context("Failed to fetch product")?
        .with_context(|| format!("Product not found: {slug}"))?;

    let mut session = ctx.cart()?;
    let new_quantity = session
        .add_item(&product, quantity)
        .context("Failed to save cart")?;

    if ctx.output.is_json() {
        print_cart(&session, ctx);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Added {} to your cart (quantity {})",
        product.name, new_quantity
    ));
    ctx.output
        .kv("Cart total", &session.totals().total.display());
    Ok(())
}

fn remove(product_id: ProductId, ctx: &Context) -> Result<()> {
    let mut session = ctx.cart()?;
    let removed = session
        .remove_item(product_id)
        .context("Failed to save cart")?;

    if ctx.output.is_json() {
        print_cart(&session, ctx);
    } else if removed {
        ctx.output
            .success(&format!("Removed product {product_id} from your cart"));
    } else {
        ctx.output
            .warn(&format!("Product {product_id} is not in your cart"));
    }
    Ok(())
}

fn set(product_id: ProductId, quantity: i64, ctx: &Context) -> Result<()> {
    let mut session = ctx.cart()?;
    session
        .update_quantity(product_id, quantity)
        .with_context(|| format!("Cannot set quantity of product {product_id}"))?;

    if ctx.output.is_json() {
        print_cart(&session, ctx);
        return Ok(());
    }
    ctx.output
        .success(&format!("Quantity of product {product_id} set to {quantity}"));
    ctx.output
        .kv("Cart total", &session.totals().total.display());
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut session = ctx.cart()?;
    if session.is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from your cart?", session.item_count()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    session.clear().context("Failed to save cart")?;
    ctx.output.success("Cart cleared");
    Ok(())
}
