//! Place an order from the cart.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;

use super::cart::print_cart;
use super::CheckoutArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the checkout command.
///
/// The cart is only cleared once the order has been created; a failed
/// submission leaves it as it was.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.cart()?;
    if session.is_empty() {
        bail!("Your cart is empty. Add products with `shelf cart add <slug>`.");
    }

    let payment = args.payment.unwrap_or(ctx.config.checkout.payment_method);
    let request = session.to_checkout_request(ctx.user_id()?);
    let client = ctx.client()?;

    // JSON mode prints a single document, the placed order
    if !ctx.output.is_json() {
        ctx.output.step(1, 3, "Reviewing order");
        print_cart(&session, ctx);
        ctx.output.kv("Payment", payment.display_name());
    }

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", request.total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    ctx.output.step(2, 3, "Placing order");
    let spinner = ctx.output.spinner("Submitting order...");
    let placed = client.place_order(&request).await;
    spinner.finish_and_clear();
    let details = placed.context("Failed to place order")?;

    ctx.output.step(3, 3, "Clearing cart");
    if let Err(e) = session.clear() {
        ctx.output
            .warn(&format!("Order placed but the cart could not be cleared: {e}"));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "order": details.order,
            "items": details.items,
            "payment": payment,
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Order #{} placed. Thank you!", details.order.id));
    ctx.output.kv("Status", &status_badge(details.order.status));
    ctx.output.kv("Items", &details.item_count().to_string());
    ctx.output.kv("Total", &details.order.total.display());
    ctx.output.kv("Payment", payment.display_name());
    ctx.output.info("");
    ctx.output.info(&format!(
        "Track it with: shelf orders show {}",
        details.order.id
    ));
    Ok(())
}
