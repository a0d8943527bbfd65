//! Order tracking.

use std::collections::HashMap;

use anyhow::{Context as _, Result};
use chrono::Local;
use dialoguer::Confirm;
use shelf_commerce::checkout::{Order, OrderStatus};
use shelf_commerce::ids::{OrderId, ProductId};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

const ORDER_WIDTHS: [usize; 4] = [6, 18, 12, 12];
const ITEM_WIDTHS: [usize; 4] = [40, 12, 4, 12];

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::List => list(ctx).await,
        OrdersCommand::Show { id } => show(id, ctx).await,
        OrdersCommand::Complete { id } => set_status(id, OrderStatus::Completed, ctx).await,
        OrdersCommand::Cancel { id, yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Cancel order #{id}?"))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Order left unchanged");
                    return Ok(());
                }
            }
            set_status(id, OrderStatus::Cancelled, ctx).await
        }
    }
}

fn placed_at(order: &Order) -> String {
    order
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

async fn list(ctx: &Context) -> Result<()> {
    let user_id = ctx.user_id()?;
    let orders = ctx
        .client()?
        .orders_for_user(user_id)
        .await
        .context("Failed to fetch orders")?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Your orders");
    if orders.is_empty() {
        ctx.output.info("No orders yet");
        return Ok(());
    }

    ctx.output
        .table_row(&["ORDER", "PLACED", "STATUS", "TOTAL"], &ORDER_WIDTHS);
    for order in &orders {
        let id = format!("#{}", order.id);
        let placed = placed_at(order);
        let total = order.total.display();
        // Badge escape codes would break column padding
        ctx.output.table_row(
            &[
                id.as_str(),
                placed.as_str(),
                order.status.display_name(),
                total.as_str(),
            ],
            &ORDER_WIDTHS,
        );
    }
    Ok(())
}

async fn show(id: OrderId, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let details = client
        .order(id)
        .await
        .context("Failed to fetch order")?
        .with_context(|| format!("Order not found: {id}"))?;

    if ctx.output.is_json() {
        ctx.output.json(&details);
        return Ok(());
    }

    // Item names are best effort; ids are shown when the catalog is unavailable
    let names: HashMap<ProductId, String> = match client.products(None).await {
        Ok(products) => products.into_iter().map(|p| (p.id, p.name)).collect(),
        Err(e) => {
            ctx.output.debug(&format!("Could not load product names: {e}"));
            HashMap::new()
        }
    };

    let order = &details.order;
    ctx.output.header(&format!("Order #{}", order.id));
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Placed", &placed_at(order));
    ctx.output.kv("Total", &order.total.display());
    ctx.output.info("");

    ctx.output
        .table_row(&["PRODUCT", "PRICE", "QTY", "TOTAL"], &ITEM_WIDTHS);
    for item in &details.items {
        let name = names
            .get(&item.product_id)
            .map(|name| truncate(name, ITEM_WIDTHS[0]))
            .unwrap_or_else(|| format!("Product {}", item.product_id));
        let price = item.price.display();
        let quantity = item.quantity.to_string();
        let line_total = item.line_total().display();
        ctx.output.table_row(
            &[
                name.as_str(),
                price.as_str(),
                quantity.as_str(),
                line_total.as_str(),
            ],
            &ITEM_WIDTHS,
        );
    }
    Ok(())
}

async fn set_status(id: OrderId, status: OrderStatus, ctx: &Context) -> Result<()> {
    let order = ctx
        .client()?
        .update_order_status(id, status)
        .await
        .with_context(|| format!("Failed to update order #{id}"))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order #{} is now {}",
        order.id,
        status_badge(order.status)
    ));
    Ok(())
}
