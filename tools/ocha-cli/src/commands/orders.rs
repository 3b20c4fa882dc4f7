//! Order commands.

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, TimeDelta, Utc};
use dialoguer::Confirm;
use ocha_sdk::prelude::{Order, OrderId};
use serde_json::json;

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{format_chf, status_badge};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &mut Context) -> Result<()> {
    match args.command.unwrap_or(OrdersCommand::List) {
        OrdersCommand::List => list(ctx).await,
        OrdersCommand::Items { order } => items(ctx, OrderId::new(order)).await,
        OrdersCommand::Active => active(ctx).await,
        OrdersCommand::Place { store, pickup, yes } => place(ctx, store, &pickup, yes).await,
    }
}

async fn refresh(ctx: &mut Context) -> Result<()> {
    ctx.shop.session().require_authenticated()?;
    let spinner = ctx.output.spinner("Loading orders...");
    let result = ctx.shop.orders_mut().fetch_my_orders().await.map(|_| ());
    spinner.finish_and_clear();
    result.map_err(|e| anyhow::anyhow!(e.user_message()))
}

async fn list(ctx: &mut Context) -> Result<()> {
    refresh(ctx).await?;
    let orders = ctx.shop.orders().my_orders();

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    if orders.is_empty() {
        ctx.output.info("No orders yet");
        return Ok(());
    }

    ctx.output.header(&format!("Orders ({})", orders.len()));
    let widths = [10, 14, 26, 12];
    ctx.output
        .table_row(&["ID", "STORE", "PICKUP", "TOTAL"], &widths);
    for order in orders {
        print_order_row(ctx, order, &widths);
    }
    Ok(())
}

async fn active(ctx: &mut Context) -> Result<()> {
    refresh(ctx).await?;
    let active = ctx.shop.orders().active_order();

    if ctx.output.is_json() {
        ctx.output.json(&active);
        return Ok(());
    }

    match active {
        Some(order) => {
            ctx.output.header("Order in progress");
            print_order_detail(ctx, order);
        }
        None => ctx.output.info("No order in progress"),
    }
    Ok(())
}

async fn items(ctx: &mut Context, order_id: OrderId) -> Result<()> {
    ctx.shop.session().require_authenticated()?;
    let items = ctx
        .shop
        .orders()
        .fetch_order_items(&order_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    if items.is_empty() {
        ctx.output.info(&format!("Order {} has no items", order_id));
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order_id));
    let widths = [24, 6, 5, 12];
    ctx.output
        .table_row(&["NAME", "SIZE", "QTY", "SUBTOTAL"], &widths);
    for item in &items {
        ctx.output.table_row(
            &[
                &item.name,
                &item.size,
                &item.quantity.to_string(),
                &format_chf(item.line_total()),
            ],
            &widths,
        );
    }
    Ok(())
}

async fn place(ctx: &mut Context, store: String, pickup: &str, yes: bool) -> Result<()> {
    ctx.shop.session().require_authenticated()?;
    let pickup_time = parse_pickup(pickup, Utc::now())?;
    if ctx.shop.cart().is_empty() {
        bail!("the cart is empty; add items with `ocha cart add`");
    }

    if !ctx.output.is_json() {
        ctx.output.header("Place order");
        ctx.output.kv("store", &store);
        ctx.output.kv("pickup", &pickup_time.to_rfc3339());
        ctx.output
            .kv("items", &ctx.shop.cart().total_quantity().to_string());
        ctx.output
            .kv("total", &ctx.shop.cart().total_money().to_string());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Order not placed");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = ctx.shop.checkout(store, pickup_time).await;
    spinner.finish_and_clear();
    let created = result.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "order": created,
            "active": ctx.shop.orders().active_order(),
        }));
        return Ok(());
    }

    ctx.output.success("Order placed");
    if let Some(err) = ctx.shop.orders().error() {
        ctx.output.warn(&format!("Could not refresh orders: {}", err));
    }
    if let Some(order) = ctx.shop.orders().active_order() {
        print_order_detail(ctx, order);
    }
    Ok(())
}

fn print_order_row(ctx: &Context, order: &Order, widths: &[usize]) {
    let id = order.id.as_ref().map(|i| i.to_string()).unwrap_or_default();
    let store = order
        .store_id
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_default();
    let total = order.total().map(|t| t.to_string()).unwrap_or_default();
    ctx.output.table_row(
        &[
            &id,
            &store,
            order.pickup_time.as_deref().unwrap_or("-"),
            &total,
        ],
        widths,
    );
    ctx.output.list_item(&status_badge(&order.status));
}

fn print_order_detail(ctx: &Context, order: &Order) {
    if let Some(id) = &order.id {
        ctx.output.kv("order", id.as_str());
    }
    ctx.output.kv("status", &status_badge(&order.status));
    if let Some(store) = &order.store_id {
        ctx.output.kv("store", store.as_str());
    }
    if let Some(pickup) = &order.pickup_time {
        ctx.output.kv("pickup", pickup);
    }
    if let Some(total) = order.total() {
        ctx.output.kv("total", &total.to_string());
    }
}

/// Parse `+<minutes>` relative to `now`, or an RFC 3339 timestamp.
fn parse_pickup(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Some(minutes) = input.strip_prefix('+') {
        let minutes: i64 = minutes
            .parse()
            .with_context(|| format!("invalid pickup offset: {}", input))?;
        return TimeDelta::try_minutes(minutes)
            .and_then(|offset| now.checked_add_signed(offset))
            .with_context(|| format!("pickup offset out of range: {}", input));
    }

    let parsed = DateTime::parse_from_rfc3339(input)
        .with_context(|| format!("invalid pickup time (expected RFC 3339 or +minutes): {}", input))?;
    Ok(parsed.with_timezone(&Utc))
}
