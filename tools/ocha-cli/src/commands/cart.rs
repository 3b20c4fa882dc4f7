//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use ocha_sdk::prelude::{NewCartLine, ProductId};
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::format_chf;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &mut Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx),
        CartCommand::Add {
            product,
            size,
            quantity,
            price,
            name,
        } => add(ctx, product, size, quantity, price, name).await,
        CartCommand::Remove { product, size } => {
            ctx.shop
                .cart_mut()
                .remove_item(&ProductId::new(product), &size)?;
            show(ctx)
        }
        CartCommand::Set {
            product,
            quantity,
            size,
        } => {
            let id = ProductId::new(product);
            if ctx.shop.cart().get(&id, &size).is_none() {
                ctx.output.warn(&format!("{} ({}) is not in the cart", id, size));
            }
            ctx.shop.cart_mut().set_quantity(&id, &size, quantity)?;
            show(ctx)
        }
        CartCommand::Clear { yes } => clear(ctx, yes),
    }
}

async fn add(
    ctx: &mut Context,
    product: String,
    size: Option<String>,
    quantity: u32,
    price: Option<f64>,
    name: Option<String>,
) -> Result<()> {
    if product.trim().is_empty() {
        bail!("product id must not be empty");
    }
    let id = ProductId::new(product);

    let mut line = if price.is_some() {
        NewCartLine::new(id.clone())
    } else {
        catalog_line(ctx, &id).await?
    };
    if let Some(size) = size {
        line = line.size(size);
    }
    if let Some(price) = price {
        line = line.unit_price(price);
    }
    if let Some(name) = name {
        line = line.name(name);
    }
    line = line.quantity(quantity);

    ctx.shop.cart_mut().add_item(line)?;
    ctx.output.success(&format!("Added {} x {}", quantity.max(1), id));
    show(ctx)
}

/// Build a cart item from the catalog entry for `id`.
async fn catalog_line(ctx: &mut Context, id: &ProductId) -> Result<NewCartLine> {
    ctx.output.debug("No price given; looking up the catalog");
    ctx.shop.catalog_mut().fetch_products().await?;
    match ctx.shop.catalog().product(id) {
        Some(product) => Ok(product.to_cart_line(None, 1)),
        None => bail!("unknown product {}; pass --price to add it anyway", id),
    }
}

fn clear(ctx: &mut Context, yes: bool) -> Result<()> {
    if ctx.shop.cart().is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from the cart?")
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    ctx.shop.cart_mut().clear()?;
    ctx.output.success("Cart cleared");
    show(ctx)
}

fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.shop.cart();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items(),
            "totalQuantity": cart.total_quantity(),
            "totalAmount": cart.total_money().to_decimal(),
        }));
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    ctx.output.header("Cart");
    let widths = [16, 24, 6, 5, 12];
    ctx.output
        .table_row(&["ID", "NAME", "SIZE", "QTY", "SUBTOTAL"], &widths);
    for line in cart.items() {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &line.size,
                &line.quantity.to_string(),
                &format_chf(line.line_total()),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("items", &cart.total_quantity().to_string());
    ctx.output.kv("total", &cart.total_money().to_string());
    Ok(())
}
