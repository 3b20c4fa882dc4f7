//! Catalog listing.

use anyhow::Result;

use crate::context::Context;

/// Run the products command.
pub async fn run(ctx: &mut Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    let result = ctx.shop.catalog_mut().fetch_products().await.map(|p| p.len());
    spinner.finish_and_clear();
    let count = result?;

    let products = ctx.shop.catalog().products();
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if count == 0 {
        ctx.output.info("No products available");
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", count));
    let widths = [16, 28, 12, 12];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "SIZES"], &widths);
    for product in products {
        let sizes = if product.sizes.is_empty() {
            "-".to_string()
        } else {
            product.sizes.join("/")
        };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.price_money().to_string(),
                &sizes,
            ],
            &widths,
        );
    }
    Ok(())
}
