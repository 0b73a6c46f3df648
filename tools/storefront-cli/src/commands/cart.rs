//! Cart inspection against a file-backed store.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use storefront_cart::{
    format_price, parse_display_price, CartStore, FileStore, KeyValueStore, LineItem,
};
use storefront_core::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_store(args.store.as_deref())?;
    let store = CartStore::initialize(storage, ctx.config.cart.storage_key.clone());

    match args.command {
        CartCommand::Show => show_cart(&store, ctx),
        CartCommand::Add { id, name, price } => add_item(store, &id, &name, &price, ctx),
        CartCommand::Clear { yes } => clear_cart(store, yes, ctx),
    }
}

#[derive(Serialize)]
struct CartView<'a> {
    store: String,
    count: u32,
    total: f64,
    items: &'a [LineItem],
}

fn show_cart(store: &CartStore<FileStore>, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            store: store.storage().path().display().to_string(),
            count: store.count(),
            total: store.cart().total_price(),
            items: store.items(),
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output
        .kv("Store", &store.storage().path().display().to_string());

    if store.items().is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    let widths = [14, 28, 5, 12];
    ctx.output.info("");
    ctx.output.table_row(&["ID", "NAME", "QTY", "SUBTOTAL"], &widths);
    for item in store.items() {
        let quantity = item.quantity.to_string();
        let subtotal = format_price(item.subtotal());
        ctx.output.table_row(
            &[
                item.id.as_str(),
                item.name.as_str(),
                quantity.as_str(),
                subtotal.as_str(),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Items", &store.count().to_string());
    ctx.output.kv("Total", &format_price(store.cart().total_price()));

    Ok(())
}

fn add_item(
    mut store: CartStore<FileStore>,
    id: &str,
    name: &str,
    price: &str,
    ctx: &Context,
) -> Result<()> {
    let Some(unit_price) = parse_display_price(price) else {
        bail!("Not a price: {:?}", price);
    };

    let added = store
        .add_item(ProductId::new(id), name, unit_price)
        .with_context(|| format!("Rejected price for {}", id))?;

    if !added.persisted {
        bail!(
            "Cart updated in memory but could not be written to {}",
            store.storage().path().display()
        );
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "id": id,
            "quantity": added.quantity,
            "count": added.count,
        }));
    } else {
        ctx.output.success(&format!("{} added to cart!", added.name));
        ctx.output.kv("Quantity", &added.quantity.to_string());
        ctx.output.kv("Cart count", &added.count.to_string());
    }

    Ok(())
}

fn clear_cart(store: CartStore<FileStore>, yes: bool, ctx: &Context) -> Result<()> {
    if store.items().is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} item(s) from the cart?", store.count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    let key = store.key().to_string();
    let mut storage = store.into_storage();
    storage
        .delete(&key)
        .with_context(|| format!("Failed to clear {}", storage.path().display()))?;

    ctx.output.success("Cart cleared");
    Ok(())
}
