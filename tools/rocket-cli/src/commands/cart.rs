//! Cart commands.

use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use rocket_cache::FileStore;
use rocket_cart::{CartContext, CartManager, RecordingNotifier, UpdateProductAmount};
use rocket_commerce::{Cart, Price, ProductId};
use rocket_data::{Catalog, FetchClient, HttpCatalog, StaticCatalog};
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::config::ApiConfig;
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let storage_path = ctx.storage_path();
    ctx.output
        .debug(&format!("Cart storage: {}", storage_path.display()));
    let store = FileStore::open(&storage_path)
        .with_context(|| format!("Failed to open storage: {}", storage_path.display()))?;

    let command = args.command.unwrap_or(CartCommand::Show);

    match &ctx.config.api.catalog_file {
        Some(file) => {
            let path = ctx.resolve_path(file);
            ctx.output.debug(&format!("Catalog file: {}", path.display()));
            let catalog = StaticCatalog::load(&path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
            execute(command, catalog, store, ctx).await
        }
        None => {
            ctx.output
                .debug(&format!("Catalog service: {}", ctx.config.api.base_url));
            execute(command, http_catalog(&ctx.config.api)?, store, ctx).await
        }
    }
}

fn http_catalog(api: &ApiConfig) -> Result<HttpCatalog> {
    let mut builder = FetchClient::builder(&api.base_url);
    if let Some(secs) = api.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder
        .build()
        .with_context(|| format!("Invalid api.base_url: {}", api.base_url))?;
    Ok(HttpCatalog::new(client))
}

async fn execute<C: Catalog>(
    command: CartCommand,
    catalog: C,
    store: FileStore,
    ctx: &Context,
) -> Result<()> {
    let manager = CartManager::load_with_key(catalog, store, &ctx.config.storage.cart_key)?;
    let cart = CartContext::new(manager, RecordingNotifier::new());

    let changed = match command {
        CartCommand::Show => false,
        CartCommand::Add { id } => {
            cart.add_product(ProductId::new(id)).await;
            true
        }
        CartCommand::Remove { id } => {
            cart.remove_product(ProductId::new(id));
            true
        }
        CartCommand::Set { id, amount } => {
            cart.update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(id),
                amount,
            })
            .await;
            true
        }
    };

    if let Some(notice) = cart.notifier().take().first() {
        bail!("{}", notice);
    }
    if changed {
        ctx.output.success("Cart updated");
    }

    show_cart(&cart.cart(), ctx);
    Ok(())
}

#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a Cart,
    item_count: i64,
    subtotal: Price,
}

fn show_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            items: cart,
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        });
        return;
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [6, 40, 6, 12, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for item in cart {
        let id = item.id().to_string();
        let title = truncate(item.product.title(), 40);
        let amount = item.amount.to_string();
        let price = item
            .product
            .price()
            .map(|p| p.display())
            .unwrap_or_else(|| "-".to_string());
        let subtotal = item.subtotal().display();
        ctx.output.table_row(&[&id, &title, &amount, &price, &subtotal], &widths);
    }

    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("subtotal", &cart.subtotal().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_catalog_uses_configured_base() {
        let api = ApiConfig {
            base_url: "http://localhost:3333/".to_string(),
            timeout_secs: Some(2),
            catalog_file: None,
        };
        let catalog = http_catalog(&api).unwrap();
        assert_eq!(catalog.client().url("stock/1"), "http://localhost:3333/stock/1");
    }

    #[test]
    fn test_http_catalog_rejects_bad_base() {
        let api = ApiConfig {
            base_url: "ftp://example.com".to_string(),
            ..ApiConfig::default()
        };
        assert!(http_catalog(&api).is_err());
    }

    #[test]
    fn test_summary_json() {
        let cart = Cart::new();
        let value = serde_json::to_value(CartSummary {
            items: &cart,
            item_count: 0,
            subtotal: Price::ZERO,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "items": [], "item_count": 0, "subtotal": 0 }));
    }
}
