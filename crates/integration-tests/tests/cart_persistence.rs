//! Integration tests for cart state across sessions on disk.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use rust_decimal::Decimal;
use wardrobe_core::{Catalog, Destination, LineKey, ProductId, Quantity, ShippingMethod};
use wardrobe_integration_tests::CATALOG_JSON;
use wardrobe_storefront::{FileStore, KeyValueStore, STORAGE_CART_KEY, Storefront};

fn catalog() -> Catalog {
    serde_json::from_str(CATALOG_JSON).unwrap()
}

fn session(path: &Path) -> Storefront<FileStore> {
    Storefront::with_catalog(FileStore::open(path).unwrap(), catalog()).unwrap()
}

#[test]
fn test_cart_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut first = session(&path);
    first
        .add_to_cart(&ProductId::from("1"), "M", "White", Quantity::from(2))
        .unwrap();
    first
        .add_to_cart(&ProductId::from("2"), "S", "Red", Quantity::ONE)
        .unwrap();
    let saved = first.cart().clone();
    drop(first);

    let second = session(&path);
    assert_eq!(second.cart(), &saved);
    assert_eq!(second.cart().len(), 2);
    assert_eq!(second.cart().subtotal(), Decimal::new(16498, 2));
}

#[test]
fn test_persisted_line_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut storefront = session(&path);
    storefront
        .add_to_cart(&ProductId::from("2"), "XS", "Grey", Quantity::from(3))
        .unwrap();

    let raw = FileStore::open(&path)
        .unwrap()
        .get(STORAGE_CART_KEY)
        .unwrap()
        .unwrap();
    let lines: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = lines.get(0).unwrap();
    assert_eq!(line["id"], "2");
    assert_eq!(line["name"], "Wool Sweater");
    assert_eq!(line["size"], "XS");
    assert_eq!(line["color"], "Grey");
    assert_eq!(line["colorHex"], "#808080");
    assert_eq!(line["quantity"], 3);
}

#[test]
fn test_updates_and_removals_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let shirt = LineKey::new(ProductId::from("1"), "S", "White");
    let tee = LineKey::new(ProductId::from("5"), "S", "Grey");

    let mut storefront = session(&path);
    storefront.quick_add(&ProductId::from("1")).unwrap();
    storefront.quick_add(&ProductId::from("5")).unwrap();
    storefront.update_quantity(&shirt, Quantity::from(4)).unwrap();
    storefront.remove_line(&tee).unwrap();
    drop(storefront);

    let restored = session(&path);
    assert_eq!(restored.cart().len(), 1);
    assert_eq!(restored.cart().line(&shirt).unwrap().quantity.get(), 4);
    assert!(restored.cart().line(&tee).is_none());
}

#[test]
fn test_checkout_clears_persisted_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut storefront = session(&path);
    storefront
        .add_to_cart(&ProductId::from("4"), "M", "Red", Quantity::ONE)
        .unwrap();
    let order = storefront
        .checkout(ShippingMethod::Priority, Destination::International)
        .unwrap()
        .unwrap();
    assert_eq!(order.total, Decimal::from(122));
    drop(storefront);

    assert!(session(&path).cart().is_empty());
}

#[test]
fn test_malformed_cart_restores_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut store = FileStore::open(&path).unwrap();
    store
        .set(STORAGE_CART_KEY, "{not a cart".to_string())
        .unwrap();
    drop(store);

    let mut storefront = session(&path);
    assert!(storefront.cart().is_empty());

    storefront.quick_add(&ProductId::from("3")).unwrap();
    assert_eq!(session(&path).cart().len(), 1);
}

#[test]
fn test_lines_for_removed_products_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut storefront = session(&path);
    storefront.quick_add(&ProductId::from("1")).unwrap();
    storefront.quick_add(&ProductId::from("3")).unwrap();
    drop(storefront);

    let smaller: Catalog = Catalog::new(
        catalog()
            .products()
            .iter()
            .filter(|p| p.id.as_str() != "1")
            .cloned()
            .collect(),
    );
    let storefront = Storefront::with_catalog(FileStore::open(&path).unwrap(), smaller.clone())
        .unwrap();
    assert_eq!(storefront.cart().len(), 2);

    let stale = storefront.cart().stale_lines(&smaller);
    assert_eq!(stale.len(), 1);
    assert_eq!(stale.first().unwrap().product_id.as_str(), "1");
}
