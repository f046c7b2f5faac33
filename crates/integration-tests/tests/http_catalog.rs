//! Cart operations against a mocked products / stock service, persisted to
//! a file slot.
//!
//! Configuration goes through [`CartConfig::from_lookup`] the same way the
//! CLI loads it from the environment.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use mockito::{Matcher, Server, ServerGuard};
use rocketshoes_core::{CurrencyCode, ProductId};
use rocketshoes_storefront::{
    CartConfig, CartContext, CartOutcome, CartStore, CartView, CatalogClient, FileStorage,
    Notice, NoticeLog, UpdateProductAmount,
};
use tempfile::TempDir;

type HttpCart = CartContext<CatalogClient, FileStorage, NoticeLog>;

fn config(server: &ServerGuard, dir: &TempDir) -> CartConfig {
    let vars = HashMap::from([
        ("ROCKETSHOES_API_URL", server.url()),
        ("ROCKETSHOES_STORAGE_DIR", dir.path().display().to_string()),
        ("ROCKETSHOES_HTTP_TIMEOUT_SECS", "5".to_string()),
    ]);
    CartConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn open(config: &CartConfig, notices: &NoticeLog) -> HttpCart {
    CartContext::new(CartStore::load(
        CatalogClient::new(&config.catalog).unwrap(),
        FileStorage::new(&config.storage.dir),
        notices.clone(),
        config.storage.cart_key.clone(),
    ))
}

async fn mock_product(server: &mut ServerGuard, id: i32, price: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/products/{id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"id":{id},"title":"Tênis {id}","price":{price},"image":"https://cdn/{id}.jpg"}}"#
        ))
        .create_async()
        .await
}

async fn mock_stock(server: &mut ServerGuard, id: i32, amount: u32) -> mockito::Mock {
    server
        .mock("GET", format!("/stock/{id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"id":{id},"amount":{amount}}}"#))
        .create_async()
        .await
}

#[tokio::test]
async fn test_add_and_update_against_service() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _product = mock_product(&mut server, 1, "179.9").await;
    let _stock = mock_stock(&mut server, 1, 2).await;

    let config = config(&server, &dir);
    let notices = NoticeLog::new();
    let cart = open(&config, &notices);

    assert!(cart.add_product(ProductId::new(1)).await.is_updated());
    assert!(cart.add_product(ProductId::new(1)).await.is_updated());
    assert_eq!(
        cart.add_product(ProductId::new(1)).await,
        CartOutcome::Rejected(Notice::OutOfStock)
    );
    assert_eq!(
        cart.update_product_amount(UpdateProductAmount {
            product_id: ProductId::new(1),
            amount: 3,
        })
        .await,
        CartOutcome::Rejected(Notice::OutOfStock)
    );

    let view = CartView::new(&cart.cart(), CurrencyCode::BRL);
    assert_eq!(view.item_count, 2);
    assert_eq!(view.total, "R$359.80");
    assert_eq!(notices.notices(), vec![Notice::OutOfStock, Notice::OutOfStock]);
}

#[tokio::test]
async fn test_product_details_fetched_once_stock_every_time() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let product = server
        .mock("GET", "/products/2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":2,"title":"Tênis 2","price":139.9,"image":"https://cdn/2.jpg"}"#)
        .expect(1)
        .create_async()
        .await;
    let stock = server
        .mock("GET", "/stock/2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":2,"amount":10}"#)
        .expect(3)
        .create_async()
        .await;

    let config = config(&server, &dir);
    let cart = open(&config, &NoticeLog::new());

    for _ in 0..3 {
        assert!(cart.add_product(ProductId::new(2)).await.is_updated());
    }

    assert_eq!(cart.cart().get(ProductId::new(2)).unwrap().amount, 3);
    product.assert_async().await;
    stock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_product_is_addition_failure() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _missing = server
        .mock("GET", Matcher::Regex(r"^/products/\d+$".to_string()))
        .with_status(404)
        .create_async()
        .await;

    let config = config(&server, &dir);
    let notices = NoticeLog::new();
    let cart = open(&config, &notices);

    assert_eq!(
        cart.add_product(ProductId::new(42)).await,
        CartOutcome::Rejected(Notice::AdditionFailed)
    );
    assert!(cart.cart().is_empty());
    assert!(!FileStorage::new(dir.path()).slot_path(&config.storage.cart_key).exists());
}

#[tokio::test]
async fn test_stock_service_error_is_quantity_failure() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _product = mock_product(&mut server, 3, "99.5").await;
    let stock = mock_stock(&mut server, 3, 5).await;

    let config = config(&server, &dir);
    let cart = open(&config, &NoticeLog::new());
    assert!(cart.add_product(ProductId::new(3)).await.is_updated());

    stock.remove_async().await;
    let _broken = server
        .mock("GET", "/stock/3")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    assert_eq!(
        cart.update_product_amount(UpdateProductAmount {
            product_id: ProductId::new(3),
            amount: 2,
        })
        .await,
        CartOutcome::Rejected(Notice::QuantityUpdateFailed)
    );
    assert_eq!(cart.cart().get(ProductId::new(3)).unwrap().amount, 1);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _p1 = mock_product(&mut server, 1, "179.9").await;
    let _s1 = mock_stock(&mut server, 1, 5).await;
    let _p2 = mock_product(&mut server, 2, "139.9").await;
    let _s2 = mock_stock(&mut server, 2, 5).await;

    let config = config(&server, &dir);

    let before = {
        let cart = open(&config, &NoticeLog::new());
        let _ = cart.add_product(ProductId::new(1)).await;
        let _ = cart.add_product(ProductId::new(2)).await;
        let _ = cart
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(2),
                amount: 4,
            })
            .await;
        let _ = cart.remove_product(ProductId::new(1)).await;
        cart.cart()
    };

    let slot = FileStorage::new(&config.storage.dir).slot_path(&config.storage.cart_key);
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(slot).unwrap()).unwrap();
    assert_eq!(raw[0]["id"], 2);
    assert_eq!(raw[0]["amount"], 4);

    let reopened = open(&config, &NoticeLog::new());
    assert_eq!(reopened.cart(), before);
    assert_eq!(reopened.cart().item_count(), 4);
}
