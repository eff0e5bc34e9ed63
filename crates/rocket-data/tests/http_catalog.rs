//! `HttpCatalog` against a local mock of the products/stock API.

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rocket_commerce::{Price, ProductId};
use rocket_data::{Catalog, FetchClient, FetchError, HttpCatalog};
use serde_json::{json, Value};

async fn product(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    match id {
        1 => Ok(Json(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/1.jpg"
        }))),
        // Answers with the wrong record.
        3 => Ok(Json(json!({ "id": 4, "title": "Other", "price": 1, "image": "" }))),
        500 => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn stock(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    match id {
        1 => Ok(Json(json!({ "id": 1, "amount": 3 }))),
        2 => Ok(Json(json!({ "id": 2, "quantity": 3 }))),
        9 => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Json(json!({ "id": 9, "amount": 1 })))
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn serve() -> String {
    let app = Router::new()
        .route("/products/{id}", get(product))
        .route("/stock/{id}", get(stock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_product_lookup() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();

    let product = catalog.product(ProductId::new(1)).await.unwrap().unwrap();
    assert_eq!(product.title(), "Tênis de Caminhada Leve Confortável");
    assert_eq!(product.price(), Some(Price::from_cents(17990)));
}

#[tokio::test]
async fn test_missing_product_is_none() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();
    assert!(catalog.product(ProductId::new(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_mismatched_record_is_none() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();
    assert!(catalog.product(ProductId::new(3)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();
    let err = catalog.product(ProductId::new(500)).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_stock_lookup() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();
    let stock = catalog.stock(ProductId::new(1)).await.unwrap();
    assert_eq!(stock.id, ProductId::new(1));
    assert_eq!(stock.amount, 3);
}

#[tokio::test]
async fn test_missing_stock_is_an_error() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();
    let err = catalog.stock(ProductId::new(8)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_malformed_stock_body() {
    let catalog = HttpCatalog::from_base_url(serve().await).unwrap();
    let err = catalog.stock(ProductId::new(2)).await.unwrap_err();
    assert!(matches!(err, FetchError::Deserialization(_)));
}

#[tokio::test]
async fn test_timeout() {
    let client = FetchClient::builder(serve().await)
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let catalog = HttpCatalog::new(client);
    let err = catalog.stock(ProductId::new(9)).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout(_)));
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let catalog = HttpCatalog::from_base_url(format!("http://{}", addr)).unwrap();
    let err = catalog.product(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Connection(_)));
}
