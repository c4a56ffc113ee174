use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, seed_brands, Brand, Catalog};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Deserialize)]
struct ListEnvelope {
    brands: Vec<Brand>,
}

#[derive(Deserialize)]
struct SingleEnvelope {
    brand: Brand,
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_brands_seeded() {
    let resp = app(Catalog::seeded())
        .oneshot(get("/api/v1/brands"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: ListEnvelope = body_json(resp).await;
    assert_eq!(envelope.brands, seed_brands());
}

#[tokio::test]
async fn list_brands_empty_catalog() {
    let resp = app(Catalog::default())
        .oneshot(get("/api/v1/brands"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({ "brands": [] }));
}

#[tokio::test]
async fn list_brands_serves_raw_records_untouched() {
    let raw = vec![json!({"id": 5, "name": "", "extra": [1, 2]})];
    let resp = app(Catalog::new(raw.clone()))
        .oneshot(get("/api/v1/brands"))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body["brands"], Value::Array(raw));
}

#[tokio::test]
async fn list_brands_forced_failure() {
    let resp = app(Catalog::seeded().failing_with(StatusCode::INTERNAL_SERVER_ERROR))
        .oneshot(get("/api/v1/brands"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(resp).await.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_brand_found() {
    let resp = app(Catalog::seeded())
        .oneshot(get("/api/v1/brands/2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: SingleEnvelope = body_json(resp).await;
    assert_eq!(envelope.brand.name, "Google");
}

#[tokio::test]
async fn get_brand_not_found() {
    let resp = app(Catalog::seeded())
        .oneshot(get("/api/v1/brands/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_brand_decodes_percent_encoded_id() {
    let catalog = Catalog::new(vec![json!({
        "id": "a b/c",
        "name": "Spaced",
        "logo": "https://example.com/spaced.png",
        "tagline": "t"
    })]);
    let resp = app(catalog)
        .oneshot(get("/api/v1/brands/a%20b%2Fc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["brand"]["name"], "Spaced");
}

#[tokio::test]
async fn get_brand_forced_failure() {
    let resp = app(Catalog::seeded().failing_with(StatusCode::SERVICE_UNAVAILABLE))
        .oneshot(get("/api/v1/brands/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn routes_outside_prefix_are_not_served() {
    let resp = app(Catalog::seeded())
        .oneshot(get("/brands"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
