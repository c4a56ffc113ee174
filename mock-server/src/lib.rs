use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub use axum::http::StatusCode;

/// Prefix every route is served under.
pub const API_PREFIX: &str = "/api/v1";

/// A well-formed brand record, used for the seeded catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Brands served by the mock API.
///
/// Records are kept as raw JSON so tests can serve malformed data. When
/// `forced_status` is set every route answers with that status and an empty
/// body.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    brands: Vec<Value>,
    forced_status: Option<StatusCode>,
}

impl Catalog {
    pub fn new(brands: Vec<Value>) -> Self {
        Self {
            brands,
            forced_status: None,
        }
    }

    pub fn seeded() -> Self {
        let brands = seed_brands()
            .into_iter()
            .filter_map(|b| serde_json::to_value(b).ok())
            .collect();
        Self::new(brands)
    }

    pub fn failing_with(mut self, status: StatusCode) -> Self {
        self.forced_status = Some(status);
        self
    }

    fn find(&self, id: &str) -> Option<&Value> {
        self.brands
            .iter()
            .find(|b| b.get("id").and_then(id_string).as_deref() == Some(id))
    }
}

pub fn seed_brands() -> Vec<Brand> {
    let brand = |id: &str, name: &str, tagline: &str, description: &str| Brand {
        id: id.to_string(),
        name: name.to_string(),
        logo: format!("https://example.com/{}-logo.png", name.to_lowercase()),
        tagline: tagline.to_string(),
        description: Some(description.to_string()),
    };
    vec![
        brand("1", "Apple", "Think Different", "Consumer electronics and software."),
        brand("2", "Google", "Don't be evil", "Search, ads and cloud services."),
        brand("3", "Nike", "Just Do It", "Athletic footwear and apparel."),
    ]
}

pub type Db = Arc<Catalog>;

pub fn app(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    let api = Router::new()
        .route("/brands", get(list_brands))
        .route("/brands/{id}", get(get_brand));
    Router::new().nest(API_PREFIX, api).with_state(db)
}

pub async fn run(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app(catalog)).await
}

async fn list_brands(State(db): State<Db>) -> Response {
    if let Some(status) = db.forced_status {
        return status.into_response();
    }
    tracing::debug!(count = db.brands.len(), "listing brands");
    Json(json!({ "brands": db.brands })).into_response()
}

async fn get_brand(State(db): State<Db>, Path(id): Path<String>) -> Response {
    if let Some(status) = db.forced_status {
        return status.into_response();
    }
    match db.find(&id) {
        Some(brand) => Json(json!({ "brand": brand })).into_response(),
        None => {
            tracing::debug!(%id, "brand not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Ids are compared in string form so numeric ids match their path segment.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
