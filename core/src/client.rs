//! Request builder and response validator for the brand API.
//!
//! # Design
//! `BrandClient` holds only the base URL and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that turns an `HttpResponse` into
//! validated `Brand` values. The `fetch_*` methods run both halves around a
//! `Transport` for callers that do not drive the I/O themselves.

use serde_json::Value;
use tracing::{debug, warn};
use url::{Position, Url};

use crate::brand::Brand;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};

/// Stateless client for the brand API.
#[derive(Debug, Clone)]
pub struct BrandClient {
    base_url: Url,
}

impl BrandClient {
    /// `base_url` is the API root, e.g. `https://api.example.com/api/v1`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry path segments"));
        }
        Ok(Self { base_url: parsed })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn build_list_brands(&self) -> HttpRequest {
        get(self.endpoint(&["brands"]))
    }

    /// Fails with `ApiError::InvalidId` when `id` is empty.
    pub fn build_get_brand(&self, id: &str) -> Result<HttpRequest, ApiError> {
        if id.is_empty() {
            warn!("rejected empty brand id");
            return Err(ApiError::InvalidId);
        }
        Ok(get(self.brand_url(id)))
    }

    pub fn parse_list_brands(&self, response: HttpResponse) -> Result<Vec<Brand>, ApiError> {
        if !response.is_success() {
            return Err(http_error(response));
        }
        let body = parse_json(&response.body)?;
        let Some(raw_brands) = body.get("brands").and_then(Value::as_array) else {
            return Err(ApiError::Format {
                expected: "brands array",
            });
        };

        let brands = raw_brands
            .iter()
            .map(Brand::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = brands.len(), "parsed brand list");
        Ok(brands)
    }

    /// `id` is the id the request was built for; it names the brand in a
    /// not-found error.
    pub fn parse_get_brand(&self, id: &str, response: HttpResponse) -> Result<Brand, ApiError> {
        if response.status == 404 {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        if !response.is_success() {
            return Err(http_error(response));
        }
        let body = parse_json(&response.body)?;
        match body.get("brand") {
            Some(Value::Object(raw)) => Brand::from_raw(raw),
            _ => Err(ApiError::Format {
                expected: "brand object",
            }),
        }
    }

    /// Fetch every brand: one GET to `{base}/brands`.
    pub fn fetch_brands<T: Transport>(&self, transport: &T) -> Result<Vec<Brand>, ApiError> {
        let request = self.build_list_brands();
        let response = execute(transport, &request)?;
        self.parse_list_brands(response).inspect_err(log_failure)
    }

    /// Fetch a single brand: one GET to `{base}/brands/{id}`. An empty id
    /// fails before anything is sent.
    pub fn fetch_brand_by_id<T: Transport>(&self, transport: &T, id: &str) -> Result<Brand, ApiError> {
        let request = self.build_get_brand(id)?;
        let response = execute(transport, &request)?;
        self.parse_get_brand(id, response).inspect_err(log_failure)
    }

    /// Base URL plus percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `{base}/brands/{id}`. Path-segment setters drop `.` and `..` and the
    /// parser folds `%2E` back into them, so those two ids are spliced in as
    /// text.
    fn brand_url(&self, id: &str) -> String {
        match id {
            "." | ".." => {
                let url = self.endpoint(&["brands"]);
                let dots = "%2E".repeat(id.len());
                format!(
                    "{}/{dots}{}",
                    &url[..Position::AfterPath],
                    &url[Position::AfterPath..]
                )
            }
            _ => self.endpoint(&["brands", id]).into(),
        }
    }
}

/// Map a transport failure to the client taxonomy.
pub fn classify_transport_error(err: TransportError) -> ApiError {
    if err.kind.is_connectivity() {
        ApiError::Network { cause: err.message }
    } else {
        ApiError::Transport(err.message)
    }
}

fn execute<T: Transport>(transport: &T, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = request.method.as_str(), url = %request.url, "sending brand request");
    transport.execute(request).map_err(|err| {
        warn!(kind = %err.kind, error = %err.message, url = %request.url, "transport failed");
        classify_transport_error(err)
    })
}

fn get(url: impl Into<String>) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url: url.into(),
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

fn http_error(response: HttpResponse) -> ApiError {
    ApiError::Http {
        status: response.status,
        body: response.body,
    }
}

fn parse_json(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn log_failure(err: &ApiError) {
    warn!(kind = ?err.kind(), status = ?err.http_status(), "{err}");
}
