//! Client core for the brand catalog API.
//!
//! # Overview
//! Turns raw API responses into validated `Brand` values or a classified
//! `ApiError`, so malformed upstream data never reaches the UI unnoticed.
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern); `fetch_*` wraps both halves
//! around a `Transport` when the caller does not drive I/O itself.
//!
//! # Design
//! - `BrandClient` is stateless: it holds only the base URL it was built with.
//! - One request per operation, no retries, no caching.
//! - Every `ApiError` displays a message fit for the user; `ApiError::kind()`
//!   is what callers branch on.
//! - `screen` models the loading / loaded / empty / failed lifecycle that list
//!   and detail screens go through.

pub mod brand;
pub mod client;
pub mod error;
pub mod http;
pub mod screen;
pub mod transport;

pub use brand::Brand;
pub use client::{classify_transport_error, BrandClient};
pub use error::{ApiError, ConfigError, ErrorKind, NETWORK_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use screen::{BrandDetailScreen, BrandListScreen, LoadState, LoadTicket, Screen};
pub use transport::{Transport, TransportError, TransportErrorKind};

#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
