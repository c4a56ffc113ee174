//! C-ABI wrapper around `brand-core`.
//!
//! # Overview
//! Lets a native mobile host build brand API requests, execute them with its
//! own HTTP stack, and hand the responses back for validation. The host never
//! parses JSON itself; it receives validated brands or an error message ready
//! to display.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror the core API 1:1. `brand_transport_failure`
//!   classifies a failed round-trip the same way the core's `fetch_*` does.
//! - One `FfiBrandResult` envelope with `FfiDataTag` + `void* data` conveys
//!   payloads and errors uniformly.
//! - The caller owns all returned pointers and must release them with the
//!   matching `brand_free_*` function.

pub mod types;

use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use brand_core::{ApiError, HttpResponse, TransportError};

use types::*;

/// Borrow a C string as UTF-8, replacing invalid sequences with U+FFFD.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn read_c_str<'a>(s: *const c_char) -> Cow<'a, str> {
    unsafe { CStr::from_ptr(s) }.to_string_lossy()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a `BrandClient` bound to `base_url` (e.g. `https://host/api/v1`).
///
/// Returns null if `base_url` is null or not an absolute http(s) URL.
/// The caller must free the returned pointer with `brand_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn brand_client_new(base_url: *const c_char) -> *mut FfiBrandClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_c_str(base_url) };
        match brand_core::BrandClient::new(&url) {
            Ok(client) => Box::into_raw(Box::new(FfiBrandClient { inner: client })),
            Err(e) => {
                tracing::warn!("{e}");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `brand_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn brand_client_free(client: *mut FfiBrandClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for listing all brands.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `brand_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn brand_build_list_brands(client: *const FfiBrandClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_brands())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for one brand.
///
/// A null or empty `id` yields a `Validation` error result; no request should
/// be sent. On success `data_tag` is `Request` and `data` points to an
/// `FfiHttpRequest` owned by the result (freed with `brand_free_result`).
#[unsafe(no_mangle)]
pub extern "C" fn brand_build_get_brand(
    client: *const FfiBrandClient,
    id: *const c_char,
) -> *mut FfiBrandResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiBrandResult::null_arg("client");
        }
        if id.is_null() {
            return FfiBrandResult::from_error(ApiError::InvalidId);
        }
        let client = unsafe { &*client };
        let id = unsafe { read_c_str(id) };
        match client.inner.build_get_brand(&id) {
            Ok(req) => FfiBrandResult::ok_request(req),
            Err(e) => FfiBrandResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiBrandResult::panic("panic in brand_build_get_brand"))
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// A success body must be valid UTF-8; error bodies are only carried along,
/// so they are read lossily.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.body.is_null() {
        return Ok(HttpResponse::new(resp.status, ""));
    }
    let raw = unsafe { CStr::from_ptr(resp.body) };
    let body = match raw.to_str() {
        Ok(body) => Cow::Borrowed(body),
        Err(_) if !(200..300).contains(&resp.status) => raw.to_string_lossy(),
        Err(e) => {
            return Err(ApiError::Deserialization(format!(
                "response body is not valid UTF-8 ({e})"
            )));
        }
    };
    Ok(HttpResponse::new(resp.status, body))
}

/// Validate the response to a list request.
///
/// Returns a result with `data_tag = BrandList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn brand_parse_list_brands(
    client: *const FfiBrandClient,
    response: *const FfiHttpResponse,
) -> *mut FfiBrandResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiBrandResult::null_arg("client");
        }
        if response.is_null() {
            return FfiBrandResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let parsed = ffi_response_to_core(unsafe { &*response })
            .and_then(|resp| client.inner.parse_list_brands(resp));
        match parsed {
            Ok(brands) => FfiBrandResult::ok_brand_list(brands),
            Err(e) => FfiBrandResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiBrandResult::panic("panic in brand_parse_list_brands"))
}

/// Validate the response to a single-brand request. `id` must be the id the
/// request was built for.
///
/// Returns a result with `data_tag = Brand` on success.
#[unsafe(no_mangle)]
pub extern "C" fn brand_parse_get_brand(
    client: *const FfiBrandClient,
    id: *const c_char,
    response: *const FfiHttpResponse,
) -> *mut FfiBrandResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiBrandResult::null_arg("client");
        }
        if id.is_null() {
            return FfiBrandResult::null_arg("id");
        }
        if response.is_null() {
            return FfiBrandResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let id = unsafe { read_c_str(id) };
        let parsed = ffi_response_to_core(unsafe { &*response })
            .and_then(|resp| client.inner.parse_get_brand(&id, resp));
        match parsed {
            Ok(brand) => FfiBrandResult::ok_brand(brand),
            Err(e) => FfiBrandResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiBrandResult::panic("panic in brand_parse_get_brand"))
}

/// Classify a round-trip that failed inside the host's HTTP stack.
///
/// `Resolve` and `Connect` produce a `Network` error with the fixed
/// connectivity message; `Other` produces a `Transport` error carrying
/// `message`. `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn brand_transport_failure(
    kind: FfiTransportErrorKind,
    message: *const c_char,
) -> *mut FfiBrandResult {
    catch_unwind(|| {
        let message = if message.is_null() {
            Cow::Borrowed("")
        } else {
            unsafe { read_c_str(message) }
        };
        let err = TransportError::new(kind.into(), message);
        FfiBrandResult::from_error(brand_core::classify_transport_error(err))
    })
    .unwrap_or_else(|_| FfiBrandResult::panic("panic in brand_transport_failure"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `brand_build_list_brands`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn brand_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free any `FfiBrandResult`, including its payload. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn brand_free_result(result: *mut FfiBrandResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiBrandResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn brand_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { drop_c_string(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
