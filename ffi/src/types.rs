//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use brand_core::{ApiError, Brand, ErrorKind, HttpMethod, HttpRequest};

/// Opaque handle to a `BrandClient`.
pub struct FfiBrandClient {
    pub(crate) inner: brand_core::BrandClient,
}

/// Owned C string from Rust text. Interior NULs are dropped rather than
/// failing the conversion.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

/// Free a string produced by `to_c_string`. Null is ignored.
///
/// # Safety
/// `s` must be null or come from `to_c_string` and not be freed yet.
pub(crate) unsafe fn drop_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request the host must execute, then hand the response to the
/// matching `brand_parse_*` function.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: usize,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len();
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(req.url),
            headers,
            headers_len,
        }))
    }

    /// # Safety
    /// `req` must come from `from_core` and not be freed yet.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        unsafe { drop_c_string(req.url) };
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len,
                ))
            };
            for h in headers.iter() {
                unsafe {
                    drop_c_string(h.key);
                    drop_c_string(h.value);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response the host received. The FFI layer reads but does not free
/// these fields. A null `body` is treated as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// How the host's own HTTP stack failed.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiTransportErrorKind {
    Resolve = 0,
    Connect = 1,
    Other = 2,
}

impl From<FfiTransportErrorKind> for brand_core::TransportErrorKind {
    fn from(kind: FfiTransportErrorKind) -> Self {
        match kind {
            FfiTransportErrorKind::Resolve => brand_core::TransportErrorKind::Resolve,
            FfiTransportErrorKind::Connect => brand_core::TransportErrorKind::Connect,
            FfiTransportErrorKind::Other => brand_core::TransportErrorKind::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Validation = 1,
    Network = 2,
    Transport = 3,
    Http = 4,
    NotFound = 5,
    Format = 6,
    Data = 7,
    Panic = 8,
    NullArg = 9,
}

impl From<ErrorKind> for FfiErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => FfiErrorCode::Validation,
            ErrorKind::Network => FfiErrorCode::Network,
            ErrorKind::Transport => FfiErrorCode::Transport,
            ErrorKind::Http => FfiErrorCode::Http,
            ErrorKind::NotFound => FfiErrorCode::NotFound,
            ErrorKind::Format => FfiErrorCode::Format,
            ErrorKind::Data => FfiErrorCode::Data,
        }
    }
}

/// Tells `brand_free_result` what `FfiBrandResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Brand = 1,
    BrandList = 2,
    Request = 3,
}

#[repr(C)]
pub struct FfiBrand {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub logo: *mut c_char,
    pub tagline: *mut c_char,
    pub description: *mut c_char,
}

impl FfiBrand {
    fn from_core(brand: Brand) -> Self {
        FfiBrand {
            id: to_c_string(brand.id),
            name: to_c_string(brand.name),
            logo: to_c_string(brand.logo),
            tagline: to_c_string(brand.tagline),
            description: to_c_string(brand.description),
        }
    }

    /// Free the string fields, not the struct itself.
    ///
    /// # Safety
    /// The fields must come from `from_core` and not be freed yet.
    pub(crate) unsafe fn free_fields(&self) {
        unsafe {
            drop_c_string(self.id);
            drop_c_string(self.name);
            drop_c_string(self.logo);
            drop_c_string(self.tagline);
            drop_c_string(self.description);
        }
    }
}

#[repr(C)]
pub struct FfiBrandList {
    pub items: *mut FfiBrand,
    pub len: usize,
}

/// Result envelope for every fallible call.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload named by `data_tag`. On failure `error_message` is
/// the text to show the user and `data` is null. `http_status` is non-zero
/// only when the server answered with an error status.
#[repr(C)]
pub struct FfiBrandResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiBrandResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiBrandResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, message: String, http_status: u16) -> *mut Self {
        Box::into_raw(Box::new(FfiBrandResult {
            error_code,
            error_message: to_c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_brand(brand: Brand) -> *mut Self {
        let ffi_brand = Box::new(FfiBrand::from_core(brand));
        Self::ok(FfiDataTag::Brand, Box::into_raw(ffi_brand) as *mut c_void)
    }

    pub(crate) fn ok_brand_list(brands: Vec<Brand>) -> *mut Self {
        let len = brands.len();
        let items = if brands.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_brands: Box<[FfiBrand]> = brands.into_iter().map(FfiBrand::from_core).collect();
            Box::into_raw(ffi_brands) as *mut FfiBrand
        };
        let ffi_list = Box::new(FfiBrandList { items, len });
        Self::ok(FfiDataTag::BrandList, Box::into_raw(ffi_list) as *mut c_void)
    }

    pub(crate) fn ok_request(req: HttpRequest) -> *mut Self {
        Self::ok(FfiDataTag::Request, FfiHttpRequest::from_core(req) as *mut c_void)
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let http_status = err.http_status().unwrap_or(0);
        Self::err(err.kind().into(), err.to_string(), http_status)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, format!("null argument: {name}"), 0)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        tracing::error!("{msg}");
        Self::err(FfiErrorCode::Panic, msg.to_string(), 0)
    }

    /// # Safety
    /// `result` must come from one of the constructors above and not be
    /// freed yet.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        unsafe { drop_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Brand => {
                let brand = unsafe { Box::from_raw(result.data as *mut FfiBrand) };
                unsafe { brand.free_fields() };
            }
            FfiDataTag::BrandList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiBrandList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len))
                    };
                    for item in items.iter() {
                        unsafe { item.free_fields() };
                    }
                }
            }
            FfiDataTag::Request => unsafe { FfiHttpRequest::free(result.data as *mut FfiHttpRequest) },
            FfiDataTag::None => {}
        }
    }
}
