//! Pluggable execution of `HttpRequest` values.
//!
//! # Design
//! `BrandClient` never opens sockets itself. A `Transport` performs the
//! round-trip and reports failures with a `TransportErrorKind`, which is all
//! the client needs to tell "cannot reach the server" apart from other
//! failures. Non-2xx statuses are not transport errors: they come back as an
//! ordinary `HttpResponse`.

use std::fmt;

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// Why a round-trip failed before a status line was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Host name could not be resolved.
    Resolve,
    /// Connection refused, reset or otherwise not established.
    Connect,
    /// Anything else (TLS, timeout, unreadable body).
    Other,
}

impl TransportErrorKind {
    pub fn is_connectivity(self) -> bool {
        matches!(self, TransportErrorKind::Resolve | TransportErrorKind::Connect)
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::Resolve => "resolve",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Executes one request and returns whatever the server answered.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::io;

    use tracing::debug;

    use super::{Transport, TransportError, TransportErrorKind};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq` agent.
    ///
    /// The agent is configured so 4xx/5xx responses are returned as data, and
    /// status interpretation stays with `BrandClient`.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            debug!(method = request.method.as_str(), url = %request.url, "executing request");
            let mut builder = match request.method {
                HttpMethod::Get => self.agent.get(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let mut response = builder.call().map_err(classify)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError::new(TransportErrorKind::Other, e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn classify(err: ureq::Error) -> TransportError {
        let kind = match &err {
            ureq::Error::HostNotFound => TransportErrorKind::Resolve,
            ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
            ureq::Error::Io(io_err) => io_kind(io_err),
            _ => TransportErrorKind::Other,
        };
        TransportError::new(kind, err.to_string())
    }

    fn io_kind(err: &io::Error) -> TransportErrorKind {
        match err.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable => TransportErrorKind::Connect,
            _ => TransportErrorKind::Other,
        }
    }

}
