//! The seam between request building and the network.
//!
//! A `Transport` performs exactly one HTTP round-trip. It reports any
//! received response as `Ok`, whatever its status, and reserves `Err` for
//! requests that never produced one. Status interpretation belongs to the
//! executor.

use std::sync::Arc;
use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, RequestBody};
use crate::multipart::{self, MULTIPART_FORM_DATA};

pub trait Transport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        (**self).send(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        (**self).send(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        (**self).send(request, timeout)
    }
}

/// Headers and payload bytes as they go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub headers: Vec<(String, String)>,
    pub payload: Option<Vec<u8>>,
}

/// Encode `request` for sending, using `boundary` for multipart bodies.
///
/// Multipart bodies always leave with a boundary-bearing `Content-Type`.
/// An explicit bare `multipart/form-data` header (set on Android) is
/// completed in place; when none was set, one is added.
pub fn to_wire(request: &HttpRequest, boundary: &str) -> WireRequest {
    let mut headers = request.headers.clone();
    let payload = match &request.body {
        None => None,
        Some(RequestBody::Json(text)) => Some(text.clone().into_bytes()),
        Some(RequestBody::Multipart(form)) => {
            let full = multipart::content_type_with_boundary(boundary);
            let existing = headers
                .iter_mut()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-type"));
            match existing {
                Some((_, value)) if value.eq_ignore_ascii_case(MULTIPART_FORM_DATA) => {
                    *value = full;
                }
                Some(_) => {}
                None => headers.push(("Content-Type".to_string(), full)),
            }
            Some(form.encode(boundary))
        }
    };
    WireRequest { headers, payload }
}

/// Status text for a received status: the canonical reason phrase, or the
/// numeric code when the status has none.
pub fn status_text(status: u16, canonical_reason: Option<&str>) -> String {
    match canonical_reason {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ => status.to_string(),
    }
}

/// Response body as text. Invalid UTF-8 is replaced, never rejected.
pub fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(feature = "ureq")]
pub use self::blocking::{UreqTransport, DEFAULT_BODY_LIMIT};

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use tracing::{trace, warn};
    use ureq::{Agent, RequestBuilder};

    use super::{body_text, status_text, to_wire, Transport};
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::multipart;

    /// Largest response body read into memory.
    pub const DEFAULT_BODY_LIMIT: u64 = 32 * 1024 * 1024;

    /// Blocking transport backed by a shared `ureq::Agent`.
    ///
    /// The agent keeps its connection pool across calls; nothing about a
    /// request or its response is cached.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
        body_limit: u64,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::with_body_limit(DEFAULT_BODY_LIMIT)
        }

        /// A body longer than `body_limit` bytes is not kept. The status of
        /// a rejected request still is; see `send`.
        pub fn with_body_limit(body_limit: u64) -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent, body_limit }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    fn prepare<B>(
        builder: RequestBuilder<B>,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> RequestBuilder<B> {
        let builder = headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));
        builder
            .config()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
    }

    impl Transport for UreqTransport {
        fn send(
            &self,
            request: &HttpRequest,
            timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            let wire = to_wire(request, &multipart::generate_boundary());
            let url = request.url.as_str();
            let headers = wire.headers.as_slice();
            trace!(method = %request.method, url, "sending request");

            let result = match (request.method, wire.payload) {
                (HttpMethod::Get, _) => prepare(self.agent.get(url), headers, timeout).call(),
                (HttpMethod::Delete, None) => {
                    prepare(self.agent.delete(url), headers, timeout).call()
                }
                (HttpMethod::Delete, Some(payload)) => {
                    prepare(self.agent.delete(url).force_send_body(), headers, timeout)
                        .send(&payload[..])
                }
                (HttpMethod::Post, Some(payload)) => {
                    prepare(self.agent.post(url), headers, timeout).send(&payload[..])
                }
                (HttpMethod::Post, None) => prepare(self.agent.post(url), headers, timeout).send_empty(),
                (HttpMethod::Put, Some(payload)) => {
                    prepare(self.agent.put(url), headers, timeout).send(&payload[..])
                }
                (HttpMethod::Put, None) => prepare(self.agent.put(url), headers, timeout).send_empty(),
            };

            let mut response = result.map_err(map_error)?;
            let status = response.status();
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
            // Once a status line is in, a rejection keeps its status even if
            // the body cannot be read. A success without its body is not a
            // success, so that case stays a transport failure.
            let body = match response
                .body_mut()
                .with_config()
                .limit(self.body_limit)
                .read_to_vec()
            {
                Ok(bytes) => body_text(&bytes),
                Err(err) if !status.is_success() => {
                    warn!(status = status.as_u16(), error = %err, "error response body dropped");
                    String::new()
                }
                Err(err) => return Err(map_error(err)),
            };

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status_text(status.as_u16(), status.canonical_reason()),
                headers,
                body,
            })
        }
    }

    fn map_error(err: ureq::Error) -> TransportError {
        match err {
            ureq::Error::Timeout(_) => TransportError::Timeout,
            ureq::Error::Io(io) => TransportError::Io(io),
            other => TransportError::Other(other.to_string()),
        }
    }
}
