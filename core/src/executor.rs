//! Generic request executor.
//!
//! # Design
//! One call is one request: build an `HttpRequest`, hand it to the
//! `Transport`, interpret the `HttpResponse`. Building and interpreting are
//! pure so the header rules and error normalisation are testable without a
//! network. The executor keeps no state between calls beyond its
//! configuration and transport. There is no retry, cache, deduplication or
//! cancellation; the only bounded wait is the configured timeout.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ExecuteError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MULTIPART_FORM_DATA;
use crate::transport::Transport;

pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct Executor<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "ureq")]
impl Executor<crate::transport::UreqTransport> {
    pub fn with_ureq(config: ClientConfig) -> Self {
        Self::new(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> Executor<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request without sending it.
    ///
    /// A GET never carries a body, so one passed with it is dropped along
    /// with its `Content-Type`.
    pub fn build_request(
        &self,
        target: &str,
        method: HttpMethod,
        body: Option<RequestBody>,
        credential: Option<&str>,
    ) -> HttpRequest {
        let body = body.filter(|_| method != HttpMethod::Get);
        let mut headers = Vec::new();
        if let Some(token) = credential {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        match &body {
            Some(RequestBody::Json(_)) => {
                headers.push(("Content-Type".to_string(), APPLICATION_JSON.to_string()));
            }
            Some(RequestBody::Multipart(_)) if self.config.platform().forces_multipart_content_type() => {
                headers.push(("Content-Type".to_string(), MULTIPART_FORM_DATA.to_string()));
            }
            Some(RequestBody::Multipart(_)) | None => {}
        }
        HttpRequest {
            method,
            url: target.to_string(),
            headers,
            body,
        }
    }

    /// Perform one request and return the decoded 2xx body unchanged.
    pub fn execute(
        &self,
        target: &str,
        method: HttpMethod,
        body: Option<RequestBody>,
        credential: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.dispatch(target, method, body, credential)
            .map(|(_, value)| value)
    }

    /// As `execute`, with the method given as a string.
    ///
    /// An unsupported method fails before the transport is touched.
    pub fn execute_str(
        &self,
        target: &str,
        method: &str,
        body: Option<RequestBody>,
        credential: Option<&str>,
    ) -> Result<Value, ExecuteError> {
        let method: HttpMethod = method.parse()?;
        Ok(self.execute(target, method, body, credential)?)
    }

    /// As `execute`, decoding the 2xx body into `R`.
    pub fn execute_as<R: DeserializeOwned>(
        &self,
        target: &str,
        method: HttpMethod,
        body: Option<RequestBody>,
        credential: Option<&str>,
    ) -> Result<R, ApiError> {
        let (status, value) = self.dispatch(target, method, body, credential)?;
        match R::deserialize(&value) {
            Ok(decoded) => Ok(decoded),
            Err(err) => {
                warn!(%method, url = target, status, error = %err, "response body did not match expected shape");
                Err(ApiError::invalid_response(status, value))
            }
        }
    }

    fn dispatch(
        &self,
        target: &str,
        method: HttpMethod,
        body: Option<RequestBody>,
        credential: Option<&str>,
    ) -> Result<(u16, Value), ApiError> {
        let request = self.build_request(target, method, body, credential);
        debug!(
            %method,
            url = target,
            authenticated = credential.is_some(),
            platform = %self.config.platform(),
            "dispatching request"
        );
        let response = self
            .transport
            .send(&request, self.config.timeout())
            .map_err(|err| {
                warn!(%method, url = target, error = %err, "request produced no response");
                ApiError::from(err)
            })?;
        let status = response.status;
        match interpret_response(response) {
            Ok(value) => {
                debug!(%method, url = target, status, "request succeeded");
                Ok((status, value))
            }
            Err(err) => {
                warn!(%method, url = target, status, message = %err.message, "request rejected");
                Err(err)
            }
        }
    }
}

/// Turn a received response into the decoded body or an `ApiError`.
pub fn interpret_response(response: HttpResponse) -> Result<Value, ApiError> {
    let success = response.is_success();
    let data = decode_body(response.body);
    if success {
        Ok(data)
    } else {
        Err(ApiError::from_response(
            response.status,
            &response.status_text,
            data,
        ))
    }
}

/// JSON when the body parses, `Null` when empty, the raw text otherwise.
pub fn decode_body(body: String) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
