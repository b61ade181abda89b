//! Per-resource client for the GymHub backend.
//!
//! # Design
//! `GymClient` binds an `Executor` to the endpoint registry and the session
//! token. Each backend operation is a one-line method (see `resources/`)
//! that picks a method and a `Route`, attaches the current token and
//! forwards the caller's payload. No operation validates or reshapes its
//! input; typed decoding of the response is the only work done here.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::ClientConfig;
use crate::endpoints::{Endpoints, Route};
use crate::error::ApiError;
use crate::executor::Executor;
use crate::http::{HttpMethod, RequestBody};
use crate::multipart::MultipartForm;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::MediaFile;

#[derive(Debug, Clone)]
pub struct GymClient<T, S> {
    executor: Executor<T>,
    endpoints: Endpoints,
    tokens: S,
}

#[cfg(feature = "ureq")]
impl<S: TokenStore> GymClient<crate::transport::UreqTransport, S> {
    pub fn with_ureq(config: ClientConfig, tokens: S) -> Self {
        Self::new(config, crate::transport::UreqTransport::new(), tokens)
    }
}

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, tokens: S) -> Self {
        let endpoints = Endpoints::new(config.base_url());
        Self {
            executor: Executor::new(config, transport),
            endpoints,
            tokens,
        }
    }

    pub fn executor(&self) -> &Executor<T> {
        &self.executor
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub(crate) fn call<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        route: Route<'_>,
        body: Option<RequestBody>,
    ) -> Result<R, ApiError> {
        let token = self.tokens.token();
        self.executor
            .execute_as(&self.endpoints.url(&route), method, body, token.as_deref())
    }

    pub(crate) fn get<R: DeserializeOwned>(&self, route: Route<'_>) -> Result<R, ApiError> {
        self.call(HttpMethod::Get, route, None)
    }

    pub(crate) fn delete<R: DeserializeOwned>(&self, route: Route<'_>) -> Result<R, ApiError> {
        self.call(HttpMethod::Delete, route, None)
    }

    pub(crate) fn send_json<B, R>(
        &self,
        method: HttpMethod,
        route: Route<'_>,
        payload: &B,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.call(method, route, Some(json_body(payload)?))
    }

    pub(crate) fn post_form<R: DeserializeOwned>(
        &self,
        route: Route<'_>,
        form: MultipartForm,
    ) -> Result<R, ApiError> {
        self.call(HttpMethod::Post, route, Some(form.into()))
    }
}

/// Serialize `payload`; a failure here is reported like any other
/// client-side failure, as the network-class `ApiError`.
pub(crate) fn json_body<B: Serialize + ?Sized>(payload: &B) -> Result<RequestBody, ApiError> {
    RequestBody::json(payload).map_err(|err| {
        warn!(error = %err, "request payload could not be serialized");
        ApiError::network()
    })
}

/// Form with one text part per field of `fields` plus the attached files.
pub(crate) fn media_form<B: Serialize + ?Sized>(
    fields: &B,
    file_field: &str,
    files: &[MediaFile],
) -> Result<MultipartForm, ApiError> {
    let form = MultipartForm::from_fields(fields).map_err(|err| {
        warn!(error = %err, "upload fields could not be serialized");
        ApiError::network()
    })?;
    Ok(files.iter().fold(form, |form, file| {
        form.file(file_field, &file.file_name, &file.content_type, file.bytes.clone())
    }))
}
