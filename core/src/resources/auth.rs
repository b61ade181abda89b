use serde_json::Value;

use crate::client::GymClient;
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{AuthSession, ForgotPasswordRequest, LoginRequest, RegisterRequest};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    /// The returned token is not stored; persisting it is the host's job.
    pub fn login(&self, credentials: &LoginRequest) -> Result<AuthSession, ApiError> {
        self.send_json(HttpMethod::Post, Route::Login, credentials)
    }

    pub fn register(&self, account: &RegisterRequest) -> Result<AuthSession, ApiError> {
        self.send_json(HttpMethod::Post, Route::Register, account)
    }

    pub fn logout(&self) -> Result<Value, ApiError> {
        self.call(HttpMethod::Post, Route::Logout, None)
    }

    pub fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<Value, ApiError> {
        self.send_json(HttpMethod::Post, Route::ForgotPassword, request)
    }
}
