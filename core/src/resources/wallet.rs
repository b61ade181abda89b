use crate::client::GymClient;
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{AmountRequest, WalletBalance, WalletTransaction};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn get_wallet_balance(&self) -> Result<WalletBalance, ApiError> {
        self.get(Route::WalletBalance)
    }

    pub fn fetch_wallet_transactions(&self, page: u32) -> Result<Vec<WalletTransaction>, ApiError> {
        self.get(Route::WalletTransactions { page })
    }

    pub fn top_up_wallet(&self, request: &AmountRequest) -> Result<WalletBalance, ApiError> {
        self.send_json(HttpMethod::Post, Route::WalletTopUp, request)
    }

    pub fn withdraw_from_wallet(&self, request: &AmountRequest) -> Result<WalletBalance, ApiError> {
        self.send_json(HttpMethod::Post, Route::WalletWithdraw, request)
    }
}
