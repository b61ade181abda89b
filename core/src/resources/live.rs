use crate::client::GymClient;
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{LiveStream, StartLiveStream};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn list_live_streams(&self) -> Result<Vec<LiveStream>, ApiError> {
        self.get(Route::LiveStreams)
    }

    /// Registers the stream with the backend. The returned `channel` is what
    /// the host hands to its streaming SDK.
    pub fn start_live_stream(&self, stream: &StartLiveStream) -> Result<LiveStream, ApiError> {
        self.send_json(HttpMethod::Post, Route::StartLiveStream, stream)
    }

    pub fn get_live_stream(&self, stream_id: &str) -> Result<LiveStream, ApiError> {
        self.get(Route::LiveStream(stream_id))
    }

    pub fn end_live_stream(&self, stream_id: &str) -> Result<LiveStream, ApiError> {
        self.call(HttpMethod::Post, Route::EndLiveStream(stream_id), None)
    }
}
