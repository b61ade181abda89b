use crate::client::GymClient;
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{ChatMessage, Conversation, NewChatMessage};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn fetch_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.get(Route::Conversations)
    }

    pub fn fetch_messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.get(Route::ConversationMessages(conversation_id))
    }

    pub fn send_message(
        &self,
        conversation_id: &str,
        message: &NewChatMessage,
    ) -> Result<ChatMessage, ApiError> {
        self.send_json(
            HttpMethod::Post,
            Route::ConversationMessages(conversation_id),
            message,
        )
    }
}
