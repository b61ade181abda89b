use serde_json::Value;

use crate::client::{media_form, GymClient};
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{Comment, CreatePost, LikeStatus, MediaFile, NewComment, Post, UpdatePost};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn fetch_feed(&self, page: u32) -> Result<Vec<Post>, ApiError> {
        self.get(Route::Feed { page })
    }

    /// Text-only posts go out as JSON; posts with media as a multipart form
    /// with one `media[]` part per file.
    pub fn create_post(&self, post: &CreatePost, media: &[MediaFile]) -> Result<Post, ApiError> {
        if media.is_empty() {
            return self.send_json(HttpMethod::Post, Route::CreatePost, post);
        }
        let form = media_form(post, "media[]", media)?;
        self.post_form(Route::CreatePost, form)
    }

    pub fn get_post(&self, post_id: &str) -> Result<Post, ApiError> {
        self.get(Route::Post(post_id))
    }

    pub fn update_post(&self, post_id: &str, update: &UpdatePost) -> Result<Post, ApiError> {
        self.send_json(HttpMethod::Put, Route::Post(post_id), update)
    }

    pub fn delete_post(&self, post_id: &str) -> Result<Value, ApiError> {
        self.delete(Route::Post(post_id))
    }

    pub fn like_unlike_post(&self, post_id: &str) -> Result<LikeStatus, ApiError> {
        self.call(HttpMethod::Post, Route::LikePost(post_id), None)
    }

    pub fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        self.get(Route::PostComments(post_id))
    }

    pub fn add_comment(&self, post_id: &str, comment: &NewComment) -> Result<Comment, ApiError> {
        self.send_json(HttpMethod::Post, Route::PostComments(post_id), comment)
    }

    pub fn fetch_user_posts(&self, user_id: &str) -> Result<Vec<Post>, ApiError> {
        self.get(Route::UserPosts(user_id))
    }
}
