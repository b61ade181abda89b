use crate::client::{media_form, GymClient};
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{FollowStatus, MediaFile, UpdateProfile, UserProfile};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn fetch_my_profile(&self) -> Result<UserProfile, ApiError> {
        self.get(Route::MyProfile)
    }

    pub fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.get(Route::UserProfile(user_id))
    }

    pub fn update_profile(&self, update: &UpdateProfile) -> Result<UserProfile, ApiError> {
        self.send_json(HttpMethod::Put, Route::UpdateProfile, update)
    }

    pub fn upload_avatar(&self, image: &MediaFile) -> Result<UserProfile, ApiError> {
        let form = media_form(&(), "avatar", std::slice::from_ref(image))?;
        self.post_form(Route::UploadAvatar, form)
    }

    /// Toggles the follow relationship; the response says which way it went.
    pub fn follow_unfollow_user(&self, user_id: &str) -> Result<FollowStatus, ApiError> {
        self.call(HttpMethod::Post, Route::FollowUnfollow(user_id), None)
    }

    pub fn fetch_followers(&self, user_id: &str) -> Result<Vec<UserProfile>, ApiError> {
        self.get(Route::Followers(user_id))
    }

    pub fn fetch_following(&self, user_id: &str) -> Result<Vec<UserProfile>, ApiError> {
        self.get(Route::Following(user_id))
    }
}
