//! Request and response payloads for the GymHub backend.
//!
//! # Design
//! Response structs model the fields the app renders and keep everything
//! else in a flattened `extra` map, so a backend that adds fields never
//! breaks decoding and nothing it sends is lost. Request structs skip unset
//! optional fields so partial updates only touch what the caller set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend identifiers arrive as either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(u64),
    Text(String),
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Id::Num(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Token and optional profile returned by login and registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user as shown on profile screens and post authors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub is_following: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial profile update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Follow state after a follow/unfollow toggle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FollowStatus {
    pub following: bool,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

/// A feed post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: Id,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub author: Option<UserProfile>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a new post.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePost {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

/// Partial post update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

/// Body of a new comment.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub body: String,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: Id,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Like state after a like/unlike toggle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikeStatus {
    pub liked: bool,
    #[serde(default)]
    pub likes_count: u64,
}

/// A media file attached to an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a new marketplace listing.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// An ad campaign.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdCampaign {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a new ad campaign.
#[derive(Debug, Clone, Serialize)]
pub struct NewAdCampaign {
    pub name: String,
    pub budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
}

/// Current wallet balance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WalletBalance {
    pub balance: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One wallet ledger entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WalletTransaction {
    pub id: Id,
    pub amount: f64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a wallet top-up or withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct AmountRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// A chat thread with its participants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    pub id: Id,
    #[serde(default)]
    pub participants: Vec<UserProfile>,
    #[serde(default)]
    pub last_message: Option<ChatMessage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    pub id: Id,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub sender_id: Option<Id>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a message sent to a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub body: String,
}

/// A live stream session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveStream {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for starting a live stream.
#[derive(Debug, Clone, Serialize)]
pub struct StartLiveStream {
    pub title: String,
}
