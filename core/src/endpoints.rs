//! Endpoint registry: every backend operation and the path it lives at.
//!
//! `Route` names an operation; parameterised routes carry their identifier.
//! `Endpoints` owns the normalised base URL and turns a route into an
//! absolute URL. Both are plain values with no I/O and no failure modes.

/// One backend operation. Identifiers are inserted into the path verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    // auth
    Login,
    Register,
    Logout,
    ForgotPassword,

    // user profile and social graph
    MyProfile,
    UserProfile(&'a str),
    UpdateProfile,
    UploadAvatar,
    FollowUnfollow(&'a str),
    Followers(&'a str),
    Following(&'a str),

    // posts
    Feed { page: u32 },
    CreatePost,
    Post(&'a str),
    LikePost(&'a str),
    PostComments(&'a str),
    UserPosts(&'a str),

    // marketplace
    Products { page: u32 },
    CreateProduct,
    Product(&'a str),

    // ads
    AdCampaigns,
    CreateAdCampaign,
    AdCampaign(&'a str),

    // wallet
    WalletBalance,
    WalletTransactions { page: u32 },
    WalletTopUp,
    WalletWithdraw,

    // messaging
    Conversations,
    ConversationMessages(&'a str),

    // live
    LiveStreams,
    StartLiveStream,
    LiveStream(&'a str),
    EndLiveStream(&'a str),
}

impl Route<'_> {
    /// Path relative to the API base, always starting with `/`.
    pub fn path(&self) -> String {
        match *self {
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::Logout => "/auth/logout".to_string(),
            Route::ForgotPassword => "/auth/forgot-password".to_string(),

            Route::MyProfile => "/user/profile".to_string(),
            Route::UserProfile(id) => format!("/user/profile/{id}"),
            Route::UpdateProfile => "/user/profile/update".to_string(),
            Route::UploadAvatar => "/user/profile/avatar".to_string(),
            Route::FollowUnfollow(id) => format!("/user/follow/{id}"),
            Route::Followers(id) => format!("/user/{id}/followers"),
            Route::Following(id) => format!("/user/{id}/following"),

            Route::Feed { page } => format!("/user/posts/feed?page={page}"),
            Route::CreatePost => "/user/posts".to_string(),
            Route::Post(id) => format!("/user/posts/{id}"),
            Route::LikePost(id) => format!("/user/posts/{id}/like"),
            Route::PostComments(id) => format!("/user/posts/{id}/comments"),
            Route::UserPosts(id) => format!("/user/{id}/posts"),

            Route::Products { page } => format!("/marketplace/products?page={page}"),
            Route::CreateProduct => "/marketplace/products".to_string(),
            Route::Product(id) => format!("/marketplace/products/{id}"),

            Route::AdCampaigns => "/ads/campaigns".to_string(),
            Route::CreateAdCampaign => "/ads/campaigns".to_string(),
            Route::AdCampaign(id) => format!("/ads/campaigns/{id}"),

            Route::WalletBalance => "/wallet/balance".to_string(),
            Route::WalletTransactions { page } => format!("/wallet/transactions?page={page}"),
            Route::WalletTopUp => "/wallet/top-up".to_string(),
            Route::WalletWithdraw => "/wallet/withdraw".to_string(),

            Route::Conversations => "/chat/conversations".to_string(),
            Route::ConversationMessages(id) => format!("/chat/conversations/{id}/messages"),

            Route::LiveStreams => "/live/streams".to_string(),
            Route::StartLiveStream => "/live/streams/start".to_string(),
            Route::LiveStream(id) => format!("/live/streams/{id}"),
            Route::EndLiveStream(id) => format!("/live/streams/{id}/end"),
        }
    }
}

/// Absolute-URL builder bound to one backend host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, route: &Route<'_>) -> String {
        format!("{}{}", self.base_url, route.path())
    }
}
