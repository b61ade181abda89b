//! In-memory stand-in for the GymHub backend.
//!
//! Serves a small slice of the real API (login, profiles, follow, posts, ad
//! campaigns, wallet, avatar upload) with the same error bodies the backend
//! sends: `{"message": ..}` on rejection and a field list on 422. The
//! `/debug/*` routes exist for client tests: they echo requests, return
//! arbitrary statuses, stall, or reply with non-JSON text.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Bearer token accepted on authenticated routes.
pub const TEST_TOKEN: &str = "test-token";
/// Password accepted by `/auth/login` for any email.
pub const TEST_PASSWORD: &str = "secret";
/// Id of the ad campaign present at startup.
pub const SEEDED_CAMPAIGN_ID: &str = "1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub likes_count: u64,
    pub author_id: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct Login {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Default)]
pub struct Store {
    posts: HashMap<String, Post>,
    following: HashSet<String>,
    campaigns: HashMap<String, Value>,
}

pub type Db = Arc<RwLock<Store>>;

/// A rejection carrying the backend's JSON error body.
pub struct Failure(StatusCode, Value);

impl Failure {
    fn message(status: StatusCode, message: &str) -> Self {
        Failure(status, json!({ "message": message }))
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub fn app() -> Router {
    let mut store = Store::default();
    store.campaigns.insert(
        SEEDED_CAMPAIGN_ID.to_string(),
        json!({"id": 1, "name": "New year, new PR", "status": "active", "budget": 150.0}),
    );
    let db: Db = Arc::new(RwLock::new(store));

    Router::new()
        .route("/auth/login", post(login))
        .route("/user/profile", get(my_profile))
        .route("/user/profile/avatar", post(upload_avatar))
        .route("/user/profile/{id}", get(user_profile))
        .route("/user/follow/{id}", post(follow_unfollow))
        .route("/user/posts", post(create_post))
        .route(
            "/user/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/ads/campaigns/{id}", get(get_campaign))
        .route("/wallet/balance", get(wallet_balance))
        .route("/debug/echo", any(echo))
        .route("/debug/status/{code}", any(status))
        .route("/debug/slow/{ms}", get(slow))
        .route("/debug/text", get(text))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock backend listening");
    }
    axum::serve(listener, app()).await
}

fn authorize(headers: &HeaderMap) -> Result<(), Failure> {
    let expected = format!("Bearer {TEST_TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(Failure::message(StatusCode::UNAUTHORIZED, "Unauthenticated.")),
    }
}

fn profile(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Sam Lifter",
        "username": format!("lifter{id}"),
        "followers_count": 12,
        "following_count": 3
    })
}

async fn login(Json(input): Json<Login>) -> Result<Json<Value>, Failure> {
    let mut errors = serde_json::Map::new();
    if input.email.trim().is_empty() {
        errors.insert("email".into(), json!(["The email field is required."]));
    }
    if input.password.is_empty() {
        errors.insert("password".into(), json!(["The password field is required."]));
    }
    if !errors.is_empty() {
        return Err(Failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"message": "The given data was invalid.", "errors": errors}),
        ));
    }
    if input.password != TEST_PASSWORD {
        return Err(Failure::message(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    Ok(Json(json!({"token": TEST_TOKEN, "user": profile("1")})))
}

async fn my_profile(headers: HeaderMap) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    Ok(Json(profile("1")))
}

async fn user_profile(Path(id): Path<String>) -> Json<Value> {
    Json(profile(&id))
}

/// Echoes what arrived: the `Content-Type` header as sent and each part's
/// name, file name and size.
async fn upload_avatar(headers: HeaderMap, mut multipart: Multipart) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| Failure::message(StatusCode::BAD_REQUEST, &err.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| Failure::message(StatusCode::BAD_REQUEST, &err.body_text()))?;
        parts.push(json!({"name": name, "file_name": file_name, "size": bytes.len()}));
    }
    debug!(parts = parts.len(), "avatar upload received");

    let mut body = profile("1");
    body["avatar_url"] = json!("https://cdn.gymhub.test/avatars/1.png");
    body["received_content_type"] = json!(content_type);
    body["received_parts"] = json!(parts);
    Ok(Json(body))
}

async fn follow_unfollow(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    let mut store = db.write().await;
    let following = if store.following.remove(&id) {
        false
    } else {
        store.following.insert(id);
        true
    };
    Ok(Json(json!({ "following": following })))
}

async fn create_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), Failure> {
    authorize(&headers)?;
    if input.content.trim().is_empty() {
        return Err(Failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "message": "The given data was invalid.",
                "errors": [{"field": "content", "message": "Content is required"}]
            }),
        ));
    }
    let post = Post {
        id: Uuid::new_v4().to_string(),
        content: input.content,
        likes_count: 0,
        author_id: "1".to_string(),
    };
    db.write().await.posts.insert(post.id.clone(), post.clone());
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Post>, Failure> {
    let store = db.read().await;
    store
        .posts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::message(StatusCode::NOT_FOUND, "Post not found"))
}

async fn update_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, Failure> {
    authorize(&headers)?;
    let mut store = db.write().await;
    let post = store
        .posts
        .get_mut(&id)
        .ok_or_else(|| Failure::message(StatusCode::NOT_FOUND, "Post not found"))?;
    if let Some(content) = input.content {
        post.content = content;
    }
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    let mut store = db.write().await;
    store
        .posts
        .remove(&id)
        .map(|_| Json(json!({"message": "Post deleted"})))
        .ok_or_else(|| Failure::message(StatusCode::NOT_FOUND, "Post not found"))
}

/// Unknown campaigns get a 404 whose body has no `message`.
async fn get_campaign(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    store
        .campaigns
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure(StatusCode::NOT_FOUND, json!({"error": "not_found"})))
}

async fn wallet_balance(headers: HeaderMap) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    Ok(Json(json!({"balance": 120.5, "currency": "USD"})))
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(json!({
        "method": method.as_str(),
        "authorization": header_value(header::AUTHORIZATION),
        "content_type": header_value(header::CONTENT_TYPE),
        "body": body
    }))
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, Json(json!({"message": format!("status {code}")}))).into_response(),
        Err(_) => Failure::message(StatusCode::BAD_REQUEST, "invalid status").into_response(),
    }
}

async fn slow(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({"slept_ms": ms}))
}

async fn text() -> &'static str {
    "pong"
}
