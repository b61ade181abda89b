//! End-to-end checks against the live mock backend.
//!
//! # Design
//! Starts the mock server on a random port, then drives the executor and
//! `GymClient` over real HTTP with `UreqTransport`. Covers the success path,
//! both error tiers, the multipart header rule and the timeout.

use std::io::{BufRead, BufReader, Write};
use std::net::SocketAddr;
use std::time::Duration;

use gymhub_core::types::{CreatePost, LoginRequest, MediaFile, UpdatePost};
use gymhub_core::{
    present_error, ApiError, ClientConfig, ExecuteError, Executor, GymClient, HttpMethod,
    MemoryTokenStore, MultipartForm, Platform, RequestBody, UnsupportedMethod, UreqTransport,
};
use serde_json::{json, Value};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

/// Answer a single connection with `status_line`, `body` and a matching
/// `Content-Length`, bypassing any HTTP framework.
fn serve_raw_once(status_line: &'static str, body: Vec<u8>) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = reader.into_inner();
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        // The client may stop reading early; a failed write is expected then.
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&body);
    });
    addr
}

fn executor(addr: SocketAddr, platform: Platform) -> Executor<UreqTransport> {
    Executor::with_ureq(ClientConfig::new(&format!("http://{addr}")).with_platform(platform))
}

#[test]
fn post_lifecycle_through_client() {
    let addr = start_server();
    let client = GymClient::with_ureq(
        ClientConfig::new(&format!("http://{addr}")),
        MemoryTokenStore::new(),
    );

    // Step 1: unauthenticated profile fetch is rejected.
    let err = client.fetch_my_profile().unwrap_err();
    assert_eq!(err.status_code, Some(401));
    assert_eq!(err.message, "Unauthenticated.");

    // Step 2: log in and keep the token.
    let session = client
        .login(&LoginRequest {
            email: "sam@gym.test".to_string(),
            password: mock_server::TEST_PASSWORD.to_string(),
        })
        .unwrap();
    client.tokens().set(&session.token);
    let me = client.fetch_my_profile().unwrap();
    assert_eq!(me.username.as_deref(), Some("lifter1"));

    // Step 3: create a post.
    let created = client
        .create_post(
            &CreatePost {
                content: "Squat 140kg".to_string(),
                visibility: None,
            },
            &[],
        )
        .unwrap();
    assert_eq!(created.content, "Squat 140kg");
    let id = created.id.to_string();

    // Step 4: fetch it twice; no hidden memoisation, identical bodies.
    let first = client.get_post(&id).unwrap();
    let second = client.get_post(&id).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, created);

    // Step 5: update.
    let updated = client
        .update_post(
            &id,
            &UpdatePost {
                content: Some("Squat 142.5kg".to_string()),
                ..UpdatePost::default()
            },
        )
        .unwrap();
    assert_eq!(updated.content, "Squat 142.5kg");

    // Step 6: delete, then the post is gone.
    let deleted = client.delete_post(&id).unwrap();
    assert_eq!(deleted["message"], "Post deleted");
    let err = client.get_post(&id).unwrap_err();
    assert_eq!(err.status_code, Some(404));
    assert_eq!(err.message, "Post not found");

    // Step 7: follow toggles.
    assert!(client.follow_unfollow_user("7").unwrap().following);
    assert!(!client.follow_unfollow_user("7").unwrap().following);
}

#[test]
fn missing_post_with_token() {
    let addr = start_server();
    let exec = executor(addr, Platform::Other);
    let err = exec
        .execute(
            &format!("http://{addr}/user/posts/5"),
            HttpMethod::Get,
            None,
            Some("abc"),
        )
        .unwrap_err();
    assert_eq!(err.status_code, Some(404));
    assert_eq!(err.message, "Post not found");
    assert_eq!(err.status_text, "Not Found");
    assert_eq!(err.data, Some(json!({"message": "Post not found"})));
}

#[test]
fn every_method_returns_body_unchanged() {
    let addr = start_server();
    let exec = executor(addr, Platform::Other);
    let url = format!("http://{addr}/debug/echo");
    for method in HttpMethod::ALL {
        let body = match method {
            HttpMethod::Post | HttpMethod::Put => Some(RequestBody::json(&json!({"reps": 5})).unwrap()),
            HttpMethod::Get | HttpMethod::Delete => None,
        };
        let (sent_body, content_type) = match body {
            Some(_) => (json!({"reps": 5}), json!("application/json")),
            None => (Value::Null, Value::Null),
        };
        let value = exec.execute(&url, method, body, Some("abc")).unwrap();
        assert_eq!(
            value,
            json!({
                "method": method.as_str(),
                "authorization": "Bearer abc",
                "content_type": content_type,
                "body": sent_body,
            }),
            "{method}"
        );
    }
}

#[test]
fn rejection_without_message_uses_fallback() {
    let addr = start_server();
    let client = GymClient::with_ureq(
        ClientConfig::new(&format!("http://{addr}")),
        MemoryTokenStore::with_token(mock_server::TEST_TOKEN),
    );
    let campaign = client
        .get_ad_campaign_by_id(mock_server::SEEDED_CAMPAIGN_ID)
        .unwrap();
    assert_eq!(campaign.name, "New year, new PR");

    let err = client.get_ad_campaign_by_id("404").unwrap_err();
    assert_eq!(err.status_code, Some(404));
    assert_eq!(err.message, "Something went wrong");
    assert_eq!(err.data, Some(json!({"error": "not_found"})));
}

#[test]
fn arbitrary_status_keeps_code_and_reason() {
    let addr = start_server();
    let exec = executor(addr, Platform::Other);
    let err = exec
        .execute_str(&format!("http://{addr}/debug/status/503"), "delete", None, None)
        .unwrap_err();
    let ExecuteError::Api(err) = err else {
        panic!("expected an ApiError");
    };
    assert_eq!(err.status_code, Some(503));
    assert_eq!(err.status_text, "Service Unavailable");
    assert_eq!(err.message, "status 503");
}

#[test]
fn validation_failure_is_presented_per_field() {
    let addr = start_server();
    let client = GymClient::with_ureq(
        ClientConfig::new(&format!("http://{addr}")),
        MemoryTokenStore::with_token(mock_server::TEST_TOKEN),
    );
    let err = client
        .create_post(
            &CreatePost {
                content: String::new(),
                visibility: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.is_validation_error());
    let notification = present_error(&err, "Could not create post");
    assert_eq!(notification.title, "Validation Error");
    assert_eq!(notification.messages, vec!["Content is required"]);
}

#[test]
fn avatar_upload_on_each_platform() {
    let addr = start_server();
    for platform in [Platform::Android, Platform::Ios, Platform::Other] {
        let client = GymClient::with_ureq(
            ClientConfig::new(&format!("http://{addr}")).with_platform(platform),
            MemoryTokenStore::with_token(mock_server::TEST_TOKEN),
        );
        let profile = client
            .upload_avatar(&MediaFile {
                file_name: "me.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: b"PNGDATA".to_vec(),
            })
            .unwrap();
        let content_type = profile.extra["received_content_type"].as_str().unwrap();
        assert!(
            content_type.starts_with("multipart/form-data; boundary="),
            "{platform}: {content_type}"
        );
        assert_eq!(
            profile.extra["received_parts"],
            json!([{"name": "avatar", "file_name": "me.png", "size": 7}])
        );
    }
}

#[test]
fn raw_multipart_form_through_executor() {
    let addr = start_server();
    let exec = executor(addr, Platform::Android);
    let form = MultipartForm::new()
        .text("caption", "new pfp")
        .file("avatar", "a.jpg", "image/jpeg", vec![0xff, 0xd8]);
    let value = exec
        .execute(
            &format!("http://{addr}/user/profile/avatar"),
            HttpMethod::Post,
            Some(form.into()),
            Some(mock_server::TEST_TOKEN),
        )
        .unwrap();
    assert_eq!(value["received_parts"][0]["name"], "caption");
    assert_eq!(value["received_parts"][1]["size"], 2);
}

#[test]
fn non_json_body_is_returned_as_text() {
    let addr = start_server();
    let exec = executor(addr, Platform::Other);
    let value = exec
        .execute(&format!("http://{addr}/debug/text"), HttpMethod::Get, None, None)
        .unwrap();
    assert_eq!(value, json!("pong"));
}

#[test]
fn connection_refused_is_network_error() {
    // Bind and release a port so nothing is listening on it.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let exec = executor(addr, Platform::Other);
    let err = exec
        .execute(&format!("http://{addr}/user/profile"), HttpMethod::Get, None, Some("abc"))
        .unwrap_err();
    assert_eq!(err, ApiError::network());
}

#[test]
fn slow_response_times_out_as_network_error() {
    let addr = start_server();
    let exec = Executor::with_ureq(
        ClientConfig::new(&format!("http://{addr}"))
            .with_platform(Platform::Other)
            .with_timeout(Duration::from_millis(200)),
    );
    let err = exec
        .execute(&format!("http://{addr}/debug/slow/3000"), HttpMethod::Get, None, None)
        .unwrap_err();
    assert!(err.is_network_error());
    assert_eq!(err.status_text, "Network Error");
}

#[test]
fn unsupported_method_fails_before_sending() {
    // No server: if the request were attempted it would be a network error.
    let exec = Executor::with_ureq(ClientConfig::new("http://127.0.0.1:9"));
    let err = exec
        .execute_str("http://127.0.0.1:9/user/posts/5", "PATCH", None, None)
        .unwrap_err();
    assert_eq!(
        err,
        ExecuteError::UnsupportedMethod(UnsupportedMethod("PATCH".to_string()))
    );
}

#[test]
fn non_utf8_error_body_keeps_status() {
    let addr = serve_raw_once("500 Internal Server Error", vec![0xff, 0xfe, b'x']);
    let exec = executor(addr, Platform::Other);
    let err = exec
        .execute(&format!("http://{addr}/user/posts/5"), HttpMethod::Get, None, None)
        .unwrap_err();
    assert_eq!(err.status_code, Some(500));
    assert_eq!(err.status_text, "Internal Server Error");
    assert_eq!(err.message, "Something went wrong");
    assert_eq!(err.data, Some(json!("\u{fffd}\u{fffd}x")));
}

#[test]
fn oversized_error_body_keeps_status() {
    let addr = serve_raw_once("500 Internal Server Error", vec![b'a'; 4096]);
    let exec = Executor::new(
        ClientConfig::new(&format!("http://{addr}")).with_platform(Platform::Other),
        UreqTransport::with_body_limit(16),
    );
    let err = exec
        .execute(&format!("http://{addr}/user/posts/5"), HttpMethod::Get, None, None)
        .unwrap_err();
    assert_eq!(err.status_code, Some(500));
    assert_eq!(err.data, Some(Value::Null));
    assert!(!err.is_network_error());
}

#[test]
fn oversized_success_body_is_network_error() {
    let addr = serve_raw_once("200 OK", vec![b'a'; 4096]);
    let exec = Executor::new(
        ClientConfig::new(&format!("http://{addr}")).with_platform(Platform::Other),
        UreqTransport::with_body_limit(16),
    );
    let err = exec
        .execute(&format!("http://{addr}/user/posts/5"), HttpMethod::Get, None, None)
        .unwrap_err();
    assert_eq!(err, ApiError::network());
}

#[test]
fn nonstandard_status_uses_code_as_text() {
    let addr = serve_raw_once("599 Custom Reason", b"{}".to_vec());
    let exec = executor(addr, Platform::Other);
    let err = exec
        .execute(&format!("http://{addr}/user/posts/5"), HttpMethod::Get, None, None)
        .unwrap_err();
    assert_eq!(err.status_code, Some(599));
    assert_eq!(err.status_text, "599");
}
