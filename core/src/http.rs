//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! executor builds `HttpRequest` values and interprets `HttpResponse` values;
//! a `Transport` performs the round-trip in between. Keeping the exchange as
//! data lets the header rules and error normalisation be tested without a
//! network.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::UnsupportedMethod;
use crate::multipart::MultipartForm;

/// HTTP method for a request. Only the four verbs the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"get"`, `"Get"` and `"GET"` all parse.
impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedMethod(s.to_string()))
    }
}

/// Payload attached to a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized JSON text.
    Json(String),
    /// Form parts; the wire encoding and boundary are chosen by the transport.
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_string(value).map(RequestBody::Json)
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(form: MultipartForm) -> Self {
        RequestBody::Multipart(form)
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Executor::build_request`. `url` is always absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` once a status line has been received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("GET", HttpMethod::Get)]
    #[case("get", HttpMethod::Get)]
    #[case("Post", HttpMethod::Post)]
    #[case("put", HttpMethod::Put)]
    #[case("DeLeTe", HttpMethod::Delete)]
    fn method_parses_case_insensitively(#[case] raw: &str, #[case] expected: HttpMethod) {
        assert_eq!(raw.parse::<HttpMethod>().unwrap(), expected);
    }

    #[rstest]
    #[case("PATCH")]
    #[case("HEAD")]
    #[case("")]
    #[case("GETS")]
    fn unsupported_methods_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<HttpMethod>().unwrap_err();
        assert_eq!(err, UnsupportedMethod(raw.to_string()));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/x".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer abc".to_string())],
            body: None,
        };
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 204,
            status_text: "No Content".to_string(),
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }

    #[test]
    fn json_body_serializes_value() {
        let body = RequestBody::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(body, RequestBody::Json(r#"{"a":1}"#.to_string()));
        assert!(!body.is_multipart());
    }
}
