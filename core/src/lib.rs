//! Client core for the GymHub backend API.
//!
//! # Overview
//! Everything the app needs to talk to its REST backend: the endpoint
//! registry, a generic request executor with a normalised `ApiError`, a
//! helper that turns errors into user-facing notifications, and one typed
//! method per backend operation on `GymClient`.
//!
//! # Design
//! - `Executor` splits each call into a pure `build_request`, one
//!   `Transport::send`, and a pure `interpret_response`, so every rule about
//!   headers and errors is testable without a network.
//! - A call is a single attempt: no retry, cache, queue or cancellation.
//!   The configured timeout (10 s by default) is the only bounded wait.
//! - Platform differences live in `ClientConfig`, resolved once.
//! - `UreqTransport` (feature `ureq`, on by default) is the blocking
//!   transport; hosts can supply their own.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod http;
pub mod multipart;
pub mod presentation;
mod resources;
pub mod session;
pub mod transport;
pub mod types;

pub use client::GymClient;
pub use config::{ClientConfig, ConfigError, Platform};
pub use endpoints::{Endpoints, Route};
pub use error::{ApiError, ExecuteError, TransportError, UnsupportedMethod};
pub use executor::Executor;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use multipart::MultipartForm;
pub use presentation::{present_error, FieldError, Notification};
pub use session::{Anonymous, MemoryTokenStore, TokenStore};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
