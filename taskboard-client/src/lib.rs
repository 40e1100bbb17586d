//! Client for the taskboard REST API.
//!
//! Every call goes through [`ApiClient::execute`], which attaches the
//! session's bearer token, retries transient failures with exponential
//! backoff and refreshes an expired access token once per request.

pub mod client;
pub mod config;
pub mod errors;
pub mod retry;
pub mod session;
pub mod transport;

pub use client::{ApiClient, LoginRedirect};
pub use config::ClientConfig;
pub use errors::{ApiError, SessionStoreError, TransportError};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, Tokens};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
