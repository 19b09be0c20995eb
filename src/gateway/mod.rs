//! Authenticated gateway to the tracker REST API.
//!
//! ## Token lifecycle
//!
//! 1. **Login:** `/auth/login/` returns a token pair which is written to the
//!    session store (both keys at once).
//! 2. **Requests:** every call carries `Authorization: Bearer <access>`.
//! 3. **Expiry:** a 401 on any endpoint except login and refresh starts one
//!    refresh (`/auth/refresh/` with the stored refresh token). Requests that
//!    hit a 401 while it runs wait for the same refresh, then replay once with
//!    the new access token.
//! 4. **Failure:** if the refresh cannot succeed the session is cleared, the
//!    navigator is sent to the login location once, and every waiting request
//!    fails with the refresh error.
//!
//! Network errors, timeouts and other HTTP statuses are never retried here.

pub mod client;
pub mod config;
pub mod errors;
pub mod flight;
pub mod navigator;
pub mod request;
pub mod session;
pub mod tokens;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use errors::{ApiError, RefreshError, SessionError};
pub use navigator::{LoginPrompt, Navigator};
pub use request::{ApiRequest, MultipartForm};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use tokens::{normalize_token_pair, TokenPair};
