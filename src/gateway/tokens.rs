//! Token pair type and normalization of the token payloads the API returns.
//!
//! The login and refresh endpoints have been seen answering with several
//! shapes. They are tried in this order, first match wins:
//!
//! 1. flat `{"access": .., "refresh": ..}`
//! 2. alternate names: access from `access_token`, `token` or `accessToken`,
//!    refresh from `refresh_token` or `refreshToken`
//! 3. a wrapper object under `tokens`, `data` or `token`, inside which shapes
//!    1 and 2 are tried again
//!
//! Empty strings count as missing.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

const ALT_ACCESS_KEYS: [&str; 3] = ["access_token", "token", "accessToken"];
const ALT_REFRESH_KEYS: [&str; 2] = ["refresh_token", "refreshToken"];
const WRAPPER_KEYS: [&str; 3] = ["tokens", "data", "token"];

/// Access/refresh credentials of one authenticated session.
#[derive(Clone, Debug)]
pub struct TokenPair {
    access: SecretString,
    refresh: SecretString,
}

impl TokenPair {
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: SecretString::from(access.into()),
            refresh: SecretString::from(refresh.into()),
        }
    }

    #[must_use]
    pub fn access(&self) -> &SecretString {
        &self.access
    }

    #[must_use]
    pub fn refresh(&self) -> &SecretString {
        &self.refresh
    }

    /// Bearer header value for the access token.
    #[must_use]
    pub fn bearer(&self) -> String {
        bearer(&self.access)
    }
}

pub(crate) fn bearer(token: &SecretString) -> String {
    format!("Bearer {}", token.expose_secret())
}

/// Extracts a token pair from any of the tolerated response shapes.
#[must_use]
pub fn normalize_token_pair(body: &Value) -> Option<TokenPair> {
    flat_pair(body).or_else(|| alternate_pair(body)).or_else(|| {
        WRAPPER_KEYS
            .iter()
            .filter_map(|key| body.get(key).filter(|inner| inner.is_object()))
            .find_map(|inner| flat_pair(inner).or_else(|| alternate_pair(inner)))
    })
}

fn flat_pair(body: &Value) -> Option<TokenPair> {
    let access = non_empty(body, "access")?;
    let refresh = non_empty(body, "refresh")?;
    Some(TokenPair::new(access, refresh))
}

fn alternate_pair(body: &Value) -> Option<TokenPair> {
    let access = ALT_ACCESS_KEYS.iter().find_map(|key| non_empty(body, key))?;
    let refresh = ALT_REFRESH_KEYS.iter().find_map(|key| non_empty(body, key))?;
    Some(TokenPair::new(access, refresh))
}

fn non_empty<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
