//! Connection settings for the tracker API. Values come from the CLI globals
//! (flags or `TRACKER_*` environment variables) and fall back to the defaults
//! below. Configuration values are public; tokens never live here.

use super::errors::ApiError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
/// Default request timeout applied to every call, refreshes included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login/";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh/";
/// Where the navigator is sent when the session cannot be recovered.
pub const DEFAULT_LOGIN_LOCATION: &str = "/login";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub login_path: String,
    pub refresh_path: String,
    pub login_location: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            login_location: DEFAULT_LOGIN_LOCATION.to_string(),
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that the base URL is absolute http(s).
    /// # Errors
    /// Returns `ApiError::Config` when the base URL cannot be used.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ApiError::Config(format!("invalid base URL {}: {err}", self.base_url)))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::Config(format!(
                    "unsupported scheme {scheme} in base URL"
                )))
            }
        }

        if url.host().is_none() {
            return Err(ApiError::Config("base URL has no host".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be positive".to_string()));
        }

        Ok(())
    }

    /// Builds the absolute URL for `path` with the given query pairs appended.
    /// # Errors
    /// Returns `ApiError::Config` when the joined URL does not parse.
    pub fn endpoint_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let joined = join_base(&self.base_url, path);
        let mut url = Url::parse(&joined)
            .map_err(|err| ApiError::Config(format!("invalid request URL {joined}: {err}")))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }

    /// Scheme, host and port of the base URL, used for media links.
    #[must_use]
    pub fn origin(&self) -> String {
        Url::parse(self.base_url.trim())
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_default()
    }

    /// True when `path` is the login or refresh endpoint, which are never
    /// retried after a 401.
    #[must_use]
    pub fn is_auth_endpoint(&self, path: &str) -> bool {
        let path = normalize_path(path);
        path == normalize_path(&self.login_path) || path == normalize_path(&self.refresh_path)
    }
}

/// Joins the base URL and the path with exactly one slash between them.
fn join_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path.trim_matches('/')
}
