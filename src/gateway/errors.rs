use thiserror::Error;

/// Errors surfaced by the API gateway and the feature clients built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("config error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("response error: {0}")]
    Parse(String),
    #[error("request error: {0}")]
    Serialization(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("session refresh failed: {0}")]
    Refresh(#[from] RefreshError),
    #[error("session storage error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status of the failed exchange, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Refresh(RefreshError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True for 401 responses and for failed session refreshes.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. } | Self::Refresh(_))
    }
}

/// Outcome of a failed refresh. Cloneable because every request waiting on the
/// same refresh receives a copy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RefreshError {
    #[error("no refresh token available")]
    MissingRefreshToken,
    #[error("refresh rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unrecognized refresh response: {0}")]
    Malformed(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("failed to persist session: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session file: {0}")]
    Format(#[from] serde_json::Error),
}
