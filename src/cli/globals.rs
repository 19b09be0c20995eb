use crate::gateway::{
    config::DEFAULT_TIMEOUT, ApiClient, ClientConfig, FileSessionStore, LoginPrompt,
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc, time::Duration};

const SESSION_DIR: &str = "tracker-client";
const SESSION_FILE: &str = "session.json";

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            session_file: default_session_file(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn set_session_file(&mut self, path: PathBuf) {
        self.session_file = path;
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Builds the API client over the session file.
    /// # Errors
    /// Returns an error if the session file is unreadable or the URL is invalid.
    pub fn client(&self) -> Result<ApiClient> {
        let session = FileSessionStore::open(&self.session_file).with_context(|| {
            format!(
                "failed to open session file {}",
                self.session_file.display()
            )
        })?;

        let config = ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout);

        ApiClient::new(config, Arc::new(session), Arc::new(LoginPrompt::new()))
            .context("failed to build API client")
    }
}

/// `<config dir>/tracker-client/session.json`, or the working directory when
/// no config directory is known.
#[must_use]
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(SESSION_DIR))
        .unwrap_or_default()
        .join(SESSION_FILE)
}
