use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Receives the redirect-to-login side effect when a session cannot be recovered.
pub trait Navigator: Send + Sync {
    /// Current location, if the front end tracks one.
    fn location(&self) -> Option<String>;

    fn navigate(&self, location: &str);

    /// Called after a new session is stored. A navigator resting on the login
    /// location should move off it here.
    fn session_started(&self) {}
}

/// Terminal navigator: remembers where it is and tells the user to sign in
/// again when sent to the login location.
#[derive(Default)]
pub struct LoginPrompt {
    location: Mutex<Option<String>>,
}

impl LoginPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for LoginPrompt {
    fn location(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, location: &str) {
        warn!(location, "session expired, run `tracker login` to sign in again");
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = Some(location.to_string());
    }

    fn session_started(&self) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
