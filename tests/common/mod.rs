#![allow(dead_code)]

use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tracker_client::gateway::{
    ApiClient, ApiError, ClientConfig, MemorySessionStore, Navigator, SessionStore,
};
use wiremock::MockServer;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Navigator that counts redirects and leaves the login location when a
/// session starts.
#[derive(Default)]
pub struct CountingNavigator {
    calls: AtomicUsize,
    location: Mutex<Option<String>>,
}

impl CountingNavigator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<String> {
        self.location.lock().ok().and_then(|location| location.clone())
    }
}

impl Navigator for CountingNavigator {
    fn location(&self) -> Option<String> {
        self.last()
    }

    fn navigate(&self, location: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut current) = self.location.lock() {
            *current = Some(location.to_string());
        }
    }

    fn session_started(&self) {
        if let Ok(mut current) = self.location.lock() {
            *current = None;
        }
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub session: Arc<MemorySessionStore>,
    pub navigator: Arc<CountingNavigator>,
}

pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn harness(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Result<Harness, ApiError> {
    harness_with_timeout(server, access, refresh, Duration::from_secs(10))
}

pub fn harness_with_timeout(
    server: &MockServer,
    access: Option<&str>,
    refresh: Option<&str>,
    timeout: Duration,
) -> Result<Harness, ApiError> {
    let session = Arc::new(MemorySessionStore::with_parts(access, refresh));
    let navigator = Arc::new(CountingNavigator::default());
    let config = ClientConfig::new(api_base(server)).with_timeout(timeout);

    let client = ApiClient::new(
        config,
        Arc::clone(&session) as Arc<dyn SessionStore>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    )?;

    Ok(Harness {
        client,
        session,
        navigator,
    })
}
