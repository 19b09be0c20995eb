//! Session storage for the access/refresh token pair. The gateway only talks to
//! the `SessionStore` trait; the CLI persists to a JSON file and tests use the
//! in-memory store. Every write replaces both tokens together.

use super::{errors::SessionError, tokens::TokenPair};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};
use tracing::debug;

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Durable holder of the current session.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<SecretString>;

    fn refresh_token(&self) -> Option<SecretString>;

    /// Replaces both tokens.
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn store(&self, tokens: &TokenPair) -> Result<(), SessionError>;

    /// Removes both tokens.
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

#[derive(Clone, Default)]
struct Slots {
    access: Option<SecretString>,
    refresh: Option<SecretString>,
}

impl Slots {
    fn from_pair(tokens: &TokenPair) -> Self {
        Self {
            access: Some(tokens.access().clone()),
            refresh: Some(tokens.refresh().clone()),
        }
    }
}

/// Process-local session store.
#[derive(Default)]
pub struct MemorySessionStore {
    slots: RwLock<Slots>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tokens(tokens: &TokenPair) -> Self {
        Self {
            slots: RwLock::new(Slots::from_pair(tokens)),
        }
    }

    /// Seeds the store with only some tokens, as found in partially written storage.
    #[must_use]
    pub fn with_parts(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            slots: RwLock::new(Slots {
                access: access.map(|value| SecretString::from(value.to_string())),
                refresh: refresh.map(|value| SecretString::from(value.to_string())),
            }),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<SecretString> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access
            .clone()
    }

    fn refresh_token(&self) -> Option<SecretString> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh
            .clone()
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        *self.slots.write().unwrap_or_else(PoisonError::into_inner) = Slots::from_pair(tokens);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slots.write().unwrap_or_else(PoisonError::into_inner) = Slots::default();
        Ok(())
    }
}

#[derive(Default, Deserialize, Serialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Session store backed by a JSON file holding the two token keys.
///
/// The file is read once when opened and rewritten on every change through a
/// temporary sibling file and a rename, so readers never observe one token
/// updated without the other. On Unix the file is created with mode `0600`.
pub struct FileSessionStore {
    path: PathBuf,
    slots: RwLock<Slots>,
}

impl FileSessionStore {
    /// Opens the store, loading an existing session if the file is present.
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let slots = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Slots::default(),
            Ok(contents) => {
                let file: SessionFile = serde_json::from_str(&contents)?;
                Slots {
                    access: non_empty_secret(file.access_token),
                    refresh: non_empty_secret(file.refresh_token),
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Slots::default(),
            Err(err) => return Err(err.into()),
        };

        debug!(
            path = %path.display(),
            authenticated = slots.access.is_some(),
            "session file loaded"
        );

        Ok(Self {
            path,
            slots: RwLock::new(slots),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let file = SessionFile {
            access_token: Some(tokens.access().expose_secret().to_string()),
            refresh_token: Some(tokens.refresh().expose_secret().to_string()),
        };
        let contents = serde_json::to_vec_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn non_empty_secret(value: Option<String>) -> Option<SecretString> {
    value
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from)
}

impl SessionStore for FileSessionStore {
    fn access_token(&self) -> Option<SecretString> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access
            .clone()
    }

    fn refresh_token(&self) -> Option<SecretString> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh
            .clone()
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        self.persist(tokens)?;
        *slots = Slots::from_pair(tokens);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        *slots = Slots::default();
        Ok(())
    }
}
