//! Sign-in state on top of the gateway. Tokens live in the session store; this
//! keeps only the non-sensitive profile of the signed-in user in memory.

use crate::{
    features::{
        auth::{
            client,
            types::{LoginRequest, RegisterRequest},
        },
        users::{self, types::User},
    },
    gateway::{ApiClient, ApiError},
};
use std::sync::{PoisonError, RwLock};
use tracing::{error, info, instrument, warn};

pub struct AuthState {
    client: ApiClient,
    user: RwLock<Option<User>>,
}

impl AuthState {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Signs in, stores the token pair and loads the profile. Any failure
    /// leaves no session behind.
    /// # Errors
    /// Returns the login, storage or profile error.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let result = self.sign_in(credentials).await;

        match &result {
            Ok(user) => info!(user_id = user.id, "signed in"),
            Err(err) => {
                warn!(error = %err, "sign in failed");
                if let Err(clear_err) = self.client.end_session() {
                    error!(error = %clear_err, "failed to clear session");
                }
                self.set_user(None);
            }
        }

        result
    }

    async fn sign_in(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let tokens = client::login(&self.client, credentials).await?;
        self.client.start_session(&tokens)?;

        let user = users::client::profile(&self.client).await?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Registers an account. When the server answers with tokens the new
    /// session is stored as well.
    /// # Errors
    /// Returns the validation, request or storage error.
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let registration = client::register(&self.client, request).await?;

        if let Some(tokens) = &registration.tokens {
            self.client.start_session(tokens)?;
        }

        info!(
            user_id = registration.user.id,
            signed_in = registration.tokens.is_some(),
            "registered"
        );

        self.set_user(Some(registration.user.clone()));
        Ok(registration.user)
    }

    /// Forgets the user and removes both tokens.
    /// # Errors
    /// Returns `ApiError::Session` if the store cannot be cleared.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.set_user(None);
        self.client.end_session()
    }

    /// Confirms the stored session by loading the profile; the gateway
    /// refreshes expired tokens on the way. Authentication failures sign the
    /// user out and yield `None`; other failures are returned.
    /// # Errors
    /// Returns network, timeout and non-auth HTTP errors.
    pub async fn check_auth(&self) -> Result<Option<User>, ApiError> {
        if !self.client.is_authenticated() {
            self.set_user(None);
            return Ok(None);
        }

        match users::client::profile(&self.client).await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) if err.is_auth_failure() => {
                info!(error = %err, "stored session is no longer valid");
                self.logout()?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
