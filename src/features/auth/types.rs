use crate::{
    features::{common::expose, users::types::User},
    gateway::{normalize_token_pair, ApiError, TokenPair},
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(serialize_with = "expose")]
    pub password_confirm: SecretString,
    pub invite_code: String,
}

impl RegisterRequest {
    /// Local checks run before anything is sent.
    /// # Errors
    /// Returns `ApiError::Validation` describing the first problem found.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::Validation("username is required".to_string()));
        }
        if !valid_email(&self.email) {
            return Err(ApiError::Validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ApiError::Validation("password is required".to_string()));
        }
        if self.password.expose_secret() != self.password_confirm.expose_secret() {
            return Err(ApiError::Validation("passwords do not match".to_string()));
        }
        if self.invite_code.trim().is_empty() {
            return Err(ApiError::Validation("invite code is required".to_string()));
        }
        Ok(())
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Result of a registration: the new account and, when the server signs the
/// user in right away, its token pair.
#[derive(Clone, Debug)]
pub struct Registration {
    pub user: User,
    pub tokens: Option<TokenPair>,
}

impl Registration {
    /// Accepts either a bare user object or `{"user": {..}, "tokens": {..}}`.
    /// # Errors
    /// Returns `ApiError::Parse` when no user can be read from `body`.
    pub fn from_response(body: &Value) -> Result<Self, ApiError> {
        let user_value = body
            .get("user")
            .filter(|user| user.is_object())
            .unwrap_or(body);

        let user = User::deserialize(user_value)
            .map_err(|err| ApiError::Parse(format!("failed to decode registered user: {err}")))?;

        Ok(Self {
            user,
            tokens: normalize_token_pair(body),
        })
    }
}

/// Invite code as listed by admins and returned by `/auth/invite/create/`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InviteCode {
    pub id: u64,
    pub code: String,
    #[serde(default)]
    pub created_by: Option<User>,
    #[serde(default)]
    pub used_by: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub used_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Invite bought with credits through `/auth/invite/generate/`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GeneratedInvite {
    pub code: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@tracker.tld".to_string(),
            password: SecretString::from("hunter22".to_string()),
            password_confirm: SecretString::from("hunter22".to_string()),
            invite_code: "INV-1".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn registration_checks() {
        let mut bad_email = request();
        bad_email.email = "alice".to_string();
        assert!(matches!(bad_email.validate(), Err(ApiError::Validation(_))));

        let mut mismatch = request();
        mismatch.password_confirm = SecretString::from("other".to_string());
        assert!(matches!(mismatch.validate(), Err(ApiError::Validation(m)) if m.contains("match")));

        let mut no_invite = request();
        no_invite.invite_code = "  ".to_string();
        assert!(matches!(no_invite.validate(), Err(ApiError::Validation(_))));

        let mut no_user = request();
        no_user.username = String::new();
        assert!(matches!(no_user.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn login_request_serializes_password() -> Result<(), serde_json::Error> {
        let body = serde_json::to_value(LoginRequest::new("alice", "secret"))?;
        assert_eq!(body, json!({"username": "alice", "password": "secret"}));
        Ok(())
    }

    #[test]
    fn login_request_debug_redacts_password() {
        let debug = format!("{:?}", LoginRequest::new("alice", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn registration_reads_bare_user() -> Result<(), ApiError> {
        let registration =
            Registration::from_response(&json!({"id": 7, "username": "alice"}))?;
        assert_eq!(registration.user.id, 7);
        assert!(registration.tokens.is_none());
        Ok(())
    }

    #[test]
    fn registration_reads_wrapped_user_and_tokens() -> Result<(), ApiError> {
        let registration = Registration::from_response(&json!({
            "user": {"id": 8, "username": "bob"},
            "tokens": {"access": "a1", "refresh": "r1"}
        }))?;
        assert_eq!(registration.user.username, "bob");
        let tokens = registration
            .tokens
            .ok_or_else(|| ApiError::Parse("missing tokens".to_string()))?;
        assert_eq!(tokens.access().expose_secret(), "a1");
        Ok(())
    }
}
