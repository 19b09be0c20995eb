//! Client wrappers for the `/auth/` endpoints. Login and refresh responses are
//! normalized through the same token-shape rules as the gateway's refresh.

use crate::{
    features::auth::types::{
        GeneratedInvite, InviteCode, LoginRequest, RegisterRequest, Registration,
    },
    gateway::{normalize_token_pair, ApiClient, ApiError, TokenPair},
};
use serde_json::{json, Value};

/// Exchanges credentials for a token pair. The pair is not stored here.
/// A 401 from this endpoint is returned as is and never triggers a refresh.
/// # Errors
/// Returns an error if the request fails or no token pair is found.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<TokenPair, ApiError> {
    let login_path = client.config().login_path.clone();
    let body: Value = client.post(&login_path, request).await?;

    normalize_token_pair(&body)
        .ok_or_else(|| ApiError::Parse("login response did not contain a token pair".to_string()))
}

/// Creates an account after validating the request locally.
/// # Errors
/// Returns `ApiError::Validation` before any network call, or the request error.
pub async fn register(
    client: &ApiClient,
    request: &RegisterRequest,
) -> Result<Registration, ApiError> {
    request.validate()?;
    let body: Value = client.post("/auth/register/", request).await?;
    Registration::from_response(&body)
}

/// # Errors
/// Returns an error if the request fails.
pub async fn create_invite(client: &ApiClient) -> Result<InviteCode, ApiError> {
    client.post("/auth/invite/create/", &json!({})).await
}

/// Buys an invite code with the caller's credits.
/// # Errors
/// Returns an error if the request fails.
pub async fn generate_invite(client: &ApiClient) -> Result<GeneratedInvite, ApiError> {
    client.post("/auth/invite/generate/", &json!({})).await
}
