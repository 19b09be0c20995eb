//! Client wrappers for the account endpoints under `/user/`.

use crate::{
    features::users::types::{ApiToken, CreateTokenRequest, ProfileUpdate, User, UserStats},
    gateway::{ApiClient, ApiError, ApiRequest, MultipartForm},
};

const PROFILE_PATH: &str = "/user/profile/";

/// Fetches the signed-in user's profile.
/// # Errors
/// Returns an error if the request fails.
pub async fn profile(client: &ApiClient) -> Result<User, ApiError> {
    client.get(PROFILE_PATH).await
}

/// Updates scalar profile fields. Sent as multipart to match the avatar upload.
/// # Errors
/// Returns an error if the request fails.
pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> Result<User, ApiError> {
    let form = MultipartForm::new()
        .text_opt("email", update.email.as_deref())
        .text_opt("first_name", update.first_name.as_deref())
        .text_opt("last_name", update.last_name.as_deref());

    client
        .send_json(ApiRequest::patch(PROFILE_PATH).multipart(form))
        .await
}

/// Replaces the profile picture.
/// # Errors
/// Returns an error if the request fails.
pub async fn upload_avatar(
    client: &ApiClient,
    file_name: &str,
    mime: Option<&str>,
    bytes: Vec<u8>,
) -> Result<User, ApiError> {
    let form = MultipartForm::new().file("profile_picture", file_name, mime, bytes);
    client
        .send_json(ApiRequest::patch(PROFILE_PATH).multipart(form))
        .await
}

/// Removes the profile picture by sending an empty value.
/// # Errors
/// Returns an error if the request fails.
pub async fn remove_avatar(client: &ApiClient) -> Result<User, ApiError> {
    let form = MultipartForm::new().text("profile_picture", "");
    client
        .send_json(ApiRequest::patch(PROFILE_PATH).multipart(form))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn stats(client: &ApiClient) -> Result<UserStats, ApiError> {
    client.get("/user/stats/").await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn tokens(client: &ApiClient) -> Result<Vec<ApiToken>, ApiError> {
    client.get("/user/tokens/").await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn create_token(
    client: &ApiClient,
    request: &CreateTokenRequest,
) -> Result<ApiToken, ApiError> {
    client.post("/user/tokens/", request).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn delete_token(client: &ApiClient, token_id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/user/tokens/{token_id}/")).await
}
