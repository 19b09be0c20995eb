//! Client wrappers for `/torrents/`.

use crate::{
    features::{
        common::Paginated,
        torrents::types::{
            HealthReport, MyTorrentsParams, Torrent, TorrentCategory, TorrentListParams,
            TorrentStats, TorrentUpload,
        },
    },
    gateway::{ApiClient, ApiError, ApiRequest},
};
use serde_json::Value;

/// Info hashes are hex digests, so a valid one never needs escaping in a path.
fn torrent_path(info_hash: &str, action: &str) -> Result<String, ApiError> {
    let info_hash = info_hash.trim();
    if info_hash.is_empty() || !info_hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ApiError::Validation(format!(
            "info hash must be hexadecimal, got {info_hash:?}"
        )));
    }
    Ok(format!("/torrents/{info_hash}/{action}"))
}

/// # Errors
/// Returns an error if the request fails.
pub async fn list(
    client: &ApiClient,
    params: &TorrentListParams,
) -> Result<Paginated<Torrent>, ApiError> {
    client
        .send_json(ApiRequest::get("/torrents/").query(params.pairs()))
        .await
}

/// # Errors
/// Returns `ApiError::Validation` for a malformed info hash, otherwise an
/// error if the request fails.
pub async fn get(client: &ApiClient, info_hash: &str) -> Result<Torrent, ApiError> {
    client.get(&torrent_path(info_hash, "")?).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn stats(client: &ApiClient, info_hash: &str) -> Result<TorrentStats, ApiError> {
    client.get(&torrent_path(info_hash, "stats/")?).await
}

/// Peer entries are passed through untyped.
/// # Errors
/// Returns an error if the request fails.
pub async fn peers(client: &ApiClient, info_hash: &str) -> Result<Vec<Value>, ApiError> {
    client.get(&torrent_path(info_hash, "peers/")?).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn health(client: &ApiClient, info_hash: &str) -> Result<HealthReport, ApiError> {
    client.get(&torrent_path(info_hash, "health/")?).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn upload(client: &ApiClient, upload: &TorrentUpload) -> Result<Torrent, ApiError> {
    client.upload("/torrents/upload/", upload.to_form()).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn delete(client: &ApiClient, info_hash: &str) -> Result<(), ApiError> {
    client.delete(&torrent_path(info_hash, "delete/")?).await
}

/// Returns the raw `.torrent` file.
/// # Errors
/// Returns an error if the request fails.
pub async fn download(client: &ApiClient, info_hash: &str) -> Result<Vec<u8>, ApiError> {
    client
        .send_bytes(ApiRequest::get(torrent_path(info_hash, "download/")?))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn categories(client: &ApiClient) -> Result<Vec<TorrentCategory>, ApiError> {
    client.get("/torrents/categories/").await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn popular(client: &ApiClient, limit: Option<u32>) -> Result<Vec<Torrent>, ApiError> {
    client
        .send_json(
            ApiRequest::get("/torrents/popular/")
                .query([("limit", limit.map(|limit| limit.to_string()))]),
        )
        .await
}

/// Torrents uploaded by the signed-in user.
/// # Errors
/// Returns an error if the request fails.
pub async fn mine(
    client: &ApiClient,
    params: &MyTorrentsParams,
) -> Result<Paginated<Torrent>, ApiError> {
    client
        .send_json(ApiRequest::get("/torrents/my-torrents/").query(params.pairs()))
        .await
}
