//! Client wrappers for `/credits/`.

use crate::{
    features::{
        common::Paginated,
        credits::types::{
            Balance, CompleteDownloadResponse, CreditTransaction, DownloadCheck,
            LockCreditResponse, PromoteResponse, RatioStatus, TransactionParams,
            UploadCreditResponse, UserClass,
        },
    },
    gateway::{ApiClient, ApiError, ApiRequest},
};
use serde_json::json;

/// # Errors
/// Returns an error if the request fails.
pub async fn balance(client: &ApiClient) -> Result<Balance, ApiError> {
    client.get("/credits/balance/").await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn transactions(
    client: &ApiClient,
    params: &TransactionParams,
) -> Result<Paginated<CreditTransaction>, ApiError> {
    client
        .send_json(ApiRequest::get("/credits/transactions/").query(params.pairs()))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn transaction(client: &ApiClient, id: u64) -> Result<CreditTransaction, ApiError> {
    client.get(&format!("/credits/transactions/{id}/")).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn user_classes(client: &ApiClient) -> Result<Vec<UserClass>, ApiError> {
    client.get("/credits/user-classes/").await
}

/// Asks whether the balance covers downloading a torrent.
/// # Errors
/// Returns an error if the request fails.
pub async fn check_download(
    client: &ApiClient,
    torrent_id: &str,
) -> Result<DownloadCheck, ApiError> {
    client
        .post("/credits/check-download/", &json!({ "torrent_id": torrent_id }))
        .await
}

/// Reserves credits for a download until it completes.
/// # Errors
/// Returns an error if the request fails.
pub async fn lock_credit(
    client: &ApiClient,
    torrent_id: &str,
    amount: &str,
) -> Result<LockCreditResponse, ApiError> {
    client
        .post(
            "/credits/lock-credit/",
            &json!({ "torrent_id": torrent_id, "amount": amount }),
        )
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn complete_download(
    client: &ApiClient,
    torrent_id: &str,
    transaction_id: u64,
) -> Result<CompleteDownloadResponse, ApiError> {
    client
        .post(
            "/credits/complete-download/",
            &json!({ "torrent_id": torrent_id, "transaction_id": transaction_id }),
        )
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn upload_credit(
    client: &ApiClient,
    torrent_id: &str,
    size: u64,
) -> Result<UploadCreditResponse, ApiError> {
    client
        .post(
            "/credits/upload-credit/",
            &json!({ "torrent_id": torrent_id, "size": size }),
        )
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn ratio_status(client: &ApiClient) -> Result<RatioStatus, ApiError> {
    client.get("/credits/ratio-status/").await
}

/// Admin only.
/// # Errors
/// Returns an error if the request fails.
pub async fn adjust_credits(
    client: &ApiClient,
    user_id: u64,
    amount: &str,
    reason: &str,
) -> Result<CreditTransaction, ApiError> {
    client
        .post(
            "/credits/admin/adjust/",
            &json!({ "user_id": user_id, "amount": amount, "reason": reason }),
        )
        .await
}

/// Admin only.
/// # Errors
/// Returns an error if the request fails.
pub async fn promote_user(
    client: &ApiClient,
    user_id: u64,
    new_class_id: u64,
) -> Result<PromoteResponse, ApiError> {
    client
        .post(
            "/credits/admin/promote/",
            &json!({ "user_id": user_id, "new_class_id": new_class_id }),
        )
        .await
}
