//! Client wrappers for the staff-only `/admin/` endpoints.

use crate::{
    features::{
        admin::types::{
            merge_body, ActionsLogParams, AdminDashboard, CleanupResponse, InviteCodeParams,
            MaintenanceResponse, MassActionResponse, SystemConfig, SystemConfigParams,
            SystemConfigUpdate, UserListParams, UserUpdate,
        },
        auth::types::InviteCode,
        common::Paginated,
        users::types::User,
    },
    gateway::{ApiClient, ApiError, ApiRequest},
};
use serde_json::{json, Map, Value};

/// # Errors
/// Returns an error if the request fails.
pub async fn dashboard(client: &ApiClient) -> Result<AdminDashboard, ApiError> {
    client.get("/admin/dashboard/").await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn users(
    client: &ApiClient,
    params: &UserListParams,
) -> Result<Paginated<User>, ApiError> {
    client
        .send_json(ApiRequest::get("/admin/users/").query(params.pairs()))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn user(client: &ApiClient, id: u64) -> Result<User, ApiError> {
    client.get(&format!("/admin/users/{id}/")).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn update_user(client: &ApiClient, id: u64, update: &UserUpdate) -> Result<User, ApiError> {
    client.patch(&format!("/admin/users/{id}/"), update).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn delete_user(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/admin/users/{id}/")).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn invite_codes(
    client: &ApiClient,
    params: &InviteCodeParams,
) -> Result<Paginated<InviteCode>, ApiError> {
    client
        .send_json(ApiRequest::get("/admin/invite-codes/").query(params.pairs()))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn create_invite_code(
    client: &ApiClient,
    expires_at: Option<&str>,
) -> Result<InviteCode, ApiError> {
    let body = expires_at.map_or_else(|| json!({}), |at| json!({ "expires_at": at }));
    client.post("/admin/invite-codes/", &body).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn delete_invite_code(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/admin/invite-codes/{id}/")).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn system_config(
    client: &ApiClient,
    params: &SystemConfigParams,
) -> Result<Paginated<SystemConfig>, ApiError> {
    client
        .send_json(ApiRequest::get("/admin/system-config/").query(params.pairs()))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn update_system_config(
    client: &ApiClient,
    id: u64,
    update: &SystemConfigUpdate,
) -> Result<SystemConfig, ApiError> {
    client
        .patch(&format!("/admin/system-config/{id}/"), update)
        .await
}

/// Report contents depend on the report type and are returned untyped.
/// # Errors
/// Returns an error if the request fails.
pub async fn generate_report(
    client: &ApiClient,
    report_type: &str,
    params: &Map<String, Value>,
) -> Result<Value, ApiError> {
    let body = merge_body(json!({ "report_type": report_type }), params);
    client.post("/admin/reports/generate/", &body).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn mass_action(
    client: &ApiClient,
    action: &str,
    user_ids: &[u64],
    params: &Map<String, Value>,
) -> Result<MassActionResponse, ApiError> {
    let body = merge_body(json!({ "action": action, "user_ids": user_ids }), params);
    client.post("/admin/mass-action/", &body).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn actions_log(
    client: &ApiClient,
    params: &ActionsLogParams,
) -> Result<Paginated<Value>, ApiError> {
    client
        .send_json(ApiRequest::get("/admin/actions-log/").query(params.pairs()))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn run_maintenance(client: &ApiClient, task: &str) -> Result<MaintenanceResponse, ApiError> {
    client
        .post("/admin/maintenance/", &json!({ "task": task }))
        .await
}

/// Extra parameters are sent as query pairs next to `metric`.
/// # Errors
/// Returns an error if the request fails.
pub async fn analytics(
    client: &ApiClient,
    metric: &str,
    params: &[(String, String)],
) -> Result<Value, ApiError> {
    let pairs = std::iter::once(("metric".to_string(), Some(metric.to_string()))).chain(
        params
            .iter()
            .filter(|(key, _)| key != "metric")
            .map(|(key, value)| (key.clone(), Some(value.clone()))),
    );

    client
        .send_json(ApiRequest::get("/admin/analytics/").query(pairs))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn bulk_torrent_moderation(
    client: &ApiClient,
    action: &str,
    torrent_ids: &[String],
    reason: Option<&str>,
) -> Result<MassActionResponse, ApiError> {
    client
        .post(
            "/admin/bulk-torrent-moderation/",
            &json!({ "action": action, "torrent_ids": torrent_ids, "reason": reason }),
        )
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn run_cleanup(client: &ApiClient, cleanup_type: &str) -> Result<CleanupResponse, ApiError> {
    client
        .post("/admin/cleanup/", &json!({ "cleanup_type": cleanup_type }))
        .await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn performance_metrics(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/performance-metrics/").await
}
