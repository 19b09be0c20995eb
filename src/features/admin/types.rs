use crate::features::{common::lenient_string, torrents::types::Torrent, users::types::User};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AdminDashboard {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_torrents: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_credit_transacted: String,
    #[serde(default)]
    pub active_peers: u64,
    #[serde(default)]
    pub suspicious_activities_today: u64,
    #[serde(default)]
    pub active_ip_blocks: u64,
    #[serde(default)]
    pub banned_users: u64,
    #[serde(default)]
    pub system_alerts: u64,
    #[serde(default)]
    pub recent_logs: u64,
    #[serde(default)]
    pub recent_users: Vec<User>,
    #[serde(default)]
    pub recent_suspicious: Vec<SuspiciousActivity>,
    #[serde(default)]
    pub recent_alerts: Vec<SystemAlert>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SuspiciousActivity {
    pub id: u64,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub activity_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub severity: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IpBlock {
    pub id: u64,
    pub ip_address: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub blocked_by: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SystemAlert {
    pub id: u64,
    #[serde(default)]
    pub alert_type: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub torrent: Option<Torrent>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<String>,
    #[serde(default)]
    pub resolved_by: Option<User>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SystemConfig {
    pub id: u64,
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Partial update of a configuration entry; unset fields are not sent.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SystemConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Partial update of an account by an admin.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct UserListParams {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub ordering: Option<String>,
}

impl UserListParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 4] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("search", self.search.clone()),
            ("is_active", self.is_active.map(|active| active.to_string())),
            ("ordering", self.ordering.clone()),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct InviteCodeParams {
    pub page: Option<u32>,
    pub is_active: Option<bool>,
    pub ordering: Option<String>,
}

impl InviteCodeParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 3] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("is_active", self.is_active.map(|active| active.to_string())),
            ("ordering", self.ordering.clone()),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct SystemConfigParams {
    pub page: Option<u32>,
    pub category: Option<String>,
    pub ordering: Option<String>,
}

impl SystemConfigParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 3] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("category", self.category.clone()),
            ("ordering", self.ordering.clone()),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActionsLogParams {
    pub page: Option<u32>,
    pub user: Option<u64>,
    pub action: Option<String>,
    pub ordering: Option<String>,
}

impl ActionsLogParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 4] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("user", self.user.map(|user| user.to_string())),
            ("action", self.action.clone()),
            ("ordering", self.ordering.clone()),
        ]
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MassActionResponse {
    pub success: bool,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MaintenanceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub cleaned_count: u64,
}

/// Merges caller supplied fields into a fixed request body. Fixed fields win.
pub(crate) fn merge_body(fixed: Value, extra: &Map<String, Value>) -> Value {
    match fixed {
        Value::Object(fixed) => {
            let mut body = extra.clone();
            body.extend(fixed);
            Value::Object(body)
        }
        other => other,
    }
}
