use crate::features::common::lenient_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account as returned by `/user/profile/` and the admin user endpoints.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_class: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub uploaded: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub downloaded: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ratio: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bonus_points: String,
}

impl User {
    /// Admin back-office access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserStats {
    #[serde(default, deserialize_with = "lenient_string")]
    pub uploaded: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub downloaded: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ratio: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bonus_points: String,
    #[serde(default)]
    pub torrents_uploaded: u64,
    #[serde(default)]
    pub torrents_seeding: u64,
    #[serde(default)]
    pub torrents_leeching: u64,
    #[serde(default)]
    pub lifetime_upload: Option<u64>,
    #[serde(default)]
    pub lifetime_download: Option<u64>,
}

/// Editable profile fields, sent as multipart text fields. Unset fields are
/// left untouched on the server.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Personal API token. Only `id` and `name` are stable; the rest is kept as-is.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiToken {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateTokenRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}
