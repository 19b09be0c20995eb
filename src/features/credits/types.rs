use crate::features::{common::lenient_string, credits::ratio::RatioHealth};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credit balance. Deployments add fields such as the ratio; those are kept
/// in `extra`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Balance {
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bonus_points: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreditTransaction {
    pub id: u64,
    #[serde(default)]
    pub user: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub balance_after: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserClass {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub min_ratio: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub download_cost_multiplier: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub upload_credit_multiplier: String,
    #[serde(default)]
    pub max_torrents: u64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RatioStatus {
    #[serde(deserialize_with = "lenient_string")]
    pub ratio: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub required_ratio: String,
}

impl RatioStatus {
    /// Server label when it is one we know, otherwise derived from the ratio.
    #[must_use]
    pub fn health(&self) -> RatioHealth {
        RatioHealth::from_label(&self.status)
            .unwrap_or_else(|| RatioHealth::from_ratio_str(&self.ratio))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DownloadCheck {
    pub can_download: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub required_credits: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_credits: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LockCreditResponse {
    pub success: bool,
    #[serde(default)]
    pub transaction_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub locked_amount: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CompleteDownloadResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub final_amount: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UploadCreditResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub credits_earned: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PromoteResponse {
    pub success: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionParams {
    pub page: Option<u32>,
    pub ordering: Option<String>,
    pub page_size: Option<u32>,
}

impl TransactionParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 3] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("ordering", self.ordering.clone()),
            ("page_size", self.page_size.map(|size| size.to_string())),
        ]
    }
}
