//! Shapes shared by several feature clients.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// One page of a list endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// Accepts strings, numbers, booleans and null where the API documents a
/// string. Decimal amounts and ratios arrive in either form.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub(crate) fn expose<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Human readable size using binary multiples, two decimals.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", BYTE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Amount {
        #[serde(default, deserialize_with = "lenient_string")]
        value: String,
    }

    #[test]
    fn format_bytes_scales_units() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
        assert_eq!(format_bytes(3 * 1024_u64.pow(5)), "3072.00 TB");
    }

    #[test]
    fn lenient_string_accepts_numbers() -> Result<(), serde_json::Error> {
        let text: Amount = serde_json::from_value(json!({"value": "1.50"}))?;
        let number: Amount = serde_json::from_value(json!({"value": 1.5}))?;
        let null: Amount = serde_json::from_value(json!({"value": null}))?;
        let missing: Amount = serde_json::from_value(json!({}))?;

        assert_eq!(text.value, "1.50");
        assert_eq!(number.value, "1.5");
        assert_eq!(null.value, "");
        assert_eq!(missing.value, "");
        Ok(())
    }

    #[test]
    fn paginated_tolerates_missing_links() -> Result<(), serde_json::Error> {
        let page: Paginated<u32> = serde_json::from_value(json!({
            "count": 3,
            "next": "http://api/torrents/?page=2",
            "results": [1, 2]
        }))?;
        assert!(page.has_next());
        assert_eq!(page.results, vec![1, 2]);

        let last: Paginated<u32> = serde_json::from_value(json!({"count": 0, "results": []}))?;
        assert!(!last.has_next());
        Ok(())
    }
}
