use anyhow::{Context, Result, anyhow, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryStats {
    #[serde(default, deserialize_with = "string_or_number")]
    pub hit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cache_hit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub noncache_hit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatsRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub hit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cache_hit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub noncache_hit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PopularFile {
    #[serde(default, deserialize_with = "string_or_number")]
    pub hit: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryData {
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MultiStats {
    #[serde(default)]
    pub stats: Vec<StatsRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PopularFiles {
    #[serde(default)]
    pub popularfiles: Vec<PopularFile>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    code: Option<i64>,
    data: Option<T>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

pub fn parse_summary(raw: &str) -> Result<SummaryStats> {
    decode::<SummaryData>(raw).map(|data| data.stats)
}

pub fn parse_breakdown(raw: &str) -> Result<MultiStats> {
    decode(raw)
}

pub fn parse_popular(raw: &str) -> Result<PopularFiles> {
    decode(raw)
}

/// Extracts the API's own error message from a payload, if it carries one.
pub fn error_message(raw: &str) -> Option<String> {
    let envelope: Envelope<Value> = serde_json::from_str(raw).ok()?;
    envelope.error.map(|error| describe(&error))
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let envelope: Envelope<T> =
        serde_json::from_str(raw).context("Failed to parse API response JSON")?;

    if let Some(error) = envelope.error {
        bail!("API error: {}", describe(&error));
    }

    envelope.data.ok_or_else(|| match envelope.code {
        Some(code) => anyhow!("API response (code {code}) contained no data"),
        None => anyhow!("API response contained no data"),
    })
}

fn describe(error: &ApiError) -> String {
    match (error.kind.is_empty(), error.message.is_empty()) {
        (false, false) => format!("{} ({})", error.message, error.kind),
        (true, false) => error.message.clone(),
        (false, true) => error.kind.clone(),
        (true, true) => "unknown error".to_string(),
    }
}

// The API is inconsistent about quoting counters.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_accepts_quoted_and_bare_numbers() {
        let raw = json!({
            "code": 200,
            "data": {
                "stats": {
                    "hit": "1200",
                    "cache_hit": 1000,
                    "noncache_hit": "200",
                    "size": 52428800
                },
                "total": 1
            }
        })
        .to_string();

        let stats = parse_summary(&raw).unwrap();
        assert_eq!(stats.hit, "1200");
        assert_eq!(stats.cache_hit, "1000");
        assert_eq!(stats.noncache_hit, "200");
        assert_eq!(stats.size, "52428800");
    }

    #[test]
    fn breakdown_preserves_bucket_order() {
        let raw = json!({
            "code": 200,
            "data": {
                "stats": [
                    {"timestamp": "2024-03-02T00:00:00-08:00", "hit": "2", "cache_hit": "1", "noncache_hit": "1", "size": "20"},
                    {"timestamp": "2024-03-01T00:00:00-08:00", "hit": "1", "cache_hit": "1", "noncache_hit": "0", "size": "10"}
                ]
            }
        })
        .to_string();

        let stats = parse_breakdown(&raw).unwrap().stats;
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].timestamp, "2024-03-02T00:00:00-08:00");
        assert_eq!(stats[1].timestamp, "2024-03-01T00:00:00-08:00");
    }

    #[test]
    fn popular_files_decode_with_missing_fields() {
        let raw = json!({
            "code": 200,
            "data": {
                "popularfiles": [
                    {"hit": "42", "uri": "/index.html"},
                    {"uri": "/favicon.ico"}
                ],
                "page": 1,
                "pages": 1
            }
        })
        .to_string();

        let files = parse_popular(&raw).unwrap().popularfiles;
        assert_eq!(files[0].hit, "42");
        assert_eq!(files[1].hit, "");
        assert_eq!(files[1].uri, "/favicon.ico");
    }

    #[test]
    fn error_payload_surfaces_api_message() {
        let raw = json!({
            "code": 401,
            "error": {"message": "OAuth signature does not match", "type": "invalid_request"}
        })
        .to_string();

        let err = parse_summary(&raw).unwrap_err();
        assert!(
            err.to_string()
                .contains("OAuth signature does not match (invalid_request)")
        );
        assert_eq!(
            error_message(&raw).as_deref(),
            Some("OAuth signature does not match (invalid_request)")
        );
    }

    #[test]
    fn missing_data_is_an_error() {
        let err = parse_popular(r#"{"code": 200}"#).unwrap_err();
        assert!(err.to_string().contains("contained no data"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = parse_breakdown("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("Failed to parse API response JSON"));
    }
}
