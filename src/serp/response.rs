use serde::{Deserialize, Deserializer, Serialize};

/// Provider response body, reduced to the part the extractor reads.
///
/// Providers wrap their organic results in wildly different envelopes, but
/// all supported vendors expose an `organic_results` array whose entries
/// carry `domain`, `position` and `link`. Everything else is ignored.
///
/// Parsing is deliberately lenient: a missing, null or wrongly-typed
/// `organic_results` deserializes to an empty list, which downstream is the
/// ordinary "not found" outcome rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerpResponse {
    #[serde(default, deserialize_with = "lenient_results")]
    pub organic_results: Vec<OrganicResult>,
}

/// One organic search result in provider order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub domain: String,
    /// 1-based position as reported by the provider
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub link: String,
}

impl SerpResponse {
    pub fn from_results(organic_results: Vec<OrganicResult>) -> Self {
        Self { organic_results }
    }
}

/// Accepts any JSON value where an array of results is expected; entries
/// that don't look like a result object are skipped.
fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<OrganicResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
