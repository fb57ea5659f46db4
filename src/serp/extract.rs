use crate::error::{AppError, AppResult};
use crate::serp::response::SerpResponse;

/// A domain found in the organic results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankMatch {
    /// 1-based position as reported by the provider (pass-through, not
    /// re-derived from the array index)
    pub rank: i32,
    pub url: String,
}

/// Normalizes a website URL into the domain used for rank matching:
/// the host name with a leading "www." label stripped.
pub fn normalize_domain(website_url: &str) -> AppResult<String> {
    let parsed = url::Url::parse(website_url)
        .map_err(|_| AppError::Validation(format!("Invalid website URL: {}", website_url)))?;
    let host = parsed.host_str().ok_or_else(|| {
        AppError::Validation(format!("Website URL has no host: {}", website_url))
    })?;
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Scans the organic results in provider order and returns the first result
/// whose domain contains `domain` as a substring, or `None` when the domain
/// does not appear (including when the result list is empty).
///
/// Substring containment is intentional so subdomain variants like
/// `shop.example.com` still count as the monitored `example.com`. First
/// match wins even if a better-ranked duplicate exists later.
pub fn find_rank(response: &SerpResponse, domain: &str) -> Option<RankMatch> {
    response
        .organic_results
        .iter()
        .find(|result| !result.domain.is_empty() && result.domain.contains(domain))
        .map(|result| RankMatch {
            rank: result.position,
            url: result.link.clone(),
        })
}
