//! SERP provider registry.
//!
//! Each supported search-API vendor differs only in its base URL, the names
//! it gives the credential and keyword query parameters, and fixed locale
//! values. Keeping them as a closed enum means adding a vendor is one new
//! variant plus its two match arms; the dispatcher and orchestrator never
//! change.

use crate::error::{AppError, AppResult};

/// A registered search-results API vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    ScaleSerp,
    SerpApi,
    Serpstack,
    SerpWow,
    ValueSerp,
    ZenSerp,
}

/// All registered providers, in registry order
pub const ALL_PROVIDERS: [Provider; 6] = [
    Provider::ScaleSerp,
    Provider::SerpApi,
    Provider::Serpstack,
    Provider::SerpWow,
    Provider::ValueSerp,
    Provider::ZenSerp,
];

impl Provider {
    /// Resolves a provider by the name stored on a credential.
    ///
    /// A miss indicates misconfigured data (a credential should never
    /// reference an unregistered provider), so it surfaces as an error
    /// rather than being skipped.
    pub fn from_name(name: &str) -> AppResult<Self> {
        match name {
            "ScaleSERP" => Ok(Provider::ScaleSerp),
            "SerpApi" => Ok(Provider::SerpApi),
            "Serpstack" => Ok(Provider::Serpstack),
            "SerpWow" => Ok(Provider::SerpWow),
            "ValueSERP" => Ok(Provider::ValueSerp),
            "ZenSERP" => Ok(Provider::ZenSerp),
            _ => Err(AppError::UnknownProvider(name.to_string())),
        }
    }

    /// Canonical name as stored on credentials
    pub fn name(&self) -> &'static str {
        match self {
            Provider::ScaleSerp => "ScaleSERP",
            Provider::SerpApi => "SerpApi",
            Provider::Serpstack => "Serpstack",
            Provider::SerpWow => "SerpWow",
            Provider::ValueSerp => "ValueSERP",
            Provider::ZenSerp => "ZenSERP",
        }
    }

    /// Endpoint base address for search requests
    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::ScaleSerp => "https://api.scaleserp.com/search",
            Provider::SerpApi => "https://serpapi.com/search",
            // Some Serpstack plans only serve plain HTTP
            Provider::Serpstack => "http://api.serpstack.com/search",
            Provider::SerpWow => "https://api.serpwow.com/search",
            Provider::ValueSerp => "https://api.valueserp.com/search",
            Provider::ZenSerp => "https://app.zenserp.com/api/v2/search",
        }
    }

    /// Maps (secret, keyword text) into this vendor's query-parameter
    /// vocabulary, including its fixed locale parameters.
    pub fn query_params(&self, secret: &str, keyword: &str) -> Vec<(&'static str, String)> {
        match self {
            Provider::ScaleSerp => vec![
                ("api_key", secret.to_string()),
                ("q", keyword.to_string()),
                ("location", "Iran".to_string()),
            ],
            Provider::SerpApi => vec![
                ("api_key", secret.to_string()),
                ("q", keyword.to_string()),
                ("gl", "ir".to_string()),
                ("hl", "fa".to_string()),
            ],
            Provider::Serpstack => vec![
                ("access_key", secret.to_string()),
                ("query", keyword.to_string()),
                ("location", "ir".to_string()),
            ],
            Provider::SerpWow => vec![
                ("api_key", secret.to_string()),
                ("q", keyword.to_string()),
                ("location_code", "ir".to_string()),
            ],
            Provider::ValueSerp => vec![
                ("api_key", secret.to_string()),
                ("q", keyword.to_string()),
                ("location", "Iran".to_string()),
            ],
            Provider::ZenSerp => vec![
                ("apikey", secret.to_string()),
                ("q", keyword.to_string()),
                ("location", "Iran".to_string()),
            ],
        }
    }
}
