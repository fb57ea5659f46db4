//! Request dispatcher: one synchronous outbound GET per check.
//!
//! The dispatcher never retries. A transport failure or non-2xx status
//! surfaces immediately as `ProviderLookup`; the caller does not retry
//! either, the next scheduled batch naturally re-surfaces the keyword.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::models::Credential;
use crate::providers::Provider;
use crate::serp::response::SerpResponse;

/// Seam between the orchestrator and the outbound HTTP call, so checks can
/// be exercised without network access.
#[async_trait]
pub trait SerpDispatcher: Send + Sync {
    /// Performs one provider lookup for `keyword` using `credential`.
    async fn lookup(&self, credential: &Credential, keyword: &str) -> AppResult<SerpResponse>;
}

/// Resolves the provider referenced by a credential and shapes the request.
///
/// Pure so the translation can be tested without a client; the dispatcher
/// is a thin transport around it.
pub fn build_request(
    credential: &Credential,
    keyword: &str,
) -> AppResult<(&'static str, Vec<(&'static str, String)>)> {
    let provider = Provider::from_name(&credential.provider_name)?;
    let params = provider.query_params(&credential.secret_value, keyword);
    Ok((provider.base_url(), params))
}

/// reqwest-backed dispatcher used in production
pub struct HttpDispatcher {
    client: reqwest::Client,
}

impl HttpDispatcher {
    /// Creates a dispatcher whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl SerpDispatcher for HttpDispatcher {
    async fn lookup(&self, credential: &Credential, keyword: &str) -> AppResult<SerpResponse> {
        let (base_url, params) = build_request(credential, keyword)?;

        let response = self
            .client
            .get(base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    "connection failed".to_string()
                } else {
                    e.to_string()
                };
                AppError::ProviderLookup(format!(
                    "{} request failed: {}",
                    credential.provider_name, reason
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ProviderLookup(format!(
                "{} returned HTTP {}",
                credential.provider_name, status
            )));
        }

        response.json::<SerpResponse>().await.map_err(|e| {
            AppError::ProviderLookup(format!(
                "{} returned an unreadable body: {}",
                credential.provider_name, e
            ))
        })
    }
}
