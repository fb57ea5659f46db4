//! Check orchestrator: runs one rank check end to end.
//!
//! Per check: select a credential, dispatch the lookup, consume one quota
//! unit, resolve the owning website, extract the rank, stamp the keyword
//! fresh and append a history row. Failure at any step short-circuits; a
//! failed dispatch consumes no quota and leaves the keyword stale so the
//! next cycle retries it.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Keyword, NewRankHistory, RankHistoryEntry, Website};
use crate::serp::{find_rank, normalize_domain, SerpDispatcher};
use crate::store::RankStore;

/// Outcome of one completed check. "Not found" (rank 0) is a valid terminal
/// outcome, not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Success {
        data: RankHistoryEntry,
    },
    NotFound {
        message: String,
        data: RankHistoryEntry,
    },
}

impl CheckOutcome {
    pub fn entry(&self) -> &RankHistoryEntry {
        match self {
            CheckOutcome::Success { data } => data,
            CheckOutcome::NotFound { data, .. } => data,
        }
    }
}

/// Rank checker wired with its two collaborators
#[derive(Clone)]
pub struct RankChecker {
    store: Arc<dyn RankStore>,
    dispatcher: Arc<dyn SerpDispatcher>,
}

impl RankChecker {
    pub fn new(store: Arc<dyn RankStore>, dispatcher: Arc<dyn SerpDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    pub fn store(&self) -> &dyn RankStore {
        self.store.as_ref()
    }

    /// Runs one rank check for `keyword`. Pass `website` when the caller
    /// already loaded it; otherwise it is resolved by foreign key.
    pub async fn check(
        &self,
        keyword: &Keyword,
        website: Option<&Website>,
    ) -> AppResult<CheckOutcome> {
        let credential = self
            .store
            .find_available_credential()
            .await?
            .ok_or(AppError::NoAvailableCredential)?;

        log::debug!(
            "Checking keyword {} ({:?}) via {} (credential {}, {} lookups left)",
            keyword.id,
            keyword.text,
            credential.provider_name,
            credential.id,
            credential.remaining()
        );

        // Errors up to here (including the dispatch itself) consume no quota
        // and leave last_checked_at untouched.
        let response = self.dispatcher.lookup(&credential, &keyword.text).await?;

        // One unit per successfully answered lookup, found or not. The
        // increment is conditional; losing a race against a concurrent check
        // that exhausted the credential is logged, the response itself was
        // already paid for.
        if !self.store.consume_credential_unit(credential.id).await? {
            log::warn!(
                "Credential {} hit its monthly limit mid-check",
                credential.id
            );
        }

        let resolved;
        let website = match website {
            Some(site) => site,
            None => {
                resolved = self
                    .store
                    .website_by_id(keyword.website_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!(
                            "Website with id {} not found",
                            keyword.website_id
                        ))
                    })?;
                &resolved
            }
        };

        let domain = normalize_domain(&website.url)?;
        let rank_match = find_rank(&response, &domain);

        // Freshly checked either way
        let now = Utc::now();
        self.store.mark_keyword_checked(keyword.id, now).await?;

        let new_entry = match &rank_match {
            Some(found) => NewRankHistory {
                keyword_id: keyword.id,
                rank: found.rank,
                url: found.url.clone(),
                check_date: now.date_naive(),
            },
            None => NewRankHistory::not_found(keyword.id, now.date_naive()),
        };
        let entry = self.store.append_history(new_entry).await?;

        match rank_match {
            Some(found) => {
                log::info!(
                    "Keyword {} ranks #{} for {} ({})",
                    keyword.id,
                    found.rank,
                    domain,
                    found.url
                );
                Ok(CheckOutcome::Success { data: entry })
            }
            None => {
                log::info!("Keyword {} not found in results for {}", keyword.id, domain);
                Ok(CheckOutcome::NotFound {
                    message: "Domain not found in the top results.".to_string(),
                    data: entry,
                })
            }
        }
    }
}
