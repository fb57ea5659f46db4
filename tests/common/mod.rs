//! Shared test doubles: an in-memory `RankStore` and a scriptable
//! `SerpDispatcher`, so orchestrator and scheduler behavior can be exercised
//! without Postgres or network access.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use serptrack::error::{AppError, AppResult};
use serptrack::models::{Credential, Keyword, NewRankHistory, RankHistoryEntry, Website};
use serptrack::serp::{OrganicResult, SerpDispatcher, SerpResponse};
use serptrack::services::RankChecker;
use serptrack::store::RankStore;

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
struct Inner {
    credentials: Vec<Credential>,
    websites: Vec<Website>,
    keywords: Vec<Keyword>,
    history: Vec<RankHistoryEntry>,
}

/// In-memory `RankStore` with the same selection and increment semantics as
/// the Postgres implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    next_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::default(),
            next_id: AtomicI32::new(1),
        })
    }

    fn fresh_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn add_website(&self, name: &str, url: &str) -> Website {
        let website = Website {
            id: self.fresh_id(),
            name: name.to_string(),
            url: url.to_string(),
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().websites.push(website.clone());
        website
    }

    pub fn add_keyword(&self, website_id: i32, text: &str) -> Keyword {
        self.add_keyword_checked_at(website_id, text, None)
    }

    pub fn add_keyword_checked_at(
        &self,
        website_id: i32,
        text: &str,
        last_checked_at: Option<DateTime<Utc>>,
    ) -> Keyword {
        let keyword = Keyword {
            id: self.fresh_id(),
            text: text.to_string(),
            website_id,
            last_checked_at,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().keywords.push(keyword.clone());
        keyword
    }

    pub fn add_credential(
        &self,
        provider_name: &str,
        monthly_limit: i32,
        used_count: i32,
        is_active: bool,
    ) -> Credential {
        let credential = Credential {
            id: self.fresh_id(),
            provider_name: provider_name.to_string(),
            secret_value: format!("secret-{}", self.next_id.load(Ordering::SeqCst)),
            monthly_limit,
            used_count,
            is_active,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .credentials
            .push(credential.clone());
        credential
    }

    pub fn credential(&self, id: i32) -> Credential {
        self.inner
            .lock()
            .unwrap()
            .credentials
            .iter()
            .find(|c| c.id == id)
            .expect("unknown credential id")
            .clone()
    }

    pub fn keyword(&self, id: i32) -> Keyword {
        self.inner
            .lock()
            .unwrap()
            .keywords
            .iter()
            .find(|k| k.id == id)
            .expect("unknown keyword id")
            .clone()
    }

    pub fn history(&self) -> Vec<RankHistoryEntry> {
        self.inner.lock().unwrap().history.clone()
    }
}

#[async_trait]
impl RankStore for MemoryStore {
    async fn find_available_credential(&self) -> AppResult<Option<Credential>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .credentials
            .iter()
            .filter(|c| c.is_available())
            .min_by_key(|c| c.id)
            .cloned())
    }

    async fn consume_credential_unit(&self, credential_id: i32) -> AppResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .credentials
            .iter_mut()
            .find(|c| c.id == credential_id && c.used_count < c.monthly_limit)
        {
            Some(credential) => {
                credential.used_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn website_by_id(&self, website_id: i32) -> AppResult<Option<Website>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.websites.iter().find(|w| w.id == website_id).cloned())
    }

    async fn keyword_with_website(
        &self,
        website_id: i32,
        keyword_id: i32,
    ) -> AppResult<Option<(Keyword, Website)>> {
        let inner = self.inner.lock().unwrap();
        let keyword = inner
            .keywords
            .iter()
            .find(|k| k.id == keyword_id && k.website_id == website_id)
            .cloned();
        Ok(keyword.and_then(|k| {
            inner
                .websites
                .iter()
                .find(|w| w.id == k.website_id)
                .cloned()
                .map(|w| (k, w))
        }))
    }

    async fn stale_keywords(&self, limit: i64) -> AppResult<Vec<(Keyword, Website)>> {
        let inner = self.inner.lock().unwrap();
        let mut keywords: Vec<Keyword> = inner.keywords.clone();
        // None sorts before Some, which matches NULLS FIRST
        keywords.sort_by_key(|k| (k.last_checked_at, k.id));
        Ok(keywords
            .into_iter()
            .take(limit as usize)
            .filter_map(|k| {
                inner
                    .websites
                    .iter()
                    .find(|w| w.id == k.website_id)
                    .cloned()
                    .map(|w| (k, w))
            })
            .collect())
    }

    async fn mark_keyword_checked(&self, keyword_id: i32, at: DateTime<Utc>) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(keyword) = inner.keywords.iter_mut().find(|k| k.id == keyword_id) {
            keyword.last_checked_at = Some(at);
        }
        Ok(())
    }

    async fn append_history(&self, entry: NewRankHistory) -> AppResult<RankHistoryEntry> {
        let row = RankHistoryEntry {
            id: self.fresh_id(),
            keyword_id: entry.keyword_id,
            rank: entry.rank,
            url: entry.url,
            check_date: entry.check_date,
        };
        self.inner.lock().unwrap().history.push(row.clone());
        Ok(row)
    }

    async fn history_for_keyword(
        &self,
        keyword_id: i32,
        limit: i64,
    ) -> AppResult<Vec<RankHistoryEntry>> {
        let inner = self.inner.lock().unwrap();
        let mut entries: Vec<RankHistoryEntry> = inner
            .history
            .iter()
            .filter(|e| e.keyword_id == keyword_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse((e.check_date, e.id)));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

// =============================================================================
// Scriptable dispatcher
// =============================================================================

/// One scripted lookup outcome
#[derive(Clone)]
pub enum StubOutcome {
    Response(SerpResponse),
    LookupError(String),
    UnknownProvider(String),
}

/// `SerpDispatcher` double that replays scripted outcomes and records every
/// dispatched keyword. When the script runs out it falls back to a default
/// outcome (an empty result list unless overridden).
pub struct StubDispatcher {
    script: Mutex<VecDeque<StubOutcome>>,
    fallback: StubOutcome,
    calls: Mutex<Vec<String>>,
}

impl StubDispatcher {
    pub fn new() -> Arc<Self> {
        Self::with_fallback(StubOutcome::Response(SerpResponse::default()))
    }

    pub fn always(response: SerpResponse) -> Arc<Self> {
        Self::with_fallback(StubOutcome::Response(response))
    }

    pub fn with_fallback(fallback: StubOutcome) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, outcome: StubOutcome) {
        self.script.lock().unwrap().push_back(outcome);
    }

    /// Keyword texts in dispatch order
    pub fn dispatched(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SerpDispatcher for StubDispatcher {
    async fn lookup(&self, _credential: &Credential, keyword: &str) -> AppResult<SerpResponse> {
        self.calls.lock().unwrap().push(keyword.to_string());
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match outcome {
            StubOutcome::Response(response) => Ok(response),
            StubOutcome::LookupError(message) => Err(AppError::ProviderLookup(message)),
            StubOutcome::UnknownProvider(name) => Err(AppError::UnknownProvider(name)),
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Builds a response from (domain, position, link) triples
pub fn serp_response(results: &[(&str, i32, &str)]) -> SerpResponse {
    SerpResponse::from_results(
        results
            .iter()
            .map(|(domain, position, link)| OrganicResult {
                domain: domain.to_string(),
                position: *position,
                link: link.to_string(),
            })
            .collect(),
    )
}

/// Wires a checker over the given doubles
pub fn checker(store: &Arc<MemoryStore>, dispatcher: &Arc<StubDispatcher>) -> RankChecker {
    RankChecker::new(store.clone(), dispatcher.clone())
}
