//! Persistence seam for the rank-checking core.
//!
//! The core treats storage as a collaborator: the orchestrator and scheduler
//! only speak to this trait, production wires in the Postgres
//! implementation, tests wire in an in-memory one.

pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::models::{Credential, Keyword, NewRankHistory, RankHistoryEntry, Website};

#[async_trait]
pub trait RankStore: Send + Sync {
    /// Returns one credential that is active and under its monthly quota,
    /// or `None` when the pool is exhausted. Read-only; each call re-reads
    /// current usage. Tie-break between eligible credentials is lowest id.
    async fn find_available_credential(&self) -> AppResult<Option<Credential>>;

    /// Consumes one quota unit on a credential, but only while it is still
    /// under its limit. Returns whether a unit was actually consumed, so
    /// concurrent callers can never push `used_count` past `monthly_limit`.
    async fn consume_credential_unit(&self, credential_id: i32) -> AppResult<bool>;

    async fn website_by_id(&self, website_id: i32) -> AppResult<Option<Website>>;

    /// Looks up a keyword scoped to its owning website, joined with it
    async fn keyword_with_website(
        &self,
        website_id: i32,
        keyword_id: i32,
    ) -> AppResult<Option<(Keyword, Website)>>;

    /// Up to `limit` keywords ordered stalest-first (`last_checked_at`
    /// ascending, never-checked keywords before everything else), each with
    /// its owning website.
    async fn stale_keywords(&self, limit: i64) -> AppResult<Vec<(Keyword, Website)>>;

    /// Stamps a keyword as freshly checked
    async fn mark_keyword_checked(&self, keyword_id: i32, at: DateTime<Utc>) -> AppResult<()>;

    /// Appends one rank history row and returns it
    async fn append_history(&self, entry: NewRankHistory) -> AppResult<RankHistoryEntry>;

    /// Most recent history entries for a keyword, newest first
    async fn history_for_keyword(
        &self,
        keyword_id: i32,
        limit: i64,
    ) -> AppResult<Vec<RankHistoryEntry>>;
}

pub use postgres::PgStore;
