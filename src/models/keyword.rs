use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A tracked keyword attached to one website.
///
/// `last_checked_at` is mutated exclusively by the check orchestrator after
/// every completed check (found or not found), never on a failed dispatch,
/// so a keyword whose lookup failed stays at the front of the next batch.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Keyword {
    pub id: i32,
    pub text: String,
    pub website_id: i32,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
