use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A provider-issued API credential with its monthly quota bookkeeping.
///
/// `used_count` is only ever incremented by the check orchestrator after a
/// successfully answered lookup; deactivation and quota resets are
/// administrative operations outside the core.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Credential {
    pub id: i32,
    pub provider_name: String,
    #[serde(skip_serializing)]
    pub secret_value: String,
    pub monthly_limit: i32,
    pub used_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Whether this credential may be selected for a lookup.
    ///
    /// The same predicate backs the Postgres selection query; keep the two
    /// in sync.
    pub fn is_available(&self) -> bool {
        self.is_active && self.used_count < self.monthly_limit
    }

    /// Remaining lookups this month, never negative.
    pub fn remaining(&self) -> i32 {
        (self.monthly_limit - self.used_count).max(0)
    }
}
