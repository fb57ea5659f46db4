use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A monitored website. Read-only from the rank-checking core's perspective;
/// its URL supplies the domain used for rank matching.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Website {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
