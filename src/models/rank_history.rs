use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// One recorded rank check. Append-only; rank 0 means the domain was not
/// found in the provider's organic results and is a valid terminal outcome,
/// not an error.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RankHistoryEntry {
    pub id: i32,
    pub keyword_id: i32,
    pub rank: i32,
    pub url: String,
    /// Date of the check event. A date rather than a timestamp: one row is
    /// the record of a single check, ordered per keyword by this column.
    pub check_date: NaiveDate,
}

/// Insert payload for a rank history row
#[derive(Debug, Clone)]
pub struct NewRankHistory {
    pub keyword_id: i32,
    pub rank: i32,
    pub url: String,
    pub check_date: NaiveDate,
}

impl NewRankHistory {
    /// Entry for a check where the domain did not appear in the results
    pub fn not_found(keyword_id: i32, check_date: NaiveDate) -> Self {
        Self {
            keyword_id,
            rank: 0,
            url: "N/A".to_string(),
            check_date,
        }
    }
}
