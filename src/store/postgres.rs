use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;
use crate::models::{Credential, Keyword, NewRankHistory, RankHistoryEntry, Website};
use crate::store::RankStore;

/// Postgres-backed store used in production
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat projection of a keyword joined with its website; the two tables
/// share column names, so the overlapping ones are aliased.
#[derive(FromRow)]
struct KeywordWebsiteRow {
    keyword_id: i32,
    text: String,
    website_id: i32,
    last_checked_at: Option<DateTime<Utc>>,
    keyword_created_at: DateTime<Utc>,
    website_name: String,
    website_url: String,
    website_created_at: DateTime<Utc>,
}

const KEYWORD_WEBSITE_COLUMNS: &str = r#"
    k.id AS keyword_id, k.text, k.website_id, k.last_checked_at,
    k.created_at AS keyword_created_at,
    w.name AS website_name, w.url AS website_url,
    w.created_at AS website_created_at
"#;

impl KeywordWebsiteRow {
    fn into_pair(self) -> (Keyword, Website) {
        (
            Keyword {
                id: self.keyword_id,
                text: self.text,
                website_id: self.website_id,
                last_checked_at: self.last_checked_at,
                created_at: self.keyword_created_at,
            },
            Website {
                id: self.website_id,
                name: self.website_name,
                url: self.website_url,
                created_at: self.website_created_at,
            },
        )
    }
}

#[async_trait]
impl RankStore for PgStore {
    async fn find_available_credential(&self) -> AppResult<Option<Credential>> {
        // Mirrors Credential::is_available
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, provider_name, secret_value, monthly_limit, used_count,
                   is_active, created_at
            FROM credentials
            WHERE is_active AND used_count < monthly_limit
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn consume_credential_unit(&self, credential_id: i32) -> AppResult<bool> {
        // Conditional increment: used_count can never pass monthly_limit
        // even when checks race.
        let result = sqlx::query(
            r#"
            UPDATE credentials
            SET used_count = used_count + 1
            WHERE id = $1 AND used_count < monthly_limit
            "#,
        )
        .bind(credential_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn website_by_id(&self, website_id: i32) -> AppResult<Option<Website>> {
        let website = sqlx::query_as::<_, Website>(
            "SELECT id, name, url, created_at FROM websites WHERE id = $1",
        )
        .bind(website_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(website)
    }

    async fn keyword_with_website(
        &self,
        website_id: i32,
        keyword_id: i32,
    ) -> AppResult<Option<(Keyword, Website)>> {
        let query = format!(
            r#"
            SELECT {KEYWORD_WEBSITE_COLUMNS}
            FROM keywords k
            JOIN websites w ON w.id = k.website_id
            WHERE k.id = $1 AND k.website_id = $2
            "#
        );

        let row = sqlx::query_as::<_, KeywordWebsiteRow>(&query)
            .bind(keyword_id)
            .bind(website_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(KeywordWebsiteRow::into_pair))
    }

    async fn stale_keywords(&self, limit: i64) -> AppResult<Vec<(Keyword, Website)>> {
        // NULLS FIRST is explicit: never-checked keywords take priority and
        // Postgres sorts nulls last by default on ASC.
        let query = format!(
            r#"
            SELECT {KEYWORD_WEBSITE_COLUMNS}
            FROM keywords k
            JOIN websites w ON w.id = k.website_id
            ORDER BY k.last_checked_at ASC NULLS FIRST, k.id
            LIMIT $1
            "#
        );

        let rows = sqlx::query_as::<_, KeywordWebsiteRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(KeywordWebsiteRow::into_pair).collect())
    }

    async fn mark_keyword_checked(&self, keyword_id: i32, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE keywords SET last_checked_at = $2 WHERE id = $1")
            .bind(keyword_id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn append_history(&self, entry: NewRankHistory) -> AppResult<RankHistoryEntry> {
        let row = sqlx::query_as::<_, RankHistoryEntry>(
            r#"
            INSERT INTO rank_history (keyword_id, rank, url, check_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, keyword_id, rank, url, check_date
            "#,
        )
        .bind(entry.keyword_id)
        .bind(entry.rank)
        .bind(&entry.url)
        .bind(entry.check_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn history_for_keyword(
        &self,
        keyword_id: i32,
        limit: i64,
    ) -> AppResult<Vec<RankHistoryEntry>> {
        let rows = sqlx::query_as::<_, RankHistoryEntry>(
            r#"
            SELECT id, keyword_id, rank, url, check_date
            FROM rank_history
            WHERE keyword_id = $1
            ORDER BY check_date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(keyword_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
