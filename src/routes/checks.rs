use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::RankChecker;

#[derive(Deserialize)]
pub struct HistoryQuery {
    /// Most recent N entries to return
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    30
}

/// POST /api/websites/{website_id}/keywords/{keyword_id}/check-rank
///
/// Manual on-demand rank check. Credential exhaustion maps to 503 via
/// `AppError::NoAvailableCredential` so operators know to add quota rather
/// than chase a generic failure.
pub async fn check_rank(
    checker: web::Data<RankChecker>,
    path: web::Path<(i32, i32)>,
) -> AppResult<HttpResponse> {
    let (website_id, keyword_id) = path.into_inner();

    let (keyword, website) = checker
        .store()
        .keyword_with_website(website_id, keyword_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Keyword not found for this website".to_string()))?;

    // The outcome serializes as its tagged form: {"status": "success",
    // "data": ...} or {"status": "not_found", "message": ..., "data": ...}
    let outcome = checker.check(&keyword, Some(&website)).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// GET /api/websites/{website_id}/keywords/{keyword_id}/history
///
/// Most recent rank history for a keyword, newest first.
pub async fn history(
    checker: web::Data<RankChecker>,
    path: web::Path<(i32, i32)>,
    query: web::Query<HistoryQuery>,
) -> AppResult<HttpResponse> {
    let (website_id, keyword_id) = path.into_inner();

    if query.limit < 1 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let (keyword, _) = checker
        .store()
        .keyword_with_website(website_id, keyword_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Keyword not found for this website".to_string()))?;

    let entries = checker
        .store()
        .history_for_keyword(keyword.id, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(entries))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/websites/{website_id}/keywords/{keyword_id}")
            .route("/check-rank", web::post().to(check_rank))
            .route("/history", web::get().to(history)),
    );
}
