use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use crate::db::{self, DbPool};
use crate::services::RankChecker;

#[derive(Serialize)]
pub struct LivenessResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    database: &'static str,
    /// "ok" while at least one credential still has quota, "exhausted"
    /// otherwise. Reported but not failing: reads keep working without
    /// quota, only new checks do not.
    credential_pool: &'static str,
}

/// Liveness check - is the process running?
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(LivenessResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - can the service do useful work?
/// The database decides readiness; credential-pool exhaustion is surfaced
/// alongside it so operators see empty quota here before checks 503.
pub async fn readiness(pool: web::Data<DbPool>, checker: web::Data<RankChecker>) -> HttpResponse {
    let db_healthy = db::ping(pool.get_ref()).await;
    let quota_available = matches!(
        checker.store().find_available_credential().await,
        Ok(Some(_))
    );

    let (http_status, response) = readiness_response(db_healthy, quota_available);
    HttpResponse::build(http_status).json(response)
}

fn readiness_response(
    db_healthy: bool,
    quota_available: bool,
) -> (StatusCode, ReadinessResponse) {
    let (status, http_status) = if db_healthy {
        ("ready", StatusCode::OK)
    } else {
        ("not_ready", StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = ReadinessResponse {
        status,
        checks: ReadinessChecks {
            database: if db_healthy { "ok" } else { "error" },
            credential_pool: if quota_available { "ok" } else { "exhausted" },
        },
    };

    (http_status, response)
}
