//! Batch scheduler: periodically rechecks the stalest keywords.
//!
//! Keywords are processed strictly one at a time; sequential checks keep
//! quota accounting free of in-flight races from this task. Per-keyword
//! failures are logged and skipped, except credential exhaustion, which
//! halts the rest of the batch since no further keyword can succeed until
//! an operator adds quota.

use std::sync::Arc;

use crate::config::SchedulerConfig;
use crate::error::{AppError, AppResult};
use crate::services::RankChecker;

/// What one batch run did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Keywords selected for this run
    pub selected: usize,
    /// Checks that completed (found or not found)
    pub checked: usize,
    /// Checks that failed and were skipped
    pub failed: usize,
    /// Whether the run stopped early on credential exhaustion
    pub halted: bool,
}

/// Runs one batch of rank checks over the stalest keywords.
pub async fn run_batch(checker: &RankChecker, batch_size: i64) -> AppResult<BatchSummary> {
    let batch = checker.store().stale_keywords(batch_size).await?;

    if batch.is_empty() {
        log::info!("Scheduler: no keywords to check");
        return Ok(BatchSummary::default());
    }

    log::info!("Scheduler: found {} keywords to check", batch.len());

    let mut summary = BatchSummary {
        selected: batch.len(),
        ..BatchSummary::default()
    };

    for (keyword, website) in &batch {
        match checker.check(keyword, Some(website)).await {
            Ok(_) => summary.checked += 1,
            Err(AppError::NoAvailableCredential) => {
                log::warn!(
                    "Scheduler: halting run, no credentials with remaining quota \
                     ({} of {} keywords checked)",
                    summary.checked,
                    summary.selected
                );
                summary.halted = true;
                break;
            }
            Err(e) => {
                log::error!(
                    "Scheduler: failed to check rank for keyword {:?}: {}",
                    keyword.text,
                    e
                );
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Scheduler: run finished ({} checked, {} failed, halted: {})",
        summary.checked,
        summary.failed,
        summary.halted
    );

    Ok(summary)
}

/// Drives `run_batch` on a fixed interval until the process stops.
///
/// The first run happens one full interval after startup; there is no
/// catch-up for missed windows, the next run simply picks up whatever is
/// stalest then.
pub async fn run(checker: Arc<RankChecker>, config: SchedulerConfig) {
    log::info!(
        "Scheduler started (interval: {:?}, batch size: {})",
        config.interval,
        config.batch_size
    );

    loop {
        tokio::time::sleep(config.interval).await;

        if let Err(e) = run_batch(&checker, config.batch_size).await {
            log::error!("Scheduler: run aborted: {}", e);
        }
    }
}
