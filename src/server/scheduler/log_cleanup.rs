use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::log::LogService};

/// Every day at 03:00 UTC.
const LOG_CLEANUP_SCHEDULE: &str = "0 0 3 * * *";

/// Starts the log cleanup scheduler
///
/// Once a day, request and login log rows older than `retention_days` are deleted.
///
/// # Arguments
/// - `db`: Database connection
/// - `retention_days`: Days of log history to keep
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; dropping it does not stop the job
/// - `Err(AppError::SchedulerErr)` - Job could not be created or scheduled
pub async fn start_scheduler(
    db: DatabaseConnection,
    retention_days: i64,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(LOG_CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = LogService::new(&db).cleanup(retention_days).await {
                tracing::error!("Error cleaning up logs: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Log cleanup scheduler started, keeping {} days of logs",
        retention_days
    );

    Ok(scheduler)
}
