//! Background job scheduler.
//!
//! One recurring job: returning blocked/errored proxies to active. Blocks
//! are usually IP-based and time-limited, so without the periodic reset the
//! pool would monotonically shrink to zero.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use leadscout_fetch::FetchClient;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
/// An `interval_secs` of zero disables the reset job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised or
/// started.
pub async fn build_scheduler(
    fetch: Arc<FetchClient>,
    interval_secs: u64,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    if interval_secs > 0 {
        let pool = Arc::clone(fetch.pool());
        let job = Job::new_repeated_async(Duration::from_secs(interval_secs), move |_id, _lock| {
            let pool = Arc::clone(&pool);
            Box::pin(async move {
                let reset = pool.reset_blocked().await;
                if reset > 0 {
                    tracing::info!(reset, "scheduled reset reactivated proxies");
                }
            })
        })?;
        scheduler.add(job).await?;
    } else {
        tracing::info!("proxy reset interval is 0; scheduled reset disabled");
    }

    scheduler.start().await?;
    Ok(scheduler)
}
