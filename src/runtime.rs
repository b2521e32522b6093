use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::clients::google_calendar::GoogleCalendarClient;
use crate::clients::notion_client::NotionClient;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::service::calendar::CalendarClient;
use crate::service::task_store::{NotionTaskStore, TaskStore};
use crate::tasks::daily_review::{ReviewReport, run_daily_review};
use crate::tasks::task_sync::{SyncReport, run_task_sync};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Sync,
    Review,
    Both,
}

impl Job {
    fn includes_sync(self) -> bool {
        matches!(self, Job::Sync | Job::Both)
    }

    fn includes_review(self) -> bool {
        matches!(self, Job::Review | Job::Both)
    }
}

/// Result of one run. A component that was not requested stays `None`.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub sync: Option<Result<SyncReport, SyncError>>,
    pub review: Option<Result<ReviewReport, SyncError>>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.sync, Some(Err(_))) && !matches!(self.review, Some(Err(_)))
    }
}

pub fn build_services(
    config: &SyncConfig,
) -> Result<(NotionTaskStore, GoogleCalendarClient), SyncError> {
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;
    let store = NotionTaskStore::new(
        NotionClient::new(http.clone(), config),
        config.properties.clone(),
    );
    let calendar = GoogleCalendarClient::new(http, config);
    Ok((store, calendar))
}

/// Runs the requested components in order. A failing component is logged and
/// does not stop the next one.
pub async fn run_job<S, C>(
    job: Job,
    store: &S,
    calendar: &C,
    config: &SyncConfig,
    now: DateTime<Utc>,
) -> RunOutcome
where
    S: TaskStore + ?Sized,
    C: CalendarClient + ?Sized,
{
    let mut outcome = RunOutcome::default();
    if job.includes_sync() {
        let result = run_task_sync(store, calendar, config).await;
        if let Err(e) = &result {
            error!("Task sync aborted: {}", e);
        }
        outcome.sync = Some(result);
    }
    if job.includes_review() {
        let result = run_daily_review(store, calendar, config, now).await;
        if let Err(e) = &result {
            error!("Daily review aborted: {}", e);
        }
        outcome.review = Some(result);
    }
    outcome
}

pub async fn run_daily_sync_and_review<S, C>(
    store: &S,
    calendar: &C,
    config: &SyncConfig,
    now: DateTime<Utc>,
) -> RunOutcome
where
    S: TaskStore + ?Sized,
    C: CalendarClient + ?Sized,
{
    run_job(Job::Both, store, calendar, config, now).await
}

/// Builds the HTTP-backed services and runs `job` once.
pub async fn run_once(config: &SyncConfig, job: Job) -> Result<RunOutcome, SyncError> {
    let (store, calendar) = build_services(config)?;
    info!(?job, "Starting run");
    Ok(run_job(job, &store, &calendar, config, Utc::now()).await)
}
