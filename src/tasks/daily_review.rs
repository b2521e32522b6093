use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::models::calendar_event::NewAllDayEvent;
use crate::models::query::DatabaseQuery;
use crate::service::calendar::CalendarClient;
use crate::service::review::{LOOKAHEAD_DAYS, compose_summary, find_review_event, group_tasks, review_candidates};
use crate::service::task_store::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Created { event_id: String },
    Updated { event_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewReport {
    pub outcome: ReviewOutcome,
    pub summary: String,
    pub listed_tasks: usize,
}

pub fn review_boundary(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(LOOKAHEAD_DAYS))
        .unwrap_or(today)
}

/// Rebuilds today's review summary and writes it to the single review event,
/// creating the event if it does not exist yet.
pub async fn run_daily_review<S, C>(
    store: &S,
    calendar: &C,
    config: &SyncConfig,
    now: DateTime<Utc>,
) -> Result<ReviewReport, SyncError>
where
    S: TaskStore + ?Sized,
    C: CalendarClient + ?Sized,
{
    let today = config.zone.today(now);
    let query = DatabaseQuery::review_window(&config.properties, review_boundary(today));
    let tasks = store.query_tasks(&query).await.inspect_err(|e| {
        error!("Review query failed: {}", e);
    })?;

    let groups = group_tasks(&tasks, today, &config.zone);
    let summary = compose_summary(&groups);

    calendar.ensure_calendar().await.inspect_err(|e| {
        error!("Calendar lookup failed: {}", e);
    })?;
    let todays_events = calendar.get_events_for_day(today).await.inspect_err(|e| {
        error!("Listing today's events failed: {}", e);
    })?;

    let title = config.review_event_title.as_str();
    let matching = review_candidates(&todays_events, title, today).count();
    if matching > 1 {
        warn!(count = matching, "Several review events found today, updating one");
    }

    let outcome = match find_review_event(&todays_events, title, today) {
        Some(existing) => {
            calendar
                .set_description(&existing.id, &summary)
                .await
                .inspect_err(|e| error!(event_id = %existing.id, "Failed to update review event: {}", e))?;
            info!(event_id = %existing.id, tasks = groups.len(), "Updated review event");
            ReviewOutcome::Updated {
                event_id: existing.id.clone(),
            }
        }
        None => {
            let created = calendar
                .create_all_day_event(&NewAllDayEvent {
                    title: title.to_string(),
                    date: today,
                    description: summary.clone(),
                })
                .await
                .inspect_err(|e| error!("Failed to create review event: {}", e))?;
            info!(event_id = %created.id, tasks = groups.len(), "Created review event");
            ReviewOutcome::Created {
                event_id: created.id,
            }
        }
    };

    Ok(ReviewReport {
        outcome,
        summary,
        listed_tasks: groups.len(),
    })
}
