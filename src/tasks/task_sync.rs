use tracing::{error, info, warn};

use crate::config::{SyncConfig, Zone};
use crate::error::SyncError;
use crate::models::calendar_event::NewAllDayEvent;
use crate::models::query::DatabaseQuery;
use crate::models::task::TaskRecord;
use crate::service::calendar::CalendarClient;
use crate::service::task_store::TaskStore;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub created: usize,
    pub marked_synced: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// All-day event for a task, or `None` when it has no usable due date.
pub fn event_for_task(task: &TaskRecord, zone: &Zone) -> Option<NewAllDayEvent> {
    let due = task.due?;
    Some(NewAllDayEvent {
        title: task.display_title().to_string(),
        date: due.local_date(zone),
        description: task.event_description(),
    })
}

/// Creates one calendar event per unsynced task and flags the task as synced.
///
/// The query or calendar lookup failing aborts the run. A failure on a single
/// task is logged and the loop moves on; the task stays unsynced and is picked
/// up again next run.
pub async fn run_task_sync<S, C>(
    store: &S,
    calendar: &C,
    config: &SyncConfig,
) -> Result<SyncReport, SyncError>
where
    S: TaskStore + ?Sized,
    C: CalendarClient + ?Sized,
{
    let query = DatabaseQuery::unsynced_tasks(&config.properties);
    let tasks = store.query_tasks(&query).await.inspect_err(|e| {
        error!("Task query failed: {}", e);
    })?;
    calendar.ensure_calendar().await.inspect_err(|e| {
        error!("Calendar lookup failed: {}", e);
    })?;

    let mut report = SyncReport {
        fetched: tasks.len(),
        ..SyncReport::default()
    };

    for task in &tasks {
        let Some(event) = event_for_task(task, &config.zone) else {
            warn!(task_id = %task.id, due = ?task.due_raw, "Skipping task without a usable due date");
            report.skipped += 1;
            continue;
        };

        let created = match calendar.create_all_day_event(&event).await {
            Ok(created) => created,
            Err(e) => {
                error!(task_id = %task.id, title = %event.title, "Failed to create event: {}", e);
                report.failed += 1;
                continue;
            }
        };
        if created.id.is_empty() {
            error!(task_id = %task.id, "Calendar returned an event without an id");
            report.failed += 1;
            continue;
        }
        report.created += 1;
        info!(task_id = %task.id, event_id = %created.id, date = %event.date, "Created event {}", event.title);

        match store.mark_synced(&task.id).await {
            Ok(()) => report.marked_synced += 1,
            Err(e) => {
                error!(task_id = %task.id, event_id = %created.id, "Failed to mark task synced: {}", e);
                report.failed += 1;
            }
        }
    }

    info!(
        fetched = report.fetched,
        created = report.created,
        failed = report.failed,
        skipped = report.skipped,
        "Task sync finished"
    );
    Ok(report)
}
