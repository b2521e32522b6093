#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use notionCalSync::config::{PropertyNames, SyncConfig, Zone};
use notionCalSync::error::SyncError;
use notionCalSync::models::calendar_event::{CalendarEvent, NewAllDayEvent};
use notionCalSync::models::query::{CheckboxCondition, Condition, DatabaseQuery, DateCondition};
use notionCalSync::models::task::{DueDate, TaskRecord};
use notionCalSync::service::calendar::CalendarClient;
use notionCalSync::service::task_store::TaskStore;
use reqwest::StatusCode;
use tokio::sync::Mutex;

pub const ZONE: Zone = Zone::Named(chrono_tz::UTC);

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

pub fn test_config() -> SyncConfig {
    SyncConfig {
        notion_token: "secret".to_string(),
        database_id: "db1".to_string(),
        calendar_id: "cal1".to_string(),
        google_access_token: "ya29".to_string(),
        properties: PropertyNames::default(),
        review_event_title: "Daily Task Review".to_string(),
        zone: ZONE,
        daily_run_hour: 7,
        http_timeout: Duration::from_secs(5),
        notion_api_base: "http://127.0.0.1:9".to_string(),
        calendar_api_base: "http://127.0.0.1:9".to_string(),
    }
}

pub fn task(id: &str, title: &str, due: Option<NaiveDate>) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        title: Some(title.to_string()),
        due: due.map(DueDate::Date),
        due_raw: due.map(|d| d.format("%Y-%m-%d").to_string()),
        done: false,
        synced: false,
        task_type: None,
        class_id: None,
        resource_url: None,
    }
}

fn upstream_error() -> SyncError {
    SyncError::Status {
        service: "fake",
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

/// In-memory task database that evaluates query filters like the real one.
pub struct FakeTaskStore {
    pub tasks: Mutex<Vec<TaskRecord>>,
    pub queries: Mutex<Vec<DatabaseQuery>>,
    pub fail_query: bool,
    pub fail_mark_synced: HashSet<String>,
}

impl FakeTaskStore {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            queries: Mutex::new(Vec::new()),
            fail_query: false,
            fail_mark_synced: HashSet::new(),
        }
    }

    pub async fn task(&self, id: &str) -> TaskRecord {
        let tasks = self.tasks.lock().await;
        tasks.iter().find(|t| t.id == id).cloned().unwrap()
    }
}

fn matches(task: &TaskRecord, property: &str, condition: &Condition) -> bool {
    let names = PropertyNames::default();
    match condition {
        Condition::Date(DateCondition::IsNotEmpty(expected)) if property == names.due => {
            task.due.is_some() == *expected
        }
        Condition::Date(DateCondition::OnOrBefore(boundary)) if property == names.due => task
            .due
            .map(|due| due.local_date(&ZONE) <= *boundary)
            .unwrap_or(false),
        Condition::Checkbox(CheckboxCondition::Equals(expected)) if property == names.done => {
            task.done == *expected
        }
        Condition::Checkbox(CheckboxCondition::Equals(expected)) if property == names.synced => {
            task.synced == *expected
        }
        other => panic!("unexpected filter {} {:?}", property, other),
    }
}

#[async_trait::async_trait]
impl TaskStore for FakeTaskStore {
    async fn query_tasks(&self, query: &DatabaseQuery) -> Result<Vec<TaskRecord>, SyncError> {
        self.queries.lock().await.push(query.clone());
        if self.fail_query {
            return Err(upstream_error());
        }
        let tasks = self.tasks.lock().await;
        let mut found: Vec<TaskRecord> = tasks
            .iter()
            .filter(|task| {
                query
                    .filter
                    .and
                    .iter()
                    .all(|f| matches(task, &f.property, &f.condition))
            })
            .cloned()
            .collect();
        if !query.sorts.is_empty() {
            found.sort_by_key(|task| task.due.map(|due| due.local_date(&ZONE)));
        }
        found.truncate(query.page_size as usize);
        Ok(found)
    }

    async fn mark_synced(&self, task_id: &str) -> Result<(), SyncError> {
        if self.fail_mark_synced.contains(task_id) {
            return Err(upstream_error());
        }
        let mut tasks = self.tasks.lock().await;
        if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
            task.synced = true;
        }
        Ok(())
    }
}

/// In-memory calendar.
pub struct FakeCalendar {
    pub events: Mutex<Vec<CalendarEvent>>,
    pub description_updates: Mutex<Vec<(String, String)>>,
    pub missing: bool,
    pub fail_create_titles: HashSet<String>,
}

impl FakeCalendar {
    pub fn new() -> Self {
        Self::with_events(Vec::new())
    }

    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: Mutex::new(events),
            description_updates: Mutex::new(Vec::new()),
            missing: false,
            fail_create_titles: HashSet::new(),
        }
    }

    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl CalendarClient for FakeCalendar {
    async fn ensure_calendar(&self) -> Result<(), SyncError> {
        if self.missing {
            return Err(SyncError::CalendarNotFound("cal1".to_string()));
        }
        Ok(())
    }

    async fn create_all_day_event(&self, event: &NewAllDayEvent) -> Result<CalendarEvent, SyncError> {
        if self.fail_create_titles.contains(&event.title) {
            return Err(upstream_error());
        }
        let mut events = self.events.lock().await;
        let created = CalendarEvent {
            id: format!("evt-{}", events.len() + 1),
            title: event.title.clone(),
            date: Some(event.date),
            description: Some(event.description.clone()),
        };
        events.push(created.clone());
        Ok(created)
    }

    // Like the real listing, all-day events on the neighbouring days overlap
    // the window when the calendar's timezone differs from ours.
    async fn get_events_for_day(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, SyncError> {
        let events = self.events.lock().await;
        Ok(events
            .iter()
            .filter(|event| {
                event
                    .date
                    .is_some_and(|date| (date - day).num_days().abs() <= 1)
            })
            .cloned()
            .collect())
    }

    async fn set_description(&self, event_id: &str, description: &str) -> Result<(), SyncError> {
        let mut events = self.events.lock().await;
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Err(upstream_error());
        };
        event.description = Some(description.to_string());
        self.description_updates
            .lock()
            .await
            .push((event_id.to_string(), description.to_string()));
        Ok(())
    }
}
