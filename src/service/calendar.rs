use async_trait::async_trait;
use chrono::NaiveDate;

use crate::clients::google_calendar::GoogleCalendarClient;
use crate::error::SyncError;
use crate::models::calendar_event::{CalendarEvent, NewAllDayEvent};

#[async_trait]
pub trait CalendarClient: Send + Sync {
    /// Fails when the configured calendar is missing or not shared with us.
    async fn ensure_calendar(&self) -> Result<(), SyncError>;
    async fn create_all_day_event(&self, event: &NewAllDayEvent) -> Result<CalendarEvent, SyncError>;
    async fn get_events_for_day(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, SyncError>;
    async fn set_description(&self, event_id: &str, description: &str) -> Result<(), SyncError>;
}

#[async_trait]
impl CalendarClient for GoogleCalendarClient {
    async fn ensure_calendar(&self) -> Result<(), SyncError> {
        self.get_calendar().await
    }

    async fn create_all_day_event(&self, event: &NewAllDayEvent) -> Result<CalendarEvent, SyncError> {
        self.insert_all_day_event(event).await
    }

    async fn get_events_for_day(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, SyncError> {
        self.list_events_for_day(day).await
    }

    async fn set_description(&self, event_id: &str, description: &str) -> Result<(), SyncError> {
        self.patch_description(event_id, description).await
    }
}
