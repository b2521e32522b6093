use chrono::{DateTime, Days, NaiveDate};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{decode, endpoint, read_body};
use crate::config::{SyncConfig, Zone};
use crate::error::SyncError;
use crate::models::calendar_event::{CalendarEvent, NewAllDayEvent};

const SERVICE: &str = "Google Calendar";

#[derive(Debug, Deserialize)]
struct EventsListResponse {
    items: Option<Vec<RemoteEvent>>,
}

#[derive(Debug, Deserialize, Clone)]
struct RemoteEvent {
    #[serde(default)]
    id: String,
    status: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<EventDateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
struct EventDateTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventInsertRequest<'a> {
    summary: &'a str,
    description: &'a str,
    start: EventDateTime,
    end: EventDateTime,
}

#[derive(Debug, Serialize)]
struct DescriptionPatch<'a> {
    description: &'a str,
}

#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    calendar_id: String,
    zone: Zone,
}

impl GoogleCalendarClient {
    pub fn new(http: reqwest::Client, config: &SyncConfig) -> Self {
        Self {
            http,
            base_url: config.calendar_api_base.clone(),
            token: config.google_access_token.clone(),
            calendar_id: config.calendar_id.clone(),
            zone: config.zone,
        }
    }

    pub async fn get_calendar(&self) -> Result<(), SyncError> {
        let url = endpoint(&self.base_url, &["calendars", &self.calendar_id])?;
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                Err(SyncError::CalendarNotFound(self.calendar_id.clone()))
            }
            _ => read_body(SERVICE, response).await.map(|_| ()),
        }
    }

    pub async fn insert_all_day_event(
        &self,
        event: &NewAllDayEvent,
    ) -> Result<CalendarEvent, SyncError> {
        let url = endpoint(&self.base_url, &["calendars", &self.calendar_id, "events"])?;
        // All-day events end on the following day (exclusive).
        let end = event.date.checked_add_days(Days::new(1)).unwrap_or(event.date);
        let request = EventInsertRequest {
            summary: &event.title,
            description: &event.description,
            start: EventDateTime {
                date_time: None,
                date: Some(event.date.format("%Y-%m-%d").to_string()),
            },
            end: EventDateTime {
                date_time: None,
                date: Some(end.format("%Y-%m-%d").to_string()),
            },
        };
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;
        let text = read_body(SERVICE, response).await?;
        let created: RemoteEvent = decode("created event", &text)?;
        if created.id.is_empty() {
            return Err(SyncError::InvalidEventId);
        }
        Ok(self.to_calendar_event(created))
    }

    /// Events overlapping the given local day, cancelled ones excluded.
    pub async fn list_events_for_day(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, SyncError> {
        let url = endpoint(&self.base_url, &["calendars", &self.calendar_id, "events"])?;
        let next_day = day.checked_add_days(Days::new(1)).unwrap_or(day);
        let time_min = self.zone.start_of_day(day).to_rfc3339();
        let time_max = self.zone.start_of_day(next_day).to_rfc3339();
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("showDeleted", "false"),
                ("maxResults", "250"),
            ])
            .send()
            .await?;
        let text = read_body(SERVICE, response).await?;
        let body: EventsListResponse = decode("event list", &text)?;
        let mut items = body.items.unwrap_or_default();
        items.retain(|item| item.status.as_deref() != Some("cancelled"));
        Ok(items
            .into_iter()
            .map(|item| self.to_calendar_event(item))
            .collect())
    }

    pub async fn patch_description(&self, event_id: &str, description: &str) -> Result<(), SyncError> {
        let url = endpoint(
            &self.base_url,
            &["calendars", &self.calendar_id, "events", event_id],
        )?;
        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.token)
            .json(&DescriptionPatch { description })
            .send()
            .await?;
        read_body(SERVICE, response).await?;
        Ok(())
    }

    fn to_calendar_event(&self, remote: RemoteEvent) -> CalendarEvent {
        let date = remote.start.as_ref().and_then(|start| {
            if let Some(date) = &start.date {
                return NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
            }
            start
                .date_time
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|instant| self.zone.date_of(&instant))
        });
        CalendarEvent {
            id: remote.id,
            title: remote.summary.unwrap_or_default(),
            date,
            description: remote.description,
        }
    }
}
