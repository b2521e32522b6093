use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::config::{PropertyNames, Zone};

pub const UNTITLED_TASK: &str = "Untitled Task";
pub const NO_TYPE: &str = "N/A";
pub const NO_CLASS: &str = "None";

// Raw database page as returned by the query endpoint. Every property field is
// optional so schema drift on the database side degrades to defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
    #[serde(default)]
    pub date: Option<DateValue>,
    #[serde(default)]
    pub checkbox: Option<bool>,
    #[serde(default)]
    pub select: Option<SelectValue>,
    #[serde(default)]
    pub relation: Option<Vec<RelationRef>>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectValue {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
}

/// A due value: either a bare calendar date or a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DueDate {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    /// Date-time without an offset, read as wall-clock time in the local zone.
    Floating(NaiveDateTime),
}

impl DueDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(DueDate::Date(date));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(DueDate::DateTime(instant));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(DueDate::Floating)
    }

    /// Calendar day of this due value in `zone`, time of day discarded.
    pub fn local_date(&self, zone: &Zone) -> NaiveDate {
        match self {
            DueDate::Date(date) => *date,
            DueDate::DateTime(instant) => zone.date_of(instant),
            DueDate::Floating(naive) => naive.date(),
        }
    }
}

/// A task row after the parse step. Accessors apply the display defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    pub title: Option<String>,
    pub due: Option<DueDate>,
    /// Raw due text, kept for logging when it fails to parse.
    pub due_raw: Option<String>,
    pub done: bool,
    pub synced: bool,
    pub task_type: Option<String>,
    pub class_id: Option<String>,
    pub resource_url: Option<String>,
}

impl TaskRecord {
    pub fn from_page(page: &Page, names: &PropertyNames) -> Self {
        let prop = |name: &str| page.properties.get(name);

        let title = prop(names.title.as_str())
            .and_then(|p| p.title.as_ref())
            .and_then(|segments| segments.first())
            .and_then(|segment| segment.plain_text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        let due_raw = prop(names.due.as_str())
            .and_then(|p| p.date.as_ref())
            .and_then(|date| date.start.clone());

        Self {
            id: page.id.clone(),
            title,
            due: due_raw.as_deref().and_then(DueDate::parse),
            due_raw,
            done: prop(names.done.as_str()).and_then(|p| p.checkbox).unwrap_or(false),
            synced: prop(names.synced.as_str()).and_then(|p| p.checkbox).unwrap_or(false),
            task_type: prop(names.task_type.as_str())
                .and_then(|p| p.select.as_ref())
                .and_then(|select| select.name.clone())
                .filter(|name| !name.is_empty()),
            class_id: prop(names.class.as_str())
                .and_then(|p| p.relation.as_ref())
                .and_then(|relations| relations.first())
                .map(|relation| relation.id.clone())
                .filter(|id| !id.is_empty()),
            resource_url: prop(names.resources.as_str()).and_then(|p| p.url.clone()),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_TASK)
    }

    pub fn type_label(&self) -> &str {
        self.task_type.as_deref().unwrap_or(NO_TYPE)
    }

    pub fn class_label(&self) -> &str {
        self.class_id.as_deref().unwrap_or(NO_CLASS)
    }

    pub fn resource_link(&self) -> &str {
        self.resource_url.as_deref().unwrap_or("")
    }

    pub fn event_description(&self) -> String {
        format!(
            "Type: {}\nClass: {}\nResources: {}",
            self.type_label(),
            self.class_label(),
            self.resource_link()
        )
    }
}
