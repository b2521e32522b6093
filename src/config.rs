use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ConfigError;

pub const DEFAULT_TITLE_PROPERTY: &str = "Task";
pub const DEFAULT_REVIEW_EVENT_TITLE: &str = "Daily Task Review";
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com";
pub const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const DEFAULT_DAILY_RUN_HOUR: u32 = 7;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings from an optional `KEY=VALUE` file, layered over the process
/// environment: a key the file does not set is read from the environment.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    file_values: HashMap<String, String>,
    env_fallback: bool,
}

impl AppConfig {
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file_values = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_string(),
                    source,
                })?;
                parse_entries(&content)?
            }
            None => HashMap::new(),
        };
        Ok(Self {
            file_values,
            env_fallback: true,
        })
    }

    /// File content only; the environment is never consulted.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            file_values: parse_entries(content)?,
            env_fallback: false,
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.file_values
            .get(key)
            .cloned()
            .or_else(|| self.env_fallback.then(|| env::var(key).ok()).flatten())
    }
}

// Blank lines and `#` comments are skipped, `export ` is optional and one
// layer of matching quotes is removed from the value.
fn parse_entries(content: &str) -> Result<HashMap<String, String>, ConfigError> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            let entry = line.strip_prefix("export ").unwrap_or(line);
            match entry.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), unquote(value.trim()).to_string()))
                }
                _ => Err(ConfigError::InvalidLine {
                    line: line_no,
                    content: line.to_string(),
                }),
            }
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value)
}

/// Timezone used to turn due timestamps into calendar days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Local,
    Named(Tz),
}

impl Zone {
    pub fn date_of<T: TimeZone>(&self, instant: &DateTime<T>) -> NaiveDate {
        match self {
            Zone::Local => instant.with_timezone(&Local).date_naive(),
            Zone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.date_of(&now)
    }

    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        self.resolve_local(date.and_time(NaiveTime::MIN))
    }

    /// Wall-clock time in this zone; a time skipped by a DST jump is read as UTC.
    pub fn resolve_local(&self, naive: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .unwrap_or_else(|| Local.from_utc_datetime(&naive))
                .fixed_offset(),
            Zone::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
                .fixed_offset(),
        }
    }
}

/// Names of the task database properties read and written by the sync.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNames {
    pub title: String,
    pub due: String,
    pub done: String,
    pub synced: String,
    pub task_type: String,
    pub class: String,
    pub resources: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_PROPERTY.to_string(),
            due: "Due".to_string(),
            done: "Done".to_string(),
            synced: "Synced".to_string(),
            task_type: "Type".to_string(),
            class: "Class".to_string(),
            resources: "Links/Resources".to_string(),
        }
    }
}

/// Settings resolved once at start and handed to both components.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub notion_token: String,
    pub database_id: String,
    pub calendar_id: String,
    pub google_access_token: String,
    pub properties: PropertyNames,
    pub review_event_title: String,
    pub zone: Zone,
    pub daily_run_hour: u32,
    pub http_timeout: Duration,
    pub notion_api_base: String,
    pub calendar_api_base: String,
}

impl SyncConfig {
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::resolve(|key| config.get(key))
    }

    pub fn resolve<F>(get_prop: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            get_prop(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let zone = match get_prop("TIMEZONE").filter(|v| !v.trim().is_empty()) {
            Some(name) => Zone::Named(name.trim().parse::<Tz>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "TIMEZONE",
                    value: name.clone(),
                }
            })?),
            None => Zone::Local,
        };

        let daily_run_hour = match get_prop("DAILY_RUN_HOUR") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|hour| *hour < 24)
                .ok_or(ConfigError::InvalidValue {
                    key: "DAILY_RUN_HOUR",
                    value: raw,
                })?,
            None => DEFAULT_DAILY_RUN_HOUR,
        };

        let http_timeout = match get_prop("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidValue {
                    key: "HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let properties = PropertyNames {
            title: get_prop("TITLE_PROPERTY").unwrap_or(DEFAULT_TITLE_PROPERTY.to_string()),
            ..PropertyNames::default()
        };

        Ok(Self {
            notion_token: required("NOTION_TOKEN")?,
            database_id: required("NOTION_DATABASE_ID")?,
            calendar_id: required("GOOGLE_CALENDAR_ID")?,
            google_access_token: required("GOOGLE_ACCESS_TOKEN")?,
            properties,
            review_event_title: get_prop("REVIEW_EVENT_TITLE")
                .unwrap_or(DEFAULT_REVIEW_EVENT_TITLE.to_string()),
            zone,
            daily_run_hour,
            http_timeout,
            notion_api_base: get_prop("NOTION_API_BASE")
                .unwrap_or(DEFAULT_NOTION_API_BASE.to_string()),
            calendar_api_base: get_prop("GOOGLE_CALENDAR_API_BASE")
                .unwrap_or(DEFAULT_CALENDAR_API_BASE.to_string()),
        })
    }
}
