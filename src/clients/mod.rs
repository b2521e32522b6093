pub mod google_calendar;
pub mod notion_client;

use reqwest::{Response, Url};

use crate::error::SyncError;

/// Joins `segments` onto `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, SyncError> {
    let mut url = Url::parse(base).map_err(|_| SyncError::InvalidUrl(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SyncError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Reads the body once and turns non-2xx responses into `SyncError::Status`.
pub(crate) async fn read_body(
    service: &'static str,
    response: Response,
) -> Result<String, SyncError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(SyncError::Status {
            service,
            status,
            body: text,
        });
    }
    Ok(text)
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    what: &'static str,
    text: &str,
) -> Result<T, SyncError> {
    serde_json::from_str(text).map_err(|source| SyncError::Decode { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_segments_and_keeps_base_path() {
        let url = endpoint(
            "https://www.googleapis.com/calendar/v3/",
            &["calendars", "team#holiday@group.calendar.google.com", "events"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%23holiday@group.calendar.google.com/events"
        );
    }

    #[test]
    fn endpoint_rejects_garbage_base() {
        assert!(matches!(
            endpoint("not a url", &["x"]),
            Err(SyncError::InvalidUrl(_))
        ));
    }
}
