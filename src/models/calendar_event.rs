use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Start day for all-day events, or the local start day for timed ones.
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAllDayEvent {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
}
