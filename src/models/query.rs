use chrono::NaiveDate;
use serde::Serialize;

use crate::config::PropertyNames;

pub const PAGE_SIZE: u32 = 100;

/// Body of a database query request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseQuery {
    pub filter: CompoundFilter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundFilter {
    pub and: Vec<PropertyFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    #[serde(flatten)]
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Date(DateCondition),
    Checkbox(CheckboxCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCondition {
    IsNotEmpty(bool),
    OnOrBefore(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxCondition {
    Equals(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl PropertyFilter {
    pub fn date(property: &str, condition: DateCondition) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::Date(condition),
        }
    }

    pub fn checkbox(property: &str, equals: bool) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::Checkbox(CheckboxCondition::Equals(equals)),
        }
    }
}

impl DatabaseQuery {
    /// Tasks with a due date that are neither done nor already on the calendar.
    pub fn unsynced_tasks(names: &PropertyNames) -> Self {
        Self {
            filter: CompoundFilter {
                and: vec![
                    PropertyFilter::date(&names.due, DateCondition::IsNotEmpty(true)),
                    PropertyFilter::checkbox(&names.done, false),
                    PropertyFilter::checkbox(&names.synced, false),
                ],
            },
            sorts: Vec::new(),
            page_size: PAGE_SIZE,
        }
    }

    /// Undone tasks due on or before `boundary`, earliest first.
    pub fn review_window(names: &PropertyNames, boundary: NaiveDate) -> Self {
        Self {
            filter: CompoundFilter {
                and: vec![
                    PropertyFilter::date(&names.due, DateCondition::IsNotEmpty(true)),
                    PropertyFilter::date(&names.due, DateCondition::OnOrBefore(boundary)),
                    PropertyFilter::checkbox(&names.done, false),
                ],
            },
            sorts: vec![Sort {
                property: names.due.clone(),
                direction: Direction::Ascending,
            }],
            page_size: PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsynced_query_serializes_to_database_filter() {
        let query = DatabaseQuery::unsynced_tasks(&PropertyNames::default());
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": { "and": [
                    { "property": "Due", "date": { "is_not_empty": true } },
                    { "property": "Done", "checkbox": { "equals": false } },
                    { "property": "Synced", "checkbox": { "equals": false } }
                ]},
                "page_size": 100
            })
        );
    }

    #[test]
    fn review_query_has_boundary_and_sort() {
        let boundary = NaiveDate::from_ymd_opt(2026, 10, 26).unwrap();
        let query = DatabaseQuery::review_window(&PropertyNames::default(), boundary);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": { "and": [
                    { "property": "Due", "date": { "is_not_empty": true } },
                    { "property": "Due", "date": { "on_or_before": "2026-10-26" } },
                    { "property": "Done", "checkbox": { "equals": false } }
                ]},
                "sorts": [{ "property": "Due", "direction": "ascending" }],
                "page_size": 100
            })
        );
    }
}
