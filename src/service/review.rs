use chrono::NaiveDate;
use tracing::warn;

use crate::config::Zone;
use crate::models::calendar_event::CalendarEvent;
use crate::models::task::TaskRecord;

pub const LOOKAHEAD_DAYS: u64 = 7;
pub const SUMMARY_BANNER: &str = "🧾 Task Summary (Overdue + Next 7 Days)";
pub const ALL_CLEAR: &str = "✅ No overdue tasks and nothing due in the next 7 days.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
}

impl Urgency {
    pub const ORDER: [Urgency; 4] = [
        Urgency::Overdue,
        Urgency::Today,
        Urgency::Tomorrow,
        Urgency::Upcoming,
    ];

    /// Bucket for a day offset; offsets past the look-ahead have none.
    pub fn for_offset(offset: i64) -> Option<Self> {
        match offset {
            o if o < 0 => Some(Urgency::Overdue),
            0 => Some(Urgency::Today),
            1 => Some(Urgency::Tomorrow),
            o if o <= LOOKAHEAD_DAYS as i64 => Some(Urgency::Upcoming),
            _ => None,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Urgency::Overdue => "Overdue",
            Urgency::Today => "Due Today",
            Urgency::Tomorrow => "Due Tomorrow",
            Urgency::Upcoming => "Due in Next 7 Days",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Urgency::Overdue => "🔴",
            Urgency::Today => "🟡",
            Urgency::Tomorrow => "🟠",
            Urgency::Upcoming => "🟢",
        }
    }
}

pub fn day_offset(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn label_for_offset(offset: i64) -> String {
    match offset {
        o if o < 0 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        o => format!("Due in {} days", o),
    }
}

pub fn format_line(title: &str, due: NaiveDate, offset: i64) -> String {
    format!(
        "• {} — {} ({})",
        title,
        due.format("%a, %b %-d"),
        label_for_offset(offset)
    )
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReviewGroups {
    overdue: Vec<String>,
    today: Vec<String>,
    tomorrow: Vec<String>,
    upcoming: Vec<String>,
}

impl ReviewGroups {
    pub fn push(&mut self, urgency: Urgency, line: String) {
        self.lines_mut(urgency).push(line);
    }

    pub fn lines(&self, urgency: Urgency) -> &[String] {
        match urgency {
            Urgency::Overdue => &self.overdue,
            Urgency::Today => &self.today,
            Urgency::Tomorrow => &self.tomorrow,
            Urgency::Upcoming => &self.upcoming,
        }
    }

    fn lines_mut(&mut self, urgency: Urgency) -> &mut Vec<String> {
        match urgency {
            Urgency::Overdue => &mut self.overdue,
            Urgency::Today => &mut self.today,
            Urgency::Tomorrow => &mut self.tomorrow,
            Urgency::Upcoming => &mut self.upcoming,
        }
    }

    pub fn is_empty(&self) -> bool {
        Urgency::ORDER.iter().all(|u| self.lines(*u).is_empty())
    }

    pub fn len(&self) -> usize {
        Urgency::ORDER.iter().map(|u| self.lines(*u).len()).sum()
    }
}

/// Buckets tasks by urgency relative to `today`. Input order is kept within a
/// bucket; tasks without a usable due date are skipped.
pub fn group_tasks(tasks: &[TaskRecord], today: NaiveDate, zone: &Zone) -> ReviewGroups {
    let mut groups = ReviewGroups::default();
    for task in tasks {
        let Some(due) = task.due else {
            warn!(task_id = %task.id, due = ?task.due_raw, "Skipping task without a usable due date");
            continue;
        };
        let due = due.local_date(zone);
        let offset = day_offset(due, today);
        let line = format_line(task.display_title(), due, offset);
        if let Some(urgency) = Urgency::for_offset(offset) {
            groups.push(urgency, line);
        }
    }
    groups
}

pub fn compose_summary(groups: &ReviewGroups) -> String {
    let sections: Vec<String> = Urgency::ORDER
        .iter()
        .filter_map(|urgency| {
            let lines = groups.lines(*urgency);
            if lines.is_empty() {
                return None;
            }
            Some(format!(
                "{} {} ({})\n{}",
                urgency.emoji(),
                urgency.heading(),
                lines.len(),
                lines.join("\n")
            ))
        })
        .collect();

    if sections.is_empty() {
        ALL_CLEAR.to_string()
    } else {
        format!("{}\n\n{}", SUMMARY_BANNER, sections.join("\n\n"))
    }
}

/// Events dated `today` whose title contains `review_title`. Calendar listings
/// return anything overlapping the day window, so an all-day event from the
/// neighbouring day can show up and must not count.
pub fn review_candidates<'a>(
    events: &'a [CalendarEvent],
    review_title: &'a str,
    today: NaiveDate,
) -> impl Iterator<Item = &'a CalendarEvent> + 'a {
    events
        .iter()
        .filter(move |event| event.date == Some(today) && event.title.contains(review_title))
}

/// Picks today's review event: an exact title match wins, otherwise the first
/// title containing `review_title`.
pub fn find_review_event<'a>(
    events: &'a [CalendarEvent],
    review_title: &'a str,
    today: NaiveDate,
) -> Option<&'a CalendarEvent> {
    review_candidates(events, review_title, today)
        .find(|event| event.title == review_title)
        .or_else(|| review_candidates(events, review_title, today).next())
}
