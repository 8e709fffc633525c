use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

use super::grid::{month_name, WEEKDAY_NAMES};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// A single-day event as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Canonical `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keys written by other tools, carried through saves untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The user-editable part of an [`Event`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Event {
    pub fn new(id: String, draft: EventDraft) -> Self {
        let mut event = Self {
            id,
            title: String::new(),
            date: String::new(),
            start_time: None,
            end_time: None,
            location: None,
            description: None,
            extra: serde_json::Map::new(),
        };
        event.apply(draft);
        event
    }

    /// Replace every user-editable field, keeping the id and unknown keys.
    pub fn apply(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.date = draft.date;
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.location = draft.location;
        self.description = draft.description;
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
        }
    }

    /// Whether the event satisfies the persisted invariants.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && parse_date_string(&self.date).is_some()
    }

    /// Label used for the event chip inside a day cell.
    pub fn chip_label(&self) -> String {
        match self.start_time.as_deref().and_then(format_time_12h) {
            Some(time) => format!("{} {}", time, self.title),
            None => self.title.clone(),
        }
    }

    pub fn time_range_display(&self) -> Option<String> {
        let start = self.start_time.as_deref().and_then(format_time_12h)?;
        match self.end_time.as_deref().and_then(format_time_12h) {
            Some(end) => Some(format!("{} - {}", start, end)),
            None => Some(start),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Canonical date key for a 0-indexed month.
///
/// Event creation and grid lookup must both go through this function;
/// any difference in format makes events silently disappear from the grid.
pub fn format_date_string(year: i32, month0: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month0 + 1, day)
}

pub fn date_string(date: NaiveDate) -> String {
    format_date_string(date.year(), date.month0(), date.day())
}

pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    // chrono accepts "2024-1-5"; only the zero-padded form is canonical
    (date_string(date) == s).then_some(date)
}

pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT).ok()
}

/// `"13:05"` -> `"1:05 PM"`.
pub fn format_time_12h(time24: &str) -> Option<String> {
    let time = parse_time(time24)?;
    let (is_pm, hour) = time.hour12();
    Some(format!(
        "{}:{:02} {}",
        hour,
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    ))
}

/// `"2024-01-05"` -> `"Friday, January 5"`.
pub fn format_display_date(date: &str) -> Option<String> {
    let date = parse_date_string(date)?;
    Some(format!(
        "{}, {} {}",
        WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize],
        month_name(date.month0()),
        date.day()
    ))
}

/// Every event on `date`, in list order.
pub fn events_on_date<'a>(events: &'a [Event], date: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.date == date).collect()
}
