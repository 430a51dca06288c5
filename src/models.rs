//! Frontend Models
//!
//! Data structures matching backend entities, plus the draft/patch
//! shapes sent on create and update requests.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Weekday/Weekend classification, derived from the schedule date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
}

impl DayType {
    /// Classify a calendar date (Saturday and Sunday count as Weekend)
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

/// Schedule lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScheduleStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Planned => "Planned",
            ScheduleStatus::InProgress => "InProgress",
            ScheduleStatus::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "InProgress" => ScheduleStatus::InProgress,
            "Completed" => ScheduleStatus::Completed,
            _ => ScheduleStatus::Planned,
        }
    }
}

/// Item priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Low" => Priority::Low,
            "High" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// A single time-boxed task inside a schedule (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Backend-assigned identifier
    pub id: String,
    pub title: String,
    /// Free-text grouping label
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub completed: bool,
}

/// A day-scoped container of planned items (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Backend-assigned identifier
    pub id: String,
    #[serde(with = "day")]
    pub date: NaiveDate,
    #[serde(default)]
    pub day_type: DayType,
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(default)]
    pub items: Vec<ScheduleItem>,
}

/// Item payload for create requests (backend assigns the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub completed: bool,
}

impl ItemDraft {
    /// Clone an existing item into a draft, dropping its identifier so
    /// the backend assigns a fresh one
    pub fn from_item(item: &ScheduleItem) -> Self {
        Self {
            title: item.title.clone(),
            category: item.category.clone(),
            priority: item.priority,
            start_time: item.start_time,
            end_time: item.end_time,
            completed: item.completed,
        }
    }
}

/// Partial item payload for update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Schedule payload for create requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    #[serde(with = "day")]
    pub date: NaiveDate,
    pub day_type: DayType,
    pub status: ScheduleStatus,
    pub items: Vec<ItemDraft>,
}

/// Partial schedule payload for update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePatch {
    #[serde(with = "day::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_type: Option<DayType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
}

/// User input for a new schedule, before validation
///
/// The date stays optional here; the store rejects drafts without one
/// before any request is made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleDraft {
    pub date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    pub items: Vec<ItemDraft>,
}

/// A tracked skill (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: String,
    pub progress: u8,
    #[serde(default)]
    pub description: String,
    pub priority: String,
}

/// Skill payload for create requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub status: String,
    pub progress: u8,
    pub description: String,
    pub priority: String,
}

/// A named grouping label shared by the skill and schedule domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// Serde helper for `HH:MM` clock times
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => ser.serialize_some(&time.format(FORMAT).to_string()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(de)?;
        raw.map(|s| {
            NaiveTime::parse_from_str(&s, FORMAT)
                .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
                .map_err(D::Error::custom)
        })
        .transpose()
    }
}

/// Serde helper for calendar days
///
/// The backend sometimes returns full timestamps for schedule dates;
/// only the calendar-day portion is meaningful, so deserialization keeps
/// the `YYYY-MM-DD` prefix and serialization always emits the canonical
/// `YYYY-MM-DD` form.
pub(crate) mod day {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        let prefix = raw.split(|c| c == 'T' || c == ' ').next().unwrap_or(raw);
        NaiveDate::parse_from_str(prefix, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(value: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(de)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid calendar date: {raw}")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDate>,
            ser: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => ser.serialize_some(&date.format(FORMAT).to_string()),
                None => ser.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_day_type_from_date() {
        // 2026-08-29 is a Saturday, 2026-08-30 a Sunday, 2026-08-31 a Monday
        assert_eq!(DayType::from_date(date("2026-08-29")), DayType::Weekend);
        assert_eq!(DayType::from_date(date("2026-08-30")), DayType::Weekend);
        assert_eq!(DayType::from_date(date("2026-08-31")), DayType::Weekday);
        assert_eq!(DayType::from_date(date("2026-09-04")), DayType::Weekday);
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ScheduleStatus::from_str("Planned"), ScheduleStatus::Planned);
        assert_eq!(
            ScheduleStatus::from_str(ScheduleStatus::InProgress.as_str()),
            ScheduleStatus::InProgress
        );
        // unknown strings fall back to Planned
        assert_eq!(ScheduleStatus::from_str("???"), ScheduleStatus::Planned);
    }

    #[test]
    fn test_item_draft_strips_id() {
        let item = ScheduleItem {
            id: "item-1".to_string(),
            title: "Review PRs".to_string(),
            category: "Development".to_string(),
            priority: Priority::High,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(10, 30, 0),
            completed: true,
        };
        let draft = ItemDraft::from_item(&item);
        assert_eq!(draft.title, "Review PRs");
        assert_eq!(draft.priority, Priority::High);
        assert!(draft.completed);
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:30");
    }

    #[test]
    fn test_schedule_accepts_timestamp_dates() {
        let schedule: Schedule = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "date": "2026-08-30T00:00:00Z",
            "dayType": "Weekend",
            "status": "Planned",
            "items": []
        }))
        .unwrap();
        assert_eq!(schedule.date, date("2026-08-30"));

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["date"], "2026-08-30");
    }

    #[test]
    fn test_item_times_accept_seconds() {
        let item: ScheduleItem = serde_json::from_value(serde_json::json!({
            "id": "i1",
            "title": "Standup",
            "category": "Other",
            "priority": "Low",
            "startTime": "09:15:00",
            "endTime": "09:30"
        }))
        .unwrap();
        assert_eq!(item.start_time, NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(item.end_time, NaiveTime::from_hms_opt(9, 30, 0));
        assert!(!item.completed);
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = ItemPatch {
            completed: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }
}
