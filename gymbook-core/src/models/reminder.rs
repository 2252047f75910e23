use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::de;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Workout,
    Supplement,
    Measurement,
    Photo,
    Custom,
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderType::Workout => write!(f, "workout"),
            ReminderType::Supplement => write!(f, "supplement"),
            ReminderType::Measurement => write!(f, "measurement"),
            ReminderType::Photo => write!(f, "photo"),
            ReminderType::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for ReminderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "workout" => Ok(ReminderType::Workout),
            "supplement" => Ok(ReminderType::Supplement),
            "measurement" => Ok(ReminderType::Measurement),
            "photo" => Ok(ReminderType::Photo),
            "custom" => Ok(ReminderType::Custom),
            other => Err(format!("unknown reminder type: {}", other)),
        }
    }
}

/// A one-off (`due_date`) or recurring (`days`, 0 = Sunday) reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    #[serde(default, deserialize_with = "de::lenient_date_opt")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::lenient_time_opt")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub days: Vec<u8>,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub seen: bool,
}

impl Reminder {
    pub fn new(title: impl Into<String>, reminder_type: ReminderType) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            reminder_type,
            due_date: None,
            time: None,
            days: Vec::new(),
            seen: false,
        }
    }

    /// True when the reminder falls on `now`'s day and its time has passed.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        if self.seen {
            return false;
        }
        let today = now.date();
        let weekday = today.weekday().num_days_from_sunday() as u8;
        let day_matches = self.due_date == Some(today) || self.days.contains(&weekday);
        let time_reached = self.time.is_none_or(|t| t <= now.time());
        day_matches && time_reached
    }
}

super::entity!(Reminder, "reminder", "reminders");

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn one_off_reminder_is_due_after_its_time() {
        let mut reminder = Reminder::new("Weigh in", ReminderType::Measurement);
        reminder.due_date = NaiveDate::from_ymd_opt(2024, 6, 3);
        reminder.time = NaiveTime::from_hms_opt(8, 0, 0);

        assert!(!reminder.is_due(at(2024, 6, 3, 7, 59)));
        assert!(reminder.is_due(at(2024, 6, 3, 8, 0)));
        assert!(!reminder.is_due(at(2024, 6, 4, 9, 0)));

        reminder.seen = true;
        assert!(!reminder.is_due(at(2024, 6, 3, 9, 0)));
    }

    #[test]
    fn recurring_reminder_matches_weekday() {
        // 2024-06-03 is a Monday.
        let mut reminder = Reminder::new("Creatine", ReminderType::Supplement);
        reminder.days = vec![1, 3, 5];
        assert!(reminder.is_due(at(2024, 6, 3, 12, 0)));
        assert!(!reminder.is_due(at(2024, 6, 4, 12, 0)));
    }

    #[test]
    fn type_field_is_renamed() {
        let json = r#"{"id":"r","title":"Leg day","type":"workout","time":"18:30","days":[2]}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(reminder.reminder_type, ReminderType::Workout);
        assert_eq!(reminder.time, NaiveTime::from_hms_opt(18, 30, 0));
        assert!(!reminder.seen);
    }
}
