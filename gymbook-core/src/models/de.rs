//! Lenient deserializers for records written by older clients.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces any JSON value into a boolean.
///
/// `null` and missing values are `false`, numbers are `true` when non-zero and
/// strings only when they spell "true". Arrays and objects are `false`.
pub fn coerce_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    })
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| Error::custom(format!("invalid date: {}", raw)))
}

pub fn lenient_date_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("invalid date: {}", raw))),
    }
}

pub fn lenient_time_opt<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_time(&raw)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("invalid time: {}", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "coerce_bool")]
        completed: bool,
    }

    fn flag(json: &str) -> bool {
        serde_json::from_str::<Flag>(json).unwrap().completed
    }

    #[test]
    fn coerces_loose_booleans() {
        assert!(flag(r#"{"completed":true}"#));
        assert!(flag(r#"{"completed":1}"#));
        assert!(flag(r#"{"completed":"TRUE"}"#));
        assert!(!flag(r#"{"completed":0}"#));
        assert!(!flag(r#"{"completed":null}"#));
        assert!(!flag(r#"{"completed":"no"}"#));
        assert!(!flag(r#"{}"#));
        assert!(!flag(r#"{"completed":[true]}"#));
        assert!(!flag(r#"{"completed":{"value":true}}"#));
    }

    #[test]
    fn parses_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("2024-03-09"), Some(expected));
        assert_eq!(parse_date("2024-03-09T10:15:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-09T10:15:00.000+00:00"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn parses_short_and_long_times() {
        assert_eq!(parse_time("07:30"), NaiveTime::from_hms_opt(7, 30, 0));
        assert_eq!(parse_time("07:30:15"), NaiveTime::from_hms_opt(7, 30, 15));
        assert_eq!(parse_time("7pm"), None);
    }
}
