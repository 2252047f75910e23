use anyhow::{Result, anyhow, bail};
use chrono::{Local, NaiveDate, NaiveTime};

use gymbook::Tracker;
use gymbook::models::de::{parse_date, parse_time};
use gymbook::stats::{WeightUnit, convert_weight};

/// Command context: the tracker plus the display unit.
pub struct App {
    pub tracker: Tracker,
    pub unit: WeightUnit,
}

impl App {
    pub fn new(tracker: Tracker, unit: WeightUnit) -> Self {
        Self { tracker, unit }
    }

    /// Formats a stored kg value in the display unit.
    pub fn weight(&self, kg: f64) -> String {
        format!(
            "{:.1}{}",
            convert_weight(kg, WeightUnit::Kg, self.unit),
            self.unit
        )
    }

    /// Converts a value typed in the display unit to kg.
    pub fn to_kg(&self, value: f64) -> f64 {
        convert_weight(value, self.unit, WeightUnit::Kg)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// clap value parser for dates: `today`, `YYYY-MM-DD` or RFC 3339.
pub fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    if raw.trim().eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    parse_date(raw).ok_or_else(|| format!("not a date: {}", raw))
}

pub fn parse_clock(raw: &str) -> Result<NaiveTime, String> {
    parse_time(raw).ok_or_else(|| format!("not a time (HH:MM): {}", raw))
}

pub fn require_name(name: &str, what: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        bail!("{} name is required", what);
    }
    Ok(name.to_string())
}

/// Turns a `false` from a store operation into a not-found error.
pub fn found(ok: bool, kind: &str, id: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(anyhow!("{} {} not found", kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unit_round_trips_kg() {
        let app = App::new(Tracker::in_memory(), WeightUnit::Lbs);
        assert_eq!(app.weight(100.0), "220.5lbs");
        assert!((app.to_kg(220.462) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn day_parser_accepts_today_and_iso() {
        assert_eq!(parse_day("today").unwrap(), today());
        assert_eq!(
            parse_day("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_day("someday").is_err());
        assert!(require_name("  ", "template").is_err());
        assert!(found(false, "workout", "x").is_err());
    }
}
