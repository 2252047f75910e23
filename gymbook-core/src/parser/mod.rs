//! Compact set notation used by the command line.
//!
//! ```text
//! Bench Press 3x10@60      three sets of 10 reps at 60 kg
//! Pull Up 3x8              bodyweight, weight 0
//! Squat 5@100, 3@110lbs    individual sets, lbs converted to kg
//! ```

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{GymbookError, Result};
use crate::models::{Exercise, SetEntry};
use crate::stats::{WeightUnit, convert_weight};

/// Upper bound on `N` in `NxR` notation.
pub const MAX_SETS: usize = 100;

static GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?P<name>.+?)\s+(?P<sets>\d+)\s*[x×]\s*(?P<reps>\d+)\s*(?:@\s*(?P<weight>\d+(?:\.\d+)?)\s*(?P<unit>kgs?|lbs?|st)?)?\s*$",
    )
    .expect("grouped set pattern")
});

static LISTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?P<name>.+?)\s+(?P<sets>\d+\s*@.*)$").expect("listed set pattern")
});

static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?P<reps>\d+)\s*@\s*(?P<weight>\d+(?:\.\d+)?)\s*(?P<unit>kgs?|lbs?|st)?\s*$")
        .expect("single set pattern")
});

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExercise {
    pub name: String,
    pub sets: Vec<SetEntry>,
}

impl ParsedExercise {
    pub fn into_exercise(self) -> Exercise {
        Exercise::new(self.name).with_sets(self.sets)
    }
}

fn weight_in_kg(raw: Option<&str>, unit: Option<&str>, input: &str) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    let value: f64 = raw
        .parse()
        .map_err(|_| GymbookError::Parse(input.to_string()))?;
    let unit = match unit {
        Some(u) => u.parse::<WeightUnit>()?,
        None => WeightUnit::Kg,
    };
    Ok(convert_weight(value, unit, WeightUnit::Kg))
}

fn number<T: std::str::FromStr>(raw: &str, input: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| GymbookError::Parse(input.to_string()))
}

/// Parses one `REPS@WEIGHT[unit]` set.
pub fn parse_set(input: &str) -> Result<SetEntry> {
    let caps = SINGLE
        .captures(input)
        .ok_or_else(|| GymbookError::Parse(input.to_string()))?;
    let reps = number(&caps["reps"], input)?;
    let weight = weight_in_kg(
        caps.name("weight").map(|m| m.as_str()),
        caps.name("unit").map(|m| m.as_str()),
        input,
    )?;
    Ok(SetEntry::new(reps, weight))
}

pub fn parse_exercise(input: &str) -> Result<ParsedExercise> {
    if let Some(caps) = GROUPED.captures(input) {
        let count: usize = number(&caps["sets"], input)?;
        if count == 0 || count > MAX_SETS {
            return Err(GymbookError::Validation(format!(
                "set count must be between 1 and {} in {:?}",
                MAX_SETS, input
            )));
        }
        let reps = number(&caps["reps"], input)?;
        let weight = weight_in_kg(
            caps.name("weight").map(|m| m.as_str()),
            caps.name("unit").map(|m| m.as_str()),
            input,
        )?;
        let parsed = ParsedExercise {
            name: caps["name"].trim().to_string(),
            sets: vec![SetEntry::new(reps, weight); count],
        };
        debug!("Parsed {:?} as {:?}", input, parsed);
        return Ok(parsed);
    }

    if let Some(caps) = LISTED.captures(input) {
        let sets = caps["sets"]
            .split(',')
            .map(parse_set)
            .collect::<Result<Vec<_>>>()?;
        let parsed = ParsedExercise {
            name: caps["name"].trim().to_string(),
            sets,
        };
        debug!("Parsed {:?} as {:?}", input, parsed);
        return Ok(parsed);
    }

    Err(GymbookError::Parse(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_notation() {
        let parsed = parse_exercise("Bench Press 3x10@60").unwrap();
        assert_eq!(parsed.name, "Bench Press");
        assert_eq!(parsed.sets, vec![SetEntry::new(10, 60.0); 3]);
    }

    #[test]
    fn set_count_is_bounded() {
        let at_cap = format!("Bench {}x5@60", MAX_SETS);
        assert_eq!(parse_exercise(&at_cap).unwrap().sets.len(), MAX_SETS);

        for input in [
            "Bench 101x5@60",
            "Bench 1000000000x5@60",
            "Bench 1152921504606846976x5@60",
            "Bench 0x5@60",
        ] {
            assert!(
                matches!(parse_exercise(input), Err(GymbookError::Validation(_))),
                "{input}"
            );
        }
        assert!(parse_exercise("Bench 99999999999999999999999x5@60").is_err());
    }

    #[test]
    fn grouped_without_weight_is_bodyweight() {
        let parsed = parse_exercise("Pull Up 4 X 8").unwrap();
        assert_eq!(parsed.name, "Pull Up");
        assert_eq!(parsed.sets.len(), 4);
        assert!(parsed.sets.iter().all(|s| s.weight == 0.0 && s.reps == 8));
    }

    #[test]
    fn listed_sets_with_units() {
        let parsed = parse_exercise("Back Squat 5@100, 3@220.462lbs").unwrap();
        assert_eq!(parsed.name, "Back Squat");
        assert_eq!(parsed.sets[0], SetEntry::new(5, 100.0));
        assert_eq!(parsed.sets[1].reps, 3);
        assert!((parsed.sets[1].weight - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_set() {
        assert_eq!(parse_set(" 8 @ 65 ").unwrap(), SetEntry::new(8, 65.0));
        assert_eq!(parse_set("8@65KG").unwrap(), SetEntry::new(8, 65.0));
        assert!(parse_set("eight@65").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_exercise("Bench Press").is_err());
        assert!(parse_exercise("Bench 0x5@60").is_err());
        assert!(parse_exercise("Bench 5@60, lots").is_err());
    }
}
