use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::de;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurement {
    #[serde(default)]
    pub id: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub date: NaiveDate,
    /// Body weight in kg.
    pub weight: Option<f64>,
    /// Body fat percentage.
    pub body_fat: Option<f64>,
    // Circumferences, in cm.
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
    pub notes: Option<String>,
}

impl BodyMeasurement {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            date,
            weight: None,
            body_fat: None,
            chest: None,
            waist: None,
            hips: None,
            arms: None,
            thighs: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPhoto {
    #[serde(default)]
    pub id: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub date: NaiveDate,
    pub image_path: String,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

impl ProgressPhoto {
    pub fn new(date: NaiveDate, image_path: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            date,
            image_path: image_path.into(),
            weight: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    pub notes: Option<String>,
}

impl Supplement {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            notes: None,
        }
    }
}

/// Intake record. `supplement_id` is a lookup key; the supplement may be gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementLog {
    #[serde(default)]
    pub id: String,
    pub supplement_id: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub taken: bool,
}

impl SupplementLog {
    pub fn new(supplement_id: impl Into<String>, date: NaiveDate, taken: bool) -> Self {
        Self {
            id: String::new(),
            supplement_id: supplement_id.into(),
            date,
            taken,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLog {
    #[serde(default)]
    pub id: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub date: NaiveDate,
    /// 1 (worst) to 5 (best).
    pub mood: u8,
    /// Same scale as `mood`.
    pub energy: Option<u8>,
    pub notes: Option<String>,
}

impl MoodLog {
    /// Accepted values for `mood` and `energy`.
    pub const SCALE: RangeInclusive<u8> = 1..=5;

    pub fn new(date: NaiveDate, mood: u8) -> Self {
        Self {
            id: String::new(),
            date,
            mood,
            energy: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteroidCycle {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "de::lenient_date_opt")]
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl SteroidCycle {
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            start_date,
            end_date: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compound {
    #[serde(default)]
    pub id: String,
    pub cycle_id: String,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
}

impl Compound {
    pub fn new(
        cycle_id: impl Into<String>,
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            cycle_id: cycle_id.into(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakPoint {
    #[serde(default)]
    pub id: String,
    pub muscle_group: String,
    pub notes: Option<String>,
    /// Lower is more urgent.
    #[serde(default)]
    pub priority: u8,
}

impl WeakPoint {
    pub fn new(muscle_group: impl Into<String>, priority: u8) -> Self {
        Self {
            id: String::new(),
            muscle_group: muscle_group.into(),
            notes: None,
            priority,
        }
    }
}

super::entity!(BodyMeasurement, "body measurement", "bodyMeasurements");
super::entity!(ProgressPhoto, "progress photo", "progressPhotos");
super::entity!(Supplement, "supplement", "supplements");
super::entity!(SupplementLog, "supplement log", "supplementLogs");
super::entity!(MoodLog, "mood log", "moodLogs");
super::entity!(SteroidCycle, "steroid cycle", "steroidCycles");
super::entity!(Compound, "compound", "compounds");
super::entity!(WeakPoint, "weak point", "weakPoints");

super::dated!(BodyMeasurement);
super::dated!(ProgressPhoto);
super::dated!(SupplementLog);
super::dated!(MoodLog);
