//! Whole-dataset export and import as a single JSON document.

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::Tracker;
use crate::errors::{GymbookError, Result};
use crate::models::{
    BodyMeasurement, Compound, MoodLog, ProgressPhoto, Reminder, SteroidCycle, Supplement,
    SupplementLog, TrainingBlock, WeakPoint, WeeklyRoutine, Workout, WorkoutPlan,
    WorkoutTemplate,
};

pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub workout_templates: Vec<WorkoutTemplate>,
    #[serde(default)]
    pub workout_plans: Vec<WorkoutPlan>,
    #[serde(default)]
    pub weekly_routines: Vec<WeeklyRoutine>,
    #[serde(default)]
    pub training_blocks: Vec<TrainingBlock>,
    #[serde(default)]
    pub body_measurements: Vec<BodyMeasurement>,
    #[serde(default)]
    pub progress_photos: Vec<ProgressPhoto>,
    #[serde(default)]
    pub supplements: Vec<Supplement>,
    #[serde(default)]
    pub supplement_logs: Vec<SupplementLog>,
    #[serde(default)]
    pub mood_logs: Vec<MoodLog>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub steroid_cycles: Vec<SteroidCycle>,
    #[serde(default)]
    pub compounds: Vec<Compound>,
    #[serde(default)]
    pub weak_points: Vec<WeakPoint>,
}

impl ExportBundle {
    pub fn record_count(&self) -> usize {
        self.workouts.len()
            + self.workout_templates.len()
            + self.workout_plans.len()
            + self.weekly_routines.len()
            + self.training_blocks.len()
            + self.body_measurements.len()
            + self.progress_photos.len()
            + self.supplements.len()
            + self.supplement_logs.len()
            + self.mood_logs.len()
            + self.reminders.len()
            + self.steroid_cycles.len()
            + self.compounds.len()
            + self.weak_points.len()
    }
}

impl Tracker {
    pub fn snapshot(&self) -> ExportBundle {
        ExportBundle {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            workouts: self.workouts.all().to_vec(),
            workout_templates: self.templates.all().to_vec(),
            workout_plans: self.plans.all().to_vec(),
            weekly_routines: self.routines.all().to_vec(),
            training_blocks: self.blocks.all().to_vec(),
            body_measurements: self.measurements.all().to_vec(),
            progress_photos: self.photos.all().to_vec(),
            supplements: self.supplements.all().to_vec(),
            supplement_logs: self.supplement_logs.all().to_vec(),
            mood_logs: self.mood_logs.all().to_vec(),
            reminders: self.reminders.all().to_vec(),
            steroid_cycles: self.cycles.all().to_vec(),
            compounds: self.compounds.all().to_vec(),
            weak_points: self.weak_points.all().to_vec(),
        }
    }

    /// Pretty-printed JSON of every collection.
    pub fn export_data(&self) -> Result<String> {
        let bundle = self.snapshot();
        let json = serde_json::to_string_pretty(&bundle)?;
        info!("Exported {} records", bundle.record_count());
        Ok(json)
    }

    pub fn export_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.export_data()?;
        fs::write(path, json).with_context(|| format!("writing export to {}", path.display()))?;
        Ok(())
    }

    /// Replaces every store with the contents of an export. Returns the
    /// number of records imported.
    pub fn import_data(&mut self, json: &str) -> Result<usize> {
        let bundle: ExportBundle = serde_json::from_str(json)?;
        if bundle.version > EXPORT_VERSION {
            return Err(GymbookError::Validation(format!(
                "export version {} is newer than supported version {}",
                bundle.version, EXPORT_VERSION
            )));
        }
        let count = bundle.record_count();

        self.workouts.replace_all(bundle.workouts);
        self.templates.replace_all(bundle.workout_templates);
        self.plans.replace_all(bundle.workout_plans);
        self.plans.normalize_active();
        self.routines.replace_all(bundle.weekly_routines);
        self.blocks.replace_all(bundle.training_blocks);
        self.measurements.replace_all(bundle.body_measurements);
        self.photos.replace_all(bundle.progress_photos);
        self.supplements.replace_all(bundle.supplements);
        self.supplement_logs.replace_all(bundle.supplement_logs);
        self.mood_logs.replace_all(bundle.mood_logs);
        self.reminders.replace_all(bundle.reminders);
        self.cycles.replace_all(bundle.steroid_cycles);
        self.compounds.replace_all(bundle.compounds);
        self.weak_points.replace_all(bundle.weak_points);

        info!("Imported {} records (export version {})", count, bundle.version);
        Ok(count)
    }
}
