use log::info;
use std::sync::Arc;

use crate::config::Config;
use crate::models::{
    BodyMeasurement, Compound, MoodLog, ProgressPhoto, Reminder, SteroidCycle, Supplement,
    SupplementLog, TrainingBlock, WeakPoint, WeeklyRoutine, Workout, WorkoutPlan,
    WorkoutTemplate,
};
use crate::storage::{self, MemoryStorage, Storage};
use crate::store::EntityStore;

pub struct Tracker {
    pub(super) storage: Arc<dyn Storage>,
    pub(super) authenticated: bool,

    pub(super) workouts: EntityStore<Workout>,
    pub(super) templates: EntityStore<WorkoutTemplate>,
    pub(super) plans: EntityStore<WorkoutPlan>,
    pub(super) routines: EntityStore<WeeklyRoutine>,
    pub(super) blocks: EntityStore<TrainingBlock>,
    pub(super) measurements: EntityStore<BodyMeasurement>,
    pub(super) photos: EntityStore<ProgressPhoto>,
    pub(super) supplements: EntityStore<Supplement>,
    pub(super) supplement_logs: EntityStore<SupplementLog>,
    pub(super) mood_logs: EntityStore<MoodLog>,
    pub(super) reminders: EntityStore<Reminder>,
    pub(super) cycles: EntityStore<SteroidCycle>,
    pub(super) compounds: EntityStore<Compound>,
    pub(super) weak_points: EntityStore<WeakPoint>,
}

impl Tracker {
    /// Loads every store from `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let mut tracker = Self {
            workouts: EntityStore::load(storage.clone()),
            templates: EntityStore::load(storage.clone()),
            plans: EntityStore::load(storage.clone()),
            routines: EntityStore::load(storage.clone()),
            blocks: EntityStore::load(storage.clone()),
            measurements: EntityStore::load(storage.clone()),
            photos: EntityStore::load(storage.clone()),
            supplements: EntityStore::load(storage.clone()),
            supplement_logs: EntityStore::load(storage.clone()),
            mood_logs: EntityStore::load(storage.clone()),
            reminders: EntityStore::load(storage.clone()),
            cycles: EntityStore::load(storage.clone()),
            compounds: EntityStore::load(storage.clone()),
            weak_points: EntityStore::load(storage.clone()),
            storage,
            authenticated: false,
        };
        tracker.plans.normalize_active();
        info!(
            "Tracker ready: {} workouts, {} templates, {} routines",
            tracker.workouts.len(),
            tracker.templates.len(),
            tracker.routines.len()
        );
        tracker
    }

    /// A tracker backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let storage = storage::open(&config.database_url)?;
        Ok(Self::new(storage))
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Gate the front end consults before showing data. Nothing in the
    /// tracker itself depends on it.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    /// Empties every store, including durable storage.
    pub fn clear_all(&mut self) {
        self.workouts.clear();
        self.templates.clear();
        self.plans.clear();
        self.routines.clear();
        self.blocks.clear();
        self.measurements.clear();
        self.photos.clear();
        self.supplements.clear();
        self.supplement_logs.clear();
        self.mood_logs.clear();
        self.reminders.clear();
        self.cycles.clear();
        self.compounds.clear();
        self.weak_points.clear();
        info!("Cleared all tracker data");
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("workouts", &self.workouts)
            .field("templates", &self.templates)
            .field("routines", &self.routines)
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodLog;
    use chrono::NaiveDate;

    #[test]
    fn reopening_reads_back_every_store() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut tracker = Tracker::new(storage.clone());
        tracker
            .add_mood_log(MoodLog::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 5))
            .unwrap();
        tracker.add_template(WorkoutTemplate::new("Legs", Vec::new()));

        let reopened = Tracker::new(storage);
        assert_eq!(reopened.mood_logs().len(), 1);
        assert_eq!(reopened.templates().all()[0].name, "Legs");
    }

    #[test]
    fn loading_repairs_conflicting_active_plans() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                "workoutPlans",
                r#"[{"id":"a","name":"A","isActive":true},{"id":"b","name":"B","isActive":true}]"#,
            )
            .unwrap();

        let tracker = Tracker::new(storage.clone());
        assert_eq!(tracker.plans().filter(|p| p.is_active).len(), 1);
        assert_eq!(tracker.active_plan().unwrap().id, "a");

        let stored = storage.get_item("workoutPlans").unwrap().unwrap();
        let plans: Vec<WorkoutPlan> = serde_json::from_str(&stored).unwrap();
        assert!(!plans[1].is_active);
    }

    #[test]
    fn clear_all_empties_storage_too() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut tracker = Tracker::new(storage.clone());
        tracker.add_template(WorkoutTemplate::new("Legs", Vec::new()));
        tracker.clear_all();

        assert!(tracker.templates().is_empty());
        assert!(Tracker::new(storage).templates().is_empty());
    }

    #[test]
    fn auth_gate_defaults_closed() {
        let mut tracker = Tracker::in_memory();
        assert!(!tracker.is_authenticated());
        tracker.set_authenticated(true);
        assert!(tracker.is_authenticated());
    }
}
