//! Entity records tracked by the application.
//!
//! Every record is flat and carries its own string id. Records are stored as
//! JSON arrays with camelCase field names, one array per entity type.

pub mod de;
mod health;
mod reminder;
mod training;

pub use health::{
    BodyMeasurement, Compound, MoodLog, ProgressPhoto, SteroidCycle, Supplement, SupplementLog,
    WeakPoint,
};
pub use reminder::{Reminder, ReminderType};
pub use training::{
    Exercise, RoutineDay, SetEntry, TrainingBlock, WeeklyRoutine, Workout, WorkoutPlan,
    WorkoutTemplate,
};

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that can live in an [`EntityStore`](crate::store::EntityStore).
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Human readable kind, used in logs and errors.
    const KIND: &'static str;
    /// Fixed key the store persists under.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Records that belong to a single calendar day.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

pub trait Archivable {
    fn is_archived(&self) -> bool;
    fn set_archived(&mut self, archived: bool);
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

macro_rules! entity {
    ($ty:ty, $kind:literal, $key:literal) => {
        impl $crate::models::Entity for $ty {
            const KIND: &'static str = $kind;
            const STORAGE_KEY: &'static str = $key;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

macro_rules! dated {
    ($ty:ty) => {
        impl $crate::models::Dated for $ty {
            fn date(&self) -> chrono::NaiveDate {
                self.date
            }
        }
    };
}

pub(crate) use dated;
pub(crate) use entity;
