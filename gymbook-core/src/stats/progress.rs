use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Exercise, SetEntry, Workout};

/// Estimated one-rep max, `weight * (1 + reps / 30)`. A single rep is
/// already a max and is returned unchanged.
pub fn calculate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps == 1 {
        return weight;
    }
    weight * (1.0 + reps as f64 / 30.0)
}

pub fn exercise_volume(exercise: &Exercise) -> f64 {
    exercise.sets.iter().map(SetEntry::volume).sum()
}

pub fn workout_volume(workout: &Workout) -> f64 {
    workout.exercises.iter().map(exercise_volume).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Weight,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    /// Heaviest set of the day.
    pub weight: f64,
    /// Sum of weight x reps across the day's sets.
    pub volume: f64,
}

impl ProgressPoint {
    pub fn value(&self, mode: ChartMode) -> f64 {
        match mode {
            ChartMode::Weight => self.weight,
            ChartMode::Volume => self.volume,
        }
    }
}

/// One chart row per completed workout containing `exercise_name`
/// (case-insensitive), ordered by date.
pub fn progress_rows<'a, I>(workouts: I, exercise_name: &str) -> Vec<ProgressPoint>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let mut rows: Vec<ProgressPoint> = workouts
        .into_iter()
        .filter(|w| w.completed)
        .filter_map(|w| {
            let sets: Vec<&SetEntry> = w
                .exercises
                .iter()
                .filter(|e| e.matches_name(exercise_name))
                .flat_map(|e| e.sets.iter())
                .collect();
            if sets.is_empty() {
                return None;
            }
            let weight = sets.iter().map(|s| s.weight).fold(0.0, f64::max);
            let volume: f64 = sets.iter().map(|s| s.volume()).sum();
            Some(ProgressPoint {
                date: w.date,
                weight,
                volume,
            })
        })
        .collect();
    rows.sort_by_key(|row| row.date);
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
    pub estimated_one_rep_max: f64,
}

impl PersonalRecord {
    fn beats(&self, set: &SetEntry) -> bool {
        self.weight > set.weight || (self.weight == set.weight && self.reps >= set.reps)
    }
}

/// Best set per exercise across completed workouts: heaviest weight, ties
/// broken by reps, earliest date wins exact ties. Keys are lowercase names.
pub fn personal_records<'a, I>(workouts: I) -> BTreeMap<String, PersonalRecord>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let mut completed: Vec<&Workout> = workouts.into_iter().filter(|w| w.completed).collect();
    completed.sort_by_key(|w| w.date);

    let mut records: BTreeMap<String, PersonalRecord> = BTreeMap::new();
    for workout in completed {
        for exercise in &workout.exercises {
            let key = exercise.name.trim().to_lowercase();
            for set in exercise.sets.iter().filter(|s| s.reps > 0) {
                if records.get(&key).is_some_and(|best| best.beats(set)) {
                    continue;
                }
                records.insert(
                    key.clone(),
                    PersonalRecord {
                        exercise: exercise.name.trim().to_string(),
                        weight: set.weight,
                        reps: set.reps,
                        date: workout.date,
                        estimated_one_rep_max: calculate_one_rep_max(set.weight, set.reps),
                    },
                );
            }
        }
    }
    records
}

/// Highest estimated one-rep max for exercises tagged with `lift`
/// (their `pr_exercise_type`).
pub fn best_for_lift<'a, I>(workouts: I, lift: &str) -> Option<PersonalRecord>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let mut best: Option<PersonalRecord> = None;
    for workout in workouts.into_iter().filter(|w| w.completed) {
        let tagged = workout.exercises.iter().filter(|e| {
            e.pr_exercise_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(lift))
        });
        for exercise in tagged {
            for set in exercise.sets.iter().filter(|s| s.reps > 0) {
                let estimate = calculate_one_rep_max(set.weight, set.reps);
                if best
                    .as_ref()
                    .is_some_and(|b| b.estimated_one_rep_max >= estimate)
                {
                    continue;
                }
                best = Some(PersonalRecord {
                    exercise: exercise.name.clone(),
                    weight: set.weight,
                    reps: set.reps,
                    date: workout.date,
                    estimated_one_rep_max: estimate,
                });
            }
        }
    }
    best
}

pub fn group_by_month<'a, I>(workouts: I) -> BTreeMap<(i32, u32), Vec<&'a Workout>>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let mut months: BTreeMap<(i32, u32), Vec<&Workout>> = BTreeMap::new();
    for workout in workouts {
        months
            .entry((workout.date.year(), workout.date.month()))
            .or_default()
            .push(workout);
    }
    for list in months.values_mut() {
        list.sort_by_key(|w| w.date);
    }
    months
}

/// Distinct exercise names, sorted case-insensitively.
pub fn exercise_names<'a, I>(workouts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let mut names: BTreeMap<String, String> = BTreeMap::new();
    for workout in workouts {
        for exercise in &workout.exercises {
            let name = exercise.name.trim();
            if name.is_empty() {
                continue;
            }
            names
                .entry(name.to_lowercase())
                .or_insert_with(|| name.to_string());
        }
    }
    names.into_values().collect()
}
