use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Archivable, de, new_id};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub reps: u32,
    pub weight: f64,
}

impl SetEntry {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self { reps, weight }
    }

    pub fn volume(&self) -> f64 {
        self.weight * self.reps as f64
    }
}

impl fmt::Display for SetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}kg x {} reps", self.weight, self.reps)
    }
}

/// An exercise as performed inside one workout or template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
    /// Rest between sets, in seconds.
    pub rest_time: Option<u32>,
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub is_weak_point: bool,
    /// Lift this exercise counts toward for personal records, e.g. "bench".
    pub pr_exercise_type: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            sets: Vec::new(),
            rest_time: None,
            notes: None,
            is_weak_point: false,
            pr_exercise_type: None,
        }
    }

    pub fn with_sets(mut self, sets: Vec<SetEntry>) -> Self {
        self.sets = sets;
        self
    }

    /// Copy with a fresh id, used when a skeleton is instantiated.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            ..self.clone()
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets = self
            .sets
            .iter()
            .map(|s| format!("{}x{:.1}", s.reps, s.weight))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}: [{}]", self.name, sets)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub completed: bool,
    pub notes: Option<String>,
    pub duration_seconds: Option<u64>,
    /// Template the workout was instantiated from, if any.
    pub template_id: Option<String>,
}

impl Workout {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            date,
            exercises: Vec::new(),
            completed: false,
            notes: None,
            duration_seconds: None,
            template_id: None,
        }
    }

    pub fn exercise(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.matches_name(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl WorkoutTemplate {
    pub fn new(name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: None,
            exercises,
        }
    }

    /// Builds an uncompleted workout for `date` out of this skeleton.
    pub fn instantiate(&self, date: NaiveDate) -> Workout {
        Workout {
            id: String::new(),
            name: self.name.clone(),
            date,
            exercises: self.exercises.iter().map(Exercise::duplicate).collect(),
            completed: false,
            notes: None,
            duration_seconds: None,
            template_id: Some(self.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub workout_templates: Vec<WorkoutTemplate>,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub archived: bool,
}

impl WorkoutPlan {
    pub fn new(name: impl Into<String>, workout_templates: Vec<WorkoutTemplate>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: None,
            workout_templates,
            is_active: false,
            archived: false,
        }
    }
}

impl Archivable for WorkoutPlan {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
        if archived {
            self.is_active = false;
        }
    }
}

/// One day of a weekly routine. Days count from 0 (Sunday) to 6 (Saturday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineDay {
    pub day_of_week: u8,
    pub workout_template_id: Option<String>,
}

impl RoutineDay {
    pub fn new(day_of_week: u8, workout_template_id: Option<String>) -> Self {
        Self {
            day_of_week,
            workout_template_id,
        }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        match self.day_of_week {
            0 => Some(Weekday::Sun),
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRoutine {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub workout_days: Vec<RoutineDay>,
    #[serde(default, deserialize_with = "de::coerce_bool")]
    pub archived: bool,
}

impl WeeklyRoutine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            workout_days: Vec::new(),
            archived: false,
        }
    }

    pub fn day(&self, weekday: Weekday) -> Option<&RoutineDay> {
        let index = weekday.num_days_from_sunday() as u8;
        self.workout_days.iter().find(|d| d.day_of_week == index)
    }

    /// Assigns a template to a day, replacing whatever was there.
    pub fn assign(&mut self, day_of_week: u8, template_id: Option<String>) {
        match self
            .workout_days
            .iter_mut()
            .find(|d| d.day_of_week == day_of_week)
        {
            Some(day) => day.workout_template_id = template_id,
            None => {
                self.workout_days
                    .push(RoutineDay::new(day_of_week, template_id));
                self.workout_days.sort_by_key(|d| d.day_of_week);
            }
        }
    }

    pub fn references_template(&self, template_id: &str) -> bool {
        self.workout_days
            .iter()
            .any(|d| d.workout_template_id.as_deref() == Some(template_id))
    }
}

impl Archivable for WeeklyRoutine {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingBlock {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de::lenient_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "de::lenient_date")]
    pub end_date: NaiveDate,
    pub routine_id: Option<String>,
    pub goal: Option<String>,
}

impl TrainingBlock {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            start_date,
            end_date,
            routine_id: None,
            goal: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

super::entity!(Workout, "workout", "workouts");
super::entity!(WorkoutTemplate, "workout template", "workoutTemplates");
super::entity!(WorkoutPlan, "workout plan", "workoutPlans");
super::entity!(WeeklyRoutine, "weekly routine", "weeklyRoutines");
super::entity!(TrainingBlock, "training block", "trainingBlocks");
super::dated!(Workout);

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn instantiating_a_template_resets_completion_and_ids() {
        let mut template = WorkoutTemplate::new(
            "Push Day",
            vec![Exercise::new("Bench Press").with_sets(vec![SetEntry::new(10, 60.0); 3])],
        );
        template.id = "tpl-1".into();

        let workout = template.instantiate(day(2024, 5, 1));
        assert_eq!(workout.name, "Push Day");
        assert!(!workout.completed);
        assert_eq!(workout.template_id.as_deref(), Some("tpl-1"));
        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(workout.exercises[0].sets, template.exercises[0].sets);
        assert_ne!(workout.exercises[0].id, template.exercises[0].id);
    }

    #[test]
    fn routine_assign_replaces_existing_day() {
        let mut routine = WeeklyRoutine::new("PPL");
        routine.assign(3, Some("a".into()));
        routine.assign(1, Some("b".into()));
        routine.assign(3, Some("c".into()));

        assert_eq!(routine.workout_days.len(), 2);
        assert_eq!(routine.workout_days[0].day_of_week, 1);
        assert_eq!(
            routine.day(Weekday::Wed).unwrap().workout_template_id.as_deref(),
            Some("c")
        );
        assert!(routine.references_template("b"));
        assert!(!routine.references_template("a"));
    }

    #[test]
    fn workout_completed_is_coerced_on_load() {
        let json = r#"{"id":"w1","name":"Legs","date":"2024-01-02T08:00:00Z","completed":"true"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert!(workout.completed);
        assert_eq!(workout.date, day(2024, 1, 2));
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn archiving_a_plan_deactivates_it() {
        let mut plan = WorkoutPlan::new("Hypertrophy", Vec::new());
        plan.is_active = true;
        plan.set_archived(true);
        assert!(plan.archived);
        assert!(!plan.is_active);
    }

    #[test]
    fn out_of_range_day_has_no_weekday() {
        assert_eq!(RoutineDay::new(0, None).weekday(), Some(Weekday::Sun));
        assert_eq!(RoutineDay::new(7, None).weekday(), None);
    }
}
