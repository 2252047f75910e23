//! Workouts, templates, plans, routines and training blocks.

use chrono::{Datelike, NaiveDate, Weekday};
use log::{debug, info};

use super::{Tracker, delegate_crud};
use crate::errors::{GymbookError, Result};
use crate::models::{
    Entity, Exercise, SetEntry, TrainingBlock, WeeklyRoutine, Workout, WorkoutPlan,
    WorkoutTemplate,
};
use crate::stats::{self, PersonalRecord, ProgressPoint};
use crate::store::EntityStore;
use std::collections::BTreeMap;

impl Tracker {
    delegate_crud!(workouts: Workout, add_workout, update_workout, delete_workout);
    delegate_crud!(blocks: TrainingBlock, add_block, update_block, delete_block);

    pub fn templates(&self) -> &EntityStore<WorkoutTemplate> {
        &self.templates
    }

    pub fn add_template(&mut self, template: WorkoutTemplate) -> String {
        self.templates.add(template)
    }

    pub fn update_template(&mut self, template: WorkoutTemplate) -> bool {
        self.templates.update(template)
    }

    /// Deletes a template and clears every routine day that pointed at it.
    pub fn delete_template(&mut self, id: &str) -> bool {
        if !self.templates.delete(id) {
            return false;
        }
        let cleared = self.routines.detach_template(id);
        info!(
            "Deleted template {} and cleared {} routine days",
            id, cleared
        );
        true
    }

    /// Creates an uncompleted workout on `date` from the template's exercises.
    pub fn create_workout_from_template(
        &mut self,
        template_id: &str,
        date: NaiveDate,
    ) -> Result<String> {
        let template = self
            .templates
            .get(template_id)
            .ok_or_else(|| GymbookError::not_found(WorkoutTemplate::KIND, template_id))?;
        let workout = template.instantiate(date);
        let id = self.workouts.add(workout);
        debug!("Started workout {} from template {}", id, template_id);
        Ok(id)
    }

    fn workout_mut<F>(&mut self, id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Workout),
    {
        if self.workouts.modify(id, f) {
            Ok(())
        } else {
            Err(GymbookError::not_found(Workout::KIND, id))
        }
    }

    /// Marks a workout completed, optionally replacing what was logged.
    pub fn complete_workout(&mut self, id: &str, exercises: Option<Vec<Exercise>>) -> Result<()> {
        self.workout_mut(id, |workout| {
            if let Some(exercises) = exercises {
                workout.exercises = exercises;
            }
            workout.completed = true;
        })?;
        info!("Completed workout {}", id);
        Ok(())
    }

    /// Appends a set to the named exercise, adding the exercise if the
    /// workout does not have it yet.
    pub fn log_set(&mut self, workout_id: &str, exercise_name: &str, set: SetEntry) -> Result<()> {
        if exercise_name.trim().is_empty() {
            return Err(GymbookError::Validation("exercise name is required".into()));
        }
        self.workout_mut(workout_id, |workout| {
            match workout
                .exercises
                .iter()
                .position(|e| e.matches_name(exercise_name))
            {
                Some(index) => workout.exercises[index].sets.push(set),
                None => workout
                    .exercises
                    .push(Exercise::new(exercise_name.trim()).with_sets(vec![set])),
            }
        })
    }

    /// Replaces the sets of one exercise, e.g. when sets were edited after
    /// the fact.
    pub fn replace_sets(
        &mut self,
        workout_id: &str,
        exercise_name: &str,
        sets: Vec<SetEntry>,
    ) -> Result<()> {
        let mut found = false;
        self.workout_mut(workout_id, |workout| {
            if let Some(exercise) = workout
                .exercises
                .iter_mut()
                .find(|e| e.matches_name(exercise_name))
            {
                exercise.sets = sets;
                found = true;
            }
        })?;
        if found {
            Ok(())
        } else {
            Err(GymbookError::not_found("exercise", exercise_name))
        }
    }

    pub fn set_workout_duration(&mut self, id: &str, seconds: u64) -> Result<()> {
        self.workout_mut(id, |workout| workout.duration_seconds = Some(seconds))
    }

    pub fn progress_for(&self, exercise_name: &str) -> Vec<ProgressPoint> {
        stats::progress_rows(self.workouts.all(), exercise_name)
    }

    pub fn personal_records(&self) -> BTreeMap<String, PersonalRecord> {
        stats::personal_records(self.workouts.all())
    }

    // Plans

    pub fn plans(&self) -> &EntityStore<WorkoutPlan> {
        &self.plans
    }

    /// Adds a plan. A plan that arrives active deactivates all others; an
    /// archived plan is never active.
    pub fn add_plan(&mut self, mut plan: WorkoutPlan) -> String {
        if plan.archived {
            plan.is_active = false;
        }
        let active = plan.is_active;
        let id = self.plans.add(plan);
        if active {
            self.plans.set_active(&id);
        }
        id
    }

    pub fn update_plan(&mut self, mut plan: WorkoutPlan) -> bool {
        if plan.archived {
            plan.is_active = false;
        }
        let id = plan.id.clone();
        let active = plan.is_active;
        if !self.plans.update(plan) {
            return false;
        }
        if active {
            self.plans.set_active(&id);
        }
        true
    }

    pub fn delete_plan(&mut self, id: &str) -> bool {
        self.plans.delete(id)
    }

    pub fn set_active_plan(&mut self, id: &str) -> Result<()> {
        let Some(plan) = self.plans.get(id) else {
            return Err(GymbookError::not_found(WorkoutPlan::KIND, id));
        };
        if plan.archived {
            return Err(GymbookError::Validation(format!(
                "plan {} is archived",
                plan.name
            )));
        }
        self.plans.set_active(id);
        Ok(())
    }

    pub fn active_plan(&self) -> Option<&WorkoutPlan> {
        self.plans.active()
    }

    pub fn archive_plan(&mut self, id: &str, archived: bool) -> bool {
        self.plans.set_archived(id, archived)
    }

    /// Copies a template into a plan. The plan keeps its own copy, so later
    /// edits or deletion of the template do not reach it.
    pub fn add_template_to_plan(&mut self, plan_id: &str, template_id: &str) -> Result<()> {
        let template = self
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| GymbookError::not_found(WorkoutTemplate::KIND, template_id))?;
        if self
            .plans
            .modify(plan_id, |plan| plan.workout_templates.push(template))
        {
            Ok(())
        } else {
            Err(GymbookError::not_found(WorkoutPlan::KIND, plan_id))
        }
    }

    // Routines

    pub fn routines(&self) -> &EntityStore<WeeklyRoutine> {
        &self.routines
    }

    pub fn add_routine(&mut self, routine: WeeklyRoutine) -> String {
        self.routines.add(routine)
    }

    pub fn update_routine(&mut self, routine: WeeklyRoutine) -> bool {
        self.routines.update(routine)
    }

    /// Deletes a routine and unlinks training blocks that followed it.
    pub fn delete_routine(&mut self, id: &str) -> bool {
        if !self.routines.delete(id) {
            return false;
        }
        self.blocks.detach_routine(id);
        true
    }

    pub fn archive_routine(&mut self, id: &str, archived: bool) -> bool {
        self.routines.set_archived(id, archived)
    }

    /// Points `day_of_week` (0 = Sunday) of a routine at a template, or clears
    /// it when `template_id` is `None`.
    pub fn assign_routine_day(
        &mut self,
        routine_id: &str,
        day_of_week: u8,
        template_id: Option<&str>,
    ) -> Result<()> {
        if day_of_week > 6 {
            return Err(GymbookError::Validation(format!(
                "day of week must be 0-6, got {}",
                day_of_week
            )));
        }
        if let Some(template_id) = template_id {
            if !self.templates.contains(template_id) {
                return Err(GymbookError::not_found(WorkoutTemplate::KIND, template_id));
            }
        }
        let template_id = template_id.map(str::to_string);
        if self
            .routines
            .modify(routine_id, |routine| routine.assign(day_of_week, template_id))
        {
            Ok(())
        } else {
            Err(GymbookError::not_found(WeeklyRoutine::KIND, routine_id))
        }
    }

    /// Template a routine schedules on `weekday`. Cleared days and templates
    /// that no longer exist resolve to `None`.
    pub fn routine_template_for(
        &self,
        routine_id: &str,
        weekday: Weekday,
    ) -> Option<&WorkoutTemplate> {
        let routine = self.routines.get(routine_id)?;
        let template_id = routine.day(weekday)?.workout_template_id.as_deref()?;
        self.templates.get(template_id)
    }

    pub fn current_block(&self, date: NaiveDate) -> Option<&TrainingBlock> {
        self.blocks.covering(date)
    }

    /// Template scheduled for `date`: the routine of the training block
    /// covering the date, else the first unarchived routine.
    pub fn todays_template(&self, date: NaiveDate) -> Option<&WorkoutTemplate> {
        let routine = self
            .blocks
            .covering(date)
            .and_then(|b| b.routine_id.as_deref())
            .and_then(|id| self.routines.get(id))
            .filter(|r| !r.archived)
            .or_else(|| self.routines.unarchived().into_iter().next())?;
        self.routine_template_for(&routine.id, date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoutineDay;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn push_day(tracker: &mut Tracker) -> String {
        tracker.add_template(WorkoutTemplate::new(
            "Push Day",
            vec![Exercise::new("Bench Press").with_sets(vec![SetEntry::new(10, 60.0); 3])],
        ))
    }

    #[test]
    fn missing_template_is_an_error() {
        let mut tracker = Tracker::in_memory();
        let err = tracker
            .create_workout_from_template("nope", day(1, 1))
            .unwrap_err();
        assert!(matches!(err, GymbookError::NotFound { .. }));
        assert!(tracker.workouts().is_empty());
    }

    #[test]
    fn log_set_appends_or_creates_exercise() {
        let mut tracker = Tracker::in_memory();
        let template = push_day(&mut tracker);
        let workout = tracker
            .create_workout_from_template(&template, day(1, 2))
            .unwrap();

        tracker
            .log_set(&workout, "bench press", SetEntry::new(8, 62.5))
            .unwrap();
        tracker
            .log_set(&workout, "Dips", SetEntry::new(12, 0.0))
            .unwrap();

        let logged = tracker.workouts().get(&workout).unwrap();
        assert_eq!(logged.exercises.len(), 2);
        assert_eq!(logged.exercises[0].sets.len(), 4);
        assert_eq!(logged.exercises[1].name, "Dips");
        assert!(tracker.log_set(&workout, " ", SetEntry::new(1, 1.0)).is_err());
        assert!(tracker.log_set("nope", "Dips", SetEntry::new(1, 1.0)).is_err());
    }

    #[test]
    fn replace_sets_requires_existing_exercise() {
        let mut tracker = Tracker::in_memory();
        let template = push_day(&mut tracker);
        let workout = tracker
            .create_workout_from_template(&template, day(1, 2))
            .unwrap();

        tracker
            .replace_sets(&workout, "Bench Press", vec![SetEntry::new(5, 70.0)])
            .unwrap();
        assert_eq!(
            tracker.workouts().get(&workout).unwrap().exercises[0].sets,
            vec![SetEntry::new(5, 70.0)]
        );
        assert!(
            tracker
                .replace_sets(&workout, "Squat", Vec::new())
                .is_err()
        );
    }

    #[test]
    fn active_plan_is_exclusive() {
        let mut tracker = Tracker::in_memory();
        let mut first = WorkoutPlan::new("Strength", Vec::new());
        first.is_active = true;
        let first = tracker.add_plan(first);
        let mut second = WorkoutPlan::new("Cut", Vec::new());
        second.is_active = true;
        let second = tracker.add_plan(second);

        assert_eq!(tracker.active_plan().unwrap().id, second);
        tracker.set_active_plan(&first).unwrap();
        assert_eq!(tracker.plans().filter(|p| p.is_active).len(), 1);
        assert_eq!(tracker.active_plan().unwrap().id, first);

        tracker.archive_plan(&second, true);
        assert!(matches!(
            tracker.set_active_plan(&second),
            Err(GymbookError::Validation(_))
        ));
        assert!(tracker.set_active_plan("ghost").is_err());
    }

    #[test]
    fn archived_plans_never_become_active() {
        let mut tracker = Tracker::in_memory();
        let mut first = WorkoutPlan::new("Strength", Vec::new());
        first.is_active = true;
        let first = tracker.add_plan(first);
        let second = tracker.add_plan(WorkoutPlan::new("Cut", Vec::new()));
        tracker.archive_plan(&second, true);

        let mut revived = tracker.plans().get(&second).unwrap().clone();
        revived.is_active = true;
        assert!(tracker.update_plan(revived));
        assert_eq!(tracker.active_plan().unwrap().id, first);
        assert!(!tracker.plans().get(&second).unwrap().is_active);

        let mut shelved = WorkoutPlan::new("Old", Vec::new());
        shelved.archived = true;
        shelved.is_active = true;
        let shelved = tracker.add_plan(shelved);
        assert!(!tracker.plans().get(&shelved).unwrap().is_active);
        assert_eq!(tracker.active_plan().unwrap().id, first);
    }

    #[test]
    fn plan_keeps_its_template_copy() {
        let mut tracker = Tracker::in_memory();
        let template = push_day(&mut tracker);
        let plan = tracker.add_plan(WorkoutPlan::new("Block A", Vec::new()));

        tracker.add_template_to_plan(&plan, &template).unwrap();
        tracker.delete_template(&template);

        let plan = tracker.plans().get(&plan).unwrap();
        assert_eq!(plan.workout_templates.len(), 1);
        assert_eq!(plan.workout_templates[0].name, "Push Day");
    }

    #[test]
    fn assign_routine_day_validates_inputs() {
        let mut tracker = Tracker::in_memory();
        let template = push_day(&mut tracker);
        let routine = tracker.add_routine(WeeklyRoutine::new("Weekly"));

        tracker
            .assign_routine_day(&routine, 1, Some(&template))
            .unwrap();
        assert!(tracker.assign_routine_day(&routine, 7, None).is_err());
        assert!(tracker.assign_routine_day(&routine, 2, Some("ghost")).is_err());
        assert!(tracker.assign_routine_day("ghost", 2, None).is_err());

        assert_eq!(
            tracker
                .routine_template_for(&routine, Weekday::Mon)
                .unwrap()
                .name,
            "Push Day"
        );
        assert!(tracker.routine_template_for(&routine, Weekday::Tue).is_none());
    }

    #[test]
    fn deleting_routine_unlinks_blocks() {
        let mut tracker = Tracker::in_memory();
        let routine = tracker.add_routine(WeeklyRoutine::new("Weekly"));
        let mut block = TrainingBlock::new("Base", day(1, 1), day(2, 1));
        block.routine_id = Some(routine.clone());
        let block = tracker.add_block(block);

        assert!(tracker.delete_routine(&routine));
        assert_eq!(tracker.blocks().get(&block).unwrap().routine_id, None);
    }

    #[test]
    fn todays_template_prefers_block_routine() {
        let mut tracker = Tracker::in_memory();
        let push = push_day(&mut tracker);
        let legs = tracker.add_template(WorkoutTemplate::new("Legs", Vec::new()));

        let mut fallback = WeeklyRoutine::new("Default");
        fallback.workout_days = vec![RoutineDay::new(1, Some(push.clone()))];
        tracker.add_routine(fallback);

        let mut blocked = WeeklyRoutine::new("Peaking");
        blocked.workout_days = vec![RoutineDay::new(1, Some(legs.clone()))];
        let blocked = tracker.add_routine(blocked);

        // 2024-03-04 is a Monday.
        let monday = day(3, 4);
        assert_eq!(tracker.todays_template(monday).unwrap().id, push);

        let mut block = TrainingBlock::new("Peak", day(3, 1), day(3, 31));
        block.routine_id = Some(blocked);
        tracker.add_block(block);
        assert_eq!(tracker.todays_template(monday).unwrap().id, legs);
        assert_eq!(tracker.current_block(monday).unwrap().name, "Peak");
        assert!(tracker.todays_template(day(3, 5)).is_none());
    }
}
