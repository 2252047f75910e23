use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};

use super::EntityStore;
use crate::models::{
    Compound, Reminder, SupplementLog, TrainingBlock, WeakPoint, WeeklyRoutine, Workout,
    WorkoutPlan,
};

impl EntityStore<Workout> {
    pub fn completed(&self) -> Vec<&Workout> {
        self.filter(|w| w.completed)
    }

    /// Workouts newest first.
    pub fn recent(&self, limit: usize) -> Vec<&Workout> {
        let mut workouts: Vec<&Workout> = self.all().iter().collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts.truncate(limit);
        workouts
    }
}

impl EntityStore<WorkoutPlan> {
    /// Marks `id` active and every other plan inactive. Returns `false`
    /// without touching anything when the plan does not exist.
    pub fn set_active(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        for plan in &mut self.items {
            plan.is_active = plan.id == id;
        }
        info!("Activated workout plan {}", id);
        self.persist();
        true
    }

    pub fn active(&self) -> Option<&WorkoutPlan> {
        self.all().iter().find(|p| p.is_active)
    }

    /// Deactivates archived plans and every active plan after the first.
    /// Returns the number of plans deactivated.
    pub fn normalize_active(&mut self) -> usize {
        let mut seen_active = false;
        let mut deactivated = 0;
        for plan in &mut self.items {
            if !plan.is_active {
                continue;
            }
            if plan.archived || seen_active {
                plan.is_active = false;
                deactivated += 1;
            } else {
                seen_active = true;
            }
        }
        if deactivated > 0 {
            warn!("Deactivated {} conflicting workout plans", deactivated);
            self.persist();
        }
        deactivated
    }
}

impl EntityStore<WeeklyRoutine> {
    /// Clears every day that points at `template_id`. Returns the number of
    /// days cleared.
    pub fn detach_template(&mut self, template_id: &str) -> usize {
        let mut cleared = 0;
        for routine in &mut self.items {
            for day in &mut routine.workout_days {
                if day.workout_template_id.as_deref() == Some(template_id) {
                    day.workout_template_id = None;
                    cleared += 1;
                }
            }
        }
        if cleared > 0 {
            debug!("Detached template {} from {} routine days", template_id, cleared);
            self.persist();
        }
        cleared
    }
}

impl EntityStore<TrainingBlock> {
    pub fn covering(&self, date: NaiveDate) -> Option<&TrainingBlock> {
        self.all().iter().find(|b| b.contains(date))
    }

    pub fn detach_routine(&mut self, routine_id: &str) -> usize {
        let mut cleared = 0;
        for block in &mut self.items {
            if block.routine_id.as_deref() == Some(routine_id) {
                block.routine_id = None;
                cleared += 1;
            }
        }
        if cleared > 0 {
            self.persist();
        }
        cleared
    }
}

impl EntityStore<Compound> {
    pub fn by_cycle_id(&self, cycle_id: &str) -> Vec<&Compound> {
        self.filter(|c| c.cycle_id == cycle_id)
    }
}

impl EntityStore<SupplementLog> {
    pub fn for_supplement(&self, supplement_id: &str) -> Vec<&SupplementLog> {
        self.filter(|l| l.supplement_id == supplement_id)
    }

    pub fn for_date(&self, date: NaiveDate) -> Vec<&SupplementLog> {
        self.filter(|l| l.date == date)
    }
}

impl EntityStore<Reminder> {
    pub fn due(&self, now: NaiveDateTime) -> Vec<&Reminder> {
        self.filter(|r| r.is_due(now))
    }

    pub fn mark_seen(&mut self, id: &str) -> bool {
        self.modify(id, |r| r.seen = true)
    }
}

impl EntityStore<WeakPoint> {
    /// Weak points, most urgent first.
    pub fn by_priority(&self) -> Vec<&WeakPoint> {
        let mut points: Vec<&WeakPoint> = self.all().iter().collect();
        points.sort_by_key(|p| p.priority);
        points
    }
}
