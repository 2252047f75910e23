use super::{Tracker, delegate_crud};
use crate::errors::{GymbookError, Result};
use crate::models::{BodyMeasurement, MoodLog, ProgressPhoto, WeakPoint};
use crate::store::EntityStore;

fn check_mood_scale(log: &MoodLog) -> Result<()> {
    let readings = [("mood", Some(log.mood)), ("energy", log.energy)];
    for (field, value) in readings {
        if let Some(value) = value.filter(|v| !MoodLog::SCALE.contains(v)) {
            return Err(GymbookError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field,
                MoodLog::SCALE.start(),
                MoodLog::SCALE.end(),
                value
            )));
        }
    }
    Ok(())
}

impl Tracker {
    delegate_crud!(
        measurements: BodyMeasurement,
        add_measurement,
        update_measurement,
        delete_measurement
    );
    delegate_crud!(photos: ProgressPhoto, add_photo, update_photo, delete_photo);

    pub fn mood_logs(&self) -> &EntityStore<MoodLog> {
        &self.mood_logs
    }

    pub fn add_mood_log(&mut self, log: MoodLog) -> Result<String> {
        check_mood_scale(&log)?;
        Ok(self.mood_logs.add(log))
    }

    pub fn update_mood_log(&mut self, log: MoodLog) -> Result<bool> {
        check_mood_scale(&log)?;
        Ok(self.mood_logs.update(log))
    }

    pub fn delete_mood_log(&mut self, id: &str) -> bool {
        self.mood_logs.delete(id)
    }

    delegate_crud!(
        weak_points: WeakPoint,
        add_weak_point,
        update_weak_point,
        delete_weak_point
    );

    /// Body weight series in kg, oldest first, skipping entries without one.
    pub fn body_weight_series(&self) -> Vec<(chrono::NaiveDate, f64)> {
        let mut series: Vec<_> = self
            .measurements
            .all()
            .iter()
            .filter_map(|m| m.weight.map(|w| (m.date, w)))
            .collect();
        series.sort_by_key(|(date, _)| *date);
        series
    }

    /// Exercises flagged as weak points in the most recent workout that
    /// contains each of them.
    pub fn flagged_exercises(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut names = Vec::new();
        for workout in self.workouts.recent(usize::MAX) {
            for exercise in &workout.exercises {
                if seen.iter().any(|n| n.eq_ignore_ascii_case(&exercise.name)) {
                    continue;
                }
                seen.push(&exercise.name);
                if exercise.is_weak_point {
                    names.push(exercise.name.clone());
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, Workout};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn weight_series_is_sorted_and_sparse() {
        let mut tracker = Tracker::in_memory();
        let mut later = BodyMeasurement::new(day(20));
        later.weight = Some(81.2);
        tracker.add_measurement(later);
        let mut waist_only = BodyMeasurement::new(day(10));
        waist_only.waist = Some(84.0);
        tracker.add_measurement(waist_only);
        let mut earlier = BodyMeasurement::new(day(1));
        earlier.weight = Some(82.0);
        tracker.add_measurement(earlier);

        assert_eq!(
            tracker.body_weight_series(),
            vec![(day(1), 82.0), (day(20), 81.2)]
        );
        assert_eq!(tracker.measurements().latest().unwrap().weight, Some(81.2));
    }

    #[test]
    fn weak_point_flags_are_collected_once() {
        let mut tracker = Tracker::in_memory();
        for d in [1, 8] {
            let mut workout = Workout::new("Upper", day(d));
            let mut rows = Exercise::new("Cable Row");
            rows.is_weak_point = true;
            workout.exercises = vec![rows, Exercise::new("Bench Press")];
            tracker.add_workout(workout);
        }
        tracker.add_weak_point(WeakPoint::new("Upper back", 1));

        assert_eq!(tracker.flagged_exercises(), vec!["Cable Row"]);
        assert_eq!(tracker.weak_points().by_priority()[0].muscle_group, "Upper back");
    }

    #[test]
    fn latest_workout_decides_the_flag() {
        let mut tracker = Tracker::in_memory();
        let mut old = Workout::new("Legs", day(2));
        let mut squat = Exercise::new("Squat");
        squat.is_weak_point = true;
        let mut calves = Exercise::new("Calf Raise");
        calves.is_weak_point = true;
        old.exercises = vec![squat, calves];
        tracker.add_workout(old);

        let mut recent = Workout::new("Legs", day(9));
        recent.exercises = vec![Exercise::new("squat")];
        tracker.add_workout(recent);

        assert_eq!(tracker.flagged_exercises(), vec!["Calf Raise"]);
    }

    #[test]
    fn mood_scale_is_enforced() {
        let mut tracker = Tracker::in_memory();
        let id = tracker.add_mood_log(MoodLog::new(day(3), 5)).unwrap();

        for mood in [0, 6, 10] {
            assert!(matches!(
                tracker.add_mood_log(MoodLog::new(day(3), mood)),
                Err(GymbookError::Validation(_))
            ));
        }
        let mut tired = MoodLog::new(day(4), 3);
        tired.energy = Some(7);
        assert!(tracker.add_mood_log(tired).is_err());
        assert_eq!(tracker.mood_logs().len(), 1);

        let mut edited = tracker.mood_logs().get(&id).unwrap().clone();
        edited.mood = 9;
        assert!(tracker.update_mood_log(edited.clone()).is_err());
        edited.mood = 1;
        edited.energy = Some(1);
        assert!(tracker.update_mood_log(edited).unwrap());
        assert_eq!(tracker.mood_logs().get(&id).unwrap().mood, 1);
    }
}
