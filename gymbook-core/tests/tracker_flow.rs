use chrono::{NaiveDate, Weekday};
use std::sync::Arc;

use gymbook::models::{
    Exercise, SetEntry, Supplement, TrainingBlock, WeeklyRoutine, WorkoutTemplate,
};
use gymbook::parser::parse_exercise;
use gymbook::stats::{ChartMode, calculate_one_rep_max};
use gymbook::storage::{SqliteStorage, Storage};
use gymbook::{GymbookError, Tracker};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn push_day_progress() {
    let mut tracker = Tracker::in_memory();
    let template = tracker.add_template(WorkoutTemplate::new(
        "Push Day",
        vec![Exercise::new("Bench Press").with_sets(vec![SetEntry::new(10, 60.0); 3])],
    ));

    let workout = tracker
        .create_workout_from_template(&template, date(2024, 5, 6))
        .unwrap();
    assert!(tracker.progress_for("Bench Press").is_empty());

    tracker
        .complete_workout(
            &workout,
            Some(vec![
                Exercise::new("Bench Press").with_sets(vec![SetEntry::new(8, 65.0)]),
            ]),
        )
        .unwrap();

    let points = tracker.progress_for("bench press");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].weight, 65.0);
    assert_eq!(points[0].volume, 520.0);
    assert_eq!(points[0].value(ChartMode::Volume), 520.0);

    let records = tracker.personal_records();
    let bench = &records["bench press"];
    assert_eq!(bench.weight, 65.0);
    assert_eq!(bench.estimated_one_rep_max, calculate_one_rep_max(65.0, 8));
}

#[test]
fn deleting_a_template_clears_routine_days() {
    let mut tracker = Tracker::in_memory();
    let legs = tracker.add_template(WorkoutTemplate::new("Legs", vec![Exercise::new("Squat")]));
    let routine = tracker.add_routine(WeeklyRoutine::new("PPL"));
    tracker.assign_routine_day(&routine, 1, Some(&legs)).unwrap();
    assert_eq!(
        tracker
            .routine_template_for(&routine, Weekday::Mon)
            .map(|t| t.name.as_str()),
        Some("Legs")
    );

    assert!(tracker.delete_template(&legs));
    let day = tracker.routines().get(&routine).unwrap().day(Weekday::Mon);
    assert!(day.is_none_or(|d| d.workout_template_id.is_none()));
    assert!(tracker.routine_template_for(&routine, Weekday::Mon).is_none());
}

#[test]
fn block_routine_drives_todays_template() {
    let mut tracker = Tracker::in_memory();
    let upper = tracker.add_template(WorkoutTemplate::new("Upper", vec![]));
    let routine = tracker.add_routine(WeeklyRoutine::new("Upper/Lower"));
    // 2024-06-03 is a Monday.
    tracker.assign_routine_day(&routine, 1, Some(&upper)).unwrap();

    let mut block = TrainingBlock::new("Hypertrophy", date(2024, 6, 1), date(2024, 6, 30));
    block.routine_id = Some(routine.clone());
    tracker.add_block(block);

    assert_eq!(
        tracker.todays_template(date(2024, 6, 3)).map(|t| t.id.as_str()),
        Some(upper.as_str())
    );
    assert!(tracker.todays_template(date(2024, 6, 4)).is_none());
    assert!(matches!(
        tracker.assign_routine_day(&routine, 7, None),
        Err(GymbookError::Validation(_))
    ));
}

#[test]
fn parsed_sets_are_logged_onto_a_workout() {
    let mut tracker = Tracker::in_memory();
    let workout = tracker.add_workout(gymbook::models::Workout::new("Quick", date(2024, 2, 1)));

    let parsed = parse_exercise("Overhead Press 3x5@40").unwrap();
    for set in parsed.sets.clone() {
        tracker.log_set(&workout, &parsed.name, set).unwrap();
    }
    tracker.complete_workout(&workout, None).unwrap();

    let logged = tracker.workouts().get(&workout).unwrap();
    assert_eq!(logged.exercises.len(), 1);
    assert_eq!(logged.exercises[0].sets.len(), 3);
    assert_eq!(tracker.progress_for("Overhead Press")[0].volume, 600.0);
}

#[test]
fn sqlite_backed_tracker_survives_reload() {
    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::open(":memory:").unwrap());

    let (template, creatine) = {
        let mut tracker = Tracker::new(storage.clone());
        let template = tracker.add_template(WorkoutTemplate::new(
            "Pull",
            vec![Exercise::new("Row").with_sets(vec![SetEntry::new(10, 50.0)])],
        ));
        tracker
            .create_workout_from_template(&template, date(2024, 3, 3))
            .unwrap();
        let creatine = tracker.add_supplement(Supplement::new("Creatine", "5g", "daily"));
        tracker.log_supplement(&creatine, date(2024, 3, 3), true).unwrap();
        (template, creatine)
    };

    let reloaded = Tracker::new(storage.clone());
    assert_eq!(reloaded.templates().get(&template).unwrap().name, "Pull");
    assert_eq!(reloaded.workouts().len(), 1);
    assert_eq!(
        reloaded.workouts().all()[0].template_id.as_deref(),
        Some(template.as_str())
    );
    assert_eq!(reloaded.supplement_adherence(&creatine), Some(1.0));
}

#[test]
fn corrupt_stored_data_loads_empty() {
    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::open(":memory:").unwrap());
    storage.set_item("workouts", "{ not an array").unwrap();
    storage
        .set_item("supplements", r#"[{"id":"s1","name":"Zinc"}]"#)
        .unwrap();

    let tracker = Tracker::new(storage);
    assert!(tracker.workouts().is_empty());
    assert_eq!(tracker.supplements().get("s1").unwrap().name, "Zinc");
}
