use anyhow::{Result, ensure};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;

use gymbook::models::{
    BodyMeasurement, Compound, MoodLog, ProgressPhoto, Reminder, ReminderType, SteroidCycle,
    Supplement, WeakPoint,
};

use crate::app::{App, found, parse_clock, parse_day, require_name, today};

fn show(value: Option<f64>, suffix: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}{}", v, suffix))
}

#[derive(Subcommand, Debug)]
pub enum MeasureCommand {
    List,
    /// Record body measurements; weight in the display unit, girths in cm
    Add {
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        weight: Option<f64>,
        #[arg(long)]
        body_fat: Option<f64>,
        #[arg(long)]
        chest: Option<f64>,
        #[arg(long)]
        waist: Option<f64>,
        #[arg(long)]
        hips: Option<f64>,
        #[arg(long)]
        arms: Option<f64>,
        #[arg(long)]
        thighs: Option<f64>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Record a progress photo by path
    Photo {
        path: String,
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    Delete { id: String },
}

impl MeasureCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            MeasureCommand::List => {
                let mut rows: Vec<&BodyMeasurement> = app.tracker.measurements().all().iter().collect();
                rows.sort_by_key(|m| m.date);
                for m in rows {
                    println!(
                        "{}, {}: weight {}, body fat {}, waist {}",
                        m.id,
                        m.date,
                        m.weight.map_or_else(|| "-".to_string(), |w| app.weight(w)),
                        show(m.body_fat, "%"),
                        show(m.waist, "cm"),
                    );
                }
                for photo in app.tracker.photos().all() {
                    println!("{}, {}: photo {}", photo.id, photo.date, photo.image_path);
                }
            }
            MeasureCommand::Add {
                date,
                weight,
                body_fat,
                chest,
                waist,
                hips,
                arms,
                thighs,
                notes,
            } => {
                let mut m = BodyMeasurement::new(date.unwrap_or_else(today));
                m.weight = weight.map(|w| app.to_kg(w));
                m.body_fat = body_fat;
                m.chest = chest;
                m.waist = waist;
                m.hips = hips;
                m.arms = arms;
                m.thighs = thighs;
                m.notes = notes;
                println!("{}", app.tracker.add_measurement(m));
            }
            MeasureCommand::Photo { path, date } => {
                ensure!(!path.trim().is_empty(), "photo path is required");
                let mut photo = ProgressPhoto::new(date.unwrap_or_else(today), path.trim());
                photo.weight = app
                    .tracker
                    .measurements()
                    .latest()
                    .and_then(|m| m.weight);
                println!("{}", app.tracker.add_photo(photo));
            }
            MeasureCommand::Delete { id } => {
                let removed = app.tracker.delete_measurement(&id) || app.tracker.delete_photo(&id);
                found(removed, "measurement", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum SupplementCommand {
    List,
    Add {
        name: String,
        #[arg(default_value = "")]
        dosage: String,
        #[arg(default_value = "")]
        frequency: String,
    },
    /// Record intake for a day
    Log {
        id: String,
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        /// Record the dose as skipped
        #[arg(long)]
        skipped: bool,
    },
    /// Intake logged for a day, today by default
    Day {
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    Delete { id: String },
}

impl SupplementCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            SupplementCommand::List => {
                for s in app.tracker.supplements().all() {
                    let adherence = app
                        .tracker
                        .supplement_adherence(&s.id)
                        .map_or_else(|| "no logs".to_string(), |a| format!("{:.0}% taken", a * 100.0));
                    println!("{}, {} {} {} ({})", s.id, s.name, s.dosage, s.frequency, adherence);
                }
            }
            SupplementCommand::Add {
                name,
                dosage,
                frequency,
            } => {
                let name = require_name(&name, "supplement")?;
                println!(
                    "{}",
                    app.tracker
                        .add_supplement(Supplement::new(name, dosage, frequency))
                );
            }
            SupplementCommand::Log { id, date, skipped } => {
                app.tracker
                    .log_supplement(&id, date.unwrap_or_else(today), !skipped)?;
            }
            SupplementCommand::Day { date } => {
                let date = date.unwrap_or_else(today);
                for log in app.tracker.supplement_logs().for_date(date) {
                    let name = app
                        .tracker
                        .supplement_name_for_log(log)
                        .unwrap_or(log.supplement_id.as_str());
                    let status = if log.taken { "taken" } else { "skipped" };
                    println!("{}: {} {}", date, name, status);
                }
            }
            SupplementCommand::Delete { id } => {
                found(app.tracker.delete_supplement(&id), "supplement", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    List {
        /// Only entries for this day
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Record mood (1-5) and optionally energy (1-5)
    Add {
        mood: u8,
        #[arg(short, long)]
        energy: Option<u8>,
        #[arg(short, long)]
        notes: Option<String>,
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
}

impl MoodCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            MoodCommand::List { date } => {
                let logs: Vec<&MoodLog> = match date {
                    Some(date) => app.tracker.mood_logs().on_date(date),
                    None => app.tracker.mood_logs().all().iter().collect(),
                };
                for log in logs {
                    println!(
                        "{}, {}: mood {}, energy {}",
                        log.id,
                        log.date,
                        log.mood,
                        log.energy.map_or_else(|| "-".to_string(), |e| e.to_string())
                    );
                }
            }
            MoodCommand::Add {
                mood,
                energy,
                notes,
                date,
            } => {
                let mut log = MoodLog::new(date.unwrap_or_else(today), mood);
                log.energy = energy;
                log.notes = notes;
                println!("{}", app.tracker.add_mood_log(log)?);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum ReminderCommand {
    List,
    /// Reminders due now
    Due,
    Add {
        title: String,
        #[arg(short = 't', long = "type", default_value = "custom")]
        kind: ReminderType,
        /// One-off date
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_clock)]
        time: Option<NaiveTime>,
        /// Recurring weekdays, 0 = Sunday
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
    },
    Seen { id: String },
    /// Re-arm recurring reminders that were marked seen
    Reset,
    Delete { id: String },
}

impl ReminderCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            ReminderCommand::List => {
                for r in app.tracker.reminders().all() {
                    let when = match (r.due_date, r.days.is_empty()) {
                        (Some(date), _) => date.to_string(),
                        (None, false) => format!("days {:?}", r.days),
                        (None, true) => "unscheduled".to_string(),
                    };
                    let seen = if r.seen { " (seen)" } else { "" };
                    println!("{}, [{}] {} {}{}", r.id, r.reminder_type, r.title, when, seen);
                }
            }
            ReminderCommand::Due => {
                for r in app.tracker.due_reminders(Local::now().naive_local()) {
                    println!("{}, [{}] {}", r.id, r.reminder_type, r.title);
                }
            }
            ReminderCommand::Add {
                title,
                kind,
                date,
                time,
                days,
            } => {
                let title = require_name(&title, "reminder")?;
                ensure!(days.iter().all(|d| *d <= 6), "days must be 0-6");
                let mut reminder = Reminder::new(title, kind);
                reminder.due_date = date;
                reminder.time = time;
                reminder.days = days;
                println!("{}", app.tracker.add_reminder(reminder));
            }
            ReminderCommand::Seen { id } => {
                found(app.tracker.mark_reminder_seen(&id), "reminder", &id)?;
            }
            ReminderCommand::Reset => {
                println!("Reset {} reminders", app.tracker.reset_recurring_reminders());
            }
            ReminderCommand::Delete { id } => {
                found(app.tracker.delete_reminder(&id), "reminder", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum CycleCommand {
    List,
    Add {
        name: String,
        #[arg(value_parser = parse_day)]
        start: NaiveDate,
        #[arg(short, long, value_parser = parse_day)]
        end: Option<NaiveDate>,
    },
    /// Add a compound to a cycle
    Compound {
        cycle_id: String,
        name: String,
        #[arg(default_value = "")]
        dosage: String,
        #[arg(default_value = "")]
        frequency: String,
    },
    /// Delete a cycle and its compounds
    Delete { id: String },
}

impl CycleCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            CycleCommand::List => {
                for cycle in app.tracker.cycles().all() {
                    let end = cycle.end_date.map_or_else(|| "ongoing".to_string(), |d| d.to_string());
                    println!("{}, {} {} to {}", cycle.id, cycle.name, cycle.start_date, end);
                    for c in app.tracker.compounds_for_cycle(&cycle.id) {
                        println!("\t{} {} {}", c.name, c.dosage, c.frequency);
                    }
                }
            }
            CycleCommand::Add { name, start, end } => {
                let name = require_name(&name, "cycle")?;
                if let Some(end) = end {
                    ensure!(start <= end, "cycle must start before it ends");
                }
                let mut cycle = SteroidCycle::new(name, start);
                cycle.end_date = end;
                println!("{}", app.tracker.add_cycle(cycle));
            }
            CycleCommand::Compound {
                cycle_id,
                name,
                dosage,
                frequency,
            } => {
                let name = require_name(&name, "compound")?;
                let id = app
                    .tracker
                    .add_compound(Compound::new(&cycle_id, name, dosage, frequency))?;
                println!("{}", id);
            }
            CycleCommand::Delete { id } => {
                found(app.tracker.delete_cycle(&id), "cycle", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum WeakPointCommand {
    List,
    Add {
        muscle_group: String,
        /// 1 is the highest priority
        #[arg(short, long, default_value_t = 1)]
        priority: u8,
        #[arg(short, long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

impl WeakPointCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            WeakPointCommand::List => {
                for wp in app.tracker.weak_points().by_priority() {
                    println!("{}, {} (priority {})", wp.id, wp.muscle_group, wp.priority);
                }
                let flagged = app.tracker.flagged_exercises();
                if !flagged.is_empty() {
                    println!("Flagged exercises: {}", flagged.join(", "));
                }
            }
            WeakPointCommand::Add {
                muscle_group,
                priority,
                notes,
            } => {
                let muscle_group = require_name(&muscle_group, "muscle group")?;
                let mut wp = WeakPoint::new(muscle_group, priority);
                wp.notes = notes;
                println!("{}", app.tracker.add_weak_point(wp));
            }
            WeakPointCommand::Delete { id } => {
                found(app.tracker.delete_weak_point(&id), "weak point", &id)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymbook::Tracker;
    use gymbook::stats::WeightUnit;

    #[test]
    fn measurement_weight_is_stored_in_kg() {
        let mut app = App::new(Tracker::in_memory(), WeightUnit::Lbs);
        MeasureCommand::Add {
            date: NaiveDate::from_ymd_opt(2024, 4, 1),
            weight: Some(220.462),
            body_fat: None,
            chest: None,
            waist: Some(82.0),
            hips: None,
            arms: None,
            thighs: None,
            notes: None,
        }
        .run(&mut app)
        .unwrap();

        let stored = app.tracker.measurements().all()[0].weight.unwrap();
        assert!((stored - 100.0).abs() < 1e-9);
    }

    #[test]
    fn mood_outside_range_is_rejected() {
        let mut app = App::new(Tracker::in_memory(), WeightUnit::Kg);
        for (mood, energy) in [(6, None), (0, None), (4, Some(6))] {
            let add = MoodCommand::Add {
                mood,
                energy,
                notes: None,
                date: None,
            };
            assert!(add.run(&mut app).is_err());
        }
        assert!(app.tracker.mood_logs().is_empty());

        MoodCommand::Add {
            mood: 5,
            energy: Some(1),
            notes: None,
            date: None,
        }
        .run(&mut app)
        .unwrap();
        assert_eq!(app.tracker.mood_logs().len(), 1);
    }

    #[test]
    fn compound_needs_existing_cycle() {
        let mut app = App::new(Tracker::in_memory(), WeightUnit::Kg);
        let add = CycleCommand::Compound {
            cycle_id: "ghost".into(),
            name: "Test E".into(),
            dosage: "250mg".into(),
            frequency: "weekly".into(),
        };
        assert!(add.run(&mut app).is_err());
    }
}
