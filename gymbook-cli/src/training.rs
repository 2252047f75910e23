use anyhow::{Result, anyhow, ensure};
use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use gymbook::models::{Exercise, TrainingBlock, WeeklyRoutine, Workout, WorkoutPlan, WorkoutTemplate};
use gymbook::parser::parse_exercise;

use crate::app::{App, found, parse_day, require_name, today};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn print_exercises(app: &App, exercises: &[Exercise]) {
    for exercise in exercises {
        let sets: Vec<String> = exercise
            .sets
            .iter()
            .map(|s| format!("{}x{}", s.reps, app.weight(s.weight)))
            .collect();
        let flag = if exercise.is_weak_point { " (weak point)" } else { "" };
        println!("\t{}{}: {}", exercise.name, flag, sets.join(", "));
    }
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    List,
    Show { id: String },
    /// Add a template; exercises use set notation, e.g. "Bench Press 3x10@60"
    Add {
        name: String,
        #[arg(short, long)]
        exercise: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a template and clear it from routines
    Delete { id: String },
}

impl TemplateCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            TemplateCommand::List => {
                for template in app.tracker.templates().all() {
                    println!(
                        "{}, {} ({} exercises)",
                        template.id,
                        template.name,
                        template.exercises.len()
                    );
                }
            }
            TemplateCommand::Show { id } => {
                let template = app
                    .tracker
                    .templates()
                    .get(&id)
                    .ok_or_else(|| anyhow!("template {} not found", id))?;
                println!("{}", template.name);
                if let Some(description) = &template.description {
                    println!("{}", description);
                }
                print_exercises(app, &template.exercises);
            }
            TemplateCommand::Add {
                name,
                exercise,
                description,
            } => {
                let name = require_name(&name, "template")?;
                let exercises = exercise
                    .iter()
                    .map(|raw| parse_exercise(raw).map(|p| p.into_exercise()))
                    .collect::<gymbook::Result<Vec<_>>>()?;
                let mut template = WorkoutTemplate::new(name, exercises);
                template.description = description;
                println!("{}", app.tracker.add_template(template));
            }
            TemplateCommand::Delete { id } => {
                found(app.tracker.delete_template(&id), "template", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommand {
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
        /// Show each exercise and its sets
        #[arg(short, long)]
        sets: bool,
    },
    /// Start a workout from a template
    Start {
        template_id: String,
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Start an empty workout
    Add {
        name: String,
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Log sets in set notation, e.g. "Squat 5@100, 3@110"
    Log { workout_id: String, sets: String },
    Complete { id: String },
    /// Record how long a workout took
    Duration { id: String, seconds: u64 },
    Delete { id: String },
}

impl WorkoutCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            WorkoutCommand::List { limit, sets } => {
                for workout in app.tracker.workouts().recent(limit) {
                    let status = if workout.completed { "done" } else { "open" };
                    println!(
                        "{}, {}, {} [{}]",
                        workout.id, workout.date, workout.name, status
                    );
                    if sets {
                        print_exercises(app, &workout.exercises);
                    }
                }
            }
            WorkoutCommand::Start { template_id, date } => {
                let id = app
                    .tracker
                    .create_workout_from_template(&template_id, date.unwrap_or_else(today))?;
                println!("{}", id);
            }
            WorkoutCommand::Add { name, date } => {
                let name = require_name(&name, "workout")?;
                let id = app
                    .tracker
                    .add_workout(Workout::new(name, date.unwrap_or_else(today)));
                println!("{}", id);
            }
            WorkoutCommand::Log { workout_id, sets } => {
                let parsed = parse_exercise(&sets)?;
                let count = parsed.sets.len();
                for set in parsed.sets {
                    app.tracker.log_set(&workout_id, &parsed.name, set)?;
                }
                println!("Logged {} sets of {}", count, parsed.name);
            }
            WorkoutCommand::Complete { id } => app.tracker.complete_workout(&id, None)?,
            WorkoutCommand::Duration { id, seconds } => {
                app.tracker.set_workout_duration(&id, seconds)?
            }
            WorkoutCommand::Delete { id } => {
                found(app.tracker.delete_workout(&id), "workout", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum RoutineCommand {
    List,
    Add { name: String },
    /// Point a weekday (0 = Sunday) at a template, or clear it
    Assign {
        routine_id: String,
        day: u8,
        template_id: Option<String>,
    },
    Archive {
        id: String,
        #[arg(long)]
        restore: bool,
    },
    Delete { id: String },
    /// Template scheduled for a date
    Today {
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
}

impl RoutineCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            RoutineCommand::List => {
                for routine in app.tracker.routines().all() {
                    let archived = if routine.archived { " (archived)" } else { "" };
                    println!("{}, {}{}", routine.id, routine.name, archived);
                    let mut days = routine.workout_days.clone();
                    days.sort_by_key(|d| d.day_of_week);
                    for day in days {
                        let template = day
                            .workout_template_id
                            .as_deref()
                            .and_then(|id| app.tracker.templates().get(id))
                            .map_or("rest", |t| t.name.as_str());
                        let label = DAY_NAMES.get(day.day_of_week as usize).unwrap_or(&"?");
                        println!("\t{}: {}", label, template);
                    }
                }
            }
            RoutineCommand::Add { name } => {
                let name = require_name(&name, "routine")?;
                println!("{}", app.tracker.add_routine(WeeklyRoutine::new(name)));
            }
            RoutineCommand::Assign {
                routine_id,
                day,
                template_id,
            } => app
                .tracker
                .assign_routine_day(&routine_id, day, template_id.as_deref())?,
            RoutineCommand::Archive { id, restore } => {
                found(app.tracker.archive_routine(&id, !restore), "routine", &id)?;
            }
            RoutineCommand::Delete { id } => {
                found(app.tracker.delete_routine(&id), "routine", &id)?;
            }
            RoutineCommand::Today { date } => {
                let date = date.unwrap_or_else(today);
                match app.tracker.todays_template(date) {
                    Some(template) => {
                        println!("{} ({})", template.name, date.weekday());
                        print_exercises(app, &template.exercises);
                    }
                    None => println!("Rest day ({})", date.weekday()),
                }
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    List,
    Add {
        name: String,
        /// Template ids to copy into the plan
        #[arg(short, long)]
        template: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Make a plan the only active one
    Activate { id: String },
    Archive {
        id: String,
        #[arg(long)]
        restore: bool,
    },
    Delete { id: String },
}

impl PlanCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            PlanCommand::List => {
                for plan in app.tracker.plans().all() {
                    let mut tags = Vec::new();
                    if plan.is_active {
                        tags.push("active");
                    }
                    if plan.archived {
                        tags.push("archived");
                    }
                    println!(
                        "{}, {} ({} templates) {}",
                        plan.id,
                        plan.name,
                        plan.workout_templates.len(),
                        tags.join(" ")
                    );
                }
            }
            PlanCommand::Add {
                name,
                template,
                description,
            } => {
                let name = require_name(&name, "plan")?;
                let mut plan = WorkoutPlan::new(name, Vec::new());
                plan.description = description;
                let id = app.tracker.add_plan(plan);
                for template_id in &template {
                    app.tracker.add_template_to_plan(&id, template_id)?;
                }
                println!("{}", id);
            }
            PlanCommand::Activate { id } => app.tracker.set_active_plan(&id)?,
            PlanCommand::Archive { id, restore } => {
                found(app.tracker.archive_plan(&id, !restore), "plan", &id)?;
            }
            PlanCommand::Delete { id } => {
                found(app.tracker.delete_plan(&id), "plan", &id)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum BlockCommand {
    List,
    Add {
        name: String,
        #[arg(value_parser = parse_day)]
        start: NaiveDate,
        #[arg(value_parser = parse_day)]
        end: NaiveDate,
        #[arg(short, long)]
        routine: Option<String>,
        #[arg(short, long)]
        goal: Option<String>,
    },
    /// Block covering a date
    Current {
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    Delete { id: String },
}

impl BlockCommand {
    pub fn run(self, app: &mut App) -> Result<()> {
        match self {
            BlockCommand::List => {
                for block in app.tracker.blocks().all() {
                    println!(
                        "{}, {} {} to {}",
                        block.id, block.name, block.start_date, block.end_date
                    );
                }
            }
            BlockCommand::Add {
                name,
                start,
                end,
                routine,
                goal,
            } => {
                let name = require_name(&name, "block")?;
                ensure!(start <= end, "block must start before it ends");
                if let Some(routine_id) = &routine {
                    ensure!(
                        app.tracker.routines().contains(routine_id),
                        "routine {} not found",
                        routine_id
                    );
                }
                let mut block = TrainingBlock::new(name, start, end);
                block.routine_id = routine;
                block.goal = goal;
                println!("{}", app.tracker.add_block(block));
            }
            BlockCommand::Current { date } => {
                match app.tracker.current_block(date.unwrap_or_else(today)) {
                    Some(block) => println!(
                        "{}, {} until {}{}",
                        block.id,
                        block.name,
                        block.end_date,
                        block
                            .goal
                            .as_deref()
                            .map(|g| format!(" ({})", g))
                            .unwrap_or_default()
                    ),
                    None => println!("No training block"),
                }
            }
            BlockCommand::Delete { id } => {
                found(app.tracker.delete_block(&id), "block", &id)?;
            }
        }
        Ok(())
    }
}
