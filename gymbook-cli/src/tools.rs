use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

use gymbook::stats::{ChartMode, WeightUnit, calculate_one_rep_max, convert_weight};
use gymbook::timer;

use crate::app::App;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Weight,
    Volume,
}

impl From<Mode> for ChartMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Weight => ChartMode::Weight,
            Mode::Volume => ChartMode::Volume,
        }
    }
}

pub fn progress(app: &App, exercise: &str, mode: Mode) -> Result<()> {
    let points = app.tracker.progress_for(exercise);
    if points.is_empty() {
        println!("No completed sets of {}", exercise);
        return Ok(());
    }
    for point in points {
        println!("{}\t{}", point.date, app.weight(point.value(mode.into())));
    }
    Ok(())
}

pub fn records(app: &App) -> Result<()> {
    for record in app.tracker.personal_records().values() {
        println!(
            "{}: {} x {} on {} (est. 1RM {})",
            record.exercise,
            app.weight(record.weight),
            record.reps,
            record.date,
            app.weight(record.estimated_one_rep_max)
        );
    }
    Ok(())
}

/// `weight` is taken in the display unit.
pub fn one_rep_max(app: &App, weight: f64, reps: u32) -> Result<()> {
    let estimate = calculate_one_rep_max(app.to_kg(weight), reps);
    println!("{}", app.weight(estimate));
    Ok(())
}

pub fn convert(value: f64, from: WeightUnit, to: WeightUnit) -> Result<()> {
    println!("{:.2}{}", convert_weight(value, from, to), to);
    Ok(())
}

pub fn export(app: &App, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            app.tracker.export_to_file(path)?;
            info!("Wrote export to {}", path.display());
        }
        None => {
            let json = app.tracker.export_data()?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

pub fn import(app: &mut App, path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading export from {}", path.display()))?;
    let count = app.tracker.import_data(&json)?;
    println!("Imported {} records", count);
    Ok(())
}

pub async fn timer(seconds: u64) -> Result<()> {
    println!("Rest {}s", seconds);
    let handle = timer::countdown(seconds, |left| {
        if left == 0 {
            println!("Go!");
        } else {
            println!("{}", left);
        }
    });
    handle.wait().await;
    Ok(())
}
