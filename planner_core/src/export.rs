//! CSV export of generated plans.
//!
//! One row per planned exercise. Days without exercises still get a single
//! row so the file always covers the whole week.

use crate::{day_name, DayPlan, Error, PlannedExercise, Result, WorkoutPlan};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct PlanRow<'a> {
    user_id: &'a str,
    week_number: u32,
    day: &'static str,
    workout_type: &'a str,
    exercise: Option<&'a str>,
    sets: Option<u32>,
    reps: Option<u32>,
    rest_period: Option<u32>,
    equipment: Option<String>,
    notes: Option<&'a str>,
}

impl<'a> PlanRow<'a> {
    fn empty_day(plan: &'a WorkoutPlan, day: &'a DayPlan) -> Self {
        PlanRow {
            user_id: &plan.user_id,
            week_number: plan.week_number,
            day: day_name(day.day),
            workout_type: day.workout_type.label(),
            exercise: None,
            sets: None,
            reps: None,
            rest_period: None,
            equipment: None,
            notes: None,
        }
    }

    fn exercise(plan: &'a WorkoutPlan, day: &'a DayPlan, planned: &'a PlannedExercise) -> Self {
        PlanRow {
            exercise: Some(&planned.exercise.name),
            sets: Some(planned.sets),
            reps: Some(planned.reps),
            rest_period: Some(planned.rest_period),
            equipment: Some(planned.exercise.equipment_needed.join("; ")),
            notes: Some(&planned.notes),
            ..Self::empty_day(plan, day)
        }
    }
}

/// Write the plan as CSV into any writer
pub fn write_plan<W: Write>(plan: &WorkoutPlan, writer: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for day in &plan.days {
        if day.exercises.is_empty() {
            writer.serialize(PlanRow::empty_day(plan, day))?;
            rows += 1;
        }
        for planned in &day.exercises {
            writer.serialize(PlanRow::exercise(plan, day, planned))?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Write the plan to `path`, replacing any existing file atomically
///
/// Returns the number of rows written.
pub fn write_plan_csv(plan: &WorkoutPlan, path: &Path) -> Result<usize> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    let rows = write_plan(plan, temp.as_file())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote {} plan rows to {:?}", rows, path);
    Ok(rows)
}
