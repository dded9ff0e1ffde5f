//! Per-day exercise selection.
//!
//! Each training day draws two or three exercises of a compatible type,
//! attaches sets/reps/rest from the progressive parameters, and adds
//! safety notes. The random source is always passed in by the caller.

use crate::balance::CategorizedExercises;
use crate::progression::ProgressiveParameters;
use crate::{DayPlan, Exercise, Intensity, PlannedExercise, WorkoutType, WEEK};
use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;

/// Catalog types acceptable for a day's workout type
#[derive(Debug)]
struct SynonymRule {
    types: Vec<WorkoutType>,
    /// Extra muscle-group requirement (Core days)
    required_muscle: Option<&'static str>,
}

impl SynonymRule {
    fn of(types: Vec<WorkoutType>) -> Self {
        Self {
            types,
            required_muscle: None,
        }
    }
}

static SYNONYMS: Lazy<HashMap<WorkoutType, SynonymRule>> = Lazy::new(|| {
    use WorkoutType::*;
    HashMap::from([
        (Strength, SynonymRule::of(vec![Strength, Resistance])),
        (Hiit, SynonymRule::of(vec![Hiit, Cardio])),
        (Cardio, SynonymRule::of(vec![Cardio, Hiit])),
        (
            Core,
            SynonymRule {
                types: vec![Strength],
                required_muscle: Some("Core"),
            },
        ),
        (Flexibility, SynonymRule::of(vec![Flexibility, Mobility])),
        (Mobility, SynonymRule::of(vec![Mobility, Flexibility])),
    ])
});

/// Catalog types a day of `workout_type` may draw from
///
/// Types without an entry map to themselves.
pub fn compatible_types(workout_type: &WorkoutType) -> Vec<WorkoutType> {
    SYNONYMS
        .get(workout_type)
        .map(|rule| rule.types.clone())
        .unwrap_or_else(|| vec![workout_type.clone()])
}

/// Exercises eligible for a day, in balanced category order
///
/// Synonyms widen the pool across categories: a HIIT day also draws from
/// the Cardio category.
pub fn candidates_for<'a>(
    exercises: &'a CategorizedExercises,
    workout_type: &WorkoutType,
) -> Vec<&'a Exercise> {
    let types = compatible_types(workout_type);
    let required_muscle = SYNONYMS.get(workout_type).and_then(|r| r.required_muscle);

    exercises
        .iter()
        .filter(|e| types.iter().any(|t| t.matches(&e.exercise_type)))
        .filter(|e| required_muscle.map_or(true, |m| e.muscle_groups.iter().any(|g| g == m)))
        .collect()
}

/// Choose two or three candidates without replacement
///
/// The count is drawn uniformly from {2, 3} and capped at the number of
/// candidates. Returns nothing, without touching `rng`, for an empty slice.
pub fn sample_exercises<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return Vec::new();
    }

    let count = rng.gen_range(2..=3usize).min(candidates.len());
    rand::seq::index::sample(rng, candidates.len(), count)
        .into_iter()
        .map(|idx| &candidates[idx])
        .collect()
}

/// Safety notes for an exercise given the user's injuries
pub fn exercise_notes(exercise: &Exercise, injuries: &[String]) -> String {
    let mut notes = Vec::new();

    for injury in injuries {
        if exercise.injury_restrictions.contains(injury) {
            let alternatives = if exercise.alternatives.is_empty() {
                "None".to_string()
            } else {
                exercise.alternatives.join(", ")
            };
            notes.push(format!("Alternative: {}", alternatives));
        }
    }

    if exercise.intensity == Intensity::High {
        notes.push("Monitor form carefully".to_string());
    }

    if notes.is_empty() {
        "Perform with proper form".to_string()
    } else {
        notes.join("; ")
    }
}

/// Pick and parameterize the exercises for one training day
pub fn select_exercises<R: Rng + ?Sized>(
    exercises: &CategorizedExercises,
    workout_type: &WorkoutType,
    params: &ProgressiveParameters,
    injuries: &[String],
    rng: &mut R,
) -> Vec<PlannedExercise> {
    let candidates = candidates_for(exercises, workout_type);
    if candidates.is_empty() {
        tracing::debug!("No exercises found for type: {}", workout_type);
        return Vec::new();
    }

    sample_exercises(&candidates, rng)
        .into_iter()
        .map(|exercise| {
            let applied = params.apply(exercise);
            PlannedExercise {
                exercise: (*exercise).clone(),
                sets: applied.sets,
                reps: applied.reps,
                rest_period: applied.rest_period,
                notes: exercise_notes(exercise, injuries),
            }
        })
        .collect()
}

/// Fill Monday to Sunday from the day schedule
///
/// Missing schedule slots are Rest. Rest and Active Recovery days get no
/// exercises.
pub fn build_week<R: Rng + ?Sized>(
    exercises: &CategorizedExercises,
    schedule: &[WorkoutType],
    params: &ProgressiveParameters,
    injuries: &[String],
    rng: &mut R,
) -> Vec<DayPlan> {
    WEEK.iter()
        .enumerate()
        .map(|(idx, day)| {
            let workout_type = schedule.get(idx).cloned().unwrap_or(WorkoutType::Rest);
            let selected = if workout_type.is_recovery() {
                Vec::new()
            } else {
                select_exercises(exercises, &workout_type, params, injuries, rng)
            };
            DayPlan {
                day: *day,
                workout_type,
                exercises: selected,
            }
        })
        .collect()
}
