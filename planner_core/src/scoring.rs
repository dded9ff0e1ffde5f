//! Preference scoring of filtered exercises.
//!
//! Each exercise gets an additive score from declared preferences, the
//! user's level, and average satisfaction over completed past workouts.

use crate::{Exercise, FitnessLevel, Intensity, WorkoutRecord, WorkoutType};
use std::collections::HashMap;
use std::hash::Hash;

/// Rating assumed for a completed workout with no satisfaction value
const NEUTRAL_SATISFACTION: f64 = 3.0;

/// Average satisfaction per workout type and per intensity
#[derive(Clone, Debug, Default)]
pub struct SatisfactionTables {
    pub by_type: HashMap<WorkoutType, f64>,
    pub by_intensity: HashMap<Intensity, f64>,
}

fn average<K: Eq + Hash>(samples: HashMap<K, Vec<f64>>) -> HashMap<K, f64> {
    samples
        .into_iter()
        .map(|(k, v)| {
            let avg = v.iter().sum::<f64>() / v.len() as f64;
            (k, avg)
        })
        .collect()
}

impl SatisfactionTables {
    /// Build the tables from completed records only
    pub fn from_history(history: &[WorkoutRecord]) -> Self {
        let mut by_type: HashMap<WorkoutType, Vec<f64>> = HashMap::new();
        let mut by_intensity: HashMap<Intensity, Vec<f64>> = HashMap::new();

        for record in history.iter().filter(|r| r.completed) {
            let satisfaction = record
                .satisfaction
                .map(f64::from)
                .unwrap_or(NEUTRAL_SATISFACTION);

            by_type
                .entry(record.workout_type.clone())
                .or_default()
                .push(satisfaction);

            if let Some(intensity) = record.intensity {
                by_intensity.entry(intensity).or_default().push(satisfaction);
            }
        }

        Self {
            by_type: average(by_type),
            by_intensity: average(by_intensity),
        }
    }
}

fn satisfaction_bonus(average: Option<f64>) -> f64 {
    match average {
        Some(avg) if avg >= 4.0 => 2.0,
        Some(avg) if avg >= 3.0 => 1.0,
        _ => 0.0,
    }
}

/// Score one exercise
pub fn score_exercise(
    exercise: &Exercise,
    preferred: &[WorkoutType],
    level: FitnessLevel,
    tables: &SatisfactionTables,
) -> f64 {
    let mut score = 0.0;

    if preferred.contains(&exercise.exercise_type) {
        score += 2.0;
    }

    if exercise.difficulty == level {
        score += 1.0;
    }

    if exercise.has_explicit_parameters() {
        score += 0.5;
    }

    score += satisfaction_bonus(tables.by_intensity.get(&exercise.intensity).copied());
    score += satisfaction_bonus(tables.by_type.get(&exercise.exercise_type).copied());

    if level.matching_intensity() == exercise.intensity {
        score += 1.0;
    }

    score
}

/// Rank exercises by descending score
///
/// Ties are broken by name in the same descending direction, so equal
/// scores come out reverse-alphabetical.
pub fn rank_exercises(
    exercises: Vec<Exercise>,
    preferred: &[WorkoutType],
    level: FitnessLevel,
    history: &[WorkoutRecord],
) -> Vec<Exercise> {
    if exercises.is_empty() {
        return exercises;
    }

    let tables = SatisfactionTables::from_history(history);
    let mut scored: Vec<(f64, Exercise)> = exercises
        .into_iter()
        .map(|e| (score_exercise(&e, preferred, level, &tables), e))
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| sb.total_cmp(sa).then_with(|| b.name.cmp(&a.name)));

    if let Some((top, e)) = scored.first() {
        tracing::debug!("Top ranked exercise: {} ({})", e.name, top);
    }

    scored.into_iter().map(|(_, e)| e).collect()
}
