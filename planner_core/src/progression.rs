//! Progressive workout parameters.
//!
//! Ranges for sets, reps and rest are keyed by fitness level and adjusted
//! by goal:
//! - Muscle Gain: one more minimum set, 15s more maximum rest
//! - Endurance: four more reps at both ends, 15s less maximum rest
//!
//! Only the minimum of each range is applied to exercises without their own
//! parameters.

use crate::{Exercise, FitnessLevel};
use serde::{Deserialize, Serialize};

/// Inclusive range
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Level- and goal-derived parameter ranges
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressiveParameters {
    pub sets: Range,
    pub reps: Range,
    /// Seconds
    pub rest: Range,
}

/// Concrete parameters for one exercise instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseParameters {
    pub sets: u32,
    pub reps: u32,
    pub rest_period: u32,
}

impl ProgressiveParameters {
    /// Base ranges for a fitness level
    pub fn for_level(level: FitnessLevel) -> Self {
        match level {
            FitnessLevel::Beginner => Self {
                sets: Range::new(2, 3),
                reps: Range::new(8, 12),
                rest: Range::new(60, 90),
            },
            FitnessLevel::Intermediate => Self {
                sets: Range::new(3, 4),
                reps: Range::new(10, 15),
                rest: Range::new(45, 75),
            },
            FitnessLevel::Advanced => Self {
                sets: Range::new(3, 5),
                reps: Range::new(12, 20),
                rest: Range::new(30, 60),
            },
        }
    }

    /// Base ranges adjusted for the user's goal
    pub fn for_profile(level: FitnessLevel, goal: &str) -> Self {
        let mut params = Self::for_level(level);
        match goal {
            "Muscle Gain" => {
                params.sets.min += 1;
                params.rest.max += 15;
            }
            "Endurance" => {
                params.reps.min += 4;
                params.reps.max += 4;
                params.rest.max = params.rest.max.saturating_sub(15);
            }
            _ => {}
        }
        tracing::debug!("Progressive parameters for {} / {}: {:?}", level, goal, params);
        params
    }

    /// Exercise-specific values win over the range minima
    pub fn apply(&self, exercise: &Exercise) -> ExerciseParameters {
        ExerciseParameters {
            sets: exercise.sets.unwrap_or(self.sets.min),
            reps: exercise.reps.unwrap_or(self.reps.min),
            rest_period: exercise.rest_period.unwrap_or(self.rest.min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;

    #[test]
    fn test_level_ranges() {
        let beginner = ProgressiveParameters::for_level(FitnessLevel::Beginner);
        assert_eq!(beginner.sets, Range::new(2, 3));
        assert_eq!(beginner.rest, Range::new(60, 90));

        let advanced = ProgressiveParameters::for_level(FitnessLevel::Advanced);
        assert_eq!(advanced.reps, Range::new(12, 20));
    }

    #[test]
    fn test_muscle_gain_adjustment() {
        let params = ProgressiveParameters::for_profile(FitnessLevel::Intermediate, "Muscle Gain");
        assert_eq!(params.sets, Range::new(4, 4));
        assert_eq!(params.rest, Range::new(45, 90));
        assert_eq!(params.reps, Range::new(10, 15));
    }

    #[test]
    fn test_endurance_adjustment() {
        let params = ProgressiveParameters::for_profile(FitnessLevel::Advanced, "Endurance");
        assert_eq!(params.reps, Range::new(16, 24));
        assert_eq!(params.rest, Range::new(30, 45));
        assert_eq!(params.sets, Range::new(3, 5));
    }

    #[test]
    fn test_other_goals_unchanged() {
        assert_eq!(
            ProgressiveParameters::for_profile(FitnessLevel::Beginner, "Weight Loss"),
            ProgressiveParameters::for_level(FitnessLevel::Beginner)
        );
    }

    #[test]
    fn test_apply_uses_minimum_or_override() {
        let params = ProgressiveParameters::for_profile(FitnessLevel::Beginner, "General Fitness");
        let mut exercise = build_default_catalog().exercises[6].clone();

        assert_eq!(
            params.apply(&exercise),
            ExerciseParameters {
                sets: 2,
                reps: 8,
                rest_period: 60
            }
        );

        exercise.reps = Some(30);
        exercise.rest_period = Some(20);
        let applied = params.apply(&exercise);
        assert_eq!(applied.sets, 2);
        assert_eq!(applied.reps, 30);
        assert_eq!(applied.rest_period, 20);
    }
}
