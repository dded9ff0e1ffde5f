//! Category grouping and muscle-group balancing.

use crate::{Exercise, WorkoutType};
use std::collections::HashSet;

/// Exercises grouped by type, in first-seen category order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategorizedExercises {
    groups: Vec<(WorkoutType, Vec<Exercise>)>,
}

impl CategorizedExercises {
    pub fn groups(&self) -> &[(WorkoutType, Vec<Exercise>)] {
        &self.groups
    }

    pub fn get(&self, workout_type: &WorkoutType) -> Option<&[Exercise]> {
        self.groups
            .iter()
            .find(|(t, _)| t == workout_type)
            .map(|(_, exercises)| exercises.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, exercises)| exercises.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every exercise, category by category
    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.groups.iter().flat_map(|(_, exercises)| exercises.iter())
    }
}

/// Group exercises by `exercise_type`, preserving order within each group
pub fn categorize(exercises: Vec<Exercise>) -> CategorizedExercises {
    let mut groups: Vec<(WorkoutType, Vec<Exercise>)> = Vec::new();

    for exercise in exercises {
        match groups.iter_mut().find(|(t, _)| *t == exercise.exercise_type) {
            Some((_, group)) => group.push(exercise),
            None => groups.push((exercise.exercise_type.clone(), vec![exercise])),
        }
    }

    CategorizedExercises { groups }
}

/// Reorder one group so muscle-group diversity comes first
///
/// A single greedy pass accepts an exercise when none of its muscle groups
/// has been claimed yet, then the rest follow in their original order.
pub fn balance_group(exercises: Vec<Exercise>) -> Vec<Exercise> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut accepted = vec![false; exercises.len()];

    for (idx, exercise) in exercises.iter().enumerate() {
        if !exercise.muscle_groups.iter().any(|m| claimed.contains(m)) {
            accepted[idx] = true;
            claimed.extend(exercise.muscle_groups.iter().cloned());
        }
    }

    let (mut front, back): (Vec<_>, Vec<_>) = exercises
        .into_iter()
        .zip(accepted)
        .partition(|(_, is_accepted)| *is_accepted);
    front.extend(back);
    front.into_iter().map(|(e, _)| e).collect()
}

/// Balance every category independently
pub fn balance_muscle_groups(categorized: CategorizedExercises) -> CategorizedExercises {
    let groups = categorized
        .groups
        .into_iter()
        .map(|(t, exercises)| (t, balance_group(exercises)))
        .collect();
    CategorizedExercises { groups }
}
