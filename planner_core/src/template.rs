//! Weekly template resolution and adaptation.
//!
//! Resolution picks the newest template for a goal (or General Fitness, or
//! the built-in week) and normalizes it to day-keyed form. Adaptation then
//! tunes rest days and workout types to the user's level and preferences.
//! Both operate on owned copies; the template store is never modified.

use crate::catalog::{default_template, default_week_structure};
use crate::{
    day_name, FitnessLevel, StructureValue, TemplateStructure, WorkoutTemplate, WorkoutType,
    GENERAL_FITNESS,
};
use chrono::Weekday;

/// Keys whose presence marks a structure as day-keyed during resolution
const RESOLVE_DAY_KEYS: [Weekday; 3] = [Weekday::Mon, Weekday::Tue, Weekday::Wed];

fn find_latest<'a>(templates: &'a [WorkoutTemplate], goal: &str) -> Option<&'a WorkoutTemplate> {
    templates.iter().rev().find(|t| t.goal == goal)
}

fn is_day_keyed(structure: &TemplateStructure) -> bool {
    RESOLVE_DAY_KEYS
        .iter()
        .any(|day| structure.contains_key(day_name(*day)))
}

/// Resolve the template for `goal`
///
/// Searches newest-first for the goal, then for General Fitness, then uses
/// the built-in week. A structure that is missing, or has none of
/// Monday/Tuesday/Wednesday as keys, is replaced by the built-in week
/// (frequency-form templates are not converted).
pub fn resolve_template(templates: &[WorkoutTemplate], goal: &str) -> WorkoutTemplate {
    let mut template = match find_latest(templates, goal) {
        Some(t) => t.clone(),
        None => match find_latest(templates, GENERAL_FITNESS) {
            Some(t) => {
                tracing::debug!("No template for goal '{}', using {}", goal, GENERAL_FITNESS);
                t.clone()
            }
            None => {
                tracing::debug!("No template for goal '{}', using built-in week", goal);
                default_template()
            }
        },
    };

    let usable = template.structure.as_ref().is_some_and(is_day_keyed);
    if !usable {
        tracing::warn!(
            "Template '{}' is not day-keyed, replacing with built-in week",
            template.goal
        );
        template.structure = Some(default_week_structure());
    }

    template
}

fn count_rest(structure: &TemplateStructure) -> usize {
    structure
        .iter()
        .filter(|(_, v)| matches!(v, StructureValue::Workout(WorkoutType::Rest)))
        .count()
}

/// Apply level and preference rules to a copy of the template
///
/// - Beginner: fewer than two Rest days forces Wednesday to Rest.
/// - Advanced: with more than one Rest day, all but the last become
///   Active Recovery.
/// - Per training day, first match wins: preferred HIIT on Tuesday/Thursday,
///   preferred Strength on Monday/Friday, preferred Core replaces Strength.
pub fn adapt_template(
    template: &WorkoutTemplate,
    preferred: &[WorkoutType],
    level: FitnessLevel,
) -> WorkoutTemplate {
    let mut adapted = template.clone();
    let structure = adapted.structure.get_or_insert_with(TemplateStructure::new);

    match level {
        FitnessLevel::Beginner => {
            if count_rest(structure) < 2 {
                structure.set(
                    day_name(Weekday::Wed),
                    StructureValue::Workout(WorkoutType::Rest),
                );
            }
        }
        FitnessLevel::Advanced => {
            let rest_days: Vec<String> = structure
                .iter()
                .filter(|(_, v)| matches!(v, StructureValue::Workout(WorkoutType::Rest)))
                .map(|(k, _)| k.to_string())
                .collect();
            if rest_days.len() > 1 {
                for day in &rest_days[..rest_days.len() - 1] {
                    structure.set(day, StructureValue::Workout(WorkoutType::ActiveRecovery));
                }
            }
        }
        FitnessLevel::Intermediate => {}
    }

    let prefers = |t: WorkoutType| preferred.contains(&t);
    let updates: Vec<(String, WorkoutType)> = structure
        .iter()
        .filter_map(|(day, value)| {
            let StructureValue::Workout(current) = value else {
                return None;
            };
            if current.is_recovery() {
                return None;
            }
            if prefers(WorkoutType::Hiit) && matches!(day, "Tuesday" | "Thursday") {
                Some((day.to_string(), WorkoutType::Hiit))
            } else if prefers(WorkoutType::Strength) && matches!(day, "Monday" | "Friday") {
                Some((day.to_string(), WorkoutType::Strength))
            } else if prefers(WorkoutType::Core) && *current == WorkoutType::Strength {
                Some((day.to_string(), WorkoutType::Core))
            } else {
                None
            }
        })
        .collect();

    for (day, workout_type) in updates {
        structure.set(&day, StructureValue::Workout(workout_type));
    }

    adapted
}
