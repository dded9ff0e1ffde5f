//! Day-schedule construction.
//!
//! Turns a template structure into the seven workout types of the week.
//! Day-keyed structures are read directly; frequency structures are
//! expanded, padded with Rest, and spaced by the schedule optimizer.

use crate::{day_name, StructureValue, TemplateStructure, WorkoutType, WEEK};

/// Number of days in a plan
pub const DAYS_PER_WEEK: usize = 7;

/// Insert Rest days by position
///
/// After appending the entry at 1-based position `p`, a Rest follows when
/// `(p - rests_inserted) % 3 == 0` and the entry is not Flexibility or
/// Mobility. The result is truncated to seven entries.
pub fn optimize_schedule(schedule: &[WorkoutType]) -> Vec<WorkoutType> {
    let mut optimized = Vec::with_capacity(schedule.len() + schedule.len() / 3);
    let mut rest_added = 0;

    for (idx, workout) in schedule.iter().enumerate() {
        optimized.push(workout.clone());
        let light = matches!(workout, WorkoutType::Flexibility | WorkoutType::Mobility);
        if (idx + 1 - rest_added) % 3 == 0 && !light {
            optimized.push(WorkoutType::Rest);
            rest_added += 1;
        }
    }

    optimized.truncate(DAYS_PER_WEEK);
    optimized
}

/// Expand `(type, count)` entries in order and pad with Rest to a week
///
/// Expansions longer than a week are left for the optimizer to trim.
pub fn expand_frequencies(structure: &TemplateStructure) -> Vec<WorkoutType> {
    let mut schedule = Vec::new();
    for (label, value) in structure.iter() {
        if let StructureValue::Count(count) = value {
            let workout_type = WorkoutType::parse(label);
            schedule.extend(std::iter::repeat(workout_type).take(*count as usize));
        }
    }

    if schedule.len() < DAYS_PER_WEEK {
        schedule.resize(DAYS_PER_WEEK, WorkoutType::Rest);
    }
    schedule
}

/// Build the Monday-to-Sunday workout types from a structure
pub fn build_day_schedule(structure: &TemplateStructure) -> Vec<WorkoutType> {
    let day_keyed = WEEK.iter().any(|day| structure.contains_key(day_name(*day)));

    if day_keyed {
        return WEEK
            .iter()
            .map(|day| {
                structure
                    .workout_on(*day)
                    .cloned()
                    .unwrap_or(WorkoutType::Rest)
            })
            .collect();
    }

    let schedule = optimize_schedule(&expand_frequencies(structure));
    tracing::debug!("Expanded frequency template into {:?}", schedule);
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn types(labels: &[&str]) -> Vec<WorkoutType> {
        labels.iter().map(|l| WorkoutType::parse(l)).collect()
    }

    #[test]
    fn test_day_keyed_read_directly() {
        let structure =
            TemplateStructure::from_days([(Weekday::Tue, "HIIT"), (Weekday::Sat, "Mobility")]);

        let schedule = build_day_schedule(&structure);
        assert_eq!(
            schedule,
            types(&["Rest", "HIIT", "Rest", "Rest", "Rest", "Mobility", "Rest"])
        );
    }

    #[test]
    fn test_frequency_weight_loss() {
        let structure = TemplateStructure::from_counts([
            ("HIIT", 3),
            ("Cardio", 2),
            ("Strength", 1),
            ("Flexibility", 1),
        ]);

        let schedule = build_day_schedule(&structure);
        assert_eq!(
            schedule,
            types(&["HIIT", "HIIT", "HIIT", "Rest", "Cardio", "Rest", "Cardio"])
        );
    }

    #[test]
    fn test_light_workouts_skip_rest_insertion() {
        let schedule = optimize_schedule(&types(&[
            "Mobility",
            "Mobility",
            "Mobility",
            "Flexibility",
            "Flexibility",
            "Other",
            "Other",
        ]));

        assert_eq!(
            schedule,
            types(&["Mobility", "Mobility", "Mobility", "Flexibility", "Flexibility", "Other", "Rest"])
        );
    }

    #[test]
    fn test_every_entry_after_first_trigger_gets_rest() {
        let structure = TemplateStructure::from_counts([("Cardio", 3), ("Circuit", 2)]);

        let schedule = build_day_schedule(&structure);
        assert_eq!(
            schedule,
            types(&["Cardio", "Cardio", "Cardio", "Rest", "Circuit", "Rest", "Circuit"])
        );
    }

    #[test]
    fn test_overlong_expansion_truncated() {
        let structure = TemplateStructure::from_counts([("Strength", 10)]);

        let expanded = expand_frequencies(&structure);
        assert_eq!(expanded.len(), 10);

        let schedule = build_day_schedule(&structure);
        assert_eq!(schedule.len(), DAYS_PER_WEEK);
        assert_eq!(
            schedule,
            types(&["Strength", "Strength", "Strength", "Rest", "Strength", "Rest", "Strength"])
        );
    }

    #[test]
    fn test_light_entry_at_trigger_defers_rest() {
        let input = types(&["Core", "Cardio", "Flexibility", "Strength", "HIIT", "Cardio", "Core"]);
        let output = optimize_schedule(&input);

        assert_eq!(
            output,
            types(&["Core", "Cardio", "Flexibility", "Strength", "HIIT", "Cardio", "Rest"])
        );
    }

    #[test]
    fn test_empty_structure_is_all_rest() {
        let schedule = build_day_schedule(&TemplateStructure::new());
        assert_eq!(schedule, vec![WorkoutType::Rest; 7]);
    }
}
