//! Safety and equipment filtering of the exercise catalog.
//!
//! This is the only place injury restrictions are enforced; later stages
//! trust that every exercise they see is safe for the user.

use crate::Exercise;

/// Drop exercises whose restrictions intersect the user's injuries
pub fn filter_by_injury(exercises: &[Exercise], injuries: &[String]) -> Vec<Exercise> {
    exercises
        .iter()
        .filter(|e| !e.injury_restrictions.iter().any(|r| injuries.contains(r)))
        .cloned()
        .collect()
}

/// Keep bodyweight exercises and those needing at least one owned item
pub fn filter_by_equipment(exercises: &[Exercise], equipment: &[String]) -> Vec<Exercise> {
    exercises
        .iter()
        .filter(|e| e.is_bodyweight() || e.equipment_needed.iter().any(|eq| equipment.contains(eq)))
        .cloned()
        .collect()
}

/// Run the injury pass then the equipment pass
///
/// When the equipment pass leaves nothing, falls back to the injury-safe
/// bodyweight exercises. An empty catalog yields an empty list.
pub fn filter_exercises(
    catalog: &[Exercise],
    injuries: &[String],
    equipment: &[String],
) -> Vec<Exercise> {
    let safe = filter_by_injury(catalog, injuries);
    let available = filter_by_equipment(&safe, equipment);

    if !available.is_empty() {
        tracing::debug!(
            "Filter kept {} of {} exercises",
            available.len(),
            catalog.len()
        );
        return available;
    }

    let bodyweight: Vec<Exercise> = safe.into_iter().filter(|e| e.is_bodyweight()).collect();
    tracing::info!(
        "No exercises match available equipment, falling back to {} bodyweight exercises",
        bodyweight.len()
    );
    bodyweight
}
