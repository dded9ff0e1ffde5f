//! Exercise catalog and template store.
//!
//! Provides the built-in exercises and template, loads replacements from
//! JSON files, and validates catalog consistency. Unreadable or malformed
//! sources never abort loading; they fall back to the built-in data.

use crate::types::*;
use chrono::Weekday;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in exercises and templates
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> Catalog {
    Catalog {
        exercises: default_exercises(),
        templates: default_templates(),
    }
}

/// The fixed week used whenever no usable template exists
pub fn default_week_structure() -> TemplateStructure {
    TemplateStructure::from_days([
        (Weekday::Mon, WorkoutType::Strength),
        (Weekday::Tue, WorkoutType::Cardio),
        (Weekday::Wed, WorkoutType::Core),
        (Weekday::Thu, WorkoutType::Strength),
        (Weekday::Fri, WorkoutType::Cardio),
        (Weekday::Sat, WorkoutType::Flexibility),
        (Weekday::Sun, WorkoutType::Rest),
    ])
}

/// Built-in General Fitness template
pub fn default_template() -> WorkoutTemplate {
    WorkoutTemplate {
        goal: GENERAL_FITNESS.into(),
        structure: Some(default_week_structure()),
    }
}

pub fn default_templates() -> Vec<WorkoutTemplate> {
    vec![default_template()]
}

fn exercise(
    name: &str,
    exercise_type: WorkoutType,
    muscle_groups: &[&str],
    equipment_needed: &[&str],
    intensity: Intensity,
    injury_restrictions: &[&str],
    alternatives: &[&str],
) -> Exercise {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Exercise {
        name: name.into(),
        exercise_type,
        muscle_groups: owned(muscle_groups),
        equipment_needed: owned(equipment_needed),
        intensity,
        difficulty: FitnessLevel::Beginner,
        injury_restrictions: owned(injury_restrictions),
        alternatives: owned(alternatives),
        sets: None,
        reps: None,
        rest_period: None,
    }
}

/// The eight built-in exercises
pub fn default_exercises() -> Vec<Exercise> {
    let mut thrusters = exercise(
        "Dumbbell Thrusters",
        WorkoutType::Strength,
        &["Legs", "Shoulders"],
        &["Dumbbells"],
        Intensity::High,
        &["Shoulder Issue"],
        &["Bodyweight Squats"],
    );
    thrusters.difficulty = FitnessLevel::Intermediate;

    vec![
        thrusters,
        exercise(
            "Step-Ups",
            WorkoutType::Strength,
            &["Legs"],
            &["Step"],
            Intensity::Moderate,
            &["Knee Injury"],
            &["Bodyweight Squats"],
        ),
        exercise(
            "Resistance Band Rows",
            WorkoutType::Strength,
            &["Back"],
            &["Resistance Bands"],
            Intensity::Moderate,
            &["Shoulder Issue"],
            &["Seated Rows"],
        ),
        exercise(
            "Stationary Bike",
            WorkoutType::Cardio,
            &["Legs"],
            &["Stationary Bike"],
            Intensity::Moderate,
            &["Knee Injury"],
            &["Swimming"],
        ),
        exercise(
            "Swimming",
            WorkoutType::Cardio,
            &["Full Body"],
            &["Pool"],
            Intensity::Moderate,
            &[],
            &["Water Aerobics"],
        ),
        exercise(
            "Bodyweight Squats",
            WorkoutType::Strength,
            &["Legs"],
            &[],
            Intensity::Low,
            &[],
            &["Wall Sit"],
        ),
        exercise(
            "Plank",
            WorkoutType::Core,
            &["Core"],
            &[],
            Intensity::Low,
            &[],
            &["Side Plank"],
        ),
        exercise(
            "Elliptical",
            WorkoutType::Cardio,
            &["Full Body"],
            &["Elliptical"],
            Intensity::Moderate,
            &["Knee Injury"],
            &["Rowing Machine"],
        ),
    ]
}

// ============================================================================
// JSON ingestion
// ============================================================================

/// Accepted shapes of an exercises file
#[derive(Deserialize)]
#[serde(untagged)]
enum ExercisesFile {
    Wrapped { workouts: Vec<serde_json::Value> },
    List(Vec<serde_json::Value>),
    Single(serde_json::Map<String, serde_json::Value>),
}

/// Accepted shapes of a templates file
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplatesFile {
    List(Vec<serde_json::Value>),
    Object(serde_json::Map<String, serde_json::Value>),
}

fn read_json(path: &Path, what: &str) -> Option<serde_json::Value> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(
                "Failed to read {} at {:?}: {}. Using built-in defaults.",
                what,
                path,
                e
            );
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                "Failed to parse {} at {:?}: {}. Using built-in defaults.",
                what,
                path,
                e
            );
            None
        }
    }
}

/// Load exercises from a JSON file
///
/// Accepts a list of records, a `{"workouts": [...]}` wrapper, or a single
/// record. Records that fail to parse are skipped with a warning. Returns the
/// built-in exercises if the file is missing, malformed, or yields nothing.
pub fn load_exercises(path: &Path) -> Vec<Exercise> {
    let Some(value) = read_json(path, "exercises") else {
        return default_exercises();
    };

    let records = match serde_json::from_value::<ExercisesFile>(value) {
        Ok(ExercisesFile::Wrapped { workouts }) => workouts,
        Ok(ExercisesFile::List(records)) => records,
        Ok(ExercisesFile::Single(record)) => vec![serde_json::Value::Object(record)],
        Err(e) => {
            tracing::warn!("Unexpected exercises format at {:?}: {}", path, e);
            return default_exercises();
        }
    };

    let mut exercises = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Exercise>(record) {
            Ok(exercise) => exercises.push(exercise),
            Err(e) => tracing::warn!("Skipping exercise record {}: {}", idx + 1, e),
        }
    }

    if exercises.is_empty() {
        tracing::warn!("No exercises found at {:?}, using defaults", path);
        return default_exercises();
    }

    tracing::info!("Loaded {} exercises from {:?}", exercises.len(), path);
    exercises
}

/// Load templates from a JSON file
///
/// Accepts a list of templates (entries without a `goal` are dropped), a
/// single template object, or an object mapping goal names to template
/// bodies. Returns the built-in template when nothing usable is found.
pub fn load_templates(path: &Path) -> Vec<WorkoutTemplate> {
    let Some(value) = read_json(path, "templates") else {
        return default_templates();
    };

    let templates: Vec<WorkoutTemplate> = match serde_json::from_value::<TemplatesFile>(value) {
        Ok(TemplatesFile::List(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<WorkoutTemplate>(item).ok())
            .collect(),
        Ok(TemplatesFile::Object(map)) if map.contains_key("goal") => {
            serde_json::from_value::<WorkoutTemplate>(serde_json::Value::Object(map))
                .into_iter()
                .collect()
        }
        Ok(TemplatesFile::Object(map)) => map
            .into_iter()
            .filter_map(|(goal, body)| {
                let mut body = match body {
                    serde_json::Value::Object(body) => body,
                    _ => serde_json::Map::new(),
                };
                body.insert("goal".into(), serde_json::Value::String(goal));
                serde_json::from_value::<WorkoutTemplate>(serde_json::Value::Object(body)).ok()
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Unexpected templates format at {:?}: {}", path, e);
            Vec::new()
        }
    };

    if templates.is_empty() {
        tracing::warn!("No valid templates found at {:?}, using defaults", path);
        return default_templates();
    }

    tracing::info!("Loaded {} templates from {:?}", templates.len(), path);
    templates
}

/// Load a full catalog, each half falling back independently
pub fn load_catalog(exercises_path: &Path, templates_path: &Path) -> Catalog {
    Catalog {
        exercises: load_exercises(exercises_path),
        templates: load_templates(templates_path),
    }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() {
                errors.push("Exercise has empty name".to_string());
                continue;
            }
            if !seen.insert(exercise.name.as_str()) {
                errors.push(format!("Duplicate exercise name '{}'", exercise.name));
            }
            if exercise.exercise_type.label().trim().is_empty() {
                errors.push(format!("Exercise '{}' has empty type", exercise.name));
            }
            if exercise.sets == Some(0) || exercise.reps == Some(0) {
                errors.push(format!(
                    "Exercise '{}' has zero sets or reps",
                    exercise.name
                ));
            }
        }

        for template in &self.templates {
            if template.goal.trim().is_empty() {
                errors.push("Template has empty goal".to_string());
            }
            if template.structure.is_none() {
                errors.push(format!(
                    "Template '{}' has no structure mapping",
                    template.goal
                ));
            }
        }

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
        }

        errors
    }
}
