//! Core domain types for the weekly plan recommender.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout types, intensities and fitness levels
//! - Exercises and the catalog they live in
//! - Weekly templates (day-keyed or frequency-keyed)
//! - User profiles and workout history
//! - Generated weekly plans

use chrono::{DateTime, Utc, Weekday};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Goal used whenever a requested goal has no template of its own
pub const GENERAL_FITNESS: &str = "General Fitness";

/// The canonical week, in plan order
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, as used for template keys
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// Category label shared by exercises, template slots and history records
///
/// Unknown labels (e.g. "Circuit", "Low-Impact") are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Hiit,
    Core,
    Flexibility,
    Mobility,
    Resistance,
    Rest,
    ActiveRecovery,
    Other(String),
}

impl WorkoutType {
    /// Parse a label case-insensitively
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "strength" => WorkoutType::Strength,
            "cardio" => WorkoutType::Cardio,
            "hiit" => WorkoutType::Hiit,
            "core" => WorkoutType::Core,
            "flexibility" => WorkoutType::Flexibility,
            "mobility" => WorkoutType::Mobility,
            "resistance" => WorkoutType::Resistance,
            "rest" => WorkoutType::Rest,
            "active recovery" | "active_recovery" | "active-recovery" => {
                WorkoutType::ActiveRecovery
            }
            _ => WorkoutType::Other(trimmed.to_string()),
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            WorkoutType::Strength => "Strength",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Core => "Core",
            WorkoutType::Flexibility => "Flexibility",
            WorkoutType::Mobility => "Mobility",
            WorkoutType::Resistance => "Resistance",
            WorkoutType::Rest => "Rest",
            WorkoutType::ActiveRecovery => "Active Recovery",
            WorkoutType::Other(label) => label,
        }
    }

    /// Rest and Active Recovery days never carry exercises
    pub fn is_recovery(&self) -> bool {
        matches!(self, WorkoutType::Rest | WorkoutType::ActiveRecovery)
    }

    /// Case-insensitive comparison (relevant for `Other` labels)
    pub fn matches(&self, other: &WorkoutType) -> bool {
        self.label().eq_ignore_ascii_case(other.label())
    }
}

impl From<String> for WorkoutType {
    fn from(label: String) -> Self {
        WorkoutType::parse(&label)
    }
}

impl From<&str> for WorkoutType {
    fn from(label: &str) -> Self {
        WorkoutType::parse(label)
    }
}

impl From<WorkoutType> for String {
    fn from(workout_type: WorkoutType) -> Self {
        workout_type.label().to_string()
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exercise or workout intensity
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
        };
        f.write_str(label)
    }
}

impl TryFrom<String> for Intensity {
    type Error = crate::Error;

    fn try_from(label: String) -> crate::Result<Self> {
        label.parse()
    }
}

impl FromStr for Intensity {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "moderate" | "medium" => Ok(Intensity::Moderate),
            "high" => Ok(Intensity::High),
            other => Err(crate::Error::Other(format!("Unknown intensity: {}", other))),
        }
    }
}

/// User fitness level, also used as exercise difficulty
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// The intensity that suits this level best
    pub fn matching_intensity(self) -> Intensity {
        match self {
            FitnessLevel::Beginner => Intensity::Low,
            FitnessLevel::Intermediate => Intensity::Moderate,
            FitnessLevel::Advanced => Intensity::High,
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

impl TryFrom<String> for FitnessLevel {
    type Error = crate::Error;

    fn try_from(label: String) -> crate::Result<Self> {
        label.parse()
    }
}

impl FromStr for FitnessLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(crate::Error::Other(format!("Unknown fitness level: {}", other))),
        }
    }
}

// ============================================================================
// Exercises
// ============================================================================

fn unspecified_type() -> WorkoutType {
    WorkoutType::Other("Other".into())
}

/// An exercise record from the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    /// Records without a type land in an "Other" category
    #[serde(default = "unspecified_type")]
    pub exercise_type: WorkoutType,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub equipment_needed: Vec<String>,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub difficulty: FitnessLevel,
    #[serde(default)]
    pub injury_restrictions: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Explicit parameters override the level-derived defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Rest between sets, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_period: Option<u32>,
}

impl Exercise {
    /// True when the record carries its own non-zero sets and reps
    pub fn has_explicit_parameters(&self) -> bool {
        self.sets.is_some_and(|s| s > 0) && self.reps.is_some_and(|r| r > 0)
    }

    pub fn is_bodyweight(&self) -> bool {
        self.equipment_needed.is_empty()
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Value held by one template entry
#[derive(Clone, Debug, PartialEq)]
pub enum StructureValue {
    /// Day-keyed form: the workout type for that day
    Workout(WorkoutType),
    /// Frequency form: how many days of that workout type
    Count(u32),
}

/// Ordered key/value mapping of a template, in source order
///
/// Day-keyed templates map weekday names to workout types; frequency
/// templates map workout-type labels to counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateStructure {
    entries: Vec<(String, StructureValue)>,
}

impl TemplateStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a day-keyed structure from `(day, type)` pairs
    pub fn from_days<I, T>(days: I) -> Self
    where
        I: IntoIterator<Item = (Weekday, T)>,
        T: Into<WorkoutType>,
    {
        let entries = days
            .into_iter()
            .map(|(day, t)| (day_name(day).to_string(), StructureValue::Workout(t.into())))
            .collect();
        Self { entries }
    }

    /// Build a frequency structure from `(type, count)` pairs
    pub fn from_counts<I, T>(counts: I) -> Self
    where
        I: IntoIterator<Item = (T, u32)>,
        T: Into<WorkoutType>,
    {
        let entries = counts
            .into_iter()
            .map(|(t, count)| {
                let workout_type: WorkoutType = t.into();
                (workout_type.label().to_string(), StructureValue::Count(count))
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, StructureValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&StructureValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Workout type stored under `day`, if the entry is day-keyed
    pub fn workout_on(&self, day: Weekday) -> Option<&WorkoutType> {
        match self.get(day_name(day)) {
            Some(StructureValue::Workout(t)) => Some(t),
            _ => None,
        }
    }

    /// Overwrite an entry in place, or append it when absent
    pub fn set(&mut self, key: &str, value: StructureValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructureValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for TemplateStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            match value {
                StructureValue::Workout(t) => map.serialize_entry(key, t.label())?,
                StructureValue::Count(count) => map.serialize_entry(key, count)?,
            }
        }
        map.end()
    }
}

/// Accept any JSON value; only objects become a structure
///
/// String values are day-keyed entries, non-negative integers are counts,
/// anything else is skipped.
fn structure_from_value<'de, D>(deserializer: D) -> std::result::Result<Option<TemplateStructure>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(map)) = value else {
        return Ok(None);
    };

    let entries = map
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(label) => {
                Some((key, StructureValue::Workout(WorkoutType::parse(&label))))
            }
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(|count| (key, StructureValue::Count(count))),
            _ => None,
        })
        .collect();

    Ok(Some(TemplateStructure { entries }))
}

/// A weekly structural template for one goal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTemplate {
    pub goal: String,
    /// `None` when the source structure is missing or not a mapping
    #[serde(
        default,
        deserialize_with = "structure_from_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub structure: Option<TemplateStructure>,
}

// ============================================================================
// User Profile and History
// ============================================================================

/// One completed (or attempted) workout reported by the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub completed: bool,
    /// 1-5 rating; absent ratings count as neutral (3)
    #[serde(default)]
    pub satisfaction: Option<u8>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl WorkoutRecord {
    /// A completed workout with a rating, stamped now
    pub fn completed(workout_type: impl Into<WorkoutType>, satisfaction: u8, intensity: Intensity) -> Self {
        Self {
            id: Uuid::new_v4(),
            workout_type: workout_type.into(),
            completed: true,
            satisfaction: Some(satisfaction.clamp(1, 5)),
            intensity: Some(intensity),
            recorded_at: Some(Utc::now()),
        }
    }

    /// Seed record for a user with no workout history yet
    pub fn first_workout() -> Self {
        Self::completed(GENERAL_FITNESS, 3, Intensity::Moderate)
    }
}

/// The user's fitness profile
///
/// `goal` and `fitness_level` are optional so that partially filled
/// profiles can still be loaded; the engine degrades when they are absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub fitness_level: Option<FitnessLevel>,
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub preferred_workouts: Vec<WorkoutType>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub past_workouts: Vec<WorkoutRecord>,
}

impl UserProfile {
    /// Empty profile with only an id and a name
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            age: None,
            gender: None,
            goal: None,
            fitness_level: None,
            injuries: Vec::new(),
            preferred_workouts: Vec::new(),
            equipment: Vec::new(),
            past_workouts: Vec::new(),
        }
    }
}

// ============================================================================
// Generated Plan
// ============================================================================

/// An exercise with concrete parameters for one day
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PlannedExercise {
    pub exercise: Exercise,
    pub sets: u32,
    pub reps: u32,
    /// Seconds of rest between sets
    pub rest_period: u32,
    pub notes: String,
}

fn serialize_day<S: Serializer>(day: &Weekday, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(day_name(*day))
}

/// One day of the weekly plan
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DayPlan {
    #[serde(serialize_with = "serialize_day")]
    pub day: Weekday,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub exercises: Vec<PlannedExercise>,
}

/// The generated seven-day plan
#[derive(Clone, Debug, Serialize)]
pub struct WorkoutPlan {
    pub user_id: String,
    pub week_number: u32,
    pub generated_at: DateTime<Utc>,
    /// Always seven entries, Monday first
    pub days: Vec<DayPlan>,
}

impl WorkoutPlan {
    pub fn day(&self, day: Weekday) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }

    /// All planned exercises across the week, in day order
    pub fn exercises(&self) -> impl Iterator<Item = &PlannedExercise> {
        self.days.iter().flat_map(|d| d.exercises.iter())
    }

    /// Record to feed into the next generation call
    ///
    /// Uses the first day's type with a neutral rating and moderate intensity.
    pub fn follow_up_record(&self) -> WorkoutRecord {
        let workout_type = self
            .days
            .first()
            .map(|d| d.workout_type.clone())
            .unwrap_or(WorkoutType::Rest);
        WorkoutRecord::completed(workout_type, 3, Intensity::Moderate)
    }
}

// ============================================================================
// Catalog Type
// ============================================================================

/// Exercise records plus weekly templates, in discovery order
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
    /// Later entries are newer; goal lookup takes the last match
    pub templates: Vec<WorkoutTemplate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_parse_is_case_insensitive() {
        assert_eq!(WorkoutType::parse("hiit"), WorkoutType::Hiit);
        assert_eq!(WorkoutType::parse("Active Recovery"), WorkoutType::ActiveRecovery);
        assert_eq!(WorkoutType::parse(" STRENGTH "), WorkoutType::Strength);
        assert_eq!(
            WorkoutType::parse("Low-Impact"),
            WorkoutType::Other("Low-Impact".into())
        );
    }

    #[test]
    fn test_workout_type_serializes_as_label() {
        let json = serde_json::to_string(&WorkoutType::Hiit).unwrap();
        assert_eq!(json, "\"HIIT\"");

        let parsed: WorkoutType = serde_json::from_str("\"Circuit\"").unwrap();
        assert!(parsed.matches(&WorkoutType::Other("circuit".into())));
    }

    #[test]
    fn test_template_structure_keeps_source_order() {
        let template: WorkoutTemplate = serde_json::from_str(
            r#"{"goal": "Weight Loss", "structure": {"HIIT": 3, "Cardio": 2, "Strength": 1}}"#,
        )
        .unwrap();

        let structure = template.structure.unwrap();
        let keys: Vec<_> = structure.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["HIIT", "Cardio", "Strength"]);
        assert_eq!(structure.get("Cardio"), Some(&StructureValue::Count(2)));
    }

    #[test]
    fn test_non_mapping_structure_is_none() {
        let template: WorkoutTemplate =
            serde_json::from_str(r#"{"goal": "Endurance", "structure": ["Cardio"]}"#).unwrap();
        assert!(template.structure.is_none());

        let template: WorkoutTemplate = serde_json::from_str(r#"{"goal": "Endurance"}"#).unwrap();
        assert!(template.structure.is_none());
    }

    #[test]
    fn test_structure_set_overwrites_or_appends() {
        let mut structure =
            TemplateStructure::from_days([(Weekday::Mon, "Strength"), (Weekday::Tue, "Cardio")]);
        structure.set("Tuesday", StructureValue::Workout(WorkoutType::Rest));
        structure.set("Wednesday", StructureValue::Workout(WorkoutType::Rest));

        assert_eq!(structure.len(), 3);
        assert_eq!(structure.workout_on(Weekday::Tue), Some(&WorkoutType::Rest));
        assert_eq!(structure.entries()[2].0, "Wednesday");
    }

    #[test]
    fn test_profile_missing_optional_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"user_id": "U1", "name": "Sam"}"#).unwrap();
        assert!(profile.goal.is_none());
        assert!(profile.fitness_level.is_none());
        assert!(profile.past_workouts.is_empty());
    }

    #[test]
    fn test_levels_and_intensities_parse_case_insensitively() {
        let exercise: Exercise = serde_json::from_str(
            r#"{"name": "Burpees", "intensity": "high", "difficulty": "intermediate"}"#,
        )
        .unwrap();
        assert_eq!(exercise.intensity, Intensity::High);
        assert_eq!(exercise.difficulty, FitnessLevel::Intermediate);
        assert_eq!(exercise.exercise_type, WorkoutType::Other("Other".into()));

        let json = serde_json::to_string(&exercise.intensity).unwrap();
        assert_eq!(json, "\"High\"");
        assert!(serde_json::from_str::<Intensity>("\"extreme\"").is_err());
    }

    #[test]
    fn test_zero_parameters_are_not_explicit() {
        let mut exercise: Exercise =
            serde_json::from_str(r#"{"name": "Plank", "exercise_type": "Core", "sets": 3, "reps": 0}"#)
                .unwrap();
        assert!(!exercise.has_explicit_parameters());
        exercise.reps = Some(30);
        assert!(exercise.has_explicit_parameters());
    }

    #[test]
    fn test_record_without_satisfaction() {
        let record: WorkoutRecord =
            serde_json::from_str(r#"{"workout_type": "Cardio", "completed": true}"#).unwrap();
        assert!(record.completed);
        assert_eq!(record.satisfaction, None);
        assert_eq!(record.intensity, None);
    }
}
