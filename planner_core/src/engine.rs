//! Plan assembly: the recommendation engine entry point.
//!
//! Runs the pipeline for one user:
//! - Filter the catalog for injuries and equipment
//! - Rank by preferences and past satisfaction
//! - Group by type and balance muscle groups
//! - Resolve and adapt the weekly template
//! - Build the day schedule and select exercises per day

use crate::balance::{balance_muscle_groups, categorize, CategorizedExercises};
use crate::catalog::{build_default_catalog, load_catalog};
use crate::filter::filter_exercises;
use crate::progression::ProgressiveParameters;
use crate::schedule::build_day_schedule;
use crate::scoring::rank_exercises;
use crate::selection::build_week;
use crate::template::{adapt_template, resolve_template};
use crate::{
    Catalog, Config, Error, FitnessLevel, Result, TemplateStructure, UserProfile, WorkoutPlan,
    WorkoutRecord, GENERAL_FITNESS,
};
use chrono::Utc;
use rand::Rng;

/// Plans are always generated for the first week
const WEEK_NUMBER: u32 = 1;

/// Owns the catalog and templates; read-only while generating
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: Catalog,
}

/// Intermediate results of the full (non-degraded) pipeline
struct Prepared {
    exercises: CategorizedExercises,
    structure: TemplateStructure,
}

impl Engine {
    pub fn new(catalog: Catalog) -> Self {
        tracing::info!(
            "Engine ready with {} exercises and {} templates",
            catalog.exercises.len(),
            catalog.templates.len()
        );
        Self { catalog }
    }

    /// Engine over the built-in exercises and template
    pub fn with_defaults() -> Self {
        Self::new(build_default_catalog())
    }

    /// Engine over the data files named by the configuration
    ///
    /// Missing or malformed files fall back to built-in data.
    pub fn load(config: &Config) -> Self {
        Self::new(load_catalog(
            &config.exercises_path(),
            &config.templates_path(),
        ))
    }

    /// Replace the catalog with freshly loaded data
    pub fn reload(&mut self, config: &Config) {
        *self = Self::load(config);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generate a weekly plan for `user`
    ///
    /// `last_workout` is mandatory; without it nothing is changed and
    /// [`Error::MissingLastWorkout`] is returned. Otherwise the record is
    /// appended to the user's history before planning.
    ///
    /// If the user lacks a goal or fitness level, generation degrades to
    /// the General Fitness template and the unfiltered catalog. The
    /// substituted defaults are never written back to the profile.
    pub fn generate_plan<R: Rng + ?Sized>(
        &self,
        user: &mut UserProfile,
        last_workout: Option<WorkoutRecord>,
        rng: &mut R,
    ) -> Result<WorkoutPlan> {
        let last_workout = last_workout.ok_or(Error::MissingLastWorkout)?;
        user.past_workouts.push(last_workout);

        let prepared = match self.prepare(user) {
            Ok(prepared) => prepared,
            Err(Error::MissingAttribute(field)) => {
                tracing::warn!("Missing user attribute - {}, using defaults", field);
                self.degraded()
            }
            Err(e) => {
                tracing::error!("Error generating workout plan: {}", e);
                return Err(e);
            }
        };

        let level = user.fitness_level.unwrap_or_default();
        let goal = user.goal.as_deref().unwrap_or(GENERAL_FITNESS);
        let params = ProgressiveParameters::for_profile(level, goal);

        let schedule = build_day_schedule(&prepared.structure);
        let days = build_week(
            &prepared.exercises,
            &schedule,
            &params,
            &user.injuries,
            rng,
        );

        let plan = WorkoutPlan {
            user_id: user.user_id.clone(),
            week_number: WEEK_NUMBER,
            generated_at: Utc::now(),
            days,
        };

        tracing::info!(
            "Generated plan for {}: {} exercises across {} days",
            plan.user_id,
            plan.exercises().count(),
            plan.days.len()
        );

        Ok(plan)
    }

    /// The full pipeline up to (not including) the day schedule
    fn prepare(&self, user: &UserProfile) -> Result<Prepared> {
        let level: FitnessLevel = user
            .fitness_level
            .ok_or(Error::MissingAttribute("fitness_level"))?;
        let goal = user.goal.as_deref().ok_or(Error::MissingAttribute("goal"))?;

        let available = filter_exercises(&self.catalog.exercises, &user.injuries, &user.equipment);
        let ranked = rank_exercises(
            available,
            &user.preferred_workouts,
            level,
            &user.past_workouts,
        );
        let exercises = balance_muscle_groups(categorize(ranked));

        let template = resolve_template(&self.catalog.templates, goal);
        let adapted = adapt_template(&template, &user.preferred_workouts, level);
        tracing::info!("Using template '{}' for goal '{}'", adapted.goal, goal);

        Ok(Prepared {
            exercises,
            structure: adapted.structure.unwrap_or_default(),
        })
    }

    /// General Fitness template over the whole catalog, unranked
    fn degraded(&self) -> Prepared {
        let template = resolve_template(&self.catalog.templates, GENERAL_FITNESS);
        Prepared {
            exercises: categorize(self.catalog.exercises.clone()),
            structure: template.structure.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Intensity, WorkoutType};
    use chrono::Weekday;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_user() -> UserProfile {
        let mut user = UserProfile::new("U1", "Test User");
        user.goal = Some(GENERAL_FITNESS.into());
        user.fitness_level = Some(FitnessLevel::Beginner);
        user.equipment = vec!["Dumbbells".into()];
        user
    }

    fn last_workout() -> Option<WorkoutRecord> {
        Some(WorkoutRecord::completed("Cardio", 4, Intensity::Moderate))
    }

    #[test]
    fn test_missing_last_workout_is_fatal() {
        let engine = Engine::with_defaults();
        let mut user = create_test_user();
        let mut rng = StdRng::seed_from_u64(1);

        let result = engine.generate_plan(&mut user, None, &mut rng);
        assert!(matches!(result, Err(Error::MissingLastWorkout)));
        assert!(user.past_workouts.is_empty());
    }

    #[test]
    fn test_history_appended_without_dedup() {
        let engine = Engine::with_defaults();
        let mut user = create_test_user();
        let mut rng = StdRng::seed_from_u64(1);
        let record = last_workout();

        engine.generate_plan(&mut user, record.clone(), &mut rng).unwrap();
        engine.generate_plan(&mut user, record.clone(), &mut rng).unwrap();

        assert_eq!(user.past_workouts.len(), 2);
        assert_eq!(user.past_workouts[0], user.past_workouts[1]);
    }

    #[test]
    fn test_beginner_general_fitness_week() {
        let engine = Engine::with_defaults();
        let mut user = create_test_user();
        let mut rng = StdRng::seed_from_u64(11);

        let plan = engine.generate_plan(&mut user, last_workout(), &mut rng).unwrap();

        assert_eq!(plan.week_number, 1);
        assert_eq!(plan.user_id, "U1");
        let types: Vec<_> = plan.days.iter().map(|d| d.workout_type.clone()).collect();
        assert_eq!(
            types,
            vec![
                WorkoutType::Strength,
                WorkoutType::Cardio,
                WorkoutType::Rest,
                WorkoutType::Strength,
                WorkoutType::Cardio,
                WorkoutType::Flexibility,
                WorkoutType::Rest,
            ]
        );
        assert!(plan.day(Weekday::Wed).unwrap().exercises.is_empty());
        assert!(!plan.day(Weekday::Mon).unwrap().exercises.is_empty());
    }

    #[test]
    fn test_missing_goal_degrades_without_writing_back() {
        let engine = Engine::with_defaults();
        let mut user = create_test_user();
        user.goal = None;
        user.fitness_level = None;
        let mut rng = StdRng::seed_from_u64(5);

        let plan = engine.generate_plan(&mut user, last_workout(), &mut rng).unwrap();

        assert_eq!(plan.days.len(), 7);
        // Unadapted General Fitness week keeps Wednesday as Core
        assert_eq!(plan.days[2].workout_type, WorkoutType::Core);
        assert!(user.goal.is_none());
        assert!(user.fitness_level.is_none());
        assert_eq!(user.past_workouts.len(), 1);
    }

    #[test]
    fn test_empty_catalog_gives_empty_days() {
        let engine = Engine::new(Catalog::default());
        let mut user = create_test_user();
        let mut rng = StdRng::seed_from_u64(5);

        let plan = engine.generate_plan(&mut user, last_workout(), &mut rng).unwrap();
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.exercises().count(), 0);
    }

    #[test]
    fn test_reload_picks_up_new_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(temp_dir.path());

        let mut engine = Engine::load(&config);
        assert_eq!(engine.catalog().exercises.len(), 8);

        std::fs::write(
            config.exercises_path(),
            r#"[{"name": "Jump Rope", "exercise_type": "Cardio"},
                {"name": "Kettlebell Swing", "exercise_type": "Strength",
                 "equipment_needed": ["Kettlebell"]}]"#,
        )
        .unwrap();
        engine.reload(&config);

        let names: Vec<_> = engine
            .catalog()
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Jump Rope", "Kettlebell Swing"]);
        assert_eq!(engine.catalog().templates.len(), 1);

        let mut user = create_test_user();
        user.equipment = vec!["Kettlebell".into()];
        let mut rng = StdRng::seed_from_u64(2);
        let plan = engine.generate_plan(&mut user, last_workout(), &mut rng).unwrap();
        let monday = plan.day(Weekday::Mon).unwrap();
        assert_eq!(monday.exercises.len(), 1);
        assert_eq!(monday.exercises[0].exercise.name, "Kettlebell Swing");
    }

    #[test]
    fn test_follow_up_record_uses_monday() {
        let engine = Engine::with_defaults();
        let mut user = create_test_user();
        let mut rng = StdRng::seed_from_u64(5);

        let plan = engine.generate_plan(&mut user, last_workout(), &mut rng).unwrap();
        let next = plan.follow_up_record();
        assert_eq!(next.workout_type, WorkoutType::Strength);
        assert_eq!(next.satisfaction, Some(3));
        assert_eq!(next.intensity, Some(Intensity::Moderate));
        assert!(next.completed);
    }
}
