use clap::{Parser, Subcommand};
use planner_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wplan")]
#[command(about = "Personalized weekly workout plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate next week's plan from the profile and the last workout
    Generate {
        /// Profile file (defaults to <data_dir>/profile.json)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Type of the last workout (prompted for when omitted)
        #[arg(long)]
        last_type: Option<String>,

        /// Satisfaction with the last workout, 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        satisfaction: Option<u8>,

        /// Intensity of the last workout (Low, Moderate, High)
        #[arg(long)]
        intensity: Option<Intensity>,

        /// No workout history yet; seed with a neutral first workout
        #[arg(long, conflicts_with = "last_type")]
        no_history: bool,

        /// Show the plan without saving the updated profile
        #[arg(long)]
        dry_run: bool,

        /// Print the plan and the follow-up record as JSON
        #[arg(long)]
        json: bool,

        /// Fixed seed for exercise sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Also export the plan as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show the exercise catalog and templates in use
    Catalog {
        /// Fail if the catalog has validation errors
        #[arg(long)]
        validate: bool,
    },

    /// Create a new user profile
    InitProfile {
        /// Profile file (defaults to <data_dir>/profile.json)
        #[arg(long)]
        profile: Option<PathBuf>,

        #[arg(long)]
        user_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        gender: Option<String>,

        /// Training goal (defaults to the configured goal)
        #[arg(long)]
        goal: Option<String>,

        /// Fitness level (defaults to the configured level)
        #[arg(long)]
        level: Option<FitnessLevel>,

        /// Injury, repeatable
        #[arg(long = "injury")]
        injuries: Vec<String>,

        /// Available equipment, repeatable
        #[arg(long = "equipment")]
        equipment: Vec<String>,

        /// Preferred workout type, repeatable
        #[arg(long = "prefer")]
        preferred: Vec<String>,

        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },
}

/// The last workout as given on the command line
struct LastWorkoutArgs {
    last_type: Option<String>,
    satisfaction: Option<u8>,
    intensity: Option<Intensity>,
    no_history: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    planner_core::logging::init_with_level(planner_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    match cli.command {
        Commands::Generate {
            profile,
            last_type,
            satisfaction,
            intensity,
            no_history,
            dry_run,
            json,
            seed,
            csv,
        } => {
            let last = LastWorkoutArgs {
                last_type,
                satisfaction,
                intensity,
                no_history,
            };
            let profile_path = profile.unwrap_or_else(|| config.profile_path());
            cmd_generate(
                &config,
                &profile_path,
                last,
                dry_run,
                json,
                seed,
                csv.as_deref(),
            )
        }
        Commands::Catalog { validate } => cmd_catalog(&config, validate),
        Commands::InitProfile {
            profile,
            user_id,
            name,
            age,
            gender,
            goal,
            level,
            injuries,
            equipment,
            preferred,
            force,
        } => {
            let profile_path = profile.unwrap_or_else(|| config.profile_path());
            let mut user = UserProfile::new(user_id, name);
            user.age = age;
            user.gender = gender;
            user.goal = Some(goal.unwrap_or_else(|| config.defaults.goal.clone()));
            user.fitness_level = Some(level.unwrap_or(config.defaults.fitness_level));
            user.injuries = injuries;
            user.equipment = equipment;
            user.preferred_workouts = preferred.iter().map(|p| WorkoutType::parse(p)).collect();
            cmd_init_profile(&profile_path, &user, force)
        }
    }
}

fn cmd_generate(
    config: &Config,
    profile_path: &Path,
    last: LastWorkoutArgs,
    dry_run: bool,
    json: bool,
    seed: Option<u64>,
    csv_path: Option<&Path>,
) -> Result<()> {
    let mut user = UserProfile::load(profile_path)?;

    let engine = Engine::load(config);
    for problem in engine.catalog().validate() {
        tracing::warn!("Catalog: {}", problem);
    }

    let last_workout = if last.no_history {
        Some(WorkoutRecord::first_workout())
    } else if let Some(last_type) = last.last_type {
        Some(WorkoutRecord::completed(
            last_type.as_str(),
            last.satisfaction.unwrap_or(3),
            last.intensity.unwrap_or_default(),
        ))
    } else {
        prompt_last_workout(&mut io::stdin().lock())?
    };

    let mut rng = match seed.or(config.engine.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = engine.generate_plan(&mut user, last_workout, &mut rng)?;

    if json {
        let output = serde_json::json!({
            "user": user_summary(&user),
            "plan": plan,
            "next_workout": plan.follow_up_record(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display_plan(&user, &plan);
    }

    if let Some(path) = csv_path {
        let rows = write_plan_csv(&plan, path)?;
        if !json {
            println!("✓ Exported {} rows to {}", rows, path.display());
        }
    }

    if dry_run {
        if !json {
            println!("\n[Dry run - profile not updated]");
        }
        return Ok(());
    }

    user.save(profile_path)?;
    tracing::info!("Profile saved to {:?}", profile_path);
    Ok(())
}

fn cmd_catalog(config: &Config, validate: bool) -> Result<()> {
    let engine = Engine::load(config);
    let catalog = engine.catalog();

    println!("Exercises ({}):", catalog.exercises.len());
    for exercise in &catalog.exercises {
        let equipment = if exercise.is_bodyweight() {
            "bodyweight".to_string()
        } else {
            exercise.equipment_needed.join(", ")
        };
        println!(
            "  {:<22} {:<12} {:<12} {}",
            exercise.name,
            exercise.exercise_type.label(),
            exercise.difficulty.to_string(),
            equipment
        );
    }

    println!("\nTemplates ({}):", catalog.templates.len());
    for template in &catalog.templates {
        let days = template.structure.as_ref().map_or(0, |s| s.len());
        println!("  {} ({} entries)", template.goal, days);
    }

    let errors = catalog.validate();
    if errors.is_empty() {
        println!("\n✓ Catalog valid");
        return Ok(());
    }

    eprintln!("Catalog validation errors:");
    for error in &errors {
        eprintln!("  - {}", error);
    }
    if validate {
        return Err(Error::CatalogValidation(format!(
            "{} problems found",
            errors.len()
        )));
    }
    Ok(())
}

fn cmd_init_profile(path: &Path, user: &UserProfile, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Profile(format!(
            "Profile already exists at {:?} (use --force to overwrite)",
            path
        )));
    }

    user.save(path)?;
    println!("✓ Created profile for {} at {}", user.name, path.display());
    Ok(())
}

/// Ask for the last workout on stdin
///
/// An empty type (or closed input) means no last workout was given.
fn prompt_last_workout<R: BufRead>(input: &mut R) -> Result<Option<WorkoutRecord>> {
    let Some(last_type) = prompt(input, "Last workout type (e.g. Strength, Cardio): ")? else {
        return Ok(None);
    };

    let satisfaction = match prompt(input, "Satisfaction 1-5 [3]: ")? {
        Some(value) => value
            .parse::<u8>()
            .ok()
            .filter(|s| (1..=5).contains(s))
            .ok_or_else(|| Error::Other(format!("Invalid satisfaction: {}", value)))?,
        None => 3,
    };

    let intensity = match prompt(input, "Intensity (Low/Moderate/High) [Moderate]: ")? {
        Some(value) => value.parse::<Intensity>()?,
        None => Intensity::default(),
    };

    Ok(Some(WorkoutRecord::completed(
        last_type.as_str(),
        satisfaction,
        intensity,
    )))
}

fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    eprint!("{}", label);
    io::stderr().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Profile fields shown alongside a plan
fn user_summary(user: &UserProfile) -> serde_json::Value {
    serde_json::json!({
        "name": user.name,
        "goal": user.goal,
        "fitness_level": user.fitness_level,
        "age": user.age,
        "gender": user.gender,
        "injuries": user.injuries,
        "equipment": user.equipment,
    })
}

fn display_plan(user: &UserProfile, plan: &WorkoutPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WEEKLY PLAN - {} (week {})", user.name, plan.week_number);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Goal: {} | Fitness Level: {}",
        user.goal.as_deref().unwrap_or("-"),
        user.fitness_level.map_or("-".to_string(), |l| l.to_string())
    );
    println!(
        "  Age: {} | Gender: {}",
        user.age.map_or("-".to_string(), |a| a.to_string()),
        user.gender.as_deref().unwrap_or("-")
    );
    println!("  Injuries: {}", list_or_none(&user.injuries));
    println!("  Equipment: {}", list_or_none(&user.equipment));

    for day in &plan.days {
        println!();
        println!("{} - {}", day_name(day.day), day.workout_type);

        match &day.workout_type {
            WorkoutType::Rest => println!("  Complete rest day - focus on recovery"),
            WorkoutType::ActiveRecovery => println!("  Light stretching or yoga"),
            _ if day.exercises.is_empty() => println!("  No suitable exercises available"),
            _ => {
                for (idx, planned) in day.exercises.iter().enumerate() {
                    println!(
                        "  {}. {}: {} sets x {} reps, rest {}s",
                        idx + 1,
                        planned.exercise.name,
                        planned.sets,
                        planned.reps,
                        planned.rest_period
                    );
                    if !planned.exercise.equipment_needed.is_empty() {
                        println!(
                            "     Equipment: {}",
                            planned.exercise.equipment_needed.join(", ")
                        );
                    }
                    println!("     Notes: {}", planned.notes);
                }
            }
        }
    }

    println!();
}
