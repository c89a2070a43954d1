//! wellnesshub - Personal wellness tracker
//!
//! Every command rehydrates the store, dispatches one intent and mirrors the
//! result back to storage.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::warn;

use wellnesshub::clock::Clock;
use wellnesshub::db::SqliteStore;
use wellnesshub::exercises::{BuiltinCatalog, ExerciseCatalog, JsonCatalog, MuscleGroup};
use wellnesshub::format::{
    format_clock, format_difficulty, format_duration, format_muscle_name, format_relative_date,
    truncate_text,
};
use wellnesshub::persist::{PersistenceGateway, Rehydration};
use wellnesshub::stats::{ActivitySummary, Analytics, EXERCISE_GOAL_MIN, MOVE_GOAL_KCAL};
use wellnesshub::store::{AppStore, User, estimate_calories};
use wellnesshub::timer::{SessionTicker, tick_now};
use wellnesshub::tips::{TipCategory, format_tip, get_random_tip, get_random_tip_by_category};
use wellnesshub::tui::App;

const DB_PATH: &str = "wellnesshub.db";

#[derive(Parser)]
#[command(name = "wellnesshub")]
#[command(author, version, about = "Personal wellness tracker")]
struct Cli {
    /// SQLite file holding the persisted state
    #[arg(long, global = true, env = "WELLNESSHUB_DB", default_value = DB_PATH)]
    db: PathBuf,

    /// JSON exercise catalog (built-in exercises when absent)
    #[arg(long, global = true, env = "WELLNESSHUB_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Today's activity rings and weekly totals
    Summary,

    /// List exercises for a muscle group (e.g. "chest", "lower_back")
    Exercises { muscle: String },

    /// Manage favorite exercises
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Track water intake
    Water {
        #[command(subcommand)]
        action: WaterAction,
    },

    /// Track workout sessions
    Workout {
        #[command(subcommand)]
        action: WorkoutAction,
    },

    /// Store credentials obtained from the auth service
    Login {
        username: String,

        /// Session token (or set WELLNESSHUB_TOKEN env var)
        #[arg(short, long, env = "WELLNESSHUB_TOKEN")]
        token: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long, default_value = "")]
        email: String,
    },

    /// Forget the signed-in user
    Logout,

    /// Show a random wellness tip
    Tip {
        /// fitness, nutrition, mental, hydration or sleep
        #[arg(short, long)]
        category: Option<TipCategory>,
    },

    /// Delete all local data
    Purge,
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Favorite or unfavorite an exercise by id
    Toggle { id: String },
    /// Remove a favorite by id
    Remove { id: String },
    /// List favorites, newest first
    List,
    /// Remove all favorites
    Clear,
}

#[derive(Subcommand)]
enum WaterAction {
    /// Log a drink in ml
    Add { ml: u32 },
    /// Undo part of today's intake in ml
    Remove { ml: u32 },
    /// Set the daily goal in ml
    Goal { ml: u32 },
    /// Zero today's intake
    Reset,
    /// Show today's intake
    Status,
}

#[derive(Subcommand)]
enum WorkoutAction {
    /// Start a session
    Start { name: String },
    /// Record progress of the running session
    Tick {
        /// Elapsed seconds
        elapsed: u64,
        /// Calories burned (estimated from elapsed time when omitted)
        #[arg(short, long)]
        calories: Option<u32>,
    },
    /// Finish the running session
    Complete,
    /// Discard the running session
    Cancel,
    /// Start a session and time it live until Ctrl-C
    Live { name: String },
    /// Show completed sessions
    History {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Zero today's calorie and minute totals
    ResetStats,
    /// Delete all history and today's totals
    ClearHistory,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let catalog = open_catalog(cli.catalog.as_ref())?;
    let gateway = PersistenceGateway::new(SqliteStore::open(&cli.db)?);

    let mut store = AppStore::init();
    if gateway.rehydrate(&mut store).await == Rehydration::Fallback {
        warn!("Starting from empty state");
    }

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(store);
            app.run()?;
            gateway.persist(&app.into_store()).await?;
        }

        Some(Commands::Summary) => print_summary(&store),

        Some(Commands::Exercises { muscle }) => {
            let muscle: MuscleGroup = muscle.parse()?;
            println!("{} exercises:", format_muscle_name(muscle.key()));
            println!("{:-<70}", "");
            for ex in catalog.by_muscle(muscle) {
                let mark = if store.favorites.contains(&ex) { "♥" } else { " " };
                println!(
                    "{} {:28} | {:12} | {}",
                    mark,
                    ex.name,
                    format_difficulty(ex.difficulty.as_str()),
                    ex.id()
                );
            }
        }

        Some(Commands::Favorite { action }) => {
            match action {
                FavoriteAction::Toggle { id } => {
                    let exercise = catalog
                        .find(&id)
                        .with_context(|| format!("No exercise with id {}", id))?;
                    if store.toggle_favorite(&exercise) {
                        println!("Added to favorites: {}", exercise.name);
                    } else {
                        println!("Removed from favorites: {}", exercise.name);
                    }
                }
                FavoriteAction::Remove { id } => {
                    if store.remove_favorite(&id) {
                        println!("Removed: {}", id);
                    } else {
                        println!("Not a favorite: {}", id);
                    }
                }
                FavoriteAction::List => {
                    let today = store.clock().today();
                    println!("Favorites ({}):", store.favorites.len());
                    println!("{:-<70}", "");
                    for f in store.favorites.items() {
                        println!(
                            "{:28} | {:12} | {} | {}",
                            f.exercise.name,
                            format_muscle_name(&f.exercise.muscle),
                            format_relative_date(f.added_at.date_naive(), today),
                            truncate_text(&f.exercise.instructions, 40)
                        );
                    }
                }
                FavoriteAction::Clear => {
                    store.clear_favorites();
                    println!("Favorites cleared");
                }
            }
            gateway.persist(&store).await?;
        }

        Some(Commands::Water { action }) => {
            match action {
                WaterAction::Add { ml } => store.add_water(ml),
                WaterAction::Remove { ml } => store.remove_water(ml),
                WaterAction::Goal { ml } => store.set_water_goal(ml),
                WaterAction::Reset => store.reset_water(),
                WaterAction::Status => {}
            }
            let today = store.clock().today();
            println!(
                "Water: {} / {} ml ({:.0}%)",
                store.water.consumed_today(today),
                store.water.daily_goal,
                store.water.percent_of_goal(today)
            );
            gateway.persist(&store).await?;
        }

        Some(Commands::Workout { action }) => {
            match action {
                WorkoutAction::Start { name } => {
                    let session = store.start_workout(&name)?;
                    println!("Started: {} at {}", session.name, session.started_at.format("%H:%M:%S"));
                }
                WorkoutAction::Tick { elapsed, calories } => {
                    if !store.workout.is_running() {
                        bail!("No workout is running");
                    }
                    let calories = calories.unwrap_or_else(|| estimate_calories(elapsed));
                    store.tick_workout(elapsed, calories);
                    println!("{} - {} kcal", format_clock(elapsed), calories);
                }
                WorkoutAction::Complete => {
                    let entry = store.complete_workout()?;
                    println!(
                        "Completed: {} - {} - {} kcal",
                        entry.name,
                        format_duration(entry.duration),
                        entry.calories
                    );
                }
                WorkoutAction::Cancel => {
                    let session = store.cancel_workout()?;
                    println!("Cancelled: {}", session.name);
                }
                WorkoutAction::Live { name } => {
                    store = run_live_session(store, &name).await?;
                }
                WorkoutAction::History { limit } => {
                    let today = store.clock().today();
                    println!("Recent workouts:");
                    println!("{:-<60}", "");
                    for h in store.workout.history().iter().take(limit) {
                        println!(
                            "{:12} | {:20} | {:8} | {} kcal",
                            format_relative_date(h.date, today),
                            h.name,
                            format_duration(h.duration),
                            h.calories
                        );
                    }
                }
                WorkoutAction::ResetStats => {
                    store.reset_workout_stats();
                    println!("Today's workout totals reset");
                }
                WorkoutAction::ClearHistory => {
                    store.clear_workout_history();
                    println!("Workout history cleared");
                }
            }
            gateway.persist(&store).await?;
        }

        Some(Commands::Login { username, token, first_name, last_name, email }) => {
            let user = User {
                id: 0,
                username,
                email,
                first_name,
                last_name,
                gender: String::new(),
                image: String::new(),
            };
            store.login(user, token);
            if let Some(user) = &store.auth.user {
                println!("Signed in as {}", user.display_name());
            }
            gateway.persist(&store).await?;
        }

        Some(Commands::Logout) => {
            store.logout();
            println!("Signed out");
            gateway.persist(&store).await?;
        }

        Some(Commands::Tip { category }) => {
            let tip = match category {
                Some(category) => get_random_tip_by_category(category),
                None => Some(get_random_tip()),
            };
            match tip {
                Some(tip) => println!("{}", format_tip(tip)),
                None => println!("No tips in that category"),
            }
        }

        Some(Commands::Purge) => {
            store.clear_all_data();
            gateway.purge_and_flush().await?;
            println!("All local data deleted");
        }
    }

    Ok(())
}

fn open_catalog(path: Option<&PathBuf>) -> Result<Box<dyn ExerciseCatalog>> {
    match path {
        Some(path) => {
            let catalog = JsonCatalog::open(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(BuiltinCatalog)),
    }
}

fn print_summary<C: Clock>(store: &AppStore<C>) {
    let summary = ActivitySummary::from_store(store);
    let analytics = Analytics::new(store.workout.history());

    println!("Activity for {}", summary.date);
    println!("{:-<40}", "");
    println!(
        "Water:    {:>5} / {} ml ({:.0}%)",
        summary.water_ml,
        summary.water_goal_ml,
        summary.water_ring()
    );
    println!(
        "Move:     {:>5} / {} kcal ({:.0}%)",
        summary.calories,
        MOVE_GOAL_KCAL,
        summary.move_ring()
    );
    println!(
        "Exercise: {:>5} / {} min ({:.0}%)",
        summary.minutes,
        EXERCISE_GOAL_MIN,
        summary.exercise_ring()
    );
    println!("Workouts today: {}", summary.workouts_today);
    println!(
        "This week: {} workouts, {} min, {} kcal",
        analytics.workouts_this_week(summary.date),
        analytics.minutes_this_week(summary.date),
        analytics.calories_this_week(summary.date)
    );
    println!("Streak: {} days", analytics.streak_days(summary.date));
    if let Some(name) = analytics.favorite_workout() {
        println!("Most done: {}", name);
    }
    println!("Favorites: {}", summary.favorites);
    if summary.session_running {
        if let Some(active) = store.workout.active() {
            println!("Running: {} ({})", active.name, format_clock(active.elapsed_secs));
        }
    }
}

/// Time a session until Ctrl-C, then complete it
async fn run_live_session<C>(mut store: AppStore<C>, name: &str) -> Result<AppStore<C>>
where
    C: Clock + Send + 'static,
{
    store.start_workout(name)?;
    println!("{} started. Press Ctrl-C to finish.", name);

    let shared = Arc::new(Mutex::new(store));
    let ticker = SessionTicker::spawn(shared.clone());
    let mut display = tokio::time::interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = display.tick() => {
                let store = shared.lock().await;
                if let Some(active) = store.workout.active() {
                    print!("\r{}  {} kcal   ", format_clock(active.elapsed_secs), active.calories);
                    std::io::stdout().flush().ok();
                }
            }
        }
    }
    println!();

    ticker.shutdown().await;
    let mut store = Arc::try_unwrap(shared)
        .map_err(|_| anyhow::anyhow!("session store still shared"))?
        .into_inner();

    tick_now(&mut store);
    let entry = store.complete_workout()?;
    println!(
        "Completed: {} - {} - {} kcal",
        entry.name,
        format_duration(entry.duration),
        entry.calories
    );
    Ok(store)
}
