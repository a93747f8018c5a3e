/// Main entry point for the Dailytornado reminder daemon
///
/// This shell wires the engine to a SQLite-backed store, runs the load-time
/// integrity pass, and polls for due reminders until interrupted.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use dailytornado::{HabitEngine, Motivator, SqliteStore, SystemClock};

/// Get the default database path with a fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::data_dir().map(|mut p| {
            p.push("dailytornado");
            p
        }),
        dirs::home_dir().map(|mut p| {
            p.push(".dailytornado");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".dailytornado");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let mut db_path = potential_path.clone();
            db_path.push("tornado.db");
            return Ok(db_path);
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("dailytornado");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("tornado.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the Dailytornado reminder daemon
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's data directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("dailytornado={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Dailytornado reminder daemon");

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let store = SqliteStore::new(db_path)?;
    let engine = HabitEngine::new(store, Box::new(SystemClock), Motivator::canned());

    // Self-healing integrity pass before anything else runs
    let habits = engine.load_and_repair()?;
    info!("Loaded {} habits", habits.len());

    // Poll for due reminders until ctrl-c
    engine
        .run_reminders(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("Dailytornado reminder daemon shutdown complete");
    Ok(())
}
