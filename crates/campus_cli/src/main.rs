//! CLI probe for campus core.
//!
//! # Responsibility
//! - Verify `campus_core` linkage and seed a data directory.
//! - Run login and dashboard flows from a terminal against `CAMPUS_DATA_DIR`.

use anyhow::{anyhow, Context};
use campus_core::db::open_db;
use campus_core::store::{ensure_all, Profiles};
use campus_core::{
    AppPaths, AuthService, Dashboard, DocumentStore, EnrollmentService, GroupCard,
    JsonDocumentStore, SessionService, SqliteSessionRepository,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Local record store probe for the campus app", long_about = None)]
struct Cli {
    /// Data directory; defaults to CAMPUS_DATA_DIR or <temp>/campus
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core health and version
    Ping,
    /// Materialize every document from bundled defaults
    Seed,
    /// Sign in with email and enrollment number
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        matr: String,
    },
    /// Show the dashboard of one profile
    Dashboard {
        #[arg(long)]
        profile_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = match cli.data_dir {
        Some(dir) => AppPaths::new(dir),
        None => AppPaths::from_env(),
    };

    let log_dir = paths.log_dir();
    if let Some(log_dir) = log_dir.to_str().filter(|_| log_dir.is_absolute()) {
        campus_core::init_logging(campus_core::default_log_level(), log_dir)
            .context("failed to initialize logging")?;
    }

    let store = JsonDocumentStore::open(paths.documents_dir())
        .context("failed to open the record store")?;

    match cli.command {
        Commands::Ping => {
            println!("campus_core ping={}", campus_core::ping());
            println!("campus_core version={}", campus_core::core_version());
        }
        Commands::Seed => {
            ensure_all(&store).context("failed to seed documents")?;
            println!("seeded {}", store.root().display());
        }
        Commands::Login { email, matr } => {
            let conn = open_db(paths.session_db_path()).context("failed to open session DB")?;
            let repo = SqliteSessionRepository::try_new(&conn)?;
            let auth = AuthService::new(&store, SessionService::new(repo));
            let profile = auth.login(&email, &matr)?;
            println!(
                "signed in id={} name={} teacher={}",
                profile.id,
                profile.full_name(),
                profile.is_teacher
            );
        }
        Commands::Dashboard { profile_id } => {
            let profile = store
                .load::<Profiles>()?
                .into_iter()
                .find(|profile| profile.id == profile_id)
                .ok_or_else(|| anyhow!("profile not found: {profile_id}"))?;
            match EnrollmentService::new(&store).dashboard(&profile)? {
                Dashboard::Teacher { groups } => {
                    println!("groups taught:");
                    print_cards(&groups);
                }
                Dashboard::Student {
                    available,
                    enrolled,
                    ..
                } => {
                    println!("available:");
                    print_cards(&available);
                    println!("enrolled:");
                    print_cards(&enrolled);
                }
            }
        }
    }

    Ok(())
}

fn print_cards(cards: &[GroupCard]) {
    for card in cards {
        println!(
            "  [{}] {:>2}:00 {} ({})",
            card.group_id,
            card.schedule,
            card.subject_name.as_deref().unwrap_or("?"),
            card.teacher_name.as_deref().unwrap_or("?")
        );
    }
}
