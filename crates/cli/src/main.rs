use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travelog_core::config::clock_from_env_value;
use travelog_core::constants::UTC_OFFSET_ENV;
use travelog_core::{CoreConfig, MarkdownService};

mod commands;

#[derive(Parser)]
#[command(name = "travelog")]
#[command(about = "Travel log document tool")]
struct Cli {
    /// UTC offset for rendered timestamps, e.g. +09:00 (defaults to TRAVELOG_UTC_OFFSET, then
    /// the host's local zone)
    #[arg(long, global = true)]
    utc_offset: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a document as JSON
    Parse {
        file: PathBuf,
        /// Sort checkins chronologically
        #[arg(long)]
        sorted: bool,
    },
    /// Print (or rewrite) a document in canonical form
    Format {
        file: PathBuf,
        /// Rewrite the file in place
        #[arg(long)]
        write: bool,
    },
    /// Report field violations
    Validate { file: PathBuf },
    /// Create a new document with no checkins
    New {
        file: PathBuf,
        title: String,
        /// Trip date label, e.g. 2024-01-27–30
        date: String,
    },
    /// Insert or replace a checkin from a JSON file
    Upsert {
        file: PathBuf,
        /// Path to the checkin JSON
        checkin: PathBuf,
    },
    /// Remove a checkin by id
    Remove { file: PathBuf, checkin_id: String },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("travelog=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let offset = cli
        .utc_offset
        .or_else(|| std::env::var(UTC_OFFSET_ENV).ok());
    let cfg = CoreConfig::new(clock_from_env_value(offset)?);
    let service = MarkdownService::from_config(&cfg);

    match cli.command {
        Some(Commands::Parse { file, sorted }) => {
            println!("{}", commands::parse_file(&service, &file, sorted)?);
        }
        Some(Commands::Format { file, write }) => {
            let text = commands::format_file(&service, &file, write)?;
            if !write {
                print!("{}", text);
            }
        }
        Some(Commands::Validate { file }) => {
            let violations = commands::validate_file(&service, &file)?;
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("{}", violation);
                }
                bail!("{} has {} violation(s)", file.display(), violations.len());
            }
            println!("{} is valid", file.display());
        }
        Some(Commands::New { file, title, date }) => {
            commands::new_file(&service, &file, &title, &date)?;
            println!("Created {}", file.display());
        }
        Some(Commands::Upsert { file, checkin }) => {
            let json = std::fs::read_to_string(&checkin)
                .with_context(|| format!("failed to read {}", checkin.display()))?;
            let (id, replaced) = commands::upsert_file(&service, &file, &json)?;
            if replaced {
                println!("Replaced checkin {}", id);
            } else {
                println!("Added checkin {}", id);
            }
        }
        Some(Commands::Remove { file, checkin_id }) => {
            if commands::remove_file(&service, &file, &checkin_id)? {
                println!("Removed checkin {}", checkin_id);
            } else {
                tracing::warn!("no checkin with id {} in {}", checkin_id, file.display());
            }
        }
        None => {
            println!("Use 'travelog --help' for commands");
        }
    }

    Ok(())
}
