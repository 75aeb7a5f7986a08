use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handoff::session::{self, SessionOutcome};
use handoff::snapshot;

#[derive(Parser)]
#[command(name = "handoff")]
#[command(about = "Session handoff notes for AI-assisted development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a CONTEXT_STATE.md snapshot of the current project state
    Snapshot {
        /// Target project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Refresh .claude/CONTINUE_WORK.md, preserving user-authored sections
    Session {
        /// Target project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Initialize tracing to stderr so stdout carries only the result line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "handoff=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot { dir } => match snapshot::generate(&dir).await {
            Ok(_) => {
                println!("✓ Generated {}", snapshot::SNAPSHOT_FILE);
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("✗ Failed to generate {}: {}", snapshot::SNAPSHOT_FILE, e);
                ExitCode::FAILURE
            }
        },
        Commands::Session { dir } => match session::update(&dir).await {
            Ok(SessionOutcome::Updated(_)) => {
                println!(
                    "✓ Updated {}/{}",
                    session::SESSION_DIR,
                    session::SESSION_FILE
                );
                ExitCode::SUCCESS
            }
            // Not a tracked project; intentionally quiet so the hook can run
            // unconditionally.
            Ok(SessionOutcome::Skipped) => ExitCode::SUCCESS,
            Err(e) => {
                println!("✗ Failed to update {}: {}", session::SESSION_FILE, e);
                ExitCode::FAILURE
            }
        },
    }
}
