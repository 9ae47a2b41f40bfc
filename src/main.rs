//! revue - branch-per-feature workflow for git and GitHub
//!
//! Available as the `cr` command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use revue::cli::commands::{Cli, Commands};
use revue::cli::{auth, config, feature, move_to, review, share, update};
use revue::core::git::GitRepository;
use revue::error::{Result, RevueError};

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Auth and config commands don't require a git repository
        Commands::Auth(args) => auth::handle_auth(args.command).await,
        Commands::Config(args) => config::handle_config(args.command),

        // All other commands do
        command => {
            ensure_git_repository()?;

            match command {
                Commands::Feature(args) => feature::handle_feature(args).await,
                Commands::Move(args) => move_to::handle_move(args),
                Commands::Review(args) => review::handle_review(args).await,
                Commands::Share(args) => share::handle_share(args),
                Commands::Update(args) => update::handle_update(args),
                Commands::Auth(_) | Commands::Config(_) => unreachable!(),
            }
        }
    }
}

/// Ensure we're in a git repository
fn ensure_git_repository() -> Result<()> {
    if !GitRepository::is_git_repository() {
        return Err(RevueError::NotGitRepository);
    }
    Ok(())
}
