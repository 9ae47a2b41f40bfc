//! CLI command definitions using clap
//!
//! Defines the command structure for the `cr` CLI tool.

use clap::{Parser, Subcommand, ValueEnum};

/// revue - branch-per-feature workflow for git and GitHub
///
/// One branch per feature: create features, list them with their
/// pull-request status, and open or finish pull requests from the terminal.
#[derive(Parser, Debug)]
#[command(name = "cr", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List, create, or finish a feature
    Feature(FeatureArgs),

    /// Move to another feature
    Move(MoveArgs),

    /// Create or update the pull request for a feature
    Review(ReviewArgs),

    /// Push the changes of a feature to the server
    Share(ShareArgs),

    /// Pull changes from master into a feature
    Update(UpdateArgs),

    /// Authenticate with GitHub
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Workflow Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Feature arguments
#[derive(Parser, Debug)]
pub struct FeatureArgs {
    /// Feature name (omit to list features)
    pub name: Option<String>,

    /// Finish the feature instead of creating it
    #[arg(short = 'f', long)]
    pub finish: bool,

    /// Also delete the remote branch when finishing
    #[arg(short = 'r', long)]
    pub remote: bool,
}

/// Move arguments
#[derive(Parser, Debug)]
pub struct MoveArgs {
    /// Feature to switch to
    pub name: String,
}

/// Review arguments
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Feature to review (defaults to the current feature)
    pub name: Option<String>,

    /// Pull request title (prompted if omitted; an empty answer uses the
    /// last commit message)
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Approve and complete the pull request, then finish the feature
    #[arg(long)]
    pub hotfix: bool,
}

/// Share arguments
#[derive(Parser, Debug)]
pub struct ShareArgs {
    /// Feature to push (defaults to the current feature)
    pub name: Option<String>,
}

/// Update arguments
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Feature to update (defaults to the current feature)
    pub name: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication commands
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Login to GitHub with a personal access token
    Login,
    /// Logout and remove the stored token
    Logout,
    /// Show current authentication status
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Reset a configuration value to its default
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// Remote the workflow pushes to and pulls from
    #[value(name = "remote")]
    Remote,

    /// Also delete the remote branch when finishing a feature
    #[value(name = "delete-remote-on-finish")]
    DeleteRemoteOnFinish,
}
