//! Custom error types for revue
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the revue application
#[derive(Error, Debug)]
pub enum RevueError {
    /// Not running in a git repository
    #[error("This directory is not a git repository.\n\n  → Run 'git init' to create one, or navigate to an existing git project.")]
    NotGitRepository,

    /// No GitHub remote found
    #[error("No GitHub remote found in this repository.\n\n  → Make sure 'origin' points to a GitHub URL.\n  → Run 'git remote -v' to check your remotes.")]
    NoGitHubRemote,

    /// Invalid GitHub URL format
    #[error("Cannot parse GitHub URL: {0}\n\n  → Expected format: https://github.com/owner/repo or git@github.com:owner/repo")]
    InvalidGitHubUrl(String),

    /// User is not authenticated
    #[error("You are not logged in to GitHub.\n\n  → Run 'cr auth login' to authenticate.")]
    NotAuthenticated,

    /// Authentication process failed
    #[error("GitHub authentication failed: {0}\n\n  → Try running 'cr auth login' again.")]
    AuthenticationFailed(String),

    /// The working tree has uncommitted changes
    #[error("Your working tree has uncommitted changes.\n\n  → Commit or stash them before running this command.")]
    DirtyWorkingTree,

    /// A feature with the requested name already exists
    #[error("A feature named '{0}' already exists.\n\n  → Run 'cr move {0}' to switch to it.")]
    FeatureExists(String),

    /// No feature with the requested name exists
    #[error("Feature '{0}' not found.\n\n  → Run 'cr feature' to list your features.")]
    FeatureNotFound(String),

    /// An open pull request blocks finishing the feature
    #[error("You have an active pull request on '{0}'.\n\n  → Complete it or abandon it to continue.")]
    ActivePullRequest(String),

    /// A git subcommand exited nonzero; carries git's raw diagnostic text
    #[error("git {command} failed:\n{diagnostic}")]
    VcsCommand { command: String, diagnostic: String },

    /// A pull-request service call failed
    #[error("Pull request service call failed (HTTP {status}): {message}")]
    RemoteCall { status: u16, message: String },

    /// Git operation error
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Operation cancelled by user
    #[error("Operation cancelled.")]
    Cancelled,
}

impl From<keyring::Error> for RevueError {
    fn from(err: keyring::Error) -> Self {
        RevueError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for RevueError {
    fn from(err: toml::de::Error) -> Self {
        RevueError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for RevueError {
    fn from(err: toml::ser::Error) -> Self {
        RevueError::Toml(err.to_string())
    }
}

impl From<octocrab::Error> for RevueError {
    fn from(err: octocrab::Error) -> Self {
        crate::github::error_handler::classify_remote_error(err)
    }
}

/// Result type alias using RevueError
pub type Result<T> = std::result::Result<T, RevueError>;
