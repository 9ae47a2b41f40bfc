//! GitHub API client wrapper using octocrab

use octocrab::Octocrab;
use secrecy::ExposeSecret;

use crate::core::CredentialStore;
use crate::error::{Result, RevueError};

/// GitHub API client wrapper
///
/// Bound to one repository. The token comes from `CredentialStore`
/// (environment variable override, then the system keyring).
pub struct GitHubClient {
    /// The octocrab instance
    inner: Octocrab,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the given repository
    pub fn new(owner: String, repo: String) -> Result<Self> {
        let token = CredentialStore::get_github_token()?.ok_or(RevueError::NotAuthenticated)?;

        let octocrab = Octocrab::builder()
            .personal_token(token.expose_secret().to_string())
            .build()?;

        Ok(Self {
            inner: octocrab,
            owner,
            repo,
        })
    }

    /// Get the inner octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.inner
    }

    /// Get pulls handler for this repository
    pub fn pulls(&self) -> octocrab::pulls::PullRequestHandler<'_> {
        self.inner.pulls(&self.owner, &self.repo)
    }
}
