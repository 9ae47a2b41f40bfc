//! The workflow engine
//!
//! Sequences VCS and pull-request operations to implement the
//! branch-per-feature workflow. Every operation validates its preconditions
//! before the first mutating call; once a mutation is issued, a failure is
//! surfaced verbatim and nothing is rolled back.

use crate::core::confirm::Confirmer;
use crate::core::git::{MergeOutcome, PushOptions, Vcs};
use crate::error::{Result, RevueError};
use crate::github::PullRequestService;
use crate::present;
use crate::workflow::types::{FeatureEntry, UpdateOutcome};

/// The branch every feature is cut from and merged back into
pub const MASTER: &str = "master";

/// Derive a branch-safe feature name from a pull-request title
pub fn feature_name_from_title(title: &str) -> Result<String> {
    let name = slug::slugify(title);
    if name.is_empty() {
        return Err(RevueError::InvalidInput(format!(
            "Cannot derive a feature name from '{}'",
            title
        )));
    }
    Ok(name)
}

/// Orchestrates one workflow operation over the injected seams
///
/// Operations that never touch the pull-request service place no bound on
/// `P`, so commands that stay local can run without credentials
/// (`Workflow::local`, `P = ()`).
pub struct Workflow<'a, V, P, C> {
    vcs: &'a V,
    prs: &'a P,
    confirmer: &'a C,
    remote: String,
}

impl<'a, V, P, C> Workflow<'a, V, P, C> {
    pub fn new(vcs: &'a V, prs: &'a P, confirmer: &'a C, remote: impl Into<String>) -> Self {
        Self {
            vcs,
            prs,
            confirmer,
            remote: remote.into(),
        }
    }
}

impl<'a, V, C> Workflow<'a, V, (), C> {
    /// Workflow for operations that never touch the pull-request service
    pub fn local(vcs: &'a V, confirmer: &'a C, remote: impl Into<String>) -> Self {
        Self::new(vcs, &(), confirmer, remote)
    }
}

impl<V: Vcs, P, C> Workflow<'_, V, P, C> {
    fn ensure_clean(&self) -> Result<()> {
        if self.vcs.is_dirty()? {
            return Err(RevueError::DirtyWorkingTree);
        }
        Ok(())
    }

    fn ensure_exists(&self, name: &str) -> Result<()> {
        if !self.vcs.list_branches()?.iter().any(|b| b == name) {
            return Err(RevueError::FeatureNotFound(name.to_string()));
        }
        Ok(())
    }

    /// A given name must exist; no name means the current feature
    fn resolve(&self, name: Option<&str>) -> Result<String> {
        match name {
            Some(n) => {
                self.ensure_exists(n)?;
                Ok(n.to_string())
            }
            None => self.vcs.current_branch(),
        }
    }

    /// Start a new feature cut from the remote master tip
    ///
    /// Fast-forwarding the local master is a deliberate side effect.
    pub fn create(&self, name: &str) -> Result<()> {
        self.ensure_clean()?;
        if self.vcs.list_branches()?.iter().any(|b| b == name) {
            return Err(RevueError::FeatureExists(name.to_string()));
        }

        self.vcs.checkout(MASTER)?;
        self.vcs
            .reset_hard_to(&format!("{}/{}", self.remote, MASTER))?;
        self.vcs.checkout_new_branch(name, MASTER)?;

        present::success("New feature created successfully");
        Ok(())
    }

    /// Switch to another feature
    pub fn move_to(&self, name: &str) -> Result<()> {
        self.ensure_clean()?;
        self.ensure_exists(name)?;
        self.vcs.checkout(name)?;

        present::success(&format!("Moved to feature {}", name));
        Ok(())
    }

    /// Push a feature upstream, creating the remote branch if absent
    pub fn share(&self, name: Option<&str>, silent: bool) -> Result<()> {
        let branch = self.resolve(name)?;
        if branch == MASTER {
            return Err(RevueError::InvalidInput(
                "You cannot push changes on master".to_string(),
            ));
        }

        self.vcs.push(
            &self.remote,
            &branch,
            PushOptions {
                set_upstream: true,
                ..Default::default()
            },
        )?;

        if !silent {
            present::success("Feature shared successfully");
        }
        Ok(())
    }

    /// Pull master into the current branch
    ///
    /// Conflicts are reported as a warning, not a failure; the conflict
    /// warning prints even in silent mode.
    pub fn update(&self, silent: bool) -> Result<UpdateOutcome> {
        match self.vcs.pull(&self.remote, MASTER)? {
            MergeOutcome::Clean => {
                if !silent {
                    present::success("Feature successfully updated");
                }
                Ok(UpdateOutcome::Clean)
            }
            MergeOutcome::Conflicts => {
                present::warn("Feature updated but conflicts were found");
                present::info(
                    "Fix them up in the work tree, and then use 'git add/rm <file>' as appropriate",
                );
                Ok(UpdateOutcome::Conflicts)
            }
        }
    }
}

impl<V: Vcs, P: PullRequestService, C: Confirmer> Workflow<'_, V, P, C> {
    /// All features except master, with their pull-request status from one
    /// batched remote call
    pub async fn list(&self) -> Result<Vec<FeatureEntry>> {
        let current = self.vcs.current_branch()?;
        let features: Vec<String> = self
            .vcs
            .list_branches()?
            .into_iter()
            .filter(|b| b != MASTER)
            .collect();

        if features.is_empty() {
            return Ok(Vec::new());
        }

        let mut statuses = self.prs.statuses(&features).await?;

        Ok(features
            .into_iter()
            .map(|name| FeatureEntry {
                is_current: name == current,
                pr: statuses.remove(&name),
                name,
            })
            .collect())
    }

    /// Delete a finished feature, moving back to master first if needed
    pub async fn finish(&self, name: Option<&str>, delete_remote: bool) -> Result<()> {
        let branch = self.resolve(name)?;
        self.ensure_clean()?;
        if branch == MASTER {
            return Err(RevueError::InvalidInput(
                "You cannot finish your master feature".to_string(),
            ));
        }
        if self.prs.has_active(&branch).await? {
            return Err(RevueError::ActivePullRequest(branch));
        }
        if self.vcs.has_unpushed_commits(&branch)?
            && !self
                .confirmer
                .confirm("You have unpushed commits on this branch.")?
        {
            return Err(RevueError::Cancelled);
        }

        if self.vcs.current_branch()? == branch {
            self.move_to(MASTER)?;
        }

        self.vcs.delete_branch(&branch)?;
        if delete_remote {
            self.vcs.push(
                &self.remote,
                &branch,
                PushOptions {
                    delete: true,
                    ..Default::default()
                },
            )?;
        }

        if self.vcs.current_branch()? == MASTER {
            present::info("Updating master");
            self.update(true)?;
        }

        present::success(&format!("Finished feature {}", branch));
        Ok(())
    }

    /// Open or refresh the feature's pull request
    ///
    /// On master, a feature is first derived from the title (or the last
    /// commit message) and created. With `hotfix`, the pull request is
    /// approved and completed on the remote and the feature finished with
    /// remote deletion.
    pub async fn review(&self, name: Option<&str>, title: Option<&str>, hotfix: bool) -> Result<()> {
        let mut branch = self.resolve(name)?;

        if branch == MASTER {
            let source = match title {
                Some(t) => t.to_string(),
                None => self.vcs.last_commit_summary()?,
            };
            branch = feature_name_from_title(&source)?;
            self.create(&branch)?;
        }

        self.share(Some(&branch), true)?;

        if !self.prs.has_active(&branch).await? {
            let mut pr_title = match title {
                Some(t) => t.to_string(),
                None => self.vcs.last_commit_summary()?,
            };
            if hotfix {
                pr_title = format!("[HOTFIX] {}", pr_title);
            }
            self.prs.open(&branch, MASTER, &pr_title).await?;
            present::success("Pull request successfully created");
        } else {
            // Re-sharing plus the status check is the whole "update"; the
            // remote has no separate edit call.
            present::success("Pull request successfully updated");
        }

        if hotfix {
            self.prs.approve(&branch).await?;
            present::hotfix("Pull request successfully merged into master");
            self.finish(Some(&branch), true).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::feature_name_from_title;

    #[test]
    fn test_title_becomes_branch_safe_name() {
        assert_eq!(feature_name_from_title("Add foo").unwrap(), "add-foo");
        assert_eq!(
            feature_name_from_title("Fix: crash on empty input!").unwrap(),
            "fix-crash-on-empty-input"
        );
    }

    #[test]
    fn test_unusable_title_is_rejected() {
        assert!(feature_name_from_title("").is_err());
        assert!(feature_name_from_title("!!!").is_err());
    }
}
