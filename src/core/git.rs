//! Local git operations
//!
//! The VCS adapter behind the workflow engine. Read-side queries go through
//! git2; mutations shell out to the system git binary so credential helpers
//! and SSH agents keep working, and so git's own diagnostics reach the user
//! unchanged.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Repository, StatusOptions};
use tracing::debug;

use crate::error::{Result, RevueError};

/// Options for a push operation
#[derive(Debug, Clone, Copy, Default)]
pub struct PushOptions {
    /// Create the remote tracking branch if absent
    pub set_upstream: bool,
    /// Delete the remote branch instead of pushing it
    pub delete: bool,
}

/// Outcome of pulling a branch into the working tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merge (or fast-forward) completed cleanly
    #[default]
    Clean,
    /// The merge left conflict markers in the working tree
    Conflicts,
}

/// The version-control seam the workflow engine drives
///
/// Mutating calls fail with [`RevueError::VcsCommand`] carrying git's raw
/// stderr.
pub trait Vcs {
    fn current_branch(&self) -> Result<String>;
    fn list_branches(&self) -> Result<Vec<String>>;
    fn is_dirty(&self) -> Result<bool>;
    fn has_unpushed_commits(&self, branch: &str) -> Result<bool>;
    /// First line of the HEAD commit message
    fn last_commit_summary(&self) -> Result<String>;
    fn checkout(&self, branch: &str) -> Result<()>;
    fn checkout_new_branch(&self, branch: &str, from: &str) -> Result<()>;
    fn reset_hard_to(&self, reference: &str) -> Result<()>;
    fn delete_branch(&self, branch: &str) -> Result<()>;
    fn push(&self, remote: &str, branch: &str, options: PushOptions) -> Result<()>;
    fn pull(&self, remote: &str, branch: &str) -> Result<MergeOutcome>;
}

/// Wrapper for local git repository operations
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the git repository in the current directory
    pub fn open_current_dir() -> Result<Self> {
        Self::discover(".")
    }

    /// Discover a git repository from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| RevueError::NotGitRepository)?;
        Ok(Self { repo })
    }

    /// Check if the current directory is a git repository
    pub fn is_git_repository() -> bool {
        Repository::discover(".").is_ok()
    }

    /// Get the remote URL for a given remote name
    pub fn remote_url(&self, remote_name: &str) -> Result<String> {
        let remote = self.repo.find_remote(remote_name)?;
        remote
            .url()
            .map(|s| s.to_string())
            .ok_or(RevueError::NoGitHubRemote)
    }

    /// Get the origin remote URL
    pub fn origin_url(&self) -> Result<String> {
        self.remote_url("origin")
    }

    /// Get the repository root directory
    pub fn root_dir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or(RevueError::NotGitRepository)
    }

    /// Run a git subcommand in the repository root, surfacing raw stderr on
    /// failure
    fn run_git(&self, args: &[&str]) -> Result<std::process::Output> {
        debug!(command = %args.join(" "), "git:run");
        let output = Command::new("git")
            .current_dir(self.root_dir()?)
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RevueError::VcsCommand {
                command: args.join(" "),
                diagnostic: stderr.trim().to_string(),
            });
        }

        Ok(output)
    }
}

impl Vcs for GitRepository {
    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => {
                if head.is_branch() {
                    Ok(head.shorthand().unwrap_or("HEAD").to_string())
                } else {
                    // Detached HEAD state
                    Ok("HEAD".to_string())
                }
            }
            Err(e) => {
                // Unborn HEAD (no commits yet)
                if e.code() == git2::ErrorCode::UnbornBranch {
                    Ok("master".to_string())
                } else {
                    Err(e.into())
                }
            }
        }
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let branches = self.repo.branches(Some(git2::BranchType::Local))?;
        let mut names = Vec::new();

        for branch in branches {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn is_dirty(&self) -> Result<bool> {
        // Untracked files don't count: they survive a checkout and carry no
        // risk of being merged or reset away.
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn has_unpushed_commits(&self, branch: &str) -> Result<bool> {
        let local = match self
            .repo
            .revparse_single(&format!("refs/heads/{}", branch))
        {
            Ok(obj) => obj.id(),
            Err(_) => return Ok(false),
        };

        // Compare against the branch's own remote ref when it was shared;
        // a never-shared branch is measured against the remote master tip
        // (a fresh branch at that tip has nothing to lose).
        let remote = self
            .repo
            .revparse_single(&format!("refs/remotes/origin/{}", branch))
            .or_else(|_| self.repo.revparse_single("refs/remotes/origin/master"));

        let remote_oid = match remote {
            Ok(obj) => obj.id(),
            // No remote reference to compare against at all
            Err(_) => return Ok(true),
        };

        let (ahead, _) = self.repo.graph_ahead_behind(local, remote_oid)?;
        Ok(ahead > 0)
    }

    fn last_commit_summary(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.summary().unwrap_or("").trim().to_string())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run_git(&["checkout", branch])?;
        Ok(())
    }

    fn checkout_new_branch(&self, branch: &str, from: &str) -> Result<()> {
        self.run_git(&["checkout", "-b", branch, from])?;
        Ok(())
    }

    fn reset_hard_to(&self, reference: &str) -> Result<()> {
        self.run_git(&["reset", "--hard", reference])?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str) -> Result<()> {
        self.run_git(&["branch", "-D", branch])?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str, options: PushOptions) -> Result<()> {
        if options.delete {
            self.run_git(&["push", remote, "--delete", branch])?;
        } else if options.set_upstream {
            self.run_git(&["push", "--set-upstream", remote, branch])?;
        } else {
            self.run_git(&["push", remote, branch])?;
        }
        Ok(())
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<MergeOutcome> {
        let args = ["pull", remote, branch];
        debug!(command = %args.join(" "), "git:run");
        let output = Command::new("git")
            .current_dir(self.root_dir()?)
            .args(args)
            .output()?;

        if output.status.success() {
            return Ok(MergeOutcome::Clean);
        }

        // A conflicting merge exits nonzero but announces itself in the
        // output; anything else is a hard failure.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stdout.contains("CONFLICT")
            || stdout.contains("Automatic merge failed")
            || stderr.contains("CONFLICT")
        {
            debug!(branch, "git:pull finished with conflicts");
            return Ok(MergeOutcome::Conflicts);
        }

        Err(RevueError::VcsCommand {
            command: args.join(" "),
            diagnostic: stderr.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{RepositoryInitOptions, Signature};
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepository) {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();

        fs::write(dir.path().join("README.md"), "# test\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial commit", &tree, &[])
            .unwrap();
        drop(tree);
        drop(repo);

        let git = GitRepository::discover(dir.path()).unwrap();
        (dir, git)
    }

    #[test]
    fn test_current_branch_after_init() {
        let (_dir, git) = init_repo();
        assert_eq!(git.current_branch().unwrap(), "master");
    }

    #[test]
    fn test_list_branches_contains_master() {
        let (_dir, git) = init_repo();
        assert_eq!(git.list_branches().unwrap(), vec!["master".to_string()]);
    }

    #[test]
    fn test_clean_tree_is_not_dirty() {
        let (_dir, git) = init_repo();
        assert!(!git.is_dirty().unwrap());
    }

    #[test]
    fn test_untracked_file_does_not_count_as_dirty() {
        let (dir, git) = init_repo();
        fs::write(dir.path().join("scratch.txt"), "notes").unwrap();
        assert!(!git.is_dirty().unwrap());
    }

    #[test]
    fn test_modified_tracked_file_is_dirty() {
        let (dir, git) = init_repo();
        fs::write(dir.path().join("README.md"), "# changed\n").unwrap();
        assert!(git.is_dirty().unwrap());
    }

    #[test]
    fn test_last_commit_summary() {
        let (_dir, git) = init_repo();
        assert_eq!(git.last_commit_summary().unwrap(), "initial commit");
    }

    #[test]
    fn test_unpushed_with_no_remote_is_conservative() {
        let (_dir, git) = init_repo();
        // No origin refs exist; the adapter assumes commits could be lost.
        assert!(git.has_unpushed_commits("master").unwrap());
    }

    #[test]
    fn test_missing_branch_has_no_unpushed_commits() {
        let (_dir, git) = init_repo();
        assert!(!git.has_unpushed_commits("no-such-branch").unwrap());
    }
}
