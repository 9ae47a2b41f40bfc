//! Update CLI command handler

use crate::cli::commands::UpdateArgs;
use crate::core::git::{GitRepository, Vcs};
use crate::core::{Config, TerminalConfirmer};
use crate::error::Result;
use crate::workflow::Workflow;

/// Handle the update command
///
/// A conflicting merge is a soft failure: the warning is printed by the
/// engine and the command still exits successfully.
pub fn handle_update(args: UpdateArgs) -> Result<()> {
    let git = GitRepository::open_current_dir()?;
    let config = Config::load()?;
    let confirmer = TerminalConfirmer;

    let workflow = Workflow::local(&git, &confirmer, config.remote);

    // A named feature is updated in place: switch to it first.
    if let Some(name) = &args.name {
        if *name != git.current_branch()? {
            workflow.move_to(name)?;
        }
    }

    workflow.update(false)?;
    Ok(())
}
