//! Share CLI command handler

use crate::cli::commands::ShareArgs;
use crate::core::git::GitRepository;
use crate::core::{Config, TerminalConfirmer};
use crate::error::Result;
use crate::workflow::Workflow;

/// Handle the share command
pub fn handle_share(args: ShareArgs) -> Result<()> {
    let git = GitRepository::open_current_dir()?;
    let config = Config::load()?;
    let confirmer = TerminalConfirmer;

    let workflow = Workflow::local(&git, &confirmer, config.remote);
    workflow.share(args.name.as_deref(), false)
}
