//! Move CLI command handler

use crate::cli::commands::MoveArgs;
use crate::core::git::GitRepository;
use crate::core::{Config, TerminalConfirmer};
use crate::error::Result;
use crate::workflow::Workflow;

/// Handle the move command
pub fn handle_move(args: MoveArgs) -> Result<()> {
    let git = GitRepository::open_current_dir()?;
    let config = Config::load()?;
    let confirmer = TerminalConfirmer;

    let workflow = Workflow::local(&git, &confirmer, config.remote);
    workflow.move_to(&args.name)
}
