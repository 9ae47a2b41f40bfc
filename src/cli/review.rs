//! Review CLI command handler

use std::io::{self, Write};

use crate::cli::commands::ReviewArgs;
use crate::core::git::GitRepository;
use crate::core::repository::RepositoryContext;
use crate::core::{Config, TerminalConfirmer};
use crate::error::Result;
use crate::github::{GitHubClient, PullRequestHandler};
use crate::workflow::Workflow;

/// Handle the review command
pub async fn handle_review(args: ReviewArgs) -> Result<()> {
    let git = GitRepository::open_current_dir()?;
    let config = Config::load()?;
    let confirmer = TerminalConfirmer;

    let repo_ctx = RepositoryContext::detect()?;
    let client = GitHubClient::new(repo_ctx.owner.clone(), repo_ctx.name.clone())?;
    let prs = PullRequestHandler::new(&client);

    let title = match args.title {
        Some(t) => Some(t),
        None => prompt_title()?,
    };

    let workflow = Workflow::new(&git, &prs, &confirmer, config.remote.clone());
    workflow
        .review(args.name.as_deref(), title.as_deref(), args.hotfix)
        .await
}

/// Ask for a title; an empty answer means "use the last commit message"
fn prompt_title() -> Result<Option<String>> {
    print!("Title of pull request (leave empty to use the last commit message): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}
