//! Feature CLI command handler
//!
//! `cr feature` dispatches on its arguments: no name lists, a name creates,
//! `--finish` finishes.

use crate::cli::commands::FeatureArgs;
use crate::core::git::GitRepository;
use crate::core::repository::RepositoryContext;
use crate::core::{Config, TerminalConfirmer};
use crate::error::Result;
use crate::github::{GitHubClient, PullRequestHandler};
use crate::present;
use crate::workflow::Workflow;

/// Handle the feature command
pub async fn handle_feature(args: FeatureArgs) -> Result<()> {
    let git = GitRepository::open_current_dir()?;
    let config = Config::load()?;
    let confirmer = TerminalConfirmer;

    if args.finish {
        let repo_ctx = RepositoryContext::detect()?;
        let client = GitHubClient::new(repo_ctx.owner.clone(), repo_ctx.name.clone())?;
        let prs = PullRequestHandler::new(&client);

        let workflow = Workflow::new(&git, &prs, &confirmer, config.remote.clone());
        let delete_remote = args.remote || config.delete_remote_on_finish;
        workflow.finish(args.name.as_deref(), delete_remote).await
    } else if let Some(name) = &args.name {
        let workflow = Workflow::local(&git, &confirmer, config.remote.clone());
        workflow.create(name)
    } else {
        let repo_ctx = RepositoryContext::detect()?;
        let client = GitHubClient::new(repo_ctx.owner.clone(), repo_ctx.name.clone())?;
        let prs = PullRequestHandler::new(&client);

        let workflow = Workflow::new(&git, &prs, &confirmer, config.remote.clone());
        let entries = workflow.list().await?;
        present::render_feature_table(&entries);
        Ok(())
    }
}
