//! Pull request operations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::error::{Result, RevueError};
use crate::github::client::GitHubClient;

/// Status of a feature's pull request as observed by the workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrStatus {
    /// No pull request, or only closed-unmerged ones
    #[default]
    None,
    /// An open pull request exists
    Open,
    /// Open and carrying an approving review
    Approved,
    /// Merged into master
    Merged,
}

impl PrStatus {
    /// Short label for the feature table
    pub fn describe(&self) -> &'static str {
        match self {
            PrStatus::None => "-",
            PrStatus::Open => "open",
            PrStatus::Approved => "approved",
            PrStatus::Merged => "merged",
        }
    }
}

/// Per-branch pull-request summary for the feature table
#[derive(Debug, Clone)]
pub struct PrSummary {
    pub status: PrStatus,
    pub title: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The pull-request seam the workflow engine drives
#[allow(async_fn_in_trait)]
pub trait PullRequestService {
    /// Per-branch status for the given branches, fetched in one batched call
    async fn statuses(&self, branches: &[String]) -> Result<HashMap<String, PrSummary>>;

    /// Whether the branch has an open pull request
    async fn has_active(&self, branch: &str) -> Result<bool>;

    /// Create a pull request for the branch; returns its number
    async fn open(&self, branch: &str, base: &str, title: &str) -> Result<u64>;

    /// Approve and complete the open pull request for the branch
    async fn approve(&self, branch: &str) -> Result<()>;
}

/// One query for the whole feature table. The REST pull list cannot report
/// review decisions, so the batched lookup goes through GraphQL.
const STATUS_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: 100, states: [OPEN, CLOSED, MERGED],
                 orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        headRefName
        state
        reviewDecision
        title
        updatedAt
      }
    }
  }
}
"#;

/// Pull request operations handler
pub struct PullRequestHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> PullRequestHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Find the number of the open pull request whose head is `branch`
    async fn find_open(&self, branch: &str) -> Result<Option<u64>> {
        let page = self
            .client
            .pulls()
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100)
            .send()
            .await?;

        Ok(page
            .items
            .iter()
            .find(|pr| pr.head.ref_field == branch)
            .map(|pr| pr.number))
    }
}

impl PullRequestService for PullRequestHandler<'_> {
    async fn statuses(&self, branches: &[String]) -> Result<HashMap<String, PrSummary>> {
        let payload = json!({
            "query": STATUS_QUERY,
            "variables": { "owner": &self.client.owner, "name": &self.client.repo },
        });

        let response: serde_json::Value = self.client.octocrab().graphql(&payload).await?;
        let nodes = response
            .pointer("/data/repository/pullRequests/nodes")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let map = summaries_from_nodes(&nodes, branches);
        debug!(
            requested = branches.len(),
            matched = map.len(),
            "pr:statuses fetched"
        );
        Ok(map)
    }

    async fn has_active(&self, branch: &str) -> Result<bool> {
        Ok(self.find_open(branch).await?.is_some())
    }

    async fn open(&self, branch: &str, base: &str, title: &str) -> Result<u64> {
        let pr = self
            .client
            .pulls()
            .create(title, branch, base)
            .send()
            .await?;

        debug!(branch, number = pr.number, "pr:created");
        Ok(pr.number)
    }

    async fn approve(&self, branch: &str) -> Result<()> {
        let number = self.find_open(branch).await?.ok_or_else(|| {
            RevueError::RemoteCall {
                status: 404,
                message: format!("no open pull request found for branch '{}'", branch),
            }
        })?;

        // GitHub rejects approving your own pull request; the review is
        // best-effort and the merge is what completes the hotfix.
        let route = format!(
            "/repos/{}/{}/pulls/{}/reviews",
            self.client.owner, self.client.repo, number
        );
        let body = json!({ "event": "APPROVE" });
        let review: std::result::Result<serde_json::Value, octocrab::Error> =
            self.client.octocrab().post(&route, Some(&body)).await;
        if let Err(e) = review {
            debug!(branch, number, error = %e, "pr:approve review rejected, merging anyway");
        }

        self.client
            .pulls()
            .merge(number)
            .method(octocrab::params::pulls::MergeMethod::Merge)
            .send()
            .await?;

        debug!(branch, number, "pr:completed");
        Ok(())
    }
}

/// Fold the query's newest-first nodes into one summary per requested branch
fn summaries_from_nodes(
    nodes: &[serde_json::Value],
    branches: &[String],
) -> HashMap<String, PrSummary> {
    let mut map = HashMap::new();

    for node in nodes {
        let Some(head) = node["headRefName"].as_str() else {
            continue;
        };
        // Newest-first ordering: the first pull request seen per branch wins
        if !branches.iter().any(|b| b == head) || map.contains_key(head) {
            continue;
        }

        let state = node["state"].as_str().unwrap_or("");
        let review = node["reviewDecision"].as_str().unwrap_or("");
        let status = match state {
            "MERGED" => PrStatus::Merged,
            "OPEN" if review == "APPROVED" => PrStatus::Approved,
            "OPEN" => PrStatus::Open,
            _ => PrStatus::None,
        };

        let updated_at = node["updatedAt"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        map.insert(
            head.to_string(),
            PrSummary {
                status,
                title: node["title"].as_str().unwrap_or("").to_string(),
                updated_at,
            },
        );
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(head: &str, state: &str, review: Option<&str>, title: &str) -> serde_json::Value {
        json!({
            "headRefName": head,
            "state": state,
            "reviewDecision": review,
            "title": title,
            "updatedAt": "2024-05-01T12:00:00Z",
        })
    }

    fn branches(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_state_mapping() {
        let nodes = vec![
            node("a", "OPEN", None, "A"),
            node("b", "OPEN", Some("APPROVED"), "B"),
            node("c", "MERGED", None, "C"),
            node("d", "CLOSED", None, "D"),
        ];
        let map = summaries_from_nodes(&nodes, &branches(&["a", "b", "c", "d"]));

        assert_eq!(map["a"].status, PrStatus::Open);
        assert_eq!(map["b"].status, PrStatus::Approved);
        assert_eq!(map["c"].status, PrStatus::Merged);
        assert_eq!(map["d"].status, PrStatus::None);
    }

    #[test]
    fn test_newest_pull_request_wins() {
        // Nodes arrive newest-first from the query
        let nodes = vec![
            node("a", "OPEN", None, "reopened"),
            node("a", "CLOSED", None, "first try"),
        ];
        let map = summaries_from_nodes(&nodes, &branches(&["a"]));

        assert_eq!(map["a"].status, PrStatus::Open);
        assert_eq!(map["a"].title, "reopened");
    }

    #[test]
    fn test_unrequested_branches_are_skipped() {
        let nodes = vec![node("other", "OPEN", None, "X")];
        let map = summaries_from_nodes(&nodes, &branches(&["a"]));
        assert!(map.is_empty());
    }

    #[test]
    fn test_updated_at_parses() {
        let nodes = vec![node("a", "OPEN", None, "A")];
        let map = summaries_from_nodes(&nodes, &branches(&["a"]));
        assert!(map["a"].updated_at.is_some());
    }
}
