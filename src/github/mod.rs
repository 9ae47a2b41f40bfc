//! GitHub API integration module
//!
//! This module provides all GitHub-related functionality:
//! - The API client
//! - Pull request management (the pull-request seam)
//! - Error classification

pub mod client;
pub mod error_handler;
pub mod pull_request;

pub use client::GitHubClient;
pub use error_handler::classify_remote_error;
pub use pull_request::{PrStatus, PrSummary, PullRequestHandler, PullRequestService};
