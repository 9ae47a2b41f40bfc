//! GitHub API error detection and classification
//!
//! Parses octocrab errors into [`RevueError::RemoteCall`] with the HTTP
//! status and an actionable message where one exists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RevueError;

/// Matches the first 4xx/5xx code appearing in the error text
static STATUS_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([45]\d{2})\b").expect("Invalid status code pattern"));

/// Classify an octocrab error into a `RemoteCall` failure
///
/// The Debug format is examined because octocrab's Display only returns
/// "GitHub" for API-level failures.
pub fn classify_remote_error(err: octocrab::Error) -> RevueError {
    let error_message = format!("{:?}", err);
    let status = extract_status_code(&error_message).unwrap_or(0);

    if is_rate_limit_error(&error_message) {
        return RevueError::RemoteCall {
            status,
            message: "API rate limit exceeded. Please wait a few minutes and try again."
                .to_string(),
        };
    }

    if is_not_found_error(&error_message) {
        return RevueError::RemoteCall {
            status: if status == 0 { 404 } else { status },
            message: "Repository or pull request not found. It may be private or you may not have access."
                .to_string(),
        };
    }

    RevueError::RemoteCall {
        status,
        message: error_message,
    }
}

/// Extract an HTTP status code from the error text
fn extract_status_code(error_message: &str) -> Option<u16> {
    STATUS_CODE_PATTERN
        .captures(error_message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Check if error is a rate limit error
fn is_rate_limit_error(error_message: &str) -> bool {
    error_message.contains("rate limit")
        || (error_message.contains("403") && error_message.contains("limit exceeded"))
}

/// Check if error is a 404 not found
fn is_not_found_error(error_message: &str) -> bool {
    error_message.contains("404") || error_message.contains("Not Found")
}
