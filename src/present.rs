//! Terminal output formatting
//!
//! Styled status lines and the feature table.

use chrono::{DateTime, Utc};
use console::style;
use tabled::{
    settings::{object::Columns, Padding, Style},
    Table, Tabled,
};

use crate::github::PrStatus;
use crate::workflow::FeatureEntry;

/// Bold success line
pub fn success(message: &str) {
    println!("{}", style(message).bold());
}

/// Plain informational line
pub fn info(message: &str) {
    println!("{}", message);
}

/// Bold yellow warning line
pub fn warn(message: &str) {
    println!("{}", style(message).yellow().bold());
}

/// Hotfix completion line
pub fn hotfix(message: &str) {
    println!(
        "{} {}",
        style("[HOTFIX]").red().bold(),
        style(message).bold()
    );
}

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "")]
    marker: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "FEATURE")]
    feature: String,
    #[tabled(rename = "PULL REQUEST")]
    title: String,
    #[tabled(rename = "UPDATED")]
    updated: String,
}

/// Render the feature table, marking the currently checked-out feature
pub fn render_feature_table(entries: &[FeatureEntry]) {
    if entries.is_empty() {
        println!("No features yet. Run 'cr feature <name>' to start one.");
        return;
    }

    let rows: Vec<FeatureRow> = entries
        .iter()
        .map(|entry| {
            let status = entry.pr.as_ref().map(|pr| pr.status).unwrap_or_default();
            let title = entry
                .pr
                .as_ref()
                .map(|pr| pr.title.clone())
                .unwrap_or_default();
            let updated = entry
                .pr
                .as_ref()
                .and_then(|pr| pr.updated_at)
                .map(format_relative_time)
                .unwrap_or_else(|| "-".to_string());

            FeatureRow {
                marker: if entry.is_current {
                    style("->").bold().to_string()
                } else {
                    String::new()
                },
                status: styled_status(status),
                feature: if entry.is_current {
                    style(entry.name.as_str()).bold().to_string()
                } else {
                    entry.name.clone()
                },
                title,
                updated,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::blank())
        .modify(Columns::new(0..4), Padding::new(0, 3, 0, 0));

    println!("{table}");
}

fn styled_status(status: PrStatus) -> String {
    let label = status.describe();
    match status {
        PrStatus::Open => style(label).yellow().to_string(),
        PrStatus::Approved => style(label).green().to_string(),
        PrStatus::Merged => style(label).cyan().to_string(),
        PrStatus::None => label.to_string(),
    }
}

/// Format a datetime as relative time (e.g., "2 hours ago")
fn format_relative_time(dt: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(dt);

    if duration.num_days() > 30 {
        dt.format("%Y-%m-%d").to_string()
    } else if duration.num_days() > 0 {
        format!("{} days ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{} hours ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{} minutes ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now), "just now");
        assert_eq!(
            format_relative_time(now - Duration::minutes(5)),
            "5 minutes ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::hours(3)),
            "3 hours ago"
        );
        assert_eq!(format_relative_time(now - Duration::days(2)), "2 days ago");
    }

    #[test]
    fn test_old_dates_render_absolute() {
        let old = Utc::now() - Duration::days(90);
        let rendered = format_relative_time(old);
        assert!(!rendered.contains("ago"));
        assert!(rendered.contains('-'));
    }
}
