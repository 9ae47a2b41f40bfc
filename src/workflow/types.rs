use crate::github::PrSummary;

/// One feature branch as shown by the list view
#[derive(Debug, Clone)]
pub struct FeatureEntry {
    /// Branch name
    pub name: String,
    /// Whether this is the currently checked-out feature
    pub is_current: bool,
    /// Pull-request summary, if the feature has one
    pub pr: Option<PrSummary>,
}

/// Result of pulling master into the current feature
///
/// Conflicts are a recognized soft failure: the command still exits
/// successfully and the user resolves them in the work tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Clean,
    Conflicts,
}
