//! The workflow engine
//!
//! The one component with decisions in it: sequences the VCS adapter and
//! pull-request client to implement create, list, move, share, update,
//! review, and finish.

mod engine;
pub mod types;


pub use engine::{feature_name_from_title, Workflow, MASTER};
pub use types::{FeatureEntry, UpdateOutcome};
