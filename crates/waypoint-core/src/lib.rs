//! Core library for Waypoint, next-step guidance for agent marketing
//! workflows.
//!
//! Given a snapshot of an agent's profile, the actions they have completed,
//! and a static catalog of what the application offers, the
//! [`FlowAdvisor`] works out what to do next, what blocks each action, and
//! how efficiently the agent is using the product.
//!
//! - **Models** ([`models`]): profile and action snapshots, advisory output
//! - **Catalog** ([`catalog`]): declarative actions, prerequisites and
//!   usage patterns, with load-time validation
//! - **Advisor** ([`advisor`]): the stateless decision logic
//! - **Params** ([`params`]): interface-neutral request structures
//! - **Display** ([`display`]): markdown rendering of every result
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{params::Snapshot, CatalogLoader, FlowAdvisor};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = CatalogLoader::new().without_user_config().load()?;
//!
//! let snapshot = Snapshot::from_json(r#"{"flags": ["basic_info"], "completed": []}"#)?;
//! let (profile, history) = snapshot.resolve(&catalog)?;
//!
//! let advisor = FlowAdvisor::new();
//! for suggestion in advisor.suggest_next_steps(&profile, &history, &catalog)? {
//!     println!("{} ({})", suggestion.title, suggestion.priority);
//! }
//!
//! let check = advisor.check_prerequisites("blog-post", &profile, &history, &catalog)?;
//! assert!(!check.satisfied);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod advisor;
pub mod catalog;
pub mod display;
pub mod error;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use advisor::FlowAdvisor;
pub use catalog::{
    AdvisorPolicy, Catalog, CatalogEntry, CatalogLoader, Pattern, Prerequisite, Requirement,
};
pub use display::{CatalogListing, OperationStatus, Suggestions};
pub use error::{AdvisorError, Result};
pub use models::{
    ActionCategory, ActionHistory, ActionRecord, ContextualHelp, EfficiencyBreakdown,
    NextStepSuggestion, PrerequisiteCheck, Priority, ProfileState,
};
pub use params::{ActionQuery, CompletedAction, Snapshot};
