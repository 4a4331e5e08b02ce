//! Data models for profile snapshots, actions and advisory output.
//!
//! Inputs ([`ProfileState`], [`ActionHistory`]) are caller-supplied snapshots
//! built fresh for every query. Outputs ([`NextStepSuggestion`],
//! [`PrerequisiteCheck`], [`ContextualHelp`], [`EfficiencyBreakdown`]) are
//! plain view-models; their markdown rendering lives in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{ActionCategory, ActionHistory, ActionRecord, ProfileState};
//! use jiff::Timestamp;
//!
//! let mut profile = ProfileState::new();
//! assert_eq!(profile.completion_percentage(), 0);
//! profile.set("basic_info", true);
//! profile.set("bio", true);
//! assert_eq!(profile.completion_percentage(), 50);
//!
//! let history = ActionHistory::new(vec![ActionRecord::completed(
//!     "profile-setup",
//!     ActionCategory::Profile,
//!     Timestamp::UNIX_EPOCH,
//! )]);
//! assert!(history.is_completed("profile-setup"));
//! ```

pub mod action;
pub mod profile;
pub mod suggestion;


pub use action::{ActionCategory, ActionHistory, ActionRecord};
pub use profile::{ProfileState, STANDARD_FLAGS};
pub use suggestion::{
    ContextualHelp, EfficiencyBreakdown, NextStepSuggestion, PrerequisiteCheck, Priority,
    UnmetPrerequisite,
};
