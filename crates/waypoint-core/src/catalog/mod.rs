//! Static action catalog: actions, their prerequisites, and usage patterns.
//!
//! The catalog is the single declarative source for what an agent can do in
//! the application, what blocks each action, and which ordered paths through
//! the actions are common. It is loaded once by the host (see
//! [`CatalogLoader`]) and passed by reference into every advisor query.
//!
//! # Document format
//!
//! ```json
//! {
//!   "actions": [
//!     { "id": "profile-setup", "title": "Complete your profile",
//!       "category": "profile", "estimated_minutes": 10 },
//!     { "id": "blog-post", "title": "Write a blog post",
//!       "category": "content", "estimated_minutes": 20,
//!       "prerequisites": [
//!         { "requirement": { "kind": "profile_complete" },
//!           "reason": "Finish your profile first",
//!           "remediation": "profile-setup" }
//!       ] }
//!   ],
//!   "flags": ["headshot"],
//!   "patterns": [
//!     { "name": "onboarding", "steps": ["profile-setup", "blog-post"] }
//!   ],
//!   "policy": { "recent_actions": 3 }
//! }
//! ```

use std::collections::HashMap;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AdvisorError, Result},
    models::{ActionCategory, ProfileState},
};

pub mod loader;
mod validate;

pub use loader::{CatalogLoader, BUILTIN_CATALOG};

/// Condition that must hold before an action is unblocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// A single profile flag must be set
    ProfileFlag { flag: String },

    /// Every tracked profile flag must be set
    ProfileComplete,

    /// Profile completion must reach a percentage
    MinCompletion { percent: u8 },

    /// Another catalog action must have been completed
    ActionCompleted { action: String },
}

impl Requirement {
    /// The action this requirement depends on, if any.
    pub fn depends_on(&self) -> Option<&str> {
        match self {
            Requirement::ActionCompleted { action } => Some(action.as_str()),
            _ => None,
        }
    }
}

/// One ordered predicate in an action's prerequisite rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Prerequisite {
    /// The condition to check
    pub requirement: Requirement,

    /// Shown to the user while the condition does not hold
    pub reason: String,

    /// Action id that resolves the condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

/// An action available in the application.
///
/// The ordered `prerequisites` list is the action's prerequisite rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CatalogEntry {
    /// Stable key, matched against `ActionRecord::id`
    pub id: String,

    /// Display title
    pub title: String,

    pub category: ActionCategory,

    /// Expected effort; must be positive
    pub estimated_minutes: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<Prerequisite>,

    /// Contextual help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl CatalogEntry {
    /// Ids of the actions this entry requires, in rule order.
    pub fn depends_on(&self) -> impl Iterator<Item = &str> {
        self.prerequisites
            .iter()
            .filter_map(|p| p.requirement.depends_on())
    }
}

/// A common ordered path through the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Pattern {
    pub name: String,

    /// Action ids in the order they are usually completed
    pub steps: Vec<String>,
}

impl Pattern {
    /// Position of `action_id` within the pattern.
    pub fn position(&self, action_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s == action_id)
    }
}

/// Default size of the recency window.
pub const DEFAULT_RECENT_ACTIONS: usize = 3;

/// Tunable policy constants for the advisor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AdvisorPolicy {
    /// A pattern step counts as recent when it is among this many most
    /// recent completions
    #[serde(default = "default_recent_actions")]
    pub recent_actions: usize,
}

fn default_recent_actions() -> usize {
    DEFAULT_RECENT_ACTIONS
}

impl Default for AdvisorPolicy {
    fn default() -> Self {
        Self {
            recent_actions: DEFAULT_RECENT_ACTIONS,
        }
    }
}

/// The full static catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Catalog {
    pub actions: Vec<CatalogEntry>,

    /// Profile flags tracked in addition to the standard ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,

    #[serde(default)]
    pub patterns: Vec<Pattern>,

    #[serde(default)]
    pub policy: AdvisorPolicy,
}

impl Catalog {
    /// Parses and validates a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` if the document is malformed or
    /// fails validation.
    pub fn from_json(document: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(document)
            .map_err(|e| AdvisorError::configuration(format!("malformed catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Looks up an action by id.
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Looks up an action by id, failing for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::UnknownAction` if `id` is not in the catalog.
    pub fn require(&self, id: &str) -> Result<&CatalogEntry> {
        self.entry(id).ok_or_else(|| AdvisorError::unknown_action(id))
    }

    /// An empty profile tracking every flag this catalog knows.
    pub fn empty_profile(&self) -> ProfileState {
        ProfileState::tracking(&self.flags)
    }

    /// Patterns that include `action_id`, with its position in each.
    pub fn patterns_containing(&self, action_id: &str) -> Vec<(&Pattern, usize)> {
        self.patterns
            .iter()
            .filter_map(|p| p.position(action_id).map(|i| (p, i)))
            .collect()
    }

    /// Index from action id to catalog position.
    pub(crate) fn index(&self) -> HashMap<&str, usize> {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.as_str(), i))
            .collect()
    }
}
