//! Action records and the completed-action history.

use std::{collections::BTreeSet, str::FromStr};

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Area of the application an action belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    /// Profile and account setup
    Profile,

    /// Brand strategy and marketing plans
    Marketing,

    /// Generated content (listings, blog posts, social posts)
    Content,

    /// Market and competitor research
    Analysis,
}

impl ActionCategory {
    /// All categories, in declaration order.
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::Profile,
        ActionCategory::Marketing,
        ActionCategory::Content,
        ActionCategory::Analysis,
    ];

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Profile => "profile",
            ActionCategory::Marketing => "marketing",
            ActionCategory::Content => "content",
            ActionCategory::Analysis => "analysis",
        }
    }
}

impl FromStr for ActionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ActionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| {
                let expected: Vec<&str> = ActionCategory::ALL.iter().map(|c| c.as_str()).collect();
                format!(
                    "Invalid action category: {s} (expected one of: {})",
                    expected.join(", ")
                )
            })
    }
}

/// A completed or available application action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    /// Stable catalog key of the action
    pub id: String,

    /// Category the action belongs to
    pub category: ActionCategory,

    /// When the action was completed; absent while still available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl ActionRecord {
    /// Record for an action completed at `at`.
    pub fn completed(id: impl Into<String>, category: ActionCategory, at: Timestamp) -> Self {
        Self {
            id: id.into(),
            category,
            completed_at: Some(at),
        }
    }

    /// Record for an action that is available but not yet completed.
    pub fn available(id: impl Into<String>, category: ActionCategory) -> Self {
        Self {
            id: id.into(),
            category,
            completed_at: None,
        }
    }

    /// Whether the action has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Caller-supplied snapshot of action records.
///
/// Only records carrying a completion timestamp count as completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ActionHistory(pub Vec<ActionRecord>);

impl ActionHistory {
    /// Creates a history from records.
    pub fn new(records: Vec<ActionRecord>) -> Self {
        Self(records)
    }

    /// Whether any record marks `id` as completed.
    pub fn is_completed(&self, id: &str) -> bool {
        self.0.iter().any(|r| r.id == id && r.is_completed())
    }

    /// Earliest completion time recorded for `id`.
    pub fn first_completed_at(&self, id: &str) -> Option<Timestamp> {
        self.0
            .iter()
            .filter(|r| r.id == id)
            .filter_map(|r| r.completed_at)
            .min()
    }

    /// Completed records in completion order. Equal timestamps keep their
    /// position in the history.
    pub fn completion_order(&self) -> Vec<&ActionRecord> {
        let mut completed: Vec<&ActionRecord> =
            self.0.iter().filter(|r| r.is_completed()).collect();
        // stable sort keeps history order for ties
        completed.sort_by_key(|r| r.completed_at);
        completed
    }

    /// Ids of the last `n` completions, most recent last.
    pub fn recent_ids(&self, n: usize) -> Vec<&str> {
        let order = self.completion_order();
        let skip = order.len().saturating_sub(n);
        order.into_iter().skip(skip).map(|r| r.id.as_str()).collect()
    }

    /// Distinct categories touched by completed actions.
    pub fn categories_touched(&self) -> BTreeSet<ActionCategory> {
        self.0
            .iter()
            .filter(|r| r.is_completed())
            .map(|r| r.category)
            .collect()
    }

    /// Number of completed records.
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|r| r.is_completed()).count()
    }

    /// Get an iterator over all records.
    pub fn iter(&self) -> std::slice::Iter<'_, ActionRecord> {
        self.0.iter()
    }
}

impl From<Vec<ActionRecord>> for ActionHistory {
    fn from(records: Vec<ActionRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a ActionHistory {
    type Item = &'a ActionRecord;
    type IntoIter = std::slice::Iter<'a, ActionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
