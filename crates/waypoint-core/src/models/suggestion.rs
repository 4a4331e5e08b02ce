//! Advisory view-models produced by the advisor.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ActionCategory;

/// Urgency of a suggested action.
///
/// Variants are declared most urgent first, so the derived `Ord` sorts
/// `High` before `Medium` before `Low`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Unblocked and next on a usage path the user is following
    High,

    /// Unblocked but not linked to recent activity
    Medium,

    /// Blocked by at least one unmet prerequisite
    Low,
}

impl Priority {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Get priority with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::Priority;
    ///
    /// assert_eq!(Priority::High.with_icon(), "▲ High");
    /// assert_eq!(Priority::Low.with_icon(), "▽ Low");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Priority::High => "▲ High",
            Priority::Medium => "◆ Medium",
            Priority::Low => "▽ Low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

/// A prerequisite that does not currently hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnmetPrerequisite {
    /// Human-readable reason the action is blocked
    pub reason: String,

    /// Action id that resolves the blocker, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

/// One entry in the ordered next-step list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NextStepSuggestion {
    /// Catalog id of the suggested action
    pub action_id: String,

    /// Display title of the action
    pub title: String,

    /// Category of the action
    pub category: ActionCategory,

    /// Computed urgency
    pub priority: Priority,

    /// Expected effort
    pub estimated_minutes: u32,

    /// Blockers in catalog order; empty when the action can run now
    #[serde(default)]
    pub unmet_prerequisites: Vec<UnmetPrerequisite>,

    /// Why the action is suggested now
    pub rationale: String,
}

impl NextStepSuggestion {
    /// An action is executable only when nothing blocks it.
    pub fn is_executable(&self) -> bool {
        self.unmet_prerequisites.is_empty()
    }
}

/// Answer to a point query about a single action's prerequisites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrerequisiteCheck {
    /// Catalog id that was checked
    pub action_id: String,

    /// True when every prerequisite holds
    pub satisfied: bool,

    /// Unmet prerequisites in catalog order
    #[serde(default)]
    pub unmet: Vec<UnmetPrerequisite>,
}

/// Contextual help for an action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextualHelp {
    pub action_id: String,
    pub title: String,
    pub estimated_minutes: u32,
    pub help: Option<String>,
    /// What currently blocks the action
    pub blocking: Vec<UnmetPrerequisite>,
}

/// Maximum points from profile completion.
pub const PROFILE_POINTS_MAX: u8 = 40;
/// Points for each distinct category touched.
pub const DIVERSITY_POINTS_PER_CATEGORY: u8 = 10;
/// Maximum points from category diversity.
pub const DIVERSITY_POINTS_MAX: u8 = 30;
/// Points for adopting at least one catalog pattern.
pub const PATTERN_POINTS: u8 = 30;

/// Components of the efficiency score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EfficiencyBreakdown {
    /// Linear in profile completion, 0..=40
    pub profile_points: u8,

    /// Distinct categories touched, 0..=30
    pub diversity_points: u8,

    /// 30 when any pattern was followed, otherwise 0
    pub pattern_points: u8,

    /// Names of the patterns the history matches
    #[serde(default)]
    pub matched_patterns: Vec<String>,
}

impl EfficiencyBreakdown {
    /// Sum of the components, clamped to 0..=100.
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.profile_points)
            + u16::from(self.diversity_points)
            + u16::from(self.pattern_points);
        u8::try_from(sum.min(100)).unwrap_or(100)
    }
}
