//! Prerequisite evaluation against a profile and action history.

use crate::{
    catalog::{CatalogEntry, Prerequisite, Requirement},
    models::{ActionHistory, ProfileState, UnmetPrerequisite},
};

impl Requirement {
    /// Whether the requirement holds for the given snapshot.
    pub fn holds(&self, profile: &ProfileState, history: &ActionHistory) -> bool {
        match self {
            Requirement::ProfileFlag { flag } => profile.is_set(flag),
            Requirement::ProfileComplete => profile.is_complete(),
            Requirement::MinCompletion { percent } => profile.completion_percentage() >= *percent,
            Requirement::ActionCompleted { action } => history.is_completed(action),
        }
    }
}

impl Prerequisite {
    /// Reason shown to the user, with snapshot details appended where they
    /// help explain what is missing.
    fn describe(&self, profile: &ProfileState) -> String {
        match &self.requirement {
            Requirement::ProfileComplete => {
                let missing = profile.missing_flags();
                if missing.is_empty() {
                    self.reason.clone()
                } else {
                    format!("{} (missing: {})", self.reason, missing.join(", "))
                }
            }
            Requirement::ProfileFlag { flag } => format!("{} (missing: {flag})", self.reason),
            Requirement::MinCompletion { percent } => format!(
                "{} (profile {}% complete, needs {percent}%)",
                self.reason,
                profile.completion_percentage()
            ),
            Requirement::ActionCompleted { .. } => self.reason.clone(),
        }
    }
}

/// Unmet prerequisites of `entry`, in rule order.
pub(crate) fn unmet_prerequisites(
    entry: &CatalogEntry,
    profile: &ProfileState,
    history: &ActionHistory,
) -> Vec<UnmetPrerequisite> {
    entry
        .prerequisites
        .iter()
        .filter(|p| !p.requirement.holds(profile, history))
        .map(|p| UnmetPrerequisite {
            reason: p.describe(profile),
            remediation: p.remediation.clone(),
        })
        .collect()
}
