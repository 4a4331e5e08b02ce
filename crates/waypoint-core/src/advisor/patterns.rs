//! Pattern detection and recency linkage.

use jiff::Timestamp;

use crate::{
    catalog::{Catalog, Pattern},
    models::ActionHistory,
};

/// Why an action is linked to a pattern the user is following.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternLink<'a> {
    /// First step of a pattern none of whose steps are done yet
    Starts(&'a Pattern),

    /// Next step after a recently completed one
    Follows {
        pattern: &'a Pattern,
        previous: &'a str,
    },
}

impl PatternLink<'_> {
    pub(crate) fn rationale(&self) -> String {
        match self {
            PatternLink::Starts(pattern) => {
                format!("Starts the '{}' path", pattern.name)
            }
            PatternLink::Follows { pattern, previous } => {
                format!("Follows '{previous}' on the '{}' path", pattern.name)
            }
        }
    }
}

impl Pattern {
    /// Whether the history covers every step with first completions in
    /// non-decreasing time order.
    pub fn is_matched_by(&self, history: &ActionHistory) -> bool {
        let mut previous: Option<Timestamp> = None;
        for step in &self.steps {
            let Some(at) = history.first_completed_at(step) else {
                return false;
            };
            if previous.is_some_and(|p| at < p) {
                return false;
            }
            previous = Some(at);
        }
        !self.steps.is_empty()
    }

    fn is_started(&self, history: &ActionHistory) -> bool {
        self.steps.iter().any(|s| history.is_completed(s))
    }
}

/// Finds the pattern linkage for `action_id`.
///
/// A recent predecessor wins over a pattern entry point; within each kind
/// the first pattern in catalog order wins.
pub(crate) fn pattern_link<'a>(
    action_id: &str,
    history: &ActionHistory,
    recent: &[&str],
    catalog: &'a Catalog,
) -> Option<PatternLink<'a>> {
    let mut entry_point = None;

    for (pattern, position) in catalog.patterns_containing(action_id) {
        if position == 0 {
            if entry_point.is_none() && !pattern.is_started(history) {
                entry_point = Some(PatternLink::Starts(pattern));
            }
            continue;
        }

        let previous = pattern.steps[position - 1].as_str();
        if history.is_completed(previous) && recent.contains(&previous) {
            return Some(PatternLink::Follows { pattern, previous });
        }
    }

    entry_point
}

/// Catalog patterns the history matches, in catalog order.
pub(crate) fn matched_patterns<'a>(history: &ActionHistory, catalog: &'a Catalog) -> Vec<&'a Pattern> {
    catalog
        .patterns
        .iter()
        .filter(|p| p.is_matched_by(history))
        .collect()
}
