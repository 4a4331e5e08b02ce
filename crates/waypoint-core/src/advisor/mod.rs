//! Next-step guidance over a profile snapshot and action history.
//!
//! [`FlowAdvisor`] answers four kinds of query:
//!
//! - [`FlowAdvisor::suggest_next_steps`]: ordered suggestions for every
//!   catalog action the user has not completed
//! - [`FlowAdvisor::check_prerequisites`]: whether one action is unblocked
//! - [`FlowAdvisor::explain`]: contextual help for one action
//! - [`FlowAdvisor::compute_efficiency_score`]: a 0-100 summary of profile
//!   completion, category diversity and pattern adoption
//!
//! The advisor holds no state. Every query is a pure function of its
//! arguments, validates the catalog before doing anything else, and either
//! returns a complete answer or an error.
//!
//! # Priority policy
//!
//! ```text
//!   unmet prerequisites? ──yes──▶ low
//!          │ no
//!          ▼
//!   next on a pattern the user    ──yes──▶ high
//!   is following (recent step
//!   or unstarted entry point)?
//!          │ no
//!          ▼
//!        medium
//! ```
//!
//! Suggestions are ordered by priority, then by ascending estimated
//! minutes, then by catalog position.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{models::{ActionHistory, Priority, ProfileState}, Catalog, FlowAdvisor};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::builtin()?;
//! let advisor = FlowAdvisor::new();
//!
//! let suggestions = advisor.suggest_next_steps(
//!     &ProfileState::new(),
//!     &ActionHistory::default(),
//!     &catalog,
//! )?;
//! assert_eq!(suggestions[0].action_id, "profile-setup");
//! assert_eq!(suggestions[0].priority, Priority::High);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use log::debug;

use crate::{
    catalog::{Catalog, CatalogEntry},
    error::Result,
    models::{
        ActionHistory, ContextualHelp, NextStepSuggestion, PrerequisiteCheck, Priority,
        ProfileState,
    },
};

mod patterns;
mod prerequisites;
mod score;

#[cfg(test)]
mod tests;

/// Stateless advisor producing next-step guidance.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowAdvisor;

impl FlowAdvisor {
    /// Creates a new advisor.
    pub fn new() -> Self {
        Self
    }

    /// Ordered suggestions for every catalog action not yet completed.
    ///
    /// Blocked actions are still returned, at `low` priority with their
    /// unmet prerequisites attached.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` if the catalog is invalid,
    /// including when its prerequisite graph has a cycle.
    pub fn suggest_next_steps(
        &self,
        profile: &ProfileState,
        history: &ActionHistory,
        catalog: &Catalog,
    ) -> Result<Vec<NextStepSuggestion>> {
        catalog.validate()?;

        let recent = history.recent_ids(catalog.policy.recent_actions);
        let mut ranked: Vec<(usize, NextStepSuggestion)> = catalog
            .actions
            .iter()
            .enumerate()
            .filter(|(_, entry)| !history.is_completed(&entry.id))
            .map(|(position, entry)| {
                (position, Self::suggest(entry, profile, history, &recent, catalog))
            })
            .collect();

        ranked.sort_by(|(pa, a), (pb, b)| {
            a.priority
                .cmp(&b.priority)
                .then(a.estimated_minutes.cmp(&b.estimated_minutes))
                .then(pa.cmp(pb))
        });

        debug!(
            "suggested {} of {} actions ({} completed)",
            ranked.len(),
            catalog.actions.len(),
            history.completed_count()
        );
        Ok(ranked.into_iter().map(|(_, s)| s).collect())
    }

    /// Checks whether a single action's prerequisites hold.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::UnknownAction` if `action_id` is not in the
    /// catalog, or `AdvisorError::Configuration` if the catalog is invalid.
    pub fn check_prerequisites(
        &self,
        action_id: &str,
        profile: &ProfileState,
        history: &ActionHistory,
        catalog: &Catalog,
    ) -> Result<PrerequisiteCheck> {
        catalog.validate()?;
        let entry = catalog.require(action_id)?;
        let unmet = prerequisites::unmet_prerequisites(entry, profile, history);

        debug!("{action_id}: {} unmet prerequisites", unmet.len());
        Ok(PrerequisiteCheck {
            action_id: entry.id.clone(),
            satisfied: unmet.is_empty(),
            unmet,
        })
    }

    /// Contextual help for an action, with whatever currently blocks it.
    ///
    /// # Errors
    ///
    /// Same as [`FlowAdvisor::check_prerequisites`].
    pub fn explain(
        &self,
        action_id: &str,
        profile: &ProfileState,
        history: &ActionHistory,
        catalog: &Catalog,
    ) -> Result<ContextualHelp> {
        catalog.validate()?;
        let entry = catalog.require(action_id)?;

        Ok(ContextualHelp {
            action_id: entry.id.clone(),
            title: entry.title.clone(),
            estimated_minutes: entry.estimated_minutes,
            help: entry.help.clone(),
            blocking: prerequisites::unmet_prerequisites(entry, profile, history),
        })
    }

    fn suggest(
        entry: &CatalogEntry,
        profile: &ProfileState,
        history: &ActionHistory,
        recent: &[&str],
        catalog: &Catalog,
    ) -> NextStepSuggestion {
        let unmet = prerequisites::unmet_prerequisites(entry, profile, history);

        let (priority, rationale) = if unmet.is_empty() {
            match patterns::pattern_link(&entry.id, history, recent, catalog) {
                Some(link) => (Priority::High, link.rationale()),
                None => (Priority::Medium, "Ready to start".to_string()),
            }
        } else {
            let noun = if unmet.len() == 1 {
                "prerequisite"
            } else {
                "prerequisites"
            };
            (Priority::Low, format!("Blocked by {} unmet {noun}", unmet.len()))
        };

        NextStepSuggestion {
            action_id: entry.id.clone(),
            title: entry.title.clone(),
            category: entry.category,
            priority,
            estimated_minutes: entry.estimated_minutes,
            unmet_prerequisites: unmet,
            rationale,
        }
    }
}
