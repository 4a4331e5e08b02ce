//! Collection wrapper types for displaying groups of advisory output.

use std::{fmt, ops::Index};

use jiff::Timestamp;

use super::datetime::LocalDateTime;
use crate::{catalog::Catalog, models::NextStepSuggestion};

/// Wrapper for displaying an ordered suggestion list.
///
/// The optional generation time is shown in the header only; it has no
/// influence on the suggestions themselves.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{
///     display::Suggestions,
///     models::{ActionCategory, NextStepSuggestion, Priority},
/// };
///
/// let suggestions = Suggestions::new(vec![NextStepSuggestion {
///     action_id: "profile-setup".to_string(),
///     title: "Complete your agent profile".to_string(),
///     category: ActionCategory::Profile,
///     priority: Priority::High,
///     estimated_minutes: 10,
///     unmet_prerequisites: vec![],
///     rationale: "Starts the 'onboarding' path".to_string(),
/// }]);
/// let output = suggestions.to_string();
/// assert!(output.contains("1 ready"));
/// assert!(output.contains("profile-setup"));
/// ```
pub struct Suggestions {
    pub items: Vec<NextStepSuggestion>,
    pub generated_at: Option<Timestamp>,
}

impl Suggestions {
    /// Wrap an ordered suggestion list.
    pub fn new(items: Vec<NextStepSuggestion>) -> Self {
        Self {
            items,
            generated_at: None,
        }
    }

    /// Show a generation time in the header.
    pub fn generated_at(mut self, at: Option<Timestamp>) -> Self {
        self.generated_at = at;
        self
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of suggestions in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Get an iterator over the suggestions.
    pub fn iter(&self) -> std::slice::Iter<'_, NextStepSuggestion> {
        self.items.iter()
    }
}

impl Index<usize> for Suggestions {
    type Output = NextStepSuggestion;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Suggestions {
    type Item = &'a NextStepSuggestion;
    type IntoIter = std::slice::Iter<'a, NextStepSuggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Suggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "No next steps: every catalog action is complete.");
        }

        let ready = self.items.iter().filter(|s| s.is_executable()).count();
        writeln!(f, "# Next steps")?;
        writeln!(f)?;
        writeln!(
            f,
            "{ready} ready, {} blocked",
            self.items.len() - ready
        )?;
        if let Some(at) = &self.generated_at {
            writeln!(f, "As of {}", LocalDateTime(at))?;
        }
        writeln!(f)?;

        for suggestion in &self.items {
            write!(f, "{suggestion}")?;
        }
        Ok(())
    }
}

/// Wrapper for displaying the full catalog.
pub struct CatalogListing<'a>(pub &'a Catalog);

impl fmt::Display for CatalogListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Actions")?;
        writeln!(f)?;
        if self.0.actions.is_empty() {
            writeln!(f, "No actions found.")?;
        }
        for entry in &self.0.actions {
            write!(f, "{entry}")?;
        }

        if !self.0.patterns.is_empty() {
            writeln!(f, "# Patterns")?;
            writeln!(f)?;
            for pattern in &self.0.patterns {
                write!(f, "{pattern}")?;
            }
        }
        Ok(())
    }
}
