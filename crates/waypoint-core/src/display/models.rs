//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it richly and MCP clients can
//! pass it through unchanged.

use std::fmt;

use crate::{
    catalog::{CatalogEntry, Pattern},
    models::{
        suggestion::{DIVERSITY_POINTS_MAX, PATTERN_POINTS, PROFILE_POINTS_MAX},
        ActionCategory, ContextualHelp, EfficiencyBreakdown, NextStepSuggestion,
        PrerequisiteCheck, Priority, UnmetPrerequisite,
    },
};

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for UnmetPrerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.remediation {
            Some(target) => writeln!(f, "- {} (see `{target}`)", self.reason),
            None => writeln!(f, "- {}", self.reason),
        }
    }
}

impl fmt::Display for NextStepSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}: {} ({})",
            self.action_id,
            self.title,
            self.priority.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Estimate: {} min", self.estimated_minutes)?;
        writeln!(f, "- Why: {}", self.rationale)?;
        writeln!(f)?;

        if !self.unmet_prerequisites.is_empty() {
            writeln!(f, "#### Blocked by")?;
            writeln!(f)?;
            for unmet in &self.unmet_prerequisites {
                write!(f, "{unmet}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PrerequisiteCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.satisfied {
            writeln!(f, "# {}: ✓ Ready", self.action_id)?;
            writeln!(f)?;
            writeln!(f, "All prerequisites are met.")?;
        } else {
            writeln!(f, "# {}: ✗ Blocked", self.action_id)?;
            writeln!(f)?;
            for unmet in &self.unmet {
                write!(f, "{unmet}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ContextualHelp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({})", self.title, self.action_id)?;
        writeln!(f)?;
        writeln!(f, "- Estimate: {} min", self.estimated_minutes)?;

        if let Some(help) = &self.help {
            writeln!(f)?;
            writeln!(f, "{help}")?;
        }

        if !self.blocking.is_empty() {
            writeln!(f, "\n## Before you start")?;
            writeln!(f)?;
            for unmet in &self.blocking {
                write!(f, "{unmet}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for EfficiencyBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Efficiency score: {}/100", self.total())?;
        writeln!(f)?;
        writeln!(
            f,
            "- Profile completion: {}/{PROFILE_POINTS_MAX}",
            self.profile_points
        )?;
        writeln!(
            f,
            "- Category diversity: {}/{DIVERSITY_POINTS_MAX}",
            self.diversity_points
        )?;
        writeln!(f, "- Pattern adoption: {}/{PATTERN_POINTS}", self.pattern_points)?;
        if !self.matched_patterns.is_empty() {
            writeln!(f, "- Patterns followed: {}", self.matched_patterns.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}: {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- **Category**: {}", self.category)?;
        writeln!(f, "- **Estimate**: {} min", self.estimated_minutes)?;
        for prerequisite in &self.prerequisites {
            writeln!(f, "- **Requires**: {}", prerequisite.reason)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}**: {}", self.name, self.steps.join(" → "))
    }
}
