//! Efficiency score.

use log::debug;

use super::{patterns, FlowAdvisor};
use crate::{
    catalog::Catalog,
    error::Result,
    models::{
        suggestion::{
            DIVERSITY_POINTS_MAX, DIVERSITY_POINTS_PER_CATEGORY, PATTERN_POINTS,
            PROFILE_POINTS_MAX,
        },
        ActionHistory, EfficiencyBreakdown, ProfileState,
    },
};

impl FlowAdvisor {
    /// Efficiency score in `0..=100`.
    ///
    /// Profile completion contributes up to 40 points, distinct categories
    /// touched up to 30, and following any catalog pattern 30.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` if the catalog is invalid.
    pub fn compute_efficiency_score(
        &self,
        profile: &ProfileState,
        history: &ActionHistory,
        catalog: &Catalog,
    ) -> Result<u8> {
        Ok(self.efficiency_breakdown(profile, history, catalog)?.total())
    }

    /// The components behind [`FlowAdvisor::compute_efficiency_score`].
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` if the catalog is invalid.
    pub fn efficiency_breakdown(
        &self,
        profile: &ProfileState,
        history: &ActionHistory,
        catalog: &Catalog,
    ) -> Result<EfficiencyBreakdown> {
        let matched_patterns = self.matched_patterns(history, catalog)?;

        let completion = u32::from(profile.completion_percentage().min(100));
        let profile_points = u8::try_from(completion * u32::from(PROFILE_POINTS_MAX) / 100)
            .unwrap_or(PROFILE_POINTS_MAX);

        let categories = history.categories_touched().len();
        let diversity_points = u8::try_from(categories)
            .unwrap_or(u8::MAX)
            .saturating_mul(DIVERSITY_POINTS_PER_CATEGORY)
            .min(DIVERSITY_POINTS_MAX);

        let pattern_points = if matched_patterns.is_empty() {
            0
        } else {
            PATTERN_POINTS
        };

        let breakdown = EfficiencyBreakdown {
            profile_points,
            diversity_points,
            pattern_points,
            matched_patterns,
        };
        debug!("efficiency breakdown: {breakdown:?}");
        Ok(breakdown)
    }

    /// Names of the catalog patterns the history follows, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` if the catalog is invalid.
    pub fn matched_patterns(
        &self,
        history: &ActionHistory,
        catalog: &Catalog,
    ) -> Result<Vec<String>> {
        catalog.validate()?;
        Ok(patterns::matched_patterns(history, catalog)
            .into_iter()
            .map(|p| p.name.clone())
            .collect())
    }
}
