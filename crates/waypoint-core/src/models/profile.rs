//! Profile completion snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flags every new agent profile is tracked against.
pub const STANDARD_FLAGS: [&str; 4] = ["basic_info", "contact_info", "bio", "social_links"];

/// Snapshot of a user's profile setup.
///
/// The completion percentage is always derived from the flags and never
/// stored, so it cannot drift from its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileState {
    /// Tracked flags keyed by name
    flags: BTreeMap<String, bool>,
}

impl ProfileState {
    /// Creates a profile tracking the standard flags, all unset.
    pub fn new() -> Self {
        Self {
            flags: STANDARD_FLAGS
                .iter()
                .map(|flag| ((*flag).to_string(), false))
                .collect(),
        }
    }

    /// Creates a profile tracking the standard flags plus `extra`, all unset.
    pub fn tracking<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut profile = Self::new();
        for flag in extra {
            profile.flags.entry(flag.into()).or_insert(false);
        }
        profile
    }

    /// Creates a profile tracking the standard flags with the given ones set.
    ///
    /// Names outside the standard set are tracked as well; untrusted input
    /// goes through [`crate::params::Snapshot::resolve`], which rejects them.
    pub fn with_flags<I, S>(set: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut profile = Self::new();
        for flag in set {
            profile.set(flag, true);
        }
        profile
    }

    /// Sets a flag, starting to track it if needed.
    pub fn set(&mut self, flag: impl Into<String>, value: bool) {
        self.flags.insert(flag.into(), value);
    }

    /// Whether the named flag is tracked and set.
    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    /// Whether the named flag is tracked at all.
    pub fn tracks(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    /// Percentage of tracked flags that are set, rounded down. A profile
    /// tracking nothing is 0% complete.
    pub fn completion_percentage(&self) -> u8 {
        let total = self.flags.len();
        if total == 0 {
            return 0;
        }
        let set = self.flags.values().filter(|v| **v).count();
        // set <= total, so this never exceeds 100
        u8::try_from(set * 100 / total).unwrap_or(100)
    }

    /// Whether every tracked flag is set.
    pub fn is_complete(&self) -> bool {
        !self.flags.is_empty() && self.flags.values().all(|v| *v)
    }

    /// Unset flags, in name order.
    pub fn missing_flags(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|(_, set)| !**set)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate over all tracked flags in name order.
    pub fn flags(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, set)| (name.as_str(), *set))
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::new()
    }
}
