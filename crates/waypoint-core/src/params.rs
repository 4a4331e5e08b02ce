//! Parameter structures for advisor queries
//!
//! These structures are shared by every interface (CLI, MCP) and keep
//! framework-specific derives out of the core models. Interface layers either
//! build them from their own argument types or deserialize them directly.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (Snapshot, ...) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! A [`Snapshot`] is the wire form of a user's state: plain flag names and
//! completion records with RFC 3339 timestamps. [`Snapshot::resolve`] turns it
//! into the typed [`ProfileState`] and [`ActionHistory`] the advisor consumes,
//! using the catalog to fill in categories.

use jiff::{SignedDuration, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    error::{AdvisorError, Result},
    models::{ActionHistory, ActionRecord, ProfileState},
};

/// A completed action as supplied by a host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompletedAction {
    /// Catalog id of the completed action
    pub id: String,

    /// RFC 3339 completion time. Completions without one are ordered as
    /// given, before any timed completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl CompletedAction {
    /// Parses `ID` or `ID@TIMESTAMP`.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('@') {
            Some((id, at)) => Self {
                id: id.trim().to_string(),
                completed_at: Some(at.trim().to_string()),
            },
            None => Self {
                id: spec.trim().to_string(),
                completed_at: None,
            },
        }
    }
}

/// Caller-supplied user state for a single query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Snapshot {
    /// Profile flags that are set (e.g. basic_info, contact_info, bio,
    /// social_links)
    #[serde(default)]
    pub flags: Vec<String>,

    /// Actions the user has completed
    #[serde(default)]
    pub completed: Vec<CompletedAction>,
}

impl Snapshot {
    /// Parses a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Serialization` if the document is not a valid
    /// snapshot.
    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Resolves the snapshot into advisor inputs.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::UnknownAction` for completions the catalog does
    /// not know, and `AdvisorError::InvalidInput` for profile flags that are
    /// neither standard nor declared by the catalog, or for unparseable
    /// timestamps.
    pub fn resolve(&self, catalog: &Catalog) -> Result<(ProfileState, ActionHistory)> {
        let mut profile = catalog.empty_profile();
        for flag in &self.flags {
            let flag = flag.trim();
            if !profile.tracks(flag) {
                let known: Vec<&str> = profile.flags().map(|(name, _)| name).collect();
                return Err(AdvisorError::invalid_input("flags").with_reason(format!(
                    "unknown profile flag '{flag}', expected one of: {}",
                    known.join(", ")
                )));
            }
            profile.set(flag, true);
        }

        let mut records = Vec::with_capacity(self.completed.len());
        for (position, completed) in self.completed.iter().enumerate() {
            let entry = catalog.require(&completed.id)?;
            let at = match &completed.completed_at {
                Some(text) => text.parse::<Timestamp>().map_err(|e| {
                    AdvisorError::invalid_input("completed_at")
                        .with_reason(format!("'{text}' for '{}': {e}", completed.id))
                })?,
                None => untimed(position)?,
            };
            records.push(ActionRecord::completed(&entry.id, entry.category, at));
        }

        Ok((profile, ActionHistory::new(records)))
    }
}

fn untimed(position: usize) -> Result<Timestamp> {
    let offset = i64::try_from(position).unwrap_or(i64::MAX);
    Timestamp::UNIX_EPOCH
        .checked_add(SignedDuration::from_secs(offset))
        .map_err(|e| AdvisorError::invalid_input("completed").with_reason(e.to_string()))
}

/// Parameters for queries about a single action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ActionQuery {
    /// Catalog id of the action
    pub action_id: String,

    #[serde(flatten)]
    pub snapshot: Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionCategory;

    #[test]
    fn test_parse_completed_action() {
        assert_eq!(
            CompletedAction::parse("blog-post@2024-03-01T10:00:00Z"),
            CompletedAction {
                id: "blog-post".to_string(),
                completed_at: Some("2024-03-01T10:00:00Z".to_string()),
            }
        );
        assert_eq!(CompletedAction::parse(" blog-post ").completed_at, None);
    }

    #[test]
    fn test_resolve_snapshot() {
        let catalog = Catalog::builtin().unwrap();
        let snapshot = Snapshot::from_json(
            r#"{
                "flags": ["basic_info", "bio"],
                "completed": [
                    {"id": "profile-setup", "completed_at": "2024-03-01T10:00:00Z"},
                    {"id": "market-analysis"}
                ]
            }"#,
        )
        .unwrap();

        let (profile, history) = snapshot.resolve(&catalog).unwrap();
        assert_eq!(profile.completion_percentage(), 50);
        assert!(history.is_completed("profile-setup"));
        assert!(history.is_completed("market-analysis"));
        let order: Vec<&str> = history
            .completion_order()
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        // untimed completions sort before timed ones
        assert_eq!(order, vec!["market-analysis", "profile-setup"]);
        assert_eq!(history.0[1].category, ActionCategory::Analysis);
    }

    #[test]
    fn test_resolve_unknown_action() {
        let catalog = Catalog::builtin().unwrap();
        let snapshot = Snapshot {
            flags: vec![],
            completed: vec![CompletedAction::parse("open-house")],
        };
        assert!(matches!(
            snapshot.resolve(&catalog),
            Err(AdvisorError::UnknownAction { .. })
        ));
    }

    #[test]
    fn test_resolve_bad_timestamp() {
        let catalog = Catalog::builtin().unwrap();
        let snapshot = Snapshot {
            flags: vec![],
            completed: vec![CompletedAction::parse("blog-post@yesterday")],
        };
        let err = snapshot.resolve(&catalog).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidInput { .. }));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_resolve_rejects_unknown_flags() {
        let catalog = Catalog::builtin().unwrap();
        for flags in [vec!["basic_info", "headshot"], vec!["Bio"], vec!["x"]] {
            let snapshot = Snapshot {
                flags: flags.iter().map(|f| (*f).to_string()).collect(),
                completed: vec![],
            };
            let err = snapshot.resolve(&catalog).unwrap_err();
            assert!(matches!(err, AdvisorError::InvalidInput { ref field, .. } if field == "flags"));
            assert!(err.to_string().contains("unknown profile flag"));
        }
    }

    #[test]
    fn test_resolve_tracks_declared_flags() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog.flags.push("headshot".to_string());

        let snapshot = Snapshot {
            flags: vec!["headshot".to_string()],
            completed: vec![],
        };
        let (profile, _) = snapshot.resolve(&catalog).unwrap();
        assert!(profile.is_set("headshot"));
        // one of five tracked flags
        assert_eq!(profile.completion_percentage(), 20);

        let (profile, _) = Snapshot::default().resolve(&catalog).unwrap();
        assert_eq!(profile.completion_percentage(), 0);
        assert!(profile.tracks("headshot"));
    }

    #[test]
    fn test_malformed_snapshot() {
        assert!(matches!(
            Snapshot::from_json("{\"flags\": 3}"),
            Err(AdvisorError::Serialization { .. })
        ));
    }

    #[test]
    fn test_action_query_flattens_snapshot() {
        let query: ActionQuery = serde_json::from_str(
            r#"{"action_id": "blog-post", "flags": ["bio"], "completed": []}"#,
        )
        .unwrap();
        assert_eq!(query.action_id, "blog-post");
        assert_eq!(query.snapshot.flags, vec!["bio".to_string()]);
    }
}
