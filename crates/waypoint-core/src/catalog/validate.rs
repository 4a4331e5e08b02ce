//! Catalog integrity checks.

use std::collections::HashSet;

use log::debug;

use super::{Catalog, Requirement};
use crate::{
    error::{AdvisorError, Result},
    models::STANDARD_FLAGS,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl Catalog {
    /// Checks the catalog for integrity problems.
    ///
    /// Structural problems are collected and reported together; cycle
    /// detection only runs on a structurally sound catalog.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` naming every problem found, or
    /// the first prerequisite cycle as `a -> b -> a`.
    pub fn validate(&self) -> Result<()> {
        let problems = self.structural_problems();
        if !problems.is_empty() {
            return Err(AdvisorError::configuration(problems.join("; ")));
        }

        if let Some(cycle) = self.find_cycle() {
            return Err(AdvisorError::configuration(format!(
                "prerequisite cycle: {}",
                cycle.join(" -> ")
            )));
        }

        debug!(
            "catalog valid: {} actions, {} patterns",
            self.actions.len(),
            self.patterns.len()
        );
        Ok(())
    }

    fn structural_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        if self.policy.recent_actions == 0 {
            problems.push("policy.recent_actions must be at least 1".to_string());
        }

        for action in &self.actions {
            if action.id.trim().is_empty() {
                problems.push("action with empty id".to_string());
                continue;
            }
            if !seen.insert(action.id.as_str()) {
                problems.push(format!("duplicate action id '{}'", action.id));
            }
            if action.title.trim().is_empty() {
                problems.push(format!("action '{}' has an empty title", action.id));
            }
            if action.estimated_minutes == 0 {
                problems.push(format!(
                    "action '{}' must have a positive estimated_minutes",
                    action.id
                ));
            }
        }

        let mut known_flags: HashSet<&str> = STANDARD_FLAGS.iter().copied().collect();
        for flag in &self.flags {
            if flag.trim().is_empty() {
                problems.push("declared profile flag with empty name".to_string());
            } else if !known_flags.insert(flag.as_str()) {
                problems.push(format!("profile flag '{flag}' is already tracked"));
            }
        }

        for action in &self.actions {
            for prerequisite in &action.prerequisites {
                if prerequisite.reason.trim().is_empty() {
                    problems.push(format!(
                        "action '{}' has a prerequisite without a reason",
                        action.id
                    ));
                }
                match &prerequisite.requirement {
                    Requirement::ActionCompleted { action: target }
                        if !seen.contains(target.as_str()) =>
                    {
                        problems.push(format!(
                            "action '{}' requires unknown action '{target}'",
                            action.id
                        ));
                    }
                    Requirement::ProfileFlag { flag } if flag.trim().is_empty() => {
                        problems.push(format!(
                            "action '{}' requires an unnamed profile flag",
                            action.id
                        ));
                    }
                    Requirement::ProfileFlag { flag } if !known_flags.contains(flag.as_str()) => {
                        problems.push(format!(
                            "action '{}' requires undeclared profile flag '{flag}'",
                            action.id
                        ));
                    }
                    Requirement::MinCompletion { percent } if *percent > 100 => {
                        problems.push(format!(
                            "action '{}' requires {percent}% completion, above 100",
                            action.id
                        ));
                    }
                    _ => {}
                }
                if let Some(target) = &prerequisite.remediation {
                    if !seen.contains(target.as_str()) {
                        problems.push(format!(
                            "action '{}' links remediation to unknown action '{target}'",
                            action.id
                        ));
                    }
                }
            }
        }

        for pattern in &self.patterns {
            if pattern.name.trim().is_empty() {
                problems.push("pattern with empty name".to_string());
            }
            if pattern.steps.is_empty() {
                problems.push(format!("pattern '{}' has no steps", pattern.name));
            }
            let mut steps = HashSet::new();
            for step in &pattern.steps {
                if !seen.contains(step.as_str()) {
                    problems.push(format!(
                        "pattern '{}' names unknown action '{step}'",
                        pattern.name
                    ));
                }
                if !steps.insert(step.as_str()) {
                    problems.push(format!(
                        "pattern '{}' repeats action '{step}'",
                        pattern.name
                    ));
                }
            }
        }

        problems
    }

    /// Finds a cycle in the action-completion dependency graph.
    ///
    /// Traversal follows catalog order and rule order, so the reported
    /// cycle is the same for identical catalogs. The path starts and ends
    /// with the same id.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let index = self.index();
        let dependencies: Vec<Vec<usize>> = self
            .actions
            .iter()
            // dangling references are reported by the structural pass
            .map(|a| a.depends_on().filter_map(|d| index.get(d).copied()).collect())
            .collect();
        let mut marks = vec![Mark::Unvisited; self.actions.len()];

        for start in 0..self.actions.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }

            // (node, index of the next dependency to follow)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            marks[start] = Mark::InProgress;

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let Some(&next) = dependencies[node].get(top.1) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                top.1 += 1;

                match marks[next] {
                    Mark::InProgress => {
                        let from = stack.iter().position(|&(n, _)| n == next).unwrap_or(0);
                        let mut cycle: Vec<String> = stack[from..]
                            .iter()
                            .map(|&(n, _)| self.actions[n].id.clone())
                            .collect();
                        cycle.push(self.actions[next].id.clone());
                        return Some(cycle);
                    }
                    Mark::Unvisited => {
                        marks[next] = Mark::InProgress;
                        stack.push((next, 0));
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{CatalogEntry, Pattern, Prerequisite},
        models::ActionCategory,
    };

    fn entry(id: &str, requires: &[&str]) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: format!("Do {id}"),
            category: ActionCategory::Content,
            estimated_minutes: 5,
            prerequisites: requires
                .iter()
                .map(|r| Prerequisite {
                    requirement: Requirement::ActionCompleted {
                        action: (*r).to_string(),
                    },
                    reason: format!("Complete {r} first"),
                    remediation: Some((*r).to_string()),
                })
                .collect(),
            help: None,
        }
    }

    fn catalog(actions: Vec<CatalogEntry>) -> Catalog {
        Catalog {
            actions,
            ..Default::default()
        }
    }

    #[test]
    fn test_acyclic_catalog_is_valid() {
        let c = catalog(vec![entry("a", &[]), entry("b", &["a"]), entry("c", &["a", "b"])]);
        assert!(c.validate().is_ok());
        assert!(c.find_cycle().is_none());
    }

    #[test]
    fn test_two_node_cycle_is_named() {
        let c = catalog(vec![entry("a", &["b"]), entry("b", &["a"])]);
        assert_eq!(
            c.find_cycle(),
            Some(vec!["a".to_string(), "b".to_string(), "a".to_string()])
        );
        let err = c.validate().unwrap_err();
        assert!(matches!(err, AdvisorError::Configuration { .. }));
        assert!(err.to_string().contains("prerequisite cycle: a -> b -> a"));
    }

    #[test]
    fn test_self_cycle_and_nested_cycle() {
        let c = catalog(vec![entry("solo", &["solo"])]);
        assert_eq!(
            c.find_cycle(),
            Some(vec!["solo".to_string(), "solo".to_string()])
        );

        let c = catalog(vec![
            entry("root", &["x"]),
            entry("x", &["y"]),
            entry("y", &["z"]),
            entry("z", &["x"]),
        ]);
        assert_eq!(
            c.find_cycle(),
            Some(vec![
                "x".to_string(),
                "y".to_string(),
                "z".to_string(),
                "x".to_string()
            ])
        );
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let c = catalog(vec![entry("b", &["missing"])]);
        let message = c.validate().unwrap_err().to_string();
        assert!(message.contains("requires unknown action 'missing'"));
        assert!(message.contains("remediation to unknown action 'missing'"));
    }

    #[test]
    fn test_structural_problems_collected() {
        let mut bad = entry("dup", &[]);
        bad.estimated_minutes = 0;
        let mut untitled = entry("dup", &[]);
        untitled.title = "  ".to_string();
        let mut c = catalog(vec![bad, untitled, entry("", &[])]);
        c.patterns.push(Pattern {
            name: "broken".to_string(),
            steps: vec!["dup".to_string(), "dup".to_string(), "ghost".to_string()],
        });
        c.policy.recent_actions = 0;

        let message = c.validate().unwrap_err().to_string();
        assert!(message.contains("duplicate action id 'dup'"));
        assert!(message.contains("positive estimated_minutes"));
        assert!(message.contains("empty title"));
        assert!(message.contains("action with empty id"));
        assert!(message.contains("pattern 'broken' repeats action 'dup'"));
        assert!(message.contains("pattern 'broken' names unknown action 'ghost'"));
        assert!(message.contains("recent_actions"));
    }

    #[test]
    fn test_requirement_bounds_checked() {
        let mut c = catalog(vec![entry("a", &[])]);
        c.actions[0].prerequisites.push(Prerequisite {
            requirement: Requirement::MinCompletion { percent: 120 },
            reason: "Too much".to_string(),
            remediation: None,
        });
        c.actions[0].prerequisites.push(Prerequisite {
            requirement: Requirement::ProfileFlag {
                flag: String::new(),
            },
            reason: String::new(),
            remediation: None,
        });
        let message = c.validate().unwrap_err().to_string();
        assert!(message.contains("above 100"));
        assert!(message.contains("unnamed profile flag"));
        assert!(message.contains("without a reason"));
    }

    fn chain(len: usize) -> Catalog {
        let ids: Vec<String> = (0..len).map(|i| format!("step-{i}")).collect();
        let actions = ids
            .iter()
            .enumerate()
            .map(|(i, id)| match i {
                0 => entry(id, &[]),
                _ => entry(id, &[ids[i - 1].as_str()]),
            })
            .collect();
        catalog(actions)
    }

    #[test]
    fn test_deep_chain_does_not_exhaust_stack() {
        let c = chain(200_000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_deep_chain_cycle_reported() {
        let mut c = chain(200_000);
        c.actions[0] = entry("step-0", &["step-199999"]);

        let cycle = c.find_cycle().expect("cycle expected");
        assert_eq!(cycle.len(), 200_001);
        assert_eq!(cycle.first(), cycle.last());
        assert!(c.validate().is_err());
    }

    fn flag_prerequisite(flag: &str) -> Prerequisite {
        Prerequisite {
            requirement: Requirement::ProfileFlag {
                flag: flag.to_string(),
            },
            reason: format!("Set {flag}"),
            remediation: None,
        }
    }

    #[test]
    fn test_profile_flags_must_be_declared() {
        let mut c = catalog(vec![entry("a", &[])]);
        c.actions[0].prerequisites.push(flag_prerequisite("headshot"));
        let message = c.validate().unwrap_err().to_string();
        assert!(message.contains("requires undeclared profile flag 'headshot'"));

        c.flags.push("headshot".to_string());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_declared_flags_checked() {
        let mut c = catalog(vec![entry("a", &[])]);
        c.flags = vec!["bio".to_string(), " ".to_string()];
        let message = c.validate().unwrap_err().to_string();
        assert!(message.contains("profile flag 'bio' is already tracked"));
        assert!(message.contains("declared profile flag with empty name"));
    }
}
