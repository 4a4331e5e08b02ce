//! Tests for the advisor module.

use jiff::Timestamp;

use super::*;
use crate::{
    catalog::{Pattern, Prerequisite, Requirement},
    error::AdvisorError,
    models::{ActionCategory, ActionRecord, STANDARD_FLAGS},
};

fn at(minute: i64) -> Timestamp {
    Timestamp::from_second(1_700_000_000 + minute * 60).unwrap()
}

fn done(id: &str, category: ActionCategory, minute: i64) -> ActionRecord {
    ActionRecord::completed(id, category, at(minute))
}

fn builtin() -> Catalog {
    Catalog::builtin().expect("built-in catalog should be valid")
}

fn complete_profile() -> ProfileState {
    ProfileState::with_flags(STANDARD_FLAGS)
}

fn find<'a>(suggestions: &'a [NextStepSuggestion], id: &str) -> &'a NextStepSuggestion {
    suggestions
        .iter()
        .find(|s| s.action_id == id)
        .unwrap_or_else(|| panic!("no suggestion for {id}"))
}

fn cyclic_catalog() -> Catalog {
    let mut catalog = builtin();
    // market-analysis now requires competitor-analysis, which requires it back
    catalog.actions[6].prerequisites.push(Prerequisite {
        requirement: Requirement::ActionCompleted {
            action: "competitor-analysis".to_string(),
        },
        reason: "Loop".to_string(),
        remediation: None,
    });
    catalog
}

#[test]
fn test_fresh_user_gets_profile_setup_first() {
    let catalog = builtin();
    let suggestions = FlowAdvisor::new()
        .suggest_next_steps(&ProfileState::new(), &ActionHistory::default(), &catalog)
        .expect("Failed to suggest");

    assert_eq!(suggestions.len(), catalog.actions.len());
    let first = &suggestions[0];
    assert_eq!(first.action_id, "profile-setup");
    assert_eq!(first.priority, Priority::High);
    assert!(first.unmet_prerequisites.is_empty());
    assert!(first.is_executable());

    let plan = find(&suggestions, "marketing-plan");
    assert_eq!(plan.priority, Priority::Low);
    assert!(!plan.is_executable());
    let reason = &plan.unmet_prerequisites[0].reason;
    for flag in STANDARD_FLAGS {
        assert!(reason.contains(flag), "reason should name {flag}: {reason}");
    }
    assert_eq!(
        plan.unmet_prerequisites[0].remediation.as_deref(),
        Some("profile-setup")
    );
}

#[test]
fn test_content_follows_recent_marketing_plan() {
    let catalog = builtin();
    let history = ActionHistory::new(vec![
        done("profile-setup", ActionCategory::Profile, 0),
        done("marketing-plan", ActionCategory::Marketing, 30),
    ]);
    let advisor = FlowAdvisor::new();

    let check = advisor
        .check_prerequisites("blog-post", &complete_profile(), &history, &catalog)
        .expect("Failed to check");
    assert!(check.satisfied);
    assert!(check.unmet.is_empty());

    let suggestions = advisor
        .suggest_next_steps(&complete_profile(), &history, &catalog)
        .expect("Failed to suggest");
    let blog = find(&suggestions, "blog-post");
    assert_eq!(blog.priority, Priority::High);
    assert!(blog.rationale.contains("marketing-plan"));
}

#[test]
fn test_content_drops_to_medium_outside_recency_window() {
    let mut catalog = builtin();
    catalog.policy.recent_actions = 1;
    let history = ActionHistory::new(vec![
        done("profile-setup", ActionCategory::Profile, 0),
        done("marketing-plan", ActionCategory::Marketing, 30),
        done("listing-description", ActionCategory::Content, 60),
    ]);

    let suggestions = FlowAdvisor::new()
        .suggest_next_steps(&complete_profile(), &history, &catalog)
        .expect("Failed to suggest");
    let blog = find(&suggestions, "blog-post");
    assert_eq!(blog.priority, Priority::Medium);
    assert_eq!(blog.rationale, "Ready to start");
}

#[test]
fn test_completed_actions_are_excluded() {
    let catalog = builtin();
    let history = ActionHistory::new(vec![
        done("profile-setup", ActionCategory::Profile, 0),
        done("social-post", ActionCategory::Content, 5),
        ActionRecord::available("blog-post", ActionCategory::Content),
    ]);

    let suggestions = FlowAdvisor::new()
        .suggest_next_steps(&complete_profile(), &history, &catalog)
        .expect("Failed to suggest");
    let ids: Vec<&str> = suggestions.iter().map(|s| s.action_id.as_str()).collect();
    assert!(!ids.contains(&"profile-setup"));
    assert!(!ids.contains(&"social-post"));
    // available but not completed
    assert!(ids.contains(&"blog-post"));
}

#[test]
fn test_blocked_suggestions_are_low() {
    let catalog = builtin();
    let profiles = [
        ProfileState::new(),
        ProfileState::with_flags(["basic_info"]),
        ProfileState::with_flags(["basic_info", "bio"]),
        complete_profile(),
    ];
    let advisor = FlowAdvisor::new();

    for profile in &profiles {
        let suggestions = advisor
            .suggest_next_steps(profile, &ActionHistory::default(), &catalog)
            .expect("Failed to suggest");
        for suggestion in &suggestions {
            if !suggestion.unmet_prerequisites.is_empty() {
                assert_eq!(suggestion.priority, Priority::Low, "{}", suggestion.action_id);
            } else {
                assert_ne!(suggestion.priority, Priority::Low, "{}", suggestion.action_id);
            }
        }
    }
}

#[test]
fn test_ordering_is_total_and_stable() {
    let catalog = builtin();
    let profile = ProfileState::with_flags(["basic_info", "social_links"]);
    let history = ActionHistory::new(vec![done("brand-strategy", ActionCategory::Marketing, 0)]);
    let advisor = FlowAdvisor::new();

    let suggestions = advisor
        .suggest_next_steps(&profile, &history, &catalog)
        .expect("Failed to suggest");
    for pair in suggestions.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority < b.priority
                || (a.priority == b.priority && a.estimated_minutes <= b.estimated_minutes),
            "{} before {}",
            a.action_id,
            b.action_id
        );
    }

    let again = advisor
        .suggest_next_steps(&profile, &history, &catalog)
        .expect("Failed to suggest");
    assert_eq!(suggestions, again);
}

#[test]
fn test_equal_effort_ties_follow_catalog_order() {
    let catalog = builtin();
    let profile = ProfileState::with_flags(["basic_info", "social_links"]);
    let history = ActionHistory::new(vec![done("profile-setup", ActionCategory::Profile, 0)]);

    let suggestions = FlowAdvisor::new()
        .suggest_next_steps(&profile, &history, &catalog)
        .expect("Failed to suggest");
    // both medium, five minutes each; listing-description comes first in the catalog
    let listing = suggestions
        .iter()
        .position(|s| s.action_id == "listing-description")
        .unwrap();
    let social = suggestions
        .iter()
        .position(|s| s.action_id == "social-post")
        .unwrap();
    assert!(listing < social);
}

#[test]
fn test_cycle_is_configuration_error() {
    let catalog = cyclic_catalog();
    let err = FlowAdvisor::new()
        .suggest_next_steps(&ProfileState::new(), &ActionHistory::default(), &catalog)
        .unwrap_err();
    assert!(matches!(err, AdvisorError::Configuration { .. }));
    assert!(err
        .to_string()
        .contains("market-analysis -> competitor-analysis -> market-analysis"));
}

#[test]
fn test_every_query_rejects_invalid_catalog() {
    let catalog = cyclic_catalog();
    let advisor = FlowAdvisor::new();
    let profile = ProfileState::new();
    let history = ActionHistory::default();

    assert!(advisor
        .check_prerequisites("blog-post", &profile, &history, &catalog)
        .is_err());
    assert!(advisor.explain("blog-post", &profile, &history, &catalog).is_err());
    assert!(advisor
        .compute_efficiency_score(&profile, &history, &catalog)
        .is_err());
}

#[test]
fn test_unknown_action_is_error() {
    let catalog = builtin();
    let advisor = FlowAdvisor::new();
    let err = advisor
        .check_prerequisites(
            "open-house",
            &ProfileState::new(),
            &ActionHistory::default(),
            &catalog,
        )
        .unwrap_err();
    assert!(matches!(err, AdvisorError::UnknownAction { ref id } if id == "open-house"));

    let err = advisor
        .explain("open-house", &ProfileState::new(), &ActionHistory::default(), &catalog)
        .unwrap_err();
    assert!(matches!(err, AdvisorError::UnknownAction { .. }));
}

#[test]
fn test_check_prerequisites_is_idempotent() {
    let catalog = builtin();
    let profile = ProfileState::with_flags(["basic_info"]);
    let history = ActionHistory::new(vec![done("marketing-plan", ActionCategory::Marketing, 0)]);
    let advisor = FlowAdvisor::new();

    let first = advisor
        .check_prerequisites("content-calendar", &profile, &history, &catalog)
        .expect("Failed to check");
    let second = advisor
        .check_prerequisites("content-calendar", &profile, &history, &catalog)
        .expect("Failed to check");
    assert_eq!(first, second);
    assert!(!first.satisfied);
    assert_eq!(first.unmet.len(), 1);
    assert_eq!(first.unmet[0].remediation.as_deref(), Some("blog-post"));
}

#[test]
fn test_explain_includes_help_and_blockers() {
    let catalog = builtin();
    let help = FlowAdvisor::new()
        .explain(
            "competitor-analysis",
            &complete_profile(),
            &ActionHistory::default(),
            &catalog,
        )
        .expect("Failed to explain");
    assert_eq!(help.title, "Analyze competing agents");
    assert!(help.help.is_some());
    assert_eq!(help.blocking.len(), 1);
    assert_eq!(help.blocking[0].remediation.as_deref(), Some("market-analysis"));
}

#[test]
fn test_efficiency_score_components() {
    let catalog = builtin();
    let advisor = FlowAdvisor::new();

    let empty = advisor
        .efficiency_breakdown(&ProfileState::new(), &ActionHistory::default(), &catalog)
        .expect("Failed to score");
    assert_eq!(empty.total(), 0);

    let history = ActionHistory::new(vec![
        done("profile-setup", ActionCategory::Profile, 0),
        done("marketing-plan", ActionCategory::Marketing, 10),
        done("blog-post", ActionCategory::Content, 20),
    ]);
    let breakdown = advisor
        .efficiency_breakdown(&complete_profile(), &history, &catalog)
        .expect("Failed to score");
    assert_eq!(breakdown.profile_points, 40);
    assert_eq!(breakdown.diversity_points, 30);
    assert_eq!(breakdown.pattern_points, 30);
    assert_eq!(breakdown.matched_patterns, vec!["onboarding".to_string()]);
    assert_eq!(
        advisor
            .compute_efficiency_score(&complete_profile(), &history, &catalog)
            .unwrap(),
        100
    );
}

#[test]
fn test_out_of_order_history_earns_no_pattern_points() {
    let catalog = builtin();
    let history = ActionHistory::new(vec![
        done("blog-post", ActionCategory::Content, 0),
        done("marketing-plan", ActionCategory::Marketing, 10),
        done("profile-setup", ActionCategory::Profile, 20),
    ]);
    let breakdown = FlowAdvisor::new()
        .efficiency_breakdown(&ProfileState::with_flags(["bio"]), &history, &catalog)
        .expect("Failed to score");
    assert_eq!(breakdown.profile_points, 10);
    assert_eq!(breakdown.diversity_points, 30);
    assert_eq!(breakdown.pattern_points, 0);
    assert!(breakdown.matched_patterns.is_empty());
}

#[test]
fn test_efficiency_monotonic_in_completion() {
    let catalog = builtin();
    let advisor = FlowAdvisor::new();
    let history = ActionHistory::new(vec![done("market-analysis", ActionCategory::Analysis, 0)]);

    let mut profile = ProfileState::new();
    let mut previous = advisor
        .compute_efficiency_score(&profile, &history, &catalog)
        .unwrap();
    for flag in STANDARD_FLAGS {
        profile.set(flag, true);
        let score = advisor
            .compute_efficiency_score(&profile, &history, &catalog)
            .unwrap();
        assert!(score >= previous);
        previous = score;
    }
    assert_eq!(previous, 50);
}

#[test]
fn test_custom_catalog_without_patterns() {
    let catalog = Catalog {
        actions: vec![CatalogEntry {
            id: "import-contacts".to_string(),
            title: "Import contacts".to_string(),
            category: ActionCategory::Marketing,
            estimated_minutes: 7,
            prerequisites: vec![],
            help: None,
        }],
        patterns: vec![Pattern {
            name: "solo".to_string(),
            steps: vec!["import-contacts".to_string()],
        }],
        ..Default::default()
    };
    let advisor = FlowAdvisor::new();
    let history = ActionHistory::new(vec![done("import-contacts", ActionCategory::Marketing, 0)]);

    let suggestions = advisor
        .suggest_next_steps(&ProfileState::new(), &history, &catalog)
        .unwrap();
    assert!(suggestions.is_empty());
    assert_eq!(
        advisor
            .matched_patterns(&history, &catalog)
            .unwrap(),
        vec!["solo".to_string()]
    );
}
