use jiff::Timestamp;
use waypoint_core::{ActionHistory, ActionRecord, Catalog, CatalogLoader, ProfileState};

/// Helper function to load the built-in catalog without consulting XDG config
pub fn builtin_catalog() -> Catalog {
    CatalogLoader::new()
        .without_user_config()
        .load()
        .expect("Failed to load built-in catalog")
}

/// History completing the given actions one minute apart, in order
pub fn history_of(catalog: &Catalog, ids: &[&str]) -> ActionHistory {
    let records = ids
        .iter()
        .enumerate()
        .map(|(minute, id)| {
            let entry = catalog.entry(id).expect("unknown action in fixture");
            let at = Timestamp::from_second(1_700_000_000 + 60 * minute as i64).unwrap();
            ActionRecord::completed(*id, entry.category, at)
        })
        .collect();
    ActionHistory::new(records)
}

/// Every combination of the standard profile flags
pub fn all_profiles() -> Vec<ProfileState> {
    let flags = waypoint_core::models::STANDARD_FLAGS;
    (0..1u8 << flags.len())
        .map(|mask| {
            ProfileState::with_flags(
                flags
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, f)| *f),
            )
        })
        .collect()
}
