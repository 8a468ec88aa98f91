use crate::workflows::advising::domain::CanonicalStatus;
use crate::workflows::advising::normalize::{normalize_country, normalize_status};

#[test]
fn country_aliases_resolve_case_insensitively() {
    assert_eq!(normalize_country("USA"), "United States");
    assert_eq!(normalize_country("usa"), "United States");
    assert_eq!(normalize_country("US"), "United States");
    assert_eq!(normalize_country("Uk"), "United Kingdom");
    assert_eq!(normalize_country("  uk  "), "United Kingdom");
    assert_eq!(normalize_country("germany"), "Germany");
}

#[test]
fn unknown_countries_pass_through_trimmed() {
    assert_eq!(normalize_country("  Netherlands "), "Netherlands");
    assert_eq!(normalize_country(""), "");
}

#[test]
fn country_normalization_is_idempotent() {
    for input in ["USA", "uk", "Canada", "Netherlands"] {
        let once = normalize_country(input);
        assert_eq!(normalize_country(&once), once);
    }
}

#[test]
fn completed_synonyms_map_to_completed() {
    for raw in ["completed", "Done", "READY", "finished", " done "] {
        assert_eq!(normalize_status(Some(raw)), CanonicalStatus::Completed);
    }
}

#[test]
fn in_progress_synonyms_map_to_in_progress() {
    for raw in [
        "in progress",
        "in_progress",
        "Draft",
        "drafting",
        "started",
        "planning",
    ] {
        assert_eq!(normalize_status(Some(raw)), CanonicalStatus::InProgress);
    }
}

#[test]
fn not_started_synonyms_map_to_not_started() {
    for raw in ["not started", "not_started", "Pending", "todo", "none"] {
        assert_eq!(normalize_status(Some(raw)), CanonicalStatus::NotStarted);
    }
}

#[test]
fn empty_input_is_not_started() {
    assert_eq!(normalize_status(None), CanonicalStatus::NotStarted);
    assert_eq!(normalize_status(Some("")), CanonicalStatus::NotStarted);
    assert_eq!(normalize_status(Some("   ")), CanonicalStatus::NotStarted);
}

#[test]
fn unrecognized_values_default_to_in_progress() {
    assert_eq!(
        normalize_status(Some("waiting on results")),
        CanonicalStatus::InProgress
    );
    assert_eq!(normalize_status(Some("zzz")), CanonicalStatus::InProgress);
}
