//! Canonicalization of free-text user input: jurisdiction names and
//! application-readiness status fields.

use super::domain::CanonicalStatus;
use tracing::warn;

const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("us", "United States"),
    ("united states", "United States"),
    ("united states of america", "United States"),
    ("uk", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("canada", "Canada"),
    ("australia", "Australia"),
    ("germany", "Germany"),
];

/// Map a free-text country name onto the catalog's canonical token.
///
/// Unknown input falls through trimmed, so downstream filtering degrades to
/// a literal match instead of failing. Idempotent for canonical tokens.
pub fn normalize_country(input: &str) -> String {
    let trimmed = input.trim();
    let lowered = trimmed.to_ascii_lowercase();

    for (alias, canonical) in COUNTRY_ALIASES {
        if lowered == *alias {
            return (*canonical).to_string();
        }
    }

    trimmed.to_string()
}

const COMPLETED_SYNONYMS: &[&str] = &["completed", "done", "ready", "finished"];
const IN_PROGRESS_SYNONYMS: &[&str] = &[
    "in progress",
    "in_progress",
    "draft",
    "drafting",
    "started",
    "planning",
];
const NOT_STARTED_SYNONYMS: &[&str] = &["not started", "not_started", "pending", "todo", "none"];

/// Collapse a free-text status field into the canonical three-state bucket.
///
/// Unrecognized non-empty values count as in progress; the permissive
/// default is logged, not rejected.
pub fn normalize_status(raw: Option<&str>) -> CanonicalStatus {
    let Some(value) = raw else {
        return CanonicalStatus::NotStarted;
    };

    let lowered = value.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return CanonicalStatus::NotStarted;
    }

    if COMPLETED_SYNONYMS.contains(&lowered.as_str()) {
        return CanonicalStatus::Completed;
    }
    if IN_PROGRESS_SYNONYMS.contains(&lowered.as_str()) {
        return CanonicalStatus::InProgress;
    }
    if NOT_STARTED_SYNONYMS.contains(&lowered.as_str()) {
        return CanonicalStatus::NotStarted;
    }

    warn!(status = %value, "unrecognized readiness status, treating as in progress");
    CanonicalStatus::InProgress
}
