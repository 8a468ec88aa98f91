use crate::workflows::advising::domain::{Competitiveness, University, DEFAULT_RANK};

/// Composite 0-100 fit estimate for one candidate against the user's
/// academic score and annual budget. Advisory only; tier assignment does
/// not read it.
pub fn fit_score(academic_score: f32, budget_per_year: u32, university: &University) -> u8 {
    prestige_points(university.rank)
        + cost_fit_points(university.estimated_tuition_usd, budget_per_year)
        + academic_fit_points(academic_score, university.competitiveness)
}

/// Step function of catalog rank, 40 points max. Unranked institutions are
/// bucketed at the pessimistic default rank.
pub(crate) fn prestige_points(rank: Option<u32>) -> u8 {
    match rank.unwrap_or(DEFAULT_RANK) {
        0..=50 => 40,
        51..=100 => 35,
        101..=200 => 30,
        201..=300 => 25,
        _ => 20,
    }
}

/// Tuition against the annual budget, 30 points max.
pub(crate) fn cost_fit_points(tuition_usd: u32, budget_per_year: u32) -> u8 {
    let tuition = f64::from(tuition_usd);
    let budget = f64::from(budget_per_year);

    if tuition <= budget * 0.7 {
        30
    } else if tuition <= budget {
        25
    } else if tuition <= budget * 1.2 {
        15
    } else {
        5
    }
}

/// Academic score against band-specific admit thresholds, 30 points max.
pub(crate) fn academic_fit_points(academic_score: f32, competitiveness: Competitiveness) -> u8 {
    match competitiveness {
        Competitiveness::High => {
            if academic_score >= 8.5 {
                30
            } else if academic_score >= 7.5 {
                20
            } else {
                10
            }
        }
        Competitiveness::Medium => {
            if academic_score >= 7.0 {
                30
            } else if academic_score >= 6.0 {
                25
            } else {
                15
            }
        }
        Competitiveness::Low | Competitiveness::VeryLow => {
            if academic_score >= 6.0 {
                30
            } else {
                25
            }
        }
    }
}
