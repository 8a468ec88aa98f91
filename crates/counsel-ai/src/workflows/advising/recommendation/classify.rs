use super::{ScoredUniversity, TieredRecommendations};
use crate::workflows::advising::domain::{Competitiveness, RiskTier, University, DEFAULT_RANK};

/// Rule-based tier assignment, independent of the numeric fit score.
///
/// Rules are evaluated in fixed priority order; the first match wins.
/// Unranked institutions classify at the default rank.
pub fn classify(university: &University) -> RiskTier {
    let rank = university.rank.unwrap_or(DEFAULT_RANK);
    let competitiveness = university.competitiveness;

    if rank <= 50 && competitiveness == Competitiveness::High {
        return RiskTier::Reach;
    }

    if rank > 100
        || matches!(
            competitiveness,
            Competitiveness::Low | Competitiveness::VeryLow
        )
    {
        return RiskTier::Safe;
    }

    if rank <= 100
        && matches!(
            competitiveness,
            Competitiveness::High | Competitiveness::Medium
        )
    {
        return RiskTier::Target;
    }

    RiskTier::Target
}

/// Partition scored candidates into capped tier lists.
///
/// Once a tier is full, further candidates of that tier are dropped, never
/// redistributed into another tier.
pub(crate) fn partition(
    scored: Vec<ScoredUniversity>,
    tier_capacity: usize,
) -> TieredRecommendations {
    let mut tiers = TieredRecommendations::default();

    for candidate in scored {
        let bucket = match candidate.tier {
            RiskTier::Reach => &mut tiers.reach,
            RiskTier::Target => &mut tiers.target,
            RiskTier::Safe => &mut tiers.safe,
        };

        if bucket.len() < tier_capacity {
            bucket.push(candidate);
        }
    }

    tiers
}
