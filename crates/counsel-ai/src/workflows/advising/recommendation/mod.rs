//! Deterministic recommendation engine: fit scoring, rule-based tier
//! classification, and capped partitioning of a pre-filtered candidate pool.
//!
//! The engine never decides which universities exist in its answer space;
//! it only orders and labels the pool handed to it.

mod classify;
mod config;
mod scoring;

pub use classify::classify;
pub use config::{EngineConfig, ProfileDefaults};
pub use scoring::fit_score;

use super::domain::{RiskTier, University, UserProfile};
use serde::{Deserialize, Serialize};

/// Stateless engine applying the scoring and classification rules to a
/// candidate pool. Safe to share across requests.
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the inputs the scorer needs, falling back to the centralized
    /// defaults for values the profile does not carry yet.
    pub fn scoring_inputs(&self, profile: &UserProfile) -> (f32, u32) {
        let academic_score = profile.gpa.unwrap_or(self.config.defaults.academic_score);
        let budget = profile
            .budget_per_year
            .unwrap_or(self.config.defaults.budget_per_year);
        (academic_score, budget)
    }

    /// Score, classify, and partition a candidate pool for one profile.
    ///
    /// The descending score sort is stable, so equal scores keep the
    /// directory's rank-ascending order. An empty pool yields three empty
    /// tiers, never an error.
    pub fn recommend(&self, profile: &UserProfile, pool: Vec<University>) -> TieredRecommendations {
        let (academic_score, budget) = self.scoring_inputs(profile);

        let mut scored: Vec<ScoredUniversity> = pool
            .into_iter()
            .map(|university| {
                let match_percentage = scoring::fit_score(academic_score, budget, &university);
                let tier = classify::classify(&university);
                ScoredUniversity {
                    university,
                    match_percentage,
                    tier,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

        classify::partition(scored, self.config.tier_capacity)
    }
}

/// One candidate carrying its advisory fit score and assigned tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUniversity {
    #[serde(flatten)]
    pub university: University,
    pub match_percentage: u8,
    pub tier: RiskTier,
}

/// Recommendation output partitioned by risk tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TieredRecommendations {
    pub reach: Vec<ScoredUniversity>,
    pub target: Vec<ScoredUniversity>,
    pub safe: Vec<ScoredUniversity>,
}

impl TieredRecommendations {
    pub fn total(&self) -> usize {
        self.reach.len() + self.target.len() + self.safe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
