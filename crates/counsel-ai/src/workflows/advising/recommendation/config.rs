use serde::{Deserialize, Serialize};

/// Engine dials governing candidate pooling and tier capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum entries kept per risk tier; overflow is dropped, not
    /// redistributed.
    pub tier_capacity: usize,
    /// Upper bound on the candidate pool requested from the directory.
    pub pool_limit: usize,
    /// Multiplier applied to the annual budget when deriving the fetch cost
    /// ceiling, so slightly-over-budget candidates stay in the pool.
    pub budget_stretch: f32,
    pub defaults: ProfileDefaults,
}

/// Centralized fallbacks applied once at the engine entry boundary for
/// profile values the user has not provided yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    pub countries: Vec<String>,
    pub budget_per_year: u32,
    pub academic_score: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tier_capacity: 5,
            pool_limit: 30,
            budget_stretch: 1.2,
            defaults: ProfileDefaults::default(),
        }
    }
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            countries: vec!["United States".to_string()],
            budget_per_year: 30_000,
            academic_score: 7.0,
        }
    }
}
