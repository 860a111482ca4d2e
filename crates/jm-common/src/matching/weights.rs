use serde::{Deserialize, Serialize};

/// Maximum points per scoring component. The total is capped at 100.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    skills: 40.0,
    experience: 30.0,
    workplace: 20.0,
    goals: 10.0,
};

/// Points awarded when a component cannot be evaluated (missing data).
/// `fallback_total` replaces a non-finite total.
pub const DEFAULT_NEUTRAL_SCORES: NeutralScores = NeutralScores {
    skills: 25.0,
    experience: 15.0,
    workplace: 10.0,
    fallback_total: 50.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub workplace: f64,
    pub goals: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.workplace + self.goals
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutralScores {
    pub skills: f64,
    pub experience: f64,
    pub workplace: f64,
    pub fallback_total: f64,
}

impl Default for NeutralScores {
    fn default() -> Self {
        DEFAULT_NEUTRAL_SCORES
    }
}
