use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ResultCore;

/// Which per-result value a ranking or record is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Best of the three attempt scores.
    Single,
    /// Mean of the three attempt scores.
    Mean,
}

impl Metric {
    pub fn value(&self, result: &ResultCore) -> Option<f64> {
        match self {
            Self::Single => result.best_score,
            Self::Mean => result.mean_score,
        }
    }

    pub fn rankings_table(&self) -> &'static str {
        match self {
            Self::Single => "rankings",
            Self::Mean => "mean_rankings",
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "mean" => Ok(Self::Mean),
            other => Err(format!("unknown metric '{}', expected 'single' or 'mean'", other)),
        }
    }
}
