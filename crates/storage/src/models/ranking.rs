use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::ResultCore;

/// Dense ranks of a personal best. `None` when the competitor has no valid value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ranks {
    pub world_rank: Option<i64>,
    pub continent_rank: Option<i64>,
    pub country_rank: Option<i64>,
    /// Upstream's own single ranks, shown for comparison only.
    pub wca_world_rank: Option<i64>,
    pub wca_continent_rank: Option<i64>,
    pub wca_country_rank: Option<i64>,
}

/// A competitor's personal best for one metric together with its ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RankingRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub core: ResultCore,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub ranks: Ranks,
}
