use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Metric, RankingRow};

use super::region::Region;

/// One page of a regional ranking.
#[derive(Debug, Serialize, ToSchema)]
pub struct RankingPage {
    pub region: Region,
    pub metric: Metric,
    pub page: u32,
    pub data: Vec<RankingRow>,
}
