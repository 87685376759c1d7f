use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub continent_id: String,
    pub iso2: String,
    /// Set during each run: true iff a competitor from this country has a result.
    #[serde(default)]
    pub has_results: bool,
}
