use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Columns shared by the `results`, `rankings` and `mean_rankings` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultCore {
    pub competition_id: String,
    pub person_id: String,
    pub person_name: String,
    pub person_country_id: String,
    pub continent_id: Option<String>,
    pub start_date: NaiveDate,
    pub value1: i64,
    pub value2: i64,
    pub value3: i64,
    pub score1: Option<f64>,
    pub score2: Option<f64>,
    pub score3: Option<f64>,
    pub best_score: Option<f64>,
    /// Raw attempt value that produced `best_score`, 0 when there is none.
    pub best_result: i64,
    /// `-1` when three attempts were made and at least one did not finish.
    pub mean_score: Option<f64>,
    /// Record tag as published upstream, back-filled with "PR" where upstream omits it.
    pub wca_record: Option<String>,
    pub regional_record: Option<String>,
    pub regional_mean_record: Option<String>,
}

/// One competitor's result in one round of one competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub core: ResultCore,
    pub round_type_id: String,
    /// Placement as published upstream.
    pub wca_pos: i32,
    /// Placement within the round by score.
    pub pos: i32,
}
