use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub country_id: String,
    pub start_date: NaiveDate,
}
