use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoundType {
    pub id: String,
    pub name: String,
    pub cell_name: String,
    pub rank: i32,
    pub is_final: bool,
}
