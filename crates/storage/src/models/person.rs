use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub id: String,
    pub sub_id: i32,
    pub name: String,
    pub country_id: String,
    pub gender: Option<String>,
}
