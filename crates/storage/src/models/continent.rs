use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A continent and the label its continental records are shown with
/// (e.g. "ER" for Europe, "AsR" for Asia).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Continent {
    pub id: String,
    pub name: String,
    pub record_name: String,
}
