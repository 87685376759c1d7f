use serde::Serialize;
use utoipa::ToSchema;

/// Id of the region that spans every competitor.
pub const WORLD: &str = "world";

/// The scope of a ranking or record history query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Region {
    World,
    Continent { id: String, record_name: String },
    Country { id: String },
}
