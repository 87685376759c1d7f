use axum::{
    Json,
    extract::{Path, State},
};
use storage::{Database, models::ResultRow};

use crate::error::ApiResult;
use crate::features::parse_metric;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v0/records/history/{metric}/{region}",
    params(
        ("metric" = String, Path, description = "`single` or `mean`"),
        ("region" = String, Path, description = "`world`, a continent id or a country id")
    ),
    responses(
        (status = 200, description = "Every result that set a record valid in the region", body = Vec<ResultRow>),
        (status = 400, description = "Unknown metric"),
        (status = 404, description = "Region not found")
    ),
    tag = "records"
)]
pub async fn get_record_history(
    State(db): State<Database>,
    Path((metric, region)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ResultRow>>> {
    let metric = parse_metric(&metric)?;
    let history = services::get_record_history(db.pool(), metric, &region).await?;

    Ok(Json(history))
}
