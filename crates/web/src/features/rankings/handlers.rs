use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    dto::{common::RankPage, ranking::RankingPage},
};

use crate::error::ApiResult;
use crate::features::parse_metric;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v0/ranking/{metric}/{region}",
    params(
        ("metric" = String, Path, description = "`single` or `mean`"),
        ("region" = String, Path, description = "`world`, a continent id or a country id")
    ),
    responses(
        (status = 200, description = "First page of the ranking", body = RankingPage),
        (status = 400, description = "Unknown metric"),
        (status = 404, description = "Region not found")
    ),
    tag = "rankings"
)]
pub async fn get_ranking(
    State(db): State<Database>,
    Path((metric, region)): Path<(String, String)>,
) -> ApiResult<Json<RankingPage>> {
    let metric = parse_metric(&metric)?;
    let page = services::get_ranking_page(db.pool(), metric, &region, RankPage::default()).await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v0/ranking/{metric}/{region}/{page}",
    params(
        ("metric" = String, Path, description = "`single` or `mean`"),
        ("region" = String, Path, description = "`world`, a continent id or a country id"),
        ("page" = u32, Path, description = "1-based page of 100 ranks")
    ),
    responses(
        (status = 200, description = "Requested page of the ranking", body = RankingPage),
        (status = 400, description = "Unknown metric or invalid page"),
        (status = 404, description = "Region not found")
    ),
    tag = "rankings"
)]
pub async fn get_ranking_for_page(
    State(db): State<Database>,
    Path((metric, region, page)): Path<(String, String, u32)>,
) -> ApiResult<Json<RankingPage>> {
    let metric = parse_metric(&metric)?;
    let page = RankPage::new(page)?;
    let page = services::get_ranking_page(db.pool(), metric, &region, page).await?;

    Ok(Json(page))
}
