use axum::{
    Json,
    extract::{Path, Query, State},
};
use storage::{
    Database,
    dto::competition::CompetitionSearch,
    models::{Competition, ResultRow, RoundType},
};
use validator::Validate;

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v0/competition/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Competition found", body = Competition),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> ApiResult<Json<Competition>> {
    let competition = services::get_competition(db.pool(), &id).await?;

    Ok(Json(competition))
}

#[utoipa::path(
    get,
    path = "/api/v0/competition/results/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Results by round and position", body = Vec<ResultRow>),
        (status = 404, description = "Competition has no multi-blind results")
    ),
    tag = "competitions"
)]
pub async fn get_competition_results(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ResultRow>>> {
    let results = services::get_competition_results(db.pool(), &id).await?;

    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/v0/competition/roundtypes",
    responses(
        (status = 200, description = "Every round type, in round order", body = Vec<RoundType>)
    ),
    tag = "competitions"
)]
pub async fn list_round_types(State(db): State<Database>) -> ApiResult<Json<Vec<RoundType>>> {
    let round_types = services::list_round_types(db.pool()).await?;

    Ok(Json(round_types))
}

#[utoipa::path(
    post,
    path = "/api/v0/competition/details",
    request_body = Vec<String>,
    responses(
        (status = 200, description = "The known competitions among the requested ids", body = Vec<Competition>)
    ),
    tag = "competitions"
)]
pub async fn get_competition_details(
    State(db): State<Database>,
    Json(ids): Json<Vec<String>>,
) -> ApiResult<Json<Vec<Competition>>> {
    let competitions = services::get_competitions(db.pool(), &ids).await?;

    Ok(Json(competitions))
}

#[utoipa::path(
    post,
    path = "/api/v0/competition/search",
    params(CompetitionSearch),
    responses(
        (status = 200, description = "Competitions matching the query", body = Vec<Competition>),
        (status = 400, description = "Query shorter than 3 characters")
    ),
    tag = "competitions"
)]
pub async fn search_competitions(
    State(db): State<Database>,
    Query(search): Query<CompetitionSearch>,
) -> ApiResult<Json<Vec<Competition>>> {
    search.validate()?;

    let competitions = services::search_competitions(db.pool(), &search).await?;

    Ok(Json(competitions))
}
