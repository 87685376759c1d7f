use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    models::{Person, RankingRow, ResultRow},
};

use crate::error::ApiResult;
use crate::features::parse_metric;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v0/person/{id}",
    params(
        ("id" = String, Path, description = "WCA id")
    ),
    responses(
        (status = 200, description = "Person found", body = Person),
        (status = 404, description = "Person not found")
    ),
    tag = "persons"
)]
pub async fn get_person(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> ApiResult<Json<Person>> {
    let person = services::get_person(db.pool(), &id).await?;

    Ok(Json(person))
}

#[utoipa::path(
    get,
    path = "/api/v0/person/results/{id}",
    params(
        ("id" = String, Path, description = "WCA id")
    ),
    responses(
        (status = 200, description = "Every result of the person, oldest first", body = Vec<ResultRow>),
        (status = 404, description = "Person has no results")
    ),
    tag = "persons"
)]
pub async fn get_person_results(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ResultRow>>> {
    let results = services::get_person_results(db.pool(), &id).await?;

    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/v0/person/ranking/{metric}/{id}",
    params(
        ("metric" = String, Path, description = "`single` or `mean`"),
        ("id" = String, Path, description = "WCA id")
    ),
    responses(
        (status = 200, description = "Personal best and its ranks", body = RankingRow),
        (status = 400, description = "Unknown metric"),
        (status = 404, description = "Person is not ranked")
    ),
    tag = "persons"
)]
pub async fn get_person_ranking(
    State(db): State<Database>,
    Path((metric, id)): Path<(String, String)>,
) -> ApiResult<Json<RankingRow>> {
    let metric = parse_metric(&metric)?;
    let ranking = services::get_person_ranking(db.pool(), metric, &id).await?;

    Ok(Json(ranking))
}
