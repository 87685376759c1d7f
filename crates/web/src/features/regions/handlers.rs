use axum::{Json, extract::State};
use storage::{
    Database,
    models::{Country, Metadata},
};

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v0/countries",
    responses(
        (status = 200, description = "Every country", body = Vec<Country>)
    ),
    tag = "regions"
)]
pub async fn list_countries(State(db): State<Database>) -> ApiResult<Json<Vec<Country>>> {
    let countries = services::list_countries(db.pool()).await?;

    Ok(Json(countries))
}

#[utoipa::path(
    get,
    path = "/api/v0/countries/withresults",
    responses(
        (status = 200, description = "Countries with at least one multi-blind result", body = Vec<Country>)
    ),
    tag = "regions"
)]
pub async fn list_countries_with_results(
    State(db): State<Database>,
) -> ApiResult<Json<Vec<Country>>> {
    let countries = services::list_countries_with_results(db.pool()).await?;

    Ok(Json(countries))
}

#[utoipa::path(
    get,
    path = "/api/v0/continents",
    responses(
        (status = 200, description = "Ids of every continent with its own record", body = Vec<String>)
    ),
    tag = "regions"
)]
pub async fn list_continents(State(db): State<Database>) -> ApiResult<Json<Vec<String>>> {
    let continents = services::list_continent_ids(db.pool()).await?;

    Ok(Json(continents))
}

#[utoipa::path(
    get,
    path = "/api/v0/metadata",
    responses(
        (status = 200, description = "Time of the last successful refresh", body = Metadata),
        (status = 404, description = "No data has been published yet")
    ),
    tag = "metadata"
)]
pub async fn get_metadata(State(db): State<Database>) -> ApiResult<Json<Metadata>> {
    let metadata = services::get_metadata(db.pool()).await?;

    Ok(Json(metadata))
}
