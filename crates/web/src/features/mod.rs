pub mod competitions;
pub mod persons;
pub mod rankings;
pub mod records;
pub mod regions;

use axum::Router;
use storage::Database;
use storage::models::Metric;

use crate::error::WebError;

/// Every public endpoint, relative to the API prefix.
pub fn routes() -> Router<Database> {
    Router::new()
        .nest("/ranking", rankings::routes::routes())
        .nest("/records", records::routes::routes())
        .nest("/person", persons::routes::routes())
        .nest("/competition", competitions::routes::routes())
        .merge(regions::routes::routes())
}

pub(crate) fn parse_metric(metric: &str) -> Result<Metric, WebError> {
    metric.parse().map_err(WebError::BadRequest)
}
