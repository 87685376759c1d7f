use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_metadata, list_continents, list_countries, list_countries_with_results};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/withresults", get(list_countries_with_results))
        .route("/continents", get(list_continents))
        .route("/metadata", get(get_metadata))
}
