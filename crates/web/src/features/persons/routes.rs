use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_person, get_person_ranking, get_person_results};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:id", get(get_person))
        .route("/results/:id", get(get_person_results))
        .route("/ranking/:metric/:id", get(get_person_ranking))
}
