use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    get_competition, get_competition_details, get_competition_results, list_round_types,
    search_competitions,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/roundtypes", get(list_round_types))
        .route("/details", post(get_competition_details))
        .route("/search", post(search_competitions))
        .route("/results/:id", get(get_competition_results))
        .route("/:id", get(get_competition))
}
