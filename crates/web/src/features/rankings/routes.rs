use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_ranking, get_ranking_for_page};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:metric/:region", get(get_ranking))
        .route("/:metric/:region/:page", get(get_ranking_for_page))
}
