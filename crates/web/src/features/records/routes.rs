use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_record_history;

pub fn routes() -> Router<Database> {
    Router::new().route("/history/:metric/:region", get(get_record_history))
}
