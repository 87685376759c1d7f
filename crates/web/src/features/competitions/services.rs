use sqlx::PgPool;
use storage::{
    dto::competition::CompetitionSearch,
    error::Result,
    models::{Competition, ResultRow, RoundType},
    repository::CompetitionRepository,
};

/// Get competition by id
pub async fn get_competition(pool: &PgPool, id: &str) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_id(id).await
}

/// Get several competitions at once
pub async fn get_competitions(pool: &PgPool, ids: &[String]) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    repo.find_many(ids).await
}

/// Get every result of a competition
pub async fn get_competition_results(pool: &PgPool, id: &str) -> Result<Vec<ResultRow>> {
    let repo = CompetitionRepository::new(pool);
    repo.results(id).await
}

pub async fn search_competitions(
    pool: &PgPool,
    search: &CompetitionSearch,
) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    repo.search(search).await
}

pub async fn list_round_types(pool: &PgPool) -> Result<Vec<RoundType>> {
    let repo = CompetitionRepository::new(pool);
    repo.round_types().await
}
