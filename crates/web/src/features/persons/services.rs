use sqlx::PgPool;
use storage::{
    error::Result,
    models::{Metric, Person, RankingRow, ResultRow},
    repository::{PersonRepository, RankingRepository},
};

pub async fn get_person(pool: &PgPool, id: &str) -> Result<Person> {
    PersonRepository::new(pool).find_by_id(id).await
}

pub async fn get_person_results(pool: &PgPool, id: &str) -> Result<Vec<ResultRow>> {
    PersonRepository::new(pool).results(id).await
}

/// The person's personal best for `metric` with its world, continent and country ranks
pub async fn get_person_ranking(pool: &PgPool, metric: Metric, id: &str) -> Result<RankingRow> {
    RankingRepository::new(pool).for_person(metric, id).await
}
