use sqlx::PgPool;
use storage::{
    error::Result,
    models::{Country, Metadata},
    repository::{GenerationRepository, RegionRepository},
};

pub async fn list_countries(pool: &PgPool) -> Result<Vec<Country>> {
    RegionRepository::new(pool).countries().await
}

pub async fn list_countries_with_results(pool: &PgPool) -> Result<Vec<Country>> {
    RegionRepository::new(pool).countries_with_results().await
}

pub async fn list_continent_ids(pool: &PgPool) -> Result<Vec<String>> {
    RegionRepository::new(pool).continent_ids().await
}

/// When the served data was last refreshed
pub async fn get_metadata(pool: &PgPool) -> Result<Metadata> {
    GenerationRepository::new(pool).metadata().await
}
