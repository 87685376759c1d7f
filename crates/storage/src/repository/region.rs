use sqlx::PgPool;

use crate::dto::region::{Region, WORLD};
use crate::error::{Result, StorageError};
use crate::models::Country;

pub struct RegionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a region id: the world, a continent id or a country id, in that order.
    pub async fn resolve(&self, id: &str) -> Result<Region> {
        if id == WORLD {
            return Ok(Region::World);
        }

        let record_name = sqlx::query_scalar::<_, String>(
            "SELECT record_name FROM continents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        if let Some(record_name) = record_name {
            return Ok(Region::Continent {
                id: id.to_string(),
                record_name,
            });
        }

        let country = sqlx::query_scalar::<_, String>("SELECT id FROM countries WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        country
            .map(|id| Region::Country { id })
            .ok_or_else(|| StorageError::RegionNotFound(id.to_string()))
    }

    pub async fn countries(&self) -> Result<Vec<Country>> {
        let countries = sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, continent_id, iso2, has_results
            FROM countries
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }

    /// Countries with at least one competitor in the result history.
    pub async fn countries_with_results(&self) -> Result<Vec<Country>> {
        let countries = sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, continent_id, iso2, has_results
            FROM countries
            WHERE has_results
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }

    pub async fn continent_ids(&self) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>("SELECT id FROM continents ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(ids)
    }
}
