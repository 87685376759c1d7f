use sqlx::PgPool;
use validator::Validate;

use crate::dto::competition::CompetitionSearch;
use crate::error::{Result, StorageError};
use crate::models::{Competition, ResultRow, RoundType};

use super::CORE_COLUMNS;

/// Repository for competitions and their rounds
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Competition> {
        sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, name, country_id, start_date
            FROM competitions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Competitions among `ids`, newest first. Unknown ids are ignored.
    pub async fn find_many(&self, ids: &[String]) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, name, country_id, start_date
            FROM competitions
            WHERE id = ANY($1)
            ORDER BY start_date DESC, id
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// Results of a competition, round by round, best placement first.
    pub async fn results(&self, id: &str) -> Result<Vec<ResultRow>> {
        let sql = format!(
            "SELECT r.{}, r.round_type_id, r.wca_pos, r.pos FROM results r \
             JOIN round_types rt ON rt.id = r.round_type_id \
             WHERE r.competition_id = $1 \
             ORDER BY rt.rank, r.pos, r.person_id",
            CORE_COLUMNS.replace(", ", ", r.")
        );

        let rows = sqlx::query_as::<_, ResultRow>(&sql)
            .bind(id)
            .fetch_all(self.pool)
            .await?;

        if rows.is_empty() {
            return Err(StorageError::NotFound);
        }

        Ok(rows)
    }

    /// Competitions whose id, name or country contains the query, case-insensitively.
    pub async fn search(&self, search: &CompetitionSearch) -> Result<Vec<Competition>> {
        search
            .validate()
            .map_err(|e| StorageError::InvalidQuery(e.to_string()))?;

        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, name, country_id, start_date
            FROM competitions
            WHERE LOWER(id) LIKE $1 ESCAPE '\'
               OR LOWER(name) LIKE $1 ESCAPE '\'
               OR LOWER(country_id) LIKE $1 ESCAPE '\'
            ORDER BY start_date DESC, id
            "#,
        )
        .bind(search.like_pattern())
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    pub async fn round_types(&self) -> Result<Vec<RoundType>> {
        let round_types = sqlx::query_as::<_, RoundType>(
            r#"
            SELECT id, name, cell_name, rank, is_final
            FROM round_types
            ORDER BY rank
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(round_types)
    }
}
