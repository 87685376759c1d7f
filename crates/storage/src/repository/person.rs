use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{Person, ResultRow};

use super::{CORE_COLUMNS, RESULT_COLUMNS};

pub struct PersonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The competitor's current identity; older sub ids hold previous names or countries.
    pub async fn find_by_id(&self, id: &str) -> Result<Person> {
        sqlx::query_as::<_, Person>(
            r#"
            SELECT id, sub_id, name, country_id, gender
            FROM persons
            WHERE id = $1
            ORDER BY sub_id
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Every result of the competitor, oldest first.
    pub async fn results(&self, id: &str) -> Result<Vec<ResultRow>> {
        let sql = format!(
            "SELECT {CORE_COLUMNS}, {RESULT_COLUMNS} FROM results \
             WHERE person_id = $1 \
             ORDER BY start_date, competition_id, round_type_id"
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
}
