use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::region::Region;
use crate::error::Result;
use crate::models::{Metric, ResultRow};
use crate::services::records::RecordTag;

use super::{CORE_COLUMNS, RESULT_COLUMNS};

pub struct RecordRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecordRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every result that set or tied a record valid in `region`.
    ///
    /// A continent's history includes world records set there; a country's
    /// history includes every record tier above personal.
    pub async fn history(&self, metric: Metric, region: &Region) -> Result<Vec<ResultRow>> {
        let rows = history_query(metric, region)
            .build_query_as::<ResultRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}

/// Tag columns consulted for `metric`. Single results honour both upstream
/// and recomputed tags; means only have recomputed ones.
fn tag_columns(metric: Metric) -> &'static [&'static str] {
    match metric {
        Metric::Single => &["wca_record", "regional_record"],
        Metric::Mean => &["regional_mean_record"],
    }
}

fn history_query(metric: Metric, region: &Region) -> QueryBuilder<'static, Postgres> {
    let world = RecordTag::World.fixed_label().unwrap_or("WR");
    let personal = RecordTag::Personal.fixed_label().unwrap_or("PR");

    let mut query = QueryBuilder::new(format!(
        "SELECT {CORE_COLUMNS}, {RESULT_COLUMNS} FROM results WHERE "
    ));

    match region {
        Region::World => {}
        Region::Continent { id, .. } => {
            query.push("continent_id = ");
            query.push_bind(id.clone());
            query.push(" AND ");
        }
        Region::Country { id } => {
            query.push("person_country_id = ");
            query.push_bind(id.clone());
            query.push(" AND ");
        }
    }

    query.push("(");
    for (index, column) in tag_columns(metric).iter().enumerate() {
        if index > 0 {
            query.push(" OR ");
        }
        match region {
            Region::World => {
                query.push(format!("{column} = "));
                query.push_bind(world);
            }
            Region::Continent { record_name, .. } => {
                query.push(format!("{column} IN ("));
                query.push_bind(record_name.clone());
                query.push(", ");
                query.push_bind(world);
                query.push(")");
            }
            Region::Country { .. } => {
                query.push(format!("({column} <> '' AND {column} <> "));
                query.push_bind(personal);
                query.push(")");
            }
        }
    }
    query.push(") ORDER BY start_date, competition_id, round_type_id, person_id");

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_single_history_checks_both_tags() {
        let query = history_query(Metric::Single, &Region::World);
        let sql = query.sql();

        assert!(sql.contains("FROM results WHERE (wca_record = $1 OR regional_record = $2)"));
    }

    #[test]
    fn test_continent_history_includes_world_records() {
        let region = Region::Continent {
            id: "_Europe".to_string(),
            record_name: "ER".to_string(),
        };
        let query = history_query(Metric::Single, &region);
        let sql = query.sql();

        assert!(sql.contains("continent_id = $1 AND "));
        assert!(sql.contains("wca_record IN ($2, $3)"));
        assert!(sql.contains("regional_record IN ($4, $5)"));
    }

    #[test]
    fn test_country_mean_history_uses_mean_tags_only() {
        let region = Region::Country {
            id: "Norway".to_string(),
        };
        let query = history_query(Metric::Mean, &region);
        let sql = query.sql();

        assert!(sql.contains("person_country_id = $1 AND "));
        assert!(sql.contains("(regional_mean_record <> '' AND regional_mean_record <> $2)"));
        assert!(!sql.contains("wca_record"));
    }
}
