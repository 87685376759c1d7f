use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::common::RankPage;
use crate::dto::region::Region;
use crate::error::{Result, StorageError};
use crate::models::{Metric, RankingRow};

use super::{CORE_COLUMNS, RANK_COLUMNS};

pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of a region's ranking, best first.
    pub async fn by_region(
        &self,
        metric: Metric,
        region: &Region,
        page: RankPage,
    ) -> Result<Vec<RankingRow>> {
        let rows = page_query(metric, region, page)
            .build_query_as::<RankingRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn for_person(&self, metric: Metric, person_id: &str) -> Result<RankingRow> {
        let sql = format!(
            "SELECT {CORE_COLUMNS}, {RANK_COLUMNS} FROM {} WHERE person_id = $1",
            metric.rankings_table()
        );

        sqlx::query_as::<_, RankingRow>(&sql)
            .bind(person_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}

fn rank_column(region: &Region) -> &'static str {
    match region {
        Region::World => "world_rank",
        Region::Continent { .. } => "continent_rank",
        Region::Country { .. } => "country_rank",
    }
}

fn page_query(metric: Metric, region: &Region, page: RankPage) -> QueryBuilder<'static, Postgres> {
    let rank = rank_column(region);
    let (lower, upper) = page.rank_bounds();

    let mut query = QueryBuilder::new(format!(
        "SELECT {CORE_COLUMNS}, {RANK_COLUMNS} FROM {} WHERE best_result > 0",
        metric.rankings_table()
    ));

    match region {
        Region::World => {}
        Region::Continent { id, .. } => {
            query.push(" AND continent_id = ");
            query.push_bind(id.clone());
        }
        Region::Country { id } => {
            query.push(" AND person_country_id = ");
            query.push_bind(id.clone());
        }
    }

    query.push(format!(" AND {rank} > "));
    query.push_bind(lower);
    query.push(format!(" AND {rank} <= "));
    query.push_bind(upper);
    query.push(format!(" ORDER BY {rank}, person_id"));

    query
}
