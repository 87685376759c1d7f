use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::info;

use crate::error::{Result, StorageError};
use crate::models::{Metadata, RankingRow, ResultCore, ResultRow};
use crate::services::Generation;

use super::{CORE_COLUMNS, RANK_COLUMNS, RESULT_COLUMNS};

/// Rows per INSERT statement; keeps bind parameters under the Postgres limit.
const INSERT_CHUNK: usize = 1000;

/// Every table a generation owns, in the order they are cleared.
const TABLES: [&str; 9] = [
    "metadata",
    "mean_rankings",
    "rankings",
    "results",
    "round_types",
    "persons",
    "competitions",
    "continents",
    "countries",
];

type Tuple<'q, 'args> = Separated<'q, 'args, Postgres, &'static str>;

pub struct GenerationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GenerationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Replaces the served generation with `generation`.
    ///
    /// All tables are rewritten in one transaction, so readers see either the
    /// previous generation or this one, never a mix.
    pub async fn publish(&self, generation: &Generation) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for table in TABLES {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }

        insert_chunked(
            &mut tx,
            "INSERT INTO countries (id, name, continent_id, iso2, has_results) ",
            &generation.countries,
            |mut b, c| {
                b.push_bind(&c.id)
                    .push_bind(&c.name)
                    .push_bind(&c.continent_id)
                    .push_bind(&c.iso2)
                    .push_bind(c.has_results);
            },
        )
        .await?;

        insert_chunked(
            &mut tx,
            "INSERT INTO continents (id, name, record_name) ",
            &generation.continents,
            |mut b, c| {
                b.push_bind(&c.id).push_bind(&c.name).push_bind(&c.record_name);
            },
        )
        .await?;

        insert_chunked(
            &mut tx,
            "INSERT INTO competitions (id, name, country_id, start_date) ",
            &generation.competitions,
            |mut b, c| {
                b.push_bind(&c.id)
                    .push_bind(&c.name)
                    .push_bind(&c.country_id)
                    .push_bind(c.start_date);
            },
        )
        .await?;

        insert_chunked(
            &mut tx,
            "INSERT INTO persons (id, sub_id, name, country_id, gender) ",
            &generation.persons,
            |mut b, p| {
                b.push_bind(&p.id)
                    .push_bind(p.sub_id)
                    .push_bind(&p.name)
                    .push_bind(&p.country_id)
                    .push_bind(p.gender.as_deref());
            },
        )
        .await?;

        insert_chunked(
            &mut tx,
            "INSERT INTO round_types (id, name, cell_name, rank, is_final) ",
            &generation.round_types,
            |mut b, r| {
                b.push_bind(&r.id)
                    .push_bind(&r.name)
                    .push_bind(&r.cell_name)
                    .push_bind(r.rank)
                    .push_bind(r.is_final);
            },
        )
        .await?;

        let results_header = format!("INSERT INTO results ({CORE_COLUMNS}, {RESULT_COLUMNS}) ");
        insert_chunked(&mut tx, &results_header, &generation.results, push_result).await?;

        for (table, rows) in [
            ("rankings", &generation.rankings),
            ("mean_rankings", &generation.mean_rankings),
        ] {
            let header = format!("INSERT INTO {table} ({CORE_COLUMNS}, {RANK_COLUMNS}) ");
            insert_chunked(&mut tx, &header, rows, push_ranking).await?;
        }

        sqlx::query("INSERT INTO metadata (updated_at) VALUES ($1)")
            .bind(generation.metadata.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            results = generation.results.len(),
            rankings = generation.rankings.len(),
            mean_rankings = generation.mean_rankings.len(),
            updated_at = %generation.metadata.updated_at,
            "Published generation"
        );

        Ok(())
    }

    pub async fn metadata(&self) -> Result<Metadata> {
        sqlx::query_as::<_, Metadata>("SELECT updated_at FROM metadata LIMIT 1")
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}

async fn insert_chunked<'r, T, F>(
    tx: &mut Transaction<'_, Postgres>,
    header: &str,
    rows: &'r [T],
    mut push: F,
) -> Result<()>
where
    F: FnMut(Tuple<'_, 'r>, &'r T),
{
    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut query: QueryBuilder<'r, Postgres> = QueryBuilder::new(header);
        query.push_values(chunk, &mut push);
        query.build().execute(&mut **tx).await?;
    }
    Ok(())
}

fn push_core<'args>(b: &mut Tuple<'_, 'args>, core: &'args ResultCore) {
    b.push_bind(&core.competition_id)
        .push_bind(&core.person_id)
        .push_bind(&core.person_name)
        .push_bind(&core.person_country_id)
        .push_bind(core.continent_id.as_deref())
        .push_bind(core.start_date)
        .push_bind(core.value1)
        .push_bind(core.value2)
        .push_bind(core.value3)
        .push_bind(core.score1)
        .push_bind(core.score2)
        .push_bind(core.score3)
        .push_bind(core.best_score)
        .push_bind(core.best_result)
        .push_bind(core.mean_score)
        .push_bind(core.wca_record.as_deref())
        .push_bind(core.regional_record.as_deref())
        .push_bind(core.regional_mean_record.as_deref());
}

fn push_result<'args>(mut b: Tuple<'_, 'args>, row: &'args ResultRow) {
    push_core(&mut b, &row.core);
    b.push_bind(&row.round_type_id)
        .push_bind(row.wca_pos)
        .push_bind(row.pos);
}

fn push_ranking<'args>(mut b: Tuple<'_, 'args>, row: &'args RankingRow) {
    push_core(&mut b, &row.core);
    b.push_bind(row.ranks.world_rank)
        .push_bind(row.ranks.continent_rank)
        .push_bind(row.ranks.country_rank)
        .push_bind(row.ranks.wca_world_rank)
        .push_bind(row.ranks.wca_continent_rank)
        .push_bind(row.ranks.wca_country_rank);
}
