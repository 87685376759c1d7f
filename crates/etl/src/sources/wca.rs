use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{FromRow, MySqlPool};
use storage::models::{
    Competition, Continent, Country, NativeRank, Person, RawResult, RoundType, SourceSnapshot,
};
use tracing::info;

use crate::error::{EtlError, Result};
use crate::traits::SnapshotSource;

const EVENT_ID: &str = "333mbf";

const COUNTRIES_QUERY: &str = r#"
    SELECT id, name, continentId AS continent_id, iso2
    FROM Countries
"#;

const CONTINENTS_QUERY: &str = r#"
    SELECT id, name, recordName AS record_name
    FROM Continents
    WHERE recordName != ''
"#;

const COMPETITIONS_QUERY: &str = r#"
    SELECT
        id,
        name,
        countryId AS country_id,
        DATE(CONCAT(year, '-', LPAD(month, 2, '0'), '-', LPAD(day, 2, '0'))) AS start_date
    FROM Competitions
    WHERE cancelled = 0
"#;

const PERSONS_QUERY: &str = r#"
    SELECT id, CAST(subId AS SIGNED) AS sub_id, name, countryId AS country_id, gender
    FROM Persons
"#;

const ROUND_TYPES_QUERY: &str = r#"
    SELECT
        id,
        name,
        cellName AS cell_name,
        CAST(`rank` AS SIGNED) AS `rank`,
        CAST(final AS SIGNED) AS final
    FROM RoundTypes
"#;

const NATIVE_RANKS_QUERY: &str = r#"
    SELECT
        personId AS person_id,
        CAST(worldRank AS SIGNED) AS world_rank,
        CAST(continentRank AS SIGNED) AS continent_rank,
        CAST(countryRank AS SIGNED) AS country_rank
    FROM RanksSingle
    WHERE eventId = ?
"#;

const RESULTS_QUERY: &str = r#"
    SELECT
        competitionId AS competition_id,
        roundTypeId AS round_type_id,
        personId AS person_id,
        personName AS person_name,
        personCountryId AS person_country_id,
        CAST(value1 AS SIGNED) AS value1,
        CAST(value2 AS SIGNED) AS value2,
        CAST(value3 AS SIGNED) AS value3,
        regionalSingleRecord AS wca_record,
        CAST(pos AS SIGNED) AS wca_pos
    FROM Results
    WHERE eventId = ?
"#;

#[derive(FromRow)]
struct CountryRow {
    id: String,
    name: String,
    continent_id: String,
    iso2: String,
}

#[derive(FromRow)]
struct CompetitionRow {
    id: String,
    name: String,
    country_id: String,
    start_date: Option<NaiveDate>,
}

#[derive(FromRow)]
struct PersonRow {
    id: String,
    sub_id: i64,
    name: String,
    country_id: String,
    gender: Option<String>,
}

#[derive(FromRow)]
struct RoundTypeRow {
    id: String,
    name: String,
    cell_name: String,
    rank: i64,
    #[sqlx(rename = "final")]
    is_final: i64,
}

#[derive(FromRow)]
struct NativeRankRow {
    person_id: String,
    world_rank: i64,
    continent_rank: i64,
    country_rank: i64,
}

#[derive(FromRow)]
struct RawResultRow {
    competition_id: String,
    round_type_id: String,
    person_id: String,
    person_name: String,
    person_country_id: String,
    value1: i64,
    value2: i64,
    value3: i64,
    wca_record: Option<String>,
    wca_pos: i64,
}

/// Reads the public WCA database export, restricted to the multi-blind event.
pub struct WcaSource {
    database_url: String,
}

impl WcaSource {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    async fn connect(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .max_connections(2)
            .connect(&self.database_url)
            .await
            .map_err(EtlError::SourceUnavailable)
    }
}

#[async_trait]
impl SnapshotSource for WcaSource {
    async fn fetch(&self) -> Result<SourceSnapshot> {
        let pool = self.connect().await?;

        let countries = sqlx::query_as::<_, CountryRow>(COUNTRIES_QUERY)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .map(|row| Country {
                id: row.id,
                name: row.name,
                continent_id: row.continent_id,
                iso2: row.iso2,
                has_results: false,
            })
            .collect();

        let continents = sqlx::query_as::<_, Continent>(CONTINENTS_QUERY)
            .fetch_all(&pool)
            .await?;

        let competitions = sqlx::query_as::<_, CompetitionRow>(COMPETITIONS_QUERY)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .filter_map(|row| {
                Some(Competition {
                    start_date: row.start_date?,
                    id: row.id,
                    name: row.name,
                    country_id: row.country_id,
                })
            })
            .collect();

        let persons = sqlx::query_as::<_, PersonRow>(PERSONS_QUERY)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .map(|row| {
                Ok(Person {
                    sub_id: narrow("sub_id", row.sub_id)?,
                    id: row.id,
                    name: row.name,
                    country_id: row.country_id,
                    gender: row.gender.filter(|gender| !gender.trim().is_empty()),
                })
            })
            .collect::<Result<_>>()?;

        let round_types = sqlx::query_as::<_, RoundTypeRow>(ROUND_TYPES_QUERY)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .map(|row| {
                Ok(RoundType {
                    rank: narrow("rank", row.rank)?,
                    id: row.id,
                    name: row.name,
                    cell_name: row.cell_name,
                    is_final: row.is_final != 0,
                })
            })
            .collect::<Result<_>>()?;

        let native_ranks = sqlx::query_as::<_, NativeRankRow>(NATIVE_RANKS_QUERY)
            .bind(EVENT_ID)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .map(|row| NativeRank {
                person_id: row.person_id,
                world_rank: row.world_rank,
                continent_rank: row.continent_rank,
                country_rank: row.country_rank,
            })
            .collect();

        let results: Vec<RawResult> = sqlx::query_as::<_, RawResultRow>(RESULTS_QUERY)
            .bind(EVENT_ID)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .map(|row| {
                Ok(RawResult {
                    wca_pos: narrow("wca_pos", row.wca_pos)?,
                    competition_id: row.competition_id,
                    round_type_id: row.round_type_id,
                    person_id: row.person_id,
                    person_name: row.person_name,
                    person_country_id: row.person_country_id,
                    value1: row.value1,
                    value2: row.value2,
                    value3: row.value3,
                    wca_record: row.wca_record,
                })
            })
            .collect::<Result<_>>()?;

        pool.close().await;

        info!(results = results.len(), event = EVENT_ID, "Fetched WCA snapshot");

        Ok(SourceSnapshot {
            countries,
            continents,
            competitions,
            persons,
            round_types,
            native_ranks,
            results,
        })
    }

    fn name(&self) -> &'static str {
        "WCA database"
    }
}

/// Upstream counters are read as `BIGINT` but stored as `i32`.
fn narrow(column: &str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|e| {
        EtlError::SourceQuery(sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_keeps_small_counters() {
        assert_eq!(narrow("wca_pos", 17).unwrap(), 17);
    }

    #[test]
    fn test_narrow_rejects_out_of_range_values() {
        let err = narrow("wca_pos", i64::from(i32::MAX) + 1).unwrap_err();
        assert!(matches!(
            err,
            EtlError::SourceQuery(sqlx::Error::ColumnDecode { ref index, .. }) if index == "wca_pos"
        ));
    }
}
