use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use storage::models::SourceSnapshot;
use storage::services::{Generation, GenerationReport, build_generation};
use tracing::{info, warn};

use crate::error::Result;
use crate::traits::{GenerationSink, SnapshotSource};

/// What one successful run published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub results: usize,
    pub rankings: usize,
    pub mean_rankings: usize,
    pub orphaned: usize,
    pub undecodable: usize,
    pub updated_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// One upstream source feeding one serving store.
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn SnapshotSource>,
    sink: Arc<dyn GenerationSink>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn SnapshotSource>, sink: Arc<dyn GenerationSink>) -> Self {
        Self { source, sink }
    }

    /// Fetches, computes and publishes one generation.
    ///
    /// Nothing is published unless every step before it succeeded, so a failed
    /// run leaves the previous generation in place.
    pub async fn run_once(&self) -> Result<RunSummary> {
        let start = Instant::now();

        let (generation, report) = compute(self.source.as_ref()).await?;
        self.sink.publish(&generation).await?;

        let summary = RunSummary {
            results: report.results,
            rankings: generation.rankings.len(),
            mean_rankings: generation.mean_rankings.len(),
            orphaned: report.orphaned,
            undecodable: report.undecodable,
            updated_at: generation.metadata.updated_at,
            elapsed: start.elapsed(),
        };

        info!(
            results = summary.results,
            rankings = summary.rankings,
            mean_rankings = summary.mean_rankings,
            elapsed_ms = summary.elapsed.as_millis(),
            "Pipeline run completed"
        );

        Ok(summary)
    }
}

/// Reads a snapshot from `source` and computes its generation without publishing it.
pub async fn compute(source: &dyn SnapshotSource) -> Result<(Generation, GenerationReport)> {
    info!(source = source.name(), "Fetching snapshot");
    let snapshot = source.fetch().await?;

    info!(
        countries = snapshot.countries.len(),
        continents = snapshot.continents.len(),
        competitions = snapshot.competitions.len(),
        persons = snapshot.persons.len(),
        round_types = snapshot.round_types.len(),
        results = snapshot.results.len(),
        "Snapshot loaded"
    );

    build(snapshot).await
}

/// Computes the generation for `snapshot` on a blocking thread, stamped with the current time.
pub async fn build(snapshot: SourceSnapshot) -> Result<(Generation, GenerationReport)> {
    let updated_at = Utc::now();
    let (generation, report) =
        tokio::task::spawn_blocking(move || build_generation(snapshot, updated_at)).await??;

    if report.orphaned > 0 {
        warn!(count = report.orphaned, "Skipped results of unknown competitions");
    }
    if report.undecodable > 0 {
        warn!(count = report.undecodable, "Left results with undecodable attempts unscored");
    }

    Ok((generation, report))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use storage::models::{Competition, Continent, Country, Person, RawResult, RoundType};

    use super::*;
    use crate::error::EtlError;

    struct FakeSource(Option<SourceSnapshot>);

    #[async_trait]
    impl SnapshotSource for FakeSource {
        async fn fetch(&self) -> Result<SourceSnapshot> {
            self.0
                .clone()
                .ok_or(EtlError::SourceUnavailable(sqlx::Error::PoolTimedOut))
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<Generation>>,
        fail: bool,
    }

    #[async_trait]
    impl GenerationSink for RecordingSink {
        async fn publish(&self, generation: &Generation) -> Result<()> {
            if self.fail {
                return Err(EtlError::Config("sink rejected the generation".to_string()));
            }
            self.published.lock().unwrap().push(generation.clone());
            Ok(())
        }
    }

    fn raw(person: &str, competition: &str, values: [i64; 3]) -> RawResult {
        RawResult {
            competition_id: competition.to_string(),
            round_type_id: "f".to_string(),
            person_id: person.to_string(),
            person_name: person.to_string(),
            person_country_id: "Norway".to_string(),
            value1: values[0],
            value2: values[1],
            value3: values[2],
            wca_record: None,
            wca_pos: 1,
        }
    }

    fn snapshot() -> SourceSnapshot {
        SourceSnapshot {
            countries: vec![Country {
                id: "Norway".to_string(),
                name: "Norway".to_string(),
                continent_id: "_Europe".to_string(),
                iso2: "NO".to_string(),
                has_results: false,
            }],
            continents: vec![Continent {
                id: "_Europe".to_string(),
                name: "Europe".to_string(),
                record_name: "ER".to_string(),
            }],
            competitions: vec![Competition {
                id: "Oslo2024".to_string(),
                name: "Oslo 2024".to_string(),
                country_id: "Norway".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            }],
            persons: vec![Person {
                id: "2015HANS01".to_string(),
                sub_id: 1,
                name: "Hans".to_string(),
                country_id: "Norway".to_string(),
                gender: Some("m".to_string()),
            }],
            round_types: vec![RoundType {
                id: "f".to_string(),
                name: "Final".to_string(),
                cell_name: "Final".to_string(),
                rank: 900,
                is_final: true,
            }],
            native_ranks: vec![],
            results: vec![
                raw("2015HANS01", "Oslo2024", [810_240_002, -1, 0]),
                raw("2016OLAV01", "Oslo2024", [-1, -1, -1]),
                raw("2017KARI01", "Cancelled2024", [810_240_002, 0, 0]),
            ],
        }
    }

    fn pipeline(source: FakeSource, sink: Arc<RecordingSink>) -> Pipeline {
        Pipeline::new(Arc::new(source), sink)
    }

    #[tokio::test]
    async fn test_run_once_publishes_one_generation() {
        let sink = Arc::new(RecordingSink::default());
        let summary = pipeline(FakeSource(Some(snapshot())), sink.clone())
            .run_once()
            .await
            .unwrap();

        assert_eq!(summary.results, 2);
        assert_eq!(summary.orphaned, 1);
        assert_eq!(summary.rankings, 2);

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].metadata.updated_at, summary.updated_at);
        assert!(published[0].countries[0].has_results);
    }

    #[tokio::test]
    async fn test_unavailable_source_publishes_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let err = pipeline(FakeSource(None), sink.clone())
            .run_once()
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::SourceUnavailable(_)));
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_fails_the_run() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let result = pipeline(FakeSource(Some(snapshot())), sink).run_once().await;

        assert!(matches!(result, Err(EtlError::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_reference_data_fails_the_run() {
        let mut snapshot = snapshot();
        snapshot.continents[0].record_name = "WR".to_string();

        let err = compute(&FakeSource(Some(snapshot))).await.unwrap_err();
        assert!(matches!(err, EtlError::Storage(_)));
    }

    #[tokio::test]
    async fn test_compute_is_deterministic_apart_from_timestamp() {
        let source = FakeSource(Some(snapshot()));
        let (mut first, _) = compute(&source).await.unwrap();
        let (second, _) = compute(&source).await.unwrap();

        first.metadata = second.metadata.clone();
        assert_eq!(first, second);
    }
}
