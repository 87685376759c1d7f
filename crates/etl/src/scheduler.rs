use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{error, info};

use crate::error::EtlError;
use crate::pipeline::Pipeline;

/// A once-a-day trigger at a fixed UTC wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    pub fn at(&self) -> NaiveTime {
        self.at
    }

    /// The first trigger strictly after `now`.
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive().and_time(self.at).and_utc();
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self::new(NaiveTime::from_hms_opt(5, 0, 0).expect("05:00 is a valid time"))
    }
}

impl FromStr for DailySchedule {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self::new)
            .map_err(|e| EtlError::Config(format!("invalid run time '{}', expected HH:MM: {}", s, e)))
    }
}

/// Runs the pipeline at startup and then once a day until `shutdown` resolves.
///
/// Each run is awaited before the next one is scheduled. A failed run is
/// logged and the loop carries on; the next trigger is its retry.
pub async fn run_daily<F>(pipeline: &Pipeline, schedule: DailySchedule, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut consecutive_failures = 0u32;

    info!(at = %schedule.at(), "Starting daily pipeline loop");

    loop {
        match pipeline.run_once().await {
            Ok(_) => {
                if consecutive_failures > 0 {
                    info!(
                        recovered_after = consecutive_failures,
                        "Pipeline recovered after failures"
                    );
                    consecutive_failures = 0;
                }
            }
            Err(e) => {
                consecutive_failures += 1;
                error!(
                    error = %e,
                    consecutive_failures = consecutive_failures,
                    "Pipeline run failed, previous generation stays published"
                );
            }
        }

        let next_run = schedule.next_run_after(Utc::now());
        let wait = (next_run - Utc::now()).to_std().unwrap_or_default();
        info!(next_run = %next_run, "Next pipeline run scheduled");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = &mut shutdown => {
                info!("Received shutdown signal, stopping pipeline loop");
                break;
            }
        }
    }

    info!("Pipeline loop stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;
    use storage::error::StorageError;
    use storage::models::SourceSnapshot;
    use storage::services::Generation;

    use super::*;
    use crate::error::Result;
    use crate::traits::{GenerationSink, SnapshotSource};

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_next_run_later_today() {
        let schedule = DailySchedule::default();
        assert_eq!(schedule.next_run_after(utc(4, 59)), utc(5, 0));
    }

    #[test]
    fn test_next_run_tomorrow_once_passed() {
        let schedule = DailySchedule::default();
        let tomorrow = Utc.with_ymd_and_hms(2024, 6, 2, 5, 0, 0).unwrap();

        assert_eq!(schedule.next_run_after(utc(5, 0)), tomorrow);
        assert_eq!(schedule.next_run_after(utc(23, 30)), tomorrow);
    }

    #[test]
    fn test_parse_run_time() {
        let schedule: DailySchedule = "17:45".parse().unwrap();
        assert_eq!(schedule.at(), NaiveTime::from_hms_opt(17, 45, 0).unwrap());

        assert!(matches!(
            "25:00".parse::<DailySchedule>(),
            Err(EtlError::Config(_))
        ));
    }

    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl SnapshotSource for CountingSource {
        async fn fetch(&self) -> Result<SourceSnapshot> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(EtlError::SourceUnavailable(sqlx::Error::PoolTimedOut))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct NoopSink;

    #[async_trait]
    impl GenerationSink for NoopSink {
        async fn publish(&self, _generation: &Generation) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_runs_at_startup_and_survives_failure() {
        let source = Arc::new(CountingSource(AtomicUsize::new(0)));
        let pipeline = Pipeline::new(source.clone(), Arc::new(NoopSink));

        run_daily(&pipeline, DailySchedule::default(), async {}).await;

        assert_eq!(source.0.load(Ordering::SeqCst), 1);
    }

    struct EmptySource;

    #[async_trait]
    impl SnapshotSource for EmptySource {
        async fn fetch(&self) -> Result<SourceSnapshot> {
            Ok(SourceSnapshot::default())
        }

        fn name(&self) -> &'static str {
            "empty"
        }
    }

    struct UnreachableSink(AtomicUsize);

    #[async_trait]
    impl GenerationSink for UnreachableSink {
        async fn publish(&self, _generation: &Generation) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Database(sqlx::Error::PoolTimedOut).into())
        }
    }

    #[tokio::test]
    async fn test_unreachable_store_at_startup_does_not_stop_the_loop() {
        let sink = Arc::new(UnreachableSink(AtomicUsize::new(0)));
        let pipeline = Pipeline::new(Arc::new(EmptySource), sink.clone());

        run_daily(&pipeline, DailySchedule::default(), async {}).await;

        assert_eq!(sink.0.load(Ordering::SeqCst), 1);
    }
}
