use sqlx::PgPool;
use storage::{
    error::Result,
    models::{Metric, ResultRow},
    repository::{RecordRepository, RegionRepository},
};

pub async fn get_record_history(
    pool: &PgPool,
    metric: Metric,
    region_id: &str,
) -> Result<Vec<ResultRow>> {
    let region = RegionRepository::new(pool).resolve(region_id).await?;
    RecordRepository::new(pool).history(metric, &region).await
}
