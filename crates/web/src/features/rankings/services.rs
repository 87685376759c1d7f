use sqlx::PgPool;
use storage::{
    dto::{common::RankPage, ranking::RankingPage},
    error::Result,
    models::Metric,
    repository::{RankingRepository, RegionRepository},
};

/// Resolve the region and fetch one page of its ranking
pub async fn get_ranking_page(
    pool: &PgPool,
    metric: Metric,
    region_id: &str,
    page: RankPage,
) -> Result<RankingPage> {
    let region = RegionRepository::new(pool).resolve(region_id).await?;
    let data = RankingRepository::new(pool)
        .by_region(metric, &region, page)
        .await?;

    Ok(RankingPage {
        region,
        metric,
        page: page.number(),
        data,
    })
}
