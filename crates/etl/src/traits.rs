use async_trait::async_trait;
use storage::Database;
use storage::models::SourceSnapshot;
use storage::repository::GenerationRepository;
use storage::services::Generation;

use crate::Result;

/// Where a run reads its upstream data from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<SourceSnapshot>;

    fn name(&self) -> &'static str;
}

/// Where a run installs the generation it computed.
#[async_trait]
pub trait GenerationSink: Send + Sync {
    async fn publish(&self, generation: &Generation) -> Result<()>;
}

#[async_trait]
impl GenerationSink for Database {
    /// Migrations run here rather than at startup, so an unreachable store
    /// fails this run only.
    async fn publish(&self, generation: &Generation) -> Result<()> {
        self.run_migrations().await?;
        GenerationRepository::new(self.pool())
            .publish(generation)
            .await?;
        Ok(())
    }
}
