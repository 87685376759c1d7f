use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use etl::sources::{SnapshotFile, WcaSource, write_json};
use etl::{DailySchedule, EtlError, Pipeline, SnapshotSource, pipeline, scheduler};
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mbld-etl")]
#[command(about = "Multi-blind results pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    source: SourceArgs,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and publish one generation, then exit
    Run {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Publish at startup and then every day at a fixed UTC time
    Schedule {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        #[arg(long, env = "RUN_AT", default_value = "05:00")]
        at: DailySchedule,
    },
    /// Compute one generation and write it as JSON instead of publishing it
    Export {
        #[arg(long, default_value = "./generation.json")]
        output: PathBuf,

        /// Also write the fetched snapshot, for later offline runs
        #[arg(long)]
        snapshot_output: Option<PathBuf>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// WCA database export (MySQL)
    #[arg(long, env = "SOURCE_DATABASE_URL")]
    source_url: Option<String>,

    /// Snapshot JSON file written by a previous export
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self) -> Result<Arc<dyn SnapshotSource>, EtlError> {
        match (self.snapshot, self.source_url) {
            (Some(path), _) => Ok(Arc::new(SnapshotFile::new(path))),
            (None, Some(url)) => Ok(Arc::new(WcaSource::new(url))),
            (None, None) => Err(EtlError::Config(
                "either --source-url or --snapshot is required".to_string(),
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("etl={},storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let source = cli.source.into_source()?;

    match cli.command {
        Commands::Run { database_url } => {
            let pipeline = connect(source, &database_url)?;
            let summary = pipeline.run_once().await?;
            tracing::info!(
                "Published {} results ({} skipped, {} unscored)",
                summary.results,
                summary.orphaned,
                summary.undecodable
            );
        }
        Commands::Schedule { database_url, at } => {
            let pipeline = connect(source, &database_url)?;
            scheduler::run_daily(&pipeline, at, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
            })
            .await;
        }
        Commands::Export {
            output,
            snapshot_output,
        } => {
            let snapshot = source.fetch().await?;
            if let Some(path) = snapshot_output {
                write_json(&path, &snapshot).await?;
            }

            let (generation, report) = pipeline::build(snapshot).await?;
            tracing::info!(
                "Computed {} results ({} skipped, {} unscored)",
                report.results,
                report.orphaned,
                report.undecodable
            );
            write_json(&output, &generation).await?;
        }
    }

    Ok(())
}

fn connect(source: Arc<dyn SnapshotSource>, database_url: &str) -> Result<Pipeline, EtlError> {
    let database = Database::connect_lazy(database_url)?;
    Ok(Pipeline::new(source, Arc::new(database)))
}
