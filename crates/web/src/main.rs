use anyhow::Context;
use axum::Router;
use storage::Database;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;
use features::{competitions, persons, rankings, records, regions};

#[derive(OpenApi)]
#[openapi(
    paths(
        rankings::handlers::get_ranking,
        rankings::handlers::get_ranking_for_page,
        records::handlers::get_record_history,
        persons::handlers::get_person,
        persons::handlers::get_person_results,
        persons::handlers::get_person_ranking,
        competitions::handlers::get_competition,
        competitions::handlers::get_competition_results,
        competitions::handlers::list_round_types,
        competitions::handlers::get_competition_details,
        competitions::handlers::search_competitions,
        regions::handlers::list_countries,
        regions::handlers::list_countries_with_results,
        regions::handlers::list_continents,
        regions::handlers::get_metadata,
    ),
    components(
        schemas(
            storage::dto::ranking::RankingPage,
            storage::dto::region::Region,
            storage::models::Competition,
            storage::models::Country,
            storage::models::Metadata,
            storage::models::Metric,
            storage::models::Person,
            storage::models::RankingRow,
            storage::models::Ranks,
            storage::models::ResultCore,
            storage::models::ResultRow,
            storage::models::RoundType,
        )
    ),
    tags(
        (name = "rankings", description = "Personal bests ranked by region"),
        (name = "records", description = "Record history by region"),
        (name = "persons", description = "Competitor results and ranks"),
        (name = "competitions", description = "Competitions and their results"),
        (name = "regions", description = "Countries and continents"),
        (name = "metadata", description = "Data freshness"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting multi-blind results API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let app = Router::new()
        .nest("/api/v0", features::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(db);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
