use cash_breakdown::{api, AppConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging with local timestamps
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    let allocator = config.search.allocator();
    let budget = allocator.budget();
    info!(
        "Search limits: steps {:?}, candidates {:?}, recipients {:?}",
        budget.max_steps,
        budget.max_candidates,
        allocator.max_recipients()
    );

    let state = api::AppState {
        allocator: Arc::new(allocator),
        max_amount: config.search.max_amount,
        max_body_bytes: config.server.max_body_bytes,
    };

    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/breakdown           - greedy suggestion for one amount");
    info!("  POST /api/breakdown/validate  - check hand-entered bill counts");
    info!("  POST /api/allocate            - allocate the counted inventory");
    info!("  POST /api/allocate/csv        - same, as a CSV payout sheet");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
