pub mod handlers;

pub use handlers::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

pub fn router(state: AppState) -> Router {
    let breakdown_routes = Router::new()
        .route("/api/breakdown", post(suggest_breakdown))
        .route("/api/breakdown/validate", post(validate_breakdown));

    let allocation_routes = Router::new()
        .route("/api/allocate", post(allocate))
        .route("/api/allocate/csv", post(allocate_csv));

    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .merge(breakdown_routes)
        .merge(allocation_routes)
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(body_limit)))
        .with_state(state)
}
