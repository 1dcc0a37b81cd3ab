pub mod contact;
pub mod feedback;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::pages;
use crate::state::AppState;

/// Create the application router: JSON/multipart API, health check and pages
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .nest("/api", api_routes())
        .merge(health::health_routes())
        .merge(pages::page_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Submission endpoints
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contact::contact_routes())
        .merge(feedback::feedback_routes())
}
