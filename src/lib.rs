//! Course catalog backend.
//!
//! A JSON REST API over a course collection that is persisted wholesale to a JSON
//! file, plus the client-side catalog logic backed by a SQLite storage slot.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use config::Config;
use db::CourseRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<CourseRepository>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/courses",
            get(api::list_courses).post(api::create_course),
        )
        .route("/courses/export/all", get(api::export_all_courses))
        .route("/courses/import", post(api::import_courses))
        .route(
            "/courses/{id}",
            get(api::get_course)
                .put(api::update_course)
                .delete(api::delete_course),
        )
        .route("/courses/{id}/modules", post(api::add_module))
        .route("/courses/{id}/export", get(api::export_course))
        .route("/health", get(api::health_check));

    let shell = client_shell(&state.config.public_dir);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(shell)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Static assets from `public_dir`, falling back to its `index.html` for any other path.
fn client_shell(public_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")))
}

#[cfg(test)]
mod tests;
