pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Largest accepted request body; resumes are small, scanned PDFs are not.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/ui-config", get(ui::ui_config_handler))
        .route("/api/v1/templates", get(ui::templates_handler))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route(
            "/api/v1/sessions/:id/resume",
            post(handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/sessions/:id/domains",
            get(handlers::handle_get_domains),
        )
        .route(
            "/api/v1/sessions/:id/domain",
            put(handlers::handle_select_domain),
        )
        .route(
            "/api/v1/sessions/:id/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            get(handlers::handle_show_answers),
        )
        .route("/api/v1/sessions/:id/match", post(handlers::handle_match))
        // Stateless tools
        .route("/api/v1/rephrase", post(handlers::handle_rephrase))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
