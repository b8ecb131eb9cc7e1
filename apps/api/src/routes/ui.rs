//! Browser-facing routes: the single page, its feature flags, and the template gallery.

use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::config::UiLayout;
use crate::extraction::DocumentFormat;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// An externally hosted resume template collection.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateLink {
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

pub const TEMPLATE_GALLERY: &[TemplateLink] = &[
    TemplateLink {
        name: "Overleaf CV gallery",
        description: "LaTeX resume and CV templates, editable in the browser",
        url: "https://www.overleaf.com/gallery/tagged/cv",
    },
    TemplateLink {
        name: "Canva resume templates",
        description: "Designed one-page resumes with a drag-and-drop editor",
        url: "https://www.canva.com/resumes/templates/",
    },
    TemplateLink {
        name: "Microsoft Create resumes",
        description: "Word resume templates, including plain ATS-friendly layouts",
        url: "https://create.microsoft.com/en-us/templates/resumes",
    },
];

#[derive(Debug, Serialize)]
pub struct UiConfigResponse {
    pub layout: UiLayout,
    pub accepted_formats: Vec<DocumentFormat>,
}

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/v1/ui-config
pub async fn ui_config_handler(State(state): State<AppState>) -> Json<UiConfigResponse> {
    Json(UiConfigResponse {
        layout: state.config.ui_layout,
        accepted_formats: state.extractors.accepted_formats(),
    })
}

/// GET /api/v1/templates
pub async fn templates_handler() -> Json<&'static [TemplateLink]> {
    Json(TEMPLATE_GALLERY)
}
