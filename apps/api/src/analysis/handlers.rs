//! Axum route handlers for the session-scoped analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::prompts::QuestionType;
use crate::analysis::workflow::{
    self, load_session, AnalyzeOutcome, DomainView, MatchReport,
};
use crate::errors::AppError;
use crate::session::SessionSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub file_name: Option<String>,
    pub analysis: Option<String>,
    pub selected_domain: String,
    pub has_questions: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SessionSnapshot> for SessionResponse {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.id,
            file_name: snapshot.fingerprint.as_ref().map(|f| f.file_name.clone()),
            analysis: snapshot.analysis.clone(),
            selected_domain: snapshot.selected_domain.clone(),
            has_questions: snapshot.last_quiz.is_some(),
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectDomainRequest {
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct SelectDomainResponse {
    pub selected: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub question_type: QuestionType,
    /// Overrides the session's selected domain for this request only.
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub question_type: QuestionType,
    pub domain: String,
    pub questions: String,
}

#[derive(Debug, Serialize)]
pub struct AnswersResponse {
    pub answers: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct RephraseRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RephraseResponse {
    pub rephrased: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let snapshot = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionResponse::from(snapshot.as_ref())))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = load_session(&state.sessions, session_id).await?;
    Ok(Json(SessionResponse::from(snapshot.as_ref())))
}

/// POST /api/v1/sessions/:id/resume
///
/// Multipart upload with a `file` field. Analyzes the resume unless the same
/// document is already the session's current one.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeOutcome>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        upload = Some((file_name, bytes));
    }

    let (file_name, bytes) = upload
        .ok_or_else(|| AppError::Validation("Please upload a resume file".to_string()))?;

    let outcome = workflow::analyze_upload(
        &state.sessions,
        &state.extractors,
        state.llm.as_ref(),
        session_id,
        &file_name,
        bytes,
    )
    .await?;
    Ok(Json(outcome))
}

/// GET /api/v1/sessions/:id/domains
pub async fn handle_get_domains(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DomainView>, AppError> {
    let view = workflow::domain_view(&state.sessions, state.llm.as_ref(), session_id).await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/domain
pub async fn handle_select_domain(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectDomainRequest>,
) -> Result<Json<SelectDomainResponse>, AppError> {
    let selected = workflow::select_domain(&state.sessions, session_id, request.domain).await?;
    Ok(Json(SelectDomainResponse { selected }))
}

/// POST /api/v1/sessions/:id/questions
///
/// Returns only the questions; answers stay behind `GET .../answers`.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let quiz = workflow::generate_questions(
        &state.sessions,
        state.llm.as_ref(),
        session_id,
        request.question_type,
        request.domain,
    )
    .await?;

    Ok(Json(GenerateQuestionsResponse {
        question_type: quiz.question_type,
        domain: quiz.domain,
        questions: quiz.questions,
    }))
}

/// GET /api/v1/sessions/:id/answers
pub async fn handle_show_answers(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnswersResponse>, AppError> {
    let answers = workflow::show_answers(&state.sessions, session_id).await?;
    Ok(Json(AnswersResponse { answers }))
}

/// POST /api/v1/sessions/:id/match
pub async fn handle_match(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let report = workflow::match_job_description(
        &state.sessions,
        state.llm.as_ref(),
        session_id,
        &request.job_description,
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/rephrase
pub async fn handle_rephrase(
    State(state): State<AppState>,
    Json(request): Json<RephraseRequest>,
) -> Result<Json<RephraseResponse>, AppError> {
    let rephrased = workflow::rephrase(state.llm.as_ref(), &request.text).await?;
    Ok(Json(RephraseResponse { rephrased }))
}
