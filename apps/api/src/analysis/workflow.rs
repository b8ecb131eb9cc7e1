//! Session workflows — one function per user action.
//!
//! Each workflow loads the caller's snapshot, does at most one LLM call, and swaps
//! in a new snapshot only after every fallible step has succeeded. A failed
//! extraction or LLM call therefore leaves the session exactly as it was.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::postprocess::{
    domain_options, extract_domain_list, extract_match_percentage, split_questions_and_answers,
};
use crate::analysis::prompts::{
    build_analysis_prompt, build_domain_extraction_prompt, build_match_prompt,
    build_question_prompt, build_rephrase_prompt, QuestionType,
};
use crate::errors::AppError;
use crate::extraction::{DocumentFormat, ExtractorRegistry};
use crate::llm_client::TextGenerator;
use crate::session::{QuizRecord, SessionSnapshot, SessionStore};

#[derive(Debug, Serialize)]
pub struct AnalyzeOutcome {
    pub session_id: Uuid,
    pub file_name: String,
    pub format: DocumentFormat,
    pub analysis: String,
    /// True when the upload matched the session's current document and no LLM call was made.
    pub reused: bool,
}

#[derive(Debug, Serialize)]
pub struct DomainView {
    pub options: Vec<String>,
    pub selected: String,
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub report: String,
    /// `None` when the report has no readable "Match Percentage" line.
    pub match_percentage: Option<u32>,
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found or expired"))
}

pub async fn load_session(
    sessions: &SessionStore,
    session_id: Uuid,
) -> Result<Arc<SessionSnapshot>, AppError> {
    sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))
}

/// Applies `change` to the session's current snapshot, not to the one read before the LLM call.
async fn update_session<F>(
    sessions: &SessionStore,
    session_id: Uuid,
    change: F,
) -> Result<Arc<SessionSnapshot>, AppError>
where
    F: FnOnce(&SessionSnapshot) -> SessionSnapshot,
{
    sessions
        .update(session_id, change)
        .await
        .ok_or_else(|| session_not_found(session_id))
}

fn resume_replaced() -> AppError {
    AppError::Conflict(
        "A different resume was uploaded while this request was running; please retry".to_string(),
    )
}

fn require_analysis(snapshot: &SessionSnapshot) -> Result<&str, AppError> {
    snapshot
        .analysis
        .as_deref()
        .ok_or_else(|| AppError::Conflict("Upload a resume to analyze first".to_string()))
}

/// Upload → extract → analyze. Re-uploading the current document reuses the stored analysis.
pub async fn analyze_upload(
    sessions: &SessionStore,
    extractors: &ExtractorRegistry,
    llm: &dyn TextGenerator,
    session_id: Uuid,
    file_name: &str,
    bytes: Bytes,
) -> Result<AnalyzeOutcome, AppError> {
    let snapshot = load_session(sessions, session_id).await?;
    let document = extractors.accept(file_name, bytes)?;
    let fingerprint = document.fingerprint();

    if snapshot.has_analysis_for(&fingerprint) {
        info!(%session_id, file_name, "Same document re-uploaded; reusing analysis");
        return Ok(AnalyzeOutcome {
            session_id,
            file_name: document.file_name,
            format: document.format,
            analysis: require_analysis(&snapshot)?.to_string(),
            reused: true,
        });
    }

    let resume_text = extractors.extract(&document).await?;
    let analysis = llm
        .generate(&build_analysis_prompt(&resume_text))
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

    info!(%session_id, format = %document.format, "Resume analyzed");
    update_session(sessions, session_id, |current| {
        current.with_analysis(fingerprint, resume_text, analysis.clone())
    })
    .await?;

    Ok(AnalyzeOutcome {
        session_id,
        file_name: document.file_name,
        format: document.format,
        analysis,
        reused: false,
    })
}

/// Defaults plus domains the model finds in the analysis. The extraction call
/// happens once per analysis; later reads come from the snapshot.
pub async fn domain_view(
    sessions: &SessionStore,
    llm: &dyn TextGenerator,
    session_id: Uuid,
) -> Result<DomainView, AppError> {
    let snapshot = load_session(sessions, session_id).await?;

    if let Some(options) = &snapshot.domain_options {
        return Ok(DomainView {
            options: options.clone(),
            selected: snapshot.selected_domain.clone(),
        });
    }

    let analysis = require_analysis(&snapshot)?;
    let response = llm
        .generate(&build_domain_extraction_prompt(analysis))
        .await
        .map_err(|e| AppError::Llm(format!("Domain extraction failed: {e}")))?;

    let options = domain_options(extract_domain_list(response.trim()));
    info!(%session_id, count = options.len(), "Domain options extracted");
    // Options derived from a resume that has since been replaced are discarded.
    let updated = update_session(sessions, session_id, |current| {
        if current.fingerprint == snapshot.fingerprint {
            current.with_domain_options(options.clone())
        } else {
            current.clone()
        }
    })
    .await?;
    if updated.fingerprint != snapshot.fingerprint {
        return Err(resume_replaced());
    }

    Ok(DomainView {
        options,
        selected: updated.selected_domain.clone(),
    })
}

/// Any string is accepted; the offered options are a suggestion, not a constraint.
pub async fn select_domain(
    sessions: &SessionStore,
    session_id: Uuid,
    domain: String,
) -> Result<String, AppError> {
    let updated =
        update_session(sessions, session_id, |current| current.with_selected_domain(domain)).await?;
    Ok(updated.selected_domain.clone())
}

/// Generates a question set for the selected domain (or `domain_override`) and
/// stores the split result for a later "show answers".
pub async fn generate_questions(
    sessions: &SessionStore,
    llm: &dyn TextGenerator,
    session_id: Uuid,
    question_type: QuestionType,
    domain_override: Option<String>,
) -> Result<QuizRecord, AppError> {
    let snapshot = load_session(sessions, session_id).await?;
    let analysis = require_analysis(&snapshot)?;
    let domain = domain_override.unwrap_or_else(|| snapshot.selected_domain.clone());

    let response = llm
        .generate(&build_question_prompt(analysis, &domain, question_type))
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    let (questions, answers) = split_questions_and_answers(&response);
    let quiz = QuizRecord {
        question_type,
        domain,
        questions,
        answers,
        generated_at: Utc::now(),
    };
    info!(%session_id, ?question_type, domain = %quiz.domain, "Questions generated");
    let updated = update_session(sessions, session_id, |current| {
        if current.fingerprint == snapshot.fingerprint {
            current.with_quiz(quiz.clone())
        } else {
            current.clone()
        }
    })
    .await?;
    if updated.fingerprint != snapshot.fingerprint {
        return Err(resume_replaced());
    }
    Ok(quiz)
}

pub async fn show_answers(sessions: &SessionStore, session_id: Uuid) -> Result<String, AppError> {
    let snapshot = load_session(sessions, session_id).await?;
    snapshot
        .last_quiz
        .as_ref()
        .map(|quiz| quiz.answers.clone())
        .ok_or_else(|| AppError::NotFound("No questions have been generated yet".to_string()))
}

pub async fn match_job_description(
    sessions: &SessionStore,
    llm: &dyn TextGenerator,
    session_id: Uuid,
    job_description: &str,
) -> Result<MatchReport, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide a job description".to_string(),
        ));
    }

    let snapshot = load_session(sessions, session_id).await?;
    let resume_text = snapshot
        .resume_text
        .as_deref()
        .ok_or_else(|| AppError::Conflict("Upload a resume to analyze first".to_string()))?;

    let report = llm
        .generate(&build_match_prompt(resume_text, job_description))
        .await
        .map_err(|e| AppError::Llm(format!("ATS match failed: {e}")))?;

    let match_percentage = extract_match_percentage(&report);
    info!(%session_id, ?match_percentage, "ATS match computed");
    Ok(MatchReport {
        report,
        match_percentage,
    })
}

pub async fn rephrase(llm: &dyn TextGenerator, text: &str) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter the text to rephrase".to_string(),
        ));
    }
    llm.generate(&build_rephrase_prompt(text))
        .await
        .map_err(|e| AppError::Llm(format!("Rephrase failed: {e}")))
}
