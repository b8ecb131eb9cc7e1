//! Per-visitor session state.
//!
//! A session is an immutable `SessionSnapshot`. Every change builds a new snapshot
//! and swaps it into the store whole, so a reader never sees a half-applied update
//! and "did the file change" is a plain equality check on the stored fingerprint.
//! Nothing is persisted; idle sessions are evicted after the configured TTL.

pub mod store;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::prompts::QuestionType;
use crate::extraction::DocumentFingerprint;

pub use store::SessionStore;

/// Domain selected before the user picks one.
pub const INITIAL_DOMAIN: &str = "DSA";

/// The last generated question set, already split.
#[derive(Debug, Clone, Serialize)]
pub struct QuizRecord {
    pub question_type: QuestionType,
    pub domain: String,
    pub questions: String,
    pub answers: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub fingerprint: Option<DocumentFingerprint>,
    pub resume_text: Option<String>,
    pub analysis: Option<String>,
    /// Defaults plus LLM-derived domains; filled lazily once per analysis.
    pub domain_options: Option<Vec<String>>,
    pub selected_domain: String,
    pub last_quiz: Option<QuizRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            fingerprint: None,
            resume_text: None,
            analysis: None,
            domain_options: None,
            selected_domain: INITIAL_DOMAIN.to_string(),
            last_quiz: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when this exact document has already been analyzed in this session.
    pub fn has_analysis_for(&self, fingerprint: &DocumentFingerprint) -> bool {
        self.analysis.is_some() && self.fingerprint.as_ref() == Some(fingerprint)
    }

    /// New document analyzed. Derived state (domains, quiz) belongs to the old
    /// document and is dropped; the selected domain carries over.
    pub fn with_analysis(
        &self,
        fingerprint: DocumentFingerprint,
        resume_text: String,
        analysis: String,
    ) -> Self {
        Self {
            fingerprint: Some(fingerprint),
            resume_text: Some(resume_text),
            analysis: Some(analysis),
            domain_options: None,
            last_quiz: None,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn with_domain_options(&self, options: Vec<String>) -> Self {
        Self {
            domain_options: Some(options),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn with_selected_domain(&self, domain: String) -> Self {
        Self {
            selected_domain: domain,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn with_quiz(&self, quiz: QuizRecord) -> Self {
        Self {
            last_quiz: Some(quiz),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(name: &str) -> DocumentFingerprint {
        DocumentFingerprint {
            file_name: name.to_string(),
            size: 3,
            sha256: "ab".repeat(32),
        }
    }

    fn quiz() -> QuizRecord {
        QuizRecord {
            question_type: QuestionType::Mcq,
            domain: "DSA".to_string(),
            questions: "Q".to_string(),
            answers: "A".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_session_defaults_to_dsa_without_analysis() {
        let snapshot = SessionSnapshot::new(Uuid::new_v4());
        assert_eq!(snapshot.selected_domain, "DSA");
        assert!(snapshot.analysis.is_none());
        assert!(!snapshot.has_analysis_for(&fingerprint("cv.pdf")));
    }

    #[test]
    fn test_with_analysis_leaves_original_untouched() {
        let original = SessionSnapshot::new(Uuid::new_v4());
        let updated = original.with_analysis(fingerprint("cv.pdf"), "text".into(), "analysis".into());

        assert!(original.analysis.is_none());
        assert_eq!(updated.analysis.as_deref(), Some("analysis"));
        assert_eq!(updated.id, original.id);
        assert!(updated.has_analysis_for(&fingerprint("cv.pdf")));
        assert!(!updated.has_analysis_for(&fingerprint("other.pdf")));
    }

    #[test]
    fn test_new_analysis_clears_derived_state_but_keeps_domain() {
        let snapshot = SessionSnapshot::new(Uuid::new_v4())
            .with_analysis(fingerprint("a.pdf"), "t".into(), "a".into())
            .with_domain_options(vec!["DSA".into(), "ML".into()])
            .with_selected_domain("ML".into())
            .with_quiz(quiz());

        let reanalyzed = snapshot.with_analysis(fingerprint("b.pdf"), "t2".into(), "a2".into());
        assert!(reanalyzed.domain_options.is_none());
        assert!(reanalyzed.last_quiz.is_none());
        assert_eq!(reanalyzed.selected_domain, "ML");
    }
}
