use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::extraction::DocumentFormat;

/// Navigation layout served to the browser page.
/// `Single` is one scrolling flow; `Sidebar` splits the tools into pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLayout {
    Single,
    #[default]
    Sidebar,
}

impl FromStr for UiLayout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(UiLayout::Single),
            "sidebar" => Ok(UiLayout::Sidebar),
            other => bail!("unknown UI layout '{other}' (expected 'single' or 'sidebar')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing or any value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Formats the upload endpoint accepts. Anything else is rejected before extraction.
    pub accepted_formats: Vec<DocumentFormat>,
    pub ui_layout: UiLayout,
    pub session_ttl_minutes: i64,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_ttl_minutes = optional_env("SESSION_TTL_MINUTES", "60")
            .parse::<i64>()
            .context("SESSION_TTL_MINUTES must be a whole number of minutes")?;
        if session_ttl_minutes <= 0 {
            bail!("SESSION_TTL_MINUTES must be greater than zero");
        }

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            accepted_formats: parse_formats(&optional_env("ACCEPTED_FORMATS", "pdf,docx"))
                .context("ACCEPTED_FORMATS is invalid")?,
            ui_layout: optional_env("UI_LAYOUT", "sidebar")
                .parse()
                .context("UI_LAYOUT is invalid")?,
            session_ttl_minutes,
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

/// Parses a comma-separated list such as `"pdf, docx"`. Duplicates collapse; order is kept.
pub fn parse_formats(raw: &str) -> Result<Vec<DocumentFormat>> {
    let mut formats = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let format: DocumentFormat = item.parse()?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        bail!("at least one document format must be accepted");
    }
    Ok(formats)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler tests; never reads the environment.
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            accepted_formats: vec![DocumentFormat::Pdf, DocumentFormat::Docx],
            ui_layout: UiLayout::Sidebar,
            session_ttl_minutes: 60,
            llm_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats_accepts_mixed_case_and_spaces() {
        let formats = parse_formats(" PDF , docx ").unwrap();
        assert_eq!(formats, vec![DocumentFormat::Pdf, DocumentFormat::Docx]);
    }

    #[test]
    fn test_parse_formats_pdf_only_variant() {
        assert_eq!(parse_formats("pdf").unwrap(), vec![DocumentFormat::Pdf]);
    }

    #[test]
    fn test_parse_formats_collapses_duplicates() {
        assert_eq!(parse_formats("pdf,pdf").unwrap(), vec![DocumentFormat::Pdf]);
    }

    #[test]
    fn test_parse_formats_rejects_unknown_format() {
        assert!(parse_formats("pdf,txt").is_err());
    }

    #[test]
    fn test_parse_formats_rejects_empty_list() {
        assert!(parse_formats(" , ").is_err());
    }

    #[test]
    fn test_ui_layout_parses_both_variants() {
        assert_eq!("single".parse::<UiLayout>().unwrap(), UiLayout::Single);
        assert_eq!("Sidebar".parse::<UiLayout>().unwrap(), UiLayout::Sidebar);
        assert!("tabs".parse::<UiLayout>().is_err());
    }
}
