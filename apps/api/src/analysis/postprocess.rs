//! Best-effort string handling of raw model output. No grammar, no schema:
//! every function has a defined result for any input, including empty text.

/// Literal header separating a question block from its answers.
pub const ANSWERS_MARKER: &str = "Answers:";

/// Answers block used when the model response carries no `Answers:` header.
pub const ANSWERS_NOT_FOUND: &str = "Answers section not found in the response.";

/// Domains offered before any LLM-derived ones.
pub const DEFAULT_DOMAINS: [&str; 3] = ["DSA", "DBMS", "Programming Basics"];

const MATCH_PERCENTAGE_LABEL: &str = "match percentage";

/// Splits on the first `Answers:`. Case-sensitive; later occurrences stay in the answers block.
pub fn split_questions_and_answers(text: &str) -> (String, String) {
    match text.split_once(ANSWERS_MARKER) {
        Some((questions, answers)) => (questions.to_string(), answers.to_string()),
        None => (text.to_string(), ANSWERS_NOT_FOUND.to_string()),
    }
}

/// Comma split with per-item trim. Empty items and duplicates are kept.
pub fn extract_domain_list(text: &str) -> Vec<String> {
    text.split(',').map(|d| d.trim().to_string()).collect()
}

/// Defaults first, then the parsed domains in model order.
pub fn domain_options(parsed: Vec<String>) -> Vec<String> {
    DEFAULT_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .chain(parsed)
        .collect()
}

/// Finds the first line mentioning "match percentage" (any case), keeps the digits
/// after its last `:`. `None` means unavailable: no such line, or no digits on it.
pub fn extract_match_percentage(text: &str) -> Option<u32> {
    let line = text
        .lines()
        .find(|line| line.to_lowercase().contains(MATCH_PERCENTAGE_LABEL))?;
    let tail = line.rsplit(':').next().unwrap_or(line);
    let digits: String = tail.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_returns_both_halves_exactly() {
        let q = "1. What is a B-tree?\na. ...\n\n";
        let a = "\n\n1. c\n2. a";
        let (questions, answers) = split_questions_and_answers(&format!("{q}Answers:{a}"));
        assert_eq!(questions, q);
        assert_eq!(answers, a);
    }

    #[test]
    fn test_split_without_marker_uses_placeholder() {
        let text = "1. Tell me about a project you led.";
        let (questions, answers) = split_questions_and_answers(text);
        assert_eq!(questions, text);
        assert_eq!(answers, "Answers section not found in the response.");
    }

    #[test]
    fn test_split_is_case_sensitive() {
        let (_, answers) = split_questions_and_answers("Q1\nANSWERS:\n1. b");
        assert_eq!(answers, ANSWERS_NOT_FOUND);
    }

    #[test]
    fn test_split_uses_first_marker_only() {
        let (questions, answers) = split_questions_and_answers("Q\nAnswers: 1. a\nAnswers: 2. b");
        assert_eq!(questions, "Q\n");
        assert_eq!(answers, " 1. a\nAnswers: 2. b");
    }

    #[test]
    fn test_split_empty_input() {
        let (questions, answers) = split_questions_and_answers("");
        assert_eq!(questions, "");
        assert_eq!(answers, ANSWERS_NOT_FOUND);
    }

    #[test]
    fn test_domain_list_trims_and_keeps_order() {
        assert_eq!(extract_domain_list("ML, DS , SD"), vec!["ML", "DS", "SD"]);
    }

    #[test]
    fn test_domain_list_keeps_duplicates_and_empties() {
        assert_eq!(
            extract_domain_list("ML,, ML ,"),
            vec!["ML", "", "ML", ""]
        );
    }

    #[test]
    fn test_domain_list_of_empty_text_is_one_empty_item() {
        assert_eq!(extract_domain_list(""), vec![""]);
    }

    #[test]
    fn test_domain_options_prepends_defaults() {
        let options = domain_options(vec!["Machine Learning".to_string(), "DSA".to_string()]);
        assert_eq!(
            options,
            vec!["DSA", "DBMS", "Programming Basics", "Machine Learning", "DSA"]
        );
    }

    #[test]
    fn test_match_percentage_simple_line() {
        assert_eq!(extract_match_percentage("Match Percentage: 82%"), Some(82));
    }

    #[test]
    fn test_match_percentage_label_is_case_insensitive_and_markdown_tolerant() {
        let report = "# ATS Resume Evaluation\n\n**MATCH PERCENTAGE:** 67%\n\nMissing Keywords: Kafka";
        assert_eq!(extract_match_percentage(report), Some(67));
    }

    #[test]
    fn test_match_percentage_uses_text_after_last_colon() {
        assert_eq!(
            extract_match_percentage("Match percentage (ref: v2): 45 %"),
            Some(45)
        );
    }

    #[test]
    fn test_match_percentage_first_matching_line_wins() {
        let text = "Match Percentage: 70%\nRevised match percentage: 90%";
        assert_eq!(extract_match_percentage(text), Some(70));
    }

    #[test]
    fn test_match_percentage_missing_line_is_unavailable() {
        assert_eq!(extract_match_percentage("Score: 80%\nLooks good"), None);
    }

    #[test]
    fn test_match_percentage_line_without_digits_is_unavailable() {
        assert_eq!(extract_match_percentage("Match Percentage: N/A"), None);
    }
}
