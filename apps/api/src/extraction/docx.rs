use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::{DocumentFormat, ExtractError, TextExtractor};

/// Paragraph text of a DOCX body, one line per paragraph. Tables and images are skipped.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let docx = read_docx(bytes).map_err(|e| ExtractError::Malformed {
            format: DocumentFormat::Docx,
            message: format!("{e:?}"),
        })?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                text.push_str(&paragraph_text(paragraph));
                text.push('\n');
            }
        }
        Ok(text)
    }
}

/// Runs inside one paragraph belong to the same line, so they join with no separator.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut line = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    line.push_str(&t.text);
                }
            }
        }
    }
    line
}
