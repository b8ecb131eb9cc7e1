use super::{DocumentFormat, ExtractError, TextExtractor};

/// Page-ordered text of a PDF, pages concatenated without separator normalization.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Malformed {
            format: DocumentFormat::Pdf,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fixtures::pdf_with_pages;

    #[test]
    fn test_two_page_pdf_keeps_page_order() {
        let bytes = pdf_with_pages(&["Jane Doe Backend Engineer", "Python, Django, REST API"]);
        let text = PdfExtractor.extract(&bytes).unwrap();

        let first = text.find("Jane Doe").expect("page 1 text missing");
        let second = text.find("Python, Django, REST API").expect("page 2 text missing");
        assert!(first < second);
    }
}
