//! File-to-text extraction for uploaded resumes. PDF and DOCX only; the
//! parsing libraries are external collaborators, this module just dispatches
//! on content type and rejects unusable results.

use docx_rs::{DocumentChild, Docx, ParagraphChild, RunChild};

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Shorter extractions than this are treated as image-only scans.
const MIN_EXTRACTED_CHARS: usize = 10;

/// Extracts plain text from an uploaded resume, dispatching on content type.
pub fn extract_text(content_type: &str, data: &[u8]) -> Result<String, AppError> {
    match content_type {
        PDF_MIME => extract_pdf(data),
        DOCX_MIME => extract_docx(data),
        _ => Err(AppError::Validation(
            "Please upload a PDF or DOCX file.".to_string(),
        )),
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Validation(format!("Failed to read PDF: {e}")))?;
    if text.trim().chars().count() < MIN_EXTRACTED_CHARS {
        return Err(AppError::Validation(
            "PDF is empty or contains only images.".to_string(),
        ));
    }
    Ok(text)
}

fn extract_docx(data: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(data)
        .map_err(|_| AppError::Validation("Failed to read DOCX file.".to_string()))?;
    Ok(docx_text(&docx))
}

/// Flattens a DOCX document tree into newline-joined paragraph text.
fn docx_text(docx: &Docx) -> String {
    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(text) = rc {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            if !line.trim().is_empty() {
                paragraphs.push(line);
            }
        }
    }
    paragraphs.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Paragraph, Run};

    #[test]
    fn test_unsupported_content_type_is_rejected() {
        let err = extract_text("text/plain", b"hello").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_docx_text_joins_paragraphs() {
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rust Engineer")))
            .add_paragraph(Paragraph::new()); // empty paragraphs are dropped
        assert_eq!(docx_text(&docx), "Jane Doe\nRust Engineer");
    }

    #[test]
    fn test_garbage_pdf_bytes_fail_validation() {
        let err = extract_text(PDF_MIME, b"not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
