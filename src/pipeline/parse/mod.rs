//! Stage 2: document parsing.
//!
//! Produces the raw text stream and, for PDFs, any interactive form-field
//! values. When a form carries usable values the form is authoritative and
//! the text stream is suppressed, so later heuristics cannot misread field
//! captions printed on the form as values.

pub mod pdf;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PipelineError;
use crate::input::InputFile;

/// Raw form-field values keyed by fully-qualified field name. `None` means
/// the field exists but is unchecked/empty.
pub type FormFields = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub page_count: Option<usize>,
    pub form_fields: Option<FormFields>,
}

/// Output of the parse stage: text stream plus document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Parse a validated file into text and metadata.
pub fn parse_document(file: &InputFile) -> Result<ParsedDocument, PipelineError> {
    let extension = file.extension().unwrap_or_default();
    let declared = file.mime_type.as_deref().unwrap_or_default();
    let file_type = if declared.is_empty() {
        match extension.as_str() {
            ".pdf" => "application/pdf".to_string(),
            ".txt" => "text/plain".to_string(),
            _ => "application/octet-stream".to_string(),
        }
    } else {
        declared.to_string()
    };

    let (text, page_count, form_fields) = if declared == "application/pdf" || extension == ".pdf"
    {
        let (page_text, page_count) = pdf::extract_page_text(&file.bytes)?;
        let form_fields = pdf::extract_form_fields(&file.bytes);
        let has_form_values = form_fields
            .as_ref()
            .is_some_and(|m| m.values().any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty())));
        if has_form_values {
            debug!(
                fields = form_fields.as_ref().map(|m| m.len()).unwrap_or(0),
                "form is authoritative, text stream suppressed"
            );
        }
        let text = if has_form_values { String::new() } else { page_text };
        (text, Some(page_count), form_fields)
    } else if declared == "text/plain" || extension == ".txt" {
        let text = std::str::from_utf8(&file.bytes)
            .map_err(|e| PipelineError::Parse(format!("invalid UTF-8 text: {e}")))?
            .to_string();
        (text, None, None)
    } else {
        // Unreachable when stage 1 ran; kept as a defensive check.
        return Err(PipelineError::Parse(format!(
            "Unsupported file type: {file_type}"
        )));
    };

    Ok(ParsedDocument {
        text,
        metadata: DocumentMetadata {
            file_name: file.name.clone(),
            file_type,
            file_size: file.size(),
            page_count,
            form_fields,
        },
    })
}
