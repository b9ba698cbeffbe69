//! Seven-stage claim intake pipeline.
//!
//! validate file → parse → normalize → extract → validate fields → route →
//! format. One invocation per document; no state survives between runs.
//! Stages 1 and 2 can fail; everything downstream is total.

pub mod file_check;
pub mod parse;
pub mod normalize;
pub mod extract;
pub mod validate;
pub mod route;
pub mod report;

pub use extract::{ConfidenceMap, ExtractedFields, FieldKey};
pub use file_check::FileValidation;
pub use parse::{DocumentMetadata, ParsedDocument};
pub use report::ProcessingResult;
pub use route::{RoutingDecision, RoutingResult};
pub use validate::ValidationResult;

use tracing::{debug, info, warn};

use crate::input::InputFile;

/// Errors that can occur during claim-document processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Stage 1 rejection; the message aggregates every admission failure.
    #[error("File validation failed: {0}")]
    FileRejected(String),

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the full pipeline over one uploaded document.
///
/// Parsing runs on a blocking worker; the rest is cheap synchronous work.
pub async fn process_document(file: &InputFile) -> Result<ProcessingResult, PipelineError> {
    info!(name = %file.name, size = file.size(), "processing document");

    let admission = file_check::validate_file(file);
    if !admission.is_valid {
        return Err(PipelineError::FileRejected(admission.errors.join(", ")));
    }

    // PDF text extraction is CPU-bound; keep it off the async executor.
    let owned = file.clone();
    let parsed = tokio::task::spawn_blocking(move || parse::parse_document(&owned))
        .await
        .map_err(|e| PipelineError::Parse(format!("parser task failed: {e}")))??;
    debug!(
        pages = ?parsed.metadata.page_count,
        form_fields = parsed.metadata.form_fields.as_ref().map(|m| m.len()),
        text_len = parsed.text.len(),
        "document parsed"
    );

    let normalized = normalize::normalize_text(&parsed.text);
    let extraction = extract::extract_fields(
        parsed.metadata.form_fields.as_ref(),
        &normalized.normalized_text,
    );
    let validation = validate::validate_fields(&extraction.fields);
    if !validation.is_valid {
        warn!(errors = validation.errors.len(), "claim record failed validation");
    }
    let routing = route::decide_route(&extraction.fields, &validation, &normalized.normalized_text);
    let result = report::format_result(extraction, &validation, routing);

    info!(
        route = result.recommended_route.as_str(),
        missing = result.missing_fields.len(),
        "processing complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(content: &str) -> InputFile {
        InputFile::new("claim.txt", Some("text/plain".into()), content.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn rejected_file_aggregates_reasons() {
        let file = InputFile::new("claim.docx", Some("application/msword".into()), vec![]);
        let err = process_document(&file).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("File validation failed:"));
        assert!(message.contains("Invalid file extension"));
        assert!(message.contains("File is empty."));
        // Reasons read as a comma-separated list.
        assert!(message.contains("allowed., "), "got: {message}");
    }

    #[tokio::test]
    async fn minimal_valid_claim_flows_end_to_end() {
        let file = txt(
            "Policy Number: POL-42\nInsured: Jane Doe\nDate of Loss: 01/01/2020\n\
             Description: Hail damage to roof\nEstimated Damage: $3,000",
        );
        let result = process_document(&file).await.unwrap();
        assert_eq!(result.recommended_route, RoutingDecision::FastTrack);
        assert!(result.missing_fields.is_empty());
        assert_eq!(result.extracted_fields.estimated_damage, Some(3_000.0));
    }

    #[tokio::test]
    async fn sparse_document_goes_to_manual_review() {
        let file = txt("no recognizable structure here");
        let result = process_document(&file).await.unwrap();
        assert_eq!(result.recommended_route, RoutingDecision::ManualReview);
        assert!(!result.missing_fields.is_empty());
    }
}
