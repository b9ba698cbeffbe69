//! Stage 7: result assembly.
//!
//! Pure aggregation of the extraction, validation, and routing outputs into
//! the caller-facing artifact. No failure mode.

use serde::{Deserialize, Serialize};

use super::extract::{ConfidenceMap, ExtractedFields, ExtractionOutcome};
use super::route::{RoutingDecision, RoutingResult};
use super::validate::ValidationResult;

/// Terminal artifact of one pipeline run. Owned by the caller; nothing in
/// the pipeline retains or mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub extracted_fields: ExtractedFields,
    pub missing_fields: Vec<String>,
    pub recommended_route: RoutingDecision,
    pub reasoning: Vec<String>,
    pub confidence: f32,
    pub field_confidence: ConfidenceMap,
}

impl ProcessingResult {
    /// Serialize for callers that want the wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Assemble the final result. Field order and contents pass through
/// untouched from the stage outputs.
pub fn format_result(
    extraction: ExtractionOutcome,
    validation: &ValidationResult,
    routing: RoutingResult,
) -> ProcessingResult {
    ProcessingResult {
        extracted_fields: extraction.fields,
        missing_fields: validation.missing_fields.clone(),
        recommended_route: routing.decision,
        reasoning: routing.reasons,
        confidence: routing.confidence,
        field_confidence: extraction.confidence,
    }
}
