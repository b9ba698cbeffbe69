//! Stage 4: field extraction.
//!
//! Reconciles two signal sources into one schema instance: interactive
//! form-field values (authoritative when present) and text heuristics
//! (fallback, fills only what the form left empty). `has_injury` is the one
//! field always populated.

pub mod confidence;
pub mod form;
pub mod schema;
pub mod text;
pub mod vocab;

pub use schema::{ConfidenceMap, ExtractedFields, FieldKey};

use tracing::debug;

use super::parse::FormFields;
use confidence::{INJURY_ABSENT, INJURY_PRESENT};

/// Extraction output: the populated schema plus per-field confidences.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    pub fields: ExtractedFields,
    pub confidence: ConfidenceMap,
}

/// Populate the claim schema from form fields and/or normalized text.
pub fn extract_fields(form_fields: Option<&FormFields>, normalized_text: &str) -> ExtractionOutcome {
    let mut fields = ExtractedFields::default();
    let mut confidence = ConfidenceMap::new();

    if let Some(raw) = form_fields {
        form::apply_form_fields(raw, &mut fields, &mut confidence);
        debug!(mapped = confidence.len(), "form pass complete");
    }

    text::scan_text(normalized_text, &mut fields, &mut confidence);

    // Always computed, unless the form already answered it.
    if !confidence.contains_key(&FieldKey::HasInjury) {
        let injured = text::detect_injury(normalized_text);
        fields.has_injury = injured;
        confidence.insert(
            FieldKey::HasInjury,
            if injured { INJURY_PRESENT } else { INJURY_ABSENT },
        );
    }

    debug!(set = confidence.len(), "extraction complete");
    ExtractionOutcome { fields, confidence }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injury_absent_scores_higher_than_present() {
        let calm = extract_fields(None, "a tree fell on the fence");
        assert!(!calm.fields.has_injury);
        assert_eq!(calm.confidence[&FieldKey::HasInjury], 0.95);

        let injured = extract_fields(None, "the driver was injured");
        assert!(injured.fields.has_injury);
        assert_eq!(injured.confidence[&FieldKey::HasInjury], 0.9);
    }

    #[test]
    fn form_values_outrank_text() {
        let mut raw = FormFields::new();
        raw.insert("POLICY NUMBER".into(), Some("POL-FORM".into()));

        let outcome = extract_fields(Some(&raw), "Policy Number: POL-TEXT");
        assert_eq!(outcome.fields.policy_number, "POL-FORM");
        assert_eq!(outcome.confidence[&FieldKey::PolicyNumber], 0.95);
    }

    #[test]
    fn text_fills_slots_the_form_missed() {
        let mut raw = FormFields::new();
        raw.insert("POLICY NUMBER".into(), Some("POL-FORM".into()));

        let outcome = extract_fields(Some(&raw), "Claimant: John Roe");
        assert_eq!(outcome.fields.policy_number, "POL-FORM");
        assert_eq!(outcome.fields.claimant_name, "John Roe");
        assert_eq!(outcome.confidence[&FieldKey::ClaimantName], 0.7);
    }

    #[test]
    fn full_shape_survives_empty_input() {
        let outcome = extract_fields(None, "");
        assert_eq!(outcome.fields.policy_number, "");
        assert!(!outcome.fields.has_injury);
        // Only the always-computed flag carries a confidence.
        assert_eq!(outcome.confidence.len(), 1);
        assert!(outcome.confidence.contains_key(&FieldKey::HasInjury));
    }
}
