//! Stage 5: field validation.
//!
//! Deterministic, no I/O. Required-field absence is an error and a
//! missing-fields entry; important-field absence and consistency anomalies
//! are warnings only. Malformed date strings never error: an unparsable
//! date cannot disprove anything, so it defaults to valid.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::extract::{ExtractedFields, FieldKey};
use crate::config::ESTIMATE_MISMATCH_RATIO;

const REQUIRED_FIELDS: [FieldKey; 4] = [
    FieldKey::PolicyNumber,
    FieldKey::PolicyholderName,
    FieldKey::IncidentDate,
    FieldKey::Description,
];

const IMPORTANT_FIELDS: [FieldKey; 3] =
    [FieldKey::ClaimType, FieldKey::Location, FieldKey::AssetType];

/// Formats a lenient date parser accepts, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub missing_fields: Vec<String>,
}

/// Check required/important fields and cross-field consistency.
pub fn validate_fields(fields: &ExtractedFields) -> ValidationResult {
    validate_fields_at(fields, Local::now().date_naive())
}

/// Same as [`validate_fields`] with an injectable "today" for the
/// future-date check.
pub fn validate_fields_at(fields: &ExtractedFields, today: NaiveDate) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut missing_fields = Vec::new();

    for key in REQUIRED_FIELDS {
        if fields.text_is_empty(key) {
            missing_fields.push(key.display_name().to_string());
            errors.push(format!("Missing required field: {}", key.display_name()));
        }
    }

    for key in IMPORTANT_FIELDS {
        if fields.text_is_empty(key) {
            warnings.push(format!("Missing important field: {}", key.display_name()));
        }
    }

    // Future incident dates are rejected; the check is end-of-day
    // inclusive, so "today" is fine.
    if let Some(incident) = parse_loose_date(&fields.incident_date) {
        if incident > today {
            errors.push("Incident date cannot be in the future".to_string());
        }
    }

    let effective = parse_loose_date(&fields.policy_effective_date);
    let expiry = parse_loose_date(&fields.policy_expiry_date);
    if let (Some(effective), Some(expiry)) = (effective, expiry) {
        if effective >= expiry {
            errors.push("Policy effective date must be before expiry date".to_string());
        }
        if let Some(incident) = parse_loose_date(&fields.incident_date) {
            if incident < effective || incident > expiry {
                warnings.push("Incident date appears to be outside policy period".to_string());
            }
        }
    }

    if let Some(damage) = fields.estimated_damage {
        if damage < 0.0 {
            errors.push("Estimated damage cannot be negative".to_string());
        } else if damage == 0.0 {
            warnings.push("Estimated damage is $0 - please verify".to_string());
        }
    }
    if let Some(estimate) = fields.initial_estimate {
        if estimate < 0.0 {
            errors.push("Initial estimate cannot be negative".to_string());
        } else if estimate == 0.0 {
            warnings.push("Initial estimate is $0 - please verify".to_string());
        }
    }
    if let (Some(damage), Some(estimate)) = (fields.estimated_damage, fields.initial_estimate) {
        if (damage - estimate).abs() > damage * ESTIMATE_MISMATCH_RATIO {
            warnings
                .push("Significant difference between damage estimates - review required".to_string());
        }
    }

    if fields.incident_time.trim().is_empty() {
        warnings.push("Incident time is missing".to_string());
    }
    if fields.claimant_name.trim().is_empty() {
        warnings.push("Claimant name is missing".to_string());
    }
    if fields.claimant_contact.trim().is_empty() {
        warnings.push("Claimant contact information is missing".to_string());
    }
    if fields.asset_id.trim().is_empty() && is_vehicle(&fields.asset_type) {
        warnings.push("Vehicle VIN is missing".to_string());
    }
    if fields.third_parties.is_empty() {
        warnings.push("No third parties information available".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        missing_fields,
    }
}

/// Lenient date parse across common FNOL formats. `None` means the string
/// is absent or unrecognizable.
fn parse_loose_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

fn is_vehicle(asset_type: &str) -> bool {
    let lowered = asset_type.to_lowercase();
    ["vehicle", "car", "truck", "motorcycle", "suv", "sedan", "coupe", "van", "auto"]
        .iter()
        .any(|term| lowered.contains(term))
}
