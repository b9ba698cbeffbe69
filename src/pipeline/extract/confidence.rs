//! Fixed confidence tiers per field and source.
//!
//! Confidence is a hard-coded constant per field/source, not a model of
//! match quality. Form-derived values outrank every text heuristic.

use super::schema::FieldKey;

/// Values read from interactive PDF form fields.
pub const FORM_CONFIDENCE: f32 = 0.95;

/// Injury keyword present in the text.
pub const INJURY_PRESENT: f32 = 0.9;

/// No injury keyword anywhere in the text. Absence of a match is a stronger
/// signal than presence, hence the higher score.
pub const INJURY_ABSENT: f32 = 0.95;

/// Tier for a field set by the text pass (keyword or pattern match).
pub fn text_tier(key: FieldKey) -> f32 {
    match key {
        FieldKey::PolicyNumber => 0.8,
        FieldKey::PolicyholderName => 0.7,
        FieldKey::PolicyEffectiveDate => 0.7,
        FieldKey::PolicyExpiryDate => 0.7,
        FieldKey::IncidentDate => 0.75,
        FieldKey::IncidentTime => 0.7,
        FieldKey::Location => 0.7,
        FieldKey::Description => 0.65,
        FieldKey::ClaimType => 0.7,
        FieldKey::ClaimantName => 0.7,
        FieldKey::ClaimantContact => 0.8,
        FieldKey::ThirdParties => 0.6,
        FieldKey::AssetType => 0.7,
        FieldKey::AssetId => 0.8,
        FieldKey::EstimatedDamage => 0.8,
        FieldKey::InitialEstimate => 0.7,
        FieldKey::HasInjury => INJURY_PRESENT,
        FieldKey::Attachments => 0.6,
    }
}
