//! Claim field schema: the 18-slot record every extraction run populates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every extractable claim field.
///
/// Exhaustive by design: adding a slot to [`ExtractedFields`] without
/// wiring its keywords, patterns, and confidence tier fails to compile
/// (every table in `vocab.rs` and `confidence.rs` matches on this enum
/// without a wildcard arm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    PolicyNumber,
    PolicyholderName,
    PolicyEffectiveDate,
    PolicyExpiryDate,
    IncidentDate,
    IncidentTime,
    Location,
    Description,
    ClaimType,
    ClaimantName,
    ClaimantContact,
    ThirdParties,
    AssetType,
    AssetId,
    EstimatedDamage,
    InitialEstimate,
    HasInjury,
    Attachments,
}

impl FieldKey {
    pub const ALL: [FieldKey; 18] = [
        FieldKey::PolicyNumber,
        FieldKey::PolicyholderName,
        FieldKey::PolicyEffectiveDate,
        FieldKey::PolicyExpiryDate,
        FieldKey::IncidentDate,
        FieldKey::IncidentTime,
        FieldKey::Location,
        FieldKey::Description,
        FieldKey::ClaimType,
        FieldKey::ClaimantName,
        FieldKey::ClaimantContact,
        FieldKey::ThirdParties,
        FieldKey::AssetType,
        FieldKey::AssetId,
        FieldKey::EstimatedDamage,
        FieldKey::InitialEstimate,
        FieldKey::HasInjury,
        FieldKey::Attachments,
    ];

    /// Human-readable name used in validation and routing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            FieldKey::PolicyNumber => "Policy Number",
            FieldKey::PolicyholderName => "Policyholder Name",
            FieldKey::PolicyEffectiveDate => "Policy Effective Date",
            FieldKey::PolicyExpiryDate => "Policy Expiry Date",
            FieldKey::IncidentDate => "Incident Date",
            FieldKey::IncidentTime => "Incident Time",
            FieldKey::Location => "Location",
            FieldKey::Description => "Description",
            FieldKey::ClaimType => "Claim Type",
            FieldKey::ClaimantName => "Claimant Name",
            FieldKey::ClaimantContact => "Claimant Contact",
            FieldKey::ThirdParties => "Third Parties",
            FieldKey::AssetType => "Asset Type",
            FieldKey::AssetId => "Asset Id",
            FieldKey::EstimatedDamage => "Estimated Damage",
            FieldKey::InitialEstimate => "Initial Estimate",
            FieldKey::HasInjury => "Has Injury",
            FieldKey::Attachments => "Attachments",
        }
    }
}

/// Per-field confidence scores in [0, 1].
///
/// Populated only for fields that were actually set; absence means
/// "not extracted". A `BTreeMap` keeps serialization order deterministic.
pub type ConfidenceMap = BTreeMap<FieldKey, f32>;

/// Flat claim record, schema-initialized so downstream consumers always see
/// the full 18-key shape: string slots default to empty, list slots to empty
/// sequences, money slots to absent. The extractor never fabricates a value
/// it did not find, except `has_injury` which is always computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    // Policy
    pub policy_number: String,
    pub policyholder_name: String,
    pub policy_effective_date: String,
    pub policy_expiry_date: String,

    // Incident
    pub incident_date: String,
    pub incident_time: String,
    pub location: String,
    pub description: String,
    pub claim_type: String,

    // Parties
    pub claimant_name: String,
    pub claimant_contact: String,
    pub third_parties: Vec<String>,

    // Asset
    pub asset_type: String,
    pub asset_id: String,

    // Financial
    pub estimated_damage: Option<f64>,
    pub initial_estimate: Option<f64>,

    // Other
    pub has_injury: bool,
    pub attachments: Vec<String>,
}

impl ExtractedFields {
    /// Current value of a text slot; `None` for keys that do not hold text.
    pub fn text_value(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::PolicyNumber => Some(&self.policy_number),
            FieldKey::PolicyholderName => Some(&self.policyholder_name),
            FieldKey::PolicyEffectiveDate => Some(&self.policy_effective_date),
            FieldKey::PolicyExpiryDate => Some(&self.policy_expiry_date),
            FieldKey::IncidentDate => Some(&self.incident_date),
            FieldKey::IncidentTime => Some(&self.incident_time),
            FieldKey::Location => Some(&self.location),
            FieldKey::Description => Some(&self.description),
            FieldKey::ClaimType => Some(&self.claim_type),
            FieldKey::ClaimantName => Some(&self.claimant_name),
            FieldKey::ClaimantContact => Some(&self.claimant_contact),
            FieldKey::AssetType => Some(&self.asset_type),
            FieldKey::AssetId => Some(&self.asset_id),
            FieldKey::ThirdParties
            | FieldKey::EstimatedDamage
            | FieldKey::InitialEstimate
            | FieldKey::HasInjury
            | FieldKey::Attachments => None,
        }
    }

    /// Assign a text slot. Returns false for keys that do not hold text.
    pub fn set_text(&mut self, key: FieldKey, value: String) -> bool {
        let slot = match key {
            FieldKey::PolicyNumber => &mut self.policy_number,
            FieldKey::PolicyholderName => &mut self.policyholder_name,
            FieldKey::PolicyEffectiveDate => &mut self.policy_effective_date,
            FieldKey::PolicyExpiryDate => &mut self.policy_expiry_date,
            FieldKey::IncidentDate => &mut self.incident_date,
            FieldKey::IncidentTime => &mut self.incident_time,
            FieldKey::Location => &mut self.location,
            FieldKey::Description => &mut self.description,
            FieldKey::ClaimType => &mut self.claim_type,
            FieldKey::ClaimantName => &mut self.claimant_name,
            FieldKey::ClaimantContact => &mut self.claimant_contact,
            FieldKey::AssetType => &mut self.asset_type,
            FieldKey::AssetId => &mut self.asset_id,
            FieldKey::ThirdParties
            | FieldKey::EstimatedDamage
            | FieldKey::InitialEstimate
            | FieldKey::HasInjury
            | FieldKey::Attachments => return false,
        };
        *slot = value;
        true
    }

    /// Whether a text slot is still unpopulated.
    pub fn text_is_empty(&self, key: FieldKey) -> bool {
        self.text_value(key).map_or(true, |v| v.trim().is_empty())
    }
}
