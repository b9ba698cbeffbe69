//! Text-pass heuristics: keyword line capture first, pattern fallback second.
//!
//! Runs over the normalized text and fills only slots the form pass left
//! empty. Every helper is pure; a value that fails its own parse is treated
//! as not found rather than surfaced as an error.

use regex::Regex;

use super::confidence::text_tier;
use super::schema::{ConfidenceMap, ExtractedFields, FieldKey};
use super::vocab::{
    looks_like_label, ASSET_TYPE_PATTERNS, CLAIM_TYPE_PATTERNS, CURRENCY_PATTERNS,
    DATE_PATTERNS, EMAIL_PATTERNS, INJURY_TERMS, KEYWORD_LINE_PATTERNS, PHONE_PATTERNS,
    POLICY_NUMBER_PATTERNS, TIME_PATTERNS, VIN_PATTERNS,
};

/// Description values are capped to keep the record renderable.
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Minimum capture length for third-party / attachment entries.
const MIN_LIST_ENTRY_CHARS: usize = 4;

/// Capture the remainder of the line after the first matching label for
/// `key`. Labels are tried in configured order; the label-echo guard
/// rejects captures that restate a field caption.
pub fn extract_after_keyword(text: &str, key: FieldKey) -> Option<String> {
    for pattern in &KEYWORD_LINE_PATTERNS[&key] {
        if let Some(caps) = pattern.captures(text) {
            let value = caps.get(1).map(|m| m.as_str().trim())?;
            if !value.is_empty() && !looks_like_label(value) {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// First match across a pattern list. Group 1 when the pattern isolates a
/// value, whole match otherwise.
pub fn first_pattern_match(text: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let m = caps.get(1).or_else(|| caps.get(0))?;
            return Some(m.as_str().trim().to_string());
        }
    }
    None
}

/// Parse a currency amount: first `$`/`USD`-marked match, thousands
/// separators stripped. Unparsable means not found.
pub fn extract_currency(text: &str) -> Option<f64> {
    let raw = first_pattern_match(text, &CURRENCY_PATTERNS)?;
    let cleaned = raw.replace(['$', ','], "");
    cleaned.trim().parse::<f64>().ok()
}

/// Fill every still-empty slot from the normalized text.
pub fn scan_text(text: &str, fields: &mut ExtractedFields, confidence: &mut ConfidenceMap) {
    // Policy
    fill_text(fields, confidence, FieldKey::PolicyNumber, || {
        extract_after_keyword(text, FieldKey::PolicyNumber)
            .or_else(|| first_pattern_match(text, &POLICY_NUMBER_PATTERNS))
    });
    fill_text(fields, confidence, FieldKey::PolicyholderName, || {
        extract_after_keyword(text, FieldKey::PolicyholderName)
    });
    fill_text(fields, confidence, FieldKey::PolicyEffectiveDate, || {
        extract_after_keyword(text, FieldKey::PolicyEffectiveDate)
    });
    fill_text(fields, confidence, FieldKey::PolicyExpiryDate, || {
        extract_after_keyword(text, FieldKey::PolicyExpiryDate)
    });

    // Incident
    fill_text(fields, confidence, FieldKey::IncidentDate, || {
        extract_after_keyword(text, FieldKey::IncidentDate)
            .or_else(|| first_pattern_match(text, &DATE_PATTERNS))
    });
    fill_text(fields, confidence, FieldKey::IncidentTime, || {
        first_pattern_match(text, &TIME_PATTERNS)
    });
    fill_text(fields, confidence, FieldKey::Location, || {
        extract_after_keyword(text, FieldKey::Location)
    });
    fill_text(fields, confidence, FieldKey::Description, || {
        extract_after_keyword(text, FieldKey::Description)
            .map(|v| v.chars().take(DESCRIPTION_MAX_CHARS).collect())
    });
    fill_text(fields, confidence, FieldKey::ClaimType, || {
        extract_after_keyword(text, FieldKey::ClaimType)
            .or_else(|| first_pattern_match(text, &CLAIM_TYPE_PATTERNS))
    });

    // Parties
    fill_text(fields, confidence, FieldKey::ClaimantName, || {
        extract_after_keyword(text, FieldKey::ClaimantName)
    });
    fill_text(fields, confidence, FieldKey::ClaimantContact, || {
        extract_after_keyword(text, FieldKey::ClaimantContact)
            .or_else(|| first_pattern_match(text, &PHONE_PATTERNS))
            .or_else(|| first_pattern_match(text, &EMAIL_PATTERNS))
    });
    if fields.third_parties.is_empty() {
        let parties = collect_list_entries(text, FieldKey::ThirdParties);
        if !parties.is_empty() {
            fields.third_parties = parties;
            confidence.insert(FieldKey::ThirdParties, text_tier(FieldKey::ThirdParties));
        }
    }

    // Asset
    fill_text(fields, confidence, FieldKey::AssetType, || {
        extract_after_keyword(text, FieldKey::AssetType)
            .or_else(|| first_pattern_match(text, &ASSET_TYPE_PATTERNS))
    });
    fill_text(fields, confidence, FieldKey::AssetId, || {
        extract_after_keyword(text, FieldKey::AssetId)
            .or_else(|| first_pattern_match(text, &VIN_PATTERNS))
    });

    // Financial
    if fields.estimated_damage.is_none() {
        let amount = extract_after_keyword(text, FieldKey::EstimatedDamage)
            .and_then(|captured| extract_currency(&captured))
            .or_else(|| extract_currency(text));
        if let Some(amount) = amount {
            fields.estimated_damage = Some(amount);
            confidence.insert(FieldKey::EstimatedDamage, text_tier(FieldKey::EstimatedDamage));
        }
    }
    if fields.initial_estimate.is_none() {
        let amount = extract_after_keyword(text, FieldKey::InitialEstimate)
            .and_then(|captured| extract_currency(&captured));
        if let Some(amount) = amount {
            fields.initial_estimate = Some(amount);
            confidence.insert(FieldKey::InitialEstimate, text_tier(FieldKey::InitialEstimate));
        }
    }

    // Other
    if fields.attachments.is_empty() {
        let attachments = collect_list_entries(text, FieldKey::Attachments);
        if !attachments.is_empty() {
            fields.attachments = attachments;
            confidence.insert(FieldKey::Attachments, text_tier(FieldKey::Attachments));
        }
    }
}

/// Whether the injury vocabulary appears anywhere in the text.
pub fn detect_injury(text: &str) -> bool {
    INJURY_TERMS.is_match(text)
}

fn fill_text<F>(
    fields: &mut ExtractedFields,
    confidence: &mut ConfidenceMap,
    key: FieldKey,
    extract: F,
) where
    F: FnOnce() -> Option<String>,
{
    if !fields.text_is_empty(key) {
        return;
    }
    if let Some(value) = extract() {
        if fields.set_text(key, value) {
            confidence.insert(key, text_tier(key));
        }
    }
}

/// Every distinct capture across the field's labels, first-occurrence order
/// preserved, deduplicated by exact string equality.
fn collect_list_entries(text: &str, key: FieldKey) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for pattern in &KEYWORD_LINE_PATTERNS[&key] {
        for caps in pattern.captures_iter(text) {
            let Some(value) = caps.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if value.len() >= MIN_LIST_ENTRY_CHARS
                && !looks_like_label(value)
                && !entries.iter().any(|e| e == value)
            {
                entries.push(value.to_string());
            }
        }
    }
    entries
}
