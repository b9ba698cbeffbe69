//! Form-field pass: map interactive PDF field values onto the schema.
//!
//! Classification works on the field NAME, never its value, against the
//! token groups in `vocab.rs`. Values that restate a field caption are
//! rejected (label-echo guard) so a form's own printed captions can never
//! leak into the record. Accepted values take precedence over anything the
//! text pass would later find.

use std::collections::BTreeMap;

use tracing::debug;

use super::confidence::FORM_CONFIDENCE;
use super::schema::{ConfidenceMap, ExtractedFields, FieldKey};
use super::text::extract_currency;
use super::vocab::{form_name_tokens, looks_like_label, FORM_CLASSIFY_ORDER};

/// Classify a raw form-field name into a schema key.
pub fn classify_field_name(name: &str) -> Option<FieldKey> {
    let upper = name.to_uppercase();
    FORM_CLASSIFY_ORDER.into_iter().find(|&key| {
        form_name_tokens(key)
            .iter()
            .any(|group| group.iter().all(|token| upper.contains(token)))
    })
}

/// Apply every usable form value to the record at form confidence.
pub fn apply_form_fields(
    raw: &BTreeMap<String, Option<String>>,
    fields: &mut ExtractedFields,
    confidence: &mut ConfidenceMap,
) {
    for (name, value) in raw {
        let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        let Some(key) = classify_field_name(name) else {
            debug!(field = %name, "unclassified form field ignored");
            continue;
        };
        if looks_like_label(value) {
            debug!(field = %name, "form value rejected as label echo");
            continue;
        }
        apply_value(fields, confidence, key, value);
    }
}

fn apply_value(
    fields: &mut ExtractedFields,
    confidence: &mut ConfidenceMap,
    key: FieldKey,
    value: &str,
) {
    match key {
        FieldKey::EstimatedDamage => {
            if fields.estimated_damage.is_none() {
                if let Some(amount) = parse_money(value) {
                    fields.estimated_damage = Some(amount);
                    confidence.insert(key, FORM_CONFIDENCE);
                }
            }
        }
        FieldKey::InitialEstimate => {
            if fields.initial_estimate.is_none() {
                if let Some(amount) = parse_money(value) {
                    fields.initial_estimate = Some(amount);
                    confidence.insert(key, FORM_CONFIDENCE);
                }
            }
        }
        FieldKey::HasInjury => {
            if !confidence.contains_key(&key) && is_truthy(value) {
                fields.has_injury = true;
                confidence.insert(key, FORM_CONFIDENCE);
            }
        }
        FieldKey::ThirdParties => {
            if !fields.third_parties.iter().any(|p| p == value) {
                fields.third_parties.push(value.to_string());
                confidence.insert(key, FORM_CONFIDENCE);
            }
        }
        FieldKey::Attachments => {
            if !fields.attachments.iter().any(|a| a == value) {
                fields.attachments.push(value.to_string());
                confidence.insert(key, FORM_CONFIDENCE);
            }
        }
        _ => {
            if fields.text_is_empty(key) && fields.set_text(key, value.to_string()) {
                confidence.insert(key, FORM_CONFIDENCE);
            }
        }
    }
}

/// Money from a form value: `$`/`USD` marked, or a bare number.
fn parse_money(value: &str) -> Option<f64> {
    extract_currency(value)
        .or_else(|| value.trim().replace(['$', ','], "").parse::<f64>().ok())
}

/// Checkbox and radio values that mean "set".
fn is_truthy(value: &str) -> bool {
    !matches!(
        value.to_lowercase().as_str(),
        "off" | "no" | "false" | "0" | "unchecked" | "none"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(entries: &[(&str, Option<&str>)]) -> BTreeMap<String, Option<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(String::from)))
            .collect()
    }

    #[test]
    fn classifies_common_fnol_field_names() {
        assert_eq!(
            classify_field_name("POLICY_NUMBER"),
            Some(FieldKey::PolicyNumber)
        );
        assert_eq!(classify_field_name("Insured Name"), Some(FieldKey::PolicyholderName));
        assert_eq!(classify_field_name("DATE OF LOSS"), Some(FieldKey::IncidentDate));
        assert_eq!(classify_field_name("Vehicle VIN"), Some(FieldKey::AssetId));
        assert_eq!(classify_field_name("License Plate No"), Some(FieldKey::AssetId));
        assert_eq!(
            classify_field_name("Initial Estimate"),
            Some(FieldKey::InitialEstimate)
        );
        assert_eq!(
            classify_field_name("Estimated Damage Amount"),
            Some(FieldKey::EstimatedDamage)
        );
        assert_eq!(classify_field_name("Injury?"), Some(FieldKey::HasInjury));
        assert_eq!(classify_field_name("UnrelatedField"), None);
    }

    #[test]
    fn date_outranks_time_for_combined_names() {
        assert_eq!(
            classify_field_name("DATE AND TIME OF LOSS"),
            Some(FieldKey::IncidentDate)
        );
    }

    #[test]
    fn form_values_land_at_form_confidence() {
        let raw = form(&[
            ("POLICY NUMBER", Some("POL-777")),
            ("DATE OF LOSS", Some("03/14/2024")),
            ("ESTIMATED DAMAGE", Some("$4,500")),
        ]);
        let mut fields = ExtractedFields::default();
        let mut confidence = ConfidenceMap::new();
        apply_form_fields(&raw, &mut fields, &mut confidence);

        assert_eq!(fields.policy_number, "POL-777");
        assert_eq!(fields.incident_date, "03/14/2024");
        assert_eq!(fields.estimated_damage, Some(4500.0));
        assert_eq!(confidence[&FieldKey::PolicyNumber], 0.95);
        assert_eq!(confidence[&FieldKey::EstimatedDamage], 0.95);
    }

    #[test]
    fn label_echo_values_are_dropped() {
        let raw = form(&[("POLICY NUMBER", Some("Policy Number"))]);
        let mut fields = ExtractedFields::default();
        let mut confidence = ConfidenceMap::new();
        apply_form_fields(&raw, &mut fields, &mut confidence);

        assert_eq!(fields.policy_number, "");
        assert!(confidence.is_empty());
    }

    #[test]
    fn absent_and_blank_values_are_skipped() {
        let raw = form(&[("INJURY CHECKBOX", None), ("CLAIMANT", Some("   "))]);
        let mut fields = ExtractedFields::default();
        let mut confidence = ConfidenceMap::new();
        apply_form_fields(&raw, &mut fields, &mut confidence);

        assert!(!fields.has_injury);
        assert_eq!(fields.claimant_name, "");
    }

    #[test]
    fn injury_checkbox_sets_flag() {
        let raw = form(&[("INJURY", Some("Yes"))]);
        let mut fields = ExtractedFields::default();
        let mut confidence = ConfidenceMap::new();
        apply_form_fields(&raw, &mut fields, &mut confidence);

        assert!(fields.has_injury);
        assert_eq!(confidence[&FieldKey::HasInjury], 0.95);
    }

    #[test]
    fn unparsable_money_is_not_found() {
        let raw = form(&[("ESTIMATED DAMAGE", Some("to be determined"))]);
        let mut fields = ExtractedFields::default();
        let mut confidence = ConfidenceMap::new();
        apply_form_fields(&raw, &mut fields, &mut confidence);

        assert_eq!(fields.estimated_damage, None);
        assert!(!confidence.contains_key(&FieldKey::EstimatedDamage));
    }
}
