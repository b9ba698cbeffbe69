//! Stage 6: routing.
//!
//! Strict first-match decision table over the extracted fields, the
//! validation report, and the normalized text. Rule order is load-bearing:
//! injury beats fraud beats validation failure beats claim value.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::{vocab, ExtractedFields};
use super::validate::ValidationResult;
use crate::config::FAST_TRACK_DAMAGE_CEILING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingDecision {
    SpecialistQueue,
    Investigation,
    ManualReview,
    FastTrack,
    StandardReview,
}

impl RoutingDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::SpecialistQueue => "SPECIALIST_QUEUE",
            RoutingDecision::Investigation => "INVESTIGATION",
            RoutingDecision::ManualReview => "MANUAL_REVIEW",
            RoutingDecision::FastTrack => "FAST_TRACK",
            RoutingDecision::StandardReview => "STANDARD_REVIEW",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    pub decision: RoutingDecision,
    pub reasons: Vec<String>,
    pub confidence: f32,
}

/// Pick the route for a claim. Evaluates rules in priority order and
/// returns at the first match.
pub fn decide_route(
    fields: &ExtractedFields,
    validation: &ValidationResult,
    normalized_text: &str,
) -> RoutingResult {
    let result = decide(fields, validation, normalized_text);
    info!(
        decision = result.decision.as_str(),
        confidence = result.confidence,
        "routing decision"
    );
    result
}

fn decide(
    fields: &ExtractedFields,
    validation: &ValidationResult,
    normalized_text: &str,
) -> RoutingResult {
    if fields.has_injury {
        return RoutingResult {
            decision: RoutingDecision::SpecialistQueue,
            reasons: vec!["Injury claim requires specialist review".to_string()],
            confidence: 0.9,
        };
    }

    if vocab::FRAUD_TERMS.is_match(normalized_text) {
        return RoutingResult {
            decision: RoutingDecision::Investigation,
            reasons: vec!["Potential fraud indicators detected".to_string()],
            confidence: 0.75,
        };
    }

    if !validation.is_valid || !validation.missing_fields.is_empty() {
        let mut reasons = vec![format!(
            "Missing required fields: {}",
            validation.missing_fields.join(", ")
        )];
        reasons.extend(validation.errors.iter().cloned());
        return RoutingResult {
            decision: RoutingDecision::ManualReview,
            reasons,
            confidence: 0.95,
        };
    }

    if let Some(damage) = fields.estimated_damage {
        if damage < FAST_TRACK_DAMAGE_CEILING {
            return RoutingResult {
                decision: RoutingDecision::FastTrack,
                reasons: vec![format!(
                    "Low-value claim (${}) eligible for fast-track processing",
                    format_usd(damage)
                )],
                confidence: 0.85,
            };
        }
    }

    let mut reasons = vec!["Standard processing required".to_string()];
    if let Some(damage) = fields.estimated_damage {
        reasons.push(format!("Claim amount: ${}", format_usd(damage)));
    }
    if !validation.warnings.is_empty() {
        reasons.push(format!("Warnings: {}", validation.warnings.join(", ")));
    }
    RoutingResult {
        decision: RoutingDecision::StandardReview,
        reasons,
        confidence: 0.8,
    }
}

/// Render an amount with thousands separators, dropping the fraction when
/// it is whole (`1200.0` renders as `1,200`).
fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        out.push_str(&format!(".{cents:02}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_report() -> ValidationResult {
        ValidationResult {
            is_valid: true,
            errors: vec![],
            warnings: vec![],
            missing_fields: vec![],
        }
    }

    fn base_fields() -> ExtractedFields {
        ExtractedFields {
            policy_number: "POL-1".into(),
            estimated_damage: Some(1_200.0),
            ..Default::default()
        }
    }

    #[test]
    fn injury_routes_to_specialist_queue() {
        let mut fields = base_fields();
        fields.has_injury = true;
        let result = decide_route(&fields, &valid_report(), "");
        assert_eq!(result.decision, RoutingDecision::SpecialistQueue);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(
            result.reasons,
            vec!["Injury claim requires specialist review"]
        );
    }

    #[test]
    fn injury_outranks_fraud_vocabulary() {
        let mut fields = base_fields();
        fields.has_injury = true;
        let result = decide_route(&fields, &valid_report(), "details look suspicious and fabricated");
        assert_eq!(result.decision, RoutingDecision::SpecialistQueue);
    }

    #[test]
    fn fraud_vocabulary_routes_to_investigation() {
        let result = decide_route(
            &base_fields(),
            &valid_report(),
            "witness statements were inconsistent and the invoice looks suspicious",
        );
        assert_eq!(result.decision, RoutingDecision::Investigation);
        assert_eq!(result.confidence, 0.75);
        assert_eq!(
            result.reasons,
            vec!["Potential fraud indicators detected"]
        );
    }

    #[test]
    fn invalid_report_outranks_fast_track() {
        let report = ValidationResult {
            is_valid: false,
            errors: vec!["Missing required field: Description".into()],
            warnings: vec![],
            missing_fields: vec!["Description".into()],
        };
        let result = decide_route(&base_fields(), &report, "");
        assert_eq!(result.decision, RoutingDecision::ManualReview);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(
            result.reasons,
            vec![
                "Missing required fields: Description".to_string(),
                "Missing required field: Description".to_string(),
            ]
        );
    }

    #[test]
    fn low_value_claim_fast_tracks() {
        let result = decide_route(&base_fields(), &valid_report(), "");
        assert_eq!(result.decision, RoutingDecision::FastTrack);
        assert_eq!(result.confidence, 0.85);
        assert_eq!(
            result.reasons,
            vec!["Low-value claim ($1,200) eligible for fast-track processing"]
        );
    }

    #[test]
    fn threshold_value_is_not_fast_tracked() {
        let mut fields = base_fields();
        fields.estimated_damage = Some(25_000.0);
        let result = decide_route(&fields, &valid_report(), "");
        assert_eq!(result.decision, RoutingDecision::StandardReview);
        assert!(result
            .reasons
            .contains(&"Claim amount: $25,000".to_string()));
    }

    #[test]
    fn missing_damage_falls_through_to_standard_review() {
        let mut fields = base_fields();
        fields.estimated_damage = None;
        let result = decide_route(&fields, &valid_report(), "");
        assert_eq!(result.decision, RoutingDecision::StandardReview);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.reasons, vec!["Standard processing required"]);
    }

    #[test]
    fn standard_review_echoes_warnings() {
        let mut report = valid_report();
        report.warnings = vec!["Incident time is missing".into()];
        let mut fields = base_fields();
        fields.estimated_damage = Some(40_000.0);
        let result = decide_route(&fields, &report, "");
        assert_eq!(result.decision, RoutingDecision::StandardReview);
        assert_eq!(
            result.reasons,
            vec![
                "Standard processing required".to_string(),
                "Claim amount: $40,000".to_string(),
                "Warnings: Incident time is missing".to_string(),
            ]
        );
    }

    #[test]
    fn wire_names_are_screaming_snake() {
        let json = serde_json::to_string(&RoutingDecision::FastTrack).unwrap();
        assert_eq!(json, "\"FAST_TRACK\"");
        assert_eq!(RoutingDecision::SpecialistQueue.as_str(), "SPECIALIST_QUEUE");
    }

    #[test]
    fn routing_result_serializes_decision_and_reasons() {
        let result = decide_route(&base_fields(), &valid_report(), "");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["decision"], "FAST_TRACK");
        assert!(json["reasons"].is_array());
        assert!(json.get("route").is_none());
    }

    #[test]
    fn usd_formatting_groups_thousands() {
        assert_eq!(format_usd(1_200.0), "1,200");
        assert_eq!(format_usd(999.0), "999");
        assert_eq!(format_usd(1_234_567.5), "1,234,567.50");
        assert_eq!(format_usd(0.0), "0");
    }
}
