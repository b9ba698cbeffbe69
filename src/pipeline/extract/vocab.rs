//! Immutable keyword and pattern tables for field extraction and routing.
//!
//! Loaded once at first use and never mutated. Label lists and form-name
//! token groups are exhaustive over [`FieldKey`] so the compiler flags any
//! schema slot without a vocabulary.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::schema::FieldKey;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

/// Label phrases that introduce a field value in running text, tried in
/// order. An empty list means the field is never label-captured.
pub fn keyword_labels(key: FieldKey) -> &'static [&'static str] {
    match key {
        FieldKey::PolicyNumber => &["Policy Number", "Policy #", "POL", "Policy ID"],
        FieldKey::PolicyholderName => &["Insured", "Policyholder", "Name", "Policyholder Name"],
        FieldKey::PolicyEffectiveDate => {
            &["Effective Date", "Policy Effective", "Start Date", "Policy Start"]
        }
        FieldKey::PolicyExpiryDate => &["Expiry Date", "Policy Expiry", "End Date", "Policy End"],
        FieldKey::IncidentDate => {
            &["Date of Loss", "Incident Date", "Loss Date", "Date of Incident"]
        }
        FieldKey::IncidentTime => &["Time of Incident", "Time", "Incident Time"],
        FieldKey::Location => &["Location", "Address", "Place", "Where"],
        FieldKey::Description => {
            &["Description", "Details", "Incident", "What Happened", "Loss Description"]
        }
        FieldKey::ClaimType => &["Claim Type", "Type of Claim", "Claim Category", "Incident Type"],
        FieldKey::ClaimantName => &["Claimant", "Injured Party", "Affected Party", "Victim"],
        FieldKey::ClaimantContact => &["Contact", "Phone", "Email", "Contact Information"],
        FieldKey::ThirdParties => &["Third Party", "Other Party", "Other Driver", "Witness"],
        FieldKey::AssetType => &["Asset Type", "Vehicle Type", "Property Type", "Asset Category"],
        FieldKey::AssetId => &["Asset ID", "VIN", "Serial Number", "Vehicle ID", "Registration"],
        FieldKey::EstimatedDamage => {
            &["Damage", "Cost", "Estimate", "Amount", "Loss Amount", "Total Damage"]
        }
        FieldKey::InitialEstimate => {
            &["Initial Estimate", "Preliminary Estimate", "First Estimate", "Initial Cost"]
        }
        // Computed from INJURY_TERMS, never label-captured.
        FieldKey::HasInjury => &[],
        FieldKey::Attachments => &["Attachment", "Document", "Supporting Document", "Evidence"],
    }
}

/// Substring token groups that classify a PDF form-field NAME into a schema
/// key. A name matches a key when every token of any one group occurs in the
/// uppercased name. An empty list means the key is never form-mapped.
pub fn form_name_tokens(key: FieldKey) -> &'static [&'static [&'static str]] {
    match key {
        FieldKey::PolicyNumber => &[&["POLICY", "NUMBER"], &["POLICY", "#"], &["POLICY", "ID"]],
        FieldKey::PolicyholderName => &[&["POLICYHOLDER"], &["INSURED"]],
        FieldKey::PolicyEffectiveDate => &[&["EFFECTIVE"], &["POLICY", "START"]],
        FieldKey::PolicyExpiryDate => &[&["EXPIR"], &["POLICY", "END"]],
        FieldKey::IncidentDate => {
            &[&["DATE", "LOSS"], &["INCIDENT", "DATE"], &["ACCIDENT", "DATE"]]
        }
        FieldKey::IncidentTime => &[&["TIME"]],
        FieldKey::Location => &[&["LOCATION"], &["ADDRESS"], &["PLACE"]],
        FieldKey::Description => &[&["DESCRIPTION"], &["DETAILS"], &["WHAT", "HAPPENED"]],
        FieldKey::ClaimType => &[&["CLAIM", "TYPE"], &["CLAIM", "CATEGORY"]],
        FieldKey::ClaimantName => &[&["CLAIMANT"]],
        FieldKey::ClaimantContact => &[&["PHONE"], &["EMAIL"], &["CONTACT"]],
        FieldKey::ThirdParties => {
            &[&["THIRD"], &["WITNESS"], &["OTHER", "PARTY"], &["OTHER", "DRIVER"]]
        }
        FieldKey::AssetType => &[&["ASSET", "TYPE"], &["VEHICLE", "TYPE"], &["PROPERTY", "TYPE"]],
        FieldKey::AssetId => &[&["VIN"], &["PLATE"], &["SERIAL"], &["REGISTRATION"]],
        FieldKey::EstimatedDamage => &[&["DAMAGE"], &["LOSS", "AMOUNT"], &["ESTIMATE"]],
        FieldKey::InitialEstimate => &[&["INITIAL", "ESTIMATE"], &["PRELIMINARY"]],
        FieldKey::HasInjury => &[&["INJURY"], &["INJURED"]],
        FieldKey::Attachments => &[&["ATTACHMENT"], &["EVIDENCE"], &["SUPPORTING", "DOCUMENT"]],
    }
}

/// Classification order for form-field names. More specific keys come
/// before keys whose token groups would shadow them (initial estimate
/// before damage, incident date before incident time).
pub const FORM_CLASSIFY_ORDER: [FieldKey; 18] = [
    FieldKey::PolicyNumber,
    FieldKey::PolicyEffectiveDate,
    FieldKey::PolicyExpiryDate,
    FieldKey::PolicyholderName,
    FieldKey::IncidentDate,
    FieldKey::IncidentTime,
    FieldKey::ClaimType,
    FieldKey::ClaimantName,
    FieldKey::ClaimantContact,
    FieldKey::ThirdParties,
    FieldKey::AssetType,
    FieldKey::AssetId,
    FieldKey::InitialEstimate,
    FieldKey::EstimatedDamage,
    FieldKey::HasInjury,
    FieldKey::Attachments,
    FieldKey::Location,
    FieldKey::Description,
];

/// `label`, optional colon, rest of line. Word-bounded so "POL" does not
/// fire inside "Policy".
fn label_line_pattern(label: &str) -> Regex {
    let escaped = regex::escape(label);
    let tail = if label.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    pattern(&format!(r"(?i)\b{escaped}{tail}\s*:?\s*([^\n]+)"))
}

/// Compiled line-capture regexes per field, in label order.
pub static KEYWORD_LINE_PATTERNS: LazyLock<BTreeMap<FieldKey, Vec<Regex>>> =
    LazyLock::new(|| {
        FieldKey::ALL
            .iter()
            .map(|&key| {
                let patterns = keyword_labels(key)
                    .iter()
                    .map(|label| label_line_pattern(label))
                    .collect();
                (key, patterns)
            })
            .collect()
    });

pub static POLICY_NUMBER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"(?i)\bPOL-\d+\b"),
        pattern(r"(?i)\bPOLICY\s*#?\s*:?\s*([A-Z0-9-]+)"),
        pattern(r"(?i)\bPolicy\s+Number\s*:?\s*([A-Z0-9-]+)"),
    ]
});

/// MM/DD/YYYY, YYYY-MM-DD, and written month-name dates.
pub static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b"),
        pattern(r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b"),
        pattern(
            r"(?i)\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}\b",
        ),
    ]
});

pub static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?\b"),
    ]
});

/// Group 1 is the bare amount, without the `$`/`USD` marker.
pub static CURRENCY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"\$\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)"),
        pattern(r"(?i)\b(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)\s*(?:USD|dollars?)\b"),
    ]
});

pub static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b"),
        pattern(r"\+?1[-.\s]?\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b"),
    ]
});

pub static EMAIL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![pattern(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")]
});

/// 17-character VIN (no I, O, Q).
pub static VIN_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| vec![pattern(r"\b[A-HJ-NPR-Za-hj-npr-z0-9]{17}\b")]);

pub static ASSET_TYPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"(?i)\b(?:vehicle|car|truck|motorcycle|suv|sedan|coupe|van)\b"),
        pattern(r"(?i)\b(?:property|house|building|home|apartment|condo)\b"),
        pattern(r"(?i)\b(?:commercial|business|office|retail|warehouse)\b"),
    ]
});

pub static CLAIM_TYPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"(?i)\b(?:auto|automobile|vehicle|car accident)\b"),
        pattern(r"(?i)\b(?:property|home|building|fire|water|theft)\b"),
        pattern(r"(?i)\b(?:liability|personal injury|bodily injury)\b"),
        pattern(r"(?i)\b(?:commercial|business)\b"),
    ]
});

/// Injury vocabulary: presence is a weaker signal than absence, which the
/// confidence tiers reflect.
pub static INJURY_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\b(?:injury|injured|hurt|medical|hospital|ambulance|emergency|wound|pain)\b")
});

/// Fraud-indicator vocabulary for the routing engine.
pub static FRAUD_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\b(?:fraud|suspicious|inconsistent|discrepancy|false|fabricated)\b")
});

/// Label-echo guard: true when a candidate value is itself a recognizable
/// field label ("Policy Number" captured as the policy number).
pub fn looks_like_label(value: &str) -> bool {
    let trimmed = value.trim().trim_end_matches(':').trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    FieldKey::ALL.iter().any(|&key| {
        keyword_labels(key)
            .iter()
            .any(|label| label.to_lowercase() == lowered)
    })
}
