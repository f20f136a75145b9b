//! Field label classification and numeric normalization
//!
//! Form labels are free text, so the analytics pipeline recovers meaning by
//! keyword matching over a normalized form of the label. Matching is a
//! heuristic: a label joins EVERY category whose keyword set it contains, and
//! a label like "Rejected Location" lands in two buckets at once. Downstream
//! extraction writes into each matched slot; that multi-write is documented
//! behavior, not an accident to be patched here.

/// Semantic role a form field can play in quality analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    /// Name of the inspected part
    PartName,
    /// Model/variant of the inspected part
    PartModel,
    /// Quantity inspected
    Inspected,
    /// Quantity accepted
    Accepted,
    /// Quantity sent to rework
    Rework,
    /// Quantity rejected
    Rejected,
    /// Inspection location
    Location,
    /// Defect descriptor
    Defect,
}

/// Keyword synonyms per category, in precedence order
const CATEGORY_KEYWORDS: &[(FieldCategory, &[&str])] = &[
    (FieldCategory::PartName, &["part name", "partname", "part"]),
    (
        FieldCategory::PartModel,
        &["part model", "model", "component model"],
    ),
    (
        FieldCategory::Inspected,
        &[
            "total inspected",
            "inspected",
            "qty inspected",
            "quantity inspected",
        ],
    ),
    (
        FieldCategory::Accepted,
        &["total accepted", "accepted", "ok qty", "ok"],
    ),
    (
        FieldCategory::Rework,
        &["total rework", "rework", "rework qty"],
    ),
    (
        FieldCategory::Rejected,
        &["total rejected", "rejected", "rejection qty", "rejection"],
    ),
    (
        FieldCategory::Location,
        &["location", "shift location", "plant location"],
    ),
    (
        FieldCategory::Defect,
        &["defect", "defect type", "defect name", "defect reason"],
    ),
];

/// Normalize a label for matching: lowercase, alphanumerics only
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn matches_any(normalized: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|k| normalized.contains(&normalize_label(k)))
}

/// Classify a field label into every category whose keyword set matches
///
/// Returns categories in precedence order; an empty result means the field
/// plays no role in quality analytics.
pub fn classify(label: &str) -> Vec<FieldCategory> {
    let normalized = normalize_label(label);
    CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| matches_any(&normalized, keywords))
        .map(|(category, _)| *category)
        .collect()
}

/// Parse a free-text quantity into a finite number, defaulting to zero
///
/// Thousands separators are stripped before parsing. Null, empty, and
/// malformed input all yield zero rather than an error: a single bad field
/// must degrade to nothing, not sink the whole report.
pub fn parse_quantity(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let cleaned: String = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
