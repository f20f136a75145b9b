//! Structured metric extraction from one inspection record

use crate::analytics::fields::{classify, parse_quantity, FieldCategory};
use crate::entities::inspection::Inspection;

/// Quality metrics recovered from one record's free-form responses
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMetrics {
    /// Part name, "General" when no field supplied one
    pub part_name: String,
    /// Part model/variant, if any field supplied one
    pub part_model: Option<String>,
    /// Inspection location, "Main" when no field supplied one
    pub location: String,
    /// Units inspected
    pub inspected: f64,
    /// Units accepted
    pub accepted: f64,
    /// Units sent to rework
    pub rework: f64,
    /// Units rejected
    pub rejected: f64,
    /// Defect descriptors, one entry per non-empty defect field
    pub defects: Vec<String>,
}

impl Default for ExtractedMetrics {
    fn default() -> Self {
        Self {
            part_name: "General".to_string(),
            part_model: None,
            location: "Main".to_string(),
            inspected: 0.0,
            accepted: 0.0,
            rework: 0.0,
            rejected: 0.0,
            defects: Vec::new(),
        }
    }
}

/// Extract structured metrics from a record's field responses
///
/// Fields are scanned in form order. Quantity slots take the last matching
/// field's parsed value; text slots are only overwritten by a non-empty
/// value; defect fields append every non-empty value. A label that matches
/// several categories writes into each of them.
///
/// After the scan, two fallbacks reconcile forms that omit a total:
/// inspected is rebuilt from the three outcome counts when absent, then
/// accepted is rebuilt from the remainder when it is zero. The second rule
/// fires on any zero, explicit or defaulted.
pub fn extract(record: &Inspection) -> ExtractedMetrics {
    let mut metrics = ExtractedMetrics::default();

    for response in &record.responses {
        let value = response.value.as_deref().unwrap_or("");

        for category in classify(&response.label) {
            match category {
                FieldCategory::PartName => {
                    if !value.is_empty() {
                        metrics.part_name = value.to_string();
                    }
                }
                FieldCategory::PartModel => {
                    if !value.is_empty() {
                        metrics.part_model = Some(value.to_string());
                    }
                }
                FieldCategory::Inspected => {
                    metrics.inspected = parse_quantity(response.value.as_deref());
                }
                FieldCategory::Accepted => {
                    metrics.accepted = parse_quantity(response.value.as_deref());
                }
                FieldCategory::Rework => {
                    metrics.rework = parse_quantity(response.value.as_deref());
                }
                FieldCategory::Rejected => {
                    metrics.rejected = parse_quantity(response.value.as_deref());
                }
                FieldCategory::Location => {
                    if !value.is_empty() {
                        metrics.location = value.to_string();
                    }
                }
                FieldCategory::Defect => {
                    if !value.trim().is_empty() {
                        metrics.defects.push(value.to_string());
                    }
                }
            }
        }
    }

    if metrics.inspected == 0.0 && metrics.accepted + metrics.rework + metrics.rejected > 0.0 {
        metrics.inspected = metrics.accepted + metrics.rework + metrics.rejected;
    }
    if metrics.accepted == 0.0 && metrics.inspected > 0.0 {
        metrics.accepted = (metrics.inspected - metrics.rework - metrics.rejected).max(0.0);
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inspection::FieldResponse;

    fn record_with(responses: Vec<FieldResponse>) -> Inspection {
        let mut insp = Inspection::new(
            "test record".to_string(),
            "inspector".to_string(),
            "test".to_string(),
        );
        insp.responses = responses;
        insp
    }

    #[test]
    fn test_extract_basic_fields() {
        let record = record_with(vec![
            FieldResponse::new("Part Model", "BR-200"),
            FieldResponse::new("Part Name", "Bracket"),
            FieldResponse::new("Total Inspected", "100"),
            FieldResponse::new("Total Accepted", "90"),
            FieldResponse::new("Rework Qty", "6"),
            FieldResponse::new("Rejection Qty", "4"),
            FieldResponse::new("Location", "Plant 2"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.part_name, "Bracket");
        assert_eq!(metrics.part_model.as_deref(), Some("BR-200"));
        assert_eq!(metrics.location, "Plant 2");
        assert_eq!(metrics.inspected, 100.0);
        assert_eq!(metrics.accepted, 90.0);
        assert_eq!(metrics.rework, 6.0);
        assert_eq!(metrics.rejected, 4.0);
    }

    #[test]
    fn test_extract_defaults_when_unlabelled() {
        let record = record_with(vec![FieldResponse::new("Remarks", "all good")]);

        let metrics = extract(&record);
        assert_eq!(metrics.part_name, "General");
        assert_eq!(metrics.location, "Main");
        assert_eq!(metrics.part_model, None);
    }

    #[test]
    fn test_inferred_inspected_from_outcomes() {
        // No inspected field at all; the three outcome counts are authoritative
        let record = record_with(vec![
            FieldResponse::new("Accepted", "0"),
            FieldResponse::new("Rework", "2"),
            FieldResponse::new("Rejected", "3"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.inspected, 5.0);
        // The accepted fallback fires on any zero, even this explicit one:
        // inspected - rework - rejected == 0, so accepted stays 0.
        assert_eq!(metrics.accepted, 0.0);
    }

    #[test]
    fn test_inferred_accepted_from_remainder() {
        let record = record_with(vec![
            FieldResponse::new("Total Inspected", "50"),
            FieldResponse::new("Rework Qty", "3"),
            FieldResponse::new("Rejection Qty", "2"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.accepted, 45.0);
    }

    #[test]
    fn test_inferred_accepted_clamped_non_negative() {
        let record = record_with(vec![
            FieldResponse::new("Total Inspected", "4"),
            FieldResponse::new("Rework Qty", "3"),
            FieldResponse::new("Rejection Qty", "2"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.accepted, 0.0);
    }

    #[test]
    fn test_no_inference_when_both_provided() {
        let record = record_with(vec![
            FieldResponse::new("Total Inspected", "100"),
            FieldResponse::new("Total Accepted", "97"),
            FieldResponse::new("Rejection Qty", "1"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.inspected, 100.0);
        assert_eq!(metrics.accepted, 97.0);
    }

    #[test]
    fn test_last_writer_wins_for_quantities() {
        let record = record_with(vec![
            FieldResponse::new("Qty Inspected", "10"),
            FieldResponse::new("Total Inspected", "25"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.inspected, 25.0);
    }

    #[test]
    fn test_empty_value_does_not_erase_text_slot() {
        let record = record_with(vec![
            FieldResponse::new("Part Name", "Housing"),
            FieldResponse::blank("Part"),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.part_name, "Housing");
    }

    #[test]
    fn test_every_defect_field_collected() {
        let record = record_with(vec![
            FieldResponse::new("Defect 1", "Scratch"),
            FieldResponse::new("Defect 2", "Dent"),
            FieldResponse::blank("Defect 3"),
            FieldResponse::new("Defect 4", "  "),
        ]);

        let metrics = extract(&record);
        assert_eq!(metrics.defects, vec!["Scratch", "Dent"]);
    }

    #[test]
    fn test_part_model_label_also_hits_part_name() {
        // "Part Model" contains the "part" keyword, so it lands in both the
        // part-name and part-model slots; a later explicit part-name field
        // wins the name back.
        let record = record_with(vec![FieldResponse::new("Part Model", "BR-200")]);

        let metrics = extract(&record);
        assert_eq!(metrics.part_name, "BR-200");
        assert_eq!(metrics.part_model.as_deref(), Some("BR-200"));
    }

    #[test]
    fn test_ambiguous_label_writes_both_slots() {
        let record = record_with(vec![FieldResponse::new("Rejected Location", "5")]);

        let metrics = extract(&record);
        assert_eq!(metrics.rejected, 5.0);
        assert_eq!(metrics.location, "5");
    }
}
