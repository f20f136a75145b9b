//! Report model, derived rates, and assembly

use serde::{Deserialize, Serialize};

use crate::analytics::aggregate::Accumulator;

/// Defect entries retained in the Pareto ranking
const TOP_DEFECT_LIMIT: usize = 15;

/// Global quality summary for the reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Display label for the reporting period (e.g., "March 2025")
    pub period: String,
    /// Company scope display name ("All Companies" when unscoped)
    pub company_name: String,
    /// Distinct part models seen, comma-joined ("N/A" when none)
    pub part_models: String,
    pub total_inspected: f64,
    pub total_accepted: f64,
    pub total_rework: f64,
    pub total_rejected: f64,
    /// Percent of inspected units accepted outright
    pub quality_rate: f64,
    pub rework_percent: f64,
    pub rejection_percent: f64,
    pub rework_ppm: i64,
    pub rejection_ppm: i64,
    pub overall_ppm: i64,
}

/// Totals and rates for one part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRow {
    pub part_name: String,
    pub total_inspected: f64,
    pub total_accepted: f64,
    pub total_rework: f64,
    pub total_rejected: f64,
    pub rework_percent: f64,
    pub rejection_percent: f64,
    pub quality_rate: f64,
}

/// Totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRow {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub total_inspected: f64,
    pub total_accepted: f64,
    pub total_rework: f64,
    pub total_rejected: f64,
    pub quality_rate: f64,
}

/// Totals for one inspector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorRow {
    pub inspector: String,
    pub total_inspected: f64,
    pub total_accepted: f64,
    pub total_rework: f64,
    pub total_rejected: f64,
    pub quality_rate: f64,
}

/// Totals for one location (no accepted column in the report contract)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub location: String,
    pub total_inspected: f64,
    pub total_rework: f64,
    pub total_rejected: f64,
}

/// One ranked defect in the Pareto table
///
/// Percentage is this defect's share of all recorded occurrences. Cumulative
/// contribution is a presentation concern and is computed by renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDefect {
    pub defect: String,
    pub count: u64,
    pub percentage: f64,
}

/// The assembled multi-dimensional quality report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub summary: Summary,
    pub part_wise: Vec<PartRow>,
    pub day_wise: Vec<DayRow>,
    pub inspector_wise: Vec<InspectorRow>,
    pub location_wise: Vec<LocationRow>,
    pub top_defects: Vec<TopDefect>,
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `part` in `total` as a percentage, zero-guarded
fn percent_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round2(part / total * 100.0)
    } else {
        0.0
    }
}

/// Share of `part` in `total` on a parts-per-million basis, zero-guarded
fn ppm_of(part: f64, total: f64) -> i64 {
    if total > 0.0 {
        (part / total * 1_000_000.0).round() as i64
    } else {
        0
    }
}

fn summary_from(acc: &Accumulator, period: &str, company_name: &str) -> Summary {
    let t = acc.summary;
    let part_models = if acc.part_models.is_empty() {
        "N/A".to_string()
    } else {
        acc.part_models.join(", ")
    };

    Summary {
        period: period.to_string(),
        company_name: company_name.to_string(),
        part_models,
        total_inspected: t.inspected,
        total_accepted: t.accepted,
        total_rework: t.rework,
        total_rejected: t.rejected,
        quality_rate: percent_of(t.accepted, t.inspected),
        rework_percent: percent_of(t.rework, t.inspected),
        rejection_percent: percent_of(t.rejected, t.inspected),
        rework_ppm: ppm_of(t.rework, t.inspected),
        rejection_ppm: ppm_of(t.rejected, t.inspected),
        overall_ppm: ppm_of(t.rework + t.rejected, t.inspected),
    }
}

fn build_pareto(defects: Vec<(String, u64)>) -> Vec<TopDefect> {
    let total: u64 = defects.iter().map(|(_, count)| count).sum();

    let mut ranked = defects;
    // Stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_DEFECT_LIMIT);

    ranked
        .into_iter()
        .map(|(defect, count)| TopDefect {
            defect,
            count,
            percentage: percent_of(count as f64, total as f64),
        })
        .collect()
}

/// Assemble the final report from a fully folded accumulator
///
/// Part, inspector, and location rows are ordered by descending inspected
/// count; days ascend chronologically. Equal keys fall back to first-seen
/// order, which a stable sort preserves.
pub(crate) fn assemble(acc: Accumulator, period: &str, company_name: &str) -> QualityReport {
    let summary = summary_from(&acc, period, company_name);

    let mut part_wise: Vec<PartRow> = acc
        .parts
        .into_entries()
        .into_iter()
        .map(|(part_name, t)| PartRow {
            part_name,
            total_inspected: t.inspected,
            total_accepted: t.accepted,
            total_rework: t.rework,
            total_rejected: t.rejected,
            rework_percent: percent_of(t.rework, t.inspected),
            rejection_percent: percent_of(t.rejected, t.inspected),
            quality_rate: percent_of(t.accepted, t.inspected),
        })
        .collect();
    part_wise.sort_by(|a, b| b.total_inspected.total_cmp(&a.total_inspected));

    let mut day_wise: Vec<DayRow> = acc
        .days
        .into_entries()
        .into_iter()
        .map(|(date, t)| DayRow {
            date,
            total_inspected: t.inspected,
            total_accepted: t.accepted,
            total_rework: t.rework,
            total_rejected: t.rejected,
            quality_rate: percent_of(t.accepted, t.inspected),
        })
        .collect();
    day_wise.sort_by(|a, b| a.date.cmp(&b.date));

    let mut inspector_wise: Vec<InspectorRow> = acc
        .inspectors
        .into_entries()
        .into_iter()
        .map(|(inspector, t)| InspectorRow {
            inspector,
            total_inspected: t.inspected,
            total_accepted: t.accepted,
            total_rework: t.rework,
            total_rejected: t.rejected,
            quality_rate: percent_of(t.accepted, t.inspected),
        })
        .collect();
    inspector_wise.sort_by(|a, b| b.total_inspected.total_cmp(&a.total_inspected));

    let mut location_wise: Vec<LocationRow> = acc
        .locations
        .into_entries()
        .into_iter()
        .map(|(location, t)| LocationRow {
            location,
            total_inspected: t.inspected,
            total_rework: t.rework,
            total_rejected: t.rejected,
        })
        .collect();
    location_wise.sort_by(|a, b| b.total_inspected.total_cmp(&a.total_inspected));

    let top_defects = build_pareto(acc.defects.into_entries());

    QualityReport {
        summary,
        part_wise,
        day_wise,
        inspector_wise,
        location_wise,
        top_defects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::extract::ExtractedMetrics;

    fn folded(entries: &[(&str, f64, f64, f64, f64)]) -> Accumulator {
        let mut acc = Accumulator::new();
        for (part, inspected, accepted, rework, rejected) in entries {
            let metrics = ExtractedMetrics {
                part_name: part.to_string(),
                inspected: *inspected,
                accepted: *accepted,
                rework: *rework,
                rejected: *rejected,
                ..ExtractedMetrics::default()
            };
            acc.fold(&metrics, "Vega", "2025-03-01");
        }
        acc
    }

    #[test]
    fn test_rates_rounded_to_two_places() {
        let acc = folded(&[("Gear", 3.0, 2.0, 1.0, 0.0)]);
        let report = assemble(acc, "March 2025", "All Companies");

        assert_eq!(report.summary.quality_rate, 66.67);
        assert_eq!(report.summary.rework_percent, 33.33);
        assert_eq!(report.summary.rejection_percent, 0.0);
    }

    #[test]
    fn test_ppm_rounded_to_integer() {
        let acc = folded(&[("Gear", 3.0, 2.0, 1.0, 0.0)]);
        let report = assemble(acc, "March 2025", "All Companies");

        assert_eq!(report.summary.rework_ppm, 333_333);
        assert_eq!(report.summary.rejection_ppm, 0);
        assert_eq!(report.summary.overall_ppm, 333_333);
    }

    #[test]
    fn test_zero_inspected_yields_zero_rates() {
        let acc = Accumulator::new();
        let report = assemble(acc, "March 2025", "All Companies");

        assert_eq!(report.summary.quality_rate, 0.0);
        assert_eq!(report.summary.rework_ppm, 0);
        assert_eq!(report.summary.overall_ppm, 0);
        assert!(report.part_wise.is_empty());
        assert!(report.top_defects.is_empty());
        assert_eq!(report.summary.part_models, "N/A");
    }

    #[test]
    fn test_part_rows_sorted_by_inspected_descending() {
        let acc = folded(&[
            ("Axle", 10.0, 10.0, 0.0, 0.0),
            ("Gear", 40.0, 40.0, 0.0, 0.0),
            ("Shim", 25.0, 25.0, 0.0, 0.0),
        ]);
        let report = assemble(acc, "March 2025", "All Companies");

        let names: Vec<&str> = report.part_wise.iter().map(|p| p.part_name.as_str()).collect();
        assert_eq!(names, vec!["Gear", "Shim", "Axle"]);
    }

    #[test]
    fn test_equal_parts_keep_first_seen_order() {
        let acc = folded(&[
            ("Gear", 10.0, 10.0, 0.0, 0.0),
            ("Axle", 10.0, 10.0, 0.0, 0.0),
        ]);
        let report = assemble(acc, "March 2025", "All Companies");

        let names: Vec<&str> = report.part_wise.iter().map(|p| p.part_name.as_str()).collect();
        assert_eq!(names, vec!["Gear", "Axle"]);
    }

    #[test]
    fn test_pareto_ranking_and_percentages() {
        let mut acc = Accumulator::new();
        let mut metrics = ExtractedMetrics::default();
        let mut push = |name: &str, count: usize| {
            for _ in 0..count {
                metrics.defects.push(name.to_string());
            }
        };
        push("A", 10);
        push("B", 30);
        push("C", 5);
        acc.fold(&metrics, "Vega", "2025-03-01");

        let report = assemble(acc, "March 2025", "All Companies");
        let ranked: Vec<(&str, u64, f64)> = report
            .top_defects
            .iter()
            .map(|d| (d.defect.as_str(), d.count, d.percentage))
            .collect();

        assert_eq!(
            ranked,
            vec![("B", 30, 66.67), ("A", 10, 22.22), ("C", 5, 11.11)]
        );
    }

    #[test]
    fn test_pareto_caps_at_fifteen() {
        let mut acc = Accumulator::new();
        let mut metrics = ExtractedMetrics::default();
        for i in 0..20 {
            for _ in 0..(20 - i) {
                metrics.defects.push(format!("defect-{i}"));
            }
        }
        acc.fold(&metrics, "Vega", "2025-03-01");

        let report = assemble(acc, "March 2025", "All Companies");
        assert_eq!(report.top_defects.len(), 15);
        assert_eq!(report.top_defects[0].defect, "defect-0");
    }

    #[test]
    fn test_location_rows_carry_no_accepted_column() {
        let acc = folded(&[("Gear", 10.0, 8.0, 1.0, 1.0)]);
        let report = assemble(acc, "March 2025", "All Companies");

        let json = serde_json::to_value(&report.location_wise).unwrap();
        assert!(json[0].get("total_accepted").is_none());
        assert_eq!(json[0]["total_inspected"], 10.0);
    }
}
