//! Quality analytics engine
//!
//! Turns a set of inspection records with free-form field responses into a
//! multi-dimensional quality report: global summary, part/day/inspector/
//! location breakdowns, and a defect Pareto ranking with PPM-style metrics.
//!
//! The pipeline is a pure transform. Each invocation classifies labels
//! ([`fields`]), extracts per-record metrics ([`extract`]), folds them into a
//! fresh accumulator ([`aggregate`]), and assembles the final report
//! ([`report`]). No state survives between invocations, so concurrent report
//! requests need no coordination, and running the engine twice over the same
//! records yields identical output.
//!
//! Record fetching and filtering happen upstream; rendering happens
//! downstream. This module only ever sees in-memory records and returns an
//! in-memory report.

pub mod aggregate;
pub mod extract;
pub mod fields;
pub mod report;

pub use extract::{extract, ExtractedMetrics};
pub use fields::{classify, normalize_label, parse_quantity, FieldCategory};
pub use report::{
    DayRow, InspectorRow, LocationRow, PartRow, QualityReport, Summary, TopDefect,
};

use crate::entities::inspection::Inspection;

/// Generate a quality report over the given records
///
/// `period` and `company_name` are display strings for the summary header;
/// any record filtering (date range, company scope, workflow status) is the
/// caller's job and has already happened.
pub fn generate_report(
    records: &[Inspection],
    period: &str,
    company_name: &str,
) -> QualityReport {
    let mut acc = aggregate::Accumulator::new();

    for record in records {
        let metrics = extract::extract(record);
        let day = record.report_day().to_string();
        acc.fold(&metrics, &record.inspector, &day);
    }

    report::assemble(acc, period, company_name)
}
