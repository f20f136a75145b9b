//! Monthly quality report

use chrono::Datelike;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use super::{fetch_records, month_name, month_range, write_output};
use crate::analytics::{generate_report, QualityReport};
use crate::cli::commands::resolve_project;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;

#[derive(clap::Args, Debug)]
pub struct QualityArgs {
    /// Report month 1-12 (default: current month)
    #[arg(long, short = 'm')]
    pub month: Option<u32>,

    /// Report year (default: current year)
    #[arg(long, short = 'y')]
    pub year: Option<i32>,

    /// Restrict the report to one company
    #[arg(long)]
    pub company: Option<String>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: QualityArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let config = Config::load();

    let now = chrono::Local::now();
    let month = args.month.unwrap_or(now.month());
    let year = args.year.unwrap_or(now.year());
    let (start, end) = month_range(year, month)
        .ok_or_else(|| miette::miette!("invalid month: {}", month))?;

    let scope = args.company.or_else(|| config.company.clone());
    let company_name = scope.clone().unwrap_or_else(|| "All Companies".to_string());
    let period = format!("{} {}", month_name(month), year);

    let records = fetch_records(&project, start, end, scope.as_deref());
    if global.verbose {
        eprintln!("{} record(s) in scope for {}", records.len(), period);
    }

    let report = generate_report(&records, &period, &company_name);

    let format = resolve_format(global, &config);
    let rendered = match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&report).map_err(|e| miette::miette!("{}", e))?;
            json.push('\n');
            json
        }
        _ => render_markdown(&report),
    };

    write_output(&rendered, args.output)
}

fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    match global.format {
        OutputFormat::Auto => match config.default_format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Md,
        },
        format => format,
    }
}

fn render_markdown(report: &QualityReport) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    output.push_str("# Quality Report\n\n");
    output.push_str(&format!("- **Period:** {}\n", summary.period));
    output.push_str(&format!("- **Company:** {}\n", summary.company_name));
    output.push_str(&format!("- **Part Models:** {}\n", summary.part_models));
    output.push('\n');

    output.push_str("## Summary\n\n");
    let mut builder = Builder::default();
    builder.push_record([
        "Inspected",
        "Accepted",
        "Rework",
        "Rejected",
        "Quality Rate",
        "Rework %",
        "Rejection %",
    ]);
    builder.push_record([
        summary.total_inspected.to_string(),
        summary.total_accepted.to_string(),
        summary.total_rework.to_string(),
        summary.total_rejected.to_string(),
        format!("{:.2}", summary.quality_rate),
        format!("{:.2}", summary.rework_percent),
        format!("{:.2}", summary.rejection_percent),
    ]);
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');
    output.push('\n');
    output.push_str(&format!("- **Rework PPM:** {}\n", summary.rework_ppm));
    output.push_str(&format!("- **Rejection PPM:** {}\n", summary.rejection_ppm));
    output.push_str(&format!("- **Overall PPM:** {}\n", summary.overall_ppm));

    if !report.part_wise.is_empty() {
        output.push_str("\n## Part-Wise\n\n");
        let mut builder = Builder::default();
        builder.push_record([
            "Part",
            "Inspected",
            "Accepted",
            "Rework",
            "Rejected",
            "Rework %",
            "Rejection %",
            "Quality Rate",
        ]);
        for row in &report.part_wise {
            builder.push_record([
                row.part_name.clone(),
                row.total_inspected.to_string(),
                row.total_accepted.to_string(),
                row.total_rework.to_string(),
                row.total_rejected.to_string(),
                format!("{:.2}", row.rework_percent),
                format!("{:.2}", row.rejection_percent),
                format!("{:.2}", row.quality_rate),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if !report.day_wise.is_empty() {
        output.push_str("\n## Day-Wise\n\n");
        let mut builder = Builder::default();
        builder.push_record([
            "Date",
            "Inspected",
            "Accepted",
            "Rework",
            "Rejected",
            "Quality Rate",
        ]);
        for row in &report.day_wise {
            builder.push_record([
                row.date.clone(),
                row.total_inspected.to_string(),
                row.total_accepted.to_string(),
                row.total_rework.to_string(),
                row.total_rejected.to_string(),
                format!("{:.2}", row.quality_rate),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if !report.inspector_wise.is_empty() {
        output.push_str("\n## Inspector-Wise\n\n");
        let mut builder = Builder::default();
        builder.push_record([
            "Inspector",
            "Inspected",
            "Accepted",
            "Rework",
            "Rejected",
            "Quality Rate",
        ]);
        for row in &report.inspector_wise {
            builder.push_record([
                row.inspector.clone(),
                row.total_inspected.to_string(),
                row.total_accepted.to_string(),
                row.total_rework.to_string(),
                row.total_rejected.to_string(),
                format!("{:.2}", row.quality_rate),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if !report.location_wise.is_empty() {
        output.push_str("\n## Location-Wise\n\n");
        let mut builder = Builder::default();
        builder.push_record(["Location", "Inspected", "Rework", "Rejected"]);
        for row in &report.location_wise {
            builder.push_record([
                row.location.clone(),
                row.total_inspected.to_string(),
                row.total_rework.to_string(),
                row.total_rejected.to_string(),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if !report.top_defects.is_empty() {
        output.push_str("\n## Top Defects\n\n");
        let mut builder = Builder::default();
        builder.push_record(["Defect", "Count", "Share %"]);
        for defect in &report.top_defects {
            builder.push_record([
                defect.defect.clone(),
                defect.count.to_string(),
                format!("{:.2}", defect.percentage),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::generate_report;
    use crate::entities::inspection::{FieldResponse, Inspection};

    #[test]
    fn test_render_markdown_includes_all_sections() {
        let mut insp = Inspection::new(
            "Line check".to_string(),
            "Vega".to_string(),
            "test".to_string(),
        );
        insp.responses = vec![
            FieldResponse::new("Part Name", "Gear"),
            FieldResponse::new("Total Inspected", "10"),
            FieldResponse::new("Rejection Qty", "1"),
            FieldResponse::new("Defect Type", "Burr"),
        ];

        let report = generate_report(&[insp], "March 2025", "All Companies");
        let rendered = render_markdown(&report);

        assert!(rendered.contains("# Quality Report"));
        assert!(rendered.contains("## Part-Wise"));
        assert!(rendered.contains("## Day-Wise"));
        assert!(rendered.contains("## Inspector-Wise"));
        assert!(rendered.contains("## Location-Wise"));
        assert!(rendered.contains("## Top Defects"));
        assert!(rendered.contains("Burr"));
    }

    #[test]
    fn test_render_markdown_empty_report_omits_tables() {
        let report = generate_report(&[], "March 2025", "All Companies");
        let rendered = render_markdown(&report);

        assert!(rendered.contains("# Quality Report"));
        assert!(rendered.contains("**Part Models:** N/A"));
        assert!(!rendered.contains("## Part-Wise"));
        assert!(!rendered.contains("## Top Defects"));
    }
}
