//! Defect Pareto report
//!
//! The analytics engine ranks defects and annotates each with its share of
//! all occurrences; the cumulative column for the 80/20 reading is a
//! presentation concern and is computed here.

use chrono::Datelike;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use super::{fetch_records, month_name, month_range, write_output};
use crate::analytics::generate_report;
use crate::cli::commands::resolve_project;
use crate::cli::GlobalOpts;
use crate::core::config::Config;

#[derive(clap::Args, Debug)]
pub struct DefectsArgs {
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

pub fn run(args: DefectsArgs, global: &GlobalOpts) -> Result<()> {
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
    let report = generate_report(&records, &period, &company_name);

    let mut output = String::new();
    output.push_str("# Defect Pareto\n\n");
    output.push_str(&format!("- **Period:** {}\n", period));
    output.push_str(&format!("- **Company:** {}\n", company_name));
    output.push('\n');

    if report.top_defects.is_empty() {
        output.push_str("No defects recorded.\n");
        return write_output(&output, args.output);
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Defect", "Count", "Share %", "Cumulative %"]);
    let mut cumulative = 0.0;
    for (rank, defect) in report.top_defects.iter().enumerate() {
        cumulative += defect.percentage;
        builder.push_record([
            (rank + 1).to_string(),
            defect.defect.clone(),
            defect.count.to_string(),
            format!("{:.2}", defect.percentage),
            format!("{:.2}", cumulative),
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');

    write_output(&output, args.output)
}
