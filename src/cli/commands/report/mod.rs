//! `qit report` command - Generate quality reports

mod defects;
mod quality;

use chrono::NaiveDate;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::entity::Status;
use crate::core::project::Project;
use crate::entities::inspection::Inspection;
use crate::yaml;

pub use defects::DefectsArgs;
pub use quality::QualityArgs;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Multi-dimensional quality report with PPM metrics
    Quality(QualityArgs),

    /// Defect Pareto table with cumulative contribution
    Defects(DefectsArgs),
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::Quality(args) => quality::run(args, global),
        ReportCommands::Defects(args) => defects::run(args, global),
    }
}

// Shared helper functions

pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

/// Fetch the records one report request covers
///
/// Reporting only ever sees submitted work: drafts and rejected records are
/// filtered out here, along with anything outside the date range or company
/// scope. The analytics engine itself does no filtering.
pub(crate) fn fetch_records(
    project: &Project,
    start: NaiveDate,
    end: NaiveDate,
    company: Option<&str>,
) -> Vec<Inspection> {
    let mut records = Vec::new();

    for path in project.iter_inspection_files() {
        let Ok(record) = yaml::parse_yaml_file::<Inspection>(&path) else {
            continue;
        };

        if !matches!(record.status, Status::Approved | Status::Pending) {
            continue;
        }
        let day = record.report_day();
        if day < start || day > end {
            continue;
        }
        if let Some(scope) = company {
            if record.company.as_deref() != Some(scope) {
                continue;
            }
        }

        records.push(record);
    }

    records
}

/// First and last day of the given month
pub(crate) fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

/// English month name for report headers
pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
