//! `qit insp` command - read-only access to inspection records
//!
//! Records are produced by the surrounding submission/approval workflow;
//! QIT never creates or mutates them, it only lists and shows them.

use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::commands::resolve_project;
use crate::cli::helpers::{format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Status;
use crate::core::loader;
use crate::entities::inspection::Inspection;

#[derive(Subcommand, Debug)]
pub enum InspCommands {
    /// List inspection records
    List(ListArgs),

    /// Show one inspection record in full
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by workflow status
    #[arg(long)]
    pub status: Option<Status>,

    /// Filter by inspector name (substring, case-insensitive)
    #[arg(long)]
    pub inspector: Option<String>,

    /// Filter by company (substring, case-insensitive)
    #[arg(long)]
    pub company: Option<String>,

    /// Filter by title or inspection number (substring, case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Print only the number of matching records
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record ID (full or partial)
    pub id: String,
}

pub fn run(cmd: InspCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InspCommands::List(args) => run_list(args, global),
        InspCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;

    let mut records: Vec<Inspection> = loader::load_all(&project.inspections_dir())?;

    records.retain(|r| match args.status {
        Some(status) => r.status == status,
        None => true,
    });
    if let Some(ref inspector) = args.inspector {
        let needle = inspector.to_lowercase();
        records.retain(|r| r.inspector.to_lowercase().contains(&needle));
    }
    if let Some(ref company) = args.company {
        let needle = company.to_lowercase();
        records.retain(|r| {
            r.company
                .as_ref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        });
    }
    if let Some(ref search) = args.search {
        let needle = search.to_lowercase();
        records.retain(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.inspection_number
                    .as_ref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        });
    }

    records.sort_by(|a, b| a.created.cmp(&b.created));

    if args.count {
        println!("{}", records.len());
        return Ok(());
    }

    if records.is_empty() {
        println!("No inspection records found.");
        return Ok(());
    }

    if global.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).map_err(|e| miette::miette!("{}", e))?
        );
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Title", "Inspector", "Company", "Submitted", "Status"]);
    for record in &records {
        builder.push_record([
            format_short_id(&record.id),
            truncate_str(&record.title, 30),
            record.inspector.clone(),
            record.company.clone().unwrap_or_else(|| "-".to_string()),
            record
                .submitted_at
                .map(|d| d.date_naive().to_string())
                .unwrap_or_else(|| "-".to_string()),
            record.status.to_string(),
        ]);
    }
    println!("{}", builder.build().with(TableStyle::markdown()));

    if !global.quiet {
        println!();
        println!("{} record(s)", records.len());
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;

    let Some((path, record)) =
        loader::load_entity::<Inspection>(&project.inspections_dir(), &args.id)?
    else {
        return Err(miette::miette!("Inspection not found: {}", args.id));
    };

    println!("{}", style(&record.title).bold());
    println!("{}", style(record.id.to_string()).dim());
    if global.verbose {
        println!("{}", style(path.display()).dim());
    }
    println!();
    println!("Inspector:  {}", record.inspector);
    if let Some(ref number) = record.inspection_number {
        println!("Number:     {}", number);
    }
    if let Some(ref company) = record.company {
        println!("Company:    {}", company);
    }
    if let Some(submitted) = record.submitted_at {
        println!("Submitted:  {}", submitted.date_naive());
    }
    println!("Status:     {}", record.status);
    println!("Author:     {}", record.author);

    if !record.responses.is_empty() {
        println!();
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for response in &record.responses {
            builder.push_record([
                response.label.clone(),
                response.value.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        println!("{}", builder.build().with(TableStyle::markdown()));
    }

    Ok(())
}
