//! Command implementations

pub mod completions;
pub mod init;
pub mod insp;
pub mod report;

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::project::Project;

/// Resolve the project from --project or by walking up from the cwd
pub(crate) fn resolve_project(global: &GlobalOpts) -> Result<Project> {
    let project = match &global.project {
        Some(root) => Project::discover_from(root),
        None => Project::discover(),
    };
    project.map_err(|e| miette::miette!("{}", e))
}
