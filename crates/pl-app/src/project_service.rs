//! Project loading, saving, validation, and introspection.

use std::path::Path;

use pl_project::schema::{PlantLoopDef, Project};

use crate::error::{AppError, AppResult};

/// Summary of a plant loop for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantLoopSummary {
    pub name: String,
    pub fluid: String,
    pub supply_branches: usize,
    pub demand_branches: usize,
    pub component_count: usize,
    pub has_user_schemes: bool,
}

/// Load a project file (YAML, or JSON by extension), migrated and validated.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = pl_project::load(path)?;
    tracing::debug!(path = %path.display(), name = %project.name, "loaded project");
    Ok(project)
}

/// Save a project, as JSON when the path ends in `.json`.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => pl_project::save_json(path, project)?,
        _ => pl_project::save_yaml(path, project)?,
    }
    Ok(())
}

/// Validate project structure and references.
pub fn validate_project(project: &Project) -> AppResult<()> {
    pl_project::validate_project(project)?;
    Ok(())
}

/// List all plant loops in the project with summaries.
pub fn list_plant_loops(project: &Project) -> Vec<PlantLoopSummary> {
    project
        .plant_loops
        .iter()
        .map(|pl| PlantLoopSummary {
            name: pl.name.clone(),
            fluid: if pl.fluid.is_glycol() {
                format!("{} {}%", pl.fluid.as_str(), pl.glycol_concentration)
            } else {
                pl.fluid.as_str().to_string()
            },
            supply_branches: pl.supply.branches.len(),
            demand_branches: pl.demand.branches.len(),
            component_count: pl.supply.placements().count() + pl.demand.placements().count(),
            has_user_schemes: pl.operation.assignments().next().is_some(),
        })
        .collect()
}

/// Get a specific plant loop by name.
pub fn get_plant_loop<'a>(project: &'a Project, name: &str) -> AppResult<&'a PlantLoopDef> {
    project
        .plant_loop(name)
        .ok_or_else(|| AppError::PlantLoopNotFound(name.to_string()))
}
