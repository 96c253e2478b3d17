//! Project validation logic.

use std::collections::HashSet;

use pl_model::PortLayout;

use crate::schema::{
    ComponentDef, NodeRefDef, OperationSchemeDef, OperationSchemeKindDef, PlantLoopDef, Project,
    ScheduleDef,
};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Names already taken in the model, by section.
struct Names<'a> {
    schedules: HashSet<&'a str>,
    components: HashSet<&'a str>,
    plant_loops: HashSet<&'a str>,
    schemes: HashSet<&'a str>,
    /// Components without hydraulic passages of their own.
    containers: HashSet<&'a str>,
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    // Every object shares one model namespace.
    let all_names = project
        .schedules
        .iter()
        .map(|s| (&s.name, "schedules"))
        .chain(project.components.iter().map(|c| (&c.name, "components")))
        .chain(project.plant_loops.iter().map(|l| (&l.name, "plant_loops")))
        .chain(
            project
                .setpoint_managers
                .iter()
                .map(|m| (&m.name, "setpoint_managers")),
        )
        .chain(
            project
                .operation_schemes
                .iter()
                .map(|s| (&s.name, "operation_schemes")),
        );
    let mut seen = HashSet::new();
    for (name, context) in all_names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateId {
                id: name.clone(),
                context: context.to_string(),
            });
        }
    }

    let names = Names {
        schedules: project.schedules.iter().map(|s| s.name.as_str()).collect(),
        components: project.components.iter().map(|c| c.name.as_str()).collect(),
        plant_loops: project.plant_loops.iter().map(|l| l.name.as_str()).collect(),
        schemes: project
            .operation_schemes
            .iter()
            .map(|s| s.name.as_str())
            .collect(),
        containers: project
            .components
            .iter()
            .filter(|c| matches!(c.kind.port_layout(), PortLayout::None))
            .map(|c| c.name.as_str())
            .collect(),
    };

    for schedule in &project.schedules {
        validate_schedule(schedule)?;
    }
    for component in &project.components {
        validate_component(component, &names)?;
    }
    for plant_loop in &project.plant_loops {
        validate_plant_loop(plant_loop, &names)?;
    }
    for spm in &project.setpoint_managers {
        for schedule in spm.kind.schedules() {
            require(&names.schedules, schedule, || {
                format!("setpoint manager '{}' schedule", spm.name)
            })?;
        }
        validate_node_ref(&spm.node, &names, &format!("setpoint manager '{}'", spm.name))?;
    }
    for scheme in &project.operation_schemes {
        validate_scheme(scheme, &names)?;
    }

    Ok(())
}

fn require(
    set: &HashSet<&str>,
    id: &str,
    context: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    if set.contains(id) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            id: id.to_string(),
            context: context(),
        })
    }
}

fn validate_schedule(schedule: &ScheduleDef) -> Result<(), ValidationError> {
    validate_finite("value", schedule.value, &format!("schedule '{}'", schedule.name))?;
    if let Some(limits) = &schedule.type_limits
        && let (Some(lo), Some(hi)) = (limits.lower_limit, limits.upper_limit)
        && lo > hi
    {
        return Err(ValidationError::InvalidValue {
            field: format!("schedule '{}' type_limits", schedule.name),
            value: format!("{lo}..{hi}"),
            reason: "lower limit exceeds upper limit".to_string(),
        });
    }
    Ok(())
}

fn validate_component(component: &ComponentDef, names: &Names<'_>) -> Result<(), ValidationError> {
    if let Some(container) = &component.contained_in {
        require(&names.components, container, || {
            format!("component '{}' contained_in", component.name)
        })?;
        if *container == component.name {
            return Err(ValidationError::InvalidValue {
                field: format!("component '{}' contained_in", component.name),
                value: container.clone(),
                reason: "a component cannot contain itself".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_plant_loop(pl: &PlantLoopDef, names: &Names<'_>) -> Result<(), ValidationError> {
    let context = format!("plant loop '{}'", pl.name);

    if pl.glycol_concentration > 100 {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} glycol_concentration"),
            value: pl.glycol_concentration.to_string(),
            reason: "must be a percentage".to_string(),
        });
    }
    if pl.fluid.is_glycol() && pl.glycol_concentration == 0 {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} glycol_concentration"),
            value: "0".to_string(),
            reason: "glycol loops need a nonzero concentration".to_string(),
        });
    }
    if let Some(t) = pl.maximum_loop_temperature_c {
        validate_finite("maximum_loop_temperature_c", t, &context)?;
    }
    if let Some(t) = pl.minimum_loop_temperature_c {
        validate_finite("minimum_loop_temperature_c", t, &context)?;
    }
    if let (Some(max), Some(min)) = (pl.maximum_loop_temperature_c, pl.minimum_loop_temperature_c)
        && min > max
    {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} minimum_loop_temperature_c"),
            value: min.to_string(),
            reason: format!("exceeds the maximum of {max}"),
        });
    }
    if let Some(v) = pl.maximum_loop_flow_rate_m3ps.value() {
        validate_positive_finite("maximum_loop_flow_rate_m3ps", v, &context)?;
    }
    if let Some(v) = pl.minimum_loop_flow_rate_m3ps.value() {
        validate_non_negative_finite("minimum_loop_flow_rate_m3ps", v, &context)?;
    }
    if let Some(v) = pl.plant_loop_volume_m3 {
        validate_positive_finite("plant_loop_volume_m3", v, &context)?;
    }
    validate_finite(
        "sizing design_loop_exit_temperature_c",
        pl.sizing.design_loop_exit_temperature_c,
        &context,
    )?;
    validate_positive_finite(
        "sizing loop_design_temperature_difference_k",
        pl.sizing.loop_design_temperature_difference_k,
        &context,
    )?;

    for (side, def) in [("supply", &pl.supply), ("demand", &pl.demand)] {
        for placement in def.placements() {
            let component = placement.component();
            require(&names.components, component, || format!("{context} {side}"))?;
            if names.containers.contains(component) {
                return Err(ValidationError::Unsupported {
                    feature: format!("{context} {side} placement of '{component}'"),
                    reason: "this component has no water connections; place its coil instead"
                        .to_string(),
                });
            }
        }
        if def.branches.iter().any(Vec::is_empty) {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} {side} branches"),
                value: "[]".to_string(),
                reason: "a branch needs at least one component".to_string(),
            });
        }
    }

    if let Some(node) = &pl.setpoint_node {
        validate_node_ref(node, names, &format!("{context} setpoint_node"))?;
    }

    for assignment in pl.operation.assignments() {
        require(&names.schemes, &assignment.scheme, || {
            format!("{context} operation scheme")
        })?;
        if let Some(schedule) = &assignment.schedule {
            require(&names.schedules, schedule, || {
                format!("{context} operation scheme schedule")
            })?;
        }
    }
    if let Some(schedule) = &pl.operation.component_setpoint_schedule {
        require(&names.schedules, schedule, || {
            format!("{context} component_setpoint_schedule")
        })?;
    }

    Ok(())
}

fn validate_node_ref(
    node: &NodeRefDef,
    names: &Names<'_>,
    context: &str,
) -> Result<(), ValidationError> {
    match node {
        NodeRefDef::LoopInlet { plant_loop, .. } | NodeRefDef::LoopOutlet { plant_loop, .. } => {
            require(&names.plant_loops, plant_loop, || format!("{context} node"))
        }
        NodeRefDef::ComponentInlet { component, .. }
        | NodeRefDef::ComponentOutlet { component, .. } => {
            require(&names.components, component, || format!("{context} node"))
        }
    }
}

fn validate_scheme(scheme: &OperationSchemeDef, names: &Names<'_>) -> Result<(), ValidationError> {
    let context = format!("operation scheme '{}'", scheme.name);
    match &scheme.kind {
        OperationSchemeKindDef::HeatingLoad { ranges }
        | OperationSchemeKindDef::CoolingLoad { ranges } => {
            if ranges.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("{context} ranges"),
                    value: "[]".to_string(),
                    reason: "a load scheme needs at least one range".to_string(),
                });
            }
            for range in ranges {
                validate_non_negative_finite("lower_limit_w", range.lower_limit_w, &context)?;
                validate_non_negative_finite("upper_limit_w", range.upper_limit_w, &context)?;
                if range.lower_limit_w > range.upper_limit_w {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{context} lower_limit_w"),
                        value: range.lower_limit_w.to_string(),
                        reason: format!("exceeds the upper limit of {}", range.upper_limit_w),
                    });
                }
            }
        }
        OperationSchemeKindDef::Uncontrolled { .. } => {}
    }
    for equipment in scheme.kind.equipment() {
        require(&names.components, equipment, || format!("{context} equipment"))?;
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64, context: &str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("{} {}", context, field),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &str, value: f64, context: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("{} {}", context, field),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_finite(
    field: &str,
    value: f64,
    context: &str,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("{} {}", context, field),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use pl_model::{Autosizable, ComponentKind, FluidType};

    fn boiler(name: &str) -> ComponentDef {
        ComponentDef {
            name: name.to_string(),
            kind: ComponentKind::BoilerHotWater {
                nominal_capacity_w: Autosizable::Autosize,
                nominal_thermal_efficiency: 0.8,
                design_water_flow_rate_m3ps: Autosizable::Autosize,
                fuel_type: "NaturalGas".to_string(),
            },
            contained_in: None,
        }
    }

    fn hot_water_project() -> Project {
        let mut project = Project::new("HW");
        project.components.push(boiler("Boiler"));
        let mut pl: PlantLoopDef = serde_yaml::from_str("name: HW Loop\n").unwrap();
        pl.supply.branches.push(vec![PlacementDef::Name("Boiler".to_string())]);
        project.plant_loops.push(pl);
        project
    }

    #[test]
    fn valid_project_passes() {
        validate_project(&hot_water_project()).unwrap();
    }

    #[test]
    fn names_are_unique_across_sections() {
        let mut project = hot_water_project();
        project.schedules.push(ScheduleDef {
            name: "Boiler".to_string(),
            value: 1.0,
            type_limits: None,
        });
        let err = validate_project(&project).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { ref id, .. } if id == "Boiler"));
    }

    #[test]
    fn unknown_branch_component_is_reported() {
        let mut project = hot_water_project();
        project.plant_loops[0]
            .demand
            .branches
            .push(vec![PlacementDef::Name("Missing Coil".to_string())]);
        let err = validate_project(&project).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingReference { ref id, .. } if id == "Missing Coil"
        ));
    }

    #[test]
    fn glycol_loop_needs_concentration() {
        let mut project = hot_water_project();
        project.plant_loops[0].fluid = FluidType::PropyleneGlycol;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidValue { .. })
        ));
        project.plant_loops[0].glycol_concentration = 30;
        validate_project(&project).unwrap();
    }

    #[test]
    fn inverted_load_range_is_rejected() {
        let mut project = hot_water_project();
        project.operation_schemes.push(OperationSchemeDef {
            name: "Heating".to_string(),
            kind: OperationSchemeKindDef::HeatingLoad {
                ranges: vec![LoadRangeDef {
                    lower_limit_w: 1000.0,
                    upper_limit_w: 10.0,
                    equipment: vec!["Boiler".to_string()],
                }],
            },
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn scheme_assignment_must_exist() {
        let mut project = hot_water_project();
        project.plant_loops[0].operation.heating_load = Some(SchemeAssignmentDef {
            scheme: "Nope".to_string(),
            schedule: None,
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn setpoint_manager_node_must_resolve() {
        let mut project = hot_water_project();
        project.schedules.push(ScheduleDef {
            name: "HW Temp".to_string(),
            value: 82.0,
            type_limits: None,
        });
        project.setpoint_managers.push(SetpointManagerDef {
            name: "HW SPM".to_string(),
            kind: SetpointManagerKindDef::Scheduled {
                control_variable: "Temperature".to_string(),
                schedule: "HW Temp".to_string(),
            },
            node: NodeRefDef::LoopOutlet {
                plant_loop: "Other Loop".to_string(),
                side: pl_model::LoopSide::Supply,
            },
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::MissingReference { ref id, .. }) if id == "Other Loop"
        ));
    }

    #[test]
    fn terminal_cannot_sit_on_a_branch() {
        let mut project = hot_water_project();
        project.components.push(ComponentDef {
            name: "Beam".to_string(),
            kind: ComponentKind::AirTerminalCooledBeam {
                cooled_beam_type: "Active".to_string(),
                supply_air_volumetric_flow_rate_m3ps: Autosizable::Autosize,
            },
            contained_in: None,
        });
        project.plant_loops[0]
            .demand
            .branches
            .push(vec![PlacementDef::Name("Beam".to_string())]);
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut project = hot_water_project();
        project.version = crate::migrate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
