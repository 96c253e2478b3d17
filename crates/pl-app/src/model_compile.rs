//! Compilation of a project definition into an in-memory model.

use std::collections::HashMap;

use pl_core::{ObjectId, degc, delta_k};
use pl_model::{
    LoadRange, LoopSide, Model, OperationScheme, PassageRole, SchemeAssignment,
    ScheduleTypeLimits, SetpointManager, SizingPlant,
};
use pl_project::schema::{
    LoopSideDef, NodeRefDef, OperationSchemeKindDef, PlacementDef, PlantLoopDef, Project,
    SchemeAssignmentDef, SetpointManagerKindDef,
};
use pl_translate::TranslatorOptions;

use crate::error::{AppError, AppResult};

/// Model built from a project, with the project names resolved to ids.
#[derive(Debug)]
pub struct CompiledModel {
    pub model: Model,
    pub ids: HashMap<String, ObjectId>,
}

impl CompiledModel {
    pub fn id(&self, name: &str) -> Option<ObjectId> {
        self.ids.get(name).copied()
    }
}

struct Names<'a>(&'a HashMap<String, ObjectId>);

impl Names<'_> {
    fn get(&self, name: &str) -> AppResult<ObjectId> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| AppError::Compile(format!("Object not found: {}", name)))
    }
}

/// Build a model from a validated project.
///
/// Objects are created in dependency order: schedules, components and
/// their containment, operation schemes, plant loops with their wiring,
/// then setpoint managers (which may reference nodes created by wiring).
pub fn compile_model(project: &Project) -> AppResult<CompiledModel> {
    let mut model = Model::new();
    let mut ids: HashMap<String, ObjectId> = HashMap::new();

    for schedule in &project.schedules {
        let limits = schedule.type_limits.as_ref().map(|t| ScheduleTypeLimits {
            name: t.name.clone(),
            lower_limit: t.lower_limit,
            upper_limit: t.upper_limit,
            numeric_type: t.numeric_type.clone(),
        });
        let id = model.add_schedule_constant(&schedule.name, schedule.value, limits);
        ids.insert(schedule.name.clone(), id);
    }

    for component in &project.components {
        let id = model.add_component(&component.name, component.kind.clone());
        ids.insert(component.name.clone(), id);
    }
    for component in &project.components {
        if let Some(container) = &component.contained_in {
            let names = Names(&ids);
            model.set_container(names.get(&component.name)?, names.get(container)?)?;
        }
    }

    for scheme in &project.operation_schemes {
        let names = Names(&ids);
        let resolve = |list: &[String]| -> AppResult<Vec<ObjectId>> {
            list.iter().map(|n| names.get(n)).collect()
        };
        let ranges = |defs: &[pl_project::LoadRangeDef]| -> AppResult<Vec<LoadRange>> {
            defs.iter()
                .map(|r| {
                    Ok(LoadRange {
                        lower_limit_w: r.lower_limit_w,
                        upper_limit_w: r.upper_limit_w,
                        equipment: resolve(&r.equipment)?,
                    })
                })
                .collect()
        };
        let kind = match &scheme.kind {
            OperationSchemeKindDef::HeatingLoad { ranges: defs } => OperationScheme::HeatingLoad {
                ranges: ranges(defs)?,
            },
            OperationSchemeKindDef::CoolingLoad { ranges: defs } => OperationScheme::CoolingLoad {
                ranges: ranges(defs)?,
            },
            OperationSchemeKindDef::Uncontrolled { equipment } => OperationScheme::Uncontrolled {
                equipment: resolve(equipment)?,
            },
        };
        let id = model.add_operation_scheme(&scheme.name, kind);
        ids.insert(scheme.name.clone(), id);
    }

    for def in &project.plant_loops {
        let id = model.add_plant_loop(&def.name);
        ids.insert(def.name.clone(), id);
        wire_side(&mut model, &ids, id, LoopSide::Supply, &def.supply)?;
        wire_side(&mut model, &ids, id, LoopSide::Demand, &def.demand)?;
        configure_loop(&mut model, &ids, id, def)?;
        tracing::debug!(plant_loop = %def.name, "compiled plant loop");
    }

    for spm in &project.setpoint_managers {
        let names = Names(&ids);
        let node = Some(resolve_node(&model, &names, &spm.node)?);
        let kind = match &spm.kind {
            SetpointManagerKindDef::Scheduled {
                control_variable,
                schedule,
            } => SetpointManager::Scheduled {
                control_variable: control_variable.clone(),
                schedule: names.get(schedule)?,
                node,
            },
            SetpointManagerKindDef::ScheduledDualSetpoint {
                high_schedule,
                low_schedule,
            } => SetpointManager::ScheduledDualSetpoint {
                high_schedule: names.get(high_schedule)?,
                low_schedule: names.get(low_schedule)?,
                node,
            },
        };
        let id = model.add_setpoint_manager(&spm.name, kind);
        ids.insert(spm.name.clone(), id);
    }

    tracing::info!(
        project = %project.name,
        objects = model.objects().len(),
        "compiled project model"
    );
    Ok(CompiledModel { model, ids })
}

/// Translator settings from the project, before command-line overrides.
pub fn translator_options(project: &Project) -> TranslatorOptions {
    TranslatorOptions {
        field_comments: project.translator.field_comments,
        translate_unconnected_components: project.translator.translate_unconnected_components,
    }
}

fn placement(
    model: &Model,
    names: &Names<'_>,
    def: &PlacementDef,
    side: LoopSide,
) -> AppResult<(ObjectId, PassageRole)> {
    let component = names.get(def.component())?;
    let role = match def.role() {
        Some(role) => role,
        None => model.default_role(component, side, false)?,
    };
    Ok((component, role))
}

fn passage_outlet(model: &Model, component: ObjectId, role: PassageRole) -> AppResult<ObjectId> {
    model
        .component(component)
        .and_then(|c| c.passage(role))
        .and_then(|p| p.outlet)
        .ok_or_else(|| {
            AppError::Compile(format!(
                "Component '{}' {:?} passage has no outlet node",
                model.name(component),
                role
            ))
        })
}

/// Place one side's equipment: the inlet run in flow order after the side
/// inlet node, each branch in series behind its first component, then the
/// outlet run ahead of the side outlet node.
fn wire_side(
    model: &mut Model,
    ids: &HashMap<String, ObjectId>,
    plant_loop: ObjectId,
    side: LoopSide,
    def: &LoopSideDef,
) -> AppResult<()> {
    let names = Names(ids);
    let anchors = *model
        .plant_loop(plant_loop)
        .ok_or_else(|| AppError::Compile(format!("Not a plant loop: {}", model.name(plant_loop))))?
        .anchors(side);

    let mut tail = anchors.inlet_node;
    for p in &def.inlet {
        let (component, role) = placement(model, &names, p, side)?;
        model.add_to_node(component, role, tail)?;
        tail = passage_outlet(model, component, role)?;
    }

    for branch in &def.branches {
        let mut run = branch.iter();
        let Some(first) = run.next() else {
            continue;
        };
        let (component, role) = placement(model, &names, first, side)?;
        model.add_branch_for_passage(plant_loop, side, component, role)?;
        let mut tail = passage_outlet(model, component, role)?;
        for p in run {
            let (component, role) = placement(model, &names, p, side)?;
            model.add_to_node(component, role, tail)?;
            tail = passage_outlet(model, component, role)?;
        }
    }

    for p in &def.outlet {
        let (component, role) = placement(model, &names, p, side)?;
        model.add_to_node(component, role, anchors.outlet_node)?;
    }
    Ok(())
}

fn configure_loop(
    model: &mut Model,
    ids: &HashMap<String, ObjectId>,
    plant_loop: ObjectId,
    def: &PlantLoopDef,
) -> AppResult<()> {
    let names = Names(ids);
    let setpoint_node = def
        .setpoint_node
        .as_ref()
        .map(|n| resolve_node(model, &names, n))
        .transpose()?;
    let assign = |a: &Option<SchemeAssignmentDef>| -> AppResult<Option<SchemeAssignment>> {
        a.as_ref()
            .map(|a| {
                Ok(SchemeAssignment {
                    scheme: names.get(&a.scheme)?,
                    schedule: a.schedule.as_deref().map(|s| names.get(s)).transpose()?,
                })
            })
            .transpose()
    };
    let heating_load_scheme = assign(&def.operation.heating_load)?;
    let cooling_load_scheme = assign(&def.operation.cooling_load)?;
    let primary_scheme = assign(&def.operation.primary)?;
    let component_setpoint_scheme_schedule = def
        .operation
        .component_setpoint_schedule
        .as_deref()
        .map(|s| names.get(s))
        .transpose()?;

    let name = model.name(plant_loop).to_string();
    let pl = model
        .plant_loop_mut(plant_loop)
        .ok_or_else(|| AppError::Compile(format!("Not a plant loop: {}", name)))?;
    pl.fluid_type = def.fluid.clone();
    pl.glycol_concentration = def.glycol_concentration;
    pl.loop_temperature_setpoint_node = setpoint_node;
    pl.maximum_loop_temperature = def.maximum_loop_temperature_c.map(degc);
    pl.minimum_loop_temperature = def.minimum_loop_temperature_c.map(degc);
    pl.maximum_loop_flow_rate_m3ps = def.maximum_loop_flow_rate_m3ps;
    pl.minimum_loop_flow_rate_m3ps = def.minimum_loop_flow_rate_m3ps;
    pl.plant_loop_volume_m3 = def.plant_loop_volume_m3;
    pl.load_distribution_scheme = def.load_distribution_scheme;
    pl.common_pipe_simulation = def.common_pipe_simulation;
    pl.sizing = SizingPlant {
        loop_type: def.sizing.loop_type,
        design_loop_exit_temperature: degc(def.sizing.design_loop_exit_temperature_c),
        loop_design_temperature_difference: delta_k(
            def.sizing.loop_design_temperature_difference_k,
        ),
    };
    pl.heating_load_scheme = heating_load_scheme;
    pl.cooling_load_scheme = cooling_load_scheme;
    pl.primary_scheme = primary_scheme;
    pl.component_setpoint_scheme_schedule = component_setpoint_scheme_schedule;
    Ok(())
}

fn resolve_node(model: &Model, names: &Names<'_>, node: &NodeRefDef) -> AppResult<ObjectId> {
    match node {
        NodeRefDef::LoopInlet { plant_loop, side } | NodeRefDef::LoopOutlet { plant_loop, side } => {
            let id = names.get(plant_loop)?;
            let pl = model
                .plant_loop(id)
                .ok_or_else(|| AppError::Compile(format!("Not a plant loop: {}", plant_loop)))?;
            let anchors = pl.anchors(*side);
            Ok(match node {
                NodeRefDef::LoopInlet { .. } => anchors.inlet_node,
                _ => anchors.outlet_node,
            })
        }
        NodeRefDef::ComponentInlet { component, role }
        | NodeRefDef::ComponentOutlet { component, role } => {
            let id = names.get(component)?;
            let c = model
                .component(id)
                .ok_or_else(|| AppError::Compile(format!("Not a component: {}", component)))?;
            // Without a role, the first passage that is on a loop.
            let passage = match role {
                Some(role) => c.passage(*role).copied(),
                None => c
                    .ports
                    .passages()
                    .into_iter()
                    .map(|(_, p)| p)
                    .find(|p| p.is_connected()),
            };
            let node = passage.and_then(|p| match node {
                NodeRefDef::ComponentInlet { .. } => p.inlet,
                _ => p.outlet,
            });
            node.ok_or_else(|| {
                AppError::Compile(format!("Component '{}' is not on a plant loop", component))
            })
        }
    }
}
