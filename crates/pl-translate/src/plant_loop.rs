//! Plant loop assembly: the `PlantLoop` record and everything hanging off
//! it (branch lists, connectors, branches, placeholder pipes, sizing and the
//! operation scheme list).

use pl_core::units::read;
use pl_core::{ObjectId, RecordId};
use pl_idf::idd::{
    BranchExtensibleFields, BranchListExtensibleFields, ConnectorListFields,
    ConnectorMixerExtensibleFields, ConnectorMixerFields, ConnectorSplitterExtensibleFields,
    ConnectorSplitterFields, PipeAdiabaticFields, PlantLoopFields, SizingPlantFields,
};
use pl_idf::{IddObjectType, IdfObject};
use pl_model::{LoopSide, ModelError, ObjectKind, PlantLoop, SideTopology};

use crate::branch::populate_branch;
use crate::context::TranslateContext;
use crate::error::{TranslateError, TranslateResult};
use crate::fluid::translate_glycol;
use crate::operation_schemes::translate_plant_equipment_operation_schemes;
use crate::session::TranslationSession;
use crate::values::{named, number, sizable};

/// Translate one plant loop. The loop is mapped to its record before any
/// of its components are visited.
pub(crate) fn translate_plant_loop(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    loop_id: ObjectId,
) -> TranslateResult<RecordId> {
    let object = cx.model.get(loop_id)?;
    let ObjectKind::PlantLoop(plant_loop) = &object.kind else {
        return Err(ModelError::WrongKind {
            name: object.name.clone(),
            expected: "plant loop",
        }
        .into());
    };
    let name = object.name.as_str();
    let topology = cx
        .topology
        .get(loop_id)
        .ok_or_else(|| TranslateError::structure(name, "loop topology was not indexed"))?;
    tracing::debug!(plant_loop = %name, "translating plant loop");

    let record = session.push(loop_record(cx, name, plant_loop)?);
    session.map(loop_id, Some(record));

    if plant_loop.fluid_type.is_glycol() {
        let fluid = translate_glycol(
            session,
            &plant_loop.fluid_type,
            plant_loop.glycol_concentration,
        )?;
        session
            .record_mut(record)
            .set_string(PlantLoopFields::UserDefinedFluidType, fluid);
    }

    let sizing = &plant_loop.sizing;
    let mut sizing_record = IdfObject::new(IddObjectType::SizingPlant);
    sizing_record
        .set_string(SizingPlantFields::PlantorCondenserLoopName, name)
        .set_string(SizingPlantFields::LoopType, sizing.loop_type.as_str())
        .set_string(
            SizingPlantFields::DesignLoopExitTemperature,
            number(
                "design loop exit temperature",
                read::to_degc(sizing.design_loop_exit_temperature),
            )?,
        )
        .set_string(
            SizingPlantFields::LoopDesignTemperatureDifference,
            number(
                "loop design temperature difference",
                read::to_delta_k(sizing.loop_design_temperature_difference),
            )?,
        );
    session.push(sizing_record);

    for side in [LoopSide::Supply, LoopSide::Demand] {
        let lists = SideAssembler {
            cx,
            plant_loop: loop_id,
            loop_name: name,
            topology: topology.side(side),
        }
        .assemble(session)?;
        let (branch_list_field, connector_list_field) = match side {
            LoopSide::Supply => (
                PlantLoopFields::PlantSideBranchListName,
                PlantLoopFields::PlantSideConnectorListName,
            ),
            LoopSide::Demand => (
                PlantLoopFields::DemandSideBranchListName,
                PlantLoopFields::DemandSideConnectorListName,
            ),
        };
        session
            .record_mut(record)
            .set_string(branch_list_field, lists.branch_list)
            .set_string(connector_list_field, lists.connector_list);
    }

    let schemes = translate_plant_equipment_operation_schemes(cx, session, loop_id)?;
    session
        .record_mut(record)
        .set_string(PlantLoopFields::PlantEquipmentOperationSchemeName, schemes);

    Ok(record)
}

fn loop_record(
    cx: TranslateContext<'_>,
    name: &str,
    plant_loop: &PlantLoop,
) -> TranslateResult<IdfObject> {
    let model = cx.model;
    let fluid_type = if plant_loop.fluid_type.is_glycol() {
        "UserDefinedFluidType"
    } else {
        plant_loop.fluid_type.as_str()
    };
    let max_temperature = plant_loop
        .maximum_loop_temperature
        .map(|t| number("maximum loop temperature", read::to_degc(t)))
        .transpose()?;
    let min_temperature = plant_loop
        .minimum_loop_temperature
        .map(|t| number("minimum loop temperature", read::to_degc(t)))
        .transpose()?;
    let volume = match plant_loop.plant_loop_volume_m3 {
        Some(v) => number("plant loop volume", v)?,
        None => "Autocalculate".to_string(),
    };
    let dual_setpoint = model
        .setpoint_managers_on(plant_loop.supply.outlet_node)
        .into_iter()
        .any(|spm| model.setpoint_manager(spm).is_some_and(|m| m.is_dual_setpoint()));

    let mut record = named(IddObjectType::PlantLoop, name);
    record
        .set_string(PlantLoopFields::FluidType, fluid_type)
        .set_string(
            PlantLoopFields::LoopTemperatureSetpointNodeName,
            model.name(plant_loop.setpoint_node()),
        )
        .set_if_some(PlantLoopFields::MaximumLoopTemperature, max_temperature)
        .set_if_some(PlantLoopFields::MinimumLoopTemperature, min_temperature)
        .set_string(
            PlantLoopFields::MaximumLoopFlowRate,
            sizable("maximum loop flow rate", plant_loop.maximum_loop_flow_rate_m3ps)?,
        )
        .set_string(
            PlantLoopFields::MinimumLoopFlowRate,
            sizable("minimum loop flow rate", plant_loop.minimum_loop_flow_rate_m3ps)?,
        )
        .set_string(PlantLoopFields::PlantLoopVolume, volume)
        .set_string(
            PlantLoopFields::PlantSideInletNodeName,
            model.name(plant_loop.supply.inlet_node),
        )
        .set_string(
            PlantLoopFields::PlantSideOutletNodeName,
            model.name(plant_loop.supply.outlet_node),
        )
        .set_string(
            PlantLoopFields::DemandSideInletNodeName,
            model.name(plant_loop.demand.inlet_node),
        )
        .set_string(
            PlantLoopFields::DemandSideOutletNodeName,
            model.name(plant_loop.demand.outlet_node),
        )
        .set_string(
            PlantLoopFields::LoadDistributionScheme,
            plant_loop.load_distribution_scheme.as_str(),
        )
        .set_string(
            PlantLoopFields::PlantLoopDemandCalculationScheme,
            if dual_setpoint {
                "DualSetpointDeadband"
            } else {
                "SingleSetpoint"
            },
        )
        .set_if_some(
            PlantLoopFields::CommonPipeSimulation,
            plant_loop.common_pipe_simulation.map(|c| c.as_str()),
        );
    Ok(record)
}

/// Names of the per-side lists the loop record points at.
struct SideLists {
    branch_list: String,
    connector_list: String,
}

/// Builds the connector, branch list and branches of one loop side.
struct SideAssembler<'a> {
    cx: TranslateContext<'a>,
    plant_loop: ObjectId,
    loop_name: &'a str,
    topology: &'a SideTopology,
}

/// Where a two-object run gets its placeholder pipe.
struct PipeSpec {
    name: String,
    inlet: String,
    outlet: String,
}

impl PipeSpec {
    /// A pipe with its own synthetic nodes on both ends.
    fn standalone(name: String) -> Self {
        Self {
            inlet: format!("{name} Inlet Node"),
            outlet: format!("{name} Outlet Node"),
            name,
        }
    }
}

impl SideAssembler<'_> {
    fn side(&self) -> LoopSide {
        self.topology.side
    }

    fn prefix(&self) -> String {
        format!("{} {}", self.loop_name, self.side().label())
    }

    fn assemble(&self, session: &mut TranslationSession) -> TranslateResult<SideLists> {
        let model = self.cx.model;
        let anchors = self.topology.anchors;
        let prefix = self.prefix();

        if model.splitter(anchors.splitter).is_none() {
            return Err(TranslateError::structure(
                self.loop_name,
                format!("{} side has no splitter", self.side().label()),
            ));
        }
        if model.mixer(anchors.mixer).is_none() {
            return Err(TranslateError::structure(
                self.loop_name,
                format!("{} side has no mixer", self.side().label()),
            ));
        }

        let branch_list = session.push(named(
            IddObjectType::BranchList,
            &format!("{prefix} Branches"),
        ));
        let connector_list_name = format!("{prefix} Connector List");
        let splitter_name = format!("{prefix} Splitter");
        let mixer_name = format!("{prefix} Mixer");
        let mut connector_list = named(IddObjectType::ConnectorList, &connector_list_name);
        connector_list
            .set_string(
                ConnectorListFields::Connector1ObjectType,
                IddObjectType::ConnectorSplitter.name(),
            )
            .set_string(ConnectorListFields::Connector1Name, &splitter_name)
            .set_string(
                ConnectorListFields::Connector2ObjectType,
                IddObjectType::ConnectorMixer.name(),
            )
            .set_string(ConnectorListFields::Connector2Name, &mixer_name);
        session.push(connector_list);
        let splitter = session.push(named(IddObjectType::ConnectorSplitter, &splitter_name));
        let mixer = session.push(named(IddObjectType::ConnectorMixer, &mixer_name));

        // Inlet branch: side inlet node through the splitter.
        let inlet_name = format!("{prefix} Inlet Branch");
        self.list_branch(session, branch_list, &inlet_name);
        session
            .record_mut(splitter)
            .set_string(ConnectorSplitterFields::InletBranchName, &inlet_name);
        let inlet_pipe = format!("{prefix} Inlet Pipe");
        self.boundary_segment(
            session,
            &inlet_name,
            &self.topology.inlet_run(),
            PipeSpec {
                inlet: model.name(anchors.inlet_node).to_string(),
                outlet: format!("{inlet_pipe} Node"),
                name: inlet_pipe,
            },
        )?;

        let outlets = self.topology.splitter_outlets();
        let inlets = self.topology.mixer_inlets();
        if outlets.len() != inlets.len() {
            return Err(TranslateError::structure(
                self.loop_name,
                format!(
                    "{} splitter has {} outlets but mixer has {} inlets",
                    self.side().label(),
                    outlets.len(),
                    inlets.len()
                ),
            ));
        }

        for (i, run) in self.topology.branch_runs().iter().enumerate() {
            let branch_name = format!("{prefix} Branch {}", i + 1);
            let branch = self.parallel_branch(session, branch_list, splitter, mixer, &branch_name);
            if run.len() > 2 {
                populate_branch(self.cx, session, branch, run, self.plant_loop, self.side())?;
            } else {
                let pipe = PipeSpec::standalone(format!("{branch_name} Pipe"));
                push_pipe(session, branch, pipe);
            }
        }

        if self.side() == LoopSide::Demand && !outlets.is_empty() {
            let bypass_name = format!("{prefix} Bypass Branch");
            let bypass = self.parallel_branch(session, branch_list, splitter, mixer, &bypass_name);
            push_pipe(session, bypass, PipeSpec::standalone(format!("{prefix} Bypass Pipe")));
        }

        // Outlet branch: the mixer through the side outlet node.
        let outlet_name = format!("{prefix} Outlet Branch");
        self.list_branch(session, branch_list, &outlet_name);
        session
            .record_mut(mixer)
            .set_string(ConnectorMixerFields::OutletBranchName, &outlet_name);
        let outlet_pipe = format!("{prefix} Outlet Pipe");
        self.boundary_segment(
            session,
            &outlet_name,
            &self.topology.outlet_run(),
            PipeSpec {
                inlet: format!("{outlet_pipe} Node"),
                outlet: model.name(anchors.outlet_node).to_string(),
                name: outlet_pipe,
            },
        )?;

        let branches = session.record(branch_list).num_groups();
        tracing::debug!(side = %prefix, branches, "assembled loop side");

        Ok(SideLists {
            branch_list: format!("{prefix} Branches"),
            connector_list: connector_list_name,
        })
    }

    fn list_branch(&self, session: &mut TranslationSession, branch_list: RecordId, name: &str) {
        session
            .record_mut(branch_list)
            .push_group()
            .set_string(BranchListExtensibleFields::BranchName, name);
    }

    /// Emit a branch between the splitter and the mixer and list it on both.
    fn parallel_branch(
        &self,
        session: &mut TranslationSession,
        branch_list: RecordId,
        splitter: RecordId,
        mixer: RecordId,
        name: &str,
    ) -> RecordId {
        let branch = session.push(named(IddObjectType::Branch, name));
        session
            .record_mut(splitter)
            .push_group()
            .set_string(ConnectorSplitterExtensibleFields::OutletBranchName, name);
        session
            .record_mut(mixer)
            .push_group()
            .set_string(ConnectorMixerExtensibleFields::InletBranchName, name);
        self.list_branch(session, branch_list, name);
        branch
    }

    /// Inlet and outlet runs always hold at least the connector and the
    /// side's boundary node.
    fn boundary_segment(
        &self,
        session: &mut TranslationSession,
        branch_name: &str,
        run: &[ObjectId],
        pipe: PipeSpec,
    ) -> TranslateResult<()> {
        if run.len() < 2 {
            return Err(TranslateError::structure(
                self.loop_name,
                format!("'{branch_name}' spans {} objects, expected at least 2", run.len()),
            ));
        }
        let branch = session.push(named(IddObjectType::Branch, branch_name));
        if run.len() > 2 {
            populate_branch(self.cx, session, branch, run, self.plant_loop, self.side())
        } else {
            push_pipe(session, branch, pipe);
            Ok(())
        }
    }
}

/// Push a placeholder pipe and list it as the only component of `branch`.
fn push_pipe(session: &mut TranslationSession, branch: RecordId, pipe: PipeSpec) {
    let mut record = named(IddObjectType::PipeAdiabatic, &pipe.name);
    record
        .set_string(PipeAdiabaticFields::InletNodeName, &pipe.inlet)
        .set_string(PipeAdiabaticFields::OutletNodeName, &pipe.outlet);
    session.push(record);
    session
        .record_mut(branch)
        .push_group()
        .set_string(
            BranchExtensibleFields::ComponentObjectType,
            IddObjectType::PipeAdiabatic.name(),
        )
        .set_string(BranchExtensibleFields::ComponentName, pipe.name)
        .set_string(BranchExtensibleFields::ComponentInletNodeName, pipe.inlet)
        .set_string(BranchExtensibleFields::ComponentOutletNodeName, pipe.outlet);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::translate_object;
    use pl_core::{degc, delta_k};
    use pl_idf::idd::PlantEquipmentOperationSchemesFields;
    use pl_model::{
        Autosizable, ComponentKind, FluidType, Model, SetpointManager, SizingLoopType,
        TopologyIndex,
    };

    fn translate(m: &Model, l: ObjectId) -> (TranslationSession, RecordId) {
        let t = TopologyIndex::build(m).unwrap();
        let cx = TranslateContext::new(m, &t);
        let mut s = TranslationSession::new();
        let r = translate_object(cx, &mut s, l).unwrap().unwrap();
        (s, r)
    }

    fn empty_loop() -> (Model, ObjectId) {
        let mut m = Model::new();
        m.always_on_discrete_schedule();
        let l = m.add_plant_loop("Loop");
        (m, l)
    }

    fn branch<'a>(s: &'a TranslationSession, name: &str) -> &'a IdfObject {
        let id = s.find(IddObjectType::Branch, name).unwrap();
        s.record(id)
    }

    #[test]
    fn empty_loop_is_bridged_with_pipes() {
        let (m, l) = empty_loop();
        let (s, r) = translate(&m, l);

        let pipes: Vec<_> = s
            .records()
            .iter()
            .filter(|o| o.idd_type() == IddObjectType::PipeAdiabatic)
            .filter_map(|o| o.name())
            .collect();
        assert_eq!(
            pipes,
            vec![
                "Loop Supply Inlet Pipe",
                "Loop Supply Branch 1 Pipe",
                "Loop Supply Outlet Pipe",
                "Loop Demand Inlet Pipe",
                "Loop Demand Branch 1 Pipe",
                "Loop Demand Bypass Pipe",
                "Loop Demand Outlet Pipe",
            ]
        );

        let inlet = &branch(&s, "Loop Supply Inlet Branch").groups()[0];
        assert_eq!(
            inlet.get_string(BranchExtensibleFields::ComponentInletNodeName),
            Some("Loop Supply Inlet Node")
        );
        assert_eq!(
            inlet.get_string(BranchExtensibleFields::ComponentOutletNodeName),
            Some("Loop Supply Inlet Pipe Node")
        );

        let rec = s.record(r);
        assert_eq!(rec.get_string(PlantLoopFields::FluidType), Some("Water"));
        assert_eq!(
            rec.get_string(PlantLoopFields::PlantSideBranchListName),
            Some("Loop Supply Branches")
        );
        assert_eq!(
            rec.get_string(PlantLoopFields::DemandSideConnectorListName),
            Some("Loop Demand Connector List")
        );
        assert_eq!(rec.get_string(PlantLoopFields::PlantLoopVolume), Some("Autocalculate"));
        assert_eq!(
            rec.get_string(PlantLoopFields::PlantLoopDemandCalculationScheme),
            Some("SingleSetpoint")
        );
    }

    #[test]
    fn demand_branch_list_includes_bypass_before_outlet() {
        let (m, l) = empty_loop();
        let (s, _) = translate(&m, l);
        let list = s.record(s.find(IddObjectType::BranchList, "Loop Demand Branches").unwrap());
        let names: Vec<_> = list
            .groups()
            .iter()
            .filter_map(|g| g.get_string(BranchListExtensibleFields::BranchName))
            .collect();
        assert_eq!(
            names,
            vec![
                "Loop Demand Inlet Branch",
                "Loop Demand Branch 1",
                "Loop Demand Bypass Branch",
                "Loop Demand Outlet Branch",
            ]
        );
        let splitter = s.record(
            s.find(IddObjectType::ConnectorSplitter, "Loop Demand Splitter")
                .unwrap(),
        );
        assert_eq!(splitter.num_groups(), 2);
        assert_eq!(
            splitter.get_string(ConnectorSplitterFields::InletBranchName),
            Some("Loop Demand Inlet Branch")
        );
    }

    #[test]
    fn equipment_branches_pair_with_connectors() {
        let (mut m, l) = empty_loop();
        for name in ["B1", "B2", "B3"] {
            let b = m.add_component(
                name,
                ComponentKind::BoilerHotWater {
                    nominal_capacity_w: Autosizable::Autosize,
                    nominal_thermal_efficiency: 0.8,
                    design_water_flow_rate_m3ps: Autosizable::Autosize,
                    fuel_type: "NaturalGas".into(),
                },
            );
            m.add_supply_branch_for_component(l, b).unwrap();
        }
        let (s, _) = translate(&m, l);
        let splitter = s.record(
            s.find(IddObjectType::ConnectorSplitter, "Loop Supply Splitter")
                .unwrap(),
        );
        let mixer = s.record(s.find(IddObjectType::ConnectorMixer, "Loop Supply Mixer").unwrap());
        assert_eq!(splitter.num_groups(), 3);
        assert_eq!(mixer.num_groups(), 3);
        assert_eq!(
            branch(&s, "Loop Supply Branch 2").groups()[0]
                .get_string(BranchExtensibleFields::ComponentName),
            Some("B2")
        );
        assert!(s.find(IddObjectType::PipeAdiabatic, "Loop Supply Branch 1 Pipe").is_none());
    }

    #[test]
    fn glycol_loop_references_fluid_definition() {
        let (mut m, l) = empty_loop();
        {
            let pl = m.plant_loop_mut(l).unwrap();
            pl.fluid_type = FluidType::EthyleneGlycol;
            pl.glycol_concentration = 40;
            pl.sizing.loop_type = SizingLoopType::Cooling;
            pl.sizing.design_loop_exit_temperature = degc(7.0);
            pl.sizing.loop_design_temperature_difference = delta_k(5.0);
            pl.maximum_loop_temperature = Some(degc(60.0));
        }
        let (s, r) = translate(&m, l);
        let rec = s.record(r);
        assert_eq!(rec.get_string(PlantLoopFields::FluidType), Some("UserDefinedFluidType"));
        assert_eq!(
            rec.get_string(PlantLoopFields::UserDefinedFluidType),
            Some("EthyleneGlycol_40")
        );
        assert_eq!(rec.get_double(PlantLoopFields::MaximumLoopTemperature), Some(60.0));

        let sizing = s
            .records()
            .iter()
            .find(|o| o.idd_type() == IddObjectType::SizingPlant)
            .unwrap();
        assert_eq!(sizing.get_string(SizingPlantFields::LoopType), Some("Cooling"));
        assert_eq!(sizing.get_double(SizingPlantFields::DesignLoopExitTemperature), Some(7.0));
        assert_eq!(
            sizing.get_double(SizingPlantFields::LoopDesignTemperatureDifference),
            Some(5.0)
        );
    }

    #[test]
    fn dual_setpoint_manager_selects_deadband_scheme() {
        let (mut m, l) = empty_loop();
        let outlet = m.plant_loop(l).unwrap().supply.outlet_node;
        let hi = m.add_schedule_constant("High", 30.0, None);
        let lo = m.add_schedule_constant("Low", 20.0, None);
        m.add_setpoint_manager(
            "Dual",
            SetpointManager::ScheduledDualSetpoint {
                high_schedule: hi,
                low_schedule: lo,
                node: Some(outlet),
            },
        );
        let (s, r) = translate(&m, l);
        let rec = s.record(r);
        assert_eq!(
            rec.get_string(PlantLoopFields::PlantLoopDemandCalculationScheme),
            Some("DualSetpointDeadband")
        );
        let schemes = rec
            .get_string(PlantLoopFields::PlantEquipmentOperationSchemeName)
            .unwrap();
        assert_eq!(schemes, "Loop Operation Schemes");
        let list = s.record(
            s.find(IddObjectType::PlantEquipmentOperationSchemes, schemes)
                .unwrap(),
        );
        assert_eq!(
            list.get_string(PlantEquipmentOperationSchemesFields::Name),
            Some("Loop Operation Schemes")
        );
    }

    #[test]
    fn loop_is_registered_before_its_components() {
        let (m, l) = empty_loop();
        let (s, r) = translate(&m, l);
        assert_eq!(s.mapped(l), Some(Some(r)));
        assert_eq!(s.record(r).idd_type(), IddObjectType::PlantLoop);
        assert_eq!(r.index(), 0);
    }
}
