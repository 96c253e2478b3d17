//! End-to-end loop translation tests for pl-translate.

use pl_core::ObjectId;
use pl_idf::idd::{
    BranchExtensibleFields, ConnectorMixerExtensibleFields, ConnectorSplitterExtensibleFields,
    FluidPropertiesNameFields, PlantLoopFields,
};
use pl_idf::{ExtensibleGroup, IddObjectType, IdfObject, Workspace};
use pl_model::*;
use pl_translate::{ForwardTranslator, TranslateError};

fn boiler(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::BoilerHotWater {
            nominal_capacity_w: Autosizable::Autosize,
            nominal_thermal_efficiency: 0.8,
            design_water_flow_rate_m3ps: Autosizable::Autosize,
            fuel_type: "NaturalGas".into(),
        },
    )
}

fn pump(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::PumpVariableSpeed {
            rated_flow_rate_m3ps: Autosizable::Autosize,
            rated_pump_head_pa: 179_352.0,
        },
    )
}

fn chiller(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::ChillerElectricEir {
            reference_capacity_w: Autosizable::Autosize,
            reference_cop: 5.5,
            reference_chilled_water_flow_rate_m3ps: Autosizable::Autosize,
            reference_condenser_fluid_flow_rate_m3ps: Autosizable::Autosize,
        },
    )
}

fn heating_coil(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::CoilHeatingWater {
            u_factor_times_area_w_per_k: Autosizable::Autosize,
            maximum_water_flow_rate_m3ps: Autosizable::Autosize,
        },
    )
}

fn translate(model: &Model) -> Workspace {
    ForwardTranslator::default().translate_model(model).unwrap()
}

fn named<'a>(ws: &'a Workspace, idd_type: IddObjectType, name: &str) -> &'a IdfObject {
    ws.object_by_type_and_name(idd_type, name)
        .unwrap_or_else(|| panic!("missing {} '{name}'", idd_type.name()))
}

fn component_names(branch: &IdfObject) -> Vec<&str> {
    branch
        .groups()
        .iter()
        .filter_map(|g| g.get_string(BranchExtensibleFields::ComponentName))
        .collect()
}

fn outlet_of(model: &Model, component: ObjectId, role: PassageRole) -> ObjectId {
    model
        .component(component)
        .unwrap()
        .passage(role)
        .unwrap()
        .outlet
        .unwrap()
}

#[test]
fn hot_water_loop_end_to_end() {
    let mut model = Model::new();
    let hw = model.add_plant_loop("HW");
    let p = pump(&mut model, "HW Pump");
    let inlet = model.plant_loop(hw).unwrap().supply.inlet_node;
    model.add_to_node(p, PassageRole::Main, inlet).unwrap();
    let b1 = boiler(&mut model, "Boiler 1");
    let b2 = boiler(&mut model, "Boiler 2");
    model.add_supply_branch_for_component(hw, b1).unwrap();
    model.add_supply_branch_for_component(hw, b2).unwrap();
    let coil = heating_coil(&mut model, "AHU Heating Coil");
    model.add_demand_branch_for_component(hw, coil, false).unwrap();

    let ws = translate(&model);

    let inlet_branch = named(&ws, IddObjectType::Branch, "HW Supply Inlet Branch");
    assert_eq!(component_names(inlet_branch), vec!["HW Pump"]);
    assert_eq!(
        inlet_branch.groups()[0].get_string(BranchExtensibleFields::ComponentInletNodeName),
        Some("HW Supply Inlet Node")
    );
    assert!(ws
        .object_by_type_and_name(IddObjectType::PipeAdiabatic, "HW Supply Inlet Pipe")
        .is_none());

    assert_eq!(
        component_names(named(&ws, IddObjectType::Branch, "HW Supply Branch 1")),
        vec!["Boiler 1"]
    );
    assert_eq!(
        component_names(named(&ws, IddObjectType::Branch, "HW Supply Branch 2")),
        vec!["Boiler 2"]
    );
    let demand = named(&ws, IddObjectType::Branch, "HW Demand Branch 1");
    assert_eq!(
        demand.groups()[0].get_string(BranchExtensibleFields::ComponentObjectType),
        Some("Coil:Heating:Water")
    );
    assert_eq!(
        demand.groups()[0].get_string(BranchExtensibleFields::ComponentOutletNodeName),
        Some(model.name(outlet_of(&model, coil, PassageRole::Water)))
    );

    let plant_loop = named(&ws, IddObjectType::PlantLoop, "HW");
    assert_eq!(
        plant_loop.get_string(PlantLoopFields::LoopTemperatureSetpointNodeName),
        Some("HW Supply Outlet Node")
    );
    assert_eq!(ws.objects_of_type(IddObjectType::BoilerHotWater).len(), 2);
}

#[test]
fn splitter_and_mixer_list_the_same_branches() {
    let mut model = Model::new();
    let hw = model.add_plant_loop("HW");
    for i in 0..4 {
        let b = boiler(&mut model, &format!("Boiler {i}"));
        model.add_supply_branch_for_component(hw, b).unwrap();
    }
    let ws = translate(&model);

    let splitter = named(&ws, IddObjectType::ConnectorSplitter, "HW Supply Splitter");
    let mixer = named(&ws, IddObjectType::ConnectorMixer, "HW Supply Mixer");
    let outs: Vec<_> = splitter
        .groups()
        .iter()
        .filter_map(|g| g.get_string(ConnectorSplitterExtensibleFields::OutletBranchName))
        .collect();
    let ins: Vec<_> = mixer
        .groups()
        .iter()
        .filter_map(|g| g.get_string(ConnectorMixerExtensibleFields::InletBranchName))
        .collect();
    assert_eq!(outs.len(), 4);
    assert_eq!(outs, ins);
}

#[test]
fn chiller_on_two_loops_is_emitted_once() {
    let mut model = Model::new();
    let chw = model.add_plant_loop("CHW");
    let cw = model.add_plant_loop("CW");
    let ch = chiller(&mut model, "Chiller");
    model.add_supply_branch_for_component(chw, ch).unwrap();
    model.add_demand_branch_for_component(cw, ch, false).unwrap();

    let ws = translate(&model);
    assert_eq!(ws.objects_of_type(IddObjectType::ChillerElectricEir).len(), 1);

    let supply = named(&ws, IddObjectType::Branch, "CHW Supply Branch 1");
    let demand = named(&ws, IddObjectType::Branch, "CW Demand Branch 1");
    assert_eq!(component_names(supply), vec!["Chiller"]);
    assert_eq!(component_names(demand), vec!["Chiller"]);
    assert_eq!(
        supply.groups()[0].get_string(BranchExtensibleFields::ComponentOutletNodeName),
        Some(model.name(outlet_of(&model, ch, PassageRole::Supply)))
    );
    assert_eq!(
        demand.groups()[0].get_string(BranchExtensibleFields::ComponentOutletNodeName),
        Some(model.name(outlet_of(&model, ch, PassageRole::Demand)))
    );
}

#[test]
fn heat_recovery_passage_goes_on_the_tertiary_loop() {
    let mut model = Model::new();
    let chw = model.add_plant_loop("CHW");
    let hr = model.add_plant_loop("HR");
    let ch = chiller(&mut model, "Chiller");
    model.add_supply_branch_for_component(chw, ch).unwrap();
    model.add_demand_branch_for_component(hr, ch, true).unwrap();

    let ws = translate(&model);
    let demand = named(&ws, IddObjectType::Branch, "HR Demand Branch 1");
    assert_eq!(
        demand.groups()[0].get_string(BranchExtensibleFields::ComponentInletNodeName),
        Some(model.name(
            model
                .component(ch)
                .unwrap()
                .passage(PassageRole::Tertiary)
                .unwrap()
                .inlet
                .unwrap()
        ))
    );
}

#[test]
fn shared_glycol_mix_is_defined_once() {
    let mut model = Model::new();
    for name in ["Loop A", "Loop B"] {
        let l = model.add_plant_loop(name);
        let pl = model.plant_loop_mut(l).unwrap();
        pl.fluid_type = FluidType::PropyleneGlycol;
        pl.glycol_concentration = 30;
    }
    let ws = translate(&model);

    let fluids = ws.objects_of_type(IddObjectType::FluidPropertiesName);
    assert_eq!(fluids.len(), 1);
    assert_eq!(
        fluids[0].get_string(FluidPropertiesNameFields::FluidName),
        Some("PropyleneGlycol_30")
    );
    assert_eq!(
        ws.objects_of_type(IddObjectType::FluidPropertiesGlycolConcentration)
            .len(),
        1
    );
    for name in ["Loop A", "Loop B"] {
        assert_eq!(
            named(&ws, IddObjectType::PlantLoop, name)
                .get_string(PlantLoopFields::UserDefinedFluidType),
            Some("PropyleneGlycol_30")
        );
    }
}

#[test]
fn beam_coil_is_listed_under_its_terminal() {
    let mut model = Model::new();
    let chw = model.add_plant_loop("CHW");
    let beam = model.add_component(
        "Office Beam",
        ComponentKind::AirTerminalCooledBeam {
            cooled_beam_type: "Active".into(),
            supply_air_volumetric_flow_rate_m3ps: Autosizable::Autosize,
        },
    );
    let coil = model.add_component(
        "Office Beam Coil",
        ComponentKind::CoilCoolingCooledBeam {
            coil_surface_area_per_coil_length_m2_per_m: 5.422,
        },
    );
    model.set_container(coil, beam).unwrap();
    model.add_demand_branch_for_component(chw, coil, false).unwrap();

    let ws = translate(&model);
    let branch = named(&ws, IddObjectType::Branch, "CHW Demand Branch 1");
    let g = &branch.groups()[0];
    assert_eq!(
        g.get_string(BranchExtensibleFields::ComponentObjectType),
        Some("AirTerminal:SingleDuct:ConstantVolume:CooledBeam")
    );
    assert_eq!(g.get_string(BranchExtensibleFields::ComponentName), Some("Office Beam"));
    assert_eq!(
        g.get_string(BranchExtensibleFields::ComponentInletNodeName),
        Some("CHW Demand Connector Node")
    );
    assert_eq!(ws.objects_of_type(IddObjectType::ZoneHvacAirDistributionUnit).len(), 1);
    assert_eq!(ws.objects_of_type(IddObjectType::AirTerminalCooledBeam).len(), 1);
}

#[test]
fn side_without_splitter_aborts_translation() {
    let mut model = Model::new();
    let hw = model.add_plant_loop("HW");
    let b = boiler(&mut model, "Boiler");
    model.add_supply_branch_for_component(hw, b).unwrap();
    let wrong = model.plant_loop(hw).unwrap().demand.mixer;
    model.plant_loop_mut(hw).unwrap().supply.splitter = wrong;

    let err = ForwardTranslator::default().translate_model(&model).unwrap_err();
    assert!(matches!(err, TranslateError::Structure { ref loop_name, .. } if loop_name == "HW"));
}

fn central_heat_pump(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::CentralHeatPumpSystem {
            control_method: "SmartMixing".into(),
            ancillary_power_w: 460.0,
        },
    )
}

fn node_name(model: &Model, component: ObjectId, role: PassageRole, inlet: bool) -> &str {
    let passage = model.component(component).unwrap().passage(role).unwrap();
    let node = if inlet { passage.inlet } else { passage.outlet };
    model.name(node.unwrap())
}

/// The branch group listing `name`, searched across every branch.
fn group_named<'a>(ws: &'a Workspace, name: &str) -> &'a ExtensibleGroup {
    ws.objects_of_type(IddObjectType::Branch)
        .into_iter()
        .flat_map(|b| b.groups())
        .find(|g| g.get_string(BranchExtensibleFields::ComponentName) == Some(name))
        .unwrap_or_else(|| panic!("no branch lists '{name}'"))
}

#[test]
fn central_heat_pump_uses_one_passage_per_loop() {
    let mut model = Model::new();
    let chw = model.add_plant_loop("CHW");
    let hw = model.add_plant_loop("HW");
    let src = model.add_plant_loop("SRC");
    let chp = central_heat_pump(&mut model, "CHP");
    model.add_supply_branch_for_component(chw, chp).unwrap();
    model
        .add_branch_for_passage(hw, LoopSide::Supply, chp, PassageRole::Tertiary)
        .unwrap();
    model.add_demand_branch_for_component(src, chp, false).unwrap();

    let ws = translate(&model);
    assert_eq!(ws.objects_of_type(IddObjectType::CentralHeatPumpSystem).len(), 1);

    for (branch, role) in [
        ("CHW Supply Branch 1", PassageRole::Supply),
        ("HW Supply Branch 1", PassageRole::Tertiary),
        ("SRC Demand Branch 1", PassageRole::Demand),
    ] {
        let branch = named(&ws, IddObjectType::Branch, branch);
        assert_eq!(component_names(branch), vec!["CHP"]);
        let g = &branch.groups()[0];
        assert_eq!(
            g.get_string(BranchExtensibleFields::ComponentObjectType),
            Some("CentralHeatPumpSystem")
        );
        assert_eq!(
            g.get_string(BranchExtensibleFields::ComponentInletNodeName),
            Some(node_name(&model, chp, role, true))
        );
        assert_eq!(
            g.get_string(BranchExtensibleFields::ComponentOutletNodeName),
            Some(node_name(&model, chp, role, false))
        );
    }
}

#[test]
fn micro_turbine_heat_recovery_is_listed_as_its_generator() {
    let mut model = Model::new();
    let hw = model.add_plant_loop("HW");
    let mt = model.add_component(
        "MT",
        ComponentKind::GeneratorMicroTurbine {
            reference_electrical_power_output_w: 65_000.0,
        },
    );
    let hr = model.add_component(
        "MT HR",
        ComponentKind::GeneratorMicroTurbineHeatRecovery {
            reference_heat_recovery_water_flow_rate_m3ps: 0.00252,
            maximum_heat_recovery_water_flow_rate_m3ps: None,
        },
    );
    model.set_container(hr, mt).unwrap();
    model.add_supply_branch_for_component(hw, hr).unwrap();

    let ws = translate(&model);
    let branch = named(&ws, IddObjectType::Branch, "HW Supply Branch 1");
    let g = &branch.groups()[0];
    assert_eq!(
        g.get_string(BranchExtensibleFields::ComponentObjectType),
        Some("Generator:MicroTurbine")
    );
    assert_eq!(g.get_string(BranchExtensibleFields::ComponentName), Some("MT"));
    assert_eq!(
        g.get_string(BranchExtensibleFields::ComponentOutletNodeName),
        Some(model.name(outlet_of(&model, hr, PassageRole::Main)))
    );
    assert_eq!(ws.objects_of_type(IddObjectType::GeneratorMicroTurbine).len(), 1);
}

#[test]
fn heat_pump_water_heater_tank_is_listed_as_the_heat_pump() {
    let mut model = Model::new();
    let shw = model.add_plant_loop("SHW");
    let hpwh = model.add_component(
        "HPWH",
        ComponentKind::WaterHeaterHeatPump {
            condenser_water_flow_rate_m3ps: Autosizable::Autosize,
        },
    );
    let tank = model.add_component(
        "HPWH Tank",
        ComponentKind::WaterHeaterMixed {
            tank_volume_m3: Autosizable::Value(0.3028),
            heater_maximum_capacity_w: Autosizable::Value(0.0),
            use_side_design_flow_rate_m3ps: Autosizable::Autosize,
            source_side_design_flow_rate_m3ps: Autosizable::Autosize,
        },
    );
    model.set_container(tank, hpwh).unwrap();
    model.add_supply_branch_for_component(shw, tank).unwrap();

    let ws = translate(&model);
    let g = &named(&ws, IddObjectType::Branch, "SHW Supply Branch 1").groups()[0];
    assert_eq!(
        g.get_string(BranchExtensibleFields::ComponentObjectType),
        Some("WaterHeater:HeatPump:PumpedCondenser")
    );
    assert_eq!(g.get_string(BranchExtensibleFields::ComponentName), Some("HPWH"));
    assert_eq!(
        g.get_string(BranchExtensibleFields::ComponentOutletNodeName),
        Some(model.name(outlet_of(&model, tank, PassageRole::Supply)))
    );
    // The tank record is still written for the heat pump to name.
    assert_eq!(ws.objects_of_type(IddObjectType::WaterHeaterMixed).len(), 1);
}

#[test]
fn zone_coils_are_listed_under_their_zone_equipment() {
    let mut model = Model::new();
    let hw = model.add_plant_loop("HW");
    let cases = [
        (
            "Baseboard",
            ComponentKind::ZoneHvacBaseboardConvectiveWater,
            ComponentKind::CoilHeatingWaterBaseboard {
                u_factor_times_area_w_per_k: Autosizable::Autosize,
                maximum_water_flow_rate_m3ps: Autosizable::Autosize,
            },
            "ZoneHVAC:Baseboard:Convective:Water",
        ),
        (
            "Radiant Baseboard",
            ComponentKind::ZoneHvacBaseboardRadiantConvectiveWater {
                fraction_radiant: 0.3,
            },
            ComponentKind::CoilHeatingWaterBaseboardRadiant {
                heating_design_capacity_w: Autosizable::Autosize,
                maximum_water_flow_rate_m3ps: Autosizable::Autosize,
            },
            "ZoneHVAC:Baseboard:RadiantConvective:Water",
        ),
        (
            "Slab VAV",
            ComponentKind::ZoneHvacLowTempRadiantVarFlow,
            ComponentKind::CoilHeatingLowTempRadiantVarFlow {
                maximum_hot_water_flow_m3ps: Autosizable::Autosize,
            },
            "ZoneHVAC:LowTemperatureRadiant:VariableFlow",
        ),
        (
            "Slab CV",
            ComponentKind::ZoneHvacLowTempRadiantConstFlow {
                rated_flow_rate_m3ps: Autosizable::Autosize,
            },
            ComponentKind::CoilHeatingLowTempRadiantConstFlow,
            "ZoneHVAC:LowTemperatureRadiant:ConstantFlow",
        ),
    ];
    let mut coils = Vec::new();
    for (name, container, coil_kind, _) in cases.clone() {
        let unit = model.add_component(name, container);
        let coil = model.add_component(&format!("{name} Coil"), coil_kind);
        model.set_container(coil, unit).unwrap();
        model.add_demand_branch_for_component(hw, coil, false).unwrap();
        coils.push(coil);
    }

    let ws = translate(&model);
    for ((name, _, _, idd_type), coil) in cases.iter().zip(coils) {
        let g = group_named(&ws, name);
        assert_eq!(g.get_string(BranchExtensibleFields::ComponentObjectType), Some(*idd_type));
        assert_eq!(
            g.get_string(BranchExtensibleFields::ComponentInletNodeName),
            Some(node_name(&model, coil, PassageRole::Main, true))
        );
        assert_eq!(
            g.get_string(BranchExtensibleFields::ComponentOutletNodeName),
            Some(node_name(&model, coil, PassageRole::Main, false))
        );
    }
}
