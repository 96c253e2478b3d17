//! Default operation scheme scenarios for pl-translate.

use pl_core::ObjectId;
use pl_idf::idd::{
    PlantEquipmentListExtensibleFields, PlantEquipmentOperationSchemesExtensibleFields,
    PlantEquipmentOperationUncontrolledFields,
};
use pl_idf::{IddObjectType, IdfObject, Workspace};
use pl_model::*;
use pl_translate::ForwardTranslator;

fn boiler(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::BoilerHotWater {
            nominal_capacity_w: Autosizable::Value(50_000.0),
            nominal_thermal_efficiency: 0.8,
            design_water_flow_rate_m3ps: Autosizable::Autosize,
            fuel_type: "NaturalGas".into(),
        },
    )
}

fn water_heater(model: &mut Model, name: &str, capacity_w: f64) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::WaterHeaterMixed {
            tank_volume_m3: Autosizable::Value(0.3785),
            heater_maximum_capacity_w: Autosizable::Value(capacity_w),
            use_side_design_flow_rate_m3ps: Autosizable::Autosize,
            source_side_design_flow_rate_m3ps: Autosizable::Autosize,
        },
    )
}

fn heat_exchanger(model: &mut Model, name: &str, control_type: HxControlType) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::HeatExchangerFluidToFluid {
            control_type,
            loop_supply_side_design_flow_rate_m3ps: Autosizable::Autosize,
            loop_demand_side_design_flow_rate_m3ps: Autosizable::Autosize,
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

fn translate(model: &Model) -> Workspace {
    ForwardTranslator::default().translate_model(model).unwrap()
}

fn named<'a>(ws: &'a Workspace, idd_type: IddObjectType, name: &str) -> &'a IdfObject {
    ws.object_by_type_and_name(idd_type, name)
        .unwrap_or_else(|| panic!("missing {} '{name}'", idd_type.name()))
}

fn equipment(list: &IdfObject) -> Vec<(&str, &str)> {
    list.groups()
        .iter()
        .filter_map(|g| {
            Some((
                g.get_string(PlantEquipmentListExtensibleFields::EquipmentObjectType)?,
                g.get_string(PlantEquipmentListExtensibleFields::EquipmentName)?,
            ))
        })
        .collect()
}

fn scheme_types(ws: &Workspace, loop_name: &str) -> Vec<String> {
    named(
        ws,
        IddObjectType::PlantEquipmentOperationSchemes,
        &format!("{loop_name} Operation Schemes"),
    )
    .groups()
    .iter()
    .filter_map(|g| {
        g.get_string(PlantEquipmentOperationSchemesExtensibleFields::ControlSchemeObjectType)
            .map(str::to_string)
    })
    .collect()
}

#[test]
fn use_loop_heats_with_boiler_and_water_heater_in_order() {
    let mut model = Model::new();
    let use_loop = model.add_plant_loop("Use Loop");
    let b = boiler(&mut model, "Boiler");
    let wh = water_heater(&mut model, "Water Heater", 25_000.0);
    model.add_supply_branch_for_component(use_loop, b).unwrap();
    model.add_supply_branch_for_component(use_loop, wh).unwrap();

    let ws = translate(&model);

    assert_eq!(
        scheme_types(&ws, "Use Loop"),
        vec!["PlantEquipmentOperation:HeatingLoad"]
    );
    assert_eq!(
        ws.objects_of_type(IddObjectType::PlantEquipmentOperationHeatingLoad)
            .len(),
        1
    );
    let list = named(&ws, IddObjectType::PlantEquipmentList, "Use Loop Heating Equipment List");
    assert_eq!(
        equipment(list),
        vec![
            ("Boiler:HotWater", "Boiler"),
            ("WaterHeater:Mixed", "Water Heater"),
        ]
    );
}

#[test]
fn uncontrolled_exchanger_follows_a_mixed_source_loop() {
    let mut model = Model::new();
    let source = model.add_plant_loop("Source Loop");
    let b = boiler(&mut model, "Boiler");
    let ch = chiller(&mut model, "Chiller");
    model.add_supply_branch_for_component(source, b).unwrap();
    model.add_supply_branch_for_component(source, ch).unwrap();

    let secondary = model.add_plant_loop("Secondary Loop");
    let hx = heat_exchanger(&mut model, "HX", HxControlType::UncontrolledOn);
    model.add_supply_branch_for_component(secondary, hx).unwrap();
    model.add_demand_branch_for_component(source, hx, false).unwrap();

    let ws = translate(&model);

    assert_eq!(
        scheme_types(&ws, "Secondary Loop"),
        vec!["PlantEquipmentOperation:Uncontrolled"]
    );
    let scheme = named(
        &ws,
        IddObjectType::PlantEquipmentOperationUncontrolled,
        "Secondary Loop Uncontrolled Operation Scheme",
    );
    let list_name = scheme
        .get_string(PlantEquipmentOperationUncontrolledFields::EquipmentListName)
        .unwrap();
    let list = named(&ws, IddObjectType::PlantEquipmentList, list_name);
    assert_eq!(equipment(list), vec![("HeatExchanger:FluidToFluid", "HX")]);

    // The source loop itself still gets one heating and one cooling scheme.
    assert_eq!(
        scheme_types(&ws, "Source Loop"),
        vec![
            "PlantEquipmentOperation:HeatingLoad",
            "PlantEquipmentOperation:CoolingLoad",
        ]
    );
}

#[test]
fn heating_setpoint_exchanger_is_heating_equipment() {
    let mut model = Model::new();
    let source = model.add_plant_loop("Source Loop");
    let ch = chiller(&mut model, "Chiller");
    model.add_supply_branch_for_component(source, ch).unwrap();

    let secondary = model.add_plant_loop("Secondary Loop");
    let hx = heat_exchanger(&mut model, "HX", HxControlType::HeatingSetpointModulated);
    model.add_supply_branch_for_component(secondary, hx).unwrap();
    model.add_demand_branch_for_component(source, hx, false).unwrap();

    let ws = translate(&model);
    assert_eq!(
        scheme_types(&ws, "Secondary Loop"),
        vec!["PlantEquipmentOperation:HeatingLoad"]
    );
    let list = named(
        &ws,
        IddObjectType::PlantEquipmentList,
        "Secondary Loop Heating Equipment List",
    );
    assert_eq!(equipment(list), vec![("HeatExchanger:FluidToFluid", "HX")]);
}

#[test]
fn buffer_tank_without_source_runs_under_no_scheme() {
    let mut model = Model::new();
    let l = model.add_plant_loop("Storage Loop");
    let tank = water_heater(&mut model, "Buffer Tank", 0.0);
    model.add_supply_branch_for_component(l, tank).unwrap();

    let ws = translate(&model);
    assert!(scheme_types(&ws, "Storage Loop").is_empty());
    assert!(ws
        .objects_of_type(IddObjectType::PlantEquipmentList)
        .is_empty());
    // The tank is still on its branch.
    assert_eq!(ws.objects_of_type(IddObjectType::WaterHeaterMixed).len(), 1);
}

#[test]
fn buffer_tank_inherits_its_source_loop() {
    let mut model = Model::new();
    let source = model.add_plant_loop("Boiler Loop");
    let b = boiler(&mut model, "Boiler");
    model.add_supply_branch_for_component(source, b).unwrap();

    let use_loop = model.add_plant_loop("Use Loop");
    let tank = water_heater(&mut model, "Indirect Tank", 0.0);
    model.add_supply_branch_for_component(use_loop, tank).unwrap();
    model.add_demand_branch_for_component(source, tank, false).unwrap();

    let ws = translate(&model);
    let list = named(&ws, IddObjectType::PlantEquipmentList, "Use Loop Heating Equipment List");
    assert_eq!(equipment(list), vec![("WaterHeater:Mixed", "Indirect Tank")]);
}

#[test]
fn heat_pump_water_heater_stands_in_for_its_tank() {
    let mut model = Model::new();
    let l = model.add_plant_loop("SHW Loop");
    let hpwh = model.add_component(
        "HPWH",
        ComponentKind::WaterHeaterHeatPump {
            condenser_water_flow_rate_m3ps: Autosizable::Autosize,
        },
    );
    let tank = water_heater(&mut model, "HPWH Tank", 0.0);
    model.set_container(tank, hpwh).unwrap();
    model.add_supply_branch_for_component(l, tank).unwrap();

    let ws = translate(&model);
    let list = named(&ws, IddObjectType::PlantEquipmentList, "SHW Loop Heating Equipment List");
    assert_eq!(
        equipment(list),
        vec![("WaterHeater:HeatPump:PumpedCondenser", "HPWH")]
    );
}

#[test]
fn central_heat_pump_serves_cooling_and_heating_loops() {
    let mut model = Model::new();
    let chw = model.add_plant_loop("CHW");
    let hw = model.add_plant_loop("HW");
    let src = model.add_plant_loop("SRC");
    let chp = model.add_component(
        "CHP",
        ComponentKind::CentralHeatPumpSystem {
            control_method: "SmartMixing".into(),
            ancillary_power_w: 460.0,
        },
    );
    model.add_supply_branch_for_component(chw, chp).unwrap();
    model
        .add_branch_for_passage(hw, LoopSide::Supply, chp, PassageRole::Tertiary)
        .unwrap();
    model.add_demand_branch_for_component(src, chp, false).unwrap();

    let ws = translate(&model);

    assert_eq!(scheme_types(&ws, "CHW"), vec!["PlantEquipmentOperation:CoolingLoad"]);
    assert_eq!(scheme_types(&ws, "HW"), vec!["PlantEquipmentOperation:HeatingLoad"]);
    let cooling = named(&ws, IddObjectType::PlantEquipmentList, "CHW Cooling Equipment List");
    let heating = named(&ws, IddObjectType::PlantEquipmentList, "HW Heating Equipment List");
    assert_eq!(equipment(cooling), vec![("CentralHeatPumpSystem", "CHP")]);
    assert_eq!(equipment(heating), vec![("CentralHeatPumpSystem", "CHP")]);
    assert!(ws
        .object_by_type_and_name(IddObjectType::PlantEquipmentList, "HW Cooling Equipment List")
        .is_none());
}
