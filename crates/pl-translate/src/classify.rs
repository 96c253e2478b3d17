//! Heating/cooling classification of supply equipment, used to build the
//! default operation schemes.

use std::collections::HashSet;

use pl_core::ObjectId;
use pl_model::{Autosizable, ComponentKind as K, HxControlType, Model, TopologyIndex};

use crate::context::TranslateContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Heating,
    Cooling,
    Both,
    None,
}

impl ComponentType {
    /// Operation type written into a component setpoint scheme.
    pub fn operation_type(self) -> &'static str {
        match self {
            ComponentType::Heating => "Heating",
            ComponentType::Cooling => "Cooling",
            ComponentType::Both | ComponentType::None => "Dual",
        }
    }
}

/// Cycle guard for loop-type queries that follow water heaters and heat
/// exchangers onto their source loops.
#[derive(Debug, Default)]
pub struct Visiting(HashSet<ObjectId>);

pub fn component_type(cx: TranslateContext<'_>, component: ObjectId) -> ComponentType {
    component_type_in(cx, component, &mut Visiting::default())
}

pub fn plant_loop_type(cx: TranslateContext<'_>, plant_loop: ObjectId) -> ComponentType {
    plant_loop_type_in(cx, plant_loop, &mut Visiting::default())
}

fn component_type_in(
    cx: TranslateContext<'_>,
    component: ObjectId,
    visiting: &mut Visiting,
) -> ComponentType {
    let Some(c) = cx.model.component(component) else {
        return ComponentType::None;
    };
    let source_loop_type = |visiting: &mut Visiting| {
        cx.topology
            .secondary_plant_loop(cx.model, component)
            .map(|l| plant_loop_type_in(cx, l, visiting))
    };

    match &c.kind {
        K::BoilerHotWater { .. }
        | K::DistrictHeating { .. }
        | K::SolarCollectorFlatPlateWater { .. }
        | K::HeatPumpWaterToWaterEquationFitHeating { .. }
        | K::GeneratorMicroTurbineHeatRecovery { .. } => ComponentType::Heating,
        K::ChillerElectricEir { .. }
        | K::ChillerElectricAshrae205 { .. }
        | K::DistrictCooling { .. }
        | K::CoolingTowerSingleSpeed { .. }
        | K::HeatPumpWaterToWaterEquationFitCooling { .. } => ComponentType::Cooling,
        K::GroundHeatExchangerVertical { .. } | K::TemperatureSource { .. } => ComponentType::Both,
        K::WaterHeaterMixed {
            heater_maximum_capacity_w,
            ..
        } => {
            if is_zero(*heater_maximum_capacity_w) {
                buffer_tank_type(c.container.is_some(), source_loop_type(visiting))
            } else {
                ComponentType::Heating
            }
        }
        K::WaterHeaterStratified {
            heater1_capacity_w,
            heater2_capacity_w,
            ..
        } => {
            if *heater2_capacity_w == 0.0 && is_zero(*heater1_capacity_w) {
                buffer_tank_type(c.container.is_some(), source_loop_type(visiting))
            } else {
                ComponentType::Heating
            }
        }
        K::HeatExchangerFluidToFluid { control_type, .. } => match control_type {
            HxControlType::HeatingSetpointModulated | HxControlType::HeatingSetpointOnOff => {
                ComponentType::Heating
            }
            HxControlType::CoolingSetpointModulated
            | HxControlType::CoolingSetpointOnOff
            | HxControlType::CoolingDifferentialOnOff
            | HxControlType::CoolingSetpointOnOffWithComponentOverride => ComponentType::Cooling,
            HxControlType::DualDeadbandSetpointModulated
            | HxControlType::DualDeadbandSetpointOnOff => ComponentType::Both,
            HxControlType::UncontrolledOn => {
                source_loop_type(visiting).unwrap_or(ComponentType::None)
            }
            HxControlType::OperationSchemeModulated
            | HxControlType::OperationSchemeOnOff
            | HxControlType::TrackComponentOnOff => ComponentType::Both,
        },
        // Served per loop: cooling and heating lists check loop identity.
        K::CentralHeatPumpSystem { .. } => ComponentType::None,
        _ => ComponentType::None,
    }
}

fn is_zero(capacity: Autosizable) -> bool {
    capacity == Autosizable::Value(0.0)
}

/// A tank without its own heater heats only what its source loop heats.
fn buffer_tank_type(in_heat_pump: bool, source: Option<ComponentType>) -> ComponentType {
    match source {
        Some(t) => t,
        None if in_heat_pump => ComponentType::Heating,
        None => ComponentType::None,
    }
}

fn plant_loop_type_in(
    cx: TranslateContext<'_>,
    plant_loop: ObjectId,
    visiting: &mut Visiting,
) -> ComponentType {
    if !visiting.0.insert(plant_loop) {
        return ComponentType::None;
    }
    let mut heating = false;
    let mut cooling = false;
    for c in supply_components(cx.model, cx.topology, plant_loop) {
        match component_type_in(cx, c, visiting) {
            ComponentType::Heating => heating = true,
            ComponentType::Cooling => cooling = true,
            ComponentType::Both => {
                heating = true;
                cooling = true;
            }
            ComponentType::None => {}
        }
    }
    visiting.0.remove(&plant_loop);

    match (heating, cooling) {
        (true, false) => ComponentType::Heating,
        (false, true) => ComponentType::Cooling,
        (false, false) => ComponentType::None,
        (true, true) => ComponentType::Both,
    }
}

/// Components on the supply side of a loop, in flow order.
pub fn supply_components(
    model: &Model,
    topology: &TopologyIndex,
    plant_loop: ObjectId,
) -> Vec<ObjectId> {
    topology
        .get(plant_loop)
        .map(|t| t.supply.all())
        .unwrap_or_default()
        .into_iter()
        .filter(|id| model.component(*id).is_some())
        .collect()
}

/// Design flow a component requests, when it has a hard-sized one.
pub fn flow_rate(model: &Model, component: ObjectId) -> Option<f64> {
    let c = model.component(component)?;
    match &c.kind {
        K::BoilerHotWater {
            design_water_flow_rate_m3ps: f,
            ..
        }
        | K::WaterHeaterMixed {
            use_side_design_flow_rate_m3ps: f,
            ..
        }
        | K::WaterHeaterStratified {
            use_side_design_flow_rate_m3ps: f,
            ..
        }
        | K::ChillerElectricEir {
            reference_chilled_water_flow_rate_m3ps: f,
            ..
        }
        | K::ChillerElectricAshrae205 {
            chilled_water_maximum_requested_flow_rate_m3ps: f,
            ..
        }
        | K::CoolingTowerSingleSpeed {
            design_water_flow_rate_m3ps: f,
            ..
        }
        | K::HeatExchangerFluidToFluid {
            loop_supply_side_design_flow_rate_m3ps: f,
            ..
        }
        | K::TemperatureSource {
            design_volume_flow_rate_m3ps: f,
            ..
        }
        | K::HeatPumpWaterToWaterEquationFitHeating {
            reference_load_side_flow_rate_m3ps: f,
            ..
        }
        | K::HeatPumpWaterToWaterEquationFitCooling {
            reference_load_side_flow_rate_m3ps: f,
            ..
        } => f.value(),
        K::GroundHeatExchangerVertical {
            design_flow_rate_m3ps,
            ..
        } => Some(*design_flow_rate_m3ps),
        K::SolarCollectorFlatPlateWater {
            maximum_flow_rate_m3ps,
        } => *maximum_flow_rate_m3ps,
        K::GeneratorMicroTurbineHeatRecovery {
            maximum_heat_recovery_water_flow_rate_m3ps,
            ..
        } => *maximum_heat_recovery_water_flow_rate_m3ps,
        _ => None,
    }
}

/// The object that stands for `component` in operation scheme lists.
///
/// A tank inside a heat-pump water heater is controlled through the heat
/// pump, and heat recovery through its generator.
pub fn operation_scheme_component(model: &Model, component: ObjectId) -> ObjectId {
    match model.component(component) {
        Some(c)
            if c.kind.is_water_heater()
                || matches!(c.kind, K::GeneratorMicroTurbineHeatRecovery { .. }) =>
        {
            c.container.unwrap_or(component)
        }
        _ => component,
    }
}

/// Supply component whose outlet node (other than the supply outlet) has a
/// setpoint manager.
pub fn is_setpoint_component(
    model: &Model,
    topology: &TopologyIndex,
    plant_loop: ObjectId,
    component: ObjectId,
) -> bool {
    let (Some(pl), Some(topo)) = (model.plant_loop(plant_loop), topology.get(plant_loop)) else {
        return false;
    };
    let Some(outlet) = topo.supply.after(component) else {
        return false;
    };
    model.is_node(outlet)
        && outlet != pl.supply.outlet_node
        && !model.setpoint_managers_on(outlet).is_empty()
}

/// Supply components for the default heating list, in flow order.
pub fn heating_components(cx: TranslateContext<'_>, plant_loop: ObjectId) -> Vec<ObjectId> {
    load_components(cx, plant_loop, ComponentType::Heating)
}

pub fn cooling_components(cx: TranslateContext<'_>, plant_loop: ObjectId) -> Vec<ObjectId> {
    load_components(cx, plant_loop, ComponentType::Cooling)
}

fn load_components(
    cx: TranslateContext<'_>,
    plant_loop: ObjectId,
    wanted: ComponentType,
) -> Vec<ObjectId> {
    supply_components(cx.model, cx.topology, plant_loop)
        .into_iter()
        .filter(|c| match cx.model.component(*c).map(|comp| &comp.kind) {
            Some(K::CentralHeatPumpSystem { .. }) => {
                let served = match wanted {
                    ComponentType::Heating => cx.topology.tertiary_plant_loop(cx.model, *c),
                    _ => cx.topology.plant_loop_of(cx.model, *c),
                };
                served == Some(plant_loop)
            }
            _ => component_type(cx, *c) == wanted,
        })
        .map(|c| operation_scheme_component(cx.model, c))
        .collect()
}

/// Both-type supply components not already run by a setpoint scheme.
pub fn uncontrolled_components(cx: TranslateContext<'_>, plant_loop: ObjectId) -> Vec<ObjectId> {
    supply_components(cx.model, cx.topology, plant_loop)
        .into_iter()
        .filter(|c| {
            component_type(cx, *c) == ComponentType::Both
                && !is_setpoint_component(cx.model, cx.topology, plant_loop, *c)
        })
        .map(|c| operation_scheme_component(cx.model, c))
        .collect()
}

/// Setpoint-controlled supply components, unsubstituted so their nodes can
/// still be read off the loop.
pub fn setpoint_components(cx: TranslateContext<'_>, plant_loop: ObjectId) -> Vec<ObjectId> {
    supply_components(cx.model, cx.topology, plant_loop)
        .into_iter()
        .filter(|c| is_setpoint_component(cx.model, cx.topology, plant_loop, *c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_model::SetpointManager;

    fn boiler(capacity: Autosizable) -> K {
        K::BoilerHotWater {
            nominal_capacity_w: capacity,
            nominal_thermal_efficiency: 0.8,
            design_water_flow_rate_m3ps: Autosizable::Value(0.001),
            fuel_type: "NaturalGas".into(),
        }
    }

    fn tank(capacity: f64) -> K {
        K::WaterHeaterMixed {
            tank_volume_m3: Autosizable::Value(0.3),
            heater_maximum_capacity_w: Autosizable::Value(capacity),
            use_side_design_flow_rate_m3ps: Autosizable::Autosize,
            source_side_design_flow_rate_m3ps: Autosizable::Autosize,
        }
    }

    fn chiller() -> K {
        K::ChillerElectricEir {
            reference_capacity_w: Autosizable::Autosize,
            reference_cop: 5.5,
            reference_chilled_water_flow_rate_m3ps: Autosizable::Autosize,
            reference_condenser_fluid_flow_rate_m3ps: Autosizable::Autosize,
        }
    }

    fn classify(m: &Model, id: ObjectId) -> ComponentType {
        let t = TopologyIndex::build(m).unwrap();
        component_type(TranslateContext::new(m, &t), id)
    }

    #[test]
    fn fixed_kinds() {
        let mut m = Model::new();
        let b = m.add_component("B", boiler(Autosizable::Autosize));
        let c = m.add_component("C", chiller());
        let p = m.add_component("P", K::PipeAdiabatic);
        assert_eq!(classify(&m, b), ComponentType::Heating);
        assert_eq!(classify(&m, c), ComponentType::Cooling);
        assert_eq!(classify(&m, p), ComponentType::None);
    }

    #[test]
    fn zero_capacity_tank() {
        let mut m = Model::new();
        let lone = m.add_component("Lone", tank(0.0));
        assert_eq!(classify(&m, lone), ComponentType::None);

        let heated = m.add_component("Heated", tank(3000.0));
        assert_eq!(classify(&m, heated), ComponentType::Heating);

        // Source side on a loop that only heats.
        let use_loop = m.add_plant_loop("Use");
        let src = m.add_plant_loop("Source");
        let b = m.add_component("B", boiler(Autosizable::Autosize));
        m.add_supply_branch_for_component(src, b).unwrap();
        let buffered = m.add_component("Buffered", tank(0.0));
        m.add_supply_branch_for_component(use_loop, buffered).unwrap();
        m.add_demand_branch_for_component(src, buffered, false).unwrap();
        assert_eq!(classify(&m, buffered), ComponentType::Heating);
    }

    #[test]
    fn uncontrolled_hx_follows_source_loop() {
        let mut m = Model::new();
        let src = m.add_plant_loop("Source");
        let dst = m.add_plant_loop("Dest");
        let b = m.add_component("B", boiler(Autosizable::Autosize));
        let c = m.add_component("C", chiller());
        m.add_supply_branch_for_component(src, b).unwrap();
        m.add_supply_branch_for_component(src, c).unwrap();
        let hx = m.add_component(
            "HX",
            K::HeatExchangerFluidToFluid {
                control_type: HxControlType::UncontrolledOn,
                loop_supply_side_design_flow_rate_m3ps: Autosizable::Autosize,
                loop_demand_side_design_flow_rate_m3ps: Autosizable::Autosize,
            },
        );
        m.add_supply_branch_for_component(dst, hx).unwrap();
        m.add_demand_branch_for_component(src, hx, false).unwrap();

        let t = TopologyIndex::build(&m).unwrap();
        let cx = TranslateContext::new(&m, &t);
        assert_eq!(component_type(cx, hx), ComponentType::Both);
        assert_eq!(plant_loop_type(cx, src), ComponentType::Both);
        assert_eq!(uncontrolled_components(cx, dst), vec![hx]);
    }

    #[test]
    fn heat_exchangers_feeding_each_other_terminate() {
        let mut m = Model::new();
        let a = m.add_plant_loop("A");
        let b = m.add_plant_loop("B");
        let hx = |m: &mut Model, name| {
            m.add_component(
                name,
                K::HeatExchangerFluidToFluid {
                    control_type: HxControlType::UncontrolledOn,
                    loop_supply_side_design_flow_rate_m3ps: Autosizable::Autosize,
                    loop_demand_side_design_flow_rate_m3ps: Autosizable::Autosize,
                },
            )
        };
        let ab = hx(&mut m, "AB");
        let ba = hx(&mut m, "BA");
        m.add_supply_branch_for_component(a, ab).unwrap();
        m.add_demand_branch_for_component(b, ab, false).unwrap();
        m.add_supply_branch_for_component(b, ba).unwrap();
        m.add_demand_branch_for_component(a, ba, false).unwrap();
        assert_eq!(classify(&m, ab), ComponentType::None);
    }

    #[test]
    fn setpoint_component_needs_manager_on_its_outlet() {
        let mut m = Model::new();
        let l = m.add_plant_loop("HW");
        let b1 = m.add_component("B1", boiler(Autosizable::Autosize));
        let b2 = m.add_component("B2", boiler(Autosizable::Autosize));
        m.add_supply_branch_for_component(l, b1).unwrap();
        m.add_supply_branch_for_component(l, b2).unwrap();
        let out = m.component(b1).unwrap().passage(pl_model::PassageRole::Main).unwrap().outlet;
        let sched = m.add_schedule_constant("HW Temp", 82.0, None);
        m.add_setpoint_manager(
            "B1 SPM",
            SetpointManager::Scheduled {
                control_variable: "Temperature".into(),
                schedule: sched,
                node: out,
            },
        );
        let t = TopologyIndex::build(&m).unwrap();
        let cx = TranslateContext::new(&m, &t);
        assert!(is_setpoint_component(&m, &t, l, b1));
        assert!(!is_setpoint_component(&m, &t, l, b2));
        assert_eq!(setpoint_components(cx, l), vec![b1]);
        assert_eq!(heating_components(cx, l), vec![b1, b2]);
        assert_eq!(flow_rate(&m, b1), Some(0.001));
    }
}
