//! Component catalogue: one record per component, carrying its name, the
//! node names of each wired passage and its key sizing fields.
//!
//! Sub-components (zone equipment coils, beam coils, generator heat
//! recovery) have no record of their own; their container's record carries
//! their nodes and fields.

use pl_core::{ObjectId, RecordId};
use pl_idf::IddObjectType;
use pl_idf::idd::*;
use pl_model::{Component, ComponentKind as K, Model, ModelObject, PassageRole};

use crate::context::TranslateContext;
use crate::error::TranslateResult;
use crate::objects::translate_object;
use crate::session::TranslationSession;
use crate::values::{named, node_name, number, optional_number, sizable};

type NodePair = (Option<String>, Option<String>);

fn passage_nodes(model: &Model, component: &Component, role: PassageRole) -> NodePair {
    let p = component.passage(role).copied().unwrap_or_default();
    (node_name(model, p.inlet), node_name(model, p.outlet))
}

fn children(model: &Model, container: ObjectId) -> Vec<(ObjectId, &Component)> {
    model
        .children_of(container)
        .into_iter()
        .filter_map(|c| model.component(c).map(|comp| (c, comp)))
        .collect()
}

/// Whether this kind only ever appears inside another component's record.
pub(crate) fn is_sub_component(kind: &K) -> bool {
    matches!(
        kind,
        K::CoilHeatingWaterBaseboard { .. }
            | K::CoilHeatingWaterBaseboardRadiant { .. }
            | K::CoilCoolingWaterPanelRadiant { .. }
            | K::CoilHeatingLowTempRadiantConstFlow
            | K::CoilCoolingLowTempRadiantConstFlow
            | K::CoilHeatingLowTempRadiantVarFlow { .. }
            | K::CoilCoolingLowTempRadiantVarFlow { .. }
            | K::CoilCoolingCooledBeam { .. }
            | K::CoilCoolingFourPipeBeam { .. }
            | K::CoilHeatingFourPipeBeam { .. }
            | K::GeneratorMicroTurbineHeatRecovery { .. }
    )
}

pub(crate) fn translate_component(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    object: &ModelObject,
    component: &Component,
) -> TranslateResult<Option<RecordId>> {
    if is_sub_component(&component.kind) {
        return Ok(None);
    }
    let model = cx.model;
    let name = object.name.as_str();
    let nodes = |role| passage_nodes(model, component, role);

    let record = match &component.kind {
        K::PumpVariableSpeed {
            rated_flow_rate_m3ps,
            rated_pump_head_pa,
        } => {
            use PumpVariableSpeedFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::PumpVariableSpeed, name);
            r.set_if_some(F::InletNodeName, i)
                .set_if_some(F::OutletNodeName, o)
                .set_string(F::DesignMaximumFlowRate, sizable("pump flow rate", *rated_flow_rate_m3ps)?)
                .set_string(F::DesignPumpHead, number("pump head", *rated_pump_head_pa)?)
                .set_string(F::PumpControlType, "Intermittent");
            r
        }
        K::PumpConstantSpeed {
            rated_flow_rate_m3ps,
            rated_pump_head_pa,
        } => {
            use PumpConstantSpeedFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::PumpConstantSpeed, name);
            r.set_if_some(F::InletNodeName, i)
                .set_if_some(F::OutletNodeName, o)
                .set_string(F::DesignFlowRate, sizable("pump flow rate", *rated_flow_rate_m3ps)?)
                .set_string(F::DesignPumpHead, number("pump head", *rated_pump_head_pa)?)
                .set_string(F::PumpControlType, "Intermittent");
            r
        }
        K::BoilerHotWater {
            nominal_capacity_w,
            nominal_thermal_efficiency,
            design_water_flow_rate_m3ps,
            fuel_type,
        } => {
            use BoilerHotWaterFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::BoilerHotWater, name);
            r.set_string(F::FuelType, fuel_type)
                .set_string(F::NominalCapacity, sizable("boiler capacity", *nominal_capacity_w)?)
                .set_string(
                    F::NominalThermalEfficiency,
                    number("boiler efficiency", *nominal_thermal_efficiency)?,
                )
                .set_string(
                    F::DesignWaterFlowRate,
                    sizable("boiler water flow", *design_water_flow_rate_m3ps)?,
                )
                .set_if_some(F::BoilerWaterInletNodeName, i)
                .set_if_some(F::BoilerWaterOutletNodeName, o);
            r
        }
        K::DistrictHeating { nominal_capacity_w } => {
            use DistrictHeatingWaterFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::DistrictHeatingWater, name);
            r.set_if_some(F::HotWaterInletNodeName, i)
                .set_if_some(F::HotWaterOutletNodeName, o)
                .set_string(F::NominalCapacity, sizable("district capacity", *nominal_capacity_w)?);
            r
        }
        K::DistrictCooling { nominal_capacity_w } => {
            use DistrictCoolingFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::DistrictCooling, name);
            r.set_if_some(F::ChilledWaterInletNodeName, i)
                .set_if_some(F::ChilledWaterOutletNodeName, o)
                .set_string(F::NominalCapacity, sizable("district capacity", *nominal_capacity_w)?);
            r
        }
        K::CoolingTowerSingleSpeed {
            design_water_flow_rate_m3ps,
            design_air_flow_rate_m3ps,
        } => {
            use CoolingTowerSingleSpeedFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::CoolingTowerSingleSpeed, name);
            r.set_if_some(F::WaterInletNodeName, i)
                .set_if_some(F::WaterOutletNodeName, o)
                .set_string(
                    F::DesignWaterFlowRate,
                    sizable("tower water flow", *design_water_flow_rate_m3ps)?,
                )
                .set_string(
                    F::DesignAirFlowRate,
                    sizable("tower air flow", *design_air_flow_rate_m3ps)?,
                );
            r
        }
        K::PipeAdiabatic => {
            use PipeAdiabaticFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::PipeAdiabatic, name);
            r.set_if_some(F::InletNodeName, i).set_if_some(F::OutletNodeName, o);
            r
        }
        K::GroundHeatExchangerVertical {
            design_flow_rate_m3ps,
            number_of_bore_holes,
            bore_hole_length_m,
        } => {
            use GroundHeatExchangerVerticalFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::GroundHeatExchangerVertical, name);
            r.set_if_some(F::InletNodeName, i)
                .set_if_some(F::OutletNodeName, o)
                .set_string(F::DesignFlowRate, number("ground HX flow", *design_flow_rate_m3ps)?)
                .set_string(F::NumberofBoreHoles, number_of_bore_holes.to_string())
                .set_string(F::BoreHoleLength, number("bore hole length", *bore_hole_length_m)?);
            r
        }
        K::SolarCollectorFlatPlateWater {
            maximum_flow_rate_m3ps,
        } => {
            use SolarCollectorFlatPlateWaterFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::SolarCollectorFlatPlateWater, name);
            r.set_if_some(F::InletNodeName, i)
                .set_if_some(F::OutletNodeName, o)
                .set_if_some(
                    F::MaximumFlowRate,
                    optional_number("collector flow", *maximum_flow_rate_m3ps)?,
                );
            r
        }
        K::TemperatureSource {
            design_volume_flow_rate_m3ps,
            source_temperature_c,
        } => {
            use PlantComponentTemperatureSourceFields as F;
            let (i, o) = nodes(PassageRole::Main);
            let mut r = named(IddObjectType::PlantComponentTemperatureSource, name);
            r.set_if_some(F::InletNode, i)
                .set_if_some(F::OutletNode, o)
                .set_string(
                    F::DesignVolumeFlowRate,
                    sizable("source flow", *design_volume_flow_rate_m3ps)?,
                )
                .set_string(F::TemperatureSpecificationType, "Constant")
                .set_string(
                    F::SourceTemperature,
                    number("source temperature", *source_temperature_c)?,
                );
            r
        }
        K::CoilHeatingWater {
            u_factor_times_area_w_per_k,
            maximum_water_flow_rate_m3ps,
        } => {
            use CoilHeatingWaterFields as F;
            let (wi, wo) = nodes(PassageRole::Water);
            let (ai, ao) = nodes(PassageRole::Air);
            let mut r = named(IddObjectType::CoilHeatingWater, name);
            r.set_string(F::UFactorTimesAreaValue, sizable("coil UA", *u_factor_times_area_w_per_k)?)
                .set_string(
                    F::MaximumWaterFlowRate,
                    sizable("coil water flow", *maximum_water_flow_rate_m3ps)?,
                )
                .set_if_some(F::WaterInletNodeName, wi)
                .set_if_some(F::WaterOutletNodeName, wo)
                .set_if_some(F::AirInletNodeName, ai)
                .set_if_some(F::AirOutletNodeName, ao);
            r
        }
        K::CoilCoolingWater {
            design_water_flow_rate_m3ps,
            design_air_flow_rate_m3ps,
        } => {
            use CoilCoolingWaterFields as F;
            let (wi, wo) = nodes(PassageRole::Water);
            let (ai, ao) = nodes(PassageRole::Air);
            let mut r = named(IddObjectType::CoilCoolingWater, name);
            r.set_string(
                F::DesignWaterFlowRate,
                sizable("coil water flow", *design_water_flow_rate_m3ps)?,
            )
            .set_string(F::DesignAirFlowRate, sizable("coil air flow", *design_air_flow_rate_m3ps)?)
            .set_if_some(F::WaterInletNodeName, wi)
            .set_if_some(F::WaterOutletNodeName, wo)
            .set_if_some(F::AirInletNodeName, ai)
            .set_if_some(F::AirOutletNodeName, ao);
            r
        }
        K::ChillerElectricEir {
            reference_capacity_w,
            reference_cop,
            reference_chilled_water_flow_rate_m3ps,
            reference_condenser_fluid_flow_rate_m3ps,
        } => {
            use ChillerElectricEirFields as F;
            let (ci, co) = nodes(PassageRole::Supply);
            let (ki, ko) = nodes(PassageRole::Demand);
            let (hi, ho) = nodes(PassageRole::Tertiary);
            let mut r = named(IddObjectType::ChillerElectricEir, name);
            r.set_string(F::ReferenceCapacity, sizable("chiller capacity", *reference_capacity_w)?)
                .set_string(F::ReferenceCOP, number("chiller COP", *reference_cop)?)
                .set_string(
                    F::ReferenceChilledWaterFlowRate,
                    sizable("chilled water flow", *reference_chilled_water_flow_rate_m3ps)?,
                )
                .set_string(
                    F::ReferenceCondenserFluidFlowRate,
                    sizable("condenser flow", *reference_condenser_fluid_flow_rate_m3ps)?,
                )
                .set_if_some(F::ChilledWaterInletNodeName, ci)
                .set_if_some(F::ChilledWaterOutletNodeName, co)
                .set_if_some(F::CondenserInletNodeName, ki)
                .set_if_some(F::CondenserOutletNodeName, ko)
                .set_if_some(F::HeatRecoveryInletNodeName, hi)
                .set_if_some(F::HeatRecoveryOutletNodeName, ho);
            r
        }
        K::ChillerElectricAshrae205 {
            representation_file,
            rated_capacity_w,
            chilled_water_maximum_requested_flow_rate_m3ps,
        } => {
            use ChillerElectricAshrae205Fields as F;
            let (ci, co) = nodes(PassageRole::ChilledWater);
            let (ki, ko) = nodes(PassageRole::Condenser);
            let (hi, ho) = nodes(PassageRole::HeatRecovery);
            let (oi, oo) = nodes(PassageRole::OilCooler);
            let (xi, xo) = nodes(PassageRole::Auxiliary);
            let mut r = named(IddObjectType::ChillerElectricAshrae205, name);
            r.set_string(F::RepresentationFileName, representation_file)
                .set_string(F::RatedCapacity, sizable("chiller capacity", *rated_capacity_w)?)
                .set_if_some(F::ChilledWaterInletNodeName, ci)
                .set_if_some(F::ChilledWaterOutletNodeName, co)
                .set_string(
                    F::ChilledWaterMaximumRequestedFlowRate,
                    sizable(
                        "chilled water flow",
                        *chilled_water_maximum_requested_flow_rate_m3ps,
                    )?,
                )
                .set_if_some(F::CondenserInletNodeName, ki)
                .set_if_some(F::CondenserOutletNodeName, ko)
                .set_if_some(F::HeatRecoveryInletNodeName, hi)
                .set_if_some(F::HeatRecoveryOutletNodeName, ho)
                .set_if_some(F::OilCoolerInletNodeName, oi)
                .set_if_some(F::OilCoolerOutletNodeName, oo)
                .set_if_some(F::AuxiliaryInletNodeName, xi)
                .set_if_some(F::AuxiliaryOutletNodeName, xo);
            r
        }
        K::HeatExchangerFluidToFluid {
            control_type,
            loop_supply_side_design_flow_rate_m3ps,
            loop_demand_side_design_flow_rate_m3ps,
        } => {
            use HeatExchangerFluidToFluidFields as F;
            let (si, so) = nodes(PassageRole::Supply);
            let (di, d_o) = nodes(PassageRole::Demand);
            let mut r = named(IddObjectType::HeatExchangerFluidToFluid, name);
            r.set_if_some(F::LoopDemandSideInletNodeName, di)
                .set_if_some(F::LoopDemandSideOutletNodeName, d_o)
                .set_string(
                    F::LoopDemandSideDesignFlowRate,
                    sizable("HX demand flow", *loop_demand_side_design_flow_rate_m3ps)?,
                )
                .set_if_some(F::LoopSupplySideInletNodeName, si)
                .set_if_some(F::LoopSupplySideOutletNodeName, so)
                .set_string(
                    F::LoopSupplySideDesignFlowRate,
                    sizable("HX supply flow", *loop_supply_side_design_flow_rate_m3ps)?,
                )
                .set_string(F::ControlType, control_type.as_str());
            r
        }
        K::WaterHeaterMixed {
            tank_volume_m3,
            heater_maximum_capacity_w,
            use_side_design_flow_rate_m3ps,
            source_side_design_flow_rate_m3ps,
        } => {
            use WaterHeaterMixedFields as F;
            let (ui, uo) = nodes(PassageRole::Supply);
            let (si, so) = nodes(PassageRole::Demand);
            let mut r = named(IddObjectType::WaterHeaterMixed, name);
            r.set_string(F::TankVolume, sizable("tank volume", *tank_volume_m3)?)
                .set_string(
                    F::HeaterMaximumCapacity,
                    sizable("heater capacity", *heater_maximum_capacity_w)?,
                )
                .set_if_some(F::UseSideInletNodeName, ui)
                .set_if_some(F::UseSideOutletNodeName, uo)
                .set_string(
                    F::UseSideDesignFlowRate,
                    sizable("use side flow", *use_side_design_flow_rate_m3ps)?,
                )
                .set_if_some(F::SourceSideInletNodeName, si)
                .set_if_some(F::SourceSideOutletNodeName, so)
                .set_string(
                    F::SourceSideDesignFlowRate,
                    sizable("source side flow", *source_side_design_flow_rate_m3ps)?,
                );
            r
        }
        K::WaterHeaterStratified {
            tank_volume_m3,
            heater1_capacity_w,
            heater2_capacity_w,
            use_side_design_flow_rate_m3ps,
            source_side_design_flow_rate_m3ps,
        } => {
            use WaterHeaterStratifiedFields as F;
            let (ui, uo) = nodes(PassageRole::Supply);
            let (si, so) = nodes(PassageRole::Demand);
            let mut r = named(IddObjectType::WaterHeaterStratified, name);
            r.set_string(F::TankVolume, sizable("tank volume", *tank_volume_m3)?)
                .set_string(F::Heater1Capacity, sizable("heater 1 capacity", *heater1_capacity_w)?)
                .set_string(F::Heater2Capacity, number("heater 2 capacity", *heater2_capacity_w)?)
                .set_if_some(F::UseSideInletNodeName, ui)
                .set_if_some(F::UseSideOutletNodeName, uo)
                .set_string(
                    F::UseSideDesignFlowRate,
                    sizable("use side flow", *use_side_design_flow_rate_m3ps)?,
                )
                .set_if_some(F::SourceSideInletNodeName, si)
                .set_if_some(F::SourceSideOutletNodeName, so)
                .set_string(
                    F::SourceSideDesignFlowRate,
                    sizable("source side flow", *source_side_design_flow_rate_m3ps)?,
                );
            r
        }
        K::HeatPumpWaterToWaterEquationFitHeating {
            reference_load_side_flow_rate_m3ps,
            reference_source_side_flow_rate_m3ps,
            reference_heating_capacity_w,
        } => {
            use HeatPumpWaterToWaterEquationFitHeatingFields as F;
            let (li, lo) = nodes(PassageRole::Supply);
            let (si, so) = nodes(PassageRole::Demand);
            let mut r = named(IddObjectType::HeatPumpWaterToWaterEquationFitHeating, name);
            r.set_if_some(F::SourceSideInletNodeName, si)
                .set_if_some(F::SourceSideOutletNodeName, so)
                .set_if_some(F::LoadSideInletNodeName, li)
                .set_if_some(F::LoadSideOutletNodeName, lo)
                .set_string(
                    F::ReferenceLoadSideFlowRate,
                    sizable("load side flow", *reference_load_side_flow_rate_m3ps)?,
                )
                .set_string(
                    F::ReferenceSourceSideFlowRate,
                    sizable("source side flow", *reference_source_side_flow_rate_m3ps)?,
                )
                .set_string(
                    F::ReferenceHeatingCapacity,
                    sizable("heating capacity", *reference_heating_capacity_w)?,
                );
            r
        }
        K::HeatPumpWaterToWaterEquationFitCooling {
            reference_load_side_flow_rate_m3ps,
            reference_source_side_flow_rate_m3ps,
            reference_cooling_capacity_w,
        } => {
            use HeatPumpWaterToWaterEquationFitCoolingFields as F;
            let (li, lo) = nodes(PassageRole::Supply);
            let (si, so) = nodes(PassageRole::Demand);
            let mut r = named(IddObjectType::HeatPumpWaterToWaterEquationFitCooling, name);
            r.set_if_some(F::SourceSideInletNodeName, si)
                .set_if_some(F::SourceSideOutletNodeName, so)
                .set_if_some(F::LoadSideInletNodeName, li)
                .set_if_some(F::LoadSideOutletNodeName, lo)
                .set_string(
                    F::ReferenceLoadSideFlowRate,
                    sizable("load side flow", *reference_load_side_flow_rate_m3ps)?,
                )
                .set_string(
                    F::ReferenceSourceSideFlowRate,
                    sizable("source side flow", *reference_source_side_flow_rate_m3ps)?,
                )
                .set_string(
                    F::ReferenceCoolingCapacity,
                    sizable("cooling capacity", *reference_cooling_capacity_w)?,
                );
            r
        }
        K::CentralHeatPumpSystem {
            control_method,
            ancillary_power_w,
        } => {
            use CentralHeatPumpSystemFields as F;
            let (ci, co) = nodes(PassageRole::Supply);
            let (si, so) = nodes(PassageRole::Demand);
            let (hi, ho) = nodes(PassageRole::Tertiary);
            let mut r = named(IddObjectType::CentralHeatPumpSystem, name);
            r.set_string(F::ControlMethod, control_method)
                .set_if_some(F::CoolingLoopInletNodeName, ci)
                .set_if_some(F::CoolingLoopOutletNodeName, co)
                .set_if_some(F::SourceLoopInletNodeName, si)
                .set_if_some(F::SourceLoopOutletNodeName, so)
                .set_if_some(F::HeatingLoopInletNodeName, hi)
                .set_if_some(F::HeatingLoopOutletNodeName, ho)
                .set_string(F::AncillaryPower, number("ancillary power", *ancillary_power_w)?);
            r
        }
        K::ZoneHvacBaseboardConvectiveWater => {
            use ZoneHvacBaseboardConvectiveWaterFields as F;
            let mut r = named(IddObjectType::ZoneHvacBaseboardConvectiveWater, name);
            for (_, coil) in children(model, object.id) {
                if let K::CoilHeatingWaterBaseboard {
                    u_factor_times_area_w_per_k,
                    maximum_water_flow_rate_m3ps,
                } = &coil.kind
                {
                    let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                    r.set_if_some(F::InletNodeName, i)
                        .set_if_some(F::OutletNodeName, o)
                        .set_string(
                            F::UFactorTimesAreaValue,
                            sizable("baseboard UA", *u_factor_times_area_w_per_k)?,
                        )
                        .set_string(
                            F::MaximumWaterFlowRate,
                            sizable("baseboard water flow", *maximum_water_flow_rate_m3ps)?,
                        );
                }
            }
            r
        }
        K::ZoneHvacBaseboardRadiantConvectiveWater { fraction_radiant } => {
            use ZoneHvacBaseboardRadiantConvectiveWaterFields as F;
            let mut r = named(IddObjectType::ZoneHvacBaseboardRadiantConvectiveWater, name);
            for (_, coil) in children(model, object.id) {
                if let K::CoilHeatingWaterBaseboardRadiant {
                    heating_design_capacity_w,
                    maximum_water_flow_rate_m3ps,
                } = &coil.kind
                {
                    let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                    r.set_if_some(F::InletNodeName, i)
                        .set_if_some(F::OutletNodeName, o)
                        .set_string(
                            F::HeatingDesignCapacity,
                            sizable("baseboard capacity", *heating_design_capacity_w)?,
                        )
                        .set_string(
                            F::MaximumWaterFlowRate,
                            sizable("baseboard water flow", *maximum_water_flow_rate_m3ps)?,
                        );
                }
            }
            r.set_string(F::FractionRadiant, number("fraction radiant", *fraction_radiant)?);
            r
        }
        K::ZoneHvacCoolingPanelRadiantConvectiveWater { fraction_radiant } => {
            use ZoneHvacCoolingPanelRadiantConvectiveWaterFields as F;
            let mut r = named(IddObjectType::ZoneHvacCoolingPanelRadiantConvectiveWater, name);
            for (_, coil) in children(model, object.id) {
                if let K::CoilCoolingWaterPanelRadiant {
                    cooling_design_capacity_w,
                    maximum_chilled_water_flow_rate_m3ps,
                } = &coil.kind
                {
                    let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                    r.set_if_some(F::WaterInletNodeName, i)
                        .set_if_some(F::WaterOutletNodeName, o)
                        .set_string(
                            F::CoolingDesignCapacity,
                            sizable("panel capacity", *cooling_design_capacity_w)?,
                        )
                        .set_string(
                            F::MaximumChilledWaterFlowRate,
                            sizable("panel water flow", *maximum_chilled_water_flow_rate_m3ps)?,
                        );
                }
            }
            r.set_string(F::FractionRadiant, number("fraction radiant", *fraction_radiant)?);
            r
        }
        K::ZoneHvacLowTempRadiantConstFlow {
            rated_flow_rate_m3ps,
        } => {
            use ZoneHvacLowTemperatureRadiantConstantFlowFields as F;
            let mut r = named(IddObjectType::ZoneHvacLowTemperatureRadiantConstantFlow, name);
            r.set_string(F::RatedFlowRate, sizable("radiant flow", *rated_flow_rate_m3ps)?);
            for (_, coil) in children(model, object.id) {
                let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                match coil.kind {
                    K::CoilHeatingLowTempRadiantConstFlow => {
                        r.set_if_some(F::HeatingWaterInletNodeName, i)
                            .set_if_some(F::HeatingWaterOutletNodeName, o);
                    }
                    K::CoilCoolingLowTempRadiantConstFlow => {
                        r.set_if_some(F::CoolingWaterInletNodeName, i)
                            .set_if_some(F::CoolingWaterOutletNodeName, o);
                    }
                    _ => {}
                }
            }
            r
        }
        K::ZoneHvacLowTempRadiantVarFlow => {
            use ZoneHvacLowTemperatureRadiantVariableFlowFields as F;
            let mut r = named(IddObjectType::ZoneHvacLowTemperatureRadiantVariableFlow, name);
            for (_, coil) in children(model, object.id) {
                let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                match &coil.kind {
                    K::CoilHeatingLowTempRadiantVarFlow {
                        maximum_hot_water_flow_m3ps,
                    } => {
                        r.set_string(
                            F::MaximumHotWaterFlow,
                            sizable("radiant hot water flow", *maximum_hot_water_flow_m3ps)?,
                        )
                        .set_if_some(F::HeatingWaterInletNodeName, i)
                        .set_if_some(F::HeatingWaterOutletNodeName, o);
                    }
                    K::CoilCoolingLowTempRadiantVarFlow {
                        maximum_cold_water_flow_m3ps,
                    } => {
                        r.set_string(
                            F::MaximumColdWaterFlow,
                            sizable("radiant cold water flow", *maximum_cold_water_flow_m3ps)?,
                        )
                        .set_if_some(F::CoolingWaterInletNodeName, i)
                        .set_if_some(F::CoolingWaterOutletNodeName, o);
                    }
                    _ => {}
                }
            }
            r
        }
        K::GeneratorMicroTurbine {
            reference_electrical_power_output_w,
        } => {
            use GeneratorMicroTurbineFields as F;
            let mut r = named(IddObjectType::GeneratorMicroTurbine, name);
            r.set_string(
                F::ReferenceElectricalPowerOutput,
                number("electrical power", *reference_electrical_power_output_w)?,
            );
            for (_, hr) in children(model, object.id) {
                if let K::GeneratorMicroTurbineHeatRecovery {
                    reference_heat_recovery_water_flow_rate_m3ps,
                    maximum_heat_recovery_water_flow_rate_m3ps,
                } = &hr.kind
                {
                    let (i, o) = passage_nodes(model, hr, PassageRole::Main);
                    r.set_if_some(F::HeatRecoveryWaterInletNodeName, i)
                        .set_if_some(F::HeatRecoveryWaterOutletNodeName, o)
                        .set_string(
                            F::ReferenceHeatRecoveryWaterFlowRate,
                            number(
                                "heat recovery flow",
                                *reference_heat_recovery_water_flow_rate_m3ps,
                            )?,
                        )
                        .set_if_some(
                            F::MaximumHeatRecoveryWaterFlowRate,
                            optional_number(
                                "heat recovery flow",
                                *maximum_heat_recovery_water_flow_rate_m3ps,
                            )?,
                        );
                }
            }
            r
        }
        K::WaterHeaterHeatPump {
            condenser_water_flow_rate_m3ps,
        } => {
            use WaterHeaterHeatPumpPumpedCondenserFields as F;
            let mut r = named(IddObjectType::WaterHeaterHeatPumpPumpedCondenser, name);
            r.set_string(
                F::CondenserWaterFlowRate,
                sizable("condenser water flow", *condenser_water_flow_rate_m3ps)?,
            );
            let tank = children(model, object.id)
                .into_iter()
                .find(|(_, c)| c.kind.is_water_heater());
            if let Some((tank_id, tank)) = tank {
                // The tank goes out first so the heat pump can name it.
                if let Some(tank_record) = translate_object(cx, session, tank_id)? {
                    let tank_record = session.record(tank_record);
                    r.set_string(F::TankObjectType, tank_record.idd_type().name())
                        .set_if_some(F::TankName, tank_record.name());
                }
                let (i, o) = passage_nodes(model, tank, PassageRole::Supply);
                r.set_if_some(F::TankUseSideInletNodeName, i)
                    .set_if_some(F::TankUseSideOutletNodeName, o);
            }
            r
        }
        K::AirTerminalCooledBeam {
            cooled_beam_type,
            supply_air_volumetric_flow_rate_m3ps,
        } => {
            use AirTerminalCooledBeamFields as F;
            let mut r = named(IddObjectType::AirTerminalCooledBeam, name);
            r.set_string(F::CooledBeamType, cooled_beam_type).set_string(
                F::SupplyAirVolumetricFlowRate,
                sizable("beam air flow", *supply_air_volumetric_flow_rate_m3ps)?,
            );
            for (_, coil) in children(model, object.id) {
                if let K::CoilCoolingCooledBeam {
                    coil_surface_area_per_coil_length_m2_per_m,
                } = &coil.kind
                {
                    let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                    r.set_if_some(F::ChilledWaterInletNodeName, i)
                        .set_if_some(F::ChilledWaterOutletNodeName, o)
                        .set_string(
                            F::CoilSurfaceAreaperCoilLength,
                            number("coil surface area", *coil_surface_area_per_coil_length_m2_per_m)?,
                        );
                }
            }
            return Ok(Some(push_with_distribution_unit(session, r, name)));
        }
        K::AirTerminalFourPipeBeam {
            design_primary_air_volume_flow_rate_m3ps,
        } => {
            use AirTerminalFourPipeBeamFields as F;
            let mut r = named(IddObjectType::AirTerminalFourPipeBeam, name);
            r.set_string(
                F::DesignPrimaryAirVolumeFlowRate,
                sizable("beam air flow", *design_primary_air_volume_flow_rate_m3ps)?,
            );
            for (_, coil) in children(model, object.id) {
                let (i, o) = passage_nodes(model, coil, PassageRole::Main);
                match &coil.kind {
                    K::CoilCoolingFourPipeBeam {
                        beam_rated_cooling_capacity_per_length_w_per_m,
                    } => {
                        r.set_if_some(F::ChilledWaterInletNodeName, i)
                            .set_if_some(F::ChilledWaterOutletNodeName, o)
                            .set_string(
                                F::BeamRatedCoolingCapacityperBeamLength,
                                number(
                                    "beam cooling capacity",
                                    *beam_rated_cooling_capacity_per_length_w_per_m,
                                )?,
                            );
                    }
                    K::CoilHeatingFourPipeBeam {
                        beam_rated_heating_capacity_per_length_w_per_m,
                    } => {
                        r.set_if_some(F::HotWaterInletNodeName, i)
                            .set_if_some(F::HotWaterOutletNodeName, o)
                            .set_string(
                                F::BeamRatedHeatingCapacityperBeamLength,
                                number(
                                    "beam heating capacity",
                                    *beam_rated_heating_capacity_per_length_w_per_m,
                                )?,
                            );
                    }
                    _ => {}
                }
            }
            return Ok(Some(push_with_distribution_unit(session, r, name)));
        }
        // Sub-components returned early above.
        _ => return Ok(None),
    };
    Ok(Some(session.push(record)))
}

/// Air terminals are reached through a distribution unit; the unit's record
/// stands for the terminal.
fn push_with_distribution_unit(
    session: &mut TranslationSession,
    terminal: pl_idf::IdfObject,
    name: &str,
) -> RecordId {
    use ZoneHvacAirDistributionUnitFields as F;
    let mut adu = named(
        IddObjectType::ZoneHvacAirDistributionUnit,
        &format!("{name} Air Distribution Unit"),
    );
    adu.set_string(F::AirTerminalObjectType, terminal.idd_type().name())
        .set_string(F::AirTerminalName, name);
    session.push(terminal);
    session.push(adu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_model::{Autosizable, TopologyIndex};

    fn translate(m: &Model, id: ObjectId) -> (TranslationSession, Option<RecordId>) {
        let t = TopologyIndex::build(m).unwrap();
        let cx = TranslateContext::new(m, &t);
        let mut s = TranslationSession::new();
        let r = translate_object(cx, &mut s, id).unwrap();
        (s, r)
    }

    #[test]
    fn boiler_carries_nodes_and_autosize() {
        let mut m = Model::new();
        let l = m.add_plant_loop("HW");
        let b = m.add_component(
            "Boiler",
            K::BoilerHotWater {
                nominal_capacity_w: Autosizable::Autosize,
                nominal_thermal_efficiency: 0.8,
                design_water_flow_rate_m3ps: Autosizable::Value(0.002),
                fuel_type: "NaturalGas".into(),
            },
        );
        m.add_supply_branch_for_component(l, b).unwrap();
        let (s, r) = translate(&m, b);
        let rec = s.record(r.unwrap());
        assert_eq!(rec.get_string(BoilerHotWaterFields::NominalCapacity), Some("Autosize"));
        assert_eq!(rec.get_double(BoilerHotWaterFields::DesignWaterFlowRate), Some(0.002));
        assert_eq!(
            rec.get_string(BoilerHotWaterFields::BoilerWaterOutletNodeName),
            Some("Boiler Outlet Node")
        );
    }

    #[test]
    fn baseboard_record_carries_coil_nodes() {
        let mut m = Model::new();
        let l = m.add_plant_loop("HW");
        let bb = m.add_component("Baseboard", K::ZoneHvacBaseboardConvectiveWater);
        let coil = m.add_component(
            "Baseboard Coil",
            K::CoilHeatingWaterBaseboard {
                u_factor_times_area_w_per_k: Autosizable::Autosize,
                maximum_water_flow_rate_m3ps: Autosizable::Autosize,
            },
        );
        m.set_container(coil, bb).unwrap();
        m.add_demand_branch_for_component(l, coil, false).unwrap();

        let (s, r) = translate(&m, coil);
        assert_eq!(r, None);
        assert!(s.is_empty());

        let (s, r) = translate(&m, bb);
        let rec = s.record(r.unwrap());
        assert_eq!(
            rec.get_string(ZoneHvacBaseboardConvectiveWaterFields::OutletNodeName),
            Some("Baseboard Coil Outlet Node")
        );
    }

    #[test]
    fn beam_maps_to_distribution_unit() {
        let mut m = Model::new();
        let beam = m.add_component(
            "Beam",
            K::AirTerminalCooledBeam {
                cooled_beam_type: "Active".into(),
                supply_air_volumetric_flow_rate_m3ps: Autosizable::Autosize,
            },
        );
        let (s, r) = translate(&m, beam);
        let adu = s.record(r.unwrap());
        assert_eq!(adu.idd_type(), IddObjectType::ZoneHvacAirDistributionUnit);
        assert_eq!(
            adu.get_string(ZoneHvacAirDistributionUnitFields::AirTerminalObjectType),
            Some("AirTerminal:SingleDuct:ConstantVolume:CooledBeam")
        );
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn heat_pump_water_heater_emits_tank_first() {
        let mut m = Model::new();
        let hpwh = m.add_component(
            "HPWH",
            K::WaterHeaterHeatPump {
                condenser_water_flow_rate_m3ps: Autosizable::Autosize,
            },
        );
        let tank = m.add_component(
            "Tank",
            K::WaterHeaterMixed {
                tank_volume_m3: Autosizable::Value(0.3),
                heater_maximum_capacity_w: Autosizable::Value(0.0),
                use_side_design_flow_rate_m3ps: Autosizable::Autosize,
                source_side_design_flow_rate_m3ps: Autosizable::Autosize,
            },
        );
        m.set_container(tank, hpwh).unwrap();
        let (s, r) = translate(&m, hpwh);
        assert_eq!(s.records()[0].name(), Some("Tank"));
        let rec = s.record(r.unwrap());
        assert_eq!(
            rec.get_string(WaterHeaterHeatPumpPumpedCondenserFields::TankObjectType),
            Some("WaterHeater:Mixed")
        );
        assert_eq!(s.mapped(tank), Some(Some(pl_core::RecordId::from_index(0))));
    }
}
