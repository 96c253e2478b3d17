//! HVAC component kinds, their hydraulic passages and sizing values.

use pl_core::ObjectId;

/// A design value that is either hard-sized or left to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SizingRepr", into = "SizingRepr")
)]
pub enum Autosizable {
    #[default]
    Autosize,
    Value(f64),
}

impl Autosizable {
    pub fn value(self) -> Option<f64> {
        match self {
            Autosizable::Autosize => None,
            Autosizable::Value(v) => Some(v),
        }
    }

    pub fn is_autosized(self) -> bool {
        matches!(self, Autosizable::Autosize)
    }
}

impl From<f64> for Autosizable {
    fn from(v: f64) -> Self {
        Autosizable::Value(v)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum SizingRepr {
    Number(f64),
    Keyword(String),
}

#[cfg(feature = "serde")]
impl TryFrom<SizingRepr> for Autosizable {
    type Error = String;

    fn try_from(repr: SizingRepr) -> Result<Self, Self::Error> {
        match repr {
            SizingRepr::Number(v) => Ok(Autosizable::Value(v)),
            SizingRepr::Keyword(k) if k.eq_ignore_ascii_case("autosize") => {
                Ok(Autosizable::Autosize)
            }
            SizingRepr::Keyword(k) => Err(format!("expected a number or 'Autosize', got '{k}'")),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Autosizable> for SizingRepr {
    fn from(v: Autosizable) -> Self {
        match v {
            Autosizable::Autosize => SizingRepr::Keyword("Autosize".to_string()),
            Autosizable::Value(v) => SizingRepr::Number(v),
        }
    }
}

/// Control type of a fluid-to-fluid heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HxControlType {
    #[default]
    UncontrolledOn,
    OperationSchemeModulated,
    OperationSchemeOnOff,
    HeatingSetpointModulated,
    HeatingSetpointOnOff,
    CoolingSetpointModulated,
    CoolingSetpointOnOff,
    DualDeadbandSetpointModulated,
    DualDeadbandSetpointOnOff,
    CoolingDifferentialOnOff,
    CoolingSetpointOnOffWithComponentOverride,
    TrackComponentOnOff,
}

impl HxControlType {
    pub fn as_str(self) -> &'static str {
        match self {
            HxControlType::UncontrolledOn => "UncontrolledOn",
            HxControlType::OperationSchemeModulated => "OperationSchemeModulated",
            HxControlType::OperationSchemeOnOff => "OperationSchemeOnOff",
            HxControlType::HeatingSetpointModulated => "HeatingSetpointModulated",
            HxControlType::HeatingSetpointOnOff => "HeatingSetpointOnOff",
            HxControlType::CoolingSetpointModulated => "CoolingSetpointModulated",
            HxControlType::CoolingSetpointOnOff => "CoolingSetpointOnOff",
            HxControlType::DualDeadbandSetpointModulated => "DualDeadbandSetpointModulated",
            HxControlType::DualDeadbandSetpointOnOff => "DualDeadbandSetpointOnOff",
            HxControlType::CoolingDifferentialOnOff => "CoolingDifferentialOnOff",
            HxControlType::CoolingSetpointOnOffWithComponentOverride => {
                "CoolingSetpointOnOffWithComponentOverride"
            }
            HxControlType::TrackComponentOnOff => "TrackComponentOnOff",
        }
    }
}

/// Which of a component's fluid passages a node pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassageRole {
    /// The only passage of a straight component.
    Main,
    Air,
    Water,
    /// Plant-side passage of a water-to-water component.
    Supply,
    /// Source-side passage of a water-to-water component.
    Demand,
    Tertiary,
    ChilledWater,
    Condenser,
    HeatRecovery,
    OilCooler,
    Auxiliary,
}

impl PassageRole {
    /// Word used when naming the nodes of this passage.
    pub fn label(self) -> &'static str {
        match self {
            PassageRole::Main => "",
            PassageRole::Air => "Air",
            PassageRole::Water => "Water",
            PassageRole::Supply => "Supply Side",
            PassageRole::Demand => "Demand Side",
            PassageRole::Tertiary => "Tertiary",
            PassageRole::ChilledWater => "Chilled Water",
            PassageRole::Condenser => "Condenser",
            PassageRole::HeatRecovery => "Heat Recovery",
            PassageRole::OilCooler => "Oil Cooler",
            PassageRole::Auxiliary => "Auxiliary",
        }
    }
}

/// One inlet/outlet node pair through a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Passage {
    pub inlet: Option<ObjectId>,
    pub outlet: Option<ObjectId>,
}

impl Passage {
    pub fn is_connected(&self) -> bool {
        self.inlet.is_some() || self.outlet.is_some()
    }

    /// Both nodes, when the passage is fully wired.
    pub fn nodes(&self) -> Option<(ObjectId, ObjectId)> {
        Some((self.inlet?, self.outlet?))
    }
}

/// The passage layout a component kind exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortLayout {
    /// Zone equipment, air terminals and generators live off the plant graph.
    None,
    Straight,
    WaterToAir,
    WaterToWater { tertiary: bool },
    Multi(&'static [PassageRole]),
}

const ASHRAE205_PASSAGES: &[PassageRole] = &[
    PassageRole::ChilledWater,
    PassageRole::Condenser,
    PassageRole::HeatRecovery,
    PassageRole::OilCooler,
    PassageRole::Auxiliary,
];

/// Hydraulic connections of one component instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Ports {
    None,
    Straight(Passage),
    WaterToAir {
        air: Passage,
        water: Passage,
    },
    WaterToWater {
        supply: Passage,
        demand: Passage,
        tertiary: Option<Passage>,
    },
    Multi(Vec<(PassageRole, Passage)>),
}

impl Ports {
    pub fn for_layout(layout: PortLayout) -> Self {
        match layout {
            PortLayout::None => Ports::None,
            PortLayout::Straight => Ports::Straight(Passage::default()),
            PortLayout::WaterToAir => Ports::WaterToAir {
                air: Passage::default(),
                water: Passage::default(),
            },
            PortLayout::WaterToWater { tertiary } => Ports::WaterToWater {
                supply: Passage::default(),
                demand: Passage::default(),
                tertiary: tertiary.then(Passage::default),
            },
            PortLayout::Multi(roles) => {
                Ports::Multi(roles.iter().map(|r| (*r, Passage::default())).collect())
            }
        }
    }

    pub fn passage(&self, role: PassageRole) -> Option<&Passage> {
        match (self, role) {
            (Ports::Straight(p), PassageRole::Main) => Some(p),
            (Ports::WaterToAir { air, .. }, PassageRole::Air) => Some(air),
            (Ports::WaterToAir { water, .. }, PassageRole::Water) => Some(water),
            (Ports::WaterToWater { supply, .. }, PassageRole::Supply) => Some(supply),
            (Ports::WaterToWater { demand, .. }, PassageRole::Demand) => Some(demand),
            (Ports::WaterToWater { tertiary, .. }, PassageRole::Tertiary) => tertiary.as_ref(),
            (Ports::Multi(list), role) => list.iter().find(|(r, _)| *r == role).map(|(_, p)| p),
            _ => None,
        }
    }

    pub fn passage_mut(&mut self, role: PassageRole) -> Option<&mut Passage> {
        match (self, role) {
            (Ports::Straight(p), PassageRole::Main) => Some(p),
            (Ports::WaterToAir { air, .. }, PassageRole::Air) => Some(air),
            (Ports::WaterToAir { water, .. }, PassageRole::Water) => Some(water),
            (Ports::WaterToWater { supply, .. }, PassageRole::Supply) => Some(supply),
            (Ports::WaterToWater { demand, .. }, PassageRole::Demand) => Some(demand),
            (Ports::WaterToWater { tertiary, .. }, PassageRole::Tertiary) => tertiary.as_mut(),
            (Ports::Multi(list), role) => {
                list.iter_mut().find(|(r, _)| *r == role).map(|(_, p)| p)
            }
            _ => None,
        }
    }

    /// All passages with their roles, in declaration order.
    pub fn passages(&self) -> Vec<(PassageRole, Passage)> {
        match self {
            Ports::None => Vec::new(),
            Ports::Straight(p) => vec![(PassageRole::Main, *p)],
            Ports::WaterToAir { air, water } => {
                vec![(PassageRole::Air, *air), (PassageRole::Water, *water)]
            }
            Ports::WaterToWater {
                supply,
                demand,
                tertiary,
            } => {
                let mut out = vec![(PassageRole::Supply, *supply), (PassageRole::Demand, *demand)];
                if let Some(t) = tertiary {
                    out.push((PassageRole::Tertiary, *t));
                }
                out
            }
            Ports::Multi(list) => list.clone(),
        }
    }
}

/// Concrete component type plus the parameters the translator carries over.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum ComponentKind {
    PumpVariableSpeed {
        #[cfg_attr(feature = "serde", serde(default))]
        rated_flow_rate_m3ps: Autosizable,
        rated_pump_head_pa: f64,
    },
    PumpConstantSpeed {
        #[cfg_attr(feature = "serde", serde(default))]
        rated_flow_rate_m3ps: Autosizable,
        rated_pump_head_pa: f64,
    },
    BoilerHotWater {
        #[cfg_attr(feature = "serde", serde(default))]
        nominal_capacity_w: Autosizable,
        nominal_thermal_efficiency: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        design_water_flow_rate_m3ps: Autosizable,
        fuel_type: String,
    },
    DistrictHeating {
        #[cfg_attr(feature = "serde", serde(default))]
        nominal_capacity_w: Autosizable,
    },
    DistrictCooling {
        #[cfg_attr(feature = "serde", serde(default))]
        nominal_capacity_w: Autosizable,
    },
    CoolingTowerSingleSpeed {
        #[cfg_attr(feature = "serde", serde(default))]
        design_water_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        design_air_flow_rate_m3ps: Autosizable,
    },
    PipeAdiabatic,
    GroundHeatExchangerVertical {
        design_flow_rate_m3ps: f64,
        number_of_bore_holes: u32,
        bore_hole_length_m: f64,
    },
    SolarCollectorFlatPlateWater {
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_flow_rate_m3ps: Option<f64>,
    },
    TemperatureSource {
        #[cfg_attr(feature = "serde", serde(default))]
        design_volume_flow_rate_m3ps: Autosizable,
        source_temperature_c: f64,
    },
    GeneratorMicroTurbineHeatRecovery {
        reference_heat_recovery_water_flow_rate_m3ps: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_heat_recovery_water_flow_rate_m3ps: Option<f64>,
    },
    CoilHeatingWaterBaseboard {
        #[cfg_attr(feature = "serde", serde(default))]
        u_factor_times_area_w_per_k: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_water_flow_rate_m3ps: Autosizable,
    },
    CoilHeatingWaterBaseboardRadiant {
        #[cfg_attr(feature = "serde", serde(default))]
        heating_design_capacity_w: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_water_flow_rate_m3ps: Autosizable,
    },
    CoilCoolingWaterPanelRadiant {
        #[cfg_attr(feature = "serde", serde(default))]
        cooling_design_capacity_w: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_chilled_water_flow_rate_m3ps: Autosizable,
    },
    CoilHeatingLowTempRadiantConstFlow,
    CoilCoolingLowTempRadiantConstFlow,
    CoilHeatingLowTempRadiantVarFlow {
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_hot_water_flow_m3ps: Autosizable,
    },
    CoilCoolingLowTempRadiantVarFlow {
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_cold_water_flow_m3ps: Autosizable,
    },
    CoilCoolingCooledBeam {
        coil_surface_area_per_coil_length_m2_per_m: f64,
    },
    CoilCoolingFourPipeBeam {
        beam_rated_cooling_capacity_per_length_w_per_m: f64,
    },
    CoilHeatingFourPipeBeam {
        beam_rated_heating_capacity_per_length_w_per_m: f64,
    },
    CoilHeatingWater {
        #[cfg_attr(feature = "serde", serde(default))]
        u_factor_times_area_w_per_k: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        maximum_water_flow_rate_m3ps: Autosizable,
    },
    CoilCoolingWater {
        #[cfg_attr(feature = "serde", serde(default))]
        design_water_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        design_air_flow_rate_m3ps: Autosizable,
    },
    ChillerElectricEir {
        #[cfg_attr(feature = "serde", serde(default))]
        reference_capacity_w: Autosizable,
        reference_cop: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        reference_chilled_water_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        reference_condenser_fluid_flow_rate_m3ps: Autosizable,
    },
    ChillerElectricAshrae205 {
        representation_file: String,
        #[cfg_attr(feature = "serde", serde(default))]
        rated_capacity_w: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        chilled_water_maximum_requested_flow_rate_m3ps: Autosizable,
    },
    HeatExchangerFluidToFluid {
        #[cfg_attr(feature = "serde", serde(default))]
        control_type: HxControlType,
        #[cfg_attr(feature = "serde", serde(default))]
        loop_supply_side_design_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        loop_demand_side_design_flow_rate_m3ps: Autosizable,
    },
    WaterHeaterMixed {
        #[cfg_attr(feature = "serde", serde(default))]
        tank_volume_m3: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        heater_maximum_capacity_w: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        use_side_design_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        source_side_design_flow_rate_m3ps: Autosizable,
    },
    WaterHeaterStratified {
        #[cfg_attr(feature = "serde", serde(default))]
        tank_volume_m3: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        heater1_capacity_w: Autosizable,
        heater2_capacity_w: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        use_side_design_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        source_side_design_flow_rate_m3ps: Autosizable,
    },
    HeatPumpWaterToWaterEquationFitHeating {
        #[cfg_attr(feature = "serde", serde(default))]
        reference_load_side_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        reference_source_side_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        reference_heating_capacity_w: Autosizable,
    },
    HeatPumpWaterToWaterEquationFitCooling {
        #[cfg_attr(feature = "serde", serde(default))]
        reference_load_side_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        reference_source_side_flow_rate_m3ps: Autosizable,
        #[cfg_attr(feature = "serde", serde(default))]
        reference_cooling_capacity_w: Autosizable,
    },
    /// Supply passage serves the cooling loop, demand the source loop,
    /// tertiary the heating loop.
    CentralHeatPumpSystem {
        control_method: String,
        ancillary_power_w: f64,
    },
    ZoneHvacBaseboardConvectiveWater,
    ZoneHvacBaseboardRadiantConvectiveWater {
        fraction_radiant: f64,
    },
    ZoneHvacCoolingPanelRadiantConvectiveWater {
        fraction_radiant: f64,
    },
    ZoneHvacLowTempRadiantConstFlow {
        #[cfg_attr(feature = "serde", serde(default))]
        rated_flow_rate_m3ps: Autosizable,
    },
    ZoneHvacLowTempRadiantVarFlow,
    AirTerminalCooledBeam {
        cooled_beam_type: String,
        #[cfg_attr(feature = "serde", serde(default))]
        supply_air_volumetric_flow_rate_m3ps: Autosizable,
    },
    AirTerminalFourPipeBeam {
        #[cfg_attr(feature = "serde", serde(default))]
        design_primary_air_volume_flow_rate_m3ps: Autosizable,
    },
    GeneratorMicroTurbine {
        reference_electrical_power_output_w: f64,
    },
    WaterHeaterHeatPump {
        #[cfg_attr(feature = "serde", serde(default))]
        condenser_water_flow_rate_m3ps: Autosizable,
    },
}

impl ComponentKind {
    /// Human-readable type label, also used for default object names.
    pub fn label(&self) -> &'static str {
        use ComponentKind::*;
        match self {
            PumpVariableSpeed { .. } => "Pump Variable Speed",
            PumpConstantSpeed { .. } => "Pump Constant Speed",
            BoilerHotWater { .. } => "Boiler Hot Water",
            DistrictHeating { .. } => "District Heating",
            DistrictCooling { .. } => "District Cooling",
            CoolingTowerSingleSpeed { .. } => "Cooling Tower Single Speed",
            PipeAdiabatic => "Pipe Adiabatic",
            GroundHeatExchangerVertical { .. } => "Ground Heat Exchanger Vertical",
            SolarCollectorFlatPlateWater { .. } => "Solar Collector Flat Plate Water",
            TemperatureSource { .. } => "Plant Component Temperature Source",
            GeneratorMicroTurbineHeatRecovery { .. } => "Generator Micro Turbine Heat Recovery",
            CoilHeatingWaterBaseboard { .. } => "Coil Heating Water Baseboard",
            CoilHeatingWaterBaseboardRadiant { .. } => "Coil Heating Water Baseboard Radiant",
            CoilCoolingWaterPanelRadiant { .. } => "Coil Cooling Water Panel Radiant",
            CoilHeatingLowTempRadiantConstFlow => "Coil Heating Low Temp Radiant Const Flow",
            CoilCoolingLowTempRadiantConstFlow => "Coil Cooling Low Temp Radiant Const Flow",
            CoilHeatingLowTempRadiantVarFlow { .. } => "Coil Heating Low Temp Radiant Var Flow",
            CoilCoolingLowTempRadiantVarFlow { .. } => "Coil Cooling Low Temp Radiant Var Flow",
            CoilCoolingCooledBeam { .. } => "Coil Cooling Cooled Beam",
            CoilCoolingFourPipeBeam { .. } => "Coil Cooling Four Pipe Beam",
            CoilHeatingFourPipeBeam { .. } => "Coil Heating Four Pipe Beam",
            CoilHeatingWater { .. } => "Coil Heating Water",
            CoilCoolingWater { .. } => "Coil Cooling Water",
            ChillerElectricEir { .. } => "Chiller Electric EIR",
            ChillerElectricAshrae205 { .. } => "Chiller Electric ASHRAE205",
            HeatExchangerFluidToFluid { .. } => "Heat Exchanger Fluid To Fluid",
            WaterHeaterMixed { .. } => "Water Heater Mixed",
            WaterHeaterStratified { .. } => "Water Heater Stratified",
            HeatPumpWaterToWaterEquationFitHeating { .. } => "Heat Pump Water To Water Heating",
            HeatPumpWaterToWaterEquationFitCooling { .. } => "Heat Pump Water To Water Cooling",
            CentralHeatPumpSystem { .. } => "Central Heat Pump System",
            ZoneHvacBaseboardConvectiveWater => "Zone HVAC Baseboard Convective Water",
            ZoneHvacBaseboardRadiantConvectiveWater { .. } => {
                "Zone HVAC Baseboard Radiant Convective Water"
            }
            ZoneHvacCoolingPanelRadiantConvectiveWater { .. } => {
                "Zone HVAC Cooling Panel Radiant Convective Water"
            }
            ZoneHvacLowTempRadiantConstFlow { .. } => "Zone HVAC Low Temp Radiant Const Flow",
            ZoneHvacLowTempRadiantVarFlow => "Zone HVAC Low Temp Radiant Var Flow",
            AirTerminalCooledBeam { .. } => "Air Terminal Single Duct Constant Volume Cooled Beam",
            AirTerminalFourPipeBeam { .. } => {
                "Air Terminal Single Duct Constant Volume Four Pipe Beam"
            }
            GeneratorMicroTurbine { .. } => "Generator Micro Turbine",
            WaterHeaterHeatPump { .. } => "Water Heater Heat Pump",
        }
    }

    pub fn port_layout(&self) -> PortLayout {
        use ComponentKind::*;
        match self {
            CoilHeatingWater { .. } | CoilCoolingWater { .. } => PortLayout::WaterToAir,
            ChillerElectricEir { .. } | CentralHeatPumpSystem { .. } => {
                PortLayout::WaterToWater { tertiary: true }
            }
            HeatExchangerFluidToFluid { .. }
            | WaterHeaterMixed { .. }
            | WaterHeaterStratified { .. }
            | HeatPumpWaterToWaterEquationFitHeating { .. }
            | HeatPumpWaterToWaterEquationFitCooling { .. } => {
                PortLayout::WaterToWater { tertiary: false }
            }
            ChillerElectricAshrae205 { .. } => PortLayout::Multi(ASHRAE205_PASSAGES),
            ZoneHvacBaseboardConvectiveWater
            | ZoneHvacBaseboardRadiantConvectiveWater { .. }
            | ZoneHvacCoolingPanelRadiantConvectiveWater { .. }
            | ZoneHvacLowTempRadiantConstFlow { .. }
            | ZoneHvacLowTempRadiantVarFlow
            | AirTerminalCooledBeam { .. }
            | AirTerminalFourPipeBeam { .. }
            | GeneratorMicroTurbine { .. }
            | WaterHeaterHeatPump { .. } => PortLayout::None,
            _ => PortLayout::Straight,
        }
    }

    /// Whether `child` may be placed inside a component of this kind.
    pub fn accepts_child(&self, child: &ComponentKind) -> bool {
        use ComponentKind::*;
        match self {
            ZoneHvacBaseboardConvectiveWater => matches!(child, CoilHeatingWaterBaseboard { .. }),
            ZoneHvacBaseboardRadiantConvectiveWater { .. } => {
                matches!(child, CoilHeatingWaterBaseboardRadiant { .. })
            }
            ZoneHvacCoolingPanelRadiantConvectiveWater { .. } => {
                matches!(child, CoilCoolingWaterPanelRadiant { .. })
            }
            ZoneHvacLowTempRadiantConstFlow { .. } => matches!(
                child,
                CoilHeatingLowTempRadiantConstFlow | CoilCoolingLowTempRadiantConstFlow
            ),
            ZoneHvacLowTempRadiantVarFlow => matches!(
                child,
                CoilHeatingLowTempRadiantVarFlow { .. } | CoilCoolingLowTempRadiantVarFlow { .. }
            ),
            AirTerminalCooledBeam { .. } => matches!(child, CoilCoolingCooledBeam { .. }),
            AirTerminalFourPipeBeam { .. } => matches!(
                child,
                CoilCoolingFourPipeBeam { .. } | CoilHeatingFourPipeBeam { .. }
            ),
            GeneratorMicroTurbine { .. } => {
                matches!(child, GeneratorMicroTurbineHeatRecovery { .. })
            }
            WaterHeaterHeatPump { .. } => {
                matches!(child, WaterHeaterMixed { .. } | WaterHeaterStratified { .. })
            }
            _ => false,
        }
    }

    pub fn is_water_heater(&self) -> bool {
        matches!(
            self,
            ComponentKind::WaterHeaterMixed { .. } | ComponentKind::WaterHeaterStratified { .. }
        )
    }
}

/// A component instance in the model arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub ports: Ports,
    /// Zone equipment, air terminal, generator or heat-pump water heater
    /// this component is a part of.
    pub container: Option<ObjectId>,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        let ports = Ports::for_layout(kind.port_layout());
        Self {
            kind,
            ports,
            container: None,
        }
    }

    pub fn passage(&self, role: PassageRole) -> Option<&Passage> {
        self.ports.passage(role)
    }
}
