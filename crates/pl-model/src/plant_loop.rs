//! Plant loop data: fluid, temperature limits, sizing and side anchors.

use pl_core::{ObjectId, TempInterval, Temperature, degc, delta_k};

use crate::component::Autosizable;

/// Which half of a loop an object sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopSide {
    Supply,
    Demand,
}

impl LoopSide {
    pub fn label(self) -> &'static str {
        match self {
            LoopSide::Supply => "Supply",
            LoopSide::Demand => "Demand",
        }
    }
}

/// The four structural objects bounding one side of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideAnchors {
    pub inlet_node: ObjectId,
    pub splitter: ObjectId,
    pub mixer: ObjectId,
    pub outlet_node: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FluidType {
    #[default]
    Water,
    Steam,
    PropyleneGlycol,
    EthyleneGlycol,
}

impl FluidType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FluidType::Water => "Water",
            FluidType::Steam => "Steam",
            FluidType::PropyleneGlycol => "PropyleneGlycol",
            FluidType::EthyleneGlycol => "EthyleneGlycol",
        }
    }

    pub fn is_glycol(&self) -> bool {
        matches!(self, FluidType::PropyleneGlycol | FluidType::EthyleneGlycol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadDistributionScheme {
    #[default]
    Optimal,
    SequentialLoad,
    UniformLoad,
    UniformPLR,
    SequentialUniformPLR,
}

impl LoadDistributionScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadDistributionScheme::Optimal => "Optimal",
            LoadDistributionScheme::SequentialLoad => "SequentialLoad",
            LoadDistributionScheme::UniformLoad => "UniformLoad",
            LoadDistributionScheme::UniformPLR => "UniformPLR",
            LoadDistributionScheme::SequentialUniformPLR => "SequentialUniformPLR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommonPipeSimulation {
    None,
    CommonPipe,
    TwoWayCommonPipe,
}

impl CommonPipeSimulation {
    pub fn as_str(self) -> &'static str {
        match self {
            CommonPipeSimulation::None => "None",
            CommonPipeSimulation::CommonPipe => "CommonPipe",
            CommonPipeSimulation::TwoWayCommonPipe => "TwoWayCommonPipe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingLoopType {
    #[default]
    Heating,
    Cooling,
    Condenser,
    Steam,
}

impl SizingLoopType {
    pub fn as_str(self) -> &'static str {
        match self {
            SizingLoopType::Heating => "Heating",
            SizingLoopType::Cooling => "Cooling",
            SizingLoopType::Condenser => "Condenser",
            SizingLoopType::Steam => "Steam",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingPlant {
    pub loop_type: SizingLoopType,
    pub design_loop_exit_temperature: Temperature,
    pub loop_design_temperature_difference: TempInterval,
}

impl Default for SizingPlant {
    fn default() -> Self {
        Self {
            loop_type: SizingLoopType::Heating,
            design_loop_exit_temperature: degc(82.0),
            loop_design_temperature_difference: delta_k(11.0),
        }
    }
}

/// A user scheme attached to a loop, with an optional availability schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeAssignment {
    pub scheme: ObjectId,
    pub schedule: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantLoop {
    pub fluid_type: FluidType,
    /// Percent by volume; only used for glycol fluids.
    pub glycol_concentration: u32,
    /// Defaults to the supply outlet node when unset.
    pub loop_temperature_setpoint_node: Option<ObjectId>,
    pub maximum_loop_temperature: Option<Temperature>,
    pub minimum_loop_temperature: Option<Temperature>,
    pub maximum_loop_flow_rate_m3ps: Autosizable,
    pub minimum_loop_flow_rate_m3ps: Autosizable,
    /// `None` autocalculates.
    pub plant_loop_volume_m3: Option<f64>,
    pub load_distribution_scheme: LoadDistributionScheme,
    pub common_pipe_simulation: Option<CommonPipeSimulation>,
    pub sizing: SizingPlant,
    pub supply: SideAnchors,
    pub demand: SideAnchors,
    pub cooling_load_scheme: Option<SchemeAssignment>,
    pub heating_load_scheme: Option<SchemeAssignment>,
    pub primary_scheme: Option<SchemeAssignment>,
    pub component_setpoint_scheme_schedule: Option<ObjectId>,
}

impl PlantLoop {
    pub(crate) fn new(supply: SideAnchors, demand: SideAnchors) -> Self {
        Self {
            fluid_type: FluidType::Water,
            glycol_concentration: 0,
            loop_temperature_setpoint_node: None,
            maximum_loop_temperature: None,
            minimum_loop_temperature: None,
            maximum_loop_flow_rate_m3ps: Autosizable::Autosize,
            minimum_loop_flow_rate_m3ps: Autosizable::Value(0.0),
            plant_loop_volume_m3: None,
            load_distribution_scheme: LoadDistributionScheme::Optimal,
            common_pipe_simulation: None,
            sizing: SizingPlant::default(),
            supply,
            demand,
            cooling_load_scheme: None,
            heating_load_scheme: None,
            primary_scheme: None,
            component_setpoint_scheme_schedule: None,
        }
    }

    pub fn anchors(&self, side: LoopSide) -> &SideAnchors {
        match side {
            LoopSide::Supply => &self.supply,
            LoopSide::Demand => &self.demand,
        }
    }

    pub fn setpoint_node(&self) -> ObjectId {
        self.loop_temperature_setpoint_node
            .unwrap_or(self.supply.outlet_node)
    }

    pub fn has_user_schemes(&self) -> bool {
        self.cooling_load_scheme.is_some()
            || self.heating_load_scheme.is_some()
            || self.primary_scheme.is_some()
    }
}
