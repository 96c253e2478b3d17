//! pl-model: in-memory HVAC object model for plant-loop translation.
//!
//! Provides:
//! - `Model`, an arena of named objects with a wiring API that mirrors how
//!   equipment is placed on loops (branches, nodes, containers)
//! - component kinds with their hydraulic passages
//! - plant loop data (fluid, limits, sizing, attached operation schemes)
//! - `TopologyIndex`, the per-side graphs used to cut loops into branches
//!
//! # Example
//!
//! ```
//! use pl_model::{Autosizable, ComponentKind, Model, TopologyIndex};
//!
//! let mut model = Model::new();
//! let hw = model.add_plant_loop("Hot Water Loop");
//! let boiler = model.add_component(
//!     "Boiler",
//!     ComponentKind::BoilerHotWater {
//!         nominal_capacity_w: Autosizable::Autosize,
//!         nominal_thermal_efficiency: 0.8,
//!         design_water_flow_rate_m3ps: Autosizable::Autosize,
//!         fuel_type: "NaturalGas".into(),
//!     },
//! );
//! model.add_supply_branch_for_component(hw, boiler).unwrap();
//!
//! let index = TopologyIndex::build(&model).unwrap();
//! assert_eq!(index.get(hw).unwrap().supply.branch_runs().len(), 1);
//! ```

pub mod component;
pub mod error;
pub mod model;
pub mod object;
pub mod plant_loop;
pub mod topology;

pub use component::{
    Autosizable, Component, ComponentKind, HxControlType, Passage, PassageRole, PortLayout, Ports,
};
pub use error::{ModelError, ModelResult};
pub use model::{ALWAYS_ON_DISCRETE, Model, PortRef, PortSlot};
pub use object::{
    LoadRange, Mixer, ModelObject, ObjectKind, OperationScheme, Schedule, ScheduleTypeLimits,
    SetpointManager, Splitter,
};
pub use plant_loop::{
    CommonPipeSimulation, FluidType, LoadDistributionScheme, LoopSide, PlantLoop,
    SchemeAssignment, SideAnchors, SizingLoopType, SizingPlant,
};
pub use topology::{LoopTopology, SideTopology, TopologyIndex};
