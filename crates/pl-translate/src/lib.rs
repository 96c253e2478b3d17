//! pl-translate: forward translation of plant loops into IDF records.
//!
//! Provides:
//! - `ForwardTranslator`, turning a `pl_model::Model` into a `pl_idf::Workspace`
//! - `translate_object`, the memoized per-object dispatcher
//! - `populate_branch`, which lists the equipment of one loop run on a branch
//! - the `BranchParticipant` trait that picks the node pair an object
//!   contributes to a given loop
//! - operation scheme construction and the heating/cooling classification
//!   it relies on
//!
//! # Example
//!
//! ```
//! use pl_model::{Autosizable, ComponentKind, Model};
//! use pl_translate::ForwardTranslator;
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
//! let idf = ForwardTranslator::default().translate_to_string(&model).unwrap();
//! assert!(idf.contains("Hot Water Loop Supply Branch 1"));
//! ```

pub mod branch;
pub mod classify;
mod components;
pub mod context;
pub mod error;
pub mod fluid;
pub mod objects;
pub mod operation_schemes;
pub mod participant;
mod plant_loop;
pub mod session;
pub mod translator;
mod values;

pub use branch::populate_branch;
pub use classify::ComponentType;
pub use context::{TranslateContext, TranslatorOptions};
pub use error::{TranslateError, TranslateResult};
pub use objects::translate_object;
pub use operation_schemes::translate_plant_equipment_operation_schemes;
pub use participant::{BranchContext, BranchParticipant};
pub use session::TranslationSession;
pub use translator::ForwardTranslator;
