//! pl-core: stable foundation for the plant-loop translator.
//!
//! Contains:
//! - ids (compact IDs for model objects, graph vertices and emitted records)
//! - units (uom SI types + constructors for loop temperatures)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod units;

pub use error::{PlError, PlResult, ensure_finite};
pub use ids::*;
pub use units::*;
