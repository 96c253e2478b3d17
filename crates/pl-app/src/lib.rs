//! Shared application service layer for plant-loop translation.
//!
//! This crate gives the CLI one interface over project management, model
//! compilation and forward translation.

pub mod error;
pub mod model_compile;
pub mod project_service;
pub mod translate_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use model_compile::{CompiledModel, compile_model, translator_options};
pub use project_service::{
    PlantLoopSummary, get_plant_loop, list_plant_loops, load_project, save_project,
    validate_project,
};
pub use translate_service::{TranslateRequest, TranslateResponse, translate_project, write_idf};
