//! Glycol fluid property records referenced from `PlantLoop`.

use pl_idf::IddObjectType;
use pl_idf::idd::{FluidPropertiesGlycolConcentrationFields, FluidPropertiesNameFields};
use pl_model::FluidType;

use crate::error::TranslateResult;
use crate::session::TranslationSession;
use crate::values::number;

/// Name of the user-defined fluid for a glycol mix, e.g. `PropyleneGlycol_30`.
pub fn glycol_fluid_name(fluid: &FluidType, concentration_percent: u32) -> String {
    format!("{}_{}", fluid.as_str(), concentration_percent)
}

/// Emit the fluid definition for a glycol loop and return its name.
///
/// Loops sharing a glycol mix share one definition.
pub fn translate_glycol(
    session: &mut TranslationSession,
    fluid: &FluidType,
    concentration_percent: u32,
) -> TranslateResult<String> {
    let fluid_name = glycol_fluid_name(fluid, concentration_percent);
    if session
        .find(IddObjectType::FluidPropertiesName, &fluid_name)
        .is_some()
    {
        return Ok(fluid_name);
    }

    let mut glycol = pl_idf::IdfObject::new(IddObjectType::FluidPropertiesGlycolConcentration);
    glycol
        .set_string(FluidPropertiesGlycolConcentrationFields::Name, &fluid_name)
        .set_string(FluidPropertiesGlycolConcentrationFields::GlycolType, fluid.as_str())
        .set_string(
            FluidPropertiesGlycolConcentrationFields::GlycolConcentration,
            number("glycol concentration", f64::from(concentration_percent) / 100.0)?,
        );
    session.push(glycol);

    let mut name = pl_idf::IdfObject::new(IddObjectType::FluidPropertiesName);
    name.set_string(FluidPropertiesNameFields::FluidName, &fluid_name)
        .set_string(FluidPropertiesNameFields::FluidType, "Glycol");
    session.push(name);

    tracing::debug!(fluid = %fluid_name, "emitted glycol definition");
    Ok(fluid_name)
}
