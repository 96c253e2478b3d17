// pl-core/src/units.rs

use uom::si::f64::{
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Loop temperatures are typed; flows and capacities stay raw SI f64 fields.
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn delta_k(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

/// Readers returning the value in the unit records are written in.
pub mod read {
    use super::*;

    #[inline]
    pub fn to_degc(t: Temperature) -> f64 {
        use uom::si::thermodynamic_temperature::degree_celsius;
        // Kelvin storage leaves round-off from the 273.15 offset.
        (t.get::<degree_celsius>() * 1e9).round() / 1e9
    }

    #[inline]
    pub fn to_delta_k(dt: TempInterval) -> f64 {
        use uom::si::temperature_interval::kelvin;
        dt.get::<kelvin>()
    }
}
