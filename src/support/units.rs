//! Unit conversions for weather-station inputs.
//!
//! Stations in the input feed report U.S. customary units (°F, mph, inches).
//! The wetness model works in °C, kelvin and m/s.
//!
//! The °F to °C conversion is written out as `(F − 32)·5/9` rather than
//! routed through [`uom`]'s kelvin base unit. The two differ in the last few
//! bits, and the dew point depression is compared against a hard cutoff, so
//! the model's calibrated arithmetic is kept exactly. Velocity and the
//! kelvin offset go through [`uom`].
//!
//! ```
//! use leaf_wetness::support::units::fahrenheit_to_celsius;
//!
//! let depression = fahrenheit_to_celsius(40.0) - fahrenheit_to_celsius(36.679);
//! assert!(depression < 1.845);
//! ```

use uom::si::{
    f64::{ThermodynamicTemperature, Velocity},
    thermodynamic_temperature::{degree_celsius, kelvin},
    velocity::{meter_per_second, mile_per_hour},
};

/// Converts a station temperature reported in °F to °C.
#[must_use]
pub fn fahrenheit_to_celsius(degrees: f64) -> f64 {
    (degrees - 32.0) * 5.0 / 9.0
}

/// Converts a °C reading to kelvin.
#[must_use]
pub fn celsius_to_kelvin(degrees: f64) -> f64 {
    ThermodynamicTemperature::new::<degree_celsius>(degrees).get::<kelvin>()
}

/// Converts a wind speed reported in mph to m/s.
#[must_use]
pub fn mph_to_meters_per_second(speed: f64) -> f64 {
    Velocity::new::<mile_per_hour>(speed).get::<meter_per_second>()
}
