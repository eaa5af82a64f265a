//! Raw weather-station observations.

use std::fmt;

use tracing::warn;
use uom::si::{
    f64::{Length, Ratio},
    length::inch,
    ratio::percent,
};

use crate::support::constraint::{NonNegative, UnitInterval};

use super::{DataValidationError, ValidationIssue};

/// One time step of weather data, in the units the station reports.
///
/// Values are kept exactly as received so output records echo the input
/// without conversion round-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Air temperature, °F.
    pub air_temp_f: f64,
    /// Dew point temperature, °F.
    pub dew_point_f: f64,
    /// Wind speed at 2 m, mph.
    pub wind_speed_mph: f64,
    /// Relative humidity, %.
    pub relative_humidity_pct: f64,
    /// Precipitation over the time step, inches.
    pub precip_in: f64,
}

/// The raw input fields, named by their wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AirTemperature,
    DewPoint,
    WindSpeed,
    RelativeHumidity,
    Precipitation,
}

impl Field {
    /// All required input fields, in record order.
    pub const ALL: [Field; 5] = [
        Field::AirTemperature,
        Field::DewPoint,
        Field::WindSpeed,
        Field::RelativeHumidity,
        Field::Precipitation,
    ];

    /// The exact key used for this field in input and output records.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Field::AirTemperature => "AIR_TEMP_F",
            Field::DewPoint => "DEWPOINT_F",
            Field::WindSpeed => "WIND_SPEED_2M_MPH",
            Field::RelativeHumidity => "RELATIVE_HUMIDITY_%",
            Field::Precipitation => "PRECIP_INCHES",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Observation {
    /// Builds an observation from values in [`Field::ALL`] order.
    #[must_use]
    pub fn from_fields(values: [f64; 5]) -> Self {
        let [air_temp_f, dew_point_f, wind_speed_mph, relative_humidity_pct, precip_in] = values;
        Self {
            air_temp_f,
            dew_point_f,
            wind_speed_mph,
            relative_humidity_pct,
            precip_in,
        }
    }

    /// Returns the raw value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::AirTemperature => self.air_temp_f,
            Field::DewPoint => self.dew_point_f,
            Field::WindSpeed => self.wind_speed_mph,
            Field::RelativeHumidity => self.relative_humidity_pct,
            Field::Precipitation => self.precip_in,
        }
    }

    /// Checks that every field is a finite number.
    ///
    /// Values outside their physical range (humidity above 100 %, negative
    /// precipitation or wind) are accepted and logged; the pipeline has a
    /// defined result for each of them.
    ///
    /// # Errors
    ///
    /// Returns a [`DataValidationError`] naming `row` and the first
    /// non-finite field.
    pub fn validate(&self, row: usize) -> Result<(), DataValidationError> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|&field| !self.value(field).is_finite())
        {
            return Err(DataValidationError::field(
                row,
                field,
                ValidationIssue::NotFinite,
            ));
        }

        let humidity = Ratio::new::<percent>(self.relative_humidity_pct);
        if let Err(reason) = UnitInterval::new(humidity) {
            warn!(
                row,
                humidity = self.relative_humidity_pct,
                %reason,
                "relative humidity outside 0-100 %"
            );
        }
        if let Err(reason) = NonNegative::new(Length::new::<inch>(self.precip_in)) {
            warn!(
                row,
                precip = self.precip_in,
                %reason,
                "negative precipitation, no rain interception"
            );
        }
        if let Err(reason) = NonNegative::new(self.wind_speed_mph) {
            warn!(
                row,
                wind = self.wind_speed_mph,
                %reason,
                "negative wind speed treated as calm"
            );
        }

        Ok(())
    }
}
