//! Per-observation leaf wetness pipeline.
//!
//! Each observation flows through four stages that share only the
//! validated [`Parameters`]:
//!
//! 1. [`psychrometrics`]: vapor pressures and the saturation slope
//! 2. [`wind`]: reference, canopy and leaf-level wind speeds
//! 3. [`heat_transfer`]: boundary layer, heat transfer coefficients and
//!    the sensible heat the leaf sheds to reach the dew point
//! 4. [`water_balance`]: dew, intercepted rain, evaporation and the
//!    resulting wetness
//!
//! Rows are independent, so [`evaluate`] is a pure function of the
//! parameters and one observation.

mod constants;
mod error;
mod heat_transfer;
mod observation;
mod psychrometrics;
mod results;
mod water_balance;
mod wind;

pub use constants::Constants;
pub use error::{ConstantsError, DataValidationError, EstimateError, ValidationIssue};
pub use observation::{Field, Observation};
pub use results::{Diagnostics, Estimate};

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{HeatTransfer, TemperatureInterval},
    heat_transfer::watt_per_square_meter_kelvin,
    power::watt,
    temperature_interval::kelvin,
};

use crate::support::units::fahrenheit_to_celsius;

use constants::positive;
use heat_transfer::LeafExchange;
use psychrometrics::VaporPressure;
use water_balance::{
    WaterBalance, condensation_depth, evaporation_depth, leaf_wetness, rain_interception,
};
use wind::WindProfile;

/// Canopy and leaf parameters derived once from validated [`Constants`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Parameters {
    wind: WindProfile,
    exchange: LeafExchange,
    balance: WaterBalance,
}

impl Parameters {
    /// Validates `constants` and derives the parameters every row shares.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstantsError`] naming the first unusable constant, or
    /// describing a degenerate wind profile.
    pub(crate) fn new(constants: &Constants) -> Result<Self, ConstantsError> {
        positive("LAI", constants.leaf_area_index)?;

        let params = Self {
            wind: WindProfile::new(constants)?,
            exchange: LeafExchange::new(constants)?,
            balance: WaterBalance::new(constants)?,
        };

        debug!(
            roughness_length_cm = params.wind.roughness_length,
            displacement_height_cm = params.wind.displacement_height,
            water_storage = params.balance.storage(),
            transfer_scale = params.balance.transfer_scale(),
            leaf_area_m2 = params.exchange.leaf_area().get::<square_meter>(),
            stomatal_resistance = params.exchange.stomatal_resistance(),
            "derived canopy parameters"
        );

        Ok(params)
    }
}

/// Evaluates the wetness model for one observation.
///
/// The observation is expected to have passed [`Observation::validate`];
/// any non-finite intermediate still yields a wetness of zero.
pub(crate) fn evaluate(params: &Parameters, observation: &Observation) -> Estimate {
    let air_temp_c = fahrenheit_to_celsius(observation.air_temp_f);
    let dew_point_c = fahrenheit_to_celsius(observation.dew_point_f);
    let dew_point_depression = air_temp_c - dew_point_c;

    let vapor = VaporPressure::new(air_temp_c, observation.relative_humidity_pct);

    // Evaporation side: canopy wind drives the transfer coefficient.
    let reference_wind = wind::reference_speed(observation.wind_speed_mph);
    let canopy_wind = params.wind.canopy_speed(reference_wind);
    let transfer_coefficient = params.balance.transfer_coefficient(canopy_wind);
    let potential_evaporation = params
        .balance
        .potential_evaporation(&vapor, transfer_coefficient);
    let evaporation_rate = params.balance.evaporation_rate(potential_evaporation);

    // Condensation side: leaf energy balance at the leaf-level wind.
    let leaf_wind = wind::leaf_speed(observation.wind_speed_mph);
    let layer = params.exchange.boundary_layer(leaf_wind);
    let slope_pa_per_k = vapor.slope_pa_per_k();
    let coefficients = params
        .exchange
        .coefficients(air_temp_c, slope_pa_per_k, layer.resistance);
    let heat_transfer_coefficient = coefficients.total();

    let sensible_heat = params.exchange.sensible_heat_exchange(
        heat_transfer_coefficient,
        TemperatureInterval::new::<kelvin>(dew_point_depression),
    );
    let condensation_rate = params.balance.condensation_rate(sensible_heat);

    let leaf_area = params.exchange.leaf_area().get::<square_meter>();
    let condensation_mm = params.balance.dew(
        condensation_depth(condensation_rate, leaf_area),
        dew_point_depression,
    );
    let rain_interception_mm = rain_interception(observation.precip_in);
    let evaporation_mm = evaporation_depth(evaporation_rate);

    let wetness_mm = leaf_wetness(
        observation.air_temp_f,
        condensation_mm,
        rain_interception_mm,
        evaporation_mm,
    );

    Estimate {
        observation: *observation,
        condensation_mm,
        wetness_mm,
        diagnostics: Diagnostics {
            air_temp_c,
            dew_point_c,
            dew_point_depression,
            saturation_vapor_pressure: vapor.saturation,
            slope_kpa: vapor.slope,
            slope_mbar: vapor.slope_mbar(),
            actual_vapor_pressure: vapor.actual,
            reference_wind,
            canopy_wind,
            transfer_coefficient,
            potential_evaporation,
            evaporation_rate,
            leaf_wind,
            reynolds: layer.reynolds,
            nusselt: layer.nusselt,
            boundary_resistance: layer.resistance,
            long_wave: heat_transfer_value(coefficients.long_wave),
            convective: heat_transfer_value(coefficients.convective),
            slope_pa_per_k,
            evapotranspirative: heat_transfer_value(coefficients.evapotranspirative),
            heat_transfer_coefficient: heat_transfer_value(heat_transfer_coefficient),
            sensible_heat: sensible_heat.get::<watt>(),
            condensation_rate,
            rain_interception_mm,
            evaporation_mm,
        },
    }
}

fn heat_transfer_value(value: HeatTransfer) -> f64 {
    value.get::<watt_per_square_meter_kelvin>()
}
