//! Per-observation results of the wetness model.

use serde::Serialize;

use super::Observation;

/// The model's result for one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// The observation this estimate was computed from.
    pub observation: Observation,

    /// Potential condensation of dew over the step, mm.
    ///
    /// Zero when the dew point depression is at or above the critical value,
    /// or when the energy balance is not finite. Negative when the dew point
    /// exceeds the air temperature.
    pub condensation_mm: f64,

    /// Estimated leaf wetness, mm. Never negative.
    pub wetness_mm: f64,

    /// Every intermediate quantity of the computation.
    pub diagnostics: Diagnostics,
}

/// Intermediate quantities of one evaluation.
///
/// Serialized names match the columns of the published diagnostic tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Air temperature, °C.
    #[serde(rename = "AIR_TEMP_C")]
    pub air_temp_c: f64,

    /// Dew point, °C.
    #[serde(rename = "DEWPOINT_C")]
    pub dew_point_c: f64,

    /// Dew point depression, °C.
    #[serde(rename = "DPD")]
    pub dew_point_depression: f64,

    /// Saturation vapor pressure, kPa.
    #[serde(rename = "SVP")]
    pub saturation_vapor_pressure: f64,

    /// Slope of the saturation curve, kPa/°C.
    #[serde(rename = "Slope_kPa")]
    pub slope_kpa: f64,

    /// Slope of the saturation curve, mbar/°C.
    #[serde(rename = "Slope_mbar")]
    pub slope_mbar: f64,

    /// Actual vapor pressure, kPa.
    #[serde(rename = "AVP")]
    pub actual_vapor_pressure: f64,

    /// Scaled wind speed at the reference height.
    #[serde(rename = "Uz")]
    pub reference_wind: f64,

    /// Wind speed at the canopy top.
    #[serde(rename = "Uc")]
    pub canopy_wind: f64,

    #[serde(rename = "Transfer_Coefficient (cm min^-1)")]
    pub transfer_coefficient: f64,

    /// Potential evaporation.
    #[serde(rename = "Ep")]
    pub potential_evaporation: f64,

    #[serde(rename = "E (cm/min)")]
    pub evaporation_rate: f64,

    /// Wind speed across the leaf after the calm-air floor.
    #[serde(rename = "Wind Speed (m/s)")]
    pub leaf_wind: f64,

    #[serde(rename = "Reynolds Number")]
    pub reynolds: f64,

    #[serde(rename = "Nusselt Number")]
    pub nusselt: f64,

    #[serde(rename = "rB (s/m)")]
    pub boundary_resistance: f64,

    /// Long-wave radiative heat transfer coefficient, W/(m²·K).
    #[serde(rename = "hLW")]
    pub long_wave: f64,

    /// Convective heat transfer coefficient, W/(m²·K).
    #[serde(rename = "hH")]
    pub convective: f64,

    #[serde(rename = "Slope_Pa_K")]
    pub slope_pa_per_k: f64,

    /// Evapotranspirative heat transfer coefficient, W/(m²·K).
    #[serde(rename = "hET")]
    pub evapotranspirative: f64,

    #[serde(rename = "Leaf Heat Transfer Coefficient (W/m^2/K)")]
    pub heat_transfer_coefficient: f64,

    /// Sensible heat exchange, W.
    #[serde(rename = "Rhe (J/s)")]
    pub sensible_heat: f64,

    #[serde(rename = "Potential condensation of dew (g/s)")]
    pub condensation_rate: f64,

    #[serde(rename = "Rain Interception (mm)")]
    pub rain_interception_mm: f64,

    #[serde(rename = "Evaporation (mm)")]
    pub evaporation_mm: f64,
}

impl Diagnostics {
    /// Returns `true` when every intermediate quantity is finite.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        [
            self.air_temp_c,
            self.dew_point_c,
            self.dew_point_depression,
            self.saturation_vapor_pressure,
            self.slope_kpa,
            self.slope_mbar,
            self.actual_vapor_pressure,
            self.reference_wind,
            self.canopy_wind,
            self.transfer_coefficient,
            self.potential_evaporation,
            self.evaporation_rate,
            self.leaf_wind,
            self.reynolds,
            self.nusselt,
            self.boundary_resistance,
            self.long_wave,
            self.convective,
            self.slope_pa_per_k,
            self.evapotranspirative,
            self.heat_transfer_coefficient,
            self.sensible_heat,
            self.condensation_rate,
            self.rain_interception_mm,
            self.evaporation_mm,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}
