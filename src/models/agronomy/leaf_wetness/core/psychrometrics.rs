//! Vapor pressure of the air above the canopy.
//!
//! Saturation vapor pressure uses the Tetens form with the FAO-56
//! coefficients, `es = 0.6108·exp(17.27·T / (T + 237.3))` with `T` in °C
//! and `es` in kPa.

/// Vapor pressure state of one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VaporPressure {
    /// Saturation vapor pressure, kPa.
    pub saturation: f64,
    /// Actual vapor pressure, kPa.
    pub actual: f64,
    /// Slope of the saturation curve, kPa/°C.
    pub slope: f64,
}

impl VaporPressure {
    /// Evaluates the vapor pressure state at `air_temp_c` and `relative_humidity_pct`.
    pub(crate) fn new(air_temp_c: f64, relative_humidity_pct: f64) -> Self {
        let saturation = saturation_vapor_pressure(air_temp_c);
        Self {
            saturation,
            actual: saturation * (relative_humidity_pct / 100.0),
            slope: saturation_slope(saturation, air_temp_c),
        }
    }

    /// Slope of the saturation curve, mbar/°C.
    pub(crate) fn slope_mbar(&self) -> f64 {
        self.slope * 10.0
    }

    /// Slope of the saturation curve as used by the leaf energy balance, Pa/K.
    ///
    /// The kPa slope is scaled by 1000/273, matching the calibration of the
    /// evapotranspirative heat transfer coefficient.
    pub(crate) fn slope_pa_per_k(&self) -> f64 {
        (self.slope * 1000.0) / 273.0
    }

    /// Vapor pressure deficit, kPa.
    pub(crate) fn deficit(&self) -> f64 {
        self.saturation - self.actual
    }
}

/// Saturation vapor pressure over water, kPa.
pub(crate) fn saturation_vapor_pressure(air_temp_c: f64) -> f64 {
    0.6108 * ((17.27 * air_temp_c) / (air_temp_c + 237.3)).exp()
}

/// Slope of the saturation vapor pressure curve, kPa/°C.
pub(crate) fn saturation_slope(saturation: f64, air_temp_c: f64) -> f64 {
    (4098.0 * saturation) / (air_temp_c + 237.3).powi(2)
}
