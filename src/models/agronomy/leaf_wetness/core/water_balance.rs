//! Water gained and lost by the leaf over one time step.
//!
//! Dew and intercepted rain add water; evaporation driven by the canopy
//! transfer coefficient removes it. All depths are per 15-minute step, mm.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{AvailableEnergy, MassRate, Power},
    mass_rate::kilogram_per_second,
};

use super::{
    Constants, ConstantsError,
    constants::{Positive, fraction, non_negative, positive},
    psychrometrics::VaporPressure,
};

/// Intercepted depth whenever any precipitation is reported, mm.
pub(crate) const RAIN_INTERCEPTION_MM: f64 = 0.6;

/// At or below this air temperature no liquid wetness accrues, °F.
pub(crate) const FREEZING_POINT_F: f64 = 32.0;

/// Storage, transfer and latent heat parameters of the water balance.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WaterBalance {
    /// Water held on the leaf, `W = Wmax·Wf`.
    storage: f64,
    /// Transfer scale `c`, blended from the film and drop shape scales by `Wmax`.
    transfer_scale: f64,
    psychrometric_constant: Positive,
    air_density: Positive,
    air_specific_heat: Positive,
    latent_heat_vaporization: Positive,
    latent_heat_condensation: AvailableEnergy,
    critical_depression: Positive,
}

impl WaterBalance {
    pub(crate) fn new(constants: &Constants) -> Result<Self, ConstantsError> {
        let max_storage = fraction("Wmax", constants.max_water_storage)?.into_inner();
        let storage_fraction = fraction("Wf", constants.storage_fraction)?.into_inner();
        let film = non_negative("shape_scale_film_cf", constants.film_shape_scale)?;
        let drop = non_negative("shape_scale_drop_cd", constants.drop_shape_scale)?;

        let latent_heat_condensation = positive(
            "latent_heat_of_condensation_J_kg",
            constants.latent_heat_condensation_j_kg,
        )?;

        Ok(Self {
            storage: max_storage * storage_fraction,
            transfer_scale: (max_storage * film) + ((1.0 - max_storage) * drop),
            psychrometric_constant: positive(
                "psychr_constant_mbar",
                constants.psychrometric_constant_mbar,
            )?,
            air_density: positive("density_of_air_g_cm3", constants.air_density_g_cm3)?,
            air_specific_heat: positive(
                "specific_heat_of_air_Jg_C",
                constants.air_specific_heat_j_g_c,
            )?,
            latent_heat_vaporization: positive(
                "latent_heat_of_vaporization_J_g",
                constants.latent_heat_vaporization_j_g,
            )?,
            latent_heat_condensation: AvailableEnergy::new::<joule_per_kilogram>(
                latent_heat_condensation.into_inner(),
            ),
            critical_depression: positive(
                "critical_DPD",
                constants.critical_dew_point_depression,
            )?,
        })
    }

    pub(crate) fn storage(&self) -> f64 {
        self.storage
    }

    pub(crate) fn transfer_scale(&self) -> f64 {
        self.transfer_scale
    }

    /// Canopy transfer coefficient, cm/min.
    pub(crate) fn transfer_coefficient(&self, canopy_wind: f64) -> f64 {
        self.transfer_scale * canopy_wind.sqrt()
    }

    /// Potential evaporation `Ep` driven by the vapor pressure deficit.
    pub(crate) fn potential_evaporation(&self, vapor: &VaporPressure, transfer: f64) -> f64 {
        let slope = vapor.slope_mbar();
        let gamma = self.psychrometric_constant.get();
        (slope / (self.latent_heat_vaporization.get() * (slope + gamma)))
            * (self.air_density.get() * self.air_specific_heat.get() * (transfer / slope))
            * (vapor.deficit() * 10.0)
    }

    /// Evaporation rate from the stored leaf water, cm/min.
    pub(crate) fn evaporation_rate(&self, potential: f64) -> f64 {
        potential * self.storage
    }

    /// Dew condensation rate for a sensible heat exchange, g/s.
    pub(crate) fn condensation_rate(&self, heat: Power) -> f64 {
        let rate: MassRate = heat / self.latent_heat_condensation;
        rate.get::<kilogram_per_second>() * 1000.0
    }

    /// Dew depth accumulated over a step when the dew point depression
    /// allows condensation, zero otherwise.
    ///
    /// A non-finite depth, reachable only when an extreme temperature
    /// overflows the energy balance, also reports zero.
    pub(crate) fn dew(&self, condensation_mm: f64, dew_point_depression: f64) -> f64 {
        if dew_point_depression < self.critical_depression.get() && condensation_mm.is_finite() {
            condensation_mm
        } else {
            0.0
        }
    }
}

/// Converts a per-leaf condensation rate in g/s to an accumulated depth, mm.
///
/// `leaf_area_m2 · 10000` is the leaf area in cm². The `10·60·15·2` factor is
/// the model's calibrated scaling to a 15-minute step.
pub(crate) fn condensation_depth(rate_g_s: f64, leaf_area_m2: f64) -> f64 {
    (rate_g_s / (leaf_area_m2 * 10000.0)) * 10.0 * 60.0 * 15.0 * 2.0
}

/// Intercepted rain, mm. Any positive precipitation intercepts a fixed depth.
pub(crate) fn rain_interception(precip_in: f64) -> f64 {
    if precip_in > 0.0 {
        RAIN_INTERCEPTION_MM
    } else {
        0.0
    }
}

/// Evaporated depth over a 15-minute step from a rate in cm/min, mm.
pub(crate) fn evaporation_depth(rate_cm_min: f64) -> f64 {
    rate_cm_min * 10.0 * 15.0
}

/// Net leaf wetness, mm.
///
/// Zero at or below freezing; never negative. A `NaN` balance also maps to
/// zero.
pub(crate) fn leaf_wetness(
    air_temp_f: f64,
    dew_mm: f64,
    rain_mm: f64,
    evaporation_mm: f64,
) -> f64 {
    let balance = if air_temp_f > FREEZING_POINT_F {
        (dew_mm + rain_mm) - evaporation_mm
    } else {
        0.0
    };

    if balance > 0.0 { balance } else { 0.0 }
}
