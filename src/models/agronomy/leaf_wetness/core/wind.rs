//! Wind speed at the reference height, in the canopy and across the leaf.

use crate::support::units::mph_to_meters_per_second;

use super::{
    Constants, ConstantsError,
    constants::{non_negative, positive},
};

/// Empirical scale from a 2 m wind in mph to the reference-height wind used
/// by the canopy transfer coefficient.
pub(crate) const REFERENCE_WIND_SCALE: f64 = 2682.4;

/// Leaf-level wind speed substituted for calm or negative readings, m/s.
///
/// Keeps the Reynolds number, and every resistance derived from it, finite.
pub(crate) const CALM_LEAF_WIND: f64 = 0.001;

/// Logarithmic wind profile between the measurement height and the canopy top.
///
/// Displacement height is `D = 0.66·Zc` and roughness length is
/// `Zo = 0.1·Z_reference`. The canopy wind is
///
/// ```text
/// Uc = Uz · ln((Zc − D)/Zo) / ln((Z_reference − D)/Zo) · (1 + α·(1 − Zc)/Z_reference)^-2
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WindProfile {
    /// Roughness length `Zo`, cm.
    pub roughness_length: f64,
    /// Zero plane displacement `D`, cm.
    pub displacement_height: f64,
    /// `ln((Zc − D)/Zo) / ln((Z_reference − D)/Zo)`.
    pub log_ratio: f64,
    /// `(1 + α·(1 − Zc)/Z_reference)^-2`.
    pub correction: f64,
}

impl WindProfile {
    pub(crate) fn new(constants: &Constants) -> Result<Self, ConstantsError> {
        let z_ref = positive("Z_reference", constants.reference_height_cm)?.into_inner();
        let z_c = positive("Zc", constants.canopy_height_cm)?.into_inner();
        let alpha = non_negative("alpha", constants.wind_profile_exponent)?;

        let degenerate = || ConstantsError::WindProfile {
            reference_height: z_ref,
            canopy_height: z_c,
            alpha,
        };

        let roughness_length = z_ref * 0.1;
        let displacement_height = 0.66 * z_c;

        if z_ref - displacement_height <= 0.0 {
            return Err(degenerate());
        }

        let canopy_log = ((z_c - displacement_height) / roughness_length).ln();
        let reference_log = ((z_ref - displacement_height) / roughness_length).ln();
        if reference_log == 0.0 || !canopy_log.is_finite() || !reference_log.is_finite() {
            return Err(degenerate());
        }

        let correction = (1.0 + alpha * ((1.0 - z_c) / z_ref)).powf(-2.0);
        if !correction.is_finite() {
            return Err(degenerate());
        }

        Ok(Self {
            roughness_length,
            displacement_height,
            log_ratio: canopy_log / reference_log,
            correction,
        })
    }

    /// Wind speed at the canopy top, in the model's reference-wind units.
    pub(crate) fn canopy_speed(&self, reference_speed: f64) -> f64 {
        reference_speed * self.log_ratio * self.correction
    }
}

/// Scaled reference-height wind speed from the 2 m reading in mph.
///
/// Negative readings are treated as calm.
pub(crate) fn reference_speed(wind_speed_mph: f64) -> f64 {
    REFERENCE_WIND_SCALE * wind_speed_mph.max(0.0)
}

/// Wind speed across the leaf, m/s, floored at [`CALM_LEAF_WIND`].
pub(crate) fn leaf_speed(wind_speed_mph: f64) -> f64 {
    if wind_speed_mph > 0.0 {
        mph_to_meters_per_second(wind_speed_mph)
    } else {
        CALM_LEAF_WIND
    }
}
