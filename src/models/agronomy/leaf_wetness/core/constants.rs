//! Physical and biological constants of the wetness model.

use serde::{Deserialize, Serialize};

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive, UnitInterval};

use super::ConstantsError;

/// The fixed parameters of the leaf wetness model.
///
/// Units follow the calibration of the model and are deliberately mixed
/// (cm heights, g/cm³ and kg/m³ air densities); each field documents its
/// own. The serialized form uses the configuration keys shown on each field,
/// and any key left out of a configuration file keeps its default.
///
/// # Example
///
/// ```
/// use leaf_wetness::models::agronomy::leaf_wetness::Constants;
///
/// let json = r#"{ "Zc": 120, "critical_DPD": 2.0 }"#;
/// let constants: Constants = serde_json::from_str(json).unwrap();
/// assert_eq!(constants.canopy_height_cm, 120.0);
/// assert_eq!(constants.reference_height_cm, 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Constants {
    /// `Z_reference`: height of the wind measurement, cm.
    #[serde(rename = "Z_reference")]
    pub reference_height_cm: f64,

    /// `Zc`: crop canopy height, cm.
    #[serde(rename = "Zc")]
    pub canopy_height_cm: f64,

    /// `alpha`: wind profile exponent.
    #[serde(rename = "alpha")]
    pub wind_profile_exponent: f64,

    /// `LAI`: leaf area index.
    #[serde(rename = "LAI")]
    pub leaf_area_index: f64,

    /// `Wmax`: maximum water storage on the leaf surface.
    #[serde(rename = "Wmax")]
    pub max_water_storage: f64,

    /// `Wf`: fraction of `Wmax` held on the leaf.
    #[serde(rename = "Wf")]
    pub storage_fraction: f64,

    /// `shape_scale_film_cf`: transfer scale for film water.
    #[serde(rename = "shape_scale_film_cf")]
    pub film_shape_scale: f64,

    /// `shape_scale_drop_cd`: transfer scale for drop water.
    #[serde(rename = "shape_scale_drop_cd")]
    pub drop_shape_scale: f64,

    /// `dimension_of_leaf_m`: characteristic leaf length, m.
    #[serde(rename = "dimension_of_leaf_m")]
    pub leaf_length_m: f64,

    /// `width_of_leaf_m`: leaf width, m.
    #[serde(rename = "width_of_leaf_m")]
    pub leaf_width_m: f64,

    /// `n`: stomata per square meter.
    #[serde(rename = "n")]
    pub stomatal_density_per_m2: f64,

    /// `mean_length_of_pore_l`: stomatal pore depth, m.
    #[serde(rename = "mean_length_of_pore_l")]
    pub pore_length_m: f64,

    /// `diameter_of_pore_d`: stomatal pore diameter, m.
    #[serde(rename = "diameter_of_pore_d")]
    pub pore_diameter_m: f64,

    /// `critical_DPD`: dew point depression at or above which no dew forms, °C.
    #[serde(rename = "critical_DPD")]
    pub critical_dew_point_depression: f64,

    /// `psychr_constant_mbar`: psychrometric constant, mbar/°C.
    #[serde(rename = "psychr_constant_mbar")]
    pub psychrometric_constant_mbar: f64,

    /// `density_of_air_g_cm3`: air density, g/cm³.
    #[serde(rename = "density_of_air_g_cm3")]
    pub air_density_g_cm3: f64,

    /// `specific_heat_of_air_Jg_C`: specific heat of air, J/(g·°C).
    #[serde(rename = "specific_heat_of_air_Jg_C")]
    pub air_specific_heat_j_g_c: f64,

    /// `latent_heat_of_vaporization_J_g`: latent heat of vaporization, J/g.
    #[serde(rename = "latent_heat_of_vaporization_J_g")]
    pub latent_heat_vaporization_j_g: f64,

    /// `kinematic_viscosity_of_air`: m²/s.
    #[serde(rename = "kinematic_viscosity_of_air")]
    pub kinematic_viscosity_m2_s: f64,

    /// `emissivity`: long-wave emissivity of the leaf surface.
    #[serde(rename = "emissivity")]
    pub emissivity: f64,

    /// `stefan_boltzmann_constant`: W/(m²·K⁴).
    #[serde(rename = "stefan_boltzmann_constant")]
    pub stefan_boltzmann: f64,

    /// `density_of_air_kg_m3`: air density, kg/m³.
    #[serde(rename = "density_of_air_kg_m3")]
    pub air_density_kg_m3: f64,

    /// `specific_heat_of_air_J_kg_K`: specific heat of air, J/(kg·K).
    #[serde(rename = "specific_heat_of_air_J_kg_K")]
    pub air_specific_heat_j_kg_k: f64,

    /// `diffusion_coefficient_of_water_vapor_D`: m²/s.
    #[serde(rename = "diffusion_coefficient_of_water_vapor_D")]
    pub vapor_diffusivity_m2_s: f64,

    /// `latent_heat_of_condensation_J_kg`: J/kg.
    #[serde(rename = "latent_heat_of_condensation_J_kg")]
    pub latent_heat_condensation_j_kg: f64,

    /// `psychrometer_constant_Pa_K`: psychrometer constant, Pa/K.
    #[serde(rename = "psychrometer_constant_Pa_K")]
    pub psychrometric_constant_pa_k: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            reference_height_cm: 200.0,
            canopy_height_cm: 150.0,
            wind_profile_exponent: 1.3,
            leaf_area_index: 2.88,
            max_water_storage: 0.5,
            storage_fraction: 0.3,
            film_shape_scale: 1.78577026808484,
            drop_shape_scale: 4.23057517532205,
            leaf_length_m: 0.126563029533657,
            leaf_width_m: 0.12,
            stomatal_density_per_m2: 196232004.0,
            pore_length_m: 0.000025,
            pore_diameter_m: 0.00000623,
            critical_dew_point_depression: 1.845,
            psychrometric_constant_mbar: 0.670680828,
            air_density_g_cm3: 0.001225,
            air_specific_heat_j_g_c: 1.012,
            latent_heat_vaporization_j_g: 2450.0,
            kinematic_viscosity_m2_s: 0.0000156,
            emissivity: 0.99,
            stefan_boltzmann: 5.67037e-08,
            air_density_kg_m3: 1.293,
            air_specific_heat_j_kg_k: 1005.0,
            vapor_diffusivity_m2_s: 0.0000212,
            latent_heat_condensation_j_kg: 2257000.0,
            psychrometric_constant_pa_k: 0.245670633,
        }
    }
}

pub(crate) type Positive = Constrained<f64, StrictlyPositive>;
pub(crate) type Fraction = Constrained<f64, UnitInterval>;

pub(crate) fn positive(name: &'static str, value: f64) -> Result<Positive, ConstantsError> {
    StrictlyPositive::new(value).map_err(|reason| ConstantsError::Invalid { name, reason })
}

pub(crate) fn fraction(name: &'static str, value: f64) -> Result<Fraction, ConstantsError> {
    UnitInterval::new(value).map_err(|reason| ConstantsError::Invalid { name, reason })
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, ConstantsError> {
    NonNegative::new(value)
        .map(Constrained::into_inner)
        .map_err(|reason| ConstantsError::Invalid { name, reason })
}
