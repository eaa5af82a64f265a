//! Leaf energy balance: boundary layer and heat transfer coefficients.
//!
//! The leaf exchanges heat with the air through three parallel paths:
//! long-wave radiation (`hLW`), convection across the boundary layer (`hH`)
//! and latent heat through the stomata (`hET`). Their sum, multiplied by
//! the leaf area and the dew point depression, is the sensible heat the leaf
//! must shed to cool to the dew point.

use std::f64::consts::PI;

use uom::si::{
    f64::{Area, HeatTransfer, Length, Power, TemperatureInterval},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
};

use crate::support::units::celsius_to_kelvin;

use super::{
    Constants, ConstantsError,
    constants::{Fraction, Positive, fraction, positive},
};

/// Thermal diffusivity of air used by the boundary-layer resistance, m²/s.
const THERMAL_DIFFUSIVITY_OF_AIR: f64 = 0.0000215;

/// Leaf geometry and air properties shared by every observation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LeafExchange {
    leaf_length: Positive,
    leaf_area: Area,
    kinematic_viscosity: Positive,
    emissivity: Fraction,
    stefan_boltzmann: Positive,
    air_density: Positive,
    air_specific_heat: Positive,
    psychrometric_constant: Positive,
    stomatal_resistance: f64,
}

/// Flow regime and resistance of the air layer next to the leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoundaryLayer {
    pub reynolds: f64,
    pub nusselt: f64,
    /// Resistance to convective heat transfer `rB`, s/m.
    pub resistance: f64,
}

/// The three parallel heat transfer paths of the leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HeatTransferCoefficients {
    pub long_wave: HeatTransfer,
    pub convective: HeatTransfer,
    pub evapotranspirative: HeatTransfer,
}

impl HeatTransferCoefficients {
    /// Total leaf heat transfer coefficient.
    pub(crate) fn total(&self) -> HeatTransfer {
        self.long_wave + self.convective + self.evapotranspirative
    }
}

impl LeafExchange {
    pub(crate) fn new(constants: &Constants) -> Result<Self, ConstantsError> {
        let leaf_length = positive("dimension_of_leaf_m", constants.leaf_length_m)?;
        let leaf_width = positive("width_of_leaf_m", constants.leaf_width_m)?;
        let leaf_area = Length::new::<meter>(leaf_width.into_inner())
            * Length::new::<meter>(leaf_length.into_inner());

        Ok(Self {
            leaf_length,
            leaf_area,
            kinematic_viscosity: positive(
                "kinematic_viscosity_of_air",
                constants.kinematic_viscosity_m2_s,
            )?,
            emissivity: fraction("emissivity", constants.emissivity)?,
            stefan_boltzmann: positive("stefan_boltzmann_constant", constants.stefan_boltzmann)?,
            air_density: positive("density_of_air_kg_m3", constants.air_density_kg_m3)?,
            air_specific_heat: positive(
                "specific_heat_of_air_J_kg_K",
                constants.air_specific_heat_j_kg_k,
            )?,
            psychrometric_constant: positive(
                "psychrometer_constant_Pa_K",
                constants.psychrometric_constant_pa_k,
            )?,
            stomatal_resistance: stomatal_resistance(constants)?,
        })
    }

    pub(crate) fn leaf_area(&self) -> Area {
        self.leaf_area
    }

    pub(crate) fn stomatal_resistance(&self) -> f64 {
        self.stomatal_resistance
    }

    /// Boundary layer for a leaf-level wind speed in m/s.
    pub(crate) fn boundary_layer(&self, leaf_wind: f64) -> BoundaryLayer {
        let length = self.leaf_length.get();
        let reynolds = (leaf_wind * length) / self.kinematic_viscosity.get();
        let nusselt = 0.72 * reynolds.powf(0.6);
        BoundaryLayer {
            reynolds,
            nusselt,
            resistance: length / (THERMAL_DIFFUSIVITY_OF_AIR * nusselt),
        }
    }

    /// Heat transfer coefficients at `air_temp_c`.
    ///
    /// `slope_pa_per_k` is the saturation curve slope and
    /// `boundary_resistance` is `rB` in s/m.
    pub(crate) fn coefficients(
        &self,
        air_temp_c: f64,
        slope_pa_per_k: f64,
        boundary_resistance: f64,
    ) -> HeatTransferCoefficients {
        let rho_cp = self.air_density.get() * self.air_specific_heat.get();

        let long_wave = 4.0
            * self.emissivity.get()
            * self.stefan_boltzmann.get()
            * celsius_to_kelvin(air_temp_c).powf(3.0);
        let convective = rho_cp / boundary_resistance;
        let evapotranspirative = rho_cp
            * (slope_pa_per_k
                / (self.psychrometric_constant.get()
                    * (boundary_resistance + self.stomatal_resistance)));

        HeatTransferCoefficients {
            long_wave: HeatTransfer::new::<watt_per_square_meter_kelvin>(long_wave),
            convective: HeatTransfer::new::<watt_per_square_meter_kelvin>(convective),
            evapotranspirative: HeatTransfer::new::<watt_per_square_meter_kelvin>(
                evapotranspirative,
            ),
        }
    }

    /// Heat exchanged by the whole leaf across a dew point depression.
    pub(crate) fn sensible_heat_exchange(
        &self,
        coefficient: HeatTransfer,
        dew_point_depression: TemperatureInterval,
    ) -> Power {
        coefficient * self.leaf_area * dew_point_depression
    }
}

/// Stomatal diffusion resistance `rS`, s/m.
///
/// Pore depth plus the end correction `π·d/8`, over the diffusive cross
/// section of all pores per square meter of leaf.
fn stomatal_resistance(constants: &Constants) -> Result<f64, ConstantsError> {
    let l = positive("mean_length_of_pore_l", constants.pore_length_m)?.into_inner();
    let d = positive("diameter_of_pore_d", constants.pore_diameter_m)?.into_inner();
    let n = positive("n", constants.stomatal_density_per_m2)?.into_inner();
    let diffusivity = positive(
        "diffusion_coefficient_of_water_vapor_D",
        constants.vapor_diffusivity_m2_s,
    )?
    .into_inner();

    Ok((4.0 * (l + (PI * d) / 8.0)) / (PI * n * d.powi(2) * diffusivity))
}
