//! Leaf wetness estimated from routine weather-station observations.
//!
//! For each 15-minute observation the model estimates how much dew a leaf
//! in the canopy could condense, how much rain it intercepts, and how much
//! of that water evaporates, and reports the net wetness in mm.
//!
//! [`LeafWetness`] validates the [`Constants`] once and derives the canopy
//! parameters every row shares. Rows are then independent, so a batch can be
//! evaluated sequentially with [`LeafWetness::estimate`], in parallel with
//! [`LeafWetness::estimate_par`], or one observation at a time through the
//! [`twine_core::Model`] implementation.
//!
//! # Example
//!
//! ```
//! use leaf_wetness::models::agronomy::leaf_wetness::{Constants, Observation, estimate};
//!
//! let observations = [
//!     Observation {
//!         air_temp_f: 55.0,
//!         dew_point_f: 54.0,
//!         wind_speed_mph: 2.0,
//!         relative_humidity_pct: 96.0,
//!         precip_in: 0.0,
//!     },
//!     Observation {
//!         air_temp_f: 30.0,
//!         dew_point_f: 29.0,
//!         wind_speed_mph: 0.0,
//!         relative_humidity_pct: 96.0,
//!         precip_in: 0.1,
//!     },
//! ];
//!
//! let estimates = estimate(&observations, &Constants::default()).unwrap();
//! assert_eq!(estimates.len(), 2);
//! assert!(estimates[0].condensation_mm > 0.0);
//! // No liquid wetness at or below freezing.
//! assert_eq!(estimates[1].wetness_mm, 0.0);
//! ```

pub(crate) mod core;

pub use self::core::{
    Constants, ConstantsError, DataValidationError, Diagnostics, Estimate, EstimateError, Field,
    Observation, ValidationIssue,
};

use rayon::prelude::*;
use tracing::{debug, warn};
use twine_core::Model;

use self::core::{Parameters, evaluate};

/// A validated leaf wetness model.
#[derive(Debug, Clone, Copy)]
pub struct LeafWetness {
    constants: Constants,
    params: Parameters,
}

impl LeafWetness {
    /// Creates a model from `constants`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstantsError`] if any constant is out of range or the
    /// canopy and reference heights give a degenerate wind profile.
    pub fn new(constants: Constants) -> Result<Self, ConstantsError> {
        let params = Parameters::new(&constants)?;
        Ok(Self { constants, params })
    }

    /// The constants this model was built from.
    #[must_use]
    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Evaluates a single observation.
    ///
    /// # Errors
    ///
    /// Returns a [`DataValidationError`] for row `0` if any field is not finite.
    pub fn estimate_one(&self, observation: &Observation) -> Result<Estimate, DataValidationError> {
        observation.validate(0)?;
        Ok(self.evaluate(observation))
    }

    /// Evaluates every observation in order.
    ///
    /// All rows are validated before any is evaluated, so a malformed row
    /// yields an error and no partial results.
    ///
    /// # Errors
    ///
    /// Returns the [`DataValidationError`] of the first malformed row.
    pub fn estimate(
        &self,
        observations: &[Observation],
    ) -> Result<Vec<Estimate>, DataValidationError> {
        validate_all(observations)?;
        debug!(rows = observations.len(), "estimating leaf wetness");

        Ok(observations
            .iter()
            .map(|observation| self.evaluate(observation))
            .collect())
    }

    /// Evaluates every observation on the rayon thread pool.
    ///
    /// Results are identical to [`LeafWetness::estimate`], in input order.
    ///
    /// # Errors
    ///
    /// Returns the [`DataValidationError`] of the first malformed row.
    pub fn estimate_par(
        &self,
        observations: &[Observation],
    ) -> Result<Vec<Estimate>, DataValidationError> {
        validate_all(observations)?;
        debug!(rows = observations.len(), "estimating leaf wetness in parallel");

        Ok(observations
            .par_iter()
            .map(|observation| self.evaluate(observation))
            .collect())
    }

    fn evaluate(&self, observation: &Observation) -> Estimate {
        let estimate = evaluate(&self.params, observation);
        if !estimate.diagnostics.all_finite() {
            warn!(
                ?observation,
                "non-finite intermediate value, wetness reported as zero"
            );
        }
        estimate
    }
}

impl Model for LeafWetness {
    type Input = Observation;
    type Output = Estimate;
    type Error = DataValidationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.estimate_one(input)
    }
}

/// Estimates leaf wetness for a batch of observations.
///
/// Shorthand for building a [`LeafWetness`] from `constants` and calling
/// [`LeafWetness::estimate`].
///
/// # Errors
///
/// Returns an [`EstimateError`] if the constants are unusable or any row is
/// malformed. No partial results are returned.
pub fn estimate(
    observations: &[Observation],
    constants: &Constants,
) -> Result<Vec<Estimate>, EstimateError> {
    let model = LeafWetness::new(*constants)?;
    Ok(model.estimate(observations)?)
}

fn validate_all(observations: &[Observation]) -> Result<(), DataValidationError> {
    observations
        .iter()
        .enumerate()
        .try_for_each(|(row, observation)| observation.validate(row))
}
