//! # Leaf Wetness
//!
//! Estimates leaf surface wetness, in mm, from 15-minute weather-station
//! observations (air temperature, dew point, wind speed, relative humidity
//! and precipitation) using a micrometeorological energy balance.
//!
//! ## Crate layout
//!
//! - [`models`]: The wetness model and its [`twine_core::Model`] adapter.
//! - [`support`]: Numeric constraints and unit conversions used by models.
//! - [`io`]: JSON decoding of observations and encoding of results.
//!
//! ## Example
//!
//! ```
//! use leaf_wetness::io::{parse_observations, to_json, OutputOptions};
//! use leaf_wetness::models::agronomy::leaf_wetness::LeafWetness;
//!
//! let input = r#"[{
//!     "AIR_TEMP_F": 50.0,
//!     "DEWPOINT_F": 50.0,
//!     "WIND_SPEED_2M_MPH": 0.0,
//!     "RELATIVE_HUMIDITY_%": 100.0,
//!     "PRECIP_INCHES": 0.1
//! }]"#;
//!
//! let observations = parse_observations(input).unwrap();
//! let model = LeafWetness::new(Default::default()).unwrap();
//! let estimates = model.estimate(&observations).unwrap();
//! assert_eq!(estimates[0].wetness_mm, 0.6);
//!
//! let json = to_json(&estimates, &OutputOptions::compact()).unwrap();
//! assert!(json.contains(r#""Estimated Leaf Wetness (mm)":0.6"#));
//! ```
//!
//! Only [`models`], [`support`] and [`io`] are public. Each model's `core`
//! module stays private.

pub mod io;
pub mod models;
pub mod support;
