//! Crop and canopy models.

pub mod leaf_wetness;
