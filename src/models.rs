//! Public models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are grouped into domain submodules (currently `agronomy`). Each
//! model lives in its own module and keeps its computation in an internal
//! `core` submodule that is **not** part of the public API.
//!
//! The [`twine_core::Model`] implementation is a thin adapter over the
//! model's own API, which also offers batch entry points.

pub mod agronomy;
