//! # Core Module
//!
//! Foundation layer of Colrad++: the data structures and pure functions the
//! construction pipeline operates on.
//!
//! ## Key Components
//!
//! - [`models`] - The impurity data model: atomic states, typed transitions,
//!   simulation grids, and the owning [`models::impurity::ImpurityModel`] aggregate
//!   that is handed off to downstream kinetics solvers.
//! - [`catalog`] - The raw atomic-structure catalog interface: element registry,
//!   serde record types for the tabulated level/transition files, and the
//!   [`catalog::source::CatalogSource`] seam used to inject test doubles.
//! - [`equilibrium`] - Saha and Boltzmann equilibrium distributions as pure
//!   functions, consumed once per plasma-profile sample during density
//!   initialization.
//! - [`io`] - Plasma-profile input (electron density and temperature per sample).

pub mod catalog;
pub mod equilibrium;
pub mod io;
pub mod models;
