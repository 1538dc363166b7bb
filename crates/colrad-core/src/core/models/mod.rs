//! # Models Module
//!
//! The impurity data model: atomic states identified by a stable external id
//! and a volatile dense position, typed transitions connecting them, the
//! shared simulation grids, and the [`impurity::ImpurityModel`] aggregate.

pub mod grid;
pub mod impurity;
pub mod state;
pub mod transition;
