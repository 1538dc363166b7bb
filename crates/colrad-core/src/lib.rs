//! # Colrad++ Core Library
//!
//! A library for constructing the internal data model of a collisional-radiative
//! atomic kinetics solver: the tracked atomic states of one impurity element, the
//! allowed transitions between them, and the initial state densities, consistent
//! with externally supplied plasma profiles and velocity/energy grids.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction,
//! keeping the data model reusable and the construction pipeline testable.
//!
//! - **[`core`]: The Foundation.** Contains the stateless data models
//!   ([`core::models::impurity::ImpurityModel`], atomic [`core::models::state::State`]s
//!   and [`core::models::transition::Transition`]s), the raw atomic-data catalog
//!   interface, pure equilibrium-distribution functions (Saha, Boltzmann), and
//!   plasma-profile I/O.
//!
//! - **[`build`]: The Construction Pipeline.** A strictly sequential, single-pass
//!   workflow that loads and filters the state catalog, builds the transition
//!   graph with detailed-balance inverse data, enforces referential integrity
//!   between states and transitions, initializes densities, and maintains the
//!   dual id/position indexing that downstream linear-algebra routines rely on.
//!
//! Construction is synchronous and single-threaded; the finalized model is
//! handed off by value and is no longer mutated by this library, apart from the
//! explicit reduced-order reordering operation ([`build::indexer::reorder_pq`]).

pub mod build;
pub mod core;
