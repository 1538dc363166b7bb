//! # I/O Module
//!
//! Input of externally supplied plasma data consumed by the model builder.

pub mod profiles;
