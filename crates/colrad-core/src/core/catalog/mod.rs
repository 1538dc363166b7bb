//! # Catalog Module
//!
//! Interface to the raw atomic-structure catalog: element metadata resolution,
//! serde record types for the tabulated level/transition files, and the
//! [`source::CatalogSource`] trait the construction pipeline consumes.

pub mod records;
pub mod registry;
pub mod source;

use thiserror::Error;

/// Errors raised while resolving or reading atomic-data catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Transition catalog '{path}' does not start with an energy-grid header")]
    MissingGridHeader { path: String },
}
