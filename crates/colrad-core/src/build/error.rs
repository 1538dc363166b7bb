use crate::core::catalog::CatalogError;
use thiserror::Error;

/// Errors aborting model construction.
///
/// Configuration and grid errors are fatal by design: no partial model is
/// ever returned. Integrity issues (orphaned states/transitions) are
/// self-healed by removal and reported through `tracing`, never through this
/// type.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Unknown element, missing resolution variant, or an explicitly empty
    /// requested state subset.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Simulation energy grid incompatible with the grid the transition data
    /// was tabulated on. Grid interpolation is unsupported; the mismatch is
    /// never silently approximated.
    #[error(
        "simulation energy grid differs from the transition catalog grid \
         by {max_diff:.3e} (tolerance {tolerance:.0e})"
    )]
    GridMismatch { max_diff: f64, tolerance: f64 },

    /// Tabulated cross-section data whose length disagrees with the velocity
    /// grid the detailed-balance inverse would be evaluated on.
    #[error(
        "transition {from_id} -> {to_id} tabulates {sigma_len} cross-section \
         points on a {grid_len}-point velocity grid"
    )]
    SigmaLengthMismatch {
        from_id: usize,
        to_id: usize,
        sigma_len: usize,
        grid_len: usize,
    },

    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
