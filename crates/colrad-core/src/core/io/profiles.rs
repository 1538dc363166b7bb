use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Electron density and temperature profiles, one entry per plasma sample.
///
/// Values are in normalized units; the density initializer de-normalizes them
/// with the model's normalization constants before evaluating equilibria.
#[derive(Debug, Clone, PartialEq)]
pub struct PlasmaProfile {
    /// Electron density per sample.
    pub ne: Vec<f64>,
    /// Electron temperature per sample.
    pub te: Vec<f64>,
}

/// Row format of a plasma-profile CSV file.
#[derive(Debug, Deserialize)]
struct ProfileRow {
    ne: f64,
    #[serde(rename = "Te")]
    te: f64,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("density and temperature profiles have different lengths ({ne} vs {te})")]
    LengthMismatch { ne: usize, te: usize },
}

impl PlasmaProfile {
    pub fn new(ne: Vec<f64>, te: Vec<f64>) -> Result<Self, ProfileError> {
        if ne.len() != te.len() {
            return Err(ProfileError::LengthMismatch {
                ne: ne.len(),
                te: te.len(),
            });
        }
        Ok(Self { ne, te })
    }

    /// Loads profiles from a CSV file with `ne` and `Te` columns, one row per
    /// plasma sample.
    pub fn load_csv(path: &Path) -> Result<Self, ProfileError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ProfileError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut ne = Vec::new();
        let mut te = Vec::new();
        for result in reader.deserialize::<ProfileRow>() {
            let row = result.map_err(|e| ProfileError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            ne.push(row.ne);
            te.push(row.te);
        }
        Ok(Self { ne, te })
    }

    /// Number of plasma samples.
    pub fn len(&self) -> usize {
        self.ne.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ne.is_empty()
    }
}
