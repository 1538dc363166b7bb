use super::CatalogError;
use super::records::{GridHeader, LevelRecord, TransitionCatalog, TransitionRecord};
use super::registry::ElementInfo;
use crate::core::models::state::Resolution;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Data source for raw level and transition catalogs.
///
/// Queried by element and angular-momentum resolution; numeric state identity
/// is deliberately absent from the returned records and is assigned by list
/// position at load time. The production implementation reads the JSON
/// atomic-data files from a data directory; tests inject in-memory doubles.
pub trait CatalogSource {
    /// The ordered level list for one element at one resolution.
    fn levels(
        &self,
        element: &ElementInfo,
        resolution: Resolution,
    ) -> Result<Vec<LevelRecord>, CatalogError>;

    /// The transition list for one element at one resolution, together with
    /// the energy grid the data was tabulated on.
    fn transitions(
        &self,
        element: &ElementInfo,
        resolution: Resolution,
    ) -> Result<TransitionCatalog, CatalogError>;
}

/// Entry of a raw transition catalog file: either the leading energy-grid
/// header or an actual transition record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTransitionEntry {
    Header(GridHeader),
    Record(TransitionRecord),
}

/// Reads catalogs from the on-disk atomic-data layout:
/// `<data_dir>/<ElementName>/<Sym>_levels_<res>.json` and
/// `<data_dir>/<ElementName>/<Sym>_transitions_<res>.json`.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    data_dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn catalog_path(&self, element: &ElementInfo, kind: &str, resolution: Resolution) -> PathBuf {
        self.data_dir.join(&element.name).join(format!(
            "{}_{kind}_{}.json",
            element.symbol,
            resolution.catalog_suffix()
        ))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| CatalogError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

impl CatalogSource for FileCatalogSource {
    fn levels(
        &self,
        element: &ElementInfo,
        resolution: Resolution,
    ) -> Result<Vec<LevelRecord>, CatalogError> {
        let path = self.catalog_path(element, "levels", resolution);
        Self::read_json(&path)
    }

    fn transitions(
        &self,
        element: &ElementInfo,
        resolution: Resolution,
    ) -> Result<TransitionCatalog, CatalogError> {
        let path = self.catalog_path(element, "transitions", resolution);
        let entries: Vec<RawTransitionEntry> = Self::read_json(&path)?;

        let mut iter = entries.into_iter();
        let egrid = match iter.next() {
            Some(RawTransitionEntry::Header(header)) => header.e_grid,
            _ => {
                return Err(CatalogError::MissingGridHeader {
                    path: path.to_string_lossy().to_string(),
                });
            }
        };

        let records = iter
            .filter_map(|entry| match entry {
                RawTransitionEntry::Record(record) => Some(record),
                RawTransitionEntry::Header(_) => None,
            })
            .collect();

        Ok(TransitionCatalog { egrid, records })
    }
}
