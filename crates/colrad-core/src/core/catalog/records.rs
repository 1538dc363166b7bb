use crate::core::models::transition::TransitionKind;
use serde::Deserialize;

/// One tabulated atomic level, as stored in the catalog files.
///
/// Numeric identity is deliberately absent: state ids are assigned by
/// position in the level list at load time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelRecord {
    /// Ionization stage; 0 = neutral.
    #[serde(rename = "Z")]
    pub z: u32,
    /// Principal quantum number, when tabulated.
    #[serde(default)]
    pub n: Option<u32>,
    /// Orbital angular momentum quantum number (`l`-resolved catalogs).
    #[serde(default)]
    pub l: Option<u32>,
    /// Total angular momentum quantum number (`j`-resolved catalogs).
    #[serde(default)]
    pub j: Option<f64>,
    /// Electronic configuration label, when tabulated.
    #[serde(default)]
    pub config: Option<String>,
    /// Absolute level energy in eV.
    pub energy: f64,
    /// Statistical weight (degeneracy).
    pub stat_weight: f64,
}

/// One tabulated transition, as stored in the catalog files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitionRecord {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    pub from_id: usize,
    pub to_id: usize,
    /// Transition (threshold) energy in grid-normalized units.
    #[serde(rename = "delta_E", default)]
    pub delta_e: f64,
    /// Cross-section data indexed by the catalog energy grid. Empty for
    /// emission transitions.
    #[serde(default)]
    pub sigma: Vec<f64>,
    /// Spontaneous rate, for emission transitions.
    #[serde(default)]
    pub rate: Option<f64>,
}

/// Header record carrying the energy grid the transition data was tabulated
/// on; the first entry of every transition catalog file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridHeader {
    #[serde(rename = "E_grid")]
    pub e_grid: Vec<f64>,
}

/// A loaded transition catalog: the tabulation grid plus the raw records.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionCatalog {
    /// Energy grid the transition data was tabulated on.
    pub egrid: Vec<f64>,
    pub records: Vec<TransitionRecord>,
}
