/// Shared electron velocity/energy grids for collisional rate evaluation.
///
/// Both grids are in normalized units (thermal velocity and reference
/// temperature respectively). Every tabulated cross-section in the model is
/// defined on the catalog's energy grid, which must match `egrid` within a
/// small absolute tolerance; grid interpolation is not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationGrids {
    /// Electron velocity grid.
    pub vgrid: Vec<f64>,
    /// Electron energy grid.
    pub egrid: Vec<f64>,
}

impl SimulationGrids {
    pub fn new(vgrid: Vec<f64>, egrid: Vec<f64>) -> Self {
        Self { vgrid, egrid }
    }

    /// Largest pointwise absolute difference between `egrid` and another grid.
    ///
    /// Grids of different lengths are reported as infinitely different, so a
    /// length mismatch always trips the integrity tolerance check.
    pub fn max_energy_diff(&self, other: &[f64]) -> f64 {
        if self.egrid.len() != other.len() {
            return f64::INFINITY;
        }
        self.egrid
            .iter()
            .zip(other)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
