use crate::core::models::impurity::{ElectronScheme, InitPolicy, Normalization, ProcessFlags};
use crate::core::models::state::Resolution;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SettingsError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Complete configuration for one model build.
///
/// Every field is a plain scalar or flag; user subsets of the state catalog
/// are expressed through `state_ids` (`None` retains the full catalog).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Chemical symbol of the modelled impurity element.
    pub element: String,
    /// Angular-momentum resolution of the tracked states.
    pub resolution: Resolution,
    /// Explicit subset of state ids to evolve; `None` retains all states.
    /// An explicitly empty list is a configuration error.
    pub state_ids: Option<Vec<usize>>,
    /// Electron-distribution representations to carry densities for.
    pub electrons: ElectronScheme,
    /// Initial-density policy.
    pub init: InitPolicy,
    /// Enabled physical processes.
    pub processes: ProcessFlags,
    /// Normalization constants for rates, time, temperature and density.
    pub norms: Normalization,
}

/// Builder for [`ModelSettings`]; only the element is required.
#[derive(Debug, Default)]
pub struct ModelSettingsBuilder {
    element: Option<String>,
    resolution: Resolution,
    state_ids: Option<Vec<usize>>,
    electrons: ElectronScheme,
    init: InitPolicy,
    processes: ProcessFlags,
    norms: Normalization,
}

impl ModelSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(mut self, symbol: impl Into<String>) -> Self {
        self.element = Some(symbol.into());
        self
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn state_ids(mut self, ids: Vec<usize>) -> Self {
        self.state_ids = Some(ids);
        self
    }

    pub fn electrons(mut self, electrons: ElectronScheme) -> Self {
        self.electrons = electrons;
        self
    }

    pub fn init(mut self, init: InitPolicy) -> Self {
        self.init = init;
        self
    }

    pub fn processes(mut self, processes: ProcessFlags) -> Self {
        self.processes = processes;
        self
    }

    pub fn norms(mut self, norms: Normalization) -> Self {
        self.norms = norms;
        self
    }

    pub fn build(self) -> Result<ModelSettings, SettingsError> {
        Ok(ModelSettings {
            element: self
                .element
                .ok_or(SettingsError::MissingParameter("element"))?,
            resolution: self.resolution,
            state_ids: self.state_ids,
            electrons: self.electrons,
            init: self.init,
            processes: self.processes,
            norms: self.norms,
        })
    }
}
