use super::state::{Resolution, State, StateId};
use super::transition::{Transition, TransitionKind};
use crate::core::catalog::registry::ElementInfo;
use nalgebra::DMatrix;

/// Which physical processes contribute transitions to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessFlags {
    pub ionization: bool,
    pub autoionization: bool,
    pub emission: bool,
    pub radiative_recombination: bool,
    pub excitation: bool,
}

impl Default for ProcessFlags {
    fn default() -> Self {
        Self {
            ionization: true,
            autoionization: true,
            emission: true,
            radiative_recombination: true,
            excitation: true,
        }
    }
}

impl ProcessFlags {
    /// Whether transitions of the given kind are enabled.
    pub fn enabled(&self, kind: TransitionKind) -> bool {
        match kind {
            TransitionKind::Ionization => self.ionization,
            TransitionKind::Autoionization => self.autoionization,
            TransitionKind::RadiativeRecombination => self.radiative_recombination,
            TransitionKind::Emission => self.emission,
            TransitionKind::Excitation => self.excitation,
        }
    }
}

/// Which electron-distribution representations the model carries densities for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectronScheme {
    /// Solve rate equations for arbitrary (kinetic) electron distributions.
    pub kinetic: bool,
    /// Solve rate equations for Maxwellian electron distributions.
    pub maxwellian: bool,
}

impl Default for ElectronScheme {
    fn default() -> Self {
        Self {
            kinetic: true,
            maxwellian: true,
        }
    }
}

/// Initial-density policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitPolicy {
    /// Initialize state densities to Saha-Boltzmann equilibria.
    pub saha_boltzmann: bool,
    /// Rescale total impurity density to a fixed fraction of the electron
    /// density at each profile sample.
    pub fixed_fraction: bool,
    /// Fractional impurity density used when `fixed_fraction` is set.
    pub frac_imp_dens: f64,
}

impl Default for InitPolicy {
    fn default() -> Self {
        Self {
            saha_boltzmann: true,
            fixed_fraction: false,
            frac_imp_dens: 0.01,
        }
    }
}

/// Normalization constants shared with the downstream rate-equation solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Collision rate normalization constant.
    pub collrate_const: f64,
    /// Three-body recombination rate normalization constant.
    pub tbrec_norm: f64,
    /// Cross-section normalization constant.
    pub sigma_norm: f64,
    /// Time normalization constant.
    pub time_norm: f64,
    /// Temperature normalization constant (eV per normalized unit).
    pub t_norm: f64,
    /// Density normalization constant (m^-3 per normalized unit).
    pub n_norm: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            collrate_const: 1.0,
            tbrec_norm: 1.0,
            sigma_norm: 1.0,
            time_norm: 1.0,
            t_norm: 1.0,
            n_norm: 1.0,
        }
    }
}

/// The finalized model of one impurity element: its evolved atomic states,
/// the transitions between them, and the initial state densities.
///
/// Built exclusively by [`crate::build::build`]; after hand-off the model is
/// read through the accessors below and is no longer mutated, apart from the
/// explicit reduced-order reordering operation
/// ([`crate::build::indexer::reorder_pq`]), which changes state order and
/// derived positions but never set membership.
#[derive(Debug, Clone)]
pub struct ImpurityModel {
    pub(crate) element: ElementInfo,
    pub(crate) resolution: Resolution,
    pub(crate) processes: ProcessFlags,
    pub(crate) electrons: ElectronScheme,
    pub(crate) init: InitPolicy,
    pub(crate) norms: Normalization,
    pub(crate) states: Vec<State>,
    pub(crate) transitions: Vec<Transition>,
    /// Total evolved-state count; kept equal to `states.len()` by the
    /// pipeline stages that shrink the state set.
    pub(crate) tot_states: usize,
    /// Primary-state count, set by the P/Q reordering operation.
    pub(crate) num_p_states: Option<usize>,
    /// Secondary-state count, set by the P/Q reordering operation.
    pub(crate) num_q_states: Option<usize>,
    /// Kinetic-electron densities, `[profile_samples x tot_states]`.
    pub(crate) dens: Option<DMatrix<f64>>,
    /// Maxwellian-electron densities, `[profile_samples x tot_states]`.
    pub(crate) dens_max: Option<DMatrix<f64>>,
}

impl ImpurityModel {
    /// Metadata of the modelled element.
    pub fn element(&self) -> &ElementInfo {
        &self.element
    }

    /// Angular-momentum resolution the model was built at.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Which physical processes contribute transitions.
    pub fn processes(&self) -> ProcessFlags {
        self.processes
    }

    /// Which electron representations densities are carried for.
    pub fn electrons(&self) -> ElectronScheme {
        self.electrons
    }

    /// The initial-density policy the model was built with.
    pub fn init_policy(&self) -> InitPolicy {
        self.init
    }

    /// Normalization constants for rates, time, temperature and density.
    pub fn normalization(&self) -> Normalization {
        self.norms
    }

    /// Number of ionization stages (nuclear charge + 1).
    pub fn num_stages(&self) -> usize {
        self.element.num_stages()
    }

    /// The evolved atomic states, in evolved-state order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The transitions between evolved states.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Total evolved-state count.
    pub fn tot_states(&self) -> usize {
        self.tot_states
    }

    /// Primary-state count after P/Q reordering; `None` before reordering.
    pub fn num_p_states(&self) -> Option<usize> {
        self.num_p_states
    }

    /// Secondary-state count after P/Q reordering; `None` before reordering.
    pub fn num_q_states(&self) -> Option<usize> {
        self.num_q_states
    }

    /// Kinetic-electron densities, one row per profile sample and one column
    /// per evolved state position.
    pub fn dens(&self) -> Option<&DMatrix<f64>> {
        self.dens.as_ref()
    }

    /// Maxwellian-electron densities, shaped like [`ImpurityModel::dens`].
    pub fn dens_max(&self) -> Option<&DMatrix<f64>> {
        self.dens_max.as_ref()
    }

    /// Looks up an evolved state by its stable external id.
    pub fn state_by_id(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }
}
