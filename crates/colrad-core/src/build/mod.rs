//! # Build Module
//!
//! The model-construction pipeline: a strictly sequential, single-pass
//! workflow that turns the raw atomic-structure catalog into a finalized
//! [`ImpurityModel`].
//!
//! Stage ordering is a correctness requirement, not a performance choice:
//! the transition builder's id lookup is invalidated by integrity filtering,
//! and positions assigned before orphan removal would be stale. The
//! [`build`] entry point is the only supported way to run the stages.

pub mod density;
pub mod error;
pub mod graph;
pub mod indexer;
pub mod integrity;
pub mod loader;
pub mod settings;

use crate::core::catalog::registry::ElementRegistry;
use crate::core::catalog::source::CatalogSource;
use crate::core::io::profiles::PlasmaProfile;
use crate::core::models::grid::SimulationGrids;
use crate::core::models::impurity::ImpurityModel;
use self::error::BuildError;
use self::settings::ModelSettings;
use tracing::{info, instrument};

/// Constructs the full impurity model for one element.
///
/// Runs the pipeline stages in order: state catalog loading and filtering,
/// transition graph construction with detailed-balance inverse data,
/// grid/referential integrity checking, density initialization, and the
/// position-indexing pass. Configuration and grid errors abort construction;
/// no partial model is ever returned.
#[instrument(skip_all, name = "model_build", fields(element = %settings.element))]
pub fn build(
    settings: &ModelSettings,
    registry: &ElementRegistry,
    source: &dyn CatalogSource,
    grids: &SimulationGrids,
    profile: &PlasmaProfile,
) -> Result<ImpurityModel, BuildError> {
    let element = registry.resolve(&settings.element).ok_or_else(|| {
        BuildError::Configuration(format!("unknown element '{}'", settings.element))
    })?;

    info!("initialising states");
    let mut states = loader::load_states(
        source,
        &element,
        settings.resolution,
        settings.state_ids.as_deref(),
    )?;

    info!("initialising transitions");
    let (mut transitions, trans_egrid) = graph::build_transitions(
        source,
        &element,
        settings.resolution,
        &states,
        &settings.processes,
        &grids.vgrid,
    )?;

    info!("checking state and transition consistency");
    integrity::check_and_prune(
        &mut states,
        &mut transitions,
        grids,
        &trans_egrid,
        settings.processes.autoionization,
    )?;

    info!("initialising densities");
    let (dens, dens_max) = density::init_dens(
        &states,
        element.num_stages(),
        settings.electrons,
        settings.init,
        &settings.norms,
        profile,
    );

    info!("finalising state and transition positions");
    indexer::set_state_positions(&mut states);
    let tot_states = states.len();
    let mut model = ImpurityModel {
        element,
        resolution: settings.resolution,
        processes: settings.processes,
        electrons: settings.electrons,
        init: settings.init,
        norms: settings.norms,
        states,
        transitions,
        tot_states,
        num_p_states: None,
        num_q_states: None,
        dens,
        dens_max,
    };
    indexer::set_transition_positions(&model.states, &mut model.transitions)?;

    info!(
        tot_states = model.tot_states,
        transitions = model.transitions.len(),
        "model construction complete"
    );
    Ok(model)
}
