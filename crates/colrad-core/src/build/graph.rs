use super::error::BuildError;
use crate::core::catalog::CatalogError;
use crate::core::catalog::registry::ElementInfo;
use crate::core::catalog::source::CatalogSource;
use crate::core::models::impurity::ProcessFlags;
use crate::core::models::state::{Resolution, State, StateId};
use crate::core::models::transition::{Transition, TransitionKind};
use std::collections::HashMap;
use tracing::{debug, info};

/// Builds the typed transition list connecting the evolved states.
///
/// A catalog record survives only if both endpoints are in the evolved state
/// set and its process kind is enabled. Every retained excitation transition
/// gets de-excitation data and every retained ionization transition gets
/// inverse (three-body-recombination-like) data, derived by detailed balance
/// from the endpoint statistical-weight ratio over the velocity grid; a
/// tabulation whose length disagrees with that grid is fatal. The
/// id-to-index lookup used here is transient; the durable position cache is
/// built later by the position indexer.
///
/// Returns the transitions together with the energy grid the catalog data was
/// tabulated on; consistency with the simulation grid is checked by the
/// integrity stage, not here.
pub fn build_transitions(
    source: &dyn CatalogSource,
    element: &ElementInfo,
    resolution: Resolution,
    states: &[State],
    processes: &ProcessFlags,
    vgrid: &[f64],
) -> Result<(Vec<Transition>, Vec<f64>), BuildError> {
    let catalog = source.transitions(element, resolution).map_err(|e| match e {
        CatalogError::Io { .. } => BuildError::Configuration(format!(
            "no transition catalog for element '{}' at resolution '{}': {e}",
            element.symbol,
            resolution.catalog_suffix()
        )),
        other => other.into(),
    })?;
    info!(records = catalog.records.len(), "loaded transition catalog");

    let index: HashMap<StateId, usize> = states
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    let mut transitions = Vec::new();
    for record in catalog.records {
        let (Some(&from), Some(&to)) = (
            index.get(&StateId(record.from_id)),
            index.get(&StateId(record.to_id)),
        ) else {
            continue;
        };
        if !processes.enabled(record.kind) {
            continue;
        }

        let mut trans = Transition::from_record(record);
        if matches!(
            trans.kind,
            TransitionKind::Excitation | TransitionKind::Ionization
        ) {
            // The inverse derivation interpolates sigma on the velocity grid;
            // a length disagreement would silently produce all-zero data.
            if trans.sigma.len() != vgrid.len() {
                return Err(BuildError::SigmaLengthMismatch {
                    from_id: trans.from_id.0,
                    to_id: trans.to_id.0,
                    sigma_len: trans.sigma.len(),
                    grid_len: vgrid.len(),
                });
            }
            let g_ratio = states[from].stat_weight / states[to].stat_weight;
            trans.set_inverse_data(g_ratio, vgrid);
        }
        transitions.push(trans);
    }

    debug!(count = transitions.len(), "constructed transition objects");
    Ok((transitions, catalog.egrid))
}
