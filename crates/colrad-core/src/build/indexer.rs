use super::error::BuildError;
use crate::core::models::impurity::ImpurityModel;
use crate::core::models::state::{State, StateId};
use crate::core::models::transition::Transition;
use nalgebra::DMatrix;
use std::collections::HashMap;
use tracing::info;

/// Policy selecting which states count as primary in reduced-order
/// (P/Q) reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PStatePolicy {
    /// Ground states are primary; everything else is secondary.
    #[default]
    Ground,
}

/// Assigns `pos = index_in_current_list` to every state.
///
/// Must run after any operation that changes state-list membership or order,
/// and before any consumer reads `pos`.
pub fn set_state_positions(states: &mut [State]) {
    for (i, state) in states.iter_mut().enumerate() {
        state.pos = i;
    }
}

/// Refreshes the cached `from_pos` / `to_pos` of every transition from the
/// current state positions.
///
/// A transition endpoint missing from the state set here is an internal
/// error: the integrity checker is required to have pruned such transitions
/// before positions are assigned.
pub fn set_transition_positions(
    states: &[State],
    transitions: &mut [Transition],
) -> Result<(), BuildError> {
    let id2pos: HashMap<StateId, usize> = states.iter().map(|s| (s.id, s.pos)).collect();

    for trans in transitions.iter_mut() {
        trans.from_pos = *id2pos.get(&trans.from_id).ok_or_else(|| {
            BuildError::Internal(format!(
                "transition endpoint {} is not an evolved state",
                trans.from_id
            ))
        })?;
        trans.to_pos = *id2pos.get(&trans.to_id).ok_or_else(|| {
            BuildError::Internal(format!(
                "transition endpoint {} is not an evolved state",
                trans.to_id
            ))
        })?;
    }
    Ok(())
}

/// Stably repartitions the evolved states into primary (P) followed by
/// secondary (Q) states for reduced-order modeling, then rebuilds all
/// positions.
///
/// Never changes the state or transition sets, only their order and derived
/// positions; existing density arrays are column-permuted to stay consistent
/// with the new ordering. Primary/secondary counts are recorded on the model.
pub fn reorder_pq(model: &mut ImpurityModel, policy: PStatePolicy) -> Result<(), BuildError> {
    match policy {
        PStatePolicy::Ground => {
            let states = std::mem::take(&mut model.states);
            let (p, q): (Vec<State>, Vec<State>) = states.into_iter().partition(|s| s.ground);
            model.num_p_states = Some(p.len());
            model.num_q_states = Some(q.len());
            model.states = p;
            model.states.extend(q);
        }
    }
    info!(
        num_p = model.num_p_states,
        num_q = model.num_q_states,
        "reordered states into P/Q partition"
    );

    // Old position of each state, in new order; valid until positions are
    // reassigned below.
    let perm: Vec<usize> = model.states.iter().map(|s| s.pos).collect();
    if let Some(d) = model.dens.as_ref() {
        model.dens = Some(permute_columns(d, &perm));
    }
    if let Some(d) = model.dens_max.as_ref() {
        model.dens_max = Some(permute_columns(d, &perm));
    }

    set_state_positions(&mut model.states);
    set_transition_positions(&model.states, &mut model.transitions)
}

fn permute_columns(matrix: &DMatrix<f64>, old_cols: &[usize]) -> DMatrix<f64> {
    let mut out = DMatrix::zeros(matrix.nrows(), matrix.ncols());
    for (new_col, &old_col) in old_cols.iter().enumerate() {
        out.set_column(new_col, &matrix.column(old_col));
    }
    out
}
