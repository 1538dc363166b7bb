use super::error::BuildError;
use crate::core::models::grid::SimulationGrids;
use crate::core::models::state::{State, StateId};
use crate::core::models::transition::Transition;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Absolute tolerance for simulation-vs-catalog energy grid agreement, in
/// normalized units.
pub const GRID_TOLERANCE: f64 = 1e-5;

/// Indices of transitions touching the given state on either side.
///
/// Operates on the parallel from/to id arrays of the transition list; used
/// only for orphan detection.
pub fn associated_transitions(id: StateId, from_ids: &[StateId], to_ids: &[StateId]) -> Vec<usize> {
    from_ids
        .iter()
        .zip(to_ids)
        .enumerate()
        .filter_map(|(i, (from, to))| (*from == id || *to == id).then_some(i))
        .collect()
}

/// Cross-validates grids and enforces referential integrity between the
/// state and transition sets.
///
/// In order: fails on a simulation/catalog energy-grid mismatch beyond
/// [`GRID_TOLERANCE`] (grid interpolation is unsupported), removes orphaned
/// states with a diagnostic per removal, removes states above their stage's
/// ionization threshold when autoionization is disabled, and finally prunes
/// every transition whose endpoints no longer both survive.
///
/// After this stage every surviving transition references surviving states.
/// Removals are self-healing and reported, never escalated to errors: the
/// catalog may legitimately contain states and transitions outside the user's
/// chosen subset.
pub fn check_and_prune(
    states: &mut Vec<State>,
    transitions: &mut Vec<Transition>,
    grids: &SimulationGrids,
    trans_egrid: &[f64],
    autoionization: bool,
) -> Result<(), BuildError> {
    let max_diff = grids.max_energy_diff(trans_egrid);
    if max_diff > GRID_TOLERANCE {
        // TODO: support interpolating catalog data onto the simulation grid
        return Err(BuildError::GridMismatch {
            max_diff,
            tolerance: GRID_TOLERANCE,
        });
    }

    let from_ids: Vec<StateId> = transitions.iter().map(|t| t.from_id).collect();
    let to_ids: Vec<StateId> = transitions.iter().map(|t| t.to_id).collect();
    states.retain(|s| {
        let keep = !associated_transitions(s.id, &from_ids, &to_ids).is_empty();
        if !keep {
            warn!(id = %s.id, "state has no associated transitions, removing orphan");
        }
        keep
    });

    if !autoionization {
        states.retain(|s| {
            let keep = s.iz_energy >= 0.0;
            if !keep {
                warn!(
                    id = %s.id,
                    iz_energy = s.iz_energy,
                    "state above ionization threshold removed (autoionization disabled)"
                );
            }
            keep
        });
    }

    let surviving: HashSet<StateId> = states.iter().map(|s| s.id).collect();
    let before = transitions.len();
    transitions.retain(|t| surviving.contains(&t.from_id) && surviving.contains(&t.to_id));
    if transitions.len() < before {
        debug!(
            removed = before - transitions.len(),
            "pruned transitions with non-evolved endpoints"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::transition::TransitionKind;

    fn state(id: usize, iz_energy: f64) -> State {
        State {
            id: StateId(id),
            z: 0,
            n: None,
            l: None,
            j: None,
            config: None,
            energy: 0.0,
            stat_weight: 1.0,
            ground: false,
            iz_energy,
            energy_from_gs: 0.0,
            pos: 0,
        }
    }

    fn transition(from: usize, to: usize) -> Transition {
        Transition {
            kind: TransitionKind::Excitation,
            from_id: StateId(from),
            to_id: StateId(to),
            delta_e: 0.0,
            sigma: vec![],
            rate: None,
            stat_weight_ratio: None,
            sigma_inverse: None,
            from_pos: 0,
            to_pos: 0,
        }
    }

    fn grids() -> SimulationGrids {
        SimulationGrids::new(vec![1.0, 2.0], vec![0.5, 1.0, 2.0])
    }

    #[test]
    fn associated_transitions_finds_both_directions() {
        let from_ids = vec![StateId(0), StateId(1), StateId(2)];
        let to_ids = vec![StateId(1), StateId(2), StateId(0)];

        assert_eq!(associated_transitions(StateId(0), &from_ids, &to_ids), vec![0, 2]);
        assert_eq!(associated_transitions(StateId(2), &from_ids, &to_ids), vec![1, 2]);
        assert!(associated_transitions(StateId(9), &from_ids, &to_ids).is_empty());
    }

    #[test]
    fn grid_mismatch_beyond_tolerance_is_fatal() {
        let mut states = vec![state(0, 1.0)];
        let mut transitions = vec![transition(0, 0)];

        let result = check_and_prune(
            &mut states,
            &mut transitions,
            &grids(),
            &[0.5, 1.0, 2.1],
            true,
        );

        assert!(matches!(result, Err(BuildError::GridMismatch { .. })));
    }

    #[test]
    fn grid_agreement_within_tolerance_passes() {
        let mut states = vec![state(0, 1.0), state(1, 1.0)];
        let mut transitions = vec![transition(0, 1)];

        check_and_prune(
            &mut states,
            &mut transitions,
            &grids(),
            &[0.5 + 5e-6, 1.0, 2.0],
            true,
        )
        .unwrap();

        assert_eq!(states.len(), 2);
    }

    #[test]
    fn orphaned_states_are_removed() {
        let mut states = vec![state(0, 1.0), state(1, 1.0), state(2, 1.0)];
        let mut transitions = vec![transition(0, 1)];

        check_and_prune(
            &mut states,
            &mut transitions,
            &grids(),
            &[0.5, 1.0, 2.0],
            true,
        )
        .unwrap();

        let ids: Vec<usize> = states.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(transitions.len(), 1);
    }

    #[test]
    fn above_threshold_states_removed_without_autoionization() {
        let mut states = vec![state(0, 1.0), state(1, -0.5)];
        let mut transitions = vec![transition(0, 1), transition(1, 0)];

        check_and_prune(
            &mut states,
            &mut transitions,
            &grids(),
            &[0.5, 1.0, 2.0],
            false,
        )
        .unwrap();

        assert_eq!(states.len(), 1);
        assert_eq!(states[0].id, StateId(0));
        // Transitions touching the removed state disappear with it
        assert!(transitions.is_empty());
    }

    #[test]
    fn above_threshold_states_survive_with_autoionization() {
        let mut states = vec![state(0, 1.0), state(1, -0.5)];
        let mut transitions = vec![transition(0, 1)];

        check_and_prune(
            &mut states,
            &mut transitions,
            &grids(),
            &[0.5, 1.0, 2.0],
            true,
        )
        .unwrap();

        assert_eq!(states.len(), 2);
    }

    #[test]
    fn surviving_transitions_reference_surviving_states() {
        let mut states = vec![state(0, 1.0), state(1, 1.0), state(2, -1.0)];
        let mut transitions = vec![transition(0, 1), transition(1, 2), transition(2, 0)];

        check_and_prune(
            &mut states,
            &mut transitions,
            &grids(),
            &[0.5, 1.0, 2.0],
            false,
        )
        .unwrap();

        let surviving: HashSet<StateId> = states.iter().map(|s| s.id).collect();
        for t in &transitions {
            assert!(surviving.contains(&t.from_id));
            assert!(surviving.contains(&t.to_id));
        }
        assert_eq!(transitions.len(), 1);
    }
}
