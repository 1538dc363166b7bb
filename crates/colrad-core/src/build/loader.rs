use super::error::BuildError;
use crate::core::catalog::CatalogError;
use crate::core::catalog::registry::ElementInfo;
use crate::core::catalog::source::CatalogSource;
use crate::core::models::state::{Resolution, State, StateId};
use std::collections::HashSet;
use tracing::{info, warn};

/// Loads and filters the evolved atomic states for one element.
///
/// Each catalog record becomes a [`State`] with a sequential id equal to its
/// raw catalog position. With an explicit `state_ids` subset, every state
/// whose id is not listed is discarded (relative order preserved); `None`
/// retains the full catalog, and an explicitly empty subset is a
/// configuration error rather than a silent zero-state model.
///
/// Ground-state flags, ionization energies and energies above ground are
/// derived on the filtered list before returning.
pub fn load_states(
    source: &dyn CatalogSource,
    element: &ElementInfo,
    resolution: Resolution,
    state_ids: Option<&[usize]>,
) -> Result<Vec<State>, BuildError> {
    if let Some(ids) = state_ids {
        if ids.is_empty() {
            return Err(BuildError::Configuration(
                "requested state subset is empty".to_string(),
            ));
        }
    }

    let records = source.levels(element, resolution).map_err(|e| match e {
        CatalogError::Io { .. } => BuildError::Configuration(format!(
            "no level catalog for element '{}' at resolution '{}': {e}",
            element.symbol,
            resolution.catalog_suffix()
        )),
        other => other.into(),
    })?;
    let mut states: Vec<State> = records
        .iter()
        .enumerate()
        .map(|(i, record)| State::from_record(StateId(i), record))
        .collect();

    if let Some(ids) = state_ids {
        let keep: HashSet<usize> = ids.iter().copied().collect();
        states.retain(|s| keep.contains(&s.id.0));
        if states.is_empty() {
            warn!(
                element = %element.symbol,
                "requested state subset matches no catalog state; model is degenerate"
            );
        }
    }

    info!(
        element = %element.symbol,
        count = states.len(),
        "loaded evolved states"
    );

    derive_level_structure(&mut states, element.num_stages());
    Ok(states)
}

/// Marks per-stage ground states and derives `iz_energy` / `energy_from_gs`.
///
/// The ground state of a stage is its minimum-energy member, ties broken by
/// first occurrence in list order. `iz_energy` is the gap to the next stage's
/// ground state (0.0 for the top stage, or when the next stage has no states
/// in the evolved set); `energy_from_gs` is relative to the state's own
/// stage. Stages with no member are skipped.
pub fn derive_level_structure(states: &mut [State], num_z: usize) {
    let mut gs_energy: Vec<Option<f64>> = vec![None; num_z];
    let mut gs_index: Vec<Option<usize>> = vec![None; num_z];

    for (i, s) in states.iter().enumerate() {
        let z = s.z as usize;
        if z >= num_z {
            warn!(id = %s.id, z, "state's ionization stage exceeds the element's stage count");
            continue;
        }
        let better = match gs_energy[z] {
            None => true,
            Some(e) => s.energy < e,
        };
        if better {
            gs_energy[z] = Some(s.energy);
            gs_index[z] = Some(i);
        }
    }

    for (i, s) in states.iter_mut().enumerate() {
        let z = s.z as usize;
        if z >= num_z {
            continue;
        }
        s.ground = gs_index[z] == Some(i);
        s.energy_from_gs = s.energy - gs_energy[z].unwrap_or(s.energy);
        s.iz_energy = if z + 1 < num_z {
            match gs_energy[z + 1] {
                Some(next_gs) => next_gs - s.energy,
                None => 0.0,
            }
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::records::{LevelRecord, TransitionCatalog};

    struct StubCatalog {
        levels: Vec<LevelRecord>,
    }

    impl CatalogSource for StubCatalog {
        fn levels(
            &self,
            _element: &ElementInfo,
            _resolution: Resolution,
        ) -> Result<Vec<LevelRecord>, CatalogError> {
            Ok(self.levels.clone())
        }

        fn transitions(
            &self,
            _element: &ElementInfo,
            _resolution: Resolution,
        ) -> Result<TransitionCatalog, CatalogError> {
            Ok(TransitionCatalog {
                egrid: vec![],
                records: vec![],
            })
        }
    }

    fn level(z: u32, energy: f64, stat_weight: f64) -> LevelRecord {
        LevelRecord {
            z,
            n: None,
            l: None,
            j: None,
            config: None,
            energy,
            stat_weight,
        }
    }

    fn helium() -> ElementInfo {
        ElementInfo {
            symbol: "He".to_string(),
            name: "Helium".to_string(),
            nuclear_charge: 2,
        }
    }

    fn helium_catalog() -> StubCatalog {
        StubCatalog {
            levels: vec![
                level(0, -79.0, 1.0), // He ground
                level(0, -59.2, 3.0), // He excited
                level(1, -54.4, 2.0), // He+ ground
                level(1, -13.6, 8.0), // He+ excited
                level(2, 0.0, 1.0),   // He2+ (top stage)
            ],
        }
    }

    #[test]
    fn ids_equal_raw_catalog_positions() {
        let states = load_states(&helium_catalog(), &helium(), Resolution::N, None).unwrap();
        let ids: Vec<usize> = states.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn exactly_one_ground_state_per_stage() {
        let states = load_states(&helium_catalog(), &helium(), Resolution::N, None).unwrap();

        for z in 0..3 {
            let grounds: Vec<_> = states.iter().filter(|s| s.z == z && s.ground).collect();
            assert_eq!(grounds.len(), 1, "stage {z} should have one ground state");
        }
        assert!(states[0].ground);
        assert!(!states[1].ground);
        assert!(states[2].ground);
    }

    #[test]
    fn ground_state_ties_break_to_first_occurrence() {
        let catalog = StubCatalog {
            levels: vec![level(0, -10.0, 2.0), level(0, -10.0, 4.0), level(1, 0.0, 1.0)],
        };
        let element = ElementInfo {
            symbol: "H".to_string(),
            name: "Hydrogen".to_string(),
            nuclear_charge: 1,
        };
        let states = load_states(&catalog, &element, Resolution::N, None).unwrap();
        assert!(states[0].ground);
        assert!(!states[1].ground);
    }

    #[test]
    fn ionization_energies_span_to_next_stage_ground() {
        let states = load_states(&helium_catalog(), &helium(), Resolution::N, None).unwrap();

        // He ground -> He+ ground
        assert!((states[0].iz_energy - (-54.4 - -79.0)).abs() < 1e-12);
        // He excited -> He+ ground
        assert!((states[1].iz_energy - (-54.4 - -59.2)).abs() < 1e-12);
        // Top stage has zero ionization energy
        assert_eq!(states[4].iz_energy, 0.0);

        // Energies above own-stage ground
        assert_eq!(states[0].energy_from_gs, 0.0);
        assert!((states[1].energy_from_gs - 19.8).abs() < 1e-10);
        assert!((states[3].energy_from_gs - 40.8).abs() < 1e-10);
    }

    #[test]
    fn subset_filter_keeps_only_listed_ids_in_order() {
        let states =
            load_states(&helium_catalog(), &helium(), Resolution::N, Some(&[4, 0, 2])).unwrap();
        let ids: Vec<usize> = states.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![0, 2, 4]);
        // Derived structure is computed on the filtered list
        assert!(states.iter().all(|s| s.ground));
    }

    #[test]
    fn empty_subset_is_a_configuration_error() {
        let result = load_states(&helium_catalog(), &helium(), Resolution::N, Some(&[]));
        assert!(matches!(result, Err(BuildError::Configuration(_))));
    }

    #[test]
    fn subset_matching_nothing_yields_degenerate_empty_model() {
        let states =
            load_states(&helium_catalog(), &helium(), Resolution::N, Some(&[99])).unwrap();
        assert!(states.is_empty());
    }

    #[test]
    fn missing_next_stage_leaves_iz_energy_zero() {
        let states =
            load_states(&helium_catalog(), &helium(), Resolution::N, Some(&[0, 1, 4])).unwrap();
        // He+ absent: gap to stage 1 is undefined, left at zero
        assert_eq!(states[0].iz_energy, 0.0);
        assert_eq!(states[1].iz_energy, 0.0);
    }
}
