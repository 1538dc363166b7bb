//! Saha and Boltzmann equilibrium distributions.
//!
//! Pure functions over physical (de-normalized) temperatures and densities,
//! consumed by the density initializer once per plasma-profile sample. No
//! side effects; all state structure is passed in explicitly.

use crate::core::models::state::State;
use nalgebra::DVector;
use std::f64::consts::PI;

const ELECTRON_MASS_KG: f64 = 9.109_383_701_5e-31;
const PLANCK_J_S: f64 = 6.626_070_15e-34;
const EV_TO_J: f64 = 1.602_176_634e-19;

/// Thermal de Broglie prefactor `(2 pi m_e k_B T / h^2)^(3/2)` in m^-3,
/// with the temperature in eV.
fn saha_prefactor(t_ev: f64) -> f64 {
    (2.0 * PI * ELECTRON_MASS_KG * t_ev * EV_TO_J / (PLANCK_J_S * PLANCK_J_S)).powf(1.5)
}

/// Saha-equilibrium distribution of the total impurity density across
/// ionization stages.
///
/// Evaluates the Saha chain between adjacent stages using the ground-state
/// statistical weights and ionization energies found in `states`, then scales
/// the result so the stage densities sum to `n_imp`. Temperature is in eV,
/// densities in m^-3. Stages whose ground state is absent from `states` get
/// zero density; a gap in the stage sequence re-anchors the chain above it.
pub fn saha_dist(t_ev: f64, ne: f64, n_imp: f64, states: &[State], num_z: usize) -> DVector<f64> {
    let mut ground: Vec<Option<&State>> = vec![None; num_z];
    for s in states {
        let z = s.z as usize;
        if s.ground && z < num_z {
            ground[z] = Some(s);
        }
    }

    // Chain in log space to survive the huge dynamic range across stages.
    let mut ln_weight: Vec<Option<f64>> = vec![None; num_z];
    let mut prev: Option<(usize, f64, &State)> = None;
    for z in 0..num_z {
        let Some(gs) = ground[z] else {
            continue;
        };
        let ln = match prev {
            Some((pz, pln, lower)) if pz + 1 == z => {
                let chi = lower.iz_energy.max(0.0);
                let g_ratio = gs.stat_weight / lower.stat_weight;
                pln + (2.0 * g_ratio * saha_prefactor(t_ev) / ne).ln() - chi / t_ev
            }
            _ => 0.0,
        };
        ln_weight[z] = Some(ln);
        prev = Some((z, ln, gs));
    }

    let max_ln = ln_weight
        .iter()
        .flatten()
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if max_ln == f64::NEG_INFINITY {
        return DVector::zeros(num_z);
    }

    let weights: Vec<f64> = ln_weight
        .iter()
        .map(|w| w.map_or(0.0, |ln| (ln - max_ln).exp()))
        .collect();
    let total: f64 = weights.iter().sum();

    DVector::from_iterator(num_z, weights.into_iter().map(|w| w * n_imp / total))
}

/// Boltzmann relative populations `g_i * exp(-E_i / T)` across the states of
/// one ionization stage.
///
/// Energies are relative to the stage's ground state, temperature in the same
/// units. The result is unnormalized; callers divide by the sum.
pub fn boltzmann_dist(t_ev: f64, energies: &[f64], stat_weights: &[f64]) -> Vec<f64> {
    energies
        .iter()
        .zip(stat_weights)
        .map(|(&e, &g)| g * (-e / t_ev).exp())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::state::StateId;
    use approx::assert_relative_eq;

    fn ground_state(id: usize, z: u32, stat_weight: f64, iz_energy: f64) -> State {
        State {
            id: StateId(id),
            z,
            n: None,
            l: None,
            j: None,
            config: None,
            energy: 0.0,
            stat_weight,
            ground: true,
            iz_energy,
            energy_from_gs: 0.0,
            pos: id,
        }
    }

    #[test]
    fn boltzmann_equal_states_are_equally_populated() {
        let rel = boltzmann_dist(2.0, &[0.5, 0.5], &[4.0, 4.0]);
        assert_relative_eq!(rel[0], rel[1], epsilon = 1e-14);
    }

    #[test]
    fn boltzmann_favors_low_energy_and_high_weight() {
        let rel = boltzmann_dist(1.0, &[0.0, 1.0], &[2.0, 2.0]);
        assert!(rel[0] > rel[1]);
        assert_relative_eq!(rel[1] / rel[0], (-1.0f64).exp(), epsilon = 1e-12);

        let rel = boltzmann_dist(1.0, &[0.0, 0.0], &[2.0, 6.0]);
        assert_relative_eq!(rel[1] / rel[0], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn saha_stage_densities_sum_to_total() {
        let states = vec![
            ground_state(0, 0, 2.0, 13.6),
            ground_state(1, 1, 1.0, 0.0),
        ];
        let dens = saha_dist(2.0, 1.0e19, 1.0e17, &states, 2);
        assert_relative_eq!(dens.sum(), 1.0e17, max_relative = 1e-12);
        assert!(dens.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn saha_ratio_matches_hand_evaluated_equation() {
        let t_ev = 1.5;
        let ne = 5.0e18;
        let chi = 13.6;
        let states = vec![
            ground_state(0, 0, 2.0, chi),
            ground_state(1, 1, 1.0, 0.0),
        ];

        let dens = saha_dist(t_ev, ne, 1.0e16, &states, 2);

        let expected_ratio =
            2.0 * (1.0 / 2.0) * saha_prefactor(t_ev) / ne * (-chi / t_ev).exp();
        assert_relative_eq!(dens[1] / dens[0], expected_ratio, max_relative = 1e-10);
    }

    #[test]
    fn saha_limits_are_neutral_when_cold_and_stripped_when_hot() {
        let states = vec![
            ground_state(0, 0, 2.0, 13.6),
            ground_state(1, 1, 1.0, 0.0),
        ];

        let cold = saha_dist(0.1, 1.0e20, 1.0, &states, 2);
        assert!(cold[0] > 0.999);

        let hot = saha_dist(1000.0, 1.0e20, 1.0, &states, 2);
        assert!(hot[1] > 0.999);
    }

    #[test]
    fn missing_stage_gets_zero_density() {
        let states = vec![ground_state(0, 0, 2.0, 13.6)];
        let dens = saha_dist(1.0, 1.0e19, 1.0, &states, 3);
        assert_relative_eq!(dens[0], 1.0, epsilon = 1e-12);
        assert_eq!(dens[1], 0.0);
        assert_eq!(dens[2], 0.0);
    }
}
