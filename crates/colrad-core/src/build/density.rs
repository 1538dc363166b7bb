use crate::core::equilibrium::{boltzmann_dist, saha_dist};
use crate::core::io::profiles::PlasmaProfile;
use crate::core::models::impurity::{ElectronScheme, InitPolicy, Normalization};
use crate::core::models::state::State;
use nalgebra::DMatrix;
use tracing::info;

/// Initializes the state density arrays, one row per plasma-profile sample
/// and one column per evolved state in current list order.
///
/// In Saha-Boltzmann mode each sample's total density is distributed across
/// ionization stages by a Saha equilibrium at the physical (de-normalized)
/// temperature and density, then across each stage's states by a Boltzmann
/// weighting on energy above ground and statistical weight, normalized so the
/// per-stage relative populations sum to one; with fixed-fraction
/// initialization the whole impurity is additionally rescaled to
/// `frac_imp_dens * ne` at that sample. In non-equilibrium mode only the
/// first evolved state is populated, with `frac_imp_dens * ne` or unit
/// density.
///
/// Runs after the integrity checker, on the final state ordering, so the list
/// index used here equals the position assigned by the subsequent indexing
/// pass.
pub fn init_dens(
    states: &[State],
    num_z: usize,
    electrons: ElectronScheme,
    init: InitPolicy,
    norms: &Normalization,
    profile: &PlasmaProfile,
) -> (Option<DMatrix<f64>>, Option<DMatrix<f64>>) {
    let samples = profile.len();
    let tot_states = states.len();
    let mut dens = electrons
        .kinetic
        .then(|| DMatrix::zeros(samples, tot_states));
    let mut dens_max = electrons
        .maxwellian
        .then(|| DMatrix::zeros(samples, tot_states));

    if init.saha_boltzmann {
        info!(samples, "initialising densities to Saha-Boltzmann equilibria");
        // Stage membership, by current list index (= final position).
        let stage_members: Vec<Vec<usize>> = (0..num_z)
            .map(|z| {
                states
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.z as usize == z)
                    .map(|(col, _)| col)
                    .collect()
            })
            .collect();

        for i in 0..samples {
            let stage_dens = saha_dist(
                profile.te[i] * norms.t_norm,
                profile.ne[i] * norms.n_norm,
                norms.n_norm,
                states,
                num_z,
            ) / norms.n_norm;

            for (z, members) in stage_members.iter().enumerate() {
                if members.is_empty() {
                    continue;
                }
                let energies: Vec<f64> =
                    members.iter().map(|&c| states[c].energy_from_gs).collect();
                let weights: Vec<f64> = members.iter().map(|&c| states[c].stat_weight).collect();

                let rel = boltzmann_dist(profile.te[i] * norms.t_norm, &energies, &weights);
                let total: f64 = rel.iter().sum();
                if total <= 0.0 {
                    continue;
                }

                let scale = if init.fixed_fraction {
                    init.frac_imp_dens * profile.ne[i]
                } else {
                    1.0
                };
                for (&col, r) in members.iter().zip(&rel) {
                    let value = r / total * stage_dens[z] * scale;
                    if let Some(d) = dens.as_mut() {
                        d[(i, col)] = value;
                    }
                    if let Some(d) = dens_max.as_mut() {
                        d[(i, col)] = value;
                    }
                }
            }
        }
    } else if tot_states > 0 {
        info!(samples, "initialising densities to first evolved state");
        for i in 0..samples {
            let value = if init.fixed_fraction {
                init.frac_imp_dens * profile.ne[i]
            } else {
                1.0
            };
            if let Some(d) = dens.as_mut() {
                d[(i, 0)] = value;
            }
            if let Some(d) = dens_max.as_mut() {
                d[(i, 0)] = value;
            }
        }
    }

    (dens, dens_max)
}
