use super::state::StateId;
use crate::core::catalog::records::TransitionRecord;
use serde::Deserialize;
use std::fmt;

/// Physical process represented by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Collisional ionization (carries a detailed-balance inverse).
    Ionization,
    /// Autoionization of a state above its stage's ionization threshold.
    Autoionization,
    /// Radiative recombination.
    RadiativeRecombination,
    /// Spontaneous emission.
    Emission,
    /// Collisional excitation (carries a detailed-balance inverse).
    Excitation,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ionization => "ionization",
            Self::Autoionization => "autoionization",
            Self::RadiativeRecombination => "radiative_recombination",
            Self::Emission => "emission",
            Self::Excitation => "excitation",
        };
        write!(f, "{name}")
    }
}

/// One directed process connecting two tracked states.
///
/// Endpoints are referenced by stable [`StateId`]; the cached `from_pos` /
/// `to_pos` indices are refreshed by the position indexer whenever state
/// positions change. A transition is valid only while both endpoints are part
/// of the evolved state set; the integrity checker prunes the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub from_id: StateId,
    pub to_id: StateId,
    /// Transition (threshold) energy, in the same normalized units as the
    /// shared energy grid.
    pub delta_e: f64,
    /// Cross-section data tabulated on the catalog energy grid. Empty for
    /// emission transitions, which carry a rate instead.
    pub sigma: Vec<f64>,
    /// Spontaneous rate, for emission transitions.
    pub rate: Option<f64>,
    /// Statistical-weight ratio `g_from / g_to` of the endpoints, set when
    /// inverse-process data is derived.
    pub stat_weight_ratio: Option<f64>,
    /// Inverse-process cross-section derived from `sigma` by detailed balance:
    /// de-excitation for excitation transitions, three-body-recombination-like
    /// data for ionization transitions.
    pub sigma_inverse: Option<Vec<f64>>,
    /// Cached position of the `from` state; refreshed by the position indexer.
    pub from_pos: usize,
    /// Cached position of the `to` state; refreshed by the position indexer.
    pub to_pos: usize,
}

impl Transition {
    /// Materializes a transition from a raw catalog record.
    pub fn from_record(record: TransitionRecord) -> Self {
        Self {
            kind: record.kind,
            from_id: StateId(record.from_id),
            to_id: StateId(record.to_id),
            delta_e: record.delta_e,
            sigma: record.sigma,
            rate: record.rate,
            stat_weight_ratio: None,
            sigma_inverse: None,
            from_pos: 0,
            to_pos: 0,
        }
    }

    /// Attaches inverse-process data derived from the forward cross-section.
    ///
    /// `g_ratio` is the statistical-weight ratio `g_from / g_to` of the
    /// transition's endpoints.
    pub fn set_inverse_data(&mut self, g_ratio: f64, vgrid: &[f64]) {
        self.stat_weight_ratio = Some(g_ratio);
        self.sigma_inverse = Some(detailed_balance_inverse(
            &self.sigma,
            vgrid,
            self.delta_e,
            g_ratio,
        ));
    }
}

/// Derives an inverse-process cross-section from forward data by detailed
/// balance over the electron velocity grid.
///
/// Works in normalized units in which the grid energy equals the squared
/// velocity. For each grid velocity `v` the forward cross-section is sampled
/// at the shifted collision velocity `v' = sqrt(v^2 + delta_e)` and scaled by
/// `g_ratio * (v' / v)^2`, so that the forward and inverse rates satisfy
/// `g_from * v'^2 * sigma(v') = g_to * v^2 * sigma_inv(v)`.
pub fn detailed_balance_inverse(
    sigma: &[f64],
    vgrid: &[f64],
    delta_e: f64,
    g_ratio: f64,
) -> Vec<f64> {
    vgrid
        .iter()
        .map(|&v| {
            if v <= 0.0 {
                return 0.0;
            }
            let v_shift = (v * v + delta_e.max(0.0)).sqrt();
            let forward = interp(vgrid, sigma, v_shift);
            g_ratio * (v_shift / v).powi(2) * forward
        })
        .collect()
}

/// Linear interpolation on a monotonically increasing grid, clamped flat
/// outside the tabulated range.
fn interp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if xs.is_empty() || ys.len() != xs.len() {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    let hi = xs.partition_point(|&g| g < x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_vgrid(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64 * 0.5).collect()
    }

    #[test]
    fn interp_is_exact_at_grid_points_and_clamped_outside() {
        let xs = [1.0, 2.0, 4.0];
        let ys = [10.0, 20.0, 40.0];
        assert_eq!(interp(&xs, &ys, 2.0), 20.0);
        assert_eq!(interp(&xs, &ys, 3.0), 30.0);
        assert_eq!(interp(&xs, &ys, 0.5), 10.0);
        assert_eq!(interp(&xs, &ys, 9.0), 40.0);
    }

    #[test]
    fn zero_threshold_unit_ratio_reproduces_forward_data() {
        let vgrid = uniform_vgrid(8);
        let sigma: Vec<f64> = vgrid.iter().map(|v| 1.0 / v).collect();

        let inverse = detailed_balance_inverse(&sigma, &vgrid, 0.0, 1.0);

        for (&fwd, &inv) in sigma.iter().zip(&inverse) {
            assert_relative_eq!(fwd, inv, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_scales_linearly_with_stat_weight_ratio() {
        let vgrid = uniform_vgrid(6);
        let sigma = vec![2.0; 6];

        let base = detailed_balance_inverse(&sigma, &vgrid, 0.4, 1.0);
        let scaled = detailed_balance_inverse(&sigma, &vgrid, 0.4, 3.0);

        for (&b, &s) in base.iter().zip(&scaled) {
            assert_relative_eq!(3.0 * b, s, epsilon = 1e-12);
        }
    }

    #[test]
    fn threshold_shift_amplifies_low_velocity_points_most() {
        let vgrid = uniform_vgrid(6);
        let sigma = vec![1.0; 6];

        let inverse = detailed_balance_inverse(&sigma, &vgrid, 1.0, 1.0);

        // (v'/v)^2 = 1 + delta_e / v^2 decreases with v for flat sigma.
        for pair in inverse.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert!(inverse.iter().all(|&s| s >= 1.0));
    }

    #[test]
    fn set_inverse_data_populates_ratio_and_sigma() {
        let vgrid = uniform_vgrid(4);
        let record = TransitionRecord {
            kind: TransitionKind::Excitation,
            from_id: 0,
            to_id: 1,
            delta_e: 0.2,
            sigma: vec![1.0, 0.8, 0.6, 0.5],
            rate: None,
        };
        let mut trans = Transition::from_record(record);
        assert!(trans.sigma_inverse.is_none());

        trans.set_inverse_data(0.5, &vgrid);

        assert_eq!(trans.stat_weight_ratio, Some(0.5));
        assert_eq!(trans.sigma_inverse.as_ref().unwrap().len(), vgrid.len());
    }
}
