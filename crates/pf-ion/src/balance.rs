//! Closed-form ionization balance for one shell over one step.
//!
//! The ionized fraction `x` obeys
//!
//! ```text
//! dx/dt = (1 - x) J - x^2 C,     C = alpha_B n_H
//! ```
//!
//! with `J` (the photoionization rate per neutral atom) constant over the
//! step. This is a Riccati equation with an exact `tanh` solution, so no
//! numerical stepping is needed.

/// Smallest neutral fraction written when a fully neutral shell saturates.
pub const NEUTRAL_FLOOR: f64 = 1e-8;

/// Ionized and neutral fraction after an update. `ionized + neutral == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceState {
    pub ionized: f64,
    pub neutral: f64,
}

impl BalanceState {
    fn from_ionized(ionized: f64) -> Self {
        let ionized = ionized.clamp(0.0, 1.0);
        Self {
            ionized,
            neutral: 1.0 - ionized,
        }
    }
}

/// Recombination rate per ion, `alpha_B n_H` (s^-1).
#[inline]
pub fn recombination_rate(alpha_b: f64, n_h: f64) -> f64 {
    alpha_b * n_h
}

/// Advance the ionized fraction `ft0` of a shell with current neutral
/// fraction `nfac` by `delta` seconds.
///
/// - fully neutral shell: linear growth `ft0 + J delta`, saturating at
///   `1 - NEUTRAL_FLOOR`;
/// - no illumination or fully ionized shell: pure recombination;
/// - otherwise the Riccati solution.
pub fn advance_ionized_fraction(
    ft0: f64,
    nfac: f64,
    jmean: f64,
    con_b: f64,
    delta: f64,
) -> BalanceState {
    if nfac == 1.0 {
        let ifrac = ft0 + jmean * delta;
        if ifrac > 1.0 {
            return BalanceState {
                ionized: 1.0 - NEUTRAL_FLOOR,
                neutral: NEUTRAL_FLOOR,
            };
        }
        return BalanceState::from_ionized(ifrac);
    }

    if jmean == 0.0 || nfac == 0.0 {
        if ft0 <= 0.0 {
            return BalanceState::from_ionized(0.0);
        }
        return BalanceState::from_ionized(1.0 / (1.0 / ft0 + con_b * delta));
    }

    let ior = jmean / con_b;
    let root2 = ior * (ior + 4.0);
    if con_b <= 0.0 || !root2.is_finite() {
        // recombinations negligible: dx/dt = (1 - x) J
        return BalanceState::from_ionized(1.0 - (1.0 - ft0) * (-jmean * delta).exp());
    }

    let root = root2.sqrt();
    let arg = (2.0 * ft0 + ior) / root;
    let t = (0.5 * con_b * root * delta).tanh();
    let ifrac = 0.5 * root * (arg + t) / (1.0 + arg * t) - 0.5 * ior;
    BalanceState::from_ionized(ifrac)
}
