//! Steady isothermal Bondi accretion onto a point mass.
//!
//! In terms of the inverse radius `rinv = R_B / r` with `R_B = G M / (2 cs^2)`
//! the flow speed solves
//!
//! ```text
//! u^2 / cs^2 = -W(-exp(3 + 4 (ln rinv - rinv)))
//! ```
//!
//! taking the principal branch outside the sonic point (subsonic inflow) and
//! the lower branch inside it.

use crate::error::{BondiError, BondiResult};
use crate::lambert_w::{Branch, lambert_w};

/// Beyond this inverse radius the density is set to zero; the Lambert W
/// argument underflows long before.
const RINV_CUTOFF: f64 = 150.0;

/// Primitive state of the analytic flow at one radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondiState {
    pub rho: f64,
    pub u: f64,
    pub p: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondiSolution {
    /// `G M`, internal units
    gm: f64,
    cs2: f64,
    /// Density at the Bondi radius
    density: f64,
    bondi_radius: f64,
}

impl BondiSolution {
    /// `g` and `mass` give the point mass's `G M`; `cs2` is the isothermal
    /// sound speed squared and `density` the density at the Bondi radius.
    pub fn new(g: f64, mass: f64, cs2: f64, density: f64) -> BondiResult<Self> {
        let gm = g * mass;
        if !(gm.is_finite() && gm > 0.0) {
            return Err(BondiError::InvalidParameter { what: "G M" });
        }
        if !(cs2.is_finite() && cs2 > 0.0) {
            return Err(BondiError::InvalidParameter { what: "cs2" });
        }
        if !(density.is_finite() && density >= 0.0) {
            return Err(BondiError::InvalidParameter {
                what: "bondi density",
            });
        }
        Ok(Self {
            gm,
            cs2,
            density,
            bondi_radius: 0.5 * gm / cs2,
        })
    }

    pub fn bondi_radius(&self) -> f64 {
        self.bondi_radius
    }

    pub fn cs2(&self) -> f64 {
        self.cs2
    }

    /// Point-mass gravitational acceleration at `r`.
    pub fn acceleration(&self, r: f64) -> f64 {
        -self.gm / (r * r)
    }

    pub fn inverse_radius(&self, r: f64) -> f64 {
        self.bondi_radius / r
    }

    /// Squared Mach number of the inflow at inverse radius `rinv`.
    pub fn u2_over_cs2(&self, rinv: f64) -> BondiResult<f64> {
        let arg = -(3.0 + 4.0 * (rinv.ln() - rinv)).exp();
        let branch = if rinv < 1.0 {
            Branch::Principal
        } else {
            Branch::Lower
        };
        Ok(-lambert_w(arg, branch)?)
    }

    pub fn density(&self, rinv: f64) -> BondiResult<f64> {
        if rinv >= RINV_CUTOFF {
            return Ok(0.0);
        }
        Ok(self.density * (-0.5 * self.u2_over_cs2(rinv)? + 2.0 * rinv - 1.5).exp())
    }

    pub fn velocity(&self, rinv: f64) -> BondiResult<f64> {
        Ok(-(self.cs2 * self.u2_over_cs2(rinv)?).sqrt())
    }

    pub fn pressure(&self, rinv: f64) -> BondiResult<f64> {
        Ok(self.cs2 * self.density(rinv)?)
    }

    /// Density, velocity and pressure at radius `r`.
    pub fn state_at(&self, r: f64) -> BondiResult<BondiState> {
        let rinv = self.inverse_radius(r);
        let rho = self.density(rinv)?;
        Ok(BondiState {
            rho,
            u: self.velocity(rinv)?,
            p: self.cs2 * rho,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> BondiSolution {
        // R_B = 0.5 * 2 * 3 / 0.75 = 4
        BondiSolution::new(2.0, 3.0, 0.75, 1.5).unwrap()
    }

    #[test]
    fn sonic_point_is_at_bondi_radius() {
        let s = solution();
        assert_eq!(s.bondi_radius(), 4.0);
        let m2 = s.u2_over_cs2(1.0).unwrap();
        assert!((m2 - 1.0).abs() < 1e-6);
        // rho_B exp(-0.5 + 2 - 1.5) = rho_B
        assert!((s.density(1.0).unwrap() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn inflow_is_subsonic_outside_and_supersonic_inside() {
        let s = solution();
        assert!(s.u2_over_cs2(0.5).unwrap() < 1.0);
        assert!(s.u2_over_cs2(2.0).unwrap() > 1.0);
        assert!(s.velocity(0.5).unwrap() < 0.0);
    }

    #[test]
    fn pressure_is_isothermal() {
        let s = solution();
        for &r in &[1.0, 3.9, 4.0, 4.1, 20.0] {
            let state = s.state_at(r).unwrap();
            assert_eq!(state.p, 0.75 * state.rho);
        }
    }

    #[test]
    fn mass_flux_is_constant() {
        // rho |u| r^2 = rho_B cs R_B^2 everywhere
        let s = solution();
        let expected = 1.5 * 0.75_f64.sqrt() * 16.0;
        for &r in &[0.5, 1.0, 2.0, 3.0, 5.0, 10.0, 100.0] {
            let state = s.state_at(r).unwrap();
            let flux = state.rho * state.u.abs() * r * r;
            assert!(
                ((flux - expected) / expected).abs() < 1e-9,
                "r={r}: flux={flux}"
            );
        }
    }

    #[test]
    fn profile_is_continuous_across_sonic_point() {
        let s = solution();
        let inside = s.state_at(4.0 * (1.0 - 1e-7)).unwrap();
        let outside = s.state_at(4.0 * (1.0 + 1e-7)).unwrap();
        assert!((inside.rho - outside.rho).abs() < 1e-5);
        assert!((inside.u - outside.u).abs() < 1e-5);
    }

    #[test]
    fn density_vanishes_deep_inside() {
        let s = solution();
        assert_eq!(s.density(200.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_unphysical_parameters() {
        assert!(BondiSolution::new(1.0, 0.0, 1.0, 1.0).is_err());
        assert!(BondiSolution::new(1.0, 1.0, -1.0, 1.0).is_err());
        assert!(BondiSolution::new(1.0, 1.0, 1.0, f64::NAN).is_err());
    }
}
