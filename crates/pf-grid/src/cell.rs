//! Per-shell state record.

use pf_core::cube;

/// One radial shell of the 1-D spherical grid.
///
/// Geometry is fixed after grid construction. Hydrodynamic state belongs to
/// the hydro solver; the ionization engine only writes `nfac` (and `p` through
/// the pressure law), the boundary generator writes ghost state and
/// gradients. All values are in internal units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Lower radius of the shell
    pub lowlim: f64,
    /// Upper radius of the shell
    pub uplim: f64,
    /// Radius of the shell centre
    pub midpoint: f64,
    /// Shell thickness, `uplim - lowlim`
    pub width: f64,

    /// Mass density
    pub rho: f64,
    /// Radial velocity
    pub u: f64,
    /// Pressure
    pub p: f64,

    pub grad_rho: f64,
    pub grad_u: f64,
    pub grad_p: f64,

    /// Gravitational acceleration at the midpoint
    pub a: f64,

    /// Neutral fraction, in [0, 1]
    pub nfac: f64,
}

impl Cell {
    /// Create a cell spanning `[lowlim, uplim]` with zeroed state.
    pub fn new(lowlim: f64, uplim: f64) -> Self {
        Self {
            lowlim,
            uplim,
            midpoint: 0.5 * (lowlim + uplim),
            width: uplim - lowlim,
            ..Self::default()
        }
    }

    #[inline]
    pub fn ionized_fraction(&self) -> f64 {
        1.0 - self.nfac
    }

    /// `(uplim^3 - lowlim^3) / 3`, the shell volume without the `4 pi` factor.
    #[inline]
    pub fn reduced_volume(&self) -> f64 {
        (cube(self.uplim) - cube(self.lowlim)) / 3.0
    }
}
