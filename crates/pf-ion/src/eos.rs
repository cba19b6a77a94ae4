//! Isothermal pressure law with a hotter ionized phase.

use pf_grid::Cell;
use rayon::prelude::*;

/// `P = cs^2 rho (contrast (1 - nfac) + nfac)`.
///
/// Neutral gas follows the isothermal law; fully ionized gas has its
/// pressure raised by `pressure_contrast`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureLaw {
    /// Isothermal sound speed squared, internal units
    pub cs2: f64,
    pub pressure_contrast: f64,
}

impl PressureLaw {
    pub fn new(cs2: f64, pressure_contrast: f64) -> Self {
        Self {
            cs2,
            pressure_contrast,
        }
    }

    #[inline]
    pub fn pressure(&self, rho: f64, nfac: f64) -> f64 {
        let ifac = 1.0 - nfac;
        self.cs2 * rho * (self.pressure_contrast * ifac + nfac)
    }

    /// Pressure used to set up the initial state.
    #[inline]
    pub fn initial_pressure(&self, rho: f64) -> f64 {
        self.cs2 * rho
    }

    /// Recompute `p` of every cell from its density and neutral fraction.
    pub fn apply(&self, cells: &mut [Cell]) {
        cells.par_iter_mut().for_each(|cell| {
            cell.p = self.pressure(cell.rho, cell.nfac);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_and_ionized_limits() {
        let law = PressureLaw::new(2.0, 32.0);
        assert_eq!(law.pressure(3.0, 1.0), 6.0);
        assert_eq!(law.pressure(3.0, 0.0), 192.0);
        assert_eq!(law.pressure(3.0, 0.5), 0.5 * 6.0 + 0.5 * 192.0);
        assert_eq!(law.initial_pressure(3.0), law.pressure(3.0, 1.0));
    }

    #[test]
    fn apply_updates_every_cell() {
        let law = PressureLaw::new(1.0, 10.0);
        let mut cells: Vec<Cell> = (0..3)
            .map(|i| {
                let mut c = Cell::new(i as f64, i as f64 + 1.0);
                c.rho = 2.0;
                c.nfac = 0.5 * i as f64;
                c
            })
            .collect();
        law.apply(&mut cells);
        let p: Vec<f64> = cells.iter().map(|c| c.p).collect();
        assert_eq!(p, vec![20.0, 11.0, 2.0]);
    }
}
