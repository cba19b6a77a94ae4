//! Self-consistent ionization radius.
//!
//! The source emits a fixed ionizing budget per unit time. In photoionization
//! equilibrium each shell absorbs `alpha_B n^2 V`, so (up to constants that
//! cancel) a shell costs `(rmax^3 - rmin^3) / 3 * rho^2` and the ionization
//! radius is where the cumulative cost from the centre outward reaches the
//! budget.

use pf_core::cube;
use pf_grid::Cell;
use rayon::prelude::*;

/// Absorption weight of one shell, `(rmax^3 - rmin^3) / 3 * rho^2`.
#[inline]
pub fn shell_weight(cell: &Cell) -> f64 {
    cell.reduced_volume() * cell.rho * cell.rho
}

/// Write the absorption weight of each cell into `weights` (parallel).
pub fn shell_weights(cells: &[Cell], weights: &mut Vec<f64>) {
    weights.clear();
    cells.par_iter().map(shell_weight).collect_into_vec(weights);
}

/// Budget needed to ionize everything inside `radius`.
///
/// Shells entirely inside count in full; the shell straddling `radius`
/// counts with its volume fraction below `radius`.
pub fn budget_inside(cells: &[Cell], radius: f64) -> f64 {
    cells
        .iter()
        .map(|cell| {
            let w = shell_weight(cell);
            if cell.uplim < radius {
                w
            } else if cell.lowlim < radius {
                let fraction =
                    (cube(radius) - cube(cell.lowlim)) / (cube(cell.uplim) - cube(cell.lowlim));
                w * fraction
            } else {
                0.0
            }
        })
        .sum()
}

/// Sequential scan from the innermost shell outward.
///
/// Returns 0 if the budget is not positive, and the outer edge of the last
/// shell if the budget exceeds the total weight.
pub fn scan_radius(cells: &[Cell], weights: &[f64], budget: f64) -> f64 {
    debug_assert_eq!(cells.len(), weights.len());

    let mut remaining = budget;
    let mut rion = 0.0;
    for (cell, &w) in cells.iter().zip(weights) {
        if remaining <= 0.0 {
            break;
        }
        let ifac = (remaining / w).min(1.0);
        if ifac >= 1.0 {
            rion = cell.uplim;
        } else if ifac > 0.0 {
            rion = (ifac * cube(cell.uplim) + (1.0 - ifac) * cube(cell.lowlim)).cbrt();
        }
        remaining -= ifac * w;
    }
    rion
}

/// Luminosity scaling with central-mass growth, `m` in units of the initial
/// mass. Equal to 1 at `m = 1`.
pub fn luminosity_factor(m: f64) -> f64 {
    7.961_858_73 * (m.powf(2.476_929_87) - 1.0) + 1.0
}

/// Central point mass, grown by the mass that leaves through the inner
/// boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct CentralMass {
    initial: f64,
    mass: f64,
    /// Fraction of the inner-boundary mass flux added to the central mass.
    /// Growth is disabled at 0.
    volume_correction_factor: f64,
}

impl CentralMass {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            mass: initial,
            volume_correction_factor: 0.0,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Account for the (negative, inflowing) mass flux through the inner
    /// mask.
    pub fn record_inner_mask_flux(&mut self, mflux: f64) {
        self.mass -= mflux * self.volume_correction_factor;
    }

    pub fn luminosity_factor(&self) -> f64 {
        if self.initial > 0.0 {
            luminosity_factor(self.mass / self.initial)
        } else {
            1.0
        }
    }
}

/// Radius solver holding the fixed total budget and a weight scratch buffer.
#[derive(Clone, Debug)]
pub struct SelfConsistentSolver {
    budget: f64,
    weights: Vec<f64>,
}

impl SelfConsistentSolver {
    /// Derive the budget from the density field at construction so that the
    /// initial state is ionized out to `initial_radius`.
    pub fn from_initial_radius(cells: &[Cell], initial_radius: f64) -> Self {
        let budget = budget_inside(cells, initial_radius);
        tracing::info!(budget, initial_radius, "self-consistent ionization budget");
        Self::with_budget(budget)
    }

    pub fn with_budget(budget: f64) -> Self {
        Self {
            budget,
            weights: Vec::new(),
        }
    }

    /// Unscaled total budget.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Ionization radius of `cells` with the budget multiplied by `scale`.
    pub fn solve(&mut self, cells: &[Cell], scale: f64) -> f64 {
        shell_weights(cells, &mut self.weights);
        scan_radius(cells, &self.weights, self.budget * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{Tolerances, nearly_equal};

    fn uniform_cells(n: usize, rho: f64) -> Vec<Cell> {
        (0..n)
            .map(|i| {
                let mut c = Cell::new(1.0 + i as f64, 2.0 + i as f64);
                c.rho = rho;
                c
            })
            .collect()
    }

    #[test]
    fn budget_of_first_k_shells_lands_on_boundary() {
        let cells = uniform_cells(20, 3.0);
        let tol = Tolerances {
            abs: 0.0,
            rel: 1e-12,
        };
        for k in 1..20 {
            let budget: f64 = cells[..k].iter().map(shell_weight).sum();
            let mut solver = SelfConsistentSolver::with_budget(budget);
            let rion = solver.solve(&cells, 1.0);
            assert!(
                nearly_equal(rion, cells[k - 1].uplim, tol),
                "k={k}: rion={rion}"
            );
        }
    }

    #[test]
    fn budget_inside_round_trips_through_scan() {
        let cells = uniform_cells(10, 1.0);
        let r0 = 5.3;
        let mut solver = SelfConsistentSolver::from_initial_radius(&cells, r0);
        let rion = solver.solve(&cells, 1.0);
        assert!((rion - r0).abs() < 1e-10);
    }

    #[test]
    fn scaled_budget_moves_radius_out() {
        let cells = uniform_cells(10, 1.0);
        let mut solver = SelfConsistentSolver::from_initial_radius(&cells, 4.0);
        let r1 = solver.solve(&cells, 1.0);
        let r2 = solver.solve(&cells, 2.0);
        assert!(r2 > r1);
    }

    #[test]
    fn oversized_budget_saturates_at_outer_edge() {
        let cells = uniform_cells(5, 1.0);
        let mut solver = SelfConsistentSolver::with_budget(1e30);
        assert_eq!(solver.solve(&cells, 1.0), 6.0);
    }

    #[test]
    fn empty_budget_gives_zero_radius() {
        let cells = uniform_cells(5, 1.0);
        let mut solver = SelfConsistentSolver::with_budget(0.0);
        assert_eq!(solver.solve(&cells, 1.0), 0.0);
    }

    #[test]
    fn vacuum_shells_are_free() {
        let mut cells = uniform_cells(6, 1.0);
        cells[0].rho = 0.0;
        cells[1].rho = 0.0;
        let budget = shell_weight(&cells[2]);
        let mut solver = SelfConsistentSolver::with_budget(budget);
        let rion = solver.solve(&cells, 1.0);
        assert!((rion - cells[2].uplim).abs() < 1e-12);
    }

    #[test]
    fn luminosity_factor_is_one_without_growth() {
        let mut cm = CentralMass::new(18.0);
        cm.record_inner_mask_flux(-5.0);
        assert_eq!(cm.mass(), 18.0);
        assert_eq!(cm.luminosity_factor(), 1.0);
        assert!(luminosity_factor(2.0) > 1.0);
    }
}
