//! Ghost-cell conditions for a Bondi inflow problem.
//!
//! The inner boundary is plain outflow. The outer ghost cell carries the
//! analytic Bondi state at its midpoint, and its gradients are finite
//! differences towards the analytic state one cell further out, limited so
//! the reconstructed face values stay within the range spanned by the last
//! interior cell and the analytic value.

use crate::error::BondiResult;
use crate::solution::{BondiSolution, BondiState};
use pf_grid::CellField;

/// Slope-limited gradient for the outer ghost cell.
///
/// `interior` is the value in the last interior cell, `analytic` the value
/// one ghost width beyond the ghost midpoint, `ghost` the ghost cell value.
pub fn limited_gradient(interior: f64, analytic: f64, ghost: f64, dx: f64) -> f64 {
    let grad = (analytic - interior) / dx;
    if grad == 0.0 {
        return 0.0;
    }
    let hi = interior.max(analytic);
    let lo = interior.min(analytic);
    let ext_plus = 0.5 * dx * grad;
    let ext_minus = -0.5 * dx * grad;
    let ext_hi = ext_plus.max(ext_minus);
    let ext_lo = ext_plus.min(ext_minus);
    let alpha = (0.5 * ((hi - ghost) / ext_hi).min((lo - ghost) / ext_lo)).min(1.0);
    alpha * grad
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondiBoundary {
    /// Analytic state at the outer ghost midpoint
    ghost: BondiState,
    /// Analytic state one ghost width further out
    beyond: BondiState,
    dx: f64,
}

impl BondiBoundary {
    pub fn new(solution: &BondiSolution, field: &CellField) -> BondiResult<Self> {
        let outer = field.outer_ghost();
        let dx = outer.width;
        let ghost = solution.state_at(outer.midpoint)?;
        let beyond = solution.state_at(outer.midpoint + dx)?;
        tracing::debug!(?ghost, ?beyond, "bondi outer boundary");
        Ok(Self { ghost, beyond, dx })
    }

    pub fn ghost_state(&self) -> BondiState {
        self.ghost
    }

    /// Set ghost densities, velocities and pressures.
    pub fn apply_primitives(&self, field: &mut CellField) {
        let n = field.ncell();
        let cells = field.cells_mut();

        let (rho, u, p) = (cells[1].rho, cells[1].u, cells[1].p);
        let inner = &mut cells[0];
        inner.rho = rho;
        inner.u = u;
        inner.p = p;

        let outer = &mut cells[n + 1];
        outer.rho = self.ghost.rho;
        outer.u = self.ghost.u;
        outer.p = self.ghost.p;
    }

    /// Set ghost gradients. Call after the interior gradients are known and
    /// after [`apply_primitives`](Self::apply_primitives).
    pub fn apply_gradients(&self, field: &mut CellField) {
        let n = field.ncell();
        let cells = field.cells_mut();

        let (grad_rho, grad_u, grad_p) = (cells[1].grad_rho, cells[1].grad_u, cells[1].grad_p);
        let inner = &mut cells[0];
        inner.grad_rho = grad_rho;
        inner.grad_u = grad_u;
        inner.grad_p = grad_p;

        let (last, rest) = cells[n..].split_at_mut(1);
        let (last, outer) = (&last[0], &mut rest[0]);
        outer.grad_rho = limited_gradient(last.rho, self.beyond.rho, outer.rho, self.dx);
        outer.grad_u = limited_gradient(last.u, self.beyond.u, outer.u, self.dx);
        outer.grad_p = limited_gradient(last.p, self.beyond.p, outer.p, self.dx);
    }
}
