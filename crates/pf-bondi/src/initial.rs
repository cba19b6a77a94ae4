//! Uniform inflow initial condition.

use crate::error::BondiResult;
use crate::solution::BondiSolution;
use pf_grid::CellField;
use rayon::prelude::*;

/// Fill every interior cell with the Bondi state at the outer grid radius,
/// isothermal pressure, point-mass gravity and fully ionized gas.
pub fn apply_initial_condition(field: &mut CellField, solution: &BondiSolution) -> BondiResult<()> {
    let rmax = field.rmax();
    let state = solution.state_at(rmax)?;
    let cs2 = solution.cs2();

    field.interior_mut().par_iter_mut().for_each(|cell| {
        cell.rho = state.rho;
        cell.u = state.u;
        cell.p = cs2 * state.rho;
        cell.a = solution.acceleration(cell.midpoint);
        cell.nfac = 0.0;
    });

    tracing::info!(rmax, rho = state.rho, u = state.u, "bondi initial condition");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_grid::GridBuilder;

    #[test]
    fn interior_gets_outer_state() {
        let solution = BondiSolution::new(1.0, 2.0, 0.5, 1.0).unwrap();
        let mut field = GridBuilder::uniform(1.0, 5.0, 8).build().unwrap();
        apply_initial_condition(&mut field, &solution).unwrap();

        let expected = solution.state_at(5.0).unwrap();
        for cell in field.interior() {
            assert_eq!(cell.rho, expected.rho);
            assert_eq!(cell.u, expected.u);
            assert_eq!(cell.p, 0.5 * expected.rho);
            assert_eq!(cell.a, -2.0 / (cell.midpoint * cell.midpoint));
            assert_eq!(cell.nfac, 0.0);
        }
        assert_eq!(field.outer_ghost().rho, 0.0);
    }
}
