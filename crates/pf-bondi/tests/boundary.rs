//! Ghost cells on a Bondi grid.

use pf_bondi::{BondiBoundary, BondiSolution, apply_initial_condition};
use pf_core::units::{au, kelvin, msol};
use pf_core::{UnitSystem, units};
use pf_grid::{CellField, GridBuilder};

fn setup() -> (BondiSolution, CellField) {
    let system = UnitSystem::gravitational(au(1.0), msol(1.0)).unwrap();
    let cs2 = system.isothermal_sound_speed_squared(kelvin(500.0));
    let mass = system.mass_to_internal(msol(18.0));
    let rho_b = system.density_to_internal(units::kg_per_m3(1e-16));
    let solution = BondiSolution::new(system.g_internal(), mass, cs2, rho_b).unwrap();

    let r_b = solution.bondi_radius();
    let field = GridBuilder::uniform(0.1 * r_b, 2.0 * r_b, 200)
        .build()
        .unwrap();
    (solution, field)
}

#[test]
fn outer_ghost_matches_analytic_flow() {
    let (solution, mut field) = setup();
    apply_initial_condition(&mut field, &solution).unwrap();
    let boundary = BondiBoundary::new(&solution, &field).unwrap();
    boundary.apply_primitives(&mut field);

    let ghost = field.outer_ghost();
    let expected = solution.state_at(ghost.midpoint).unwrap();
    assert_eq!(ghost.rho, expected.rho);
    assert_eq!(ghost.u, expected.u);
    assert_eq!(ghost.p, solution.cs2() * ghost.rho);
    // subsonic inflow outside the Bondi radius
    assert!(ghost.u < 0.0 && ghost.u * ghost.u < solution.cs2());
}

#[test]
fn inner_ghost_copies_first_cell() {
    let (solution, mut field) = setup();
    apply_initial_condition(&mut field, &solution).unwrap();
    field.interior_mut()[0].grad_rho = 0.25;
    field.interior_mut()[0].rho *= 3.0;

    let boundary = BondiBoundary::new(&solution, &field).unwrap();
    boundary.apply_primitives(&mut field);
    boundary.apply_gradients(&mut field);

    let (ghost, first) = (field.inner_ghost(), &field.interior()[0]);
    assert_eq!(ghost.rho, first.rho);
    assert_eq!(ghost.u, first.u);
    assert_eq!(ghost.p, first.p);
    assert_eq!(ghost.grad_rho, 0.25);
}

#[test]
fn outer_gradients_keep_faces_bounded() {
    let (solution, mut field) = setup();
    // relax the interior towards the analytic profile so the last cell
    // differs from the ghost
    for cell in field.interior_mut() {
        let state = solution.state_at(cell.midpoint).unwrap();
        cell.rho = 1.1 * state.rho;
        cell.u = 1.1 * state.u;
        cell.p = solution.cs2() * cell.rho;
    }
    let boundary = BondiBoundary::new(&solution, &field).unwrap();
    boundary.apply_primitives(&mut field);
    boundary.apply_gradients(&mut field);

    let n = field.ncell();
    let last = field.cells()[n].clone();
    let ghost = field.outer_ghost();
    let beyond = solution
        .state_at(ghost.midpoint + ghost.width)
        .unwrap();
    let half = 0.5 * ghost.width;

    let pairs = [
        (ghost.rho, ghost.grad_rho, last.rho, beyond.rho),
        (ghost.u, ghost.grad_u, last.u, beyond.u),
        (ghost.p, ghost.grad_p, last.p, beyond.p),
    ];
    for (value, grad, a, b) in pairs {
        let (lo, hi) = (a.min(b), a.max(b));
        let slack = 1e-12 * hi.abs().max(lo.abs());
        for face in [value - half * grad, value + half * grad] {
            assert!(face >= lo - slack && face <= hi + slack);
        }
    }
}
