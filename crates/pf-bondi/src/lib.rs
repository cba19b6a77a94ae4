//! pf-bondi: analytic isothermal Bondi accretion for boundary and initial
//! conditions.
//!
//! Contains:
//! - lambert_w (both real branches of the Lambert W function)
//! - solution (density, velocity and pressure of the steady inflow)
//! - boundary (outflow inner ghost, slope-limited analytic outer ghost)
//! - initial (uniform inflow initial condition)
//!
//! # Example
//!
//! ```
//! use pf_bondi::{BondiBoundary, BondiSolution, apply_initial_condition};
//! use pf_grid::GridBuilder;
//!
//! let solution = BondiSolution::new(1.0, 1.0, 0.25, 1.0).unwrap();
//! let mut field = GridBuilder::uniform(0.5, 10.0, 50).build().unwrap();
//! apply_initial_condition(&mut field, &solution).unwrap();
//!
//! let boundary = BondiBoundary::new(&solution, &field).unwrap();
//! boundary.apply_primitives(&mut field);
//! assert_eq!(field.outer_ghost().p, 0.25 * field.outer_ghost().rho);
//! ```

pub mod boundary;
pub mod error;
pub mod initial;
pub mod lambert_w;
pub mod solution;

pub use boundary::{BondiBoundary, limited_gradient};
pub use error::{BondiError, BondiResult};
pub use initial::apply_initial_condition;
pub use lambert_w::{Branch, lambert_w};
pub use solution::{BondiSolution, BondiState};
