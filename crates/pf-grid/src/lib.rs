//! pf-grid: radial cell field shared between the hydro solver and the
//! ionization engine.
//!
//! Provides:
//! - The per-shell [`Cell`] record (geometry, hydro state, neutral fraction)
//! - [`CellField`], an ordered array of cells with ghost cells at both ends
//! - [`GridBuilder`] for uniform or explicit-edge radial grids, with validation
//!
//! # Example
//!
//! ```
//! use pf_grid::GridBuilder;
//!
//! let field = GridBuilder::uniform(1.0, 11.0, 10).build().unwrap();
//! assert_eq!(field.ncell(), 10);
//! assert_eq!(field.cells().len(), 12);
//! assert_eq!(field.interior()[0].lowlim, 1.0);
//! ```

pub mod builder;
pub mod cell;
pub mod error;
pub mod field;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GridBuilder;
pub use cell::Cell;
pub use error::{GridError, GridResult};
pub use field::CellField;
