//! pf-core: stable foundation for photoflow.
//!
//! Contains:
//! - units (internal unit system, physical constants, uom constructors)
//! - numeric (Real + tolerances + float helpers)
//! - atomic (lock-free f64 accumulator for parallel passes)
//! - timing (env-gated accumulating timers)
//! - error (shared error types)

pub mod atomic;
pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use atomic::AtomicF64;
pub use error::{PfError, PfResult};
pub use numeric::*;
pub use units::{UnitSystem, constants};
