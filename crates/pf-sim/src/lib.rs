//! Static-hydro driver for the photoflow ionization engine.
//!
//! Provides:
//! - run setup from a validated [`pf_project::RunConfig`]
//! - a fixed-step loop applying Bondi boundaries, the ionization step and
//!   the pressure law to a frozen accretion flow
//! - ionization radius history recording

pub mod error;
pub mod setup;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use setup::BondiRun;
pub use sim::{SimOptions, SimRecord, run_sim};
