//! Ionization engine for 1-D spherical accretion flows.
//!
//! Each hydro step the engine decides which fraction of every shell is
//! neutral, using one of three interchangeable models:
//! - a constant ionization radius,
//! - a self-consistent radius that balances the source's ionizing budget
//!   against recombinations in the shells,
//! - time-dependent Monte Carlo photon transfer with a closed-form
//!   ionization balance per shell.
//!
//! The neutral fraction then feeds the pressure law in [`eos`].
//!
//! # Example
//!
//! ```
//! use pf_core::units::{kg, m, s};
//! use pf_core::UnitSystem;
//! use pf_grid::GridBuilder;
//! use pf_ion::{CentralMass, IonizationEngine, IonizationModel, StepContext, TransitionProfile};
//!
//! let mut field = GridBuilder::uniform(0.0, 10.0, 10).build().unwrap();
//! let units = UnitSystem::new(m(1.0), kg(1.0), s(1.0)).unwrap();
//! let mut engine = IonizationEngine::new(
//!     IonizationModel::constant(5.0),
//!     TransitionProfile::Jump,
//!     units,
//!     CentralMass::new(1.0),
//! );
//! let report = engine.step(&mut field, &StepContext::new(0, 1.0, 1.0)).unwrap();
//! assert_eq!(report.radius, 5.0);
//! assert_eq!(field.interior()[0].nfac, 0.0);
//! assert_eq!(field.interior()[9].nfac, 1.0);
//! ```

pub mod balance;
pub mod engine;
pub mod eos;
pub mod error;
pub mod profile;
pub mod radius;
pub mod radius_log;
pub mod transport;

// Re-exports for public API
pub use balance::{BalanceState, advance_ionized_fraction};
pub use engine::{IonizationEngine, IonizationModel, StepContext, StepReport};
pub use eos::PressureLaw;
pub use error::{IonError, IonResult, TransportError, TransportResult};
pub use profile::{SmoothTransition, TransitionProfile};
pub use radius::{CentralMass, SelfConsistentSolver};
pub use radius_log::{RadiusLog, RadiusRecord, read_radius_log};
pub use transport::{MonteCarloTransport, ShellRadiation, TransportConfig, TransportTally};
