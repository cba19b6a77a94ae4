//! Error types for driver operations.

use thiserror::Error;

/// Errors encountered while setting up or running a Bondi run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Ionization error: {0}")]
    Ionization(#[from] pf_ion::IonError),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pf_ion::TransportError> for SimError {
    fn from(e: pf_ion::TransportError) -> Self {
        SimError::Ionization(e.into())
    }
}

impl From<pf_bondi::BondiError> for SimError {
    fn from(e: pf_bondi::BondiError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<pf_grid::GridError> for SimError {
    fn from(e: pf_grid::GridError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<pf_core::PfError> for SimError {
    fn from(e: pf_core::PfError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<pf_project::ProjectError> for SimError {
    fn from(e: pf_project::ProjectError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
