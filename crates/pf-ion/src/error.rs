//! Error types for the ionization engine.

use pf_core::PfError;
use pf_grid::GridError;
use thiserror::Error;

/// Fatal conditions of the Monte Carlo transport step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Photon bank overflow: {requested} packets banked, capacity {capacity}")]
    BankOverflow { requested: usize, capacity: usize },

    #[error("Invalid transport parameter: {what}")]
    InvalidArg { what: &'static str },
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Errors encountered while advancing the ionization state.
#[derive(Error, Debug)]
pub enum IonError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Numeric error: {0}")]
    Core(#[from] PfError),

    #[error("Radius log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt radius log: {trailing} trailing bytes")]
    CorruptLog { trailing: usize },
}

pub type IonResult<T> = Result<T, IonError>;
