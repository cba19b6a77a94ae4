//! Grid-specific error types.

/// Grid construction and access errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Fewer than one interior cell was requested.
    Empty,

    /// A cell edge is NaN or infinite.
    NonFiniteEdge { index: usize, value: f64 },

    /// Edges are not strictly increasing.
    NonMonotonic { index: usize, lower: f64, upper: f64 },

    /// The innermost interior edge lies below the origin.
    NegativeRadius { value: f64 },

    /// Neighbouring cells do not share a face.
    Discontiguous { index: usize },

    /// Cell index outside `0..=ncell + 1`.
    IndexOob { index: usize, len: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Empty => write!(f, "Grid needs at least one interior cell"),
            GridError::NonFiniteEdge { index, value } => {
                write!(f, "Cell edge {} is not finite ({})", index, value)
            }
            GridError::NonMonotonic {
                index,
                lower,
                upper,
            } => {
                write!(
                    f,
                    "Cell {} has lower limit {} not below upper limit {}",
                    index, lower, upper
                )
            }
            GridError::NegativeRadius { value } => {
                write!(f, "Innermost interior radius {} is negative", value)
            }
            GridError::Discontiguous { index } => {
                write!(f, "Cell {} does not share a face with cell {}", index, index + 1)
            }
            GridError::IndexOob { index, len } => {
                write!(f, "Cell index {} out of bounds (len={})", index, len)
            }
        }
    }
}

impl std::error::Error for GridError {}

pub type GridResult<T> = Result<T, GridError>;
