//! Grid validation logic.

use crate::cell::Cell;
use crate::error::{GridError, GridResult};

/// Validate interior edges: at least two, finite, strictly increasing, and
/// starting at a non-negative radius.
pub(crate) fn validate_edges(edges: &[f64]) -> GridResult<()> {
    if edges.len() < 2 {
        return Err(GridError::Empty);
    }

    for (index, &value) in edges.iter().enumerate() {
        if !value.is_finite() {
            return Err(GridError::NonFiniteEdge { index, value });
        }
    }

    // Ghost-free index: cell i spans edges[i - 1]..edges[i]
    for (i, pair) in edges.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(GridError::NonMonotonic {
                index: i + 1,
                lower: pair[0],
                upper: pair[1],
            });
        }
    }

    if edges[0] < 0.0 {
        return Err(GridError::NegativeRadius { value: edges[0] });
    }

    Ok(())
}

/// Validate a fully assembled cell array (ghosts included): every cell has
/// positive width and shares its upper face with the next cell's lower face.
pub(crate) fn validate_cells(cells: &[Cell]) -> GridResult<()> {
    if cells.len() < 3 {
        return Err(GridError::Empty);
    }
    for (index, cell) in cells.iter().enumerate() {
        if cell.lowlim >= cell.uplim {
            return Err(GridError::NonMonotonic {
                index,
                lower: cell.lowlim,
                upper: cell.uplim,
            });
        }
    }
    for (index, pair) in cells.windows(2).enumerate() {
        if pair[0].uplim != pair[1].lowlim {
            return Err(GridError::Discontiguous { index });
        }
    }
    Ok(())
}
