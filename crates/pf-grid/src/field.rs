//! Ordered cell array with ghost cells.

use crate::cell::Cell;
use crate::error::{GridError, GridResult};

/// Cells `0..=ncell + 1`; index 0 and `ncell + 1` are ghost cells.
#[derive(Clone, Debug, PartialEq)]
pub struct CellField {
    cells: Vec<Cell>,
}

impl CellField {
    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Number of interior cells.
    #[inline]
    pub fn ncell(&self) -> usize {
        self.cells.len() - 2
    }

    /// All cells, ghosts included.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Interior cells `1..=ncell`.
    pub fn interior(&self) -> &[Cell] {
        let n = self.ncell();
        &self.cells[1..=n]
    }

    pub fn interior_mut(&mut self) -> &mut [Cell] {
        let n = self.ncell();
        &mut self.cells[1..=n]
    }

    pub fn get(&self, index: usize) -> GridResult<&Cell> {
        let len = self.cells.len();
        self.cells.get(index).ok_or(GridError::IndexOob { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> GridResult<&mut Cell> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(GridError::IndexOob { index, len })
    }

    pub fn inner_ghost(&self) -> &Cell {
        &self.cells[0]
    }

    pub fn outer_ghost(&self) -> &Cell {
        &self.cells[self.cells.len() - 1]
    }

    /// Lower edge of the first interior cell.
    pub fn rmin(&self) -> f64 {
        self.cells[1].lowlim
    }

    /// Upper edge of the last interior cell.
    pub fn rmax(&self) -> f64 {
        self.cells[self.ncell()].uplim
    }
}
