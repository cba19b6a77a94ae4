//! Radial grid builder.

use crate::cell::Cell;
use crate::error::GridResult;
use crate::field::CellField;
use crate::validate;

/// Builder for a radial cell field.
///
/// Interior cells are defined by their edges; one ghost cell is added on each
/// side with the width of its interior neighbour.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    edges: Vec<f64>,
}

impl GridBuilder {
    /// `ncell` equal-width shells between `rmin` and `rmax`.
    pub fn uniform(rmin: f64, rmax: f64, ncell: usize) -> Self {
        let mut edges = Vec::with_capacity(ncell + 1);
        if ncell > 0 {
            let dr = (rmax - rmin) / ncell as f64;
            edges.extend((0..ncell).map(|i| rmin + i as f64 * dr));
        }
        edges.push(rmax);
        Self { edges }
    }

    /// Shells between consecutive entries of `edges`.
    pub fn from_edges(edges: Vec<f64>) -> Self {
        Self { edges }
    }

    /// Validate the edges and assemble the field.
    pub fn build(self) -> GridResult<CellField> {
        validate::validate_edges(&self.edges)?;

        let n = self.edges.len() - 1;
        let mut cells = Vec::with_capacity(n + 2);

        let first_width = self.edges[1] - self.edges[0];
        cells.push(Cell::new(self.edges[0] - first_width, self.edges[0]));
        cells.extend(self.edges.windows(2).map(|e| Cell::new(e[0], e[1])));
        let last_width = self.edges[n] - self.edges[n - 1];
        cells.push(Cell::new(self.edges[n], self.edges[n] + last_width));

        validate::validate_cells(&cells)?;
        Ok(CellField::from_cells(cells))
    }
}
