//! Integration tests for pf-grid.

use pf_grid::{GridBuilder, GridError};

#[test]
fn uniform_grid_is_contiguous() {
    let field = GridBuilder::uniform(10.0, 100.0, 90).build().unwrap();
    assert_eq!(field.ncell(), 90);

    for pair in field.cells().windows(2) {
        assert_eq!(pair[0].uplim, pair[1].lowlim);
    }
    for cell in field.cells() {
        assert!((cell.width - 1.0).abs() < 1e-9);
        assert!((cell.midpoint - 0.5 * (cell.lowlim + cell.uplim)).abs() < 1e-12);
    }
}

#[test]
fn grid_from_origin_has_full_sphere_first_cell() {
    let field = GridBuilder::uniform(0.0, 1.0, 10).build().unwrap();
    let first = &field.interior()[0];
    assert_eq!(first.lowlim, 0.0);
    // the inner ghost sits at negative radius, it is never read as geometry
    assert!(field.inner_ghost().lowlim < 0.0);
}

#[test]
fn explicit_edges_keep_nonuniform_widths() {
    let field = GridBuilder::from_edges(vec![1.0, 2.0, 4.0, 8.0]).build().unwrap();
    let widths: Vec<f64> = field.interior().iter().map(|c| c.width).collect();
    assert_eq!(widths, vec![1.0, 2.0, 4.0]);
    assert_eq!(field.outer_ghost().width, 4.0);
}

#[test]
fn non_finite_edges_rejected() {
    let err = GridBuilder::from_edges(vec![0.0, f64::NAN, 1.0])
        .build()
        .unwrap_err();
    assert!(matches!(err, GridError::NonFiniteEdge { index: 1, .. }));
}

#[test]
fn descending_grid_rejected() {
    let err = GridBuilder::uniform(5.0, 1.0, 4).build().unwrap_err();
    assert!(matches!(err, GridError::NonMonotonic { .. }));
}
