use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive, for physical parameters such as widths and densities.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PfError::InvalidArg { what })
    }
}

/// Relative change test used to debounce output: true when `a` and `b`
/// differ by more than `rel * |a + b|`.
#[inline]
pub fn changed_beyond(a: Real, b: Real, rel: Real) -> bool {
    (a - b).abs() > rel * (a + b).abs()
}

/// Cube of a value, used all over the shell-volume formulas.
#[inline]
pub fn cube(x: Real) -> Real {
    x * x * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(1.0, "x").is_ok());
        assert!(ensure_positive(0.0, "x").is_err());
        assert!(ensure_positive(-2.0, "x").is_err());
        assert!(ensure_positive(Real::INFINITY, "x").is_err());
    }

    #[test]
    fn changed_beyond_is_relative() {
        assert!(!changed_beyond(1.0, 1.0 + 1e-6, 1e-4));
        assert!(changed_beyond(1.0, 1.1, 1e-4));
        // first write against a zero baseline always counts
        assert!(changed_beyond(0.5, 0.0, 1e-4));
        assert!(!changed_beyond(0.0, 0.0, 1e-4));
    }
}
