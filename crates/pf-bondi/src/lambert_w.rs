//! Real branches of the Lambert W function, `W(x) e^W(x) = x`.

use crate::error::{BondiError, BondiResult};
use std::f64::consts::E;

/// `-1/e`, the common branch point of both real branches.
pub const BRANCH_POINT: f64 = -1.0 / E;

/// Arguments this far below the branch point are treated as rounding error.
const BRANCH_SLACK: f64 = 1e-12;

const MAX_ITER: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// `W_0`, defined on `[-1/e, inf)`, values `>= -1`
    Principal,
    /// `W_-1`, defined on `[-1/e, 0)`, values `<= -1`
    Lower,
}

/// Evaluate the requested branch of W at `x`.
pub fn lambert_w(x: f64, branch: Branch) -> BondiResult<f64> {
    if x.is_nan() {
        return Err(BondiError::LambertDomain { x });
    }
    if x < BRANCH_POINT - BRANCH_SLACK {
        return Err(BondiError::LambertDomain { x });
    }
    if branch == Branch::Lower && x >= 0.0 {
        return Err(BondiError::LambertDomain { x });
    }
    if x <= BRANCH_POINT {
        return Ok(-1.0);
    }
    if x == 0.0 {
        return Ok(0.0);
    }

    let mut w = initial_guess(x, branch);
    for _ in 0..MAX_ITER {
        let ew = w.exp();
        let f = w * ew - x;
        let wp1 = w + 1.0;
        if wp1 == 0.0 {
            break;
        }
        // Halley step
        let denom = ew * wp1 - (w + 2.0) * f / (2.0 * wp1);
        let dw = f / denom;
        if !dw.is_finite() {
            break;
        }
        w -= dw;
        if dw.abs() <= 1e-15 * (1.0 + w.abs()) {
            break;
        }
    }

    // keep the result on the requested side of the branch point
    Ok(match branch {
        Branch::Principal => w.max(-1.0),
        Branch::Lower => w.min(-1.0),
    })
}

fn initial_guess(x: f64, branch: Branch) -> f64 {
    let q = E * x + 1.0;
    if q < 0.25 {
        // series around the branch point in p = +/- sqrt(2 (e x + 1))
        let p = (2.0 * q).sqrt();
        let p = match branch {
            Branch::Principal => p,
            Branch::Lower => -p,
        };
        return -1.0 + p - p * p / 3.0 + 11.0 / 72.0 * p * p * p;
    }
    match branch {
        Branch::Principal => {
            if x < 3.0 {
                x.ln_1p()
            } else {
                let l = x.ln();
                l - l.ln()
            }
        }
        Branch::Lower => {
            let l = (-x).ln();
            l - (-l).ln()
        }
    }
}
