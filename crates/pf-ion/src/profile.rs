//! Neutral-fraction profile around a known ionization radius.
//!
//! Two policies: a sharp jump at `rion`, or a smooth cubic transition of
//! width `W` centred on `rion`. In both cases the per-shell value is the
//! exact volume average of the radial profile over the shell.

use pf_core::cube;
use pf_grid::Cell;
use rayon::prelude::*;

/// Smooth cubic transition
///
/// `f(r) = A (r - rion)^3 + S (r - rion) + 1/2` with `S = 3 / (2W)` and
/// `A = -16 S^3 / 27`. This is the unique cubic with `f(rion) = 1/2`,
/// `f'(rion) = S`, `f(rion -/+ W/2) = 0/1` and zero slope at both edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothTransition {
    width: f64,
    slope: f64,
    cubic: f64,
}

impl SmoothTransition {
    /// `None` unless `width` is finite and positive.
    pub fn new(width: f64) -> Option<Self> {
        if !(width.is_finite() && width > 0.0) {
            return None;
        }
        let slope = 3.0 / (2.0 * width);
        let cubic = -16.0 * cube(slope) / 27.0;
        Some(Self {
            width,
            slope,
            cubic,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Slope `S` of the profile at the ionization radius.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Pointwise profile value at radius `r`.
    pub fn value(&self, rion: f64, r: f64) -> f64 {
        let x = r - rion;
        let half = 0.5 * self.width;
        if x <= -half {
            0.0
        } else if x >= half {
            1.0
        } else {
            self.cubic * cube(x) + self.slope * x + 0.5
        }
    }

    /// `60 * integral f(r) r^2 dr`, indefinite.
    fn antiderivative(&self, rion: f64, r: f64) -> f64 {
        let a = self.cubic;
        let s = self.slope;
        let r2 = r * r;
        let r3 = r * r2;
        let rion2 = rion * rion;
        let rion3 = rion * rion2;
        r3 * (10.0 * r3 * a - 36.0 * r2 * a * rion + 45.0 * r * a * rion2 + 15.0 * r * s
            - 20.0 * a * rion3
            - 20.0 * rion * s
            + 10.0)
    }

    /// `3 * integral_{lo}^{hi} f(r) r^2 dr`, i.e. the neutral share of
    /// `hi^3 - lo^3` for a sub-interval inside the transition.
    fn integral(&self, rion: f64, lo: f64, hi: f64) -> f64 {
        (self.antiderivative(rion, hi) - self.antiderivative(rion, lo)) / 20.0
    }

    /// Volume-averaged neutral fraction of the shell `[rmin, rmax]`.
    pub fn neutral_fraction(&self, rmin: f64, rmax: f64, rion: f64) -> f64 {
        let lower = rion - 0.5 * self.width;
        let upper = rion + 0.5 * self.width;

        if rmax <= lower {
            return 0.0;
        }
        if rmin >= upper {
            return 1.0;
        }

        // The shell overlaps the transition: integrate the cubic over the
        // overlap and count any part above `upper` as fully neutral. This
        // covers straddling the lower edge, lying inside, straddling the
        // upper edge, and spanning the whole transition.
        let a = rmin.max(lower);
        let b = rmax.min(upper);
        let mut neutral = self.integral(rion, a, b);
        if rmax > upper {
            neutral += cube(rmax) - cube(upper);
        }
        (neutral / (cube(rmax) - cube(rmin))).clamp(0.0, 1.0)
    }
}

/// Neutral-fraction policy, selected at configuration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionProfile {
    Jump,
    Smooth(SmoothTransition),
}

impl TransitionProfile {
    /// Smooth transition of the given width, or a jump if the width is not
    /// positive.
    pub fn smooth(width: f64) -> Self {
        match SmoothTransition::new(width) {
            Some(t) => TransitionProfile::Smooth(t),
            None => {
                tracing::warn!(width, "smooth transition needs a positive width, using a jump");
                TransitionProfile::Jump
            }
        }
    }

    /// Volume-averaged neutral fraction of the shell `[rmin, rmax]` given the
    /// ionization radius `rion`.
    pub fn neutral_fraction(&self, rmin: f64, rmax: f64, rion: f64) -> f64 {
        match self {
            TransitionProfile::Jump => {
                if rmax < rion {
                    0.0
                } else if rmin < rion {
                    (cube(rmax) - cube(rion)) / (cube(rmax) - cube(rmin))
                } else {
                    1.0
                }
            }
            TransitionProfile::Smooth(t) => t.neutral_fraction(rmin, rmax, rion),
        }
    }

    /// Write the neutral fraction of every cell in `cells`.
    pub fn apply(&self, cells: &mut [Cell], rion: f64) {
        cells.par_iter_mut().for_each(|cell| {
            cell.nfac = self.neutral_fraction(cell.lowlim, cell.uplim, rion);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-12,
        rel: 1e-10,
    };

    #[test]
    fn cubic_meets_its_boundary_conditions() {
        let t = SmoothTransition::new(2.0).unwrap();
        let rion = 10.0;
        assert!(nearly_equal(t.value(rion, 9.0), 0.0, TOL));
        assert!(nearly_equal(t.value(rion, 11.0), 1.0, TOL));
        assert_eq!(t.value(rion, rion), 0.5);

        // interior polynomial evaluated right at the edges
        let x = 1.0;
        let at_upper = t.cubic * cube(x) + t.slope * x + 0.5;
        assert!(nearly_equal(at_upper, 1.0, TOL));
        let slope_at_upper = 3.0 * t.cubic * x * x + t.slope;
        assert!(nearly_equal(slope_at_upper, 0.0, TOL));
    }

    #[test]
    fn rejects_non_positive_width() {
        assert!(SmoothTransition::new(0.0).is_none());
        assert!(SmoothTransition::new(-1.0).is_none());
        assert!(SmoothTransition::new(f64::NAN).is_none());
        assert_eq!(TransitionProfile::smooth(0.0), TransitionProfile::Jump);
    }

    #[test]
    fn jump_straddling_shell_is_volume_fraction() {
        let p = TransitionProfile::Jump;
        let nf = p.neutral_fraction(1.0, 2.0, 1.5);
        let expected = (8.0 - 3.375) / (8.0 - 1.0);
        assert_eq!(nf, expected);
        assert_eq!(p.neutral_fraction(1.0, 2.0, 2.5), 0.0);
        assert_eq!(p.neutral_fraction(1.0, 2.0, 0.5), 1.0);
    }

    #[test]
    fn jump_at_shell_boundary() {
        let p = TransitionProfile::Jump;
        // rion on the upper face: fully ionized; on the lower face: fully neutral
        assert_eq!(p.neutral_fraction(1.0, 2.0, 2.0), 0.0);
        assert_eq!(p.neutral_fraction(2.0, 3.0, 2.0), 1.0);
    }

    #[test]
    fn smooth_narrow_shell_matches_pointwise_value() {
        let t = SmoothTransition::new(4.0).unwrap();
        let rion = 20.0;
        let r = 20.7;
        let dr = 1e-4;
        let nf = t.neutral_fraction(r - dr, r + dr, rion);
        assert!((nf - t.value(rion, r)).abs() < 1e-6);
    }

    #[test]
    fn smooth_shell_spanning_whole_transition() {
        let t = SmoothTransition::new(1.0).unwrap();
        let rion = 5.0;
        // The cubic is odd around rion, so the transition contributes the
        // same neutral volume as a jump at rion up to the r^2 weighting.
        // Compare against a fine midpoint quadrature instead.
        let (rmin, rmax) = (3.0, 8.0);
        let n = 200_000;
        let h = (rmax - rmin) / n as f64;
        let mut acc = 0.0;
        for i in 0..n {
            let r = rmin + (i as f64 + 0.5) * h;
            acc += t.value(rion, r) * r * r * h;
        }
        let expected = 3.0 * acc / (cube(rmax) - cube(rmin));
        let nf = t.neutral_fraction(rmin, rmax, rion);
        assert!((nf - expected).abs() < 1e-8);
    }

    #[test]
    fn apply_writes_every_cell() {
        let mut cells: Vec<Cell> = (0..4).map(|i| Cell::new(i as f64, i as f64 + 1.0)).collect();
        TransitionProfile::Jump.apply(&mut cells, 2.0);
        let nfac: Vec<f64> = cells.iter().map(|c| c.nfac).collect();
        assert_eq!(nfac, vec![0.0, 0.0, 1.0, 1.0]);
    }
}
