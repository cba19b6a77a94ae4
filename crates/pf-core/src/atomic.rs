//! Lock-free `f64` cell for accumulators shared across rayon workers.

use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` stored as its bit pattern in an `AtomicU64`.
///
/// Additions use a compare-exchange loop, so concurrent `fetch_add` calls on
/// the same accumulator never lose an update. The summation order (and hence
/// the last few bits of the result) depends on scheduling.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub const fn zero() -> Self {
        Self {
            bits: AtomicU64::new(0),
        }
    }

    pub fn new(v: f64) -> Self {
        Self {
            bits: AtomicU64::new(v.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Release);
    }

    /// Add `delta` and return the previous value.
    pub fn fetch_add(&self, delta: f64) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self.bits.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(prev) => return f64::from_bits(prev),
                Err(actual) => current = actual,
            }
        }
    }

    /// Reset to zero through exclusive access and return the accumulated value.
    pub fn take(&mut self) -> f64 {
        let bits = std::mem::take(self.bits.get_mut());
        f64::from_bits(bits)
    }
}

impl Clone for AtomicF64 {
    fn clone(&self) -> Self {
        Self::new(self.load())
    }
}
