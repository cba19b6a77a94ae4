//! Fixed-capacity store for packets that outlive a step.
//!
//! Each entry holds the state resumed this step (`current`) and a slot for
//! the state banked during this step (`future`). Writers reserve slots with
//! one atomic counter, so banking from rayon workers needs no lock. At the
//! end of the step [`PacketBank::rotate`] moves `future` into `current`.

use super::packet::PacketState;
use crate::error::{TransportError, TransportResult};
use pf_core::AtomicF64;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct FutureSlot {
    cell: AtomicUsize,
    taurem: AtomicF64,
    distance: AtomicF64,
}

impl FutureSlot {
    fn write(&self, state: PacketState) {
        self.cell.store(state.cell, Ordering::Relaxed);
        self.taurem.store(state.taurem);
        self.distance.store(state.distance);
    }

    fn take(&mut self) -> PacketState {
        PacketState {
            cell: std::mem::take(self.cell.get_mut()),
            taurem: self.taurem.take(),
            distance: self.distance.take(),
        }
    }
}

#[derive(Debug, Default)]
struct BankEntry {
    current: PacketState,
    future: FutureSlot,
}

#[derive(Debug)]
pub struct PacketBank {
    entries: Box<[BankEntry]>,
    /// Number of valid `current` states
    active: usize,
    /// Next free `future` slot; may run past the capacity on overflow
    next: AtomicUsize,
}

impl PacketBank {
    pub fn with_capacity(capacity: usize) -> Self {
        let entries = (0..capacity).map(|_| BankEntry::default()).collect();
        Self {
            entries,
            active: 0,
            next: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Packets to resume this step.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Packets banked so far this step, including any that did not fit.
    pub fn pending(&self) -> usize {
        self.next.load(Ordering::Acquire)
    }

    pub fn overflowed(&self) -> bool {
        self.pending() > self.capacity()
    }

    pub fn current(&self) -> impl Iterator<Item = PacketState> + '_ {
        self.entries[..self.active].iter().map(|e| e.current)
    }

    pub fn current_par(&self) -> impl IndexedParallelIterator<Item = PacketState> + '_ {
        self.entries[..self.active].par_iter().map(|e| e.current)
    }

    /// Bank `state` for the next step. Returns `false` if the bank is full;
    /// the attempt still counts towards [`pending`](Self::pending).
    pub fn store(&self, state: PacketState) -> bool {
        let slot = self.next.fetch_add(1, Ordering::AcqRel);
        match self.entries.get(slot) {
            Some(entry) => {
                entry.future.write(state);
                true
            }
            None => false,
        }
    }

    /// Forget everything banked this step. `current` is left untouched.
    pub fn discard_pending(&mut self) {
        let written = (*self.next.get_mut()).min(self.entries.len());
        self.entries[..written]
            .par_iter_mut()
            .for_each(|e| {
                e.future.take();
            });
        *self.next.get_mut() = 0;
    }

    /// Make this step's banked packets the next step's active set.
    ///
    /// On overflow nothing is rotated: pending writes are discarded and the
    /// previous active set stays in place.
    pub fn rotate(&mut self) -> TransportResult<usize> {
        let requested = *self.next.get_mut();
        let capacity = self.entries.len();
        if requested > capacity {
            self.discard_pending();
            return Err(TransportError::BankOverflow {
                requested,
                capacity,
            });
        }

        self.entries[..requested].par_iter_mut().for_each(|e| {
            e.current = e.future.take();
        });
        self.active = requested;
        *self.next.get_mut() = 0;
        Ok(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(i: usize) -> PacketState {
        PacketState {
            cell: i + 1,
            taurem: 0.5 + i as f64,
            distance: 0.25 * i as f64,
        }
    }

    #[test]
    fn rotation_preserves_packet_count() {
        let mut bank = PacketBank::with_capacity(16);
        for i in 0..10 {
            assert!(bank.store(state(i)));
        }
        assert_eq!(bank.pending(), 10);
        assert_eq!(bank.active(), 0);

        assert_eq!(bank.rotate().unwrap(), 10);
        assert_eq!(bank.active(), 10);
        assert_eq!(bank.pending(), 0);
        let resumed: Vec<_> = bank.current().collect();
        assert_eq!(resumed, (0..10).map(state).collect::<Vec<_>>());

        // resume a few, bank fewer
        for s in resumed.iter().take(3) {
            bank.store(*s);
        }
        assert_eq!(bank.rotate().unwrap(), 3);
        assert_eq!(bank.current().count(), 3);
    }

    #[test]
    fn parallel_stores_land_in_distinct_slots() {
        let mut bank = PacketBank::with_capacity(1000);
        (0..1000).into_par_iter().for_each(|i| {
            assert!(bank.store(state(i)));
        });
        bank.rotate().unwrap();
        let mut cells: Vec<usize> = bank.current().map(|s| s.cell).collect();
        cells.sort_unstable();
        assert_eq!(cells, (1..=1000).collect::<Vec<_>>());
    }

    #[test]
    fn overflow_commits_nothing() {
        let mut bank = PacketBank::with_capacity(4);
        for i in 0..2 {
            bank.store(state(i));
        }
        bank.rotate().unwrap();

        for i in 0..6 {
            bank.store(state(10 + i));
        }
        assert!(bank.overflowed());
        let err = bank.rotate().unwrap_err();
        assert_eq!(
            err,
            TransportError::BankOverflow {
                requested: 6,
                capacity: 4
            }
        );
        assert_eq!(bank.active(), 2);
        assert_eq!(bank.current().collect::<Vec<_>>(), vec![state(0), state(1)]);
        assert_eq!(bank.pending(), 0);
    }

    #[test]
    fn rotation_clears_future_slots() {
        let mut bank = PacketBank::with_capacity(2);
        bank.store(state(1));
        bank.rotate().unwrap();
        bank.rotate().unwrap();
        assert_eq!(bank.active(), 0);
        assert_eq!(bank.entries[0].future.cell.load(Ordering::Relaxed), 0);
    }
}
