//! Single photon packet and its walk through the shells.

use pf_core::AtomicF64;

/// Resumable part of a packet: where it is and how much optical depth it
/// has left. `distance` is the path (m) already travelled inside `cell`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PacketState {
    pub cell: usize,
    pub taurem: f64,
    pub distance: f64,
}

/// Per-shell optical properties for one step, indexed like the cell array.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShellOptics {
    /// Absorption coefficient `sigma n_H nfac` (m^-1)
    pub kappa: f64,
    /// Radial path through the shell (m)
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PacketFate {
    Absorbed,
    /// Left the outermost shell with this much optical depth unused.
    Escaped { taurem: f64 },
    /// Ran out of light-travel budget; continues next step.
    Banked(PacketState),
}

/// A packet in flight, with its remaining light-travel budget `lrem` (m).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Packet {
    pub state: PacketState,
    pub lrem: f64,
}

impl Packet {
    /// New packet at the inner edge of the first interior shell.
    pub fn emit(taurem: f64, lrem: f64) -> Self {
        Self {
            state: PacketState {
                cell: 1,
                taurem,
                distance: 0.0,
            },
            lrem,
        }
    }

    /// Packet continuing from a banked state with a fresh travel budget.
    pub fn resume(state: PacketState, lrem: f64) -> Self {
        Self { state, lrem }
    }

    /// Walk outward until the packet is absorbed, escapes past the last
    /// interior shell, or runs out of travel budget.
    ///
    /// `optics` and `lengths` cover cells `0..=ncell + 1`; every path segment
    /// is added to `lengths` of the shell it crosses.
    pub fn propagate(mut self, optics: &[ShellOptics], lengths: &[AtomicF64]) -> PacketFate {
        let ncell = optics.len().saturating_sub(2);
        let s = &mut self.state;

        if s.taurem <= 0.0 {
            return PacketFate::Absorbed;
        }

        loop {
            if s.cell > ncell {
                return PacketFate::Escaped { taurem: s.taurem };
            }
            if self.lrem <= 0.0 {
                return PacketFate::Banked(*s);
            }

            let shell = optics[s.cell];
            let path = (shell.width - s.distance).max(0.0);
            let taucell = shell.kappa * path;

            if s.taurem > taucell && self.lrem > path {
                lengths[s.cell].fetch_add(path);
                s.taurem -= taucell;
                self.lrem -= path;
                s.cell += 1;
                s.distance = 0.0;
                continue;
            }

            let taulength = if shell.kappa > 0.0 {
                s.taurem / shell.kappa
            } else {
                f64::INFINITY
            };
            if taulength <= self.lrem {
                lengths[s.cell].fetch_add(taulength);
                return PacketFate::Absorbed;
            }

            lengths[s.cell].fetch_add(self.lrem);
            s.taurem -= shell.kappa * self.lrem;
            s.distance += self.lrem;
            return PacketFate::Banked(*s);
        }
    }
}
