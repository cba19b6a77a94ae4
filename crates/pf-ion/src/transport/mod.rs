//! Time-dependent Monte Carlo photon transport.
//!
//! Every step a fixed number of packets leaves the centre with an optical
//! depth drawn from `-ln U`. Packets walk outward shell by shell and either
//! get absorbed, escape, or run out of light-travel time (`c dt`) and are
//! banked for the next step. The path length through each shell gives its
//! mean intensity, which drives the closed-form balance update of the
//! neutral fraction.
//!
//! Hydro quantities come in internal units; everything radiative is SI.

mod bank;
mod packet;

pub use bank::PacketBank;
pub use packet::{Packet, PacketFate, PacketState, ShellOptics};

use crate::balance::{advance_ionized_fraction, recombination_rate};
use crate::error::{IonResult, TransportError, TransportResult};
use pf_core::timing::{Timer, ion_timing};
use pf_core::{AtomicF64, PfError, UnitSystem, constants, cube};
use pf_grid::{Cell, CellField};
use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::f64::consts::PI;

/// Transport parameters, SI units.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportConfig {
    /// Ionizing photons emitted per second
    pub photon_rate: f64,
    /// Packets emitted per step
    pub photons_per_step: usize,
    pub bank_capacity: usize,
    pub seed: u64,
    /// Photoionization cross-section (m^2)
    pub cross_section: f64,
    /// Case-B recombination coefficient (m^3 s^-1)
    pub recombination_coefficient: f64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            photon_rate: 1e47,
            photons_per_step: 1000,
            bank_capacity: 1_000_000,
            seed: 0,
            cross_section: 6.3e-22,
            recombination_coefficient: 2.7e-19,
        }
    }
}

impl TransportConfig {
    fn validate(&self) -> TransportResult<()> {
        if !(self.photon_rate.is_finite() && self.photon_rate > 0.0) {
            return Err(TransportError::InvalidArg {
                what: "photon_rate",
            });
        }
        if self.photons_per_step == 0 {
            return Err(TransportError::InvalidArg {
                what: "photons_per_step",
            });
        }
        if self.bank_capacity == 0 {
            return Err(TransportError::InvalidArg {
                what: "bank_capacity",
            });
        }
        if !(self.cross_section.is_finite() && self.cross_section >= 0.0) {
            return Err(TransportError::InvalidArg {
                what: "cross_section",
            });
        }
        if !(self.recombination_coefficient.is_finite() && self.recombination_coefficient >= 0.0)
        {
            return Err(TransportError::InvalidArg {
                what: "recombination_coefficient",
            });
        }
        Ok(())
    }
}

/// Radiative state of one interior shell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShellRadiation {
    /// Absorption cross-section (m^2)
    pub sigma: f64,
    /// Recombination coefficient (m^3 s^-1)
    pub alpha_b: f64,
    /// Mean intensity of the last step (s^-1)
    pub jmean: f64,
    pub last_jmean: f64,
    /// Packet path length through the shell in the last step (m)
    pub length: f64,
    pub ifrac: f64,
    /// Ionized fraction carried into the next balance update
    pub ft0: f64,
}

/// Fate counts of one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransportTally {
    pub emitted: usize,
    pub resumed: usize,
    pub absorbed: usize,
    pub escaped: usize,
    pub banked: usize,
}

impl TransportTally {
    pub fn record(mut self, fate: &PacketFate) -> Self {
        match fate {
            PacketFate::Absorbed => self.absorbed += 1,
            PacketFate::Escaped { .. } => self.escaped += 1,
            PacketFate::Banked(_) => self.banked += 1,
        }
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            emitted: self.emitted + other.emitted,
            resumed: self.resumed + other.resumed,
            absorbed: self.absorbed + other.absorbed,
            escaped: self.escaped + other.escaped,
            banked: self.banked + other.banked,
        }
    }

    /// Every packet that entered the step has exactly one fate.
    pub fn is_balanced(&self) -> bool {
        self.emitted + self.resumed == self.absorbed + self.escaped + self.banked
    }
}

/// Volume of a shell in m^3. A shell starting at the origin is a full
/// sphere of radius `width`.
fn shell_volume_si(cell: &Cell, length_in_si: f64) -> f64 {
    if cell.lowlim * length_in_si == 0.0 {
        4.0 / 3.0 * PI * cube(cell.width * length_in_si)
    } else {
        4.0 / 3.0 * PI * (cube(cell.uplim * length_in_si) - cube(cell.lowlim * length_in_si))
    }
}

#[derive(Debug)]
pub struct MonteCarloTransport {
    config: TransportConfig,
    radiation: Vec<ShellRadiation>,
    bank: PacketBank,
    rng: StdRng,
    /// Per-step path length accumulators, indexed like the cell array
    lengths: Vec<AtomicF64>,
    optics: Vec<ShellOptics>,
    taus: Vec<f64>,
}

impl MonteCarloTransport {
    pub fn new(config: TransportConfig, field: &CellField) -> TransportResult<Self> {
        config.validate()?;

        let ncell = field.ncell();
        let radiation = vec![
            ShellRadiation {
                sigma: config.cross_section,
                alpha_b: config.recombination_coefficient,
                ..ShellRadiation::default()
            };
            ncell
        ];
        let bank = PacketBank::with_capacity(config.bank_capacity);
        let rng = StdRng::seed_from_u64(config.seed);

        tracing::info!(
            ncell,
            photons_per_step = config.photons_per_step,
            bank_capacity = config.bank_capacity,
            seed = config.seed,
            "monte carlo transport ready"
        );

        Ok(Self {
            config,
            radiation,
            bank,
            rng,
            lengths: (0..ncell + 2).map(|_| AtomicF64::zero()).collect(),
            optics: vec![ShellOptics::default(); ncell + 2],
            taus: Vec::new(),
        })
    }

    /// Start from fully neutral gas with no carried ionization.
    pub fn initialize(&mut self, field: &mut CellField) {
        for cell in field.interior_mut() {
            cell.nfac = 1.0;
        }
        for rad in &mut self.radiation {
            rad.ifrac = 0.0;
            rad.ft0 = 0.0;
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Radiative state of the interior shells.
    pub fn radiation(&self) -> &[ShellRadiation] {
        &self.radiation
    }

    pub fn bank(&self) -> &PacketBank {
        &self.bank
    }

    /// Run one step of `dt_s` seconds and update the neutral fractions in
    /// `field`.
    ///
    /// On bank overflow the step is abandoned: `field`, the shell radiation
    /// state and the bank are left as they were.
    pub fn step(
        &mut self,
        field: &mut CellField,
        units: &UnitSystem,
        dt_s: f64,
    ) -> IonResult<TransportTally> {
        let ncell = field.ncell();
        if ncell != self.radiation.len() {
            return Err(PfError::Invariant {
                what: "cell count changed since transport setup",
            }
            .into());
        }

        let timer = Timer::start();
        let length_si = units.length_in_si;
        let lrem = constants::SPEED_OF_LIGHT_SI * dt_s;

        // Optics for this step
        let sigma = self.config.cross_section;
        self.optics
            .par_iter_mut()
            .zip(field.cells().par_iter())
            .enumerate()
            .for_each(|(k, (optics, cell))| {
                let kappa = if (1..=ncell).contains(&k) {
                    sigma * units.hydrogen_number_density(cell.rho) * cell.nfac
                } else {
                    0.0
                };
                *optics = ShellOptics {
                    kappa,
                    width: cell.width * length_si,
                };
            });
        self.lengths.par_iter_mut().for_each(|l| {
            l.take();
        });

        // Draw all optical depths up front so the parallel walk does not
        // depend on scheduling for its random numbers.
        let nphoton = self.config.photons_per_step;
        let rng = &mut self.rng;
        self.taus.clear();
        self.taus.extend((0..nphoton).map(|_| {
            let u: f64 = rng.sample(Open01);
            -u.ln()
        }));

        let bank = &self.bank;
        let optics = &self.optics[..];
        let lengths = &self.lengths[..];
        let walk = |packet: Packet| {
            let fate = packet.propagate(optics, lengths);
            if let PacketFate::Banked(state) = fate {
                bank.store(state);
            }
            fate
        };

        let resumed = bank
            .current_par()
            .map(|state| walk(Packet::resume(state, lrem)))
            .fold(TransportTally::default, |t, fate| t.record(&fate))
            .reduce(TransportTally::default, TransportTally::merge);
        let emitted = self
            .taus
            .par_iter()
            .map(|&taurem| walk(Packet::emit(taurem, lrem)))
            .fold(TransportTally::default, |t, fate| t.record(&fate))
            .reduce(TransportTally::default, TransportTally::merge);

        let tally = TransportTally {
            emitted: nphoton,
            resumed: bank.active(),
            ..resumed.merge(emitted)
        };

        if self.bank.overflowed() {
            let requested = self.bank.pending();
            self.bank.discard_pending();
            timer.stop_into(&ion_timing::TRANSPORT);
            return Err(TransportError::BankOverflow {
                requested,
                capacity: self.bank.capacity(),
            }
            .into());
        }
        timer.stop_into(&ion_timing::TRANSPORT);

        // Mean intensity and balance update
        let timer = Timer::start();
        let photon_rate = self.config.photon_rate;
        let lengths = &self.lengths[1..=ncell];
        field
            .interior_mut()
            .par_iter_mut()
            .zip(self.radiation.par_iter_mut())
            .zip(lengths.par_iter())
            .for_each(|((cell, rad), length)| {
                let length = length.load();
                let volume = shell_volume_si(cell, length_si);
                let jmean = photon_rate * rad.sigma * length / (nphoton as f64 * volume);

                let con_b = recombination_rate(rad.alpha_b, units.hydrogen_number_density(cell.rho));
                let state = advance_ionized_fraction(rad.ft0, cell.nfac, jmean, con_b, dt_s);

                cell.nfac = state.neutral;
                rad.ifrac = state.ionized;
                rad.ft0 = state.ionized;
                rad.length = length;
                rad.jmean = jmean;
                rad.last_jmean = jmean;
            });
        timer.stop_into(&ion_timing::BALANCE);

        self.bank.rotate()?;

        tracing::debug!(
            emitted = tally.emitted,
            resumed = tally.resumed,
            absorbed = tally.absorbed,
            escaped = tally.escaped,
            banked = tally.banked,
            "transport step"
        );
        Ok(tally)
    }

    /// Lower edge of the first interior shell that is at least half neutral,
    /// or the outer edge of the grid.
    pub fn ionization_radius(field: &CellField) -> f64 {
        field
            .interior()
            .iter()
            .find(|cell| cell.nfac >= 0.5)
            .map_or(field.rmax(), |cell| cell.lowlim)
    }
}
