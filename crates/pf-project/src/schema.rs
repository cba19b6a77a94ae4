//! Run configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub version: u32,
    pub name: String,
    pub grid: GridDef,
    pub units: UnitsDef,
    pub gas: GasDef,
    pub ionization: IonizationDef,
    #[serde(default)]
    pub output: OutputDef,
}

/// Uniform radial grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridDef {
    pub rmin_au: f64,
    pub rmax_au: f64,
    pub ncell: usize,
}

/// Internal unit system; the time unit follows from `G = 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitsDef {
    pub length_in_si: f64,
    pub mass_in_si: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GasDef {
    pub isothermal_temperature_k: f64,
    pub point_mass_msol: f64,
    /// Neutral density at the Bondi radius (kg m^-3)
    pub bondi_density_si: f64,
    /// Pressure of fully ionized gas relative to neutral gas
    pub pressure_contrast: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IonizationDef {
    pub initial_radius_au: f64,
    #[serde(default)]
    pub transition: TransitionDef,
    pub mode: ModeDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind")]
pub enum TransitionDef {
    #[default]
    Jump,
    Smooth {
        width_au: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ModeDef {
    Constant,
    SelfConsistent,
    MonteCarlo(MonteCarloDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonteCarloDef {
    #[serde(default = "default_photon_rate")]
    pub photon_rate: f64,
    #[serde(default = "default_photons_per_step")]
    pub photons_per_step: usize,
    #[serde(default = "default_bank_capacity")]
    pub bank_capacity: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_cross_section")]
    pub cross_section_m2: f64,
    #[serde(default = "default_recombination_coefficient")]
    pub recombination_coefficient_m3_s: f64,
}

impl Default for MonteCarloDef {
    fn default() -> Self {
        Self {
            photon_rate: default_photon_rate(),
            photons_per_step: default_photons_per_step(),
            bank_capacity: default_bank_capacity(),
            seed: 0,
            cross_section_m2: default_cross_section(),
            recombination_coefficient_m3_s: default_recombination_coefficient(),
        }
    }
}

fn default_photon_rate() -> f64 {
    1e47
}

fn default_photons_per_step() -> usize {
    1000
}

fn default_bank_capacity() -> usize {
    1_000_000
}

fn default_cross_section() -> f64 {
    6.3e-22
}

fn default_recombination_coefficient() -> f64 {
    2.7e-19
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutputDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_log: Option<PathBuf>,
}
