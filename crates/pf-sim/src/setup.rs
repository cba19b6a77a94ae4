//! Build a ready-to-step Bondi run from a validated configuration.

use crate::error::SimResult;
use pf_bondi::{BondiBoundary, BondiSolution, apply_initial_condition};
use pf_core::UnitSystem;
use pf_core::units::{au, kelvin, kg, kg_per_m3, m, msol};
use pf_grid::{CellField, GridBuilder};
use pf_ion::{
    CentralMass, IonizationEngine, IonizationModel, PressureLaw, RadiusLog, TransitionProfile,
    TransportConfig,
};
use pf_project::{ModeDef, MonteCarloDef, RunConfig, TransitionDef};

/// Everything a static-hydro Bondi run carries between steps.
#[derive(Debug)]
pub struct BondiRun {
    pub units: UnitSystem,
    pub field: CellField,
    pub solution: BondiSolution,
    pub boundary: BondiBoundary,
    pub pressure: PressureLaw,
    pub engine: IonizationEngine,
}

impl BondiRun {
    /// Set up the grid, the Bondi initial state and the ionization engine.
    ///
    /// The radius log, when configured, is created (truncated) here.
    pub fn from_config(config: &RunConfig) -> SimResult<Self> {
        pf_project::validate_config(config).map_err(pf_project::ProjectError::from)?;

        let units = UnitSystem::gravitational(
            m(config.units.length_in_si),
            kg(config.units.mass_in_si),
        )?;
        let length = |v: f64| units.length_to_internal(au(v));

        let mut field = GridBuilder::uniform(
            length(config.grid.rmin_au),
            length(config.grid.rmax_au),
            config.grid.ncell,
        )
        .build()?;

        let gas = &config.gas;
        let cs2 = units.isothermal_sound_speed_squared(kelvin(gas.isothermal_temperature_k));
        let mass = units.mass_to_internal(msol(gas.point_mass_msol));
        let solution = BondiSolution::new(
            units.g_internal(),
            mass,
            cs2,
            units.density_to_internal(kg_per_m3(gas.bondi_density_si)),
        )?;
        apply_initial_condition(&mut field, &solution)?;
        let boundary = BondiBoundary::new(&solution, &field)?;
        let pressure = PressureLaw::new(cs2, gas.pressure_contrast);

        let ion = &config.ionization;
        let profile = match ion.transition {
            TransitionDef::Jump => TransitionProfile::Jump,
            TransitionDef::Smooth { width_au } => TransitionProfile::smooth(length(width_au)),
        };
        let model = match &ion.mode {
            ModeDef::Constant => IonizationModel::constant(length(ion.initial_radius_au)),
            ModeDef::SelfConsistent => {
                IonizationModel::self_consistent(&field, length(ion.initial_radius_au))
            }
            ModeDef::MonteCarlo(mc) => {
                IonizationModel::monte_carlo(&mut field, transport_config(mc))?
            }
        };

        let mut engine = IonizationEngine::new(model, profile, units, CentralMass::new(mass));
        if let Some(path) = &config.output.radius_log {
            engine = engine.with_radius_log(RadiusLog::create(path)?);
        }

        tracing::info!(
            name = %config.name,
            ncell = field.ncell(),
            bondi_radius = solution.bondi_radius(),
            time_unit_s = units.time_in_si,
            "bondi run ready"
        );

        Ok(Self {
            units,
            field,
            solution,
            boundary,
            pressure,
            engine,
        })
    }
}

fn transport_config(mc: &MonteCarloDef) -> TransportConfig {
    TransportConfig {
        photon_rate: mc.photon_rate,
        photons_per_step: mc.photons_per_step,
        bank_capacity: mc.bank_capacity,
        seed: mc.seed,
        cross_section: mc.cross_section_m2,
        recombination_coefficient: mc.recombination_coefficient_m3_s,
    }
}
