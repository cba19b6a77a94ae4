//! Run configuration validation.

use crate::schema::{ModeDef, RunConfig, TransitionDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and positive"))
    }
}

fn nonzero(field: &str, value: usize) -> Result<(), ValidationError> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be at least 1"))
    }
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version != crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let grid = &config.grid;
    if !(grid.rmin_au.is_finite() && grid.rmin_au >= 0.0) {
        return Err(invalid("grid.rmin_au", grid.rmin_au, "must be finite and non-negative"));
    }
    positive("grid.rmax_au", grid.rmax_au)?;
    if grid.rmin_au >= grid.rmax_au {
        return Err(invalid("grid.rmin_au", grid.rmin_au, "must be below grid.rmax_au"));
    }
    nonzero("grid.ncell", grid.ncell)?;

    positive("units.length_in_si", config.units.length_in_si)?;
    positive("units.mass_in_si", config.units.mass_in_si)?;

    let gas = &config.gas;
    positive("gas.isothermal_temperature_k", gas.isothermal_temperature_k)?;
    positive("gas.point_mass_msol", gas.point_mass_msol)?;
    positive("gas.bondi_density_si", gas.bondi_density_si)?;
    positive("gas.pressure_contrast", gas.pressure_contrast)?;

    let ion = &config.ionization;
    positive("ionization.initial_radius_au", ion.initial_radius_au)?;
    if let TransitionDef::Smooth { width_au } = ion.transition {
        // zero is accepted and degrades to a jump
        if !(width_au.is_finite() && width_au >= 0.0) {
            return Err(invalid(
                "ionization.transition.width_au",
                width_au,
                "must be finite and non-negative",
            ));
        }
    }

    if let ModeDef::MonteCarlo(mc) = &ion.mode {
        positive("ionization.mode.photon_rate", mc.photon_rate)?;
        nonzero("ionization.mode.photons_per_step", mc.photons_per_step)?;
        nonzero("ionization.mode.bank_capacity", mc.bank_capacity)?;
        positive("ionization.mode.cross_section_m2", mc.cross_section_m2)?;
        positive(
            "ionization.mode.recombination_coefficient_m3_s",
            mc.recombination_coefficient_m3_s,
        )?;
    }

    Ok(())
}
