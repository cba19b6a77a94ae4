//! The ionization step as seen by the hydro loop.
//!
//! An [`IonizationEngine`] owns everything that persists between steps: the
//! selected model (and with it the solver budget or the photon bank), the
//! transition profile, the central mass and the radius log.

use crate::error::{IonResult, TransportResult};
use crate::profile::TransitionProfile;
use crate::radius::{CentralMass, SelfConsistentSolver};
use crate::radius_log::{RadiusLog, RadiusRecord};
use crate::transport::{MonteCarloTransport, TransportConfig, TransportTally};
use pf_core::UnitSystem;
use pf_core::timing::{Timer, ion_timing};
use pf_grid::CellField;

/// How the ionization radius (or the neutral fraction directly) is found.
#[derive(Debug)]
pub enum IonizationModel {
    /// Fixed radius, internal units.
    Constant { radius: f64 },
    /// Radius where the recombination cost of the shells uses up the budget.
    SelfConsistent(SelfConsistentSolver),
    /// Photon packets and a per-shell balance update.
    MonteCarlo(Box<MonteCarloTransport>),
}

impl IonizationModel {
    pub fn constant(radius: f64) -> Self {
        IonizationModel::Constant { radius }
    }

    /// Budget chosen so that the current density field is ionized out to
    /// `initial_radius`.
    pub fn self_consistent(field: &CellField, initial_radius: f64) -> Self {
        IonizationModel::SelfConsistent(SelfConsistentSolver::from_initial_radius(
            field.interior(),
            initial_radius,
        ))
    }

    /// Monte Carlo transport; marks every interior shell fully neutral.
    pub fn monte_carlo(field: &mut CellField, config: TransportConfig) -> TransportResult<Self> {
        let mut transport = MonteCarloTransport::new(config, field)?;
        transport.initialize(field);
        Ok(IonizationModel::MonteCarlo(Box::new(transport)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            IonizationModel::Constant { .. } => "constant",
            IonizationModel::SelfConsistent(_) => "self-consistent",
            IonizationModel::MonteCarlo(_) => "monte-carlo",
        }
    }
}

/// Clock information handed in by the hydro loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext {
    pub integer_time: u64,
    /// Internal time per integer time tick
    pub time_conversion_factor: f64,
    /// Step length, internal units
    pub dt: f64,
}

impl StepContext {
    pub fn new(integer_time: u64, time_conversion_factor: f64, dt: f64) -> Self {
        Self {
            integer_time,
            time_conversion_factor,
            dt,
        }
    }

    /// Current time, internal units.
    pub fn time(&self) -> f64 {
        self.integer_time as f64 * self.time_conversion_factor
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Ionization radius, internal units
    pub radius: f64,
    /// A radius log record was written this step
    pub logged: bool,
    /// Packet fates, Monte Carlo model only
    pub transport: Option<TransportTally>,
}

#[derive(Debug)]
pub struct IonizationEngine {
    model: IonizationModel,
    profile: TransitionProfile,
    units: UnitSystem,
    central_mass: CentralMass,
    radius_log: Option<RadiusLog>,
}

impl IonizationEngine {
    pub fn new(
        model: IonizationModel,
        profile: TransitionProfile,
        units: UnitSystem,
        central_mass: CentralMass,
    ) -> Self {
        tracing::info!(model = model.name(), ?profile, "ionization engine ready");
        Self {
            model,
            profile,
            units,
            central_mass,
            radius_log: None,
        }
    }

    pub fn with_radius_log(mut self, log: RadiusLog) -> Self {
        self.radius_log = Some(log);
        self
    }

    pub fn model(&self) -> &IonizationModel {
        &self.model
    }

    pub fn profile(&self) -> TransitionProfile {
        self.profile
    }

    pub fn radius_log(&self) -> Option<&RadiusLog> {
        self.radius_log.as_ref()
    }

    pub fn central_mass(&self) -> &CentralMass {
        &self.central_mass
    }

    /// Hook for the mass flux through the inner boundary.
    pub fn record_inner_mask_flux(&mut self, mflux: f64) {
        self.central_mass.record_inner_mask_flux(mflux);
    }

    /// Update the neutral fraction of every interior cell for one step.
    pub fn step(&mut self, field: &mut CellField, ctx: &StepContext) -> IonResult<StepReport> {
        let mut transport = None;

        let (radius, budget) = match &mut self.model {
            IonizationModel::Constant { radius } => {
                self.profile.apply(field.interior_mut(), *radius);
                // a fixed radius is never logged
                (*radius, None)
            }
            IonizationModel::SelfConsistent(solver) => {
                let scale = self.central_mass.luminosity_factor();

                let timer = Timer::start();
                let rion = solver.solve(field.interior(), scale);
                timer.stop_into(&ion_timing::RADIUS_SOLVE);

                let timer = Timer::start();
                self.profile.apply(field.interior_mut(), rion);
                timer.stop_into(&ion_timing::PROFILE_EVAL);

                (rion, Some(solver.budget() * scale))
            }
            IonizationModel::MonteCarlo(mc) => {
                let dt_s = ctx.dt * self.units.time_in_si;
                transport = Some(mc.step(field, &self.units, dt_s)?);
                let rion = MonteCarloTransport::ionization_radius(field);
                (rion, Some(mc.config().photon_rate))
            }
        };

        let mut logged = false;
        if let (Some(log), Some(budget)) = (self.radius_log.as_mut(), budget) {
            let record = RadiusRecord {
                time_s: ctx.time() * self.units.time_in_si,
                radius_m: radius * self.units.length_in_si,
                budget,
            };
            logged = log.observe(radius, record)?;
        }

        tracing::debug!(
            integer_time = ctx.integer_time,
            radius,
            logged,
            "ionization step"
        );
        Ok(StepReport {
            radius,
            logged,
            transport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{kg, m, s};
    use pf_grid::GridBuilder;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn units() -> UnitSystem {
        UnitSystem::new(m(2.0), kg(1.0), s(3.0)).unwrap()
    }

    #[test]
    fn self_consistent_logs_only_on_change() {
        let mut field = GridBuilder::uniform(1.0, 11.0, 10).build().unwrap();
        for cell in field.interior_mut() {
            cell.rho = 1.0;
        }
        let buf = SharedBuf::default();
        let model = IonizationModel::self_consistent(&field, 6.0);
        let mut engine = IonizationEngine::new(
            model,
            TransitionProfile::Jump,
            units(),
            CentralMass::new(1.0),
        )
        .with_radius_log(RadiusLog::from_writer(buf.clone()));

        let first = engine.step(&mut field, &StepContext::new(0, 0.5, 0.1)).unwrap();
        assert!((first.radius - 6.0).abs() < 1e-10);
        assert!(first.logged);

        let second = engine.step(&mut field, &StepContext::new(4, 0.5, 0.1)).unwrap();
        assert!(!second.logged);

        // denser gas pulls the front in
        for cell in field.interior_mut() {
            cell.rho = 2.0;
        }
        let third = engine.step(&mut field, &StepContext::new(8, 0.5, 0.1)).unwrap();
        assert!(third.logged);
        assert!(third.radius < 6.0);

        let bytes = buf.0.lock().unwrap().clone();
        assert_eq!(bytes.len(), 2 * 24);
        let time = f64::from_le_bytes(bytes[24..32].try_into().unwrap());
        let radius = f64::from_le_bytes(bytes[32..40].try_into().unwrap());
        assert_eq!(time, 8.0 * 0.5 * 3.0);
        assert_eq!(radius, third.radius * 2.0);
    }

    #[test]
    fn constant_model_never_logs() {
        let mut field = GridBuilder::uniform(0.0, 10.0, 10).build().unwrap();
        let mut engine = IonizationEngine::new(
            IonizationModel::constant(5.0),
            TransitionProfile::Jump,
            units(),
            CentralMass::new(1.0),
        )
        .with_radius_log(RadiusLog::from_writer(std::io::sink()));
        let report = engine.step(&mut field, &StepContext::new(0, 1.0, 1.0)).unwrap();
        assert!(!report.logged);
        assert!(report.transport.is_none());
        assert_eq!(engine.radius_log().unwrap().records_written(), 0);
    }
}
