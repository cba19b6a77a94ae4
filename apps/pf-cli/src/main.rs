use clap::{Parser, Subcommand};
use pf_core::timing::ion_timing;
use pf_sim::{BondiRun, SimOptions, run_sim};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] pf_project::ProjectError),

    #[error(transparent)]
    Sim(#[from] pf_sim::SimError),

    #[error(transparent)]
    Ion(#[from] pf_ion::IonError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PhotoFlow CLI - Ionization of spherical Bondi accretion flows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate run configuration syntax and values
    Validate {
        /// Path to the run configuration (YAML, or JSON by extension)
        config_path: PathBuf,
    },
    /// Step the ionization engine on a frozen Bondi flow
    Run {
        /// Path to the run configuration (YAML, or JSON by extension)
        config_path: PathBuf,
        /// Time step in internal units
        #[arg(long)]
        dt: f64,
        /// Number of steps
        #[arg(long)]
        steps: u64,
        /// Print every N-th step
        #[arg(long, default_value_t = 10)]
        record_every: u64,
    },
    /// Decode a binary ionization radius log
    RadiusLog {
        /// Path to the radius log file
        log_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            dt,
            steps,
            record_every,
        } => cmd_run(
            &config_path,
            SimOptions {
                dt,
                steps,
                record_every,
            },
        ),
        Commands::RadiusLog { log_path } => cmd_radius_log(&log_path),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = pf_project::load(config_path)?;
    println!("✓ Configuration '{}' is valid", config.name);
    Ok(())
}

fn cmd_run(config_path: &Path, opts: SimOptions) -> CliResult<()> {
    let config = pf_project::load(config_path)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");
    println!("Running '{}'", config.name);
    println!("  dt = {:.3e}, steps = {}", opts.dt, opts.steps);

    let start = Instant::now();
    let mut run = BondiRun::from_config(&config)?;
    ion_timing::reset_all();
    let record = run_sim(&mut run, &opts)?;
    let elapsed = start.elapsed();

    println!("✓ Run completed in {:.3} s", elapsed.as_secs_f64());
    let au = run.units.length_in_si / pf_core::constants::AU_M;
    println!("  {:>14}  {:>14}  {:>12}", "t [s]", "t [internal]", "r_ion [AU]");
    for (t, r) in record.t.iter().zip(&record.radius) {
        println!(
            "  {:>14.6e}  {:>14.6e}  {:>12.4}",
            t * run.units.time_in_si,
            t,
            r * au
        );
    }
    if let Some(tally) = record.transport {
        println!(
            "  Packets: {} emitted, {} absorbed, {} escaped, {} in bank",
            tally.emitted, tally.absorbed, tally.escaped, tally.banked
        );
    }
    if let Some(log) = run.engine.radius_log() {
        println!("  Radius log records: {}", log.records_written());
    }
    ion_timing::log_summary();
    Ok(())
}

fn cmd_radius_log(log_path: &Path) -> CliResult<()> {
    let records = pf_ion::read_radius_log(log_path)?;
    if records.is_empty() {
        println!("No records in {}", log_path.display());
        return Ok(());
    }

    println!("{:>14}  {:>14}  {:>14}", "t [s]", "r_ion [AU]", "budget");
    for rec in &records {
        println!(
            "{:>14.6e}  {:>14.4}  {:>14.6e}",
            rec.time_s,
            rec.radius_m / pf_core::constants::AU_M,
            rec.budget
        );
    }
    println!("✓ {} records", records.len());
    Ok(())
}
