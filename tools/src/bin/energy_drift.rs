// cargo run --bin energy-drift --release -- --ephemeris-dir data --steps 4320 /tmp/energy.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use orrery_lib::{
    diagnostics::TracingDiagnostics, scenario::Scenario, solar_system::SolarSystem,
};

/// Write the total energy of the system after every integrator step
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The default nominal scenario is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Directory holding the Horizons vector tables
    #[arg(long, default_value = "data")]
    ephemeris_dir: PathBuf,

    /// Number of integrator steps
    #[arg(short = 'n', long)]
    steps: u64,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let scenario = Scenario::load(opts.scenario.as_ref(), &opts.ephemeris_dir)?;
    let mut diagnostics = TracingDiagnostics;
    let mut system = SolarSystem::from_scenario(&scenario);
    system.seed_from_ephemeris(&mut diagnostics);

    let mut output = File::create(opts.output)?;

    let initial = system.total_energy();
    writeln!(&mut output, "0 {} {initial} 0", system.sim_info().timestamp.as_millis())?;

    for _ in 0..opts.steps {
        system.step_dynamics()?;

        let energy = system.total_energy();
        let sim_info = system.sim_info();
        writeln!(
            &mut output,
            "{} {} {} {}",
            sim_info.sim_iteration,
            sim_info.timestamp.as_millis(),
            energy,
            (energy - initial) / initial.abs(),
        )?;
    }

    Ok(())
}
