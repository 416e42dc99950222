use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use orrery_lib::{
    diagnostics::TracingDiagnostics,
    export,
    scenario::{config::parse_timestamp, Scenario},
    solar_system::SolarSystem,
    units::Timestamp,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The default nominal scenario is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Directory holding the Horizons vector tables (JPLEarth.txt, ...)
    #[arg(long, default_value = "data")]
    ephemeris_dir: PathBuf,

    /// Override the scenario start time (RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    start: Option<Timestamp>,

    /// Number of integrator steps to run
    #[arg(long, default_value_t = 144)]
    steps: u64,

    /// Advance every body's rotation by this many minutes before stepping
    #[arg(long)]
    rotate_minutes: Option<f64>,

    /// Write the final meshes to this JSON file
    #[arg(long)]
    mesh_out: Option<PathBuf>,

    /// Override the meters to render units scale
    #[arg(long)]
    display_scale: Option<f64>,
}

const LOG_INTERVAL: u64 = 36;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let intr = interruptor::Interruptor::new();
    let intr_clone = intr.clone();
    ctrlc::set_handler(move || {
        if intr_clone.is_set() {
            let exit_code = if cfg!(target_family = "unix") {
                // 128 (fatal error signal "n") + 2 (control-c is fatal error signal 2)
                130
            } else {
                // Windows code 3221225786
                // -1073741510 == C000013A
                -1073741510
            };
            std::process::exit(exit_code);
        } else {
            intr_clone.set();
        }
    })?;

    let mut scenario = Scenario::load(opts.scenario.as_ref(), &opts.ephemeris_dir)?;
    if let Some(start) = opts.start {
        scenario.start = start;
    }
    if let Some(scale) = opts.display_scale {
        scenario.display_scale = scale;
    }

    let mut diagnostics = TracingDiagnostics;
    let mut system = SolarSystem::from_scenario(&scenario);
    system.seed_from_ephemeris(&mut diagnostics);
    system.align_rotation();
    if let Some(minutes) = opts.rotate_minutes {
        system.add_minutes(minutes);
    }
    system.rebuild_meshes(&mut diagnostics);

    let initial_energy = system.total_energy();
    for _ in 0..opts.steps {
        if intr.is_set() {
            break;
        }

        system.step(&mut diagnostics)?;

        let sim_info = system.sim_info();
        if sim_info.sim_iteration % LOG_INTERVAL == 0 {
            let energy = system.total_energy();
            info!(
                iteration = sim_info.sim_iteration,
                time = %sim_info.timestamp,
                relative_energy_drift = (energy - initial_energy) / initial_energy.abs(),
                "Simulation progress"
            );
        }
    }

    for b in system.bodies() {
        let p = b.state.position;
        println!(
            "{:>8}  x={:+.6e} y={:+.6e} z={:+.6e} m  rotation={:.2}°",
            b.name(),
            p.x,
            p.y,
            p.z,
            b.clock.angle().as_degrees()
        );
    }

    if let Some(path) = opts.mesh_out.as_ref() {
        export::write_json_file(&system, path)?;
    }

    println!("Stopped at\n{:#?}", system.sim_info());

    Ok(())
}

mod interruptor {
    use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    #[repr(transparent)]
    pub struct Interruptor(Arc<AtomicBool>);

    impl Interruptor {
        pub fn new() -> Self {
            Interruptor(Arc::new(AtomicBool::new(false)))
        }

        pub fn set(&self) {
            self.0.store(true, SeqCst);
        }

        pub fn is_set(&self) -> bool {
            self.0.load(SeqCst)
        }
    }

    impl Default for Interruptor {
        fn default() -> Self {
            Self::new()
        }
    }
}
