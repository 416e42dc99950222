// cargo run --bin mesh-stats -- --rows 37 --max-vertexes-per-row 128
// cargo run --bin mesh-stats -- --scenario scenarios/example.toml --body Earth

use clap::Parser;
use std::path::PathBuf;

use orrery_lib::{
    diagnostics::{Diagnostic, Diagnostics},
    ephemeris::EphemerisStore,
    mesh::{MeshLayout, SurfaceMeshBuilder},
    scenario::Scenario,
    units::Angle,
};

/// Print the ring structure of a surface mesh
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Take the layout and radii of this body from the scenario
    #[arg(long, requires = "scenario")]
    body: Option<String>,

    /// Scenario configuration toml file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of rings, pole to pole
    #[arg(long, default_value_t = MeshLayout::SPHERE.rows)]
    rows: usize,

    /// Cap on the vertexes in one ring
    #[arg(long, default_value_t = MeshLayout::SPHERE.max_vertexes_per_row)]
    max_vertexes_per_row: usize,

    /// Equatorial radius [m]
    #[arg(long, default_value_t = 1.0)]
    radius_major: f64,

    /// Polar radius [m], defaults to the equatorial radius
    #[arg(long)]
    radius_minor: Option<f64>,

    /// Axial tilt [deg]
    #[arg(long, default_value_t = 0.0)]
    axial_tilt: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let builder = match opts.body.as_ref() {
        Some(name) => {
            let scenario = Scenario::load(opts.scenario.as_ref(), "data")?;
            let cfg = scenario
                .body(name)
                .ok_or_else(|| format!("No body named '{name}' in the scenario"))?;
            cfg.celestial_body(EphemerisStore::default()).mesh_builder()
        }
        None => SurfaceMeshBuilder::ellipsoid(
            opts.radius_major,
            opts.radius_minor.unwrap_or(opts.radius_major),
            opts.axial_tilt,
            MeshLayout::new(opts.rows, opts.max_vertexes_per_row)?,
        ),
    };

    let layout = builder.layout;
    println!("row  latitude  vertexes");
    for (row, count) in layout.ring_sizes().into_iter().enumerate() {
        println!("{row:>3}  {:>8.3}  {count:>8}", layout.latitude(row));
    }

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mesh = builder.build(Angle::zero(), &mut diagnostics)?;
    let skipped = diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::SeamSkipped { .. }))
        .count();

    println!();
    println!("vertexes:      {}", mesh.vertex_count());
    println!("triangles:     {}", mesh.triangle_count());
    println!("seams skipped: {skipped}");

    // Hand anything else to the log
    let mut log = orrery_lib::diagnostics::TracingDiagnostics;
    for d in diagnostics {
        log.report(d);
    }

    Ok(())
}
