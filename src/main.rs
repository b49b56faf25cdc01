use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use projectile_sim::io::json::RunReport;
use projectile_sim::io::{csv, json, reference_records, JsonLinesSink, RecordSink, RunRecord};
use projectile_sim::logging;
use projectile_sim::sim::event::{detect_events, ApogeeDetector, EventDetector, EventKind};
use projectile_sim::{
    simulate, ImpactPolicy, LaunchConditions, Method, ProjectileSpec, ScenarioConfig, Trajectory,
};

#[derive(Parser)]
#[command(name = "projectile-sim")]
#[command(version, about = "Projectile flight simulator with quadratic drag", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single launch
    Run(RunArgs),

    /// List stored runs
    History {
        /// History file (JSON lines)
        #[arg(short, long, default_value = "simulations.jsonl")]
        file: PathBuf,
    },

    /// Append the reference runs to a history file
    Seed {
        /// History file (JSON lines)
        #[arg(short, long, default_value = "simulations.jsonl")]
        file: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Initial speed (m/s)
    #[arg(short = 's', long)]
    speed: f64,

    /// Launch angle above horizontal (degrees)
    #[arg(short = 'a', long)]
    angle: f64,

    /// Projectile mass (kg)
    #[arg(short = 'm', long)]
    mass: f64,

    /// Projectile radius (m)
    #[arg(short = 'r', long)]
    radius: f64,

    /// Launch height (m)
    #[arg(long, default_value = "0.0")]
    height: f64,

    /// Scenario file (JSON) with physics and integration settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gravity (m/s^2)
    #[arg(long)]
    gravity: Option<f64>,

    /// Air density (kg/m^3)
    #[arg(long)]
    air_density: Option<f64>,

    /// Drag coefficient
    #[arg(long)]
    drag_coefficient: Option<f64>,

    /// Time step (s)
    #[arg(long)]
    step: Option<f64>,

    /// Maximum simulated time (s)
    #[arg(long)]
    max_time: Option<f64>,

    /// Integration method
    #[arg(long, value_enum)]
    method: Option<MethodArg>,

    /// Interpolate the impact point instead of clamping the last sample
    #[arg(long)]
    interpolate: bool,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Append the run to this history file (JSON lines)
    #[arg(long)]
    history: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Rk4,
    Euler,
}

impl From<MethodArg> for Method {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Rk4 => Method::Rk4,
            MethodArg::Euler => Method::Euler,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::History { file } => history(file),
        Commands::Seed { file } => seed(file),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn scenario(args: &RunArgs) -> Result<ScenarioConfig> {
    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };

    let physics = &mut scenario.physics;
    physics.gravity = args.gravity.unwrap_or(physics.gravity);
    physics.air_density = args.air_density.unwrap_or(physics.air_density);
    physics.drag_coefficient = args.drag_coefficient.unwrap_or(physics.drag_coefficient);

    let sim = &mut scenario.sim;
    sim.step = args.step.unwrap_or(sim.step);
    sim.max_time = args.max_time.unwrap_or(sim.max_time);
    if let Some(m) = args.method {
        sim.method = m.into();
    }
    if args.interpolate {
        sim.impact = ImpactPolicy::Interpolate;
    }

    scenario.validate()?;
    Ok(scenario)
}

fn run(args: &RunArgs) -> Result<()> {
    let scenario = scenario(args)?;
    let launch = LaunchConditions::new(args.speed, args.angle).with_height(args.height);
    let projectile = ProjectileSpec::new(args.mass, args.radius)?;

    let trajectory = simulate(&launch, &projectile, &scenario.physics, &scenario.sim)
        .context("simulation failed")?;
    let result = trajectory.result();

    print_report(&launch, &projectile, &scenario, &trajectory);

    if let Some(path) = &args.csv {
        csv::write_trajectory_file(path, trajectory.samples())
            .with_context(|| format!("writing {}", path.display()))?;
        info!("trajectory written to {}", path.display());
    }

    if let Some(path) = &args.json {
        let report = RunReport {
            launch: &launch,
            projectile: &projectile,
            physics: &scenario.physics,
            config: &scenario.sim,
            result: &result,
        };
        json::write_summary_file(path, &report)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("summary written to {}", path.display());
    }

    if let Some(path) = &args.history {
        let now = chrono::Local::now().naive_local();
        let record = RunRecord::new(&launch, &projectile, &result, now);
        JsonLinesSink::new(path)
            .record(&record)
            .with_context(|| format!("recording to {}", path.display()))?;
        info!("run recorded in {}", path.display());
    }

    Ok(())
}

fn history(file: PathBuf) -> Result<()> {
    let records = JsonLinesSink::new(&file)
        .load()
        .with_context(|| format!("reading {}", file.display()))?;

    if records.is_empty() {
        println!("No simulations recorded in {}", file.display());
        return Ok(());
    }

    println!(
        "  {:>3}  {:>19}  {:>8}  {:>7}  {:>7}  {:>7}  {:>9}  {:>9}",
        "#", "date", "v0 (m/s)", "angle", "mass", "radius", "range (m)", "apex (m)"
    );
    println!("  {}", "─".repeat(86));
    for (i, r) in records.iter().enumerate() {
        println!(
            "  {:>3}  {:>19}  {:>8.1}  {:>7.1}  {:>7.3}  {:>7.3}  {:>9.2}  {:>9.2}",
            i + 1,
            r.timestamp.format("%Y-%m-%d %H:%M:%S"),
            r.initial_speed,
            r.launch_angle_deg,
            r.mass,
            r.radius,
            r.distance_max,
            r.height_max
        );
    }
    Ok(())
}

fn seed(file: PathBuf) -> Result<()> {
    let mut sink = JsonLinesSink::new(&file);
    let records = reference_records();
    for record in &records {
        sink.record(record)
            .with_context(|| format!("writing {}", file.display()))?;
    }
    info!("appended {} reference runs to {}", records.len(), file.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

fn print_report(
    launch: &LaunchConditions,
    projectile: &ProjectileSpec,
    scenario: &ScenarioConfig,
    trajectory: &Trajectory,
) {
    let result = trajectory.result();
    let physics = &scenario.physics;

    println!();
    println!("====================================================================");
    println!("  PROJECTILE FLIGHT SIMULATION");
    println!("====================================================================");
    println!();
    println!("  Inputs");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Speed:         {:>8.2} m/s   Angle:        {:>8.2} deg",
        launch.speed, launch.angle_deg
    );
    println!(
        "  Mass:          {:>8.3} kg    Radius:       {:>8.3} m",
        projectile.mass(),
        projectile.radius()
    );
    println!(
        "  Gravity:       {:>8.3} m/s^2 Air density:  {:>8.3} kg/m^3",
        physics.gravity, physics.air_density
    );
    println!(
        "  Cd:            {:>8.3}       Drag factor:  {:>8.5} 1/m",
        physics.drag_coefficient,
        projectile.drag_factor(physics)
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    let mut apogee = ApogeeDetector;
    let mut detectors: [&mut dyn EventDetector; 1] = [&mut apogee];
    let events = detect_events(trajectory, &mut detectors);
    for e in &events {
        let label = match &e.kind {
            EventKind::Apogee => "APOGEE".to_string(),
            EventKind::Impact => "IMPACT".to_string(),
            EventKind::Custom(name) => name.clone(),
        };
        println!(
            "  {:<8}  t={:>6.2}s   x={:>8.2}m   y={:>7.2}m   v={:>7.2}m/s",
            label,
            e.time,
            e.sample.x(),
            e.sample.y(),
            e.sample.state.speed()
        );
    }
    if !trajectory.landed() {
        println!(
            "  AIRBORNE  t={:>6.2}s   (max time reached)",
            trajectory.last().time
        );
    }
    println!();

    println!("  Results");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Max distance:  {:>8.2} m", result.distance_max);
    println!("  Max height:    {:>8.2} m", result.height_max);
    println!("  Max speed:     {:>8.2} m/s", result.max_speed);
    println!("  Impact speed:  {:>8.2} m/s", result.impact_speed);
    println!("  Flight time:   {:>8.2} s", result.flight_time);
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}",
        "t (s)", "x (m)", "y (m)", "vx (m/s)", "vy (m/s)"
    );
    println!("  {}", "─".repeat(51));

    let samples = trajectory.samples();
    let sample_interval = (samples.len() / 20).max(1);
    for (i, s) in samples.iter().enumerate() {
        if i % sample_interval != 0 && i != samples.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
            s.time, s.state.pos.x, s.state.pos.y, s.state.vel.x, s.state.vel.y
        );
    }

    println!();
    println!(
        "  Simulation: {} samples, dt={} s, {:?}",
        samples.len(),
        scenario.sim.step,
        scenario.sim.method
    );
    println!("====================================================================");
    println!();
}
