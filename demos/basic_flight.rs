use projectile_sim::io::csv;
use projectile_sim::io::json::{self, RunReport};
use projectile_sim::{simulate, LaunchConditions, PhysicalParameters, ProjectileSpec, SimConfig};

fn main() {
    let launch = LaunchConditions::new(50.0, 45.0);
    let projectile = ProjectileSpec::new(1.0, 0.1).expect("valid projectile");
    let physics = PhysicalParameters::default();
    let config = SimConfig::default();

    println!("Simulating {} m/s at {} deg ...", launch.speed, launch.angle_deg);
    let trajectory =
        simulate(&launch, &projectile, &physics, &config).expect("simulation failed");

    let result = trajectory.result();
    println!("Range: {:.2} m", result.distance_max);
    println!("Apex: {:.2} m", result.height_max);
    println!("Flight time: {:.2} s ({:?})", result.flight_time, result.termination);

    csv::write_trajectory_file("basic_flight_trajectory.csv", trajectory.samples())
        .expect("Failed to write CSV");
    let report = RunReport {
        launch: &launch,
        projectile: &projectile,
        physics: &physics,
        config: &config,
        result: &result,
    };
    json::write_summary_file("basic_flight_summary.json", &report).expect("Failed to write JSON");

    println!("Exported: basic_flight_trajectory.csv, basic_flight_summary.json");
}
