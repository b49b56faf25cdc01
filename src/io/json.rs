use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::SimError;
use crate::physics::params::PhysicalParameters;
use crate::projectile::{LaunchConditions, ProjectileSpec};
use crate::sim::config::SimConfig;
use crate::sim::runner::RunResult;

/// Inputs and outcome of one run, as written to the JSON summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub launch: &'a LaunchConditions,
    pub projectile: &'a ProjectileSpec,
    pub physics: &'a PhysicalParameters,
    pub config: &'a SimConfig,
    pub result: &'a RunResult,
}

/// Write a run report as pretty-printed JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, report: &RunReport<'_>) -> Result<(), SimError> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a run report JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, report: &RunReport<'_>) -> Result<(), SimError> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, report)
}
