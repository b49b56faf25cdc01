//! Run records handed to a persistence sink.
//!
//! A record carries only the launch inputs, a caller-supplied timestamp and
//! the two extremes of the run. How and where it is stored is the sink's
//! business; the simulator never reads it back.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::projectile::{LaunchConditions, ProjectileSpec};
use crate::sim::runner::RunResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub initial_speed: f64,    // m/s
    pub launch_angle_deg: f64, // degrees
    pub mass: f64,             // kg
    pub radius: f64,           // m
    pub timestamp: NaiveDateTime,
    pub distance_max: f64, // m
    pub height_max: f64,   // m
}

impl RunRecord {
    pub fn new(
        launch: &LaunchConditions,
        projectile: &ProjectileSpec,
        result: &RunResult,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            initial_speed: launch.speed,
            launch_angle_deg: launch.angle_deg,
            mass: projectile.mass(),
            radius: projectile.radius(),
            timestamp,
            distance_max: result.distance_max,
            height_max: result.height_max,
        }
    }
}

/// Durable destination for run records.
pub trait RecordSink {
    fn record(&mut self, record: &RunRecord) -> Result<(), SimError>;
}

// ---------------------------------------------------------------------------
// In-memory sink
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<RunRecord>,
}

impl RecordSink for MemorySink {
    fn record(&mut self, record: &RunRecord) -> Result<(), SimError> {
        self.records.push(record.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON-lines file sink
// ---------------------------------------------------------------------------

/// Appends one JSON object per line. The file is created on first write.
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored records in insertion order. A missing file is an empty
    /// history; blank lines are skipped.
    pub fn load(&self) -> Result<Vec<RunRecord>, SimError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

impl RecordSink for JsonLinesSink {
    fn record(&mut self, record: &RunRecord) -> Result<(), SimError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
        writer.flush()?;
        debug!("recorded run to {}", self.path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reference history
// ---------------------------------------------------------------------------

/// The five fixture rows the history is traditionally seeded with.
///
/// These are illustrative values, not outputs of this simulator.
pub fn reference_records() -> Vec<RunRecord> {
    const ROWS: [(f64, f64, f64, f64, (i32, u32, u32), f64, f64); 5] = [
        (50.0, 45.0, 1.0, 0.1, (2025, 1, 1), 127.8, 45.2),
        (30.0, 30.0, 0.5, 0.05, (2025, 1, 2), 84.3, 22.1),
        (70.0, 60.0, 2.0, 0.2, (2025, 1, 3), 215.6, 78.9),
        (25.0, 15.0, 0.3, 0.03, (2025, 1, 4), 42.7, 5.8),
        (100.0, 75.0, 5.0, 0.5, (2025, 1, 5), 320.1, 120.4),
    ];

    ROWS.iter()
        .filter_map(|&(speed, angle, mass, radius, (y, m, d), dist, height)| {
            let timestamp = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
            Some(RunRecord {
                initial_speed: speed,
                launch_angle_deg: angle,
                mass,
                radius,
                timestamp,
                distance_max: dist,
                height_max: height,
            })
        })
        .collect()
}
