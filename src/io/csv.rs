use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::state::Sample;

/// Write trajectory data to CSV format.
///
/// Columns: time, x, y, vx, vy, speed
pub fn write_trajectory<W: Write>(writer: &mut W, samples: &[Sample]) -> io::Result<()> {
    writeln!(writer, "time,x,y,vx,vy,speed")?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.state.pos.x,
            s.state.pos.y,
            s.state.vel.x,
            s.state.vel.y,
            s.state.speed(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, samples: &[Sample]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, samples)?;
    file.flush()
}
