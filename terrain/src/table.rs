//! `x,y,elevation` rows, one per sample.

use crate::Sample;
use std::io::{self, BufRead, Write};

/// Writes one `x,y,elevation` row per sample, in order.
pub fn write_samples<W: Write>(mut out: W, samples: &[Sample]) -> io::Result<()> {
    for Sample { x, y, elevation } in samples {
        writeln!(out, "{x},{y},{elevation}")?;
    }
    out.flush()
}

/// Reads rows written by [write_samples]. Blank lines are ignored.
pub fn read_samples<R: BufRead>(rdr: R) -> io::Result<Vec<Sample>> {
    let invalid = |line_no: usize, line: &str| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line {line_no}: expected x,y,elevation, got {line:?}"),
        )
    };

    let mut samples = Vec::new();
    for (idx, line) in rdr.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<f64> = line
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid(idx + 1, &line))?;
        let [x, y, elevation] = fields[..] else {
            return Err(invalid(idx + 1, &line));
        };
        samples.push(Sample { x, y, elevation });
    }
    Ok(samples)
}
