//! Turning raw drawing points and text labels into elevation samples.

use crate::{
    config::{Config, ElevationMode},
    Diagnostic, TerrainError,
};
use geo::{
    algorithm::kernels::{Kernel, Orientation, RobustKernel},
    Coord,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A piece of free text placed in the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLabel {
    pub at: Coord<f64>,
    pub text: String,
}

impl RawLabel {
    pub fn new(at: Coord<f64>, text: impl Into<String>) -> Self {
        Self {
            at,
            text: text.into(),
        }
    }

    /// Parses the first non-blank line of this label as a number.
    pub fn reading(&self) -> Result<f64, Diagnostic> {
        self.text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .and_then(|line| line.parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .ok_or_else(|| Diagnostic::UnparsableLabel {
                at: self.at,
                text: self.text.clone(),
            })
    }
}

/// An elevation at a surveyed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub elevation: f64,
}

impl Sample {
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

/// Samples plus whatever was skipped producing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub samples: Vec<Sample>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Samples {
    /// Matches every label to its nearest point.
    ///
    /// Ties go to the point that comes first in `points`. The sample
    /// takes the point's coordinates, never the label's. Fails unless
    /// the result holds at least 3 non-collinear samples.
    pub fn match_labels(
        points: &[Coord<f64>],
        labels: &[RawLabel],
        config: &Config,
    ) -> Result<Self, TerrainError> {
        Self::match_with(
            points,
            labels,
            config.zero_offset,
            config.elevation_mode,
        )
    }

    pub fn match_with(
        points: &[Coord<f64>],
        labels: &[RawLabel],
        zero_offset: f64,
        mode: ElevationMode,
    ) -> Result<Self, TerrainError> {
        let mut samples = Vec::with_capacity(labels.len());
        let mut diagnostics = Vec::new();

        for label in labels {
            let raw = match label.reading() {
                Ok(raw) => raw,
                Err(diagnostic) => {
                    warn!("{diagnostic}");
                    diagnostics.push(diagnostic);
                    continue;
                }
            };
            if let Some(point) = nearest(points, label.at) {
                samples.push(Sample {
                    x: point.x,
                    y: point.y,
                    elevation: mode.elevation(zero_offset, raw),
                });
            }
        }

        debug!(
            "matched {} labels to {} points; {} samples, {} skipped",
            labels.len(),
            points.len(),
            samples.len(),
            diagnostics.len()
        );

        if !spans_plane(&samples) {
            return Err(TerrainError::InsufficientSamples(samples.len()));
        }

        Ok(Self {
            samples,
            diagnostics,
        })
    }
}

/// Returns the point closest to `target`, first one wins ties.
fn nearest(points: &[Coord<f64>], target: Coord<f64>) -> Option<Coord<f64>> {
    let mut best: Option<(f64, Coord<f64>)> = None;
    for point in points {
        let d = (point.x - target.x).hypot(point.y - target.y);
        match best {
            Some((best_d, _)) if d >= best_d => {}
            _ => best = Some((d, *point)),
        }
    }
    best.map(|(_, point)| point)
}

/// True if at least three samples are not on a common line.
fn spans_plane(samples: &[Sample]) -> bool {
    let Some(first) = samples.first().map(Sample::coord) else {
        return false;
    };
    let Some(second) = samples
        .iter()
        .map(Sample::coord)
        .find(|coord| *coord != first)
    else {
        return false;
    };
    samples.iter().map(Sample::coord).any(|third| {
        RobustKernel::orient2d(first, second, third) != Orientation::Collinear
    })
}
