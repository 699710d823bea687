use crate::section::Axis;
use geo::Coord;
use std::fmt;

/// A recoverable, per-item problem met while building a model.
///
/// Diagnostics never abort a run; they are collected in the order they
/// were found and logged as warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A label whose first line is not a number.
    UnparsableLabel { at: Coord<f64>, text: String },

    /// A section cut position that doesn't land on a grid line.
    UnmatchedCut { axis: Axis, position: f64 },

    /// A section cut with no defined height field node.
    EmptySection { axis: Axis, name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableLabel { at, text } => {
                write!(f, "skipping label {text:?} at ({}, {})", at.x, at.y)
            }
            Self::UnmatchedCut { axis, position } => {
                write!(f, "no {axis} grid line at {position}, skipping cut")
            }
            Self::EmptySection { axis, name } => {
                write!(f, "{axis} section {name} has no defined elevations")
            }
        }
    }
}
