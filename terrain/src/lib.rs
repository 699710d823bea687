//! Terrain models from surveyed level readings.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [Samples::match_labels] pairs text labels with drawing points.
//! 1. [Grid::covering] lays a resolution-aligned lattice over them.
//! 1. [HeightField::interpolate] fills the lattice inside the samples'
//!    convex hull.
//! 1. [ContourSet] traces isolines, [Sections] cuts profiles.
//! 1. [annotate::assemble] turns all of it into drawable primitives.
//!
//! [TerrainModel::build] runs every stage with one [Config].

pub mod annotate;
mod config;
pub mod contour;
mod diagnostic;
mod error;
mod field;
mod grid;
mod math;
mod model;
mod sample;
mod section;
pub mod table;

pub use crate::{
    annotate::{Layer, Primitive},
    config::{Config, ElevationMode},
    contour::{ContourLabel, ContourLevel, ContourSet},
    diagnostic::Diagnostic,
    error::TerrainError,
    field::HeightField,
    grid::Grid,
    model::TerrainModel,
    sample::{RawLabel, Sample, Samples},
    section::{letter_name, Axis, SectionLine, Sections},
};
pub use geo;
