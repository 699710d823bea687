use crate::{
    math::{linspace, snap_down, snap_up},
    Sample, TerrainError,
};
use geo::{BoundingRect, Coord, MultiPoint, Point};
use log::debug;
use serde::Serialize;

/// A regular lattice of sampling nodes.
///
/// Node `(i, j)` sits at `(origin_x + i * cell_size, origin_y + j *
/// cell_size)`. Row-major, `i` varies fastest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grid {
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_size: f64,
    pub nx: usize,
    pub ny: usize,
}

impl Grid {
    /// Returns the smallest `resolution`-aligned grid covering every
    /// sample.
    pub fn covering(samples: &[Sample], resolution: f64) -> Result<Self, TerrainError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(TerrainError::InvalidParameter {
                name: "grid resolution",
                value: resolution,
            });
        }

        let bounds = samples
            .iter()
            .map(|sample| Point::from(sample.coord()))
            .collect::<MultiPoint<f64>>()
            .bounding_rect()
            .ok_or(TerrainError::InsufficientSamples(0))?;

        let min = Coord {
            x: snap_down(bounds.min().x, resolution),
            y: snap_down(bounds.min().y, resolution),
        };
        let max = Coord {
            x: snap_up(bounds.max().x, resolution),
            y: snap_up(bounds.max().y, resolution),
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (nx, ny) = (
            ((max.x - min.x) / resolution).round() as usize + 1,
            ((max.y - min.y) / resolution).round() as usize + 1,
        );
        if nx < 2 || ny < 2 {
            return Err(TerrainError::DegenerateGrid { nx, ny });
        }

        debug!("grid; origin: {min:?}, cell: {resolution}, nodes: {nx}x{ny}");

        Ok(Self {
            origin_x: min.x,
            origin_y: min.y,
            cell_size: resolution,
            nx,
            ny,
        })
    }

    /// Total number of nodes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn x(&self, i: usize) -> f64 {
        self.origin_x + i as f64 * self.cell_size
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn y(&self, j: usize) -> f64 {
        self.origin_y + j as f64 * self.cell_size
    }

    pub fn max_x(&self) -> f64 {
        self.x(self.nx - 1)
    }

    pub fn max_y(&self) -> f64 {
        self.y(self.ny - 1)
    }

    pub fn index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// Returns node coordinates in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        let xs: Vec<f64> = linspace(self.origin_x, self.max_x(), self.nx).collect();
        linspace(self.origin_y, self.max_y(), self.ny)
            .flat_map(move |y| xs.clone().into_iter().map(move |x| Coord { x, y }))
    }

    /// Returns the grid line index at `position` along an axis starting
    /// at `origin` with `count` lines, if `position` lands on one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn line_index(&self, origin: f64, count: usize, position: f64) -> Option<usize> {
        let offset = (position - origin) / self.cell_size;
        let index = offset.round();
        if index >= 0.0 && (offset - index).abs() <= 1e-6 && (index as usize) < count {
            Some(index as usize)
        } else {
            None
        }
    }
}
