//! Piecewise-linear interpolation of scattered samples onto a grid.

use crate::{Grid, Sample, TerrainError};
use log::debug;
use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation};

/// Interpolated elevations at every node of a [Grid].
///
/// A node is `None` when it lies outside the convex hull of the
/// samples; nothing is ever extrapolated.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    grid: Grid,
    values: Vec<Option<f64>>,
    min: Option<f64>,
    max: Option<f64>,
}

struct SurveyVertex {
    position: Point2<f64>,
    elevation: f64,
}

impl HasPosition for SurveyVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

impl HeightField {
    /// Interpolates `samples` over a Delaunay triangulation.
    ///
    /// Duplicate or collinear samples can leave every node undefined;
    /// that is not an error.
    pub fn interpolate(samples: &[Sample], grid: Grid) -> Result<Self, TerrainError> {
        let now = std::time::Instant::now();

        let vertices = samples
            .iter()
            .map(|sample| SurveyVertex {
                position: Point2::new(sample.x, sample.y),
                elevation: sample.elevation,
            })
            .collect();
        let triangulation: DelaunayTriangulation<SurveyVertex> =
            DelaunayTriangulation::bulk_load_stable(vertices)?;
        let barycentric = triangulation.barycentric();

        let values = grid
            .nodes()
            .map(|node| {
                barycentric.interpolate(|v| v.data().elevation, Point2::new(node.x, node.y))
            })
            .collect();

        let field = Self::from_values(grid, values);
        debug!(
            "height field; triangles: {}, defined: {}/{}, exec: {:?}",
            triangulation.num_inner_faces(),
            field.values.iter().flatten().count(),
            grid.len(),
            now.elapsed()
        );
        Ok(field)
    }

    /// Builds a field from precomputed node values (row-major).
    ///
    /// # Panics
    ///
    /// If `values` doesn't have exactly one entry per grid node.
    pub fn from_values(grid: Grid, values: Vec<Option<f64>>) -> Self {
        assert_eq!(values.len(), grid.len(), "one value per grid node");
        let min = values.iter().flatten().copied().reduce(f64::min);
        let max = values.iter().flatten().copied().reduce(f64::max);
        Self {
            grid,
            values,
            min,
            max,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the elevation at node `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.grid.nx && j < self.grid.ny {
            self.values[self.grid.index(i, j)]
        } else {
            None
        }
    }

    /// Lowest defined elevation.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Highest defined elevation.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Difference between the highest and lowest defined elevation.
    pub fn relief(&self) -> Option<f64> {
        self.min.zip(self.max).map(|(min, max)| max - min)
    }

    /// Returns column `i` (fixed x), south to north.
    pub fn column(&self, i: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.grid.ny).map(move |j| self.get(i, j))
    }

    /// Returns row `j` (fixed y), west to east.
    pub fn row(&self, j: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.grid.nx).map(move |i| self.get(i, j))
    }
}
