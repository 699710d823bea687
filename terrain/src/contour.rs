//! Isolines over a [HeightField] with marching squares.

use crate::{math::arange, HeightField, TerrainError};
use geo::{Coord, LineString};
use log::debug;
use std::collections::HashMap;

/// Every polyline traced at one elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLevel {
    pub z: f64,

    /// Palette color shared by every polyline of this level.
    pub color: u8,

    /// Open or closed (first vertex repeated) polylines.
    pub polylines: Vec<LineString<f64>>,
}

/// An elevation value to print along a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLabel {
    pub at: Coord<f64>,
    pub z: f64,
    pub color: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    /// Non-empty levels, lowest first.
    pub levels: Vec<ContourLevel>,

    /// A label goes on every `label_stride`th vertex.
    pub label_stride: usize,
}

impl ContourSet {
    pub fn builder() -> ContourSetBuilder {
        ContourSetBuilder {
            interval: None,
            label_spacing: None,
            palette: Vec::new(),
        }
    }

    /// Returns labels on vertex `0, K, 2K, ...` of every polyline.
    pub fn labels(&self) -> impl Iterator<Item = ContourLabel> + '_ {
        let stride = self.label_stride;
        self.levels.iter().flat_map(move |level| {
            level.polylines.iter().flat_map(move |line| {
                line.coords().step_by(stride).map(move |at| ContourLabel {
                    at: *at,
                    z: level.z,
                    color: level.color,
                })
            })
        })
    }
}

pub struct ContourSetBuilder {
    /// Elevation step between levels (required).
    interval: Option<f64>,

    /// Approximate distance between labels along a polyline
    /// (required).
    label_spacing: Option<f64>,

    /// Colors cycled over levels (required, non-empty).
    palette: Vec<u8>,
}

impl ContourSetBuilder {
    #[must_use]
    pub fn interval(mut self, interval: f64) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn label_spacing(mut self, distance: f64) -> Self {
        self.label_spacing = Some(distance);
        self
    }

    #[must_use]
    pub fn palette(mut self, palette: &[u8]) -> Self {
        self.palette = palette.to_vec();
        self
    }

    pub fn build(&self, field: &HeightField) -> Result<ContourSet, TerrainError> {
        let interval = self
            .interval
            .filter(|step| step.is_finite() && *step > 0.0)
            .ok_or(TerrainError::Builder("interval"))?;
        let label_spacing = self
            .label_spacing
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or(TerrainError::Builder("label_spacing"))?;
        if self.palette.is_empty() {
            return Err(TerrainError::Builder("palette"));
        }

        let now = std::time::Instant::now();
        let mut levels = Vec::new();
        for z in contour_levels(field, interval) {
            let polylines = trace(field, z);
            if polylines.is_empty() {
                continue;
            }
            let color = self.palette[levels.len() % self.palette.len()];
            levels.push(ContourLevel {
                z,
                color,
                polylines,
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let label_stride = ((label_spacing / field.grid().cell_size).round() as usize).max(1);

        debug!(
            "contours; levels: {}, polylines: {}, exec: {:?}",
            levels.len(),
            levels.iter().map(|l| l.polylines.len()).sum::<usize>(),
            now.elapsed()
        );

        Ok(ContourSet {
            levels,
            label_stride,
        })
    }
}

/// Returns `floor(min), floor(min) + interval, ...` strictly below
/// `ceil(max)`, or nothing for an all-undefined field.
pub fn contour_levels(field: &HeightField, interval: f64) -> Vec<f64> {
    match (field.min(), field.max()) {
        (Some(min), Some(max)) => arange(min.floor(), max.ceil(), interval).collect(),
        _ => Vec::new(),
    }
}

/// Traces every isoline at elevation `z`.
///
/// Cells with an undefined corner are never crossed.
pub fn trace(field: &HeightField, z: f64) -> Vec<LineString<f64>> {
    let edges = Edges::new(field, z);
    let segments = edges.segments();
    join(&edges, &segments)
}

/// Crossing points of one level, keyed by grid edge.
struct Edges<'a> {
    field: &'a HeightField,
    z: f64,
    /// Number of horizontal edges; vertical edge ids start here.
    horizontal: usize,
}

impl<'a> Edges<'a> {
    fn new(field: &'a HeightField, z: f64) -> Self {
        let grid = field.grid();
        Self {
            field,
            z,
            horizontal: (grid.nx - 1) * grid.ny,
        }
    }

    /// Edge from `(i, j)` to `(i + 1, j)`.
    fn horizontal(&self, i: usize, j: usize) -> usize {
        j * (self.field.grid().nx - 1) + i
    }

    /// Edge from `(i, j)` to `(i, j + 1)`.
    fn vertical(&self, i: usize, j: usize) -> usize {
        self.horizontal + j * self.field.grid().nx + i
    }

    fn endpoints(&self, edge: usize) -> ((usize, usize), (usize, usize)) {
        let nx = self.field.grid().nx;
        if edge < self.horizontal {
            let (i, j) = (edge % (nx - 1), edge / (nx - 1));
            ((i, j), (i + 1, j))
        } else {
            let edge = edge - self.horizontal;
            let (i, j) = (edge % nx, edge / nx);
            ((i, j), (i, j + 1))
        }
    }

    /// Where the level crosses `edge`, by linear interpolation.
    fn crossing(&self, edge: usize) -> Coord<f64> {
        let grid = self.field.grid();
        let ((ia, ja), (ib, jb)) = self.endpoints(edge);
        let za = self.field.get(ia, ja).unwrap_or(self.z);
        let zb = self.field.get(ib, jb).unwrap_or(self.z);
        let t = if za == zb {
            0.5
        } else {
            ((self.z - za) / (zb - za)).clamp(0.0, 1.0)
        };
        let (xa, ya) = (grid.x(ia), grid.y(ja));
        let (xb, yb) = (grid.x(ib), grid.y(jb));
        Coord {
            x: xa + t * (xb - xa),
            y: ya + t * (yb - ya),
        }
    }

    /// Returns one `[edge, edge]` pair per isoline piece, cell by cell.
    fn segments(&self) -> Vec<[usize; 2]> {
        let grid = self.field.grid();
        let mut segments = Vec::new();
        for j in 0..grid.ny - 1 {
            for i in 0..grid.nx - 1 {
                let corners = [
                    self.field.get(i, j),
                    self.field.get(i + 1, j),
                    self.field.get(i + 1, j + 1),
                    self.field.get(i, j + 1),
                ];
                let [Some(bl), Some(br), Some(tr), Some(tl)] = corners else {
                    continue;
                };

                let bottom = self.horizontal(i, j);
                let right = self.vertical(i + 1, j);
                let top = self.horizontal(i, j + 1);
                let left = self.vertical(i, j);

                let above = |v: f64| v >= self.z;
                let case = u8::from(above(bl))
                    | u8::from(above(br)) << 1
                    | u8::from(above(tr)) << 2
                    | u8::from(above(tl)) << 3;

                match case {
                    0 | 15 => {}
                    1 | 14 => segments.push([left, bottom]),
                    2 | 13 => segments.push([bottom, right]),
                    3 | 12 => segments.push([left, right]),
                    4 | 11 => segments.push([right, top]),
                    6 | 9 => segments.push([bottom, top]),
                    7 | 8 => segments.push([top, left]),
                    5 | 10 => {
                        // Saddle: the cell centre decides which pair of
                        // opposite corners is connected.
                        let centre_above = above((bl + br + tr + tl) / 4.0);
                        if (case == 5) == centre_above {
                            segments.push([bottom, right]);
                            segments.push([top, left]);
                        } else {
                            segments.push([left, bottom]);
                            segments.push([right, top]);
                        }
                    }
                    _ => unreachable!("marching squares case is 4 bits"),
                }
            }
        }
        segments
    }
}

/// Chains segments sharing an edge into polylines, open ones first.
fn join(edges: &Edges, segments: &[[usize; 2]]) -> Vec<LineString<f64>> {
    let mut incident: HashMap<usize, Vec<usize>> = HashMap::new();
    for (idx, segment) in segments.iter().enumerate() {
        for edge in segment {
            incident.entry(*edge).or_default().push(idx);
        }
    }
    let degree = |edge: usize| incident.get(&edge).map_or(0, Vec::len);

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();

    let mut walk = |start: usize, from: usize, used: &mut Vec<bool>| {
        let mut chain = vec![from];
        let (mut seg, mut at) = (start, from);
        loop {
            used[seg] = true;
            let [a, b] = segments[seg];
            let next = if a == at { b } else { a };
            chain.push(next);
            match incident
                .get(&next)
                .and_then(|segs| segs.iter().copied().find(|s| !used[*s]))
            {
                Some(s) => (seg, at) = (s, next),
                None => break,
            }
        }
        let mut coords: Vec<Coord<f64>> = Vec::with_capacity(chain.len());
        for edge in chain {
            let coord = edges.crossing(edge);
            if coords.last() != Some(&coord) {
                coords.push(coord);
            }
        }
        if coords.len() >= 2 {
            lines.push(LineString::new(coords));
        }
    };

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        if let Some(end) = segments[start].iter().copied().find(|e| degree(*e) == 1) {
            walk(start, end, &mut used);
        }
    }
    for start in 0..segments.len() {
        if !used[start] {
            walk(start, segments[start][0], &mut used);
        }
    }

    lines
}
