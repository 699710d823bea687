//! Drawable primitives for a [TerrainModel].

use crate::{Axis, Config, TerrainModel};
use geo::Coord;
use std::fmt;

/// Output layer of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Contours,
    ContourHeights,
    PointHeights,
    Sections,
    SectionNames,
}

impl Layer {
    pub fn name(self) -> &'static str {
        match self {
            Self::Contours => "CONTOURS",
            Self::ContourHeights => "CONTOURHEIGHTS",
            Self::PointHeights => "POINTHEIGHTS",
            Self::Sections => "SECTIONS",
            Self::SectionNames => "SECTIONNAMES",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something to draw, in drawing coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline {
        vertices: Vec<Coord<f64>>,
        closed: bool,
        layer: Layer,
        /// `None` draws with the layer's color.
        color: Option<u8>,
    },
    Text {
        content: String,
        at: Coord<f64>,
        height: f64,
        layer: Layer,
        color: Option<u8>,
    },
}

impl Primitive {
    pub fn layer(&self) -> Layer {
        match self {
            Self::Polyline { layer, .. } | Self::Text { layer, .. } => *layer,
        }
    }
}

/// Offset of a point's elevation label from the point itself.
const POINT_LABEL_OFFSET: Coord<f64> = Coord { x: 0.2, y: -0.2 };

/// Returns every primitive for `model`: contours and their labels,
/// point elevations, then stacked sections.
pub fn assemble(model: &TerrainModel, config: &Config) -> Vec<Primitive> {
    let height = config.text_height;
    let mut out = Vec::new();

    for level in &model.contours.levels {
        for line in &level.polylines {
            out.push(Primitive::Polyline {
                vertices: line.coords().copied().collect(),
                closed: line.is_closed(),
                layer: Layer::Contours,
                color: Some(level.color),
            });
        }
    }
    out.extend(model.contours.labels().map(|label| Primitive::Text {
        content: format!("{:.2}", label.z),
        at: label.at,
        height,
        layer: Layer::ContourHeights,
        color: Some(label.color),
    }));

    out.extend(model.samples.iter().map(|sample| Primitive::Text {
        content: format!("{:.2}", sample.elevation),
        at: sample.coord() + POINT_LABEL_OFFSET,
        height,
        layer: Layer::PointHeights,
        color: None,
    }));

    let grid = &model.grid;
    for section in &model.sections.lines {
        let (start, length) = match section.axis {
            Axis::Vertical => (grid.origin_y, grid.max_y() - grid.origin_y),
            Axis::Horizontal => (grid.origin_x, grid.max_x() - grid.origin_x),
        };
        let x0 = grid.origin_x;
        let profile: Vec<Coord<f64>> = section
            .drawing_coords(x0, start)
            .map(|(x, y)| Coord { x, y })
            .collect();
        if profile.len() >= 2 {
            out.push(Primitive::Polyline {
                vertices: profile,
                closed: false,
                layer: Layer::Sections,
                color: None,
            });
        }
        out.push(Primitive::Polyline {
            vertices: vec![
                Coord {
                    x: x0,
                    y: section.stack_offset,
                },
                Coord {
                    x: x0 + length,
                    y: section.stack_offset,
                },
            ],
            closed: false,
            layer: Layer::Sections,
            color: None,
        });
        out.push(Primitive::Text {
            content: section.name.clone(),
            at: Coord {
                x: x0 - 4.0 * height,
                y: section.stack_offset,
            },
            height: 2.0 * height,
            layer: Layer::SectionNames,
            color: None,
        });
    }

    out
}
