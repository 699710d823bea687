//! DXF drawings as level-reading input and annotation output.
//!
//! Input drawings hold a `POINT` at every surveyed spot and an `MTEXT`
//! (or `TEXT`) reading placed next to it. Only the first line of a
//! reading matters, so notes can follow on later lines.

mod error;
mod mtext;

pub use crate::{error::CadError, mtext::plain_text};
use dxf::{
    entities::{Entity, EntityType, MText, Polyline, Vertex},
    tables::Layer as LayerTable,
    Color, Drawing, Point,
};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};
use terrain::{geo::Coord, Layer, Primitive, RawLabel};

pub struct Document {
    drawing: Drawing,
}

impl Document {
    /// Reads the DXF drawing at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CadError> {
        let mut rdr = BufReader::new(File::open(&path)?);
        let drawing = Drawing::load(&mut rdr)?;
        debug!(
            "loaded {:?}; version: {:?}, entities: {}",
            path.as_ref(),
            drawing.header.version,
            drawing.entities().count()
        );
        Ok(Self { drawing })
    }

    pub fn from_drawing(drawing: Drawing) -> Self {
        Self { drawing }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Entities outside paper space, where the survey lives.
    fn model_space(&self) -> impl Iterator<Item = &Entity> {
        self.drawing
            .entities()
            .filter(|entity| !entity.common.is_in_paper_space)
    }

    /// Returns the location of every model space `POINT`, in drawing
    /// order.
    pub fn points(&self) -> Vec<Coord<f64>> {
        self.model_space()
            .filter_map(|entity| match &entity.specific {
                EntityType::ModelPoint(point) => Some(Coord {
                    x: point.location.x,
                    y: point.location.y,
                }),
                _ => None,
            })
            .collect()
    }

    /// Returns every model space `MTEXT` and `TEXT` as plain text, in
    /// drawing order.
    pub fn labels(&self) -> Vec<RawLabel> {
        self.model_space()
            .filter_map(|entity| match &entity.specific {
                EntityType::MText(mtext) => {
                    let raw = mtext.extended_text.concat() + &mtext.text;
                    Some(RawLabel::new(coord(&mtext.insertion_point), plain_text(&raw)))
                }
                EntityType::Text(text) => {
                    Some(RawLabel::new(coord(&text.location), text.value.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Adds `primitives` to the drawing, creating missing layers.
    pub fn annotate(&mut self, primitives: &[Primitive]) {
        for primitive in primitives {
            self.ensure_layer(primitive.layer());
            let (specific, layer, color) = match primitive {
                Primitive::Polyline {
                    vertices,
                    closed,
                    layer,
                    color,
                } => {
                    let mut polyline = Polyline::default();
                    for vertex in vertices {
                        polyline.add_vertex(&mut self.drawing, Vertex::new(point(*vertex)));
                    }
                    polyline.set_is_closed(*closed);
                    (EntityType::Polyline(polyline), layer, color)
                }
                Primitive::Text {
                    content,
                    at,
                    height,
                    layer,
                    color,
                } => {
                    let mut mtext = MText::default();
                    mtext.insertion_point = point(*at);
                    mtext.initial_text_height = *height;
                    mtext.text = content.clone();
                    (EntityType::MText(mtext), layer, color)
                }
            };
            let mut entity = Entity::new(specific);
            entity.common.layer = layer.name().to_owned();
            if let Some(index) = color {
                entity.common.color = Color::from_index(*index);
            }
            self.drawing.add_entity(entity);
        }
        debug!("added {} entities", primitives.len());
    }

    /// Writes the drawing as ASCII DXF.
    pub fn write<W: Write>(&self, mut out: W) -> Result<(), CadError> {
        self.drawing.save(&mut out)?;
        out.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CadError> {
        self.write(BufWriter::new(File::create(path)?))
    }
}

/// Private API.
impl Document {
    fn ensure_layer(&mut self, layer: Layer) {
        if self.drawing.layers().any(|l| l.name == layer.name()) {
            return;
        }
        let table = LayerTable {
            name: layer.name().to_owned(),
            ..Default::default()
        };
        self.drawing.add_layer(table);
    }
}

fn coord(p: &Point) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn point(c: Coord<f64>) -> Point {
    Point::new(c.x, c.y, 0.0)
}
