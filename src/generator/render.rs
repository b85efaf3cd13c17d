//! Draw a [`Package`] as SVG.
//!
//! Each element type maps to one SVG primitive. Coordinates are copied as
//! they appear in the package (millimeters); the content group scales them
//! up onto a fixed 200×200 canvas with the origin in its center.

use crate::error::{Error, Result};
use crate::layers::LayerTable;
use crate::model::*;
use crate::schema::{ElementType, Schema};
use svg::Document;
use svg::node::element::{Circle, Group, Line, Path, Rectangle, Text};

pub const CANVAS_SIZE: u32 = 200;
pub const CONTENT_TRANSFORM: &str = "translate(100,100) scale(10)";

/// SVG text plus the elements that could not be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub svg: String,
    pub errors: Vec<Error>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct SvgRenderer<'a> {
    schema: &'a Schema,
    layers: &'a LayerTable,
}

impl<'a> SvgRenderer<'a> {
    pub fn new(schema: &'a Schema, layers: &'a LayerTable) -> Self {
        Self { schema, layers }
    }

    /// Render the package to SVG text.
    ///
    /// Elements whose layer is not in the layer table, or whose geometry
    /// attribute is not a number, are left out of the drawing and reported
    /// in [`RenderReport::errors`].
    pub fn render(&self, package: &Package) -> RenderReport {
        let (document, errors) = self.document(package);
        RenderReport {
            svg: document.to_string(),
            errors,
        }
    }

    pub fn document(&self, package: &Package) -> (Document, Vec<Error>) {
        let mut group = Group::new().set("transform", CONTENT_TRANSFORM);
        let mut errors = Vec::new();
        // Registry order, then document order: later elements paint over earlier ones.
        for kind in self.schema.element_types() {
            for record in package.elements(kind) {
                match self.draw(record) {
                    Ok(Some(node)) => group = group.add(node),
                    Ok(None) => {}
                    Err(err) => {
                        log::warn!("Package \"{}\": skipping <{}/>: {}", package.name, kind, err);
                        errors.push(err);
                    }
                }
            }
        }
        let document = Document::new()
            .set("width", CANVAS_SIZE)
            .set("height", CANVAS_SIZE)
            .add(group);
        (document, errors)
    }

    fn draw(&self, record: &ElementRecord) -> Result<Option<Box<dyn svg::Node>>> {
        let node: Box<dyn svg::Node> = match record.kind() {
            ElementType::Polygon => {
                let Some(d) = polygon_path(record.vertices()) else {
                    return Ok(None);
                };
                let mut path = Path::new().set("class", "polygon").set("d", d);
                if let Some(layer) = record.attribute("layer") {
                    path = path.set("layer", self.layers.lookup(layer)?);
                }
                path.into()
            }
            ElementType::Wire => Line::new()
                .set("class", "wire")
                .set("layer", self.layer(record)?)
                .set("x1", attr(record, "x1"))
                .set("y1", attr(record, "y1"))
                .set("x2", attr(record, "x2"))
                .set("y2", attr(record, "y2"))
                .set("stroke-width", attr(record, "width"))
                .into(),
            ElementType::Text => Text::new(record.text().unwrap_or_default())
                .set("layer", self.layer(record)?)
                .set("x", attr(record, "x"))
                .set("y", attr(record, "y"))
                .set("font-size", attr(record, "size"))
                .into(),
            // Full stroke width is added to the radius.
            ElementType::Circle => Circle::new()
                .set("class", "circle")
                .set("layer", self.layer(record)?)
                .set("cx", attr(record, "x"))
                .set("cy", attr(record, "y"))
                .set("r", number(record, "radius")? + number(record, "width")?)
                .into(),
            ElementType::Rectangle => Rectangle::new()
                .set("class", "rectangle")
                .set("layer", self.layer(record)?)
                .set("x", attr(record, "x1"))
                .set("y", attr(record, "y1"))
                .set("width", number(record, "x2")? - number(record, "x1")?)
                .set("height", number(record, "y2")? - number(record, "y1")?)
                .into(),
            ElementType::Hole => Circle::new()
                .set("class", "hole")
                .set("cx", attr(record, "x"))
                .set("cy", attr(record, "y"))
                .set("r", number(record, "drill")? / 2.0)
                .into(),
            ElementType::Smd => Rectangle::new()
                .set("class", "smd")
                .set("id", attr(record, "name"))
                .set("layer", self.layer(record)?)
                .set("x", number(record, "x")? - number(record, "dx")? / 2.0)
                .set("y", number(record, "y")? - number(record, "dy")? / 2.0)
                .set("width", attr(record, "dx"))
                .set("height", attr(record, "dy"))
                .into(),
            ElementType::Dimension | ElementType::Frame | ElementType::Pad => return Ok(None),
        };
        Ok(Some(node))
    }

    fn layer(&self, record: &ElementRecord) -> Result<&str> {
        self.layers.lookup(attr(record, "layer"))
    }
}

/// `M x,y L x,y … Z` through the vertices, or `None` without vertices.
fn polygon_path(vertices: &[Vertex]) -> Option<String> {
    if vertices.is_empty() {
        return None;
    }
    let mut d = String::new();
    for (i, v) in vertices.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&v.x);
        d.push(',');
        d.push_str(&v.y);
    }
    d.push('Z');
    Some(d)
}

fn attr<'r>(record: &'r ElementRecord, name: &str) -> &'r str {
    record.attribute(name).unwrap_or_default()
}

fn number(record: &ElementRecord, name: &str) -> Result<f64> {
    let value = attr(record, name);
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        element: record.kind().tag().to_string(),
        attribute: name.to_string(),
        value: value.to_string(),
    })
}
