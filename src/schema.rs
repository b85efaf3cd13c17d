//! Registry of the element types a `<package>` may contain and the attributes
//! recognized on each of them.
//!
//! ```text
//! <!ELEMENT package (description?, (polygon | wire | text | dimension | circle
//!                    | rectangle | frame | hole | pad | smd)*)>
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the drawable or structural primitives a package is built from.
///
/// The declaration order is the registry order: export and rendering walk the
/// types in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Polygon,
    Wire,
    Text,
    Dimension,
    Circle,
    Rectangle,
    Frame,
    Hole,
    Pad,
    Smd,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Polygon,
        ElementType::Wire,
        ElementType::Text,
        ElementType::Dimension,
        ElementType::Circle,
        ElementType::Rectangle,
        ElementType::Frame,
        ElementType::Hole,
        ElementType::Pad,
        ElementType::Smd,
    ];

    /// XML tag name of this element type.
    pub fn tag(self) -> &'static str {
        match self {
            ElementType::Polygon => "polygon",
            ElementType::Wire => "wire",
            ElementType::Text => "text",
            ElementType::Dimension => "dimension",
            ElementType::Circle => "circle",
            ElementType::Rectangle => "rectangle",
            ElementType::Frame => "frame",
            ElementType::Hole => "hole",
            ElementType::Pad => "pad",
            ElementType::Smd => "smd",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ElementType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| Error::UnknownElementType(s.to_string()))
    }
}

// <polygon width="0.254" layer="1"><vertex x="0" y="0"/>...</polygon>
const POLYGON: &[&str] = &["width", "layer"];
// <wire x1="-1.4" y1="-0.8" x2="-1.4" y2="0.8" width="0.127" layer="51"/>
const WIRE: &[&str] = &["x1", "y1", "x2", "y2", "width", "layer"];
// <text x="-5.08" y="-2.54" size="1.27" layer="25" rot="R90">&gt;NAME</text>
const TEXT: &[&str] = &["x", "y", "size", "layer", "rot"];
const DIMENSION: &[&str] = &["x1", "y1", "x2", "y2", "x3", "y3", "layer"];
// <circle x="3.59" y="-0.7699" radius="0.4999" width="0.1016" layer="51"/>
const CIRCLE: &[&str] = &["x", "y", "radius", "width", "layer"];
// <rectangle x1="1" y1="47" x2="13" y2="52" layer="1"/>
const RECTANGLE: &[&str] = &["x1", "y1", "x2", "y2", "layer"];
const FRAME: &[&str] = &["x1", "y1", "x2", "y2", "columns", "rows", "layer"];
// <hole x="0" y="0" drill="3.2"/>
const HOLE: &[&str] = &["x", "y", "drill"];
// <pad name="4" x="1.25" y="2.71" drill="0.95" shape="octagon"/>
const PAD: &[&str] = &["name", "x", "y", "drill", "shape"];
// <smd name="16" x="-4.445" y="2.695" dx="0.635" dy="1.524" layer="1"/>
const SMD: &[&str] = &["name", "x", "y", "dx", "dy", "layer"];

/// Immutable schema table, built once and handed to the importer, exporter
/// and renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    attributes: [&'static [&'static str]; 10],
}

impl Default for Schema {
    fn default() -> Self {
        Self::eagle()
    }
}

impl Schema {
    /// The Eagle package schema.
    pub fn eagle() -> Self {
        Self {
            attributes: [
                POLYGON, WIRE, TEXT, DIMENSION, CIRCLE, RECTANGLE, FRAME, HOLE, PAD, SMD,
            ],
        }
    }

    /// Element types in registry order.
    pub fn element_types(&self) -> impl Iterator<Item = ElementType> {
        ElementType::ALL.into_iter()
    }

    /// Ordered list of attribute names recognized on `kind`.
    pub fn attributes_for(&self, kind: ElementType) -> &'static [&'static str] {
        self.attributes[kind.index()]
    }

    /// Like [`Schema::attributes_for`] but keyed by tag name.
    pub fn attributes_for_tag(&self, tag: &str) -> Result<&'static [&'static str]> {
        let kind: ElementType = tag.parse()?;
        Ok(self.attributes_for(kind))
    }

    pub fn recognizes(&self, kind: ElementType, attribute: &str) -> bool {
        self.attributes_for(kind).contains(&attribute)
    }
}
