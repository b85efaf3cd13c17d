use crate::error::{Error, Result};
use crate::schema::{ElementType, Schema};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Package
// ────────────────────────────────────────────────────────────────────────────

/// One Eagle package (footprint): name, description and the elements it is
/// drawn from.
///
/// Records are grouped per [`ElementType`]. Every type of the registry has an
/// entry, possibly empty. Order is preserved within one type only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub description: String,
    elements: IndexMap<ElementType, Vec<ElementRecord>>,
}

impl Default for Package {
    fn default() -> Self {
        Self::new("")
    }
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            elements: ElementType::ALL
                .into_iter()
                .map(|kind| (kind, Vec::new()))
                .collect(),
        }
    }

    /// Records of one type, in document order.
    pub fn elements(&self, kind: ElementType) -> &[ElementRecord] {
        self.elements.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All record lists in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementType, &[ElementRecord])> {
        ElementType::ALL
            .into_iter()
            .map(move |kind| (kind, self.elements(kind)))
    }

    /// Total number of records over all types.
    pub fn len(&self) -> usize {
        self.elements.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record to the list of its type.
    pub fn add_element(&mut self, record: ElementRecord) {
        self.elements.entry(record.kind).or_default().push(record);
    }

    /// Append a record given by tag name and attribute map.
    ///
    /// The attributes are trusted and not checked against the schema; use
    /// [`ElementRecord::validated`] for checked construction.
    pub fn add_element_tag<I, K, V>(&mut self, tag: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let kind: ElementType = tag.parse()?;
        let mut record = ElementRecord::new(kind);
        for (name, value) in attributes {
            record.attributes.insert(name.into(), value.into());
        }
        self.add_element(record);
        Ok(())
    }

    pub fn add_hole(
        &mut self,
        x: impl Into<String>,
        y: impl Into<String>,
        drill: impl Into<String>,
    ) {
        self.add_element(
            ElementRecord::new(ElementType::Hole)
                .with_attribute("x", x)
                .with_attribute("y", y)
                .with_attribute("drill", drill),
        );
    }

    pub fn add_pad(
        &mut self,
        name: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        drill: impl Into<String>,
        shape: impl Into<String>,
    ) {
        self.add_element(
            ElementRecord::new(ElementType::Pad)
                .with_attribute("name", name)
                .with_attribute("x", x)
                .with_attribute("y", y)
                .with_attribute("drill", drill)
                .with_attribute("shape", shape),
        );
    }

    /// Add a surface mount pad centered at (`x`, `y`) of size `dx` × `dy`.
    pub fn add_smd(
        &mut self,
        name: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        dx: impl Into<String>,
        dy: impl Into<String>,
        layer: impl Into<String>,
    ) {
        self.add_element(
            ElementRecord::new(ElementType::Smd)
                .with_attribute("name", name)
                .with_attribute("x", x)
                .with_attribute("y", y)
                .with_attribute("dx", dx)
                .with_attribute("dy", dy)
                .with_attribute("layer", layer),
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ElementRecord
// ────────────────────────────────────────────────────────────────────────────

/// One instance of an [`ElementType`].
///
/// `attributes` keeps insertion order so exported XML lists attributes the
/// way they were imported or added. Equality ignores that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    kind: ElementType,
    attributes: IndexMap<String, String>,
    #[serde(default)]
    body: ElementBody,
}

/// Structured content beyond the attribute map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementBody {
    #[default]
    Empty,
    /// Character content of a `<text>` element.
    Text(String),
    /// Boundary of a `<polygon>`, in order.
    Vertices(Vec<Vertex>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: String,
    pub y: String,
}

impl Vertex {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl ElementRecord {
    /// Empty record. `text` records start with empty content and `polygon`
    /// records with no vertices.
    pub fn new(kind: ElementType) -> Self {
        let body = match kind {
            ElementType::Text => ElementBody::Text(String::new()),
            ElementType::Polygon => ElementBody::Vertices(Vec::new()),
            _ => ElementBody::Empty,
        };
        Self {
            kind,
            attributes: IndexMap::new(),
            body,
        }
    }

    /// Build a record, rejecting attributes the schema does not list for `kind`.
    pub fn validated<I, K, V>(schema: &Schema, kind: ElementType, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new(kind);
        for (name, value) in attributes {
            let name = name.into();
            if !schema.recognizes(kind, &name) {
                return Err(Error::UnrecognizedAttribute {
                    element: kind.tag().to_string(),
                    attribute: name,
                });
            }
            record.attributes.insert(name, value.into());
        }
        Ok(record)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the character content. No effect unless this is a `text` record.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        if let ElementBody::Text(content) = &mut self.body {
            *content = text.into();
        }
        self
    }

    /// Append a vertex. No effect unless this is a `polygon` record.
    pub fn with_vertex(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        if let ElementBody::Vertices(vertices) = &mut self.body {
            vertices.push(Vertex::new(x, y));
        }
        self
    }

    pub fn kind(&self) -> ElementType {
        self.kind
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &ElementBody {
        &self.body
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ElementBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        match &self.body {
            ElementBody::Vertices(vertices) => vertices,
            _ => &[],
        }
    }
}
