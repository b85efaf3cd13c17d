//! Generate Eagle package XML from a [`Package`] model.
//!
//! The package is first built as an [`XmlElement`] tree and then written in
//! one pass. Every tag is followed by a line break when the next token is a
//! tag too, and elements without content are written self-closing unless
//! that is turned off.

use crate::model::*;
use crate::schema::Schema;
use crate::xml::{WriteOptions, XmlElement};
use anyhow::Result;

pub struct Exporter<'a> {
    schema: &'a Schema,
    self_closing: bool,
}

impl<'a> Exporter<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            self_closing: true,
        }
    }

    /// Write empty elements as `<tag></tag>` when `false`.
    pub fn self_closing(mut self, enabled: bool) -> Self {
        self.self_closing = enabled;
        self
    }

    /// Build the `<package>` tree: `<description>` first, then the records of
    /// each type in registry order.
    pub fn to_tree(&self, package: &Package) -> XmlElement {
        if package.name.is_empty() {
            log::warn!("Package has no name");
        }
        let mut root = XmlElement::new("package").with_attribute("name", package.name.as_str());

        // Written even when empty.
        root.push(XmlElement::new("description").with_text(package.description.as_str()));

        for kind in self.schema.element_types() {
            for record in package.elements(kind) {
                root.push(record_to_xml(record));
            }
        }
        root
    }

    /// Export the package as XML text.
    pub fn export(&self, package: &Package) -> Result<String> {
        self.to_tree(package).to_xml(WriteOptions {
            self_closing: self.self_closing,
            newlines: true,
        })
    }
}

fn record_to_xml(record: &ElementRecord) -> XmlElement {
    let mut element = XmlElement::new(record.kind().tag());
    for (name, value) in record.attributes() {
        element = element.with_attribute(name.as_str(), value.as_str());
    }
    match record.body() {
        ElementBody::Empty => element,
        ElementBody::Text(text) => element.with_text(text.as_str()),
        ElementBody::Vertices(vertices) => vertices.iter().fold(element, |element, v| {
            element.with_child(
                XmlElement::new("vertex")
                    .with_attribute("x", v.x.as_str())
                    .with_attribute("y", v.y.as_str()),
            )
        }),
    }
}
