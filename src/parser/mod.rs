//! Eagle package importer.
//!
//! Provides [`Importer`] to turn an XML tree holding a `<package>` into a
//! [`Package`]. Sub-modules:
//!
//! - [`repair`] – Undo false nesting of self-closing elements
//! - [`library`] – Whole `.lbr` documents with many packages and a layer table

pub mod library;
pub mod repair;

pub use library::Library;
pub use repair::repair_self_closing;

use crate::error::Error;
use crate::model::*;
use crate::schema::{ElementType, Schema};
use crate::xml::XmlElement;
use anyhow::Result;
use std::fmt;

/// Non-fatal findings of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The package did not contain exactly one `<description>`.
    MalformedDescriptionCount { count: usize },
    /// The `<package>` element had no `name` attribute, or an empty one.
    MissingName,
    /// An attribute the schema does not list for the element was ignored.
    DroppedAttribute {
        element: ElementType,
        attribute: String,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MalformedDescriptionCount { count } => write!(
                f,
                "{} <description/> elements, must be exactly one",
                count
            ),
            Anomaly::MissingName => write!(f, "package has no name"),
            Anomaly::DroppedAttribute { element, attribute } => {
                write!(f, "ignored attribute '{}' on <{}/>", attribute, element)
            }
        }
    }
}

/// Result of importing one package.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub package: Package,
    pub anomalies: Vec<Anomaly>,
}

impl ImportReport {
    pub fn description_count(&self) -> Option<usize> {
        self.anomalies.iter().find_map(|a| match a {
            Anomaly::MalformedDescriptionCount { count } => Some(*count),
            _ => None,
        })
    }
}

pub struct Importer<'a> {
    schema: &'a Schema,
}

impl<'a> Importer<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Parse XML text and import the first `<package>` in it.
    pub fn import_str(&self, text: &str) -> Result<ImportReport> {
        let root = XmlElement::parse(text)?;
        let package = root
            .find_self_or_descendant("package")
            .ok_or(Error::MissingPackage)?;
        Ok(self.import(package))
    }

    /// Import a `<package>` element.
    ///
    /// Never fails: unexpected content is reported in
    /// [`ImportReport::anomalies`] and logged.
    pub fn import(&self, node: &XmlElement) -> ImportReport {
        let mut anomalies = Vec::new();

        let name = node.attribute("name").unwrap_or_default();
        log::info!("Importing package: \"{}\"", name);
        if name.is_empty() {
            log::warn!("Package has no name");
            anomalies.push(Anomaly::MissingName);
        }
        let mut package = Package::new(name);

        let node = repair_self_closing(node.clone());

        let descriptions: Vec<&XmlElement> = node.find_all("description").collect();
        if descriptions.len() != 1 {
            log::warn!(
                "Package \"{}\": {} <description/> elements, must be exactly one",
                package.name,
                descriptions.len()
            );
            anomalies.push(Anomaly::MalformedDescriptionCount {
                count: descriptions.len(),
            });
        }
        if let Some(description) = descriptions.first() {
            package.description = description.text_content();
        }

        for kind in self.schema.element_types() {
            let mut count = 0usize;
            for element in node.find_all(kind.tag()) {
                package.add_element(self.read_record(kind, element, &mut anomalies));
                count += 1;
            }
            log::debug!("{} elements of type <{}/>", count, kind);
        }

        ImportReport { package, anomalies }
    }

    fn read_record(
        &self,
        kind: ElementType,
        element: &XmlElement,
        anomalies: &mut Vec<Anomaly>,
    ) -> ElementRecord {
        let mut record = ElementRecord::new(kind);
        for name in self.schema.attributes_for(kind) {
            if let Some(value) = element.attribute(name) {
                record = record.with_attribute(*name, value);
            }
        }
        for name in element.attributes.keys() {
            if !self.schema.recognizes(kind, name) {
                log::debug!("Ignoring attribute '{}' on <{}/>", name, kind);
                anomalies.push(Anomaly::DroppedAttribute {
                    element: kind,
                    attribute: name.clone(),
                });
            }
        }

        match kind {
            ElementType::Text => record.with_text(element.text_content()),
            ElementType::Polygon => element
                .child_elements()
                .filter(|c| c.has_tag("vertex"))
                .fold(record, |record, vertex| {
                    record.with_vertex(
                        vertex.attribute("x").unwrap_or_default(),
                        vertex.attribute("y").unwrap_or_default(),
                    )
                }),
            _ => record,
        }
    }
}
