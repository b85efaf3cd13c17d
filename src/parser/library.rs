//! Eagle library documents (`*.lbr`).
//!
//! A library holds any number of `<package>` elements plus the `<layers>`
//! table of the drawing. Packages are independent, so they are imported in
//! parallel.

use super::{ImportReport, Importer};
use crate::layers::LayerTable;
use crate::xml::XmlElement;
use anyhow::Result;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    /// `name` attribute of `<library>`, if any.
    pub name: Option<String>,
    /// One report per `<package>`, in document order.
    pub packages: Vec<ImportReport>,
    /// Layer table of the document, if it has a `<layers>` section.
    pub layers: Option<LayerTable>,
}

impl Library {
    pub fn package(&self, name: &str) -> Option<&ImportReport> {
        self.packages.iter().find(|r| r.package.name == name)
    }
}

impl Importer<'_> {
    /// Parse a library document and import every package in it.
    pub fn import_library_str(&self, text: &str) -> Result<Library> {
        let root = XmlElement::parse(text)?;
        Ok(self.import_library(&root))
    }

    /// Import every `<package>` found below `root` (or `root` itself).
    pub fn import_library(&self, root: &XmlElement) -> Library {
        let nodes: Vec<&XmlElement> = if root.has_tag("package") {
            vec![root]
        } else {
            root.find_all("package").collect()
        };
        log::info!("{} package(s) found in document", nodes.len());
        let packages: Vec<ImportReport> = nodes.par_iter().map(|node| self.import(node)).collect();

        let name = root
            .find_self_or_descendant("library")
            .and_then(|l| l.attribute("name"))
            .map(str::to_string);
        let layers = root.find_self_or_descendant("layers").map(LayerTable::from_xml);

        Library {
            name,
            packages,
            layers,
        }
    }
}
