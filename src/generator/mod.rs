//! Output generators for a parsed [`Package`](crate::model::Package).
//!
//! - [`package_xml`] – Regenerate Eagle package XML.
//! - [`render`] – Draw the package as an SVG document.

pub mod package_xml;
pub mod render;

pub use package_xml::Exporter;
pub use render::{RenderReport, SvgRenderer};
