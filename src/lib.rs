//! Eagle PCB package model.
//!
//! This crate imports `<package>` elements from Eagle package and library
//! files into a [`model::Package`], and writes them back out as Eagle XML or
//! draws them as SVG.
//!
//! The binary `eaglepac` converts package files from the command line.

pub mod error;
pub mod generator;
pub mod layers;
pub mod model;
pub mod parser;
pub mod schema;
pub mod xml;

pub use error::{Error, Result};
pub use generator::{Exporter, RenderReport, SvgRenderer};
pub use layers::LayerTable;
pub use model::{ElementBody, ElementRecord, Package, Vertex};
pub use parser::{Anomaly, ImportReport, Importer, Library};
pub use schema::{ElementType, Schema};
