//! Error taxonomy for schema lookups, model construction and rendering.
//!
//! Problems in the XML text itself are reported by the tree parser and travel
//! as [`anyhow::Error`] with context; the variants here cover misuse of the
//! package model and failures of the layer-name lookup.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tag that is not one of the registered element types.
    #[error("unknown element type <{0}>")]
    UnknownElementType(String),

    #[error("attribute '{attribute}' is not recognized for <{element}>")]
    UnrecognizedAttribute { element: String, attribute: String },

    /// Layer identifier missing from the layer-name table.
    #[error("unresolved layer '{0}'")]
    UnresolvedLayer(String),

    #[error("<{element}> attribute '{attribute}' is not a number: '{value}'")]
    InvalidNumber {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("no <package> element found")]
    MissingPackage,
}
