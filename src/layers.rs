//! Layer number → layer name table used to label rendered elements.

use crate::error::{Error, Result};
use crate::xml::XmlElement;
use anyhow::Context;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default Eagle layer names.
const EAGLE_LAYERS: &[(u32, &str)] = &[
    (1, "Top"),
    (2, "Route2"),
    (3, "Route3"),
    (4, "Route4"),
    (5, "Route5"),
    (6, "Route6"),
    (7, "Route7"),
    (8, "Route8"),
    (9, "Route9"),
    (10, "Route10"),
    (11, "Route11"),
    (12, "Route12"),
    (13, "Route13"),
    (14, "Route14"),
    (15, "Route15"),
    (16, "Bottom"),
    (17, "Pads"),
    (18, "Vias"),
    (19, "Unrouted"),
    (20, "Dimension"),
    (21, "tPlace"),
    (22, "bPlace"),
    (23, "tOrigins"),
    (24, "bOrigins"),
    (25, "tNames"),
    (26, "bNames"),
    (27, "tValues"),
    (28, "bValues"),
    (29, "tStop"),
    (30, "bStop"),
    (31, "tCream"),
    (32, "bCream"),
    (33, "tFinish"),
    (34, "bFinish"),
    (35, "tGlue"),
    (36, "bGlue"),
    (37, "tTest"),
    (38, "bTest"),
    (39, "tKeepout"),
    (40, "bKeepout"),
    (41, "tRestrict"),
    (42, "bRestrict"),
    (43, "vRestrict"),
    (44, "Drills"),
    (45, "Holes"),
    (46, "Milling"),
    (47, "Measures"),
    (48, "Document"),
    (49, "Reference"),
    (51, "tDocu"),
    (52, "bDocu"),
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerTable {
    names: BTreeMap<u32, String>,
}

impl LayerTable {
    /// Standard Eagle layers 1–52.
    pub fn eagle() -> Self {
        Self {
            names: EAGLE_LAYERS
                .iter()
                .map(|(number, name)| (*number, name.to_string()))
                .collect(),
        }
    }

    pub fn insert(&mut self, number: u32, name: impl Into<String>) {
        self.names.insert(number, name.into());
    }

    /// Entries of `other` replace entries with the same number.
    pub fn merge(&mut self, other: LayerTable) {
        self.names.extend(other.names);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a layer identifier as found in a `layer="…"` attribute.
    pub fn lookup(&self, id: &str) -> Result<&str> {
        id.trim()
            .parse::<u32>()
            .ok()
            .and_then(|number| self.names.get(&number))
            .map(String::as_str)
            .ok_or_else(|| Error::UnresolvedLayer(id.to_string()))
    }

    /// Read `<layer number="…" name="…"/>` entries below `layers`.
    ///
    /// Entries without a numeric `number` or without `name` are skipped.
    pub fn from_xml(layers: &XmlElement) -> Self {
        let mut table = Self::default();
        for layer in layers.find_all("layer") {
            let number = layer.attribute("number").and_then(|n| n.trim().parse().ok());
            match (number, layer.attribute("name")) {
                (Some(number), Some(name)) => table.insert(number, name),
                _ => log::debug!("Skipping layer without number or name: {:?}", layer.attributes),
            }
        }
        table
    }

    /// Load a JSON object mapping layer numbers to names, e.g. `{"1": "Top"}`.
    pub fn from_json_file(path: &Utf8Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON {}", path))
    }
}
