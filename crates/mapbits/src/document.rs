//! JSON documents for the three domains.
//!
//! Keys are camelCase and appear in the order declared here. Masks are hex
//! strings, and records keep the order of their table's fields.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    record::{FieldRecord, MaskMap},
};

/// `map.bin` / `border.bin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapGridDocument {
    /// Word width of the grid. Always 16.
    pub mapgrid_size_in_bits: u32,
    pub mapgrid_masks: MaskMap,
    /// One record per map cell.
    pub mapgrid: Vec<FieldRecord>,
}

/// `metatiles.bin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetatilesDocument {
    pub num_metatiles: usize,
    pub num_tiles: usize,
    pub num_pals: usize,
    pub num_tiles_in_metatile: usize,
    pub tiles_masks: MaskMap,
    pub metatiles: Vec<Metatile>,
}

/// One group of tile records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metatile {
    pub tiles: Vec<FieldRecord>,
}

/// `metatile_attributes.bin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributesDocument {
    pub num_metatiles: usize,
    /// Word width of each attribute record: 8, 16, 32 or 64.
    pub attribute_size_in_bits: u32,
    pub attribute_masks: MaskMap,
    pub metatiles: Vec<MetatileAttributes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetatileAttributes {
    pub attributes: FieldRecord,
}

/// Parses a document, reporting missing keys and wrong value types as
/// [`Error::MalformedDocument`].
pub fn from_json<'a, T: Deserialize<'a>>(text: &'a str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::malformed(e.to_string()))
}

/// Renders a document as JSON with two-space indentation.
pub fn to_json<T: Serialize>(document: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
