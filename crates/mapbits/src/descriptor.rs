//! Per-version format descriptors: field masks, word widths and header counts.
//!
//! The `rse` and `frlg` tables are compiled in. A `custom` set is read from a
//! JSON file shaped like [`FormatDescriptorsDef`]:
//!
//! ```json
//! {
//!   "mapgrid": { "masks": { "metatileId": "0x03FF", "collision": "0x0C00", "elevation": "0xF000" } },
//!   "metatiles": {
//!     "primary": { "metatiles": 512, "tiles": 512, "palettes": 6 },
//!     "secondary": { "metatiles": 512, "tiles": 512, "palettes": 7 },
//!     "tilesPerMetatile": 12,
//!     "masks": { "tileId": "0x03FF", "xflip": "0x0400", "yflip": "0x0800", "palette": "0xF000" }
//!   },
//!   "attributes": {
//!     "primaryMetatiles": 512,
//!     "secondaryMetatiles": 512,
//!     "sizeInBits": 16,
//!     "masks": { "behavior": "0x00FF", "layerType": "0xF000" }
//!   }
//! }
//! ```

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    bits::parse_mask,
    errors::{Error, Result},
    field::MaskField,
    record::MaskMap,
    table::MaskTable,
    word::{Word, WordWidth, with_word_width},
};

/// Which game's layout to use when decoding binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    RubySapphireEmerald,
    FireRedLeafGreen,
    /// Layout supplied by a descriptor file.
    Custom,
}

impl Version {
    pub const fn name(self) -> &'static str {
        match self {
            Version::RubySapphireEmerald => "rse",
            Version::FireRedLeafGreen => "frlg",
            Version::Custom => "custom",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of data held by a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// `layouts/*/map.bin` and `border.bin`: one word per map cell.
    Mapgrid,
    /// `tilesets/*/*/metatiles.bin`: fixed-size groups of tile words.
    Metatiles,
    /// `tilesets/*/*/metatile_attributes.bin`: one attribute word per metatile.
    MetatileAttributes,
}

impl Domain {
    pub const fn name(self) -> &'static str {
        match self {
            Domain::Mapgrid => "mapgrid",
            Domain::Metatiles => "metatiles",
            Domain::MetatileAttributes => "metatile_attributes",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primary or secondary tileset; selects which header counts apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilesetKind {
    Primary,
    Secondary,
}

impl TilesetKind {
    /// A path names a secondary tileset if any of its components mentions
    /// `secondary`, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let secondary = path.components().any(|component| {
            component
                .as_os_str()
                .to_string_lossy()
                .to_ascii_lowercase()
                .contains("secondary")
        });

        if secondary {
            TilesetKind::Secondary
        } else {
            TilesetKind::Primary
        }
    }
}

/// Header counts for one tileset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetCounts {
    pub metatiles: usize,
    pub tiles: usize,
    pub palettes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGridDescriptor {
    pub masks: Cow<'static, [MaskField<u16>]>,
}

impl MapGridDescriptor {
    pub fn table(&self) -> Result<MaskTable<u16>> {
        MaskTable::compile(&self.masks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetatilesDescriptor {
    pub primary: TilesetCounts,
    pub secondary: TilesetCounts,
    pub tiles_per_metatile: usize,
    pub masks: Cow<'static, [MaskField<u16>]>,
}

impl MetatilesDescriptor {
    pub fn counts(&self, kind: TilesetKind) -> TilesetCounts {
        match kind {
            TilesetKind::Primary => self.primary,
            TilesetKind::Secondary => self.secondary,
        }
    }

    pub fn table(&self) -> Result<MaskTable<u16>> {
        MaskTable::compile(&self.masks)
    }
}

/// Attribute layout. The word width varies by version, so masks are kept
/// as `u64` and narrowed to `width` when a table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributesDescriptor {
    pub primary_metatiles: usize,
    pub secondary_metatiles: usize,
    pub width: WordWidth,
    pub masks: Cow<'static, [MaskField<u64>]>,
}

impl AttributesDescriptor {
    pub fn num_metatiles(&self, kind: TilesetKind) -> usize {
        match kind {
            TilesetKind::Primary => self.primary_metatiles,
            TilesetKind::Secondary => self.secondary_metatiles,
        }
    }
}

/// Everything needed to decode the three domains for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptors {
    pub mapgrid: MapGridDescriptor,
    pub metatiles: MetatilesDescriptor,
    pub attributes: AttributesDescriptor,
}

const MAPGRID_MASKS: &[MaskField<u16>] = &[
    MaskField::new("metatileId", 0x03FF),
    MaskField::new("collision", 0x0C00),
    MaskField::new("elevation", 0xF000),
];

const TILE_MASKS: &[MaskField<u16>] = &[
    MaskField::new("tileId", 0x03FF),
    MaskField::new("xflip", 0x0400),
    MaskField::new("yflip", 0x0800),
    MaskField::new("palette", 0xF000),
];

const RSE_ATTRIBUTE_MASKS: &[MaskField<u64>] = &[
    MaskField::new("behavior", 0x00FF),
    MaskField::new("layerType", 0xF000),
];

const FRLG_ATTRIBUTE_MASKS: &[MaskField<u64>] = &[
    MaskField::new("behavior", 0x0000_01FF),
    MaskField::new("terrainType", 0x0000_3E00),
    MaskField::new("attribute2", 0x0003_C000),
    MaskField::new("attribute3", 0x00FC_0000),
    MaskField::new("encounterType", 0x0700_0000),
    MaskField::new("attribute5", 0x1800_0000),
    MaskField::new("layerType", 0x6000_0000),
    MaskField::new("attribute7", 0x8000_0000),
];

const TILES_PER_METATILE: usize = 8;

/// Ruby / Sapphire / Emerald.
pub static RSE: FormatDescriptors = FormatDescriptors {
    mapgrid: MapGridDescriptor {
        masks: Cow::Borrowed(MAPGRID_MASKS),
    },
    metatiles: MetatilesDescriptor {
        primary: TilesetCounts {
            metatiles: 512,
            tiles: 512,
            palettes: 6,
        },
        secondary: TilesetCounts {
            metatiles: 512,
            tiles: 512,
            palettes: 7,
        },
        tiles_per_metatile: TILES_PER_METATILE,
        masks: Cow::Borrowed(TILE_MASKS),
    },
    attributes: AttributesDescriptor {
        primary_metatiles: 512,
        secondary_metatiles: 512,
        width: WordWidth::W16,
        masks: Cow::Borrowed(RSE_ATTRIBUTE_MASKS),
    },
};

/// FireRed / LeafGreen.
pub static FRLG: FormatDescriptors = FormatDescriptors {
    mapgrid: MapGridDescriptor {
        masks: Cow::Borrowed(MAPGRID_MASKS),
    },
    metatiles: MetatilesDescriptor {
        primary: TilesetCounts {
            metatiles: 640,
            tiles: 640,
            palettes: 7,
        },
        secondary: TilesetCounts {
            metatiles: 384,
            tiles: 384,
            palettes: 6,
        },
        tiles_per_metatile: TILES_PER_METATILE,
        masks: Cow::Borrowed(TILE_MASKS),
    },
    attributes: AttributesDescriptor {
        primary_metatiles: 640,
        secondary_metatiles: 384,
        width: WordWidth::W32,
        masks: Cow::Borrowed(FRLG_ATTRIBUTE_MASKS),
    },
};

impl FormatDescriptors {
    /// Compiled-in descriptors, or `None` for [`Version::Custom`].
    pub fn builtin(version: Version) -> Option<&'static FormatDescriptors> {
        match version {
            Version::RubySapphireEmerald => Some(&RSE),
            Version::FireRedLeafGreen => Some(&FRLG),
            Version::Custom => None,
        }
    }

    /// Checks that every table compiles: non-empty unique names, non-zero
    /// masks that do not overlap and fit their word width.
    pub fn validate(&self) -> Result<()> {
        self.mapgrid.table()?;
        self.metatiles.table()?;
        if self.metatiles.tiles_per_metatile == 0 {
            return Err(Error::malformed("tilesPerMetatile must be at least 1"));
        }
        with_word_width!(self.attributes.width, |W| {
            MaskTable::<W>::compile_wide(&self.attributes.masks).map(|_| ())
        })?;

        Ok(())
    }

    /// Parses and validates a descriptor file's contents.
    pub fn from_json(text: &str) -> Result<Self> {
        let def: FormatDescriptorsDef =
            serde_json::from_str(text).map_err(|e| Error::malformed(e.to_string()))?;
        let descriptors = FormatDescriptors::try_from(def)?;
        descriptors.validate()?;

        Ok(descriptors)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let descriptors = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded custom format descriptors");

        Ok(descriptors)
    }
}

/// JSON shape of a custom descriptor file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatDescriptorsDef {
    pub mapgrid: MapGridDef,
    pub metatiles: MetatilesDef,
    pub attributes: AttributesDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapGridDef {
    pub masks: MaskMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetatilesDef {
    pub primary: TilesetCounts,
    pub secondary: TilesetCounts,
    pub tiles_per_metatile: usize,
    pub masks: MaskMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttributesDef {
    pub primary_metatiles: usize,
    pub secondary_metatiles: usize,
    pub size_in_bits: u32,
    pub masks: MaskMap,
}

fn parse_masks<W: Word>(masks: &MaskMap) -> Result<Vec<MaskField<W>>> {
    masks
        .iter()
        .map(|(name, hex)| Ok(MaskField::owned(name, parse_mask::<W>(hex)?)))
        .collect()
}

impl TryFrom<FormatDescriptorsDef> for FormatDescriptors {
    type Error = Error;

    fn try_from(def: FormatDescriptorsDef) -> Result<Self> {
        Ok(FormatDescriptors {
            mapgrid: MapGridDescriptor {
                masks: Cow::Owned(parse_masks::<u16>(&def.mapgrid.masks)?),
            },
            metatiles: MetatilesDescriptor {
                primary: def.metatiles.primary,
                secondary: def.metatiles.secondary,
                tiles_per_metatile: def.metatiles.tiles_per_metatile,
                masks: Cow::Owned(parse_masks::<u16>(&def.metatiles.masks)?),
            },
            attributes: AttributesDescriptor {
                primary_metatiles: def.attributes.primary_metatiles,
                secondary_metatiles: def.attributes.secondary_metatiles,
                width: WordWidth::from_bits(def.attributes.size_in_bits)?,
                masks: Cow::Owned(parse_masks::<u64>(&def.attributes.masks)?),
            },
        })
    }
}
