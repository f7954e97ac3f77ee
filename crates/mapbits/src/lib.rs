//! # mapbits
//!
//! Converts packed map-data binaries to JSON documents and back.
//!
//! Each binary is a run of fixed-width little-endian words. A mask table names
//! the bit fields inside one word; decoding splits every word into a record of
//! field values and encoding packs records back into words. Three domains are
//! supported: map grids, metatiles (fixed-size groups of tile words) and
//! metatile attributes (one word of 8 to 64 bits per metatile).
//!
//! ## Example
//!
//! ```
//! use mapbits::field::MaskField;
//! use mapbits::table::MaskTable;
//! use mapbits::codec::{decode_word, encode_word};
//!
//! let table = MaskTable::compile(&[
//!     MaskField::new("a", 0x00FFu16),
//!     MaskField::new("b", 0xFF00),
//! ])
//! .unwrap();
//!
//! let record = decode_word(0x1234u16, &table);
//! assert_eq!(record.get("a"), Some(&0x34));
//! assert_eq!(record.get("b"), Some(&0x12));
//! assert_eq!(encode_word(&record, &table, 0).unwrap(), 0x1234);
//! ```
//!
//! Whole files go through [`pipeline`] on in-memory buffers, or through
//! [`batch`] when reading and writing sibling files on disk.

pub mod batch;
pub mod bits;
pub mod codec;
pub mod compiled;
pub mod descriptor;
pub mod diagnostics;
pub mod document;
pub mod errors;
pub mod field;
pub mod pipeline;
pub mod record;
pub mod table;
pub mod word;

pub use descriptor::{Domain, FormatDescriptors, TilesetKind, Version};
pub use diagnostics::{Converted, Warning};
pub use errors::{Error, Result};
pub use record::FieldRecord;
