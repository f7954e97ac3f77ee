//! Metatile attributes: one word per metatile, 8 to 64 bits wide.
//!
//! The width is only known at run time (from the descriptor when decoding,
//! from `attributeSizeInBits` when encoding), so both directions select a
//! concrete word type with `with_word_width!` and run one generic body.

use super::{check_declared_max, ensure_not_empty};
use crate::{
    codec::{decode_records, encode_records},
    descriptor::{AttributesDescriptor, TilesetKind},
    diagnostics::{Converted, trailing_bytes},
    document::{AttributesDocument, MetatileAttributes},
    errors::Result,
    table::MaskTable,
    word::{Word, WordWidth, with_word_width},
};

pub fn decode(
    descriptor: &AttributesDescriptor,
    kind: TilesetKind,
    buffer: &[u8],
) -> Result<Converted<AttributesDocument>> {
    ensure_not_empty(buffer)?;

    with_word_width!(descriptor.width, |W| decode_as::<W>(descriptor, kind, buffer))
}

fn decode_as<W: Word>(
    descriptor: &AttributesDescriptor,
    kind: TilesetKind,
    buffer: &[u8],
) -> Result<Converted<AttributesDocument>> {
    let table = MaskTable::<W>::compile_wide(&descriptor.masks)?;
    let (records, dropped) = decode_records::<W>(buffer, &table);

    let mut converted = Converted::new(AttributesDocument {
        num_metatiles: descriptor.num_metatiles(kind),
        attribute_size_in_bits: W::BITS,
        attribute_masks: table.to_mask_map(),
        metatiles: records
            .into_iter()
            .map(|attributes| MetatileAttributes { attributes })
            .collect(),
    });
    if let Some(warning) = trailing_bytes(dropped, W::BYTES) {
        converted.warn(warning);
    }

    Ok(converted)
}

pub fn encode(document: &AttributesDocument) -> Result<Converted<Vec<u8>>> {
    let width = WordWidth::from_bits(document.attribute_size_in_bits)?;

    with_word_width!(width, |W| encode_as::<W>(document))
}

fn encode_as<W: Word>(document: &AttributesDocument) -> Result<Converted<Vec<u8>>> {
    let table = MaskTable::<W>::from_mask_map(&document.attribute_masks)?;

    let mut converted = Converted::new(Vec::new());
    if let Some(warning) = check_declared_max(
        "metatiles",
        document.num_metatiles,
        document.metatiles.len(),
    ) {
        converted.warn(warning);
    }

    let records = document.metatiles.iter().map(|metatile| &metatile.attributes);
    converted.value = encode_records(records, &table)?;

    Ok(converted)
}
