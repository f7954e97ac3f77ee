//! Mask table: compiled, ordered set of field masks over one word width.

use crate::{
    bits::{format_mask, masks_overlap, parse_mask},
    compiled::CompiledMask,
    errors::{Error, Result},
    field::MaskField,
    record::MaskMap,
    word::Word,
};

/// An ordered list of [`CompiledMask`]s over `W`-bit words.
///
/// Build one with [`MaskTable::compile`]; decoding and encoding live in
/// [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskTable<W> {
    /// Compiled masks in definition order.
    pub fields: Vec<CompiledMask<W>>,
}

impl<W: Word> MaskTable<W> {
    /// Compiles `fields` into a table. Fails on an empty or duplicate name,
    /// a zero mask, or two masks that share a bit.
    pub fn compile(fields: &[MaskField<W>]) -> Result<Self> {
        let mut compiled: Vec<CompiledMask<W>> = Vec::with_capacity(fields.len());

        for field in fields {
            let mask = CompiledMask::try_from(field)?;

            if let Some(existing) = compiled.iter().find(|f| f.name == mask.name) {
                return Err(Error::malformed(format!(
                    "duplicate field `{}`",
                    existing.name
                )));
            }
            if let Some(existing) = compiled.iter().find(|f| masks_overlap(f.mask, mask.mask)) {
                return Err(Error::malformed(format!(
                    "masks of `{}` ({}) and `{}` ({}) overlap",
                    existing.name,
                    format_mask(existing.mask),
                    mask.name,
                    format_mask(mask.mask)
                )));
            }

            compiled.push(mask);
        }

        Ok(Self { fields: compiled })
    }

    /// Compiles a table from masks stored as `u64`, narrowing each to `W`.
    pub fn compile_wide(fields: &[MaskField<u64>]) -> Result<Self> {
        let narrowed = fields
            .iter()
            .map(|field| {
                field.narrow::<W>().ok_or_else(|| {
                    Error::malformed(format!(
                        "mask 0x{:X} of `{}` does not fit in a {}-bit word",
                        field.mask,
                        field.name,
                        W::BITS
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::compile(&narrowed)
    }

    /// Parses the hex masks of a document header.
    pub fn from_mask_map(masks: &MaskMap) -> Result<Self> {
        let fields = masks
            .iter()
            .map(|(name, hex)| Ok(MaskField::owned(name, parse_mask::<W>(hex)?)))
            .collect::<Result<Vec<_>>>()?;

        Self::compile(&fields)
    }

    /// Renders the table as document header masks.
    pub fn to_mask_map(&self) -> MaskMap {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), format_mask(f.mask)))
            .collect()
    }

    /// Union of all masks. Bits outside it are never decoded.
    pub fn covered_bits(&self) -> W {
        self.fields
            .iter()
            .fold(W::default(), |acc, f| acc | f.mask)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
