use std::borrow::Cow;

use crate::{
    bits::{bit_offset, field_width},
    errors::Error,
    field::MaskField,
    word::Word,
};

/// A [`MaskField`] with its shift and width precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMask<W> {
    pub name: Cow<'static, str>,
    pub mask: W,
    /// Offset of the lowest mask bit.
    pub shift: u32,
    /// Number of mask bits.
    pub width: u32,
}

impl<W: Word> TryFrom<&MaskField<W>> for CompiledMask<W> {
    type Error = Error;

    fn try_from(field: &MaskField<W>) -> Result<Self, Self::Error> {
        if field.name.trim().is_empty() {
            return Err(Error::malformed("field name is empty"));
        }
        if field.mask.is_zero() {
            return Err(Error::malformed(format!(
                "mask for field `{}` is zero",
                field.name
            )));
        }

        Ok(CompiledMask {
            name: field.name.clone(),
            mask: field.mask,
            shift: bit_offset(field.mask),
            width: field_width(field.mask),
        })
    }
}

impl<W: Word> CompiledMask<W> {
    /// Pulls this field's value out of `word`.
    #[inline]
    pub fn extract(&self, word: W) -> u64 {
        (word & self.mask).to_u64() >> self.shift
    }

    /// Places `value` at this field's position. Bits that do not fit in the
    /// mask are dropped, so neighbouring fields are never touched.
    #[inline]
    pub fn insert(&self, value: u64) -> W {
        // shift < W::BITS <= 64, so this never overflows the shift amount.
        W::truncate_from(value << self.shift) & self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_mask() {
        let field = MaskField::new("palette", 0xF000u16);
        let compiled = CompiledMask::try_from(&field).unwrap();
        assert_eq!(compiled.shift, 12);
        assert_eq!(compiled.width, 4);
        assert_eq!(compiled.name, "palette");
        assert_eq!(compiled.extract(0xFFFF), 0xF);
    }

    #[test]
    fn test_compile_zero_mask() {
        let field = MaskField::new("unused", 0u16);
        assert!(matches!(
            CompiledMask::try_from(&field),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_compile_empty_name() {
        let field = MaskField::new(" ", 0x1u8);
        assert!(matches!(
            CompiledMask::try_from(&field),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_extract() {
        let compiled = CompiledMask::try_from(&MaskField::new("collision", 0x0C00u16)).unwrap();
        assert_eq!(compiled.extract(0b0000_1100_0000_0000), 3);
        assert_eq!(compiled.extract(0b0000_0100_0000_0000), 1);
        assert_eq!(compiled.extract(0xF3FF), 0);
    }

    #[test]
    fn test_insert_truncates() {
        let compiled = CompiledMask::try_from(&MaskField::new("mid", 0x0F0u16)).unwrap();
        assert_eq!(compiled.insert(0xFF), 0x0F0);
        assert_eq!(compiled.insert(0x5), 0x050);
    }

    #[test]
    fn test_insert_top_bit_of_u64() {
        let compiled =
            CompiledMask::try_from(&MaskField::new("top", 0x8000_0000_0000_0000u64)).unwrap();
        assert_eq!(compiled.insert(1), 0x8000_0000_0000_0000);
        assert_eq!(compiled.insert(2), 0);
        assert_eq!(compiled.extract(u64::MAX), 1);
    }
}
