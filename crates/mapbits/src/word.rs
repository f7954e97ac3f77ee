//! Fixed-width unsigned words and the runtime width tag used to pick one.
//!
//! All multi-byte words are little-endian, for every width.

use std::fmt::{Debug, UpperHex};
use std::ops::{BitAnd, BitOr};

use crate::errors::{Error, Result};

/// An unsigned integer that can carry packed fields.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. Field values are always
/// widened to `u64` once extracted, so the codec only needs masking and
/// byte conversion from the word type itself.
pub trait Word:
    Copy
    + Default
    + Eq
    + Debug
    + UpperHex
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
{
    /// Width in bits.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize;
    /// Runtime tag for this width.
    const WIDTH: WordWidth;

    fn is_zero(self) -> bool;

    fn count_ones(self) -> u32;

    fn trailing_zeros(self) -> u32;

    fn to_u64(self) -> u64;

    /// Keeps only the low [`Word::BITS`] bits of `value`.
    fn truncate_from(value: u64) -> Self;

    /// Returns `None` if `value` has bits above [`Word::BITS`].
    fn try_from_u64(value: u64) -> Option<Self>;

    /// Builds a word from exactly [`Word::BYTES`] little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Appends the little-endian bytes of `self` to `out`.
    fn extend_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_word {
    ($($ty:ty => $width:ident),*) => {
        $(
            impl Word for $ty {
                const BITS: u32 = <$ty>::BITS;
                const BYTES: usize = std::mem::size_of::<$ty>();
                const WIDTH: WordWidth = WordWidth::$width;

                #[inline]
                fn is_zero(self) -> bool {
                    self == 0
                }

                #[inline]
                fn count_ones(self) -> u32 {
                    <$ty>::count_ones(self)
                }

                #[inline]
                fn trailing_zeros(self) -> u32 {
                    <$ty>::trailing_zeros(self)
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    u64::from(self)
                }

                #[inline]
                fn truncate_from(value: u64) -> Self {
                    value as $ty
                }

                #[inline]
                fn try_from_u64(value: u64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn extend_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_word!(u8 => W8, u16 => W16, u32 => W32, u64 => W64);

/// Word widths the codec can be instantiated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordWidth {
    W8,
    W16,
    W32,
    W64,
}

impl WordWidth {
    /// Maps a declared bit width to a supported word width.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(WordWidth::W8),
            16 => Ok(WordWidth::W16),
            32 => Ok(WordWidth::W32),
            64 => Ok(WordWidth::W64),
            other => Err(Error::UnsupportedWidth(other)),
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            WordWidth::W8 => 8,
            WordWidth::W16 => 16,
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
        }
    }

    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

impl TryFrom<u32> for WordWidth {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        WordWidth::from_bits(bits)
    }
}

/// Runs `$body` with `$w` bound as a type alias for the word type matching
/// the runtime `$width`.
macro_rules! with_word_width {
    ($width:expr, |$w:ident| $body:expr) => {
        match $width {
            $crate::word::WordWidth::W8 => {
                type $w = u8;
                $body
            }
            $crate::word::WordWidth::W16 => {
                type $w = u16;
                $body
            }
            $crate::word::WordWidth::W32 => {
                type $w = u32;
                $body
            }
            $crate::word::WordWidth::W64 => {
                type $w = u64;
                $body
            }
        }
    };
}

pub(crate) use with_word_width;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_supported() {
        assert_eq!(WordWidth::from_bits(8).unwrap(), WordWidth::W8);
        assert_eq!(WordWidth::from_bits(16).unwrap(), WordWidth::W16);
        assert_eq!(WordWidth::from_bits(32).unwrap(), WordWidth::W32);
        assert_eq!(WordWidth::from_bits(64).unwrap(), WordWidth::W64);
    }

    #[test]
    fn test_from_bits_unsupported() {
        assert!(matches!(
            WordWidth::from_bits(24),
            Err(Error::UnsupportedWidth(24))
        ));
        assert!(matches!(
            WordWidth::from_bits(0),
            Err(Error::UnsupportedWidth(0))
        ));
    }

    #[test]
    fn test_word_constants_match_width() {
        assert_eq!(<u8 as Word>::WIDTH.bytes(), <u8 as Word>::BYTES);
        assert_eq!(<u16 as Word>::WIDTH.bytes(), <u16 as Word>::BYTES);
        assert_eq!(<u32 as Word>::WIDTH.bytes(), <u32 as Word>::BYTES);
        assert_eq!(<u64 as Word>::WIDTH.bits(), <u64 as Word>::BITS);
    }

    #[test]
    fn test_le_bytes() {
        assert_eq!(u16::from_le_slice(&[0x34, 0x12]), 0x1234);
        assert_eq!(u32::from_le_slice(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);

        let mut out = Vec::new();
        0x1234_5678u32.extend_le(&mut out);
        assert_eq!(out, vec![0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_truncate_and_try_from() {
        assert_eq!(u8::truncate_from(0x1FF), 0xFF);
        assert_eq!(u16::try_from_u64(0x1_0000), None);
        assert_eq!(u16::try_from_u64(0xFFFF), Some(0xFFFF));
    }

    #[test]
    fn test_with_word_width_dispatch() {
        let bytes = with_word_width!(WordWidth::W32, |W| <W as Word>::BYTES);
        assert_eq!(bytes, 4);
    }
}
