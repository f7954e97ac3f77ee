//! Low-level mask arithmetic and byte/word assembly.
//!
//! Words are assembled from consecutive little-endian byte chunks. A trailing
//! chunk shorter than one word is not turned into a word; [`Words::remainder`]
//! exposes it so callers can report it.

use std::marker::PhantomData;
use std::slice::ChunksExact;

use crate::errors::{Error, Result};
use crate::word::Word;

/// Index of the lowest set bit of `mask`. A zero mask has offset 0.
pub fn bit_offset<W: Word>(mask: W) -> u32 {
    if mask.is_zero() {
        0
    } else {
        mask.trailing_zeros()
    }
}

/// Number of bits selected by `mask`.
pub fn field_width<W: Word>(mask: W) -> u32 {
    mask.count_ones()
}

/// Whether two masks share at least one bit.
pub fn masks_overlap<W: Word>(a: W, b: W) -> bool {
    !(a & b).is_zero()
}

/// Iterator over the words of a byte buffer.
#[derive(Debug, Clone)]
pub struct Words<'a, W> {
    chunks: ChunksExact<'a, u8>,
    _word: PhantomData<W>,
}

impl<'a, W: Word> Words<'a, W> {
    /// Bytes left over after the last complete word.
    pub fn remainder(&self) -> &'a [u8] {
        self.chunks.remainder()
    }
}

impl<W: Word> Iterator for Words<'_, W> {
    type Item = W;

    fn next(&mut self) -> Option<W> {
        self.chunks.next().map(W::from_le_slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<W: Word> ExactSizeIterator for Words<'_, W> {}

/// Lazily splits `buffer` into little-endian `W` words.
pub fn assemble_words<W: Word>(buffer: &[u8]) -> Words<'_, W> {
    Words {
        chunks: buffer.chunks_exact(W::BYTES),
        _word: PhantomData,
    }
}

/// Little-endian bytes of a single word.
pub fn disassemble_word<W: Word>(word: W) -> Vec<u8> {
    let mut out = Vec::with_capacity(W::BYTES);
    word.extend_le(&mut out);
    out
}

/// Concatenates the little-endian bytes of every word.
pub fn disassemble_words<W: Word>(words: &[W]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * W::BYTES);
    for word in words {
        word.extend_le(&mut out);
    }

    out
}

/// Renders a mask as `0x` followed by upper-case hex digits, zero-padded to the word width.
pub fn format_mask<W: Word>(mask: W) -> String {
    format!("0x{:0width$X}", mask, width = W::BYTES * 2)
}

/// Parses a hex mask. The `0x`/`0X` prefix is optional and case is ignored.
pub fn parse_mask<W: Word>(text: &str) -> Result<W> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let value = u64::from_str_radix(digits, 16)
        .map_err(|e| Error::malformed(format!("invalid hex mask {text:?}: {e}")))?;

    W::try_from_u64(value).ok_or_else(|| {
        Error::malformed(format!(
            "mask {text:?} does not fit in a {}-bit word",
            W::BITS
        ))
    })
}
