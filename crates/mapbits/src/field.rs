//! Definition of named field masks used to build a [crate::table::MaskTable].

use std::borrow::Cow;

use crate::word::Word;

/// A single named field: the bits of a `W` word selected by `mask`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskField<W> {
    /// Name used as the key in decoded records.
    pub name: Cow<'static, str>,
    /// Bits of the word that belong to this field.
    pub mask: W,
}

impl<W> MaskField<W> {
    /// Field with a static name, usable in `const` tables.
    pub const fn new(name: &'static str, mask: W) -> Self {
        MaskField {
            name: Cow::Borrowed(name),
            mask,
        }
    }

    pub fn owned(name: impl Into<String>, mask: W) -> Self {
        MaskField {
            name: Cow::Owned(name.into()),
            mask,
        }
    }
}

impl MaskField<u64> {
    /// Narrows a wide mask to `W`, or returns `None` if it has bits above `W::BITS`.
    pub fn narrow<W: Word>(&self) -> Option<MaskField<W>> {
        W::try_from_u64(self.mask).map(|mask| MaskField {
            name: self.name.clone(),
            mask,
        })
    }
}
