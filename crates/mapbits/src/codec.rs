//! Word-level bitfield codec.
//!
//! Decoding walks the table in order and emits one value per mask; bits not
//! covered by any mask are dropped. Encoding ORs each shifted, masked value
//! into a zero word, so an oversized value is truncated to its field instead
//! of spilling into a neighbour.

use crate::{
    bits::{assemble_words, disassemble_words},
    errors::{Error, Result},
    record::FieldRecord,
    table::MaskTable,
    word::Word,
};

/// Number of bytes in one `W` word.
pub const fn word_width_bytes<W: Word>() -> usize {
    W::BYTES
}

/// Splits `word` into named field values, in table order.
pub fn decode_word<W: Word>(word: W, table: &MaskTable<W>) -> FieldRecord {
    let mut record = FieldRecord::with_capacity(table.len());
    for field in &table.fields {
        record.insert(&*field.name, field.extract(word));
    }

    record
}

/// Packs `record` into a word.
///
/// Every table field must be present in the record; `index` is only used to
/// report which record was missing one. Record entries the table does not
/// name are ignored.
pub fn encode_word<W: Word>(record: &FieldRecord, table: &MaskTable<W>, index: usize) -> Result<W> {
    let mut word = W::default();
    for field in &table.fields {
        let value = record
            .get(&field.name)
            .copied()
            .ok_or_else(|| Error::MissingField {
                record: index,
                field: field.name.to_string(),
            })?;

        word = word | field.insert(value);
    }

    Ok(word)
}

/// Decodes every complete word in `buffer`.
///
/// Returns the records and the number of trailing bytes that did not make up
/// a whole word.
pub fn decode_records<W: Word>(buffer: &[u8], table: &MaskTable<W>) -> (Vec<FieldRecord>, usize) {
    let words = assemble_words::<W>(buffer);
    let dropped = words.remainder().len();
    let records = words.map(|word| decode_word(word, table)).collect();

    (records, dropped)
}

/// Encodes `records` in order and concatenates their little-endian bytes.
pub fn encode_records<'a, W, I>(records: I, table: &MaskTable<W>) -> Result<Vec<u8>>
where
    W: Word,
    I: IntoIterator<Item = &'a FieldRecord>,
{
    let words = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| encode_word(record, table, index))
        .collect::<Result<Vec<W>>>()?;

    Ok(disassemble_words(&words))
}
