//! Map grid: a flat run of 16-bit cell words.

use super::ensure_not_empty;
use crate::{
    codec::{decode_records, encode_records},
    descriptor::MapGridDescriptor,
    diagnostics::{Converted, trailing_bytes},
    document::MapGridDocument,
    errors::{Error, Result},
    table::MaskTable,
    word::Word,
};

type GridWord = u16;

pub fn decode(descriptor: &MapGridDescriptor, buffer: &[u8]) -> Result<Converted<MapGridDocument>> {
    ensure_not_empty(buffer)?;

    let table = descriptor.table()?;
    let (cells, dropped) = decode_records::<GridWord>(buffer, &table);

    let mut converted = Converted::new(MapGridDocument {
        mapgrid_size_in_bits: <GridWord as Word>::BITS,
        mapgrid_masks: table.to_mask_map(),
        mapgrid: cells,
    });
    if let Some(warning) = trailing_bytes(dropped, <GridWord as Word>::BYTES) {
        converted.warn(warning);
    }

    Ok(converted)
}

pub fn encode(document: &MapGridDocument) -> Result<Converted<Vec<u8>>> {
    if document.mapgrid_size_in_bits != <GridWord as Word>::BITS {
        return Err(Error::UnsupportedWidth(document.mapgrid_size_in_bits));
    }

    let table = MaskTable::<GridWord>::from_mask_map(&document.mapgrid_masks)?;
    let bytes = encode_records(&document.mapgrid, &table)?;

    Ok(Converted::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::RSE;
    use crate::diagnostics::Warning;

    #[test]
    fn test_decode_cells() {
        // metatileId 0x001, collision 1, elevation 3
        let buffer = [0x01, 0x34, 0xFF, 0x03];
        let converted = decode(&RSE.mapgrid, &buffer).unwrap();
        let document = converted.value;

        assert!(converted.warnings.is_empty());
        assert_eq!(document.mapgrid_size_in_bits, 16);
        assert_eq!(
            document.mapgrid_masks.get("elevation").map(String::as_str),
            Some("0xF000")
        );
        assert_eq!(document.mapgrid.len(), 2);

        let cell = &document.mapgrid[0];
        assert_eq!(cell.get("metatileId"), Some(&0x001));
        assert_eq!(cell.get("collision"), Some(&1));
        assert_eq!(cell.get("elevation"), Some(&3));

        assert_eq!(document.mapgrid[1].get("metatileId"), Some(&0x3FF));
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(&RSE.mapgrid, &[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_decode_trailing_byte() {
        let converted = decode(&RSE.mapgrid, &[0x01, 0x00, 0x07]).unwrap();
        assert_eq!(converted.value.mapgrid.len(), 1);
        assert_eq!(
            converted.warnings,
            vec![Warning::TrailingBytes {
                dropped: 1,
                word_bytes: 2
            }]
        );
    }

    #[test]
    fn test_round_trip() {
        let buffer: Vec<u8> = (0u8..=255).collect();
        let document = decode(&RSE.mapgrid, &buffer).unwrap().value;
        let encoded = encode(&document).unwrap();
        assert!(encoded.warnings.is_empty());
        assert_eq!(encoded.value, buffer);
    }

    #[test]
    fn test_encode_honours_document_masks() {
        let json = r#"{
            "mapgridSizeInBits": 16,
            "mapgridMasks": { "low": "0x00FF", "high": "0xFF00" },
            "mapgrid": [ { "low": 52, "high": 18 } ]
        }"#;
        let document: MapGridDocument = crate::document::from_json(json).unwrap();
        assert_eq!(encode(&document).unwrap().value, vec![0x34, 0x12]);
    }

    #[test]
    fn test_encode_missing_field() {
        let mut document = decode(&RSE.mapgrid, &[0x01, 0x00]).unwrap().value;
        document.mapgrid[0] = [("metatileId", 1), ("collision", 0)].into_iter().collect();
        assert!(matches!(
            encode(&document),
            Err(Error::MissingField { record: 0, .. })
        ));
    }

    #[test]
    fn test_encode_rejects_other_width() {
        let mut document = decode(&RSE.mapgrid, &[0x01, 0x00]).unwrap().value;
        document.mapgrid_size_in_bits = 32;
        assert!(matches!(encode(&document), Err(Error::UnsupportedWidth(32))));
    }
}
