//! Metatiles: 16-bit tile words grouped `tiles_per_metatile` at a time.
//!
//! Tile words that do not complete a final group are dropped on decode and
//! reported as [`Warning::PartialGroup`].

use super::{check_declared_max, ensure_not_empty};
use crate::{
    codec::{decode_records, encode_records},
    descriptor::{MetatilesDescriptor, TilesetKind},
    diagnostics::{Converted, Warning, trailing_bytes},
    document::{Metatile, MetatilesDocument},
    errors::{Error, Result},
    record::FieldRecord,
    table::MaskTable,
    word::Word,
};

type TileWord = u16;

pub fn decode(
    descriptor: &MetatilesDescriptor,
    kind: TilesetKind,
    buffer: &[u8],
) -> Result<Converted<MetatilesDocument>> {
    ensure_not_empty(buffer)?;

    let group_size = descriptor.tiles_per_metatile;
    if group_size == 0 {
        return Err(Error::malformed("tiles per metatile must be at least 1"));
    }

    let table = descriptor.table()?;
    let (tiles, dropped) = decode_records::<TileWord>(buffer, &table);
    let (metatiles, leftover) = group_tiles(tiles, group_size);

    let counts = descriptor.counts(kind);
    let mut converted = Converted::new(MetatilesDocument {
        num_metatiles: counts.metatiles,
        num_tiles: counts.tiles,
        num_pals: counts.palettes,
        num_tiles_in_metatile: group_size,
        tiles_masks: table.to_mask_map(),
        metatiles,
    });

    if let Some(warning) = trailing_bytes(dropped, <TileWord as Word>::BYTES) {
        converted.warn(warning);
    }
    if leftover > 0 {
        converted.warn(Warning::PartialGroup {
            records: leftover,
            group_size,
        });
    }

    Ok(converted)
}

/// Splits `tiles` into complete groups. Returns the groups and how many
/// trailing tiles were left out.
///
/// `group_size` comes from a descriptor, so nothing is allocated from it.
fn group_tiles(tiles: Vec<FieldRecord>, group_size: usize) -> (Vec<Metatile>, usize) {
    let chunks = tiles.chunks_exact(group_size);
    let leftover = chunks.remainder().len();
    let metatiles = chunks
        .map(|group| Metatile {
            tiles: group.to_vec(),
        })
        .collect();

    (metatiles, leftover)
}

pub fn encode(document: &MetatilesDocument) -> Result<Converted<Vec<u8>>> {
    let table = MaskTable::<TileWord>::from_mask_map(&document.tiles_masks)?;

    let mut converted = Converted::new(Vec::new());
    if let Some(warning) = check_declared_max(
        "metatiles",
        document.num_metatiles,
        document.metatiles.len(),
    ) {
        converted.warn(warning);
    }
    for (index, metatile) in document.metatiles.iter().enumerate() {
        if metatile.tiles.len() != document.num_tiles_in_metatile {
            converted.warn(Warning::CountMismatch {
                what: format!("tiles in metatile {index}"),
                declared: document.num_tiles_in_metatile,
                actual: metatile.tiles.len(),
            });
        }
    }

    let tiles = document.metatiles.iter().flat_map(|metatile| &metatile.tiles);
    converted.value = encode_records(tiles, &table)?;

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FRLG, RSE};

    fn tile_bytes(count: usize) -> Vec<u8> {
        (0..count)
            .flat_map(|i| (i as u16).wrapping_mul(0x0401).to_le_bytes())
            .collect()
    }

    #[test]
    fn test_decode_groups() {
        let buffer = tile_bytes(3 * 8);
        let converted = decode(&RSE.metatiles, TilesetKind::Primary, &buffer).unwrap();

        assert!(converted.warnings.is_empty());
        let document = converted.value;
        assert_eq!(document.metatiles.len(), 3);
        assert!(document.metatiles.iter().all(|m| m.tiles.len() == 8));
        assert_eq!(document.num_tiles_in_metatile, 8);
        assert_eq!(document.num_pals, 6);
    }

    #[test]
    fn test_decode_tile_fields() {
        // tileId 0x155, xflip 1, yflip 0, palette 0xA
        let buffer: Vec<u8> = std::iter::repeat([0x55, 0xA5]).take(8).flatten().collect();
        let document = decode(&RSE.metatiles, TilesetKind::Primary, &buffer)
            .unwrap()
            .value;
        let tile = &document.metatiles[0].tiles[0];

        assert_eq!(
            tile.keys().collect::<Vec<_>>(),
            vec!["tileId", "xflip", "yflip", "palette"]
        );
        assert_eq!(tile.get("tileId"), Some(&0x155));
        assert_eq!(tile.get("xflip"), Some(&1));
        assert_eq!(tile.get("yflip"), Some(&0));
        assert_eq!(tile.get("palette"), Some(&0xA));
    }

    #[test]
    fn test_decode_partial_group_is_dropped() {
        let buffer = tile_bytes(3 * 8 - 1);
        let converted = decode(&RSE.metatiles, TilesetKind::Primary, &buffer).unwrap();

        assert_eq!(converted.value.metatiles.len(), 2);
        assert_eq!(
            converted.warnings,
            vec![Warning::PartialGroup {
                records: 7,
                group_size: 8
            }]
        );
    }

    #[test]
    fn test_decode_secondary_counts() {
        let buffer = tile_bytes(8);
        let document = decode(&FRLG.metatiles, TilesetKind::Secondary, &buffer)
            .unwrap()
            .value;
        assert_eq!(document.num_metatiles, 384);
        assert_eq!(document.num_tiles, 384);
        assert_eq!(document.num_pals, 6);
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(
            decode(&RSE.metatiles, TilesetKind::Primary, &[]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_round_trip() {
        let buffer = tile_bytes(5 * 8);
        let document = decode(&RSE.metatiles, TilesetKind::Primary, &buffer)
            .unwrap()
            .value;
        let encoded = encode(&document).unwrap();
        assert!(encoded.warnings.is_empty());
        assert_eq!(encoded.value, buffer);
    }

    #[test]
    fn test_encode_warns_on_counts() {
        let mut document = decode(&RSE.metatiles, TilesetKind::Primary, &tile_bytes(16))
            .unwrap()
            .value;
        document.num_metatiles = 1;
        document.metatiles[1].tiles.pop();

        let encoded = encode(&document).unwrap();
        assert_eq!(encoded.value.len(), 15 * 2);
        assert_eq!(
            encoded.warnings,
            vec![
                Warning::CountMismatch {
                    what: "metatiles".to_string(),
                    declared: 1,
                    actual: 2
                },
                Warning::CountMismatch {
                    what: "tiles in metatile 1".to_string(),
                    declared: 8,
                    actual: 7
                },
            ]
        );
    }

    #[test]
    fn test_encode_missing_field_reports_flat_index() {
        let mut document = decode(&RSE.metatiles, TilesetKind::Primary, &tile_bytes(16))
            .unwrap()
            .value;
        document.metatiles[1].tiles[2] = [("tileId", 1)].into_iter().collect();

        assert!(matches!(
            encode(&document),
            Err(Error::MissingField { record: 10, ref field }) if field == "xflip"
        ));
    }

    #[test]
    fn test_decode_huge_group_size_is_partial() {
        let descriptor = MetatilesDescriptor {
            tiles_per_metatile: usize::MAX / 2,
            ..RSE.metatiles.clone()
        };
        let converted = decode(&descriptor, TilesetKind::Primary, &[1, 0, 2, 0]).unwrap();

        assert!(converted.value.metatiles.is_empty());
        assert_eq!(
            converted.warnings,
            vec![Warning::PartialGroup {
                records: 2,
                group_size: usize::MAX / 2
            }]
        );
    }

    #[test]
    fn test_group_tiles() {
        let tiles = vec![FieldRecord::new(); 5];
        let (groups, leftover) = group_tiles(tiles, 2);
        assert_eq!(groups.len(), 2);
        assert_eq!(leftover, 1);
    }
}
