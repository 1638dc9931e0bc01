//! Sponge schematic (`.schem`, version 2) export.
//!
//! The grid's bounding box becomes the schematic volume; unplaced cells
//! encode as air. Block data is the format's unsigned-LEB128 palette index
//! per cell, x fastest, then z, then y, and the whole NBT tree is gzipped.

use super::nbt::Tag;
use crate::error::{MapartError, Result};
use crate::grid::VoxelGrid;
use crate::types::BlockPosition;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Data version written into the schematic (Minecraft 1.16.5).
const DATA_VERSION: i32 = 2586;

const AIR: &str = "minecraft:air";

/// Write a voxel grid as a gzipped Sponge v2 schematic.
pub fn write_schem<W: Write>(grid: &VoxelGrid, writer: W) -> Result<()> {
    let (min, max) = grid
        .bounds()
        .ok_or_else(|| MapartError::Export("cannot export an empty voxel grid".to_string()))?;

    let width = (max.x - min.x + 1) as i64;
    let height = (max.y - min.y + 1) as i64;
    let length = (max.z - min.z + 1) as i64;
    for (dim, name) in [(width, "width"), (height, "height"), (length, "length")] {
        if dim > u16::MAX as i64 {
            return Err(MapartError::Export(format!(
                "schematic {} {} exceeds the format's limit",
                name, dim
            )));
        }
    }

    // Grid palette ids carry over unchanged; air is appended only if some
    // cell of the bounding volume is unplaced.
    let volume = (width * height * length) as usize;
    let needs_air = grid.len() < volume;
    let air_id = grid.block_palette().len();

    let mut palette = BTreeMap::new();
    for (id, block) in grid.block_palette().iter().enumerate() {
        palette.insert(block.clone(), Tag::Int(id as i32));
    }
    if needs_air {
        palette.insert(AIR.to_string(), Tag::Int(air_id as i32));
    }
    let palette_max = air_id + usize::from(needs_air);

    let mut block_data = Vec::with_capacity(volume);
    for y in min.y..=max.y {
        for z in min.z..=max.z {
            for x in min.x..=max.x {
                let id = grid
                    .palette_id_at(BlockPosition::new(x, y, z))
                    .unwrap_or(air_id);
                write_varint(&mut block_data, id as u32);
            }
        }
    }

    let mut root = BTreeMap::new();
    root.insert("Version".to_string(), Tag::Int(2));
    root.insert("DataVersion".to_string(), Tag::Int(DATA_VERSION));
    root.insert("Width".to_string(), Tag::Short(width as i16));
    root.insert("Height".to_string(), Tag::Short(height as i16));
    root.insert("Length".to_string(), Tag::Short(length as i16));
    root.insert(
        "Offset".to_string(),
        Tag::IntArray(vec![min.x, min.y, min.z]),
    );
    root.insert("PaletteMax".to_string(), Tag::Int(palette_max as i32));
    root.insert("Palette".to_string(), Tag::Compound(palette));
    root.insert(
        "BlockData".to_string(),
        Tag::ByteArray(block_data.iter().map(|&b| b as i8).collect()),
    );

    let mut encoder = GzEncoder::new(writer, Compression::default());
    Tag::Compound(root).write_named(&mut encoder, "Schematic")?;
    encoder.finish()?;
    Ok(())
}

/// Write a voxel grid as a `.schem` file.
pub fn write_schem_to_path<P: AsRef<Path>>(grid: &VoxelGrid, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_schem(grid, std::io::BufWriter::new(file))
}

/// Unsigned LEB128, as the schematic format specifies for block data.
fn write_varint(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Cursor;

    fn read_varint(bytes: &[u8], cursor: &mut usize) -> u32 {
        let mut value = 0u32;
        let mut shift = 0;
        loop {
            let byte = bytes[*cursor];
            *cursor += 1;
            value |= ((byte & 0x7f) as u32) << shift;
            if byte & 0x80 == 0 {
                return value;
            }
            shift += 7;
        }
    }

    fn decode(buffer: &[u8]) -> Tag {
        let mut decoder = GzDecoder::new(Cursor::new(buffer));
        let (name, root) = Tag::read_named(&mut decoder).unwrap();
        assert_eq!(name, "Schematic");
        root
    }

    #[test]
    fn test_empty_grid_rejected() {
        let grid = VoxelGrid::new();
        let err = write_schem(&grid, Vec::new()).unwrap_err();
        assert!(matches!(err, MapartError::Export(_)));
    }

    #[test]
    fn test_round_trip_dimensions_and_palette() {
        let mut grid = VoxelGrid::new();
        grid.set(BlockPosition::new(0, 1, 0), "minecraft:stone").unwrap();
        grid.set(BlockPosition::new(2, 1, 0), "minecraft:dirt").unwrap();

        let mut buffer = Vec::new();
        write_schem(&grid, &mut buffer).unwrap();
        let root = decode(&buffer);
        let root = root.as_compound().unwrap();

        assert_eq!(root["Version"].as_i32(), Some(2));
        assert_eq!(root["Width"].as_i16(), Some(3));
        assert_eq!(root["Height"].as_i16(), Some(1));
        assert_eq!(root["Length"].as_i16(), Some(1));

        let palette = root["Palette"].as_compound().unwrap();
        assert_eq!(palette["minecraft:stone"].as_i32(), Some(0));
        assert_eq!(palette["minecraft:dirt"].as_i32(), Some(1));
        // The middle cell is unplaced, so air joins the palette.
        assert_eq!(palette["minecraft:air"].as_i32(), Some(2));
        assert_eq!(root["PaletteMax"].as_i32(), Some(3));
    }

    #[test]
    fn test_block_data_order_and_offset() {
        let mut grid = VoxelGrid::new();
        grid.set(BlockPosition::new(5, 3, 7), "minecraft:stone").unwrap();
        grid.set(BlockPosition::new(6, 3, 7), "minecraft:dirt").unwrap();
        grid.set(BlockPosition::new(5, 4, 7), "minecraft:stone").unwrap();

        let mut buffer = Vec::new();
        write_schem(&grid, &mut buffer).unwrap();
        let root = decode(&buffer);
        let root = root.as_compound().unwrap();

        match &root["Offset"] {
            Tag::IntArray(offset) => assert_eq!(offset, &vec![5, 3, 7]),
            other => panic!("unexpected Offset tag: {:?}", other),
        }

        // 2x2x1 volume, x fastest then z then y:
        // (5,3,7) stone, (6,3,7) dirt, (5,4,7) stone, (6,4,7) air.
        let data: Vec<u8> = root["BlockData"]
            .as_byte_array()
            .unwrap()
            .iter()
            .map(|&b| b as u8)
            .collect();
        let mut cursor = 0;
        let ids: Vec<u32> = (0..4).map(|_| read_varint(&data, &mut cursor)).collect();
        assert_eq!(cursor, data.len());
        assert_eq!(ids, vec![0, 1, 0, 2]);
    }

    #[test]
    fn test_full_volume_omits_air() {
        let mut grid = VoxelGrid::new();
        grid.set(BlockPosition::new(0, 0, 0), "minecraft:stone").unwrap();

        let mut buffer = Vec::new();
        write_schem(&grid, &mut buffer).unwrap();
        let root = decode(&buffer);
        let palette = root.as_compound().unwrap()["Palette"].as_compound().unwrap();
        assert!(!palette.contains_key("minecraft:air"));
    }

    #[test]
    fn test_varint_encoding() {
        let mut out = Vec::new();
        write_varint(&mut out, 0);
        write_varint(&mut out, 127);
        write_varint(&mut out, 128);
        write_varint(&mut out, 300);
        assert_eq!(out, vec![0x00, 0x7f, 0x80, 0x01, 0xac, 0x02]);
    }
}
