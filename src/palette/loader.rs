//! Palette loading from tabular and JSON sources.
//!
//! Two layouts are supported:
//!
//! - A CSV pair: a color table with `R,G,B,name` rows and a block-choice
//!   table with `name,block_id[,scaffold]` rows. The color table gives the
//!   palette its order; every color name must resolve to exactly one block
//!   choice.
//! - A single JSON file: an array of `{color, name, block, scaffold}`
//!   entries.
//!
//! Either way the loader expands each row into its Level/Up/Down triplet;
//! the core never sees the tabular form.

use super::Palette;
use crate::error::{MapartError, Result};
use image::Rgb;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Load a palette from a file path.
///
/// A `.json` path loads the single-file layout. Any other path is treated
/// as the color CSV and requires `blocks` to point at the block-choice CSV.
pub fn load_from_path<P: AsRef<Path>>(path: P, blocks: Option<P>) -> Result<Palette> {
    let path = path.as_ref();

    if path.extension().map(|e| e == "json").unwrap_or(false) {
        load_json(path)
    } else {
        let blocks = blocks.ok_or_else(|| {
            MapartError::PaletteFormat(
                "CSV palette requires a block-choices table".to_string(),
            )
        })?;
        load_csv_pair(path, blocks.as_ref())
    }
}

/// Load a palette from a color CSV and a block-choice CSV.
pub fn load_csv_pair(colors_path: &Path, blocks_path: &Path) -> Result<Palette> {
    let choices = read_block_choices(blocks_path)?;

    let contents = std::fs::read_to_string(colors_path)?;
    let mut palette = Palette::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(MapartError::PaletteFormat(format!(
                "{}:{}: expected 4 fields, got {}",
                colors_path.display(),
                line_no + 1,
                fields.len()
            )));
        }

        let color = Rgb([
            parse_channel(fields[0], colors_path, line_no)?,
            parse_channel(fields[1], colors_path, line_no)?,
            parse_channel(fields[2], colors_path, line_no)?,
        ]);
        let name = fields[3];

        let choice = choices
            .get(name)
            .ok_or_else(|| MapartError::UnknownBlockChoice(name.to_string()))?;

        palette.push_color(name, color, &choice.block_id, choice.scaffold);
    }

    Ok(palette)
}

/// Load a palette from a single JSON file.
pub fn load_json(path: &Path) -> Result<Palette> {
    let contents = std::fs::read_to_string(path)?;
    let rows: Vec<JsonPaletteRow> = serde_json::from_str(&contents)?;

    let mut seen: HashMap<&str, ()> = HashMap::new();
    let mut palette = Palette::new();
    for row in &rows {
        if seen.insert(&row.name, ()).is_some() {
            return Err(MapartError::DuplicateBlockChoice(row.name.clone()));
        }
        palette.push_color(&row.name, Rgb(row.color), &row.block, row.scaffold);
    }

    Ok(palette)
}

/// One semantic color in the JSON palette layout.
#[derive(Debug, Deserialize)]
struct JsonPaletteRow {
    color: [u8; 3],
    name: String,
    block: String,
    #[serde(default)]
    scaffold: bool,
}

struct BlockChoice {
    block_id: String,
    scaffold: bool,
}

fn read_block_choices(path: &Path) -> Result<HashMap<String, BlockChoice>> {
    let contents = std::fs::read_to_string(path)?;
    let mut choices = HashMap::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 2 && fields.len() != 3 {
            return Err(MapartError::PaletteFormat(format!(
                "{}:{}: expected 2 or 3 fields, got {}",
                path.display(),
                line_no + 1,
                fields.len()
            )));
        }

        let scaffold = match fields.get(2) {
            None => false,
            Some(s) => parse_scaffold(s, path, line_no)?,
        };

        let previous = choices.insert(
            fields[0].to_string(),
            BlockChoice {
                block_id: fields[1].to_string(),
                scaffold,
            },
        );
        if previous.is_some() {
            return Err(MapartError::DuplicateBlockChoice(fields[0].to_string()));
        }
    }

    Ok(choices)
}

fn parse_channel(field: &str, path: &Path, line_no: usize) -> Result<u8> {
    field.parse().map_err(|_| {
        MapartError::PaletteFormat(format!(
            "{}:{}: invalid color channel '{}'",
            path.display(),
            line_no + 1,
            field
        ))
    })
}

fn parse_scaffold(field: &str, path: &Path, line_no: usize) -> Result<bool> {
    match field.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(MapartError::PaletteFormat(format!(
            "{}:{}: invalid scaffold flag '{}'",
            path.display(),
            line_no + 1,
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv_pair() {
        let colors = temp_file("255,255,255,white\n255,0,0,red\n");
        let blocks = temp_file("white,minecraft:white_wool\nred,minecraft:red_wool,true\n");

        let palette = load_csv_pair(colors.path(), blocks.path()).unwrap();
        assert_eq!(palette.len(), 6);

        let white_up = palette.entry(1).unwrap();
        assert_eq!(white_up.block_id, "minecraft:white_wool");
        assert_eq!(white_up.direction, Direction::Up);
        assert!(!white_up.scaffold);

        let red_level = palette.entry(3).unwrap();
        assert_eq!(red_level.block_id, "minecraft:red_wool");
        assert!(red_level.scaffold);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let colors = temp_file("\n255,255,255,white\n\n");
        let blocks = temp_file("white,minecraft:white_wool\n\n");
        let palette = load_csv_pair(colors.path(), blocks.path()).unwrap();
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let colors = temp_file("255,255,white\n");
        let blocks = temp_file("white,minecraft:white_wool\n");
        let err = load_csv_pair(colors.path(), blocks.path()).unwrap_err();
        assert!(matches!(err, MapartError::PaletteFormat(_)));
    }

    #[test]
    fn test_bad_channel_rejected() {
        let colors = temp_file("255,xx,0,white\n");
        let blocks = temp_file("white,minecraft:white_wool\n");
        let err = load_csv_pair(colors.path(), blocks.path()).unwrap_err();
        assert!(matches!(err, MapartError::PaletteFormat(_)));
    }

    #[test]
    fn test_duplicate_block_choice_rejected() {
        let colors = temp_file("255,255,255,white\n");
        let blocks = temp_file("white,minecraft:white_wool\nwhite,minecraft:snow_block\n");
        let err = load_csv_pair(colors.path(), blocks.path()).unwrap_err();
        assert!(matches!(err, MapartError::DuplicateBlockChoice(name) if name == "white"));
    }

    #[test]
    fn test_unknown_block_choice_rejected() {
        let colors = temp_file("255,0,0,red\n");
        let blocks = temp_file("white,minecraft:white_wool\n");
        let err = load_csv_pair(colors.path(), blocks.path()).unwrap_err();
        assert!(matches!(err, MapartError::UnknownBlockChoice(name) if name == "red"));
    }

    #[test]
    fn test_load_json() {
        let json = temp_file(
            r#"[
                {"color": [255, 255, 255], "name": "white", "block": "minecraft:white_wool"},
                {"color": [255, 0, 0], "name": "red", "block": "minecraft:red_wool", "scaffold": true}
            ]"#,
        );
        let palette = load_json(json.path()).unwrap();
        assert_eq!(palette.len(), 6);
        assert!(palette.entry(5).unwrap().scaffold);
    }

    #[test]
    fn test_json_duplicate_rejected() {
        let json = temp_file(
            r#"[
                {"color": [255, 255, 255], "name": "white", "block": "minecraft:white_wool"},
                {"color": [200, 200, 200], "name": "white", "block": "minecraft:snow_block"}
            ]"#,
        );
        let err = load_json(json.path()).unwrap_err();
        assert!(matches!(err, MapartError::DuplicateBlockChoice(_)));
    }
}
