//! Mapart Gen CLI
//!
//! Generate Minecraft map-art terrain schematics from images.

use clap::{Parser, Subcommand};
use mapart_gen::{convert, export, palette, EmitOptions, ProfilerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapart-gen")]
#[command(author, version, about = "Generate map-art terrain schematics from images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into a map-art schematic
    Convert {
        /// Input image (PNG or JPEG)
        #[arg(short, long)]
        input: PathBuf,

        /// Palette file: JSON, or a CSV color table
        #[arg(short, long)]
        palette: PathBuf,

        /// Block-choice CSV table (required with a CSV palette)
        #[arg(short, long)]
        blocks: Option<PathBuf>,

        /// Output schematic path
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a dithered preview PNG here
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Block placed beneath scaffold-flagged blocks
        #[arg(long, default_value = "minecraft:cobblestone")]
        scaffold_block: String,

        /// Block standing in for the virtual row north of the image
        #[arg(long, default_value = "minecraft:smooth_stone")]
        dummy_block: String,

        /// Reserved: staircase terrain mode (not implemented)
        #[arg(long)]
        staircase: bool,
    },

    /// Show information about a palette
    Info {
        /// Palette file: JSON, or a CSV color table
        #[arg(short, long)]
        palette: PathBuf,

        /// Block-choice CSV table (required with a CSV palette)
        #[arg(short, long)]
        blocks: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            palette,
            blocks,
            output,
            preview,
            scaffold_block,
            dummy_block,
            staircase,
        } => {
            convert_image(
                &input,
                &palette,
                blocks.as_deref(),
                &output,
                preview.as_deref(),
                scaffold_block,
                dummy_block,
                staircase,
            )?;
        }
        Commands::Info { palette, blocks } => {
            show_palette_info(&palette, blocks.as_deref())?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn convert_image(
    input_path: &std::path::Path,
    palette_path: &std::path::Path,
    blocks_path: Option<&std::path::Path>,
    output_path: &std::path::Path,
    preview_path: Option<&std::path::Path>,
    scaffold_block: String,
    dummy_block: String,
    staircase: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading palette from {:?}...", palette_path);
    let palette = palette::load_from_path(palette_path, blocks_path)?;
    println!(
        "  {} colors ({} palette entries, {} scaffolded)",
        palette.color_count(),
        palette.len(),
        palette.scaffold_count()
    );

    println!("Decoding {:?}...", input_path);
    let img = image::open(input_path)?;
    println!("  {}x{} pixels", img.width(), img.height());

    let config = ProfilerConfig { staircase };
    let options = EmitOptions {
        scaffold_block,
        dummy_block,
    };

    println!("Converting...");
    let conversion = convert(&img, &palette, &config, &options)?;
    println!(
        "  {} columns, peak elevation {}, {} blocks placed",
        conversion.profile.width(),
        conversion.profile.max_elevation(),
        conversion.grid.len()
    );

    export::write_schem_to_path(&conversion.grid, output_path)?;
    println!("Exported schematic to {:?}", output_path);

    if let Some(preview_path) = preview_path {
        export::write_preview(&conversion.indexed, &palette, preview_path)?;
        println!("Wrote dithered preview to {:?}", preview_path);
    }

    Ok(())
}

fn show_palette_info(
    palette_path: &std::path::Path,
    blocks_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading palette from {:?}...", palette_path);
    let palette = palette::load_from_path(palette_path, blocks_path)?;

    println!("\nPalette Info:");
    println!("  Colors: {}", palette.color_count());
    println!("  Entries: {}", palette.len());
    println!("  Scaffolded colors: {}", palette.scaffold_count());

    Ok(())
}
