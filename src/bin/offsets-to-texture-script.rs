extern crate block_data;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use block_data::{input, texture_script};
use clap::Parser;

/// Converts a block offset list into a texture script that averages each
/// block's texture tile into its color
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    #[clap(long, default_value = texture_script::DEFAULT_TEXTURE)]
    /// Texture atlas image loaded by the script
    texture: String,
    #[clap(long, default_value_t = texture_script::DEFAULT_TILE_SIZE)]
    /// Width and height of a single tile, in pixels
    tile_size: u32,
    /// Offset lists (default: standard input)
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let script = texture_script::TextureScript::new(&args.texture, args.tile_size);
    let lines = input::input_lines(&args.inputs)?;
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let count = script.convert(lines, &mut out)?;
    out.flush()?;
    log::info!("wrote {} block commands", count);
    Ok(())
}
