extern crate block_data;

use std::path::PathBuf;

use anyhow::Result;
use block_data::{blocknames, input, offsets::OffsetRecorder};
use clap::Parser;

/// Asks for the texture atlas offset of every block in a name list.
/// Answer `x,y` in tiles, or `x` to skip a block.
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Block name list
    #[clap(default_value = "block-names.txt")]
    names: PathBuf,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let blocks = blocknames::read_name_list(input::open_file(&args.names)?)?;
    log::info!("{} blocks in {}", blocks.len(), args.names.display());

    let stdin = std::io::stdin();
    let mut recorder = OffsetRecorder::new(stdin.lock(), std::io::stderr());
    let count = recorder.record(&blocks, &mut std::io::stdout())?;
    log::info!("recorded {} offsets", count);
    Ok(())
}
