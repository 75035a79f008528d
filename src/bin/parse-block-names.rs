extern crate block_data;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use block_data::{blocknames, input};
use clap::Parser;

/// Extracts `0xNNNN <tab> name` block names from the wiki's data value table
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Wiki markup files (default: standard input)
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let lines = input::input_lines(&args.inputs)?;
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let count = blocknames::scrape(lines, &mut out)?;
    out.flush()?;
    log::info!("found {} blocks", count);
    Ok(())
}
