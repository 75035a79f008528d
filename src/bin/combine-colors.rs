extern crate block_data;

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use block_data::colormap::ColorMap;
use clap::Parser;

/// Combines multiple block color maps into one, with later files
/// overriding color/comment values from earlier ones
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    #[clap(long)]
    /// Block names, one `<number> <tab> <name>` per line
    name_file: Option<PathBuf>,
    #[clap(long, default_value_t=false)]
    /// Use names from the name file as comments for blocks without one
    name_comments: bool,
    /// Color maps to combine, later ones take precedence
    files: Vec<PathBuf>,
}

// `-name-file` is the historic spelling of `--name-file`
fn cli_args() -> Vec<OsString> {
    std::env::args_os()
        .map(|arg| if arg == "-name-file" { OsString::from("--name-file") } else { arg })
        .collect()
}

fn main() -> Result<()> {
    let args = Cli::parse_from(cli_args());
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut color_map = ColorMap::new().with_name_comments(args.name_comments);
    if let Some(name_file) = &args.name_file {
        color_map.load_name_file(name_file)?;
    } else if args.name_comments {
        log::warn!("--name-comments has no effect without --name-file");
    }
    for file in &args.files {
        color_map.load_color_file(file)?;
    }
    log::info!("writing {} block colors", color_map.len());

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    color_map.write_table(&mut out)?;
    out.flush()?;
    Ok(())
}
