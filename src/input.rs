use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub type Lines = Box<dyn Iterator<Item = io::Result<String>>>;

pub fn open_file(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Lines of the given files in turn, or of standard input if there are
/// none. A file's last line always ends at the end of that file.
pub fn input_lines(paths: &[PathBuf]) -> Result<Lines> {
    if paths.is_empty() {
        return Ok(Box::new(BufReader::new(io::stdin()).lines()));
    }
    let readers = paths.iter()
        .map(|path| open_file(path))
        .collect::<Result<Vec<_>>>()?;
    Ok(Box::new(readers.into_iter().flat_map(|reader| reader.lines())))
}
