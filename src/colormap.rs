use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fmt::Formatter;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::{input, parser};

/// Key of a color map entry. `Default` orders before every numeric id.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum BlockId {
    Default,
    Numeric(u32),
}

impl BlockId {
    pub fn parse(token: &str) -> Result<BlockId> {
        if token == "default" {
            Ok(BlockId::Default)
        } else {
            Ok(BlockId::Numeric(parser::parse_num(token)?))
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Default => { write!(f, "default") },
            BlockId::Numeric(id) => { write!(f, "0x{:04X}", id) }
        }
    }
}

/// Accumulates block names, colors and comments from successive input
/// files. Later entries replace earlier ones.
#[derive(Default)]
pub struct ColorMap {
    names: HashMap<u32, String>,
    colors: BTreeMap<BlockId, u32>,
    comments: HashMap<BlockId, String>,
    name_comments: bool,
}

fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
    where F: FnMut(&str) -> Result<()>
{
    for (n, line) in input::open_file(path)?.lines().enumerate() {
        let line = line.with_context(|| format!("unable to read {}", path.display()))?;
        f(&line).with_context(|| format!("{}:{}", path.display(), n + 1))?;
    }
    Ok(())
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `# <name>` from the name file as comment for numeric blocks
    /// that do not have an explicit one
    pub fn with_name_comments(mut self, enabled: bool) -> Self {
        self.name_comments = enabled;
        self
    }

    pub fn merge_name_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if parser::is_blank_or_comment(line) { return Ok(()) }

        let entry = parser::parse_name_entry(line)?;
        let id = parser::parse_num(entry.id)?;
        self.names.insert(id, entry.name.unwrap_or_default().to_string());
        Ok(())
    }

    pub fn load_name_lines<I, S>(&mut self, lines: I) -> Result<()>
        where I: IntoIterator<Item = S>, S: AsRef<str>
    {
        for (n, line) in lines.into_iter().enumerate() {
            self.merge_name_line(line.as_ref()).with_context(|| format!("line {}", n + 1))?;
        }
        Ok(())
    }

    pub fn load_name_file(&mut self, path: &Path) -> Result<()> {
        log::info!("loading block names from {}", path.display());
        for_each_line(path, |line| self.merge_name_line(line))?;
        log::debug!("{} block names known", self.names.len());
        Ok(())
    }

    /// Merges one color map line; blank and comment lines are ignored
    pub fn merge_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if parser::is_blank_or_comment(line) { return Ok(()) }

        let entry = parser::parse_color_entry(line)?;
        let id = BlockId::parse(entry.id)?;
        if let Some(color) = entry.color {
            let color = parser::parse_color(color)?;
            if let Some(previous) = self.colors.insert(id, color) {
                log::debug!("{}: color 0x{:08X} replaced by 0x{:08X}", id, previous, color);
            }
        }
        if let Some(comment) = entry.comment {
            self.comments.insert(id, comment.to_string());
        }
        Ok(())
    }

    pub fn load_color_lines<I, S>(&mut self, lines: I) -> Result<()>
        where I: IntoIterator<Item = S>, S: AsRef<str>
    {
        for (n, line) in lines.into_iter().enumerate() {
            self.merge_line(line.as_ref()).with_context(|| format!("line {}", n + 1))?;
        }
        Ok(())
    }

    pub fn load_color_file(&mut self, path: &Path) -> Result<()> {
        log::info!("merging color map {}", path.display());
        for_each_line(path, |line| self.merge_line(line))?;
        log::debug!("{} block colors after {}", self.colors.len(), path.display());
        Ok(())
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(|s| s.as_str())
    }

    pub fn color(&self, id: BlockId) -> Option<u32> {
        self.colors.get(&id).copied()
    }

    /// Comment emitted for a block: the explicit one, or the name file
    /// fallback when enabled
    pub fn comment(&self, id: BlockId) -> Option<Cow<'_, str>> {
        if let Some(comment) = self.comments.get(&id) {
            return Some(Cow::Borrowed(comment.as_str()));
        }
        match id {
            BlockId::Numeric(n) if self.name_comments => {
                self.name(n).map(|name| Cow::Owned(format!("# {}", name)))
            },
            _ => None
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn write_table<W: Write>(&self, out: &mut W) -> Result<()> {
        for (id, color) in &self.colors {
            write!(out, "{}\t0x{:08X}", id, color)?;
            if let Some(comment) = self.comment(*id) {
                write!(out, "\t{}", comment)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
