use std::fmt;
use std::fmt::Formatter;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::parser;

#[derive(Debug, PartialEq, Clone)]
pub struct BlockName {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}\t{}", self.id, self.name)
    }
}

/// Extracts a block from one line of the wiki's data value table
pub fn scrape_line(line: &str) -> Result<Option<BlockName>> {
    let line = parser::strip_wiki_links(line)?;
    match parser::find_wiki_row(&line) {
        Some(row) => {
            let id = parser::parse_num(row.number)?;
            Ok(Some(BlockName{ id, name: row.name.trim().to_string() }))
        },
        None => Ok(None)
    }
}

/// Writes a name list for every block row found in the wiki markup
pub fn scrape<I, W>(lines: I, out: &mut W) -> Result<usize>
    where I: IntoIterator<Item = io::Result<String>>, W: Write
{
    let mut count = 0;
    for (n, line) in lines.into_iter().enumerate() {
        let line = line?;
        if let Some(block) = scrape_line(&line).with_context(|| format!("line {}", n + 1))? {
            log::debug!("found block {} ({})", block.id, block.name);
            writeln!(out, "{}", block)?;
            count += 1;
        }
    }
    Ok(count)
}

/// Reads a `0xNNNN<TAB>name` list as written by [`scrape`]
pub fn read_name_list<R: BufRead>(input: R) -> Result<Vec<BlockName>> {
    let mut blocks = Vec::new();
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() { continue; }

        match parser::parse_name_list_entry(line) {
            Some((id, name)) => {
                let id = parser::parse_num(id).with_context(|| format!("line {}", n + 1))?;
                blocks.push(BlockName{ id, name: name.to_string() });
            },
            None => {
                log::warn!("line {}: not a block name entry, skipping: '{}'", n + 1, line);
            }
        }
    }
    Ok(blocks)
}
