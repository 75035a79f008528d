use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};

use crate::blocknames::BlockName;
use crate::parser;

/// Tile position of a block texture in the atlas, in tiles
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Offset {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, PartialEq)]
pub enum Answer {
    At(Offset),
    Skip,
    Invalid,
}

pub fn parse_answer(input: &str) -> Answer {
    let input = input.trim();
    if let Some((x, y)) = parser::find_offset_spec(input) {
        return match (x.parse::<u32>(), y.parse::<u32>()) {
            (Ok(x), Ok(y)) => Answer::At(Offset{ x, y }),
            _ => Answer::Invalid
        };
    }
    if input == "x" { Answer::Skip } else { Answer::Invalid }
}

pub fn format_offset(block: &BlockName, offset: Offset) -> String {
    format!("0x{:04X}\t{},{}\t# {}", block.id, offset.x, offset.y, block.name)
}

/// Asks for the atlas offset of each block in turn. Prompts go to
/// `prompt`, answers are read from `input`.
pub struct OffsetRecorder<R, P> {
    input: R,
    prompt: P,
}

impl<R: BufRead, P: Write> OffsetRecorder<R, P> {
    pub fn new(input: R, prompt: P) -> Self {
        OffsetRecorder{ input, prompt }
    }

    /// Returns `None` when the block is skipped
    pub fn ask(&mut self, block: &BlockName) -> Result<Option<Offset>> {
        loop {
            write!(self.prompt, "Offset of {}> ", block.name)?;
            self.prompt.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                return Err(anyhow!("unexpected end of input while asking for offset of {}", block.name));
            }
            match parse_answer(&answer) {
                Answer::At(offset) => { return Ok(Some(offset)) },
                Answer::Skip => { return Ok(None) },
                Answer::Invalid => {
                    writeln!(self.prompt, "Invalid offset spec '{}'", answer.trim())?;
                }
            }
        }
    }

    /// Records every block that is not skipped to `out`, echoing each
    /// entry to the prompt as well
    pub fn record<W: Write>(&mut self, blocks: &[BlockName], out: &mut W) -> Result<usize> {
        let mut count = 0;
        for block in blocks {
            if let Some(offset) = self.ask(block)? {
                let spec = format_offset(block, offset);
                writeln!(self.prompt, "{}", spec)?;
                writeln!(out, "{}", spec)?;
                count += 1;
            } else {
                log::info!("skipping {}", block.name);
            }
        }
        Ok(count)
    }
}
