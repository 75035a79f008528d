use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};

use crate::parser;

pub const DEFAULT_TEXTURE: &str = "textures.png";
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Turns an offset list into texture script commands that average each
/// block's tile of the texture atlas into its color
pub struct TextureScript {
    texture: String,
    tile_size: u32,
}

impl Default for TextureScript {
    fn default() -> Self {
        TextureScript{ texture: DEFAULT_TEXTURE.to_string(), tile_size: DEFAULT_TILE_SIZE }
    }
}

impl TextureScript {
    pub fn new(texture: &str, tile_size: u32) -> Self {
        TextureScript{ texture: texture.to_string(), tile_size }
    }

    pub fn write_header<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "'{} load-image", self.texture)?;
        writeln!(out, "'default 0x80FF00FF\tprint-block-color")?;
        writeln!(out, "0x0000 0x00000000 print-block-color # Air")?;
        Ok(())
    }

    fn pixel(&self, tile: &str) -> Result<u32> {
        let tile = tile.parse::<u32>()?;
        tile.checked_mul(self.tile_size)
            .ok_or_else(|| anyhow!("tile {} is out of range", tile))
    }

    /// Returns the command for one offset list line, or `None` when the line
    /// is not an offset entry
    pub fn command(&self, line: &str) -> Result<Option<String>> {
        let entry = match parser::parse_offset_entry(line) {
            Some(entry) => entry,
            None => { return Ok(None) }
        };
        let id = parser::parse_num(entry.id)?;
        let x = self.pixel(entry.x)?;
        let y = self.pixel(entry.y)?;
        Ok(Some(format!(
            "dup 0x{:02X} 0x{:02X} {} {} sub-image average-color 0x{:04X} swap print-block-color {}",
            x, y, self.tile_size, self.tile_size, id, entry.comment)))
    }

    pub fn convert<I, W>(&self, lines: I, out: &mut W) -> Result<usize>
        where I: IntoIterator<Item = io::Result<String>>, W: Write
    {
        self.write_header(out)?;
        let mut count = 0;
        for (n, line) in lines.into_iter().enumerate() {
            let line = line?;
            match self.command(line.trim_end()).with_context(|| format!("line {}", n + 1))? {
                Some(command) => {
                    writeln!(out, "{}", command)?;
                    count += 1;
                },
                None => { log::debug!("line {}: no offset entry, skipped", n + 1); }
            }
        }
        Ok(count)
    }
}
