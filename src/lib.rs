//! Tools for preparing block color maps: scraping block names from wiki
//! markup, recording texture atlas offsets, emitting texture scripts and
//! combining color maps.

pub mod parser;
pub mod colormap;
pub mod blocknames;
pub mod offsets;
pub mod texture_script;
pub mod input;
