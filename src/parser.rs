use pest::Parser;
use pest_derive::Parser;
use anyhow::{anyhow, Result};

#[derive(Parser)]
#[grammar = "blockdata.pest"]
struct BlockDataParser;

/// Fields of a single color map line, as written in the file
#[derive(Debug, PartialEq)]
pub struct ColorEntry<'a> {
    pub id: &'a str,
    pub color: Option<&'a str>,
    pub comment: Option<&'a str>,
}

/// Fields of a single name file line
#[derive(Debug, PartialEq)]
pub struct NameEntry<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
}

/// A `{{dec-hex|N}} || name` row found in wiki markup
#[derive(Debug, PartialEq)]
pub struct WikiRow<'a> {
    pub number: &'a str,
    pub name: &'a str,
}

/// A `0xNNNN<TAB>x,y<TAB># comment` offset list line
#[derive(Debug, PartialEq)]
pub struct OffsetEntry<'a> {
    pub id: &'a str,
    pub x: &'a str,
    pub y: &'a str,
    pub comment: &'a str,
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

/// Lines that are empty, whitespace only or start with `#` carry no data
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parses a decimal or `0x`-suffixed hexadecimal literal
pub fn parse_num(token: &str) -> Result<u32> {
    let invalid = || anyhow!("invalid number: '{}'", token);
    let pairs = BlockDataParser::parse(Rule::number, token).map_err(|_| invalid())?;
    for p in pairs.flatten() {
        let value = match p.as_rule() {
            Rule::decimal => p.as_str().parse::<u32>(),
            Rule::hex_digits => u32::from_str_radix(p.as_str(), 16),
            _ => { continue; }
        };
        return value.map_err(|_| anyhow!("number out of range: '{}'", token));
    }
    Err(invalid())
}

/// Parses a color value: decimal digits or `0x` followed by hex digits
/// of either case
pub fn parse_color(token: &str) -> Result<u32> {
    let pairs = BlockDataParser::parse(Rule::color, token)
        .map_err(|_| anyhow!("invalid color: '{}'", token))?;
    for p in pairs.flatten() {
        let value = match p.as_rule() {
            Rule::decimal => p.as_str().parse::<u32>(),
            Rule::color_hex => u32::from_str_radix(p.as_str(), 16),
            _ => { continue; }
        };
        return value.map_err(|_| anyhow!("color out of range: '{}'", token));
    }
    Err(anyhow!("invalid color: '{}'", token))
}

/// Splits a color map line into at most three tab-separated fields; empty
/// color or comment fields are reported as absent
pub fn parse_color_entry(line: &str) -> Result<ColorEntry<'_>> {
    let pairs = BlockDataParser::parse(Rule::color_entry, line)?;
    let mut entry = ColorEntry{ id: "", color: None, comment: None };
    for p in pairs.flatten() {
        match p.as_rule() {
            Rule::id_field => { entry.id = p.as_str(); },
            Rule::color_field => { entry.color = non_empty(p.as_str()); },
            Rule::comment => { entry.comment = non_empty(p.as_str()); },
            _ => { }
        }
    }
    Ok(entry)
}

/// Splits a name file line into id and name, dropping any further fields
pub fn parse_name_entry(line: &str) -> Result<NameEntry<'_>> {
    let pairs = BlockDataParser::parse(Rule::name_entry, line)?;
    let mut entry = NameEntry{ id: "", name: None };
    for p in pairs.flatten() {
        match p.as_rule() {
            Rule::id_field => { entry.id = p.as_str(); },
            Rule::name_field => { entry.name = Some(p.as_str()); },
            _ => { }
        }
    }
    Ok(entry)
}

/// Replaces `[[target|label]]` links by their label and removes any
/// remaining square brackets
pub fn strip_wiki_links(line: &str) -> Result<String> {
    let pairs = BlockDataParser::parse(Rule::wiki_line, line)?;
    let mut result = String::with_capacity(line.len());
    for p in pairs.flatten() {
        match p.as_rule() {
            Rule::link_label | Rule::wiki_text => { result.push_str(p.as_str()); },
            _ => { }
        }
    }
    Ok(result)
}

/// Finds the first block row in a line of (link-stripped) wiki markup
pub fn find_wiki_row(line: &str) -> Option<WikiRow<'_>> {
    let pairs = BlockDataParser::parse(Rule::wiki_row, line).ok()?;
    let mut number = None;
    let mut name = None;
    for p in pairs.flatten() {
        match p.as_rule() {
            Rule::block_number => { number = Some(p.as_str()); },
            Rule::block_name => { name = Some(p.as_str()); },
            _ => { }
        }
    }
    Some(WikiRow{ number: number?, name: name? })
}

/// Parses a `0xNNNN<TAB>name` line from a block name list
pub fn parse_name_list_entry(line: &str) -> Option<(&str, &str)> {
    let pairs = BlockDataParser::parse(Rule::name_list_entry, line).ok()?;
    let mut id = None;
    let mut name = None;
    for p in pairs.flatten() {
        match p.as_rule() {
            Rule::list_id => { id = Some(p.as_str()); },
            Rule::list_name => { name = Some(p.as_str()); },
            _ => { }
        }
    }
    Some((id?, name?))
}

/// Finds the first coordinate pair anywhere in the input: `x,y`, `x y`,
/// or a run of digits whose last digit is `y`
pub fn find_offset_spec(input: &str) -> Option<(&str, &str)> {
    let pairs = BlockDataParser::parse(Rule::offset_spec, input).ok()?;
    let mut coords = pairs.flatten()
        .filter(|p| matches!(p.as_rule(), Rule::coordinate | Rule::split_head));
    let x = coords.next()?.as_str();
    let y = coords.next()?.as_str();
    Some((x, y))
}

pub fn parse_offset_entry(line: &str) -> Option<OffsetEntry<'_>> {
    let pairs = BlockDataParser::parse(Rule::offset_entry, line).ok()?;
    let mut id = None;
    let mut coords = Vec::with_capacity(2);
    let mut comment = None;
    for p in pairs.flatten() {
        match p.as_rule() {
            Rule::entry_id => { id = Some(p.as_str()); },
            Rule::coordinate => { coords.push(p.as_str()); },
            Rule::entry_comment => { comment = Some(p.as_str()); },
            _ => { }
        }
    }
    match coords.as_slice() {
        &[x, y] => Some(OffsetEntry{ id: id?, x, y, comment: comment? }),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!(parse_num("42").unwrap(), 42);
        assert_eq!(parse_num("0x2A").unwrap(), 42);
        assert_eq!(parse_num("0x80FF00FF").unwrap(), 0x80FF00FF);
        assert_eq!(parse_num("0").unwrap(), 0);
    }

    #[test]
    fn hex_literal_only_needs_to_end_the_token() {
        assert_eq!(parse_num("id0x10").unwrap(), 16);
        assert_eq!(parse_num("0x0x12").unwrap(), 0x12);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = parse_num("bad").unwrap_err();
        assert_eq!(err.to_string(), "invalid number: 'bad'");
        assert!(parse_num("").is_err());
        assert!(parse_num("0x").is_err());
        assert!(parse_num("0x2a").is_err());
        assert!(parse_num("-1").is_err());
        assert!(parse_num("0x12 ").is_err());
    }

    #[test]
    fn rejects_numbers_wider_than_32_bits() {
        let err = parse_num("0x100000000").unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(parse_num("4294967296").is_err());
        assert_eq!(parse_num("4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn parses_colors() {
        assert_eq!(parse_color("0x80ff00ff").unwrap(), 0x80FF00FF);
        assert_eq!(parse_color("0x80FF00FF").unwrap(), 0x80FF00FF);
        assert_eq!(parse_color("255").unwrap(), 255);
        assert_eq!(parse_color("id0x10").unwrap_err().to_string(), "invalid color: 'id0x10'");
        assert!(parse_color("0x").is_err());
        assert!(parse_color("0xGG").is_err());
        assert!(parse_color("0x100000000").unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn blank_and_comment_lines() {
        assert!(is_blank_or_comment(""));
        assert!(is_blank_or_comment("   \t "));
        assert!(is_blank_or_comment("# header"));
        assert!(is_blank_or_comment("  #indented"));
        assert!(!is_blank_or_comment("0x0001\t0x00000000"));
    }

    #[test]
    fn color_entry_fields() {
        assert_eq!(parse_color_entry("0x0001\t0x11223344\t# Stone").unwrap(),
            ColorEntry{ id: "0x0001", color: Some("0x11223344"), comment: Some("# Stone") });
        assert_eq!(parse_color_entry("default\t0x80FF00FF").unwrap(),
            ColorEntry{ id: "default", color: Some("0x80FF00FF"), comment: None });
        assert_eq!(parse_color_entry("7").unwrap(),
            ColorEntry{ id: "7", color: None, comment: None });
    }

    #[test]
    fn color_entry_comment_keeps_extra_tabs() {
        let entry = parse_color_entry("1\t2\tone\ttwo").unwrap();
        assert_eq!(entry.comment, Some("one\ttwo"));
    }

    #[test]
    fn color_entry_with_empty_color() {
        let entry = parse_color_entry("1\t\t# only a comment").unwrap();
        assert_eq!(entry.color, None);
        assert_eq!(entry.comment, Some("# only a comment"));
    }

    #[test]
    fn name_entry_fields() {
        assert_eq!(parse_name_entry("0x0001\tStone\tignored").unwrap(),
            NameEntry{ id: "0x0001", name: Some("Stone") });
        assert_eq!(parse_name_entry("0x0002").unwrap(),
            NameEntry{ id: "0x0002", name: None });
    }

    #[test]
    fn strips_links_and_brackets() {
        assert_eq!(strip_wiki_links("| [[Stone (block)|Stone]] [x]").unwrap(), "| Stone x");
        assert_eq!(strip_wiki_links("[[Dirt]]").unwrap(), "Dirt");
        assert_eq!(strip_wiki_links("plain").unwrap(), "plain");
    }

    #[test]
    fn finds_wiki_rows() {
        let row = find_wiki_row("| {{dec-hex|17}} || Wood <br>").unwrap();
        assert_eq!(row, WikiRow{ number: "17", name: "Wood " });
        let row = find_wiki_row("| {{dec-hex|5}} || <sup>x</sup>").unwrap();
        assert_eq!(row, WikiRow{ number: "5", name: " " });
        assert!(find_wiki_row("| {{dec-hex|5}} ||<sup>x</sup>").is_none());
        assert!(find_wiki_row("| Header || Name").is_none());
    }

    #[test]
    fn name_list_entries() {
        assert_eq!(parse_name_list_entry("0x0001\tStone"), Some(("0x0001", "Stone")));
        assert_eq!(parse_name_list_entry("0x001\tStone"), None);
        assert_eq!(parse_name_list_entry("1\tStone"), None);
    }

    #[test]
    fn offset_specs() {
        assert_eq!(find_offset_spec("1,2"), Some(("1", "2")));
        assert_eq!(find_offset_spec("at 10, 3"), Some(("10", "3")));
        assert_eq!(find_offset_spec("4 5"), Some(("4", "5")));
        assert_eq!(find_offset_spec("x"), None);
        assert_eq!(find_offset_spec("12"), Some(("1", "2")));
        assert_eq!(find_offset_spec("123 x"), Some(("12", "3")));
        assert_eq!(find_offset_spec("7,"), None);
        assert_eq!(find_offset_spec("a 1, b 2"), None);
    }

    #[test]
    fn offset_entries() {
        assert_eq!(parse_offset_entry("0x0001\t1,0\t# Stone"),
            Some(OffsetEntry{ id: "0x0001", x: "1", y: "0", comment: "# Stone" }));
        assert_eq!(parse_offset_entry("0x0001\t1,0\tStone"), None);
        assert_eq!(parse_offset_entry("0x0001\t1 0\t# Stone"), None);
    }
}
