use crate::types::Result;
use regex::Regex;

/// Matches `### <name>` plus the whitespace that follows it
pub fn build_section_heading_pattern(name: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"### {}\s+", regex::escape(name)))?)
}

/// Matches a `## <version>` heading for the raw version token only
pub fn build_version_heading_pattern(version: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"(?m)^## {}(?:\s|$)",
        regex::escape(version)
    ))?)
}

/// Returns the trimmed text between `heading` and the first `end` match.
///
/// The block holds at least one character, so an `end` match starting right
/// after the heading is skipped. Without an `end` match the block runs to the
/// end of `text`.
pub fn extract_block<'a>(text: &'a str, heading: &Regex, end: &Regex) -> Option<&'a str> {
    let start = heading.find(text)?.end();
    let rest = &text[start..];
    let first_len = rest.chars().next()?.len_utf8();

    let stop = end
        .find_at(rest, first_len)
        .map_or(rest.len(), |m| m.start());

    Some(rest[..stop].trim())
}
