//! Load-order manifest text format.
//!
//! One entry per line. A trailing `/` marks a folder, `#` starts a comment
//! running to the end of the line, surrounding spaces are ignored and empty
//! lines are skipped. [`format`] prepends [`HEADER`], which [`parse`] then
//! drops like any other comment.

use scriptree_core::{LineEnding, ManifestEntry};

/// Decorative block written at the top of every manifest.
pub const HEADER: &[&str] = &[
    "#==============================================================================",
    "# Script load order",
    "#------------------------------------------------------------------------------",
    "# Scripts load top to bottom, one entry per line, without file extension.",
    "# An entry ending in \"/\" is a folder carrying its own list file.",
    "# Text after \"#\" is ignored, as are blank lines.",
    "# This header is regenerated on every export.",
    "#==============================================================================",
];

/// Parse manifest text into ordered entries.
pub fn parse(text: &str) -> Vec<ManifestEntry> {
    text.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ManifestEntry> {
    let line: String = line
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect();
    let line = line.trim_matches(' ');
    let line = match line.find('#') {
        Some(hash) => line[..hash].trim_end_matches(' '),
        None => line,
    };
    if line.is_empty() {
        return None;
    }
    match line.strip_suffix('/') {
        Some(folder) => Some(ManifestEntry::Folder(folder.to_string())),
        None => Some(ManifestEntry::File(line.to_string())),
    }
}

/// Format entries as manifest text, header included.
pub fn format(entries: &[ManifestEntry], line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut out = String::new();
    for line in HEADER {
        out.push_str(line);
        out.push_str(eol);
    }
    for entry in entries {
        match entry {
            ManifestEntry::File(name) => out.push_str(name),
            ManifestEntry::Folder(name) => {
                out.push_str(name);
                out.push('/');
            }
        }
        out.push_str(eol);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ManifestEntry {
        ManifestEntry::File(name.to_string())
    }

    fn folder(name: &str) -> ManifestEntry {
        ManifestEntry::Folder(name.to_string())
    }

    #[test]
    fn strips_comments_and_whitespace() {
        assert_eq!(parse(" Name # comment \r\n"), vec![file("Name")]);
    }

    #[test]
    fn comment_only_and_empty_text_yield_nothing() {
        assert!(parse("#only a comment").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn tabs_are_removed_inside_names() {
        assert_eq!(parse("\tScene\t_Map\n"), vec![file("Scene_Map")]);
    }

    #[test]
    fn trailing_slash_marks_folder() {
        assert_eq!(
            parse("Base Windows/\nMain\n"),
            vec![folder("Base Windows"), file("Main")]
        );
    }

    #[test]
    fn header_is_ignored_on_parse() {
        let text = format(&[folder("Intro"), file("Main")], LineEnding::Crlf);
        assert!(text.ends_with("Intro/\r\nMain\r\n"));
        assert_eq!(parse(&text), vec![folder("Intro"), file("Main")]);
    }

    #[test]
    fn format_uses_configured_line_ending() {
        let text = format(&[file("A")], LineEnding::Lf);
        assert!(!text.contains('\r'));
        assert!(text.starts_with(HEADER[0]));
        assert!(text.ends_with("\nA\n"));
    }
}
