//! Text scanning helpers shared by the rules
//!
//! Configuration text is never parsed into a syntax tree. Rules locate
//! declaration headers with regexes and cut out an approximate block body
//! (see [`blocks`]).

use crate::models::ConfigurationBundle;
use regex::Regex;
use std::sync::OnceLock;

pub const MAIN_TF: &str = "main.tf";
pub const VARIABLES_TF: &str = "variables.tf";
pub const OUTPUTS_TF: &str = "outputs.tf";
pub const README_MD: &str = "README.md";

/// Canonical module layout, in reporting order
pub const STANDARD_FILES: [&str; 4] = [MAIN_TF, VARIABLES_TF, OUTPUTS_TF, README_MD];

/// Map a caller-supplied file name onto its canonical role.
///
/// Strips a trailing `.tf`, lower-cases, then maps the known aliases.
/// Names that are not an alias come back unchanged (not lower-cased).
pub fn normalize_file_name(name: &str) -> String {
    let base = name.strip_suffix(".tf").unwrap_or(name).to_lowercase();
    match base.as_str() {
        "main" | "resources" => MAIN_TF.to_string(),
        "variables" | "vars" => VARIABLES_TF.to_string(),
        "outputs" | "output" => OUTPUTS_TF.to_string(),
        "readme" | "readme.md" => README_MD.to_string(),
        _ => name.to_string(),
    }
}

/// Whether any file in the bundle fills the given canonical role
pub fn has_role(bundle: &ConfigurationBundle, role: &str) -> bool {
    bundle.names().any(|name| normalize_file_name(name) == role)
}

/// Files holding configuration-language text
pub fn is_config_file(name: &str) -> bool {
    name.ends_with(".tf") || normalize_file_name(name).ends_with(".tf")
}

/// Lower-cased normalized name, used for the variables/outputs file checks
pub fn role_key(name: &str) -> String {
    normalize_file_name(name).to_lowercase()
}

/// Configuration files of the bundle, in name order
pub fn config_files(bundle: &ConfigurationBundle) -> impl Iterator<Item = (&str, &str)> {
    bundle.iter().filter(|(name, _)| is_config_file(name))
}

/// Number of lines, counted as newline separators plus one
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// 1-based line containing the byte offset
pub fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}

/// A declaration block cut out of configuration text
#[derive(Debug, Clone)]
pub struct Block<'t> {
    /// Quoted labels of the header, in order
    pub labels: Vec<&'t str>,
    /// Header through the closing line
    pub text: &'t str,
    /// Byte offset of the header in the scanned text
    pub start: usize,
    /// 1-based line of the header
    pub line: usize,
}

/// Find every block whose header matches `header`.
///
/// `header` must end at the opening `{` and capture the labels. The body
/// runs to the first later line that is exactly `}` (column zero, nothing
/// else but the line ending), or to the end of the text. Indented closers of
/// nested sub-blocks stay inside the body. Nested braces are not balanced,
/// so a nested sub-block closed at column zero ends its parent early. A
/// header whose own line already closes the brace is a one-line block.
pub fn blocks<'t>(header: &Regex, text: &'t str) -> Vec<Block<'t>> {
    header
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let labels = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect();
            let end = block_end(text, whole.end());
            Some(Block {
                labels,
                text: &text[whole.start()..end],
                start: whole.start(),
                line: line_of(text, whole.start()),
            })
        })
        .collect()
}

fn block_end(text: &str, open: usize) -> usize {
    let rest = &text[open..];
    let header_tail = rest.find('\n').map_or(rest, |i| &rest[..i]);
    if header_tail.contains('}') {
        return open + header_tail.len();
    }

    let mut offset = open + header_tail.len();
    for line in text[offset..].split_inclusive('\n') {
        offset += line.len();
        if line.trim_end_matches(['\r', '\n']) == "}" {
            return offset;
        }
    }
    text.len()
}

static VARIABLE_HEADER: OnceLock<Regex> = OnceLock::new();
static OUTPUT_HEADER: OnceLock<Regex> = OnceLock::new();
static RESOURCE_HEADER: OnceLock<Regex> = OnceLock::new();
static MODULE_HEADER: OnceLock<Regex> = OnceLock::new();
static DESCRIPTION: OnceLock<Regex> = OnceLock::new();

pub fn variable_header() -> &'static Regex {
    VARIABLE_HEADER.get_or_init(|| Regex::new(r#"(?m)^[ \t]*variable\s+"([^"]+)"\s*\{"#).unwrap())
}

pub fn output_header() -> &'static Regex {
    OUTPUT_HEADER.get_or_init(|| Regex::new(r#"(?m)^[ \t]*output\s+"([^"]+)"\s*\{"#).unwrap())
}

pub fn resource_header() -> &'static Regex {
    RESOURCE_HEADER.get_or_init(|| {
        Regex::new(r#"(?m)^[ \t]*resource\s+"([^"]+)"\s+"([^"]+)"\s*\{"#).unwrap()
    })
}

pub fn module_header() -> &'static Regex {
    MODULE_HEADER.get_or_init(|| Regex::new(r#"(?m)^[ \t]*module\s+"([^"]+)"\s*\{"#).unwrap())
}

pub fn description_attr() -> &'static Regex {
    DESCRIPTION.get_or_init(|| Regex::new(r#"description\s*=\s*"[^"]+""#).unwrap())
}
