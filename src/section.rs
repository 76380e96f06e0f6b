//! Section extraction
//!
//! AI responses carry one section per output file, delimited like this:
//!
//! ```text
//! ---
//! BLOCK_JSON
//! { ... }
//! ---
//! CONFIG_PHP
//! <?php ...
//! ---
//! ```
//!
//! Sections may come in any order. A sentinel with no name after it ends
//! the stream.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sentinel line separating sections
pub const SENTINEL: &str = "---";

/// One of the seven files of a block bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SectionName {
    #[serde(rename = "block.json")]
    Metadata,
    #[serde(rename = "config.php")]
    Config,
    #[serde(rename = "registering.php")]
    Registration,
    #[serde(rename = "render.php")]
    Render,
    #[serde(rename = "editor.js")]
    EditorScript,
    #[serde(rename = "centralized.js")]
    UniversalScript,
    #[serde(rename = "centralized.css")]
    Style,
}

/// Registered description of a section kind
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub name: SectionName,
    /// Marker line used in the delimited response
    pub marker: &'static str,
    /// File the section is written to
    pub file_name: &'static str,
    pub required: bool,
}

/// Every section kind, in canonical (write) order
pub const SECTIONS: [SectionSpec; 7] = [
    SectionSpec {
        name: SectionName::Metadata,
        marker: "BLOCK_JSON",
        file_name: "block.json",
        required: true,
    },
    SectionSpec {
        name: SectionName::Config,
        marker: "CONFIG_PHP",
        file_name: "config.php",
        required: true,
    },
    SectionSpec {
        name: SectionName::Registration,
        marker: "REGISTERING_PHP",
        file_name: "registering.php",
        required: true,
    },
    SectionSpec {
        name: SectionName::Render,
        marker: "PHP_RENDER_CALLBACK",
        file_name: "render.php",
        required: true,
    },
    SectionSpec {
        name: SectionName::EditorScript,
        marker: "EDITOR_JS",
        file_name: "editor.js",
        required: true,
    },
    SectionSpec {
        name: SectionName::UniversalScript,
        marker: "CENTRALIZED_JS",
        file_name: "centralized.js",
        required: true,
    },
    SectionSpec {
        name: SectionName::Style,
        marker: "CENTRALIZED_CSS",
        file_name: "centralized.css",
        required: true,
    },
];

impl SectionName {
    /// All section names in canonical order
    pub fn all() -> impl Iterator<Item = SectionName> {
        SECTIONS.iter().map(|s| s.name)
    }

    pub fn spec(self) -> &'static SectionSpec {
        // SECTIONS is indexed by declaration order
        &SECTIONS[self as usize]
    }

    pub fn marker(self) -> &'static str {
        self.spec().marker
    }

    pub fn file_name(self) -> &'static str {
        self.spec().file_name
    }

    /// Look up a section by its marker line
    pub fn from_marker(marker: &str) -> Option<SectionName> {
        SECTIONS
            .iter()
            .find(|s| s.marker == marker.trim())
            .map(|s| s.name)
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// What a single line of the response means to the extractor
enum Line<'a> {
    /// `---` on its own
    Sentinel,
    /// `--- NAME` on one line
    SentinelWithName(&'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    match trimmed.strip_prefix(SENTINEL) {
        Some("") => Line::Sentinel,
        Some(rest) if rest.starts_with(char::is_whitespace) => {
            Line::SentinelWithName(rest.trim())
        }
        // `---NAME` with no gap, for registered markers only
        Some(rest) if SectionName::from_marker(rest).is_some() => Line::SentinelWithName(rest),
        _ => Line::Other,
    }
}

/// Locate the body of the first section named `marker`.
///
/// Returns the byte range of the body, or `None` if the marker never
/// follows a sentinel.
fn find_body(text: &str, marker: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    let mut lines = Vec::new();
    for line in text.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    let mut start = None;
    let mut i = 0;
    while i < lines.len() {
        let (line_start, line) = lines[i];
        match classify(line) {
            Line::SentinelWithName(name) if name == marker => {
                start = Some(line_start + line.len());
                break;
            }
            Line::Sentinel => {
                // Blank lines may sit between the sentinel and the name
                let mut j = i + 1;
                while j < lines.len() && lines[j].1.trim().is_empty() {
                    j += 1;
                }
                if let Some(&(name_start, name_line)) = lines.get(j) {
                    if name_line.trim() == marker {
                        start = Some(name_start + name_line.len());
                        break;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    let start = start?;
    let end = lines
        .iter()
        .find(|(line_start, line)| {
            *line_start >= start && !matches!(classify(line), Line::Other)
        })
        .map(|(line_start, _)| *line_start)
        .unwrap_or(text.len());

    Some((start, end))
}

/// Extract the trimmed body of one section.
///
/// Fails with [`Error::SectionNotFound`] when the section is absent. When a
/// name appears twice the first occurrence wins.
pub fn extract_section(text: &str, name: SectionName) -> Result<String> {
    let marker = name.marker();
    find_body(text, marker)
        .map(|(start, end)| text[start..end].trim().to_string())
        .ok_or(Error::SectionNotFound { section: marker })
}

/// Every recognised section in input order.
///
/// Unknown names are skipped; repeated names are all returned.
pub fn split_sections(text: &str) -> Vec<(SectionName, String)> {
    let mut sections = Vec::new();
    let mut current: Option<(SectionName, String)> = None;
    let mut awaiting_name = false;

    for line in text.lines() {
        match classify(line) {
            Line::Sentinel => {
                sections.extend(current.take());
                awaiting_name = true;
            }
            Line::SentinelWithName(name) => {
                sections.extend(current.take());
                awaiting_name = false;
                current = SectionName::from_marker(name).map(|n| (n, String::new()));
            }
            Line::Other if awaiting_name => {
                if line.trim().is_empty() {
                    continue;
                }
                awaiting_name = false;
                current = SectionName::from_marker(line).map(|n| (n, String::new()));
            }
            Line::Other => {
                if let Some((_, body)) = current.as_mut() {
                    body.push_str(line);
                    body.push('\n');
                }
            }
        }
    }
    sections.extend(current);

    sections
        .into_iter()
        .map(|(name, body)| (name, body.trim().to_string()))
        .collect()
}

/// Section names that appear more than once, in order of first repeat.
///
/// Only the first occurrence of each is used by [`extract_section`].
pub fn duplicate_sections(text: &str) -> Vec<SectionName> {
    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for (name, _) in split_sections(text) {
        if seen.contains(&name) {
            if !duplicates.contains(&name) {
                duplicates.push(name);
            }
        } else {
            seen.push(name);
        }
    }
    duplicates
}

/// Remove a Markdown code fence wrapped around a section body.
///
/// ```` ```json\n{...}\n``` ```` becomes `{...}`. Bodies without a leading
/// fence are returned trimmed but otherwise unchanged.
pub fn strip_code_fence(body: &str) -> String {
    let trimmed = body.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the info string (`json`, `php`, ...) on the opening line
    let inner = match after_open.find('\n') {
        Some(idx) => &after_open[idx + 1..],
        None => "",
    };
    inner
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(inner)
        .trim()
        .to_string()
}
