//! Bundle parsing: delimited response text to [`ParsedBundle`]
//!
//! Parsing only builds the bundle. The validate / fix / re-validate
//! sequence lives in [`crate::pipeline`].

use crate::bundle::{parse_metadata, ParsedBundle};
use crate::error::Result;
use crate::section::{extract_section, strip_code_fence, SectionName, SECTIONS};

/// Parsing options
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Strip Markdown code fences around section bodies
    pub strip_fences: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { strip_fences: true }
    }
}

/// Section bodies extracted from a response, before metadata parsing
#[derive(Debug, Clone)]
pub struct RawSections {
    bodies: [String; SECTIONS.len()],
}

impl RawSections {
    pub fn get(&self, name: SectionName) -> &str {
        &self.bodies[name as usize]
    }
}

/// Extract every registered section.
///
/// Sections are looked up in canonical order, so the first missing one is
/// the one reported.
pub fn extract_all(text: &str, options: ParseOptions) -> Result<RawSections> {
    let text = text.trim();
    let mut bodies: [String; SECTIONS.len()] = Default::default();
    for spec in SECTIONS.iter().filter(|spec| spec.required) {
        let body = extract_section(text, spec.name)?;
        bodies[spec.name as usize] = if options.strip_fences {
            strip_code_fence(&body)
        } else {
            body
        };
    }
    Ok(RawSections { bodies })
}

/// Build a bundle from extracted sections, parsing `BLOCK_JSON`
pub fn assemble(raw: RawSections) -> Result<ParsedBundle> {
    let metadata = parse_metadata(raw.get(SectionName::Metadata))?;
    let [
        _,
        config_source,
        registration_source,
        render_source,
        editor_script_source,
        universal_script_source,
        style_source,
    ] = raw.bodies;

    Ok(ParsedBundle {
        metadata,
        config_source,
        registration_source,
        render_source,
        editor_script_source,
        universal_script_source,
        style_source,
    })
}

/// Parse a delimited AI response into a bundle.
///
/// Fails when any section is missing or when `BLOCK_JSON` is not a JSON
/// object.
pub fn parse_bundle(text: &str, options: ParseOptions) -> Result<ParsedBundle> {
    assemble(extract_all(text, options)?)
}
