//! The structured, seven-file representation of one generated block

use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::naming::BlockNames;
use crate::section::{SectionName, SENTINEL};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Component, Path, PathBuf};

/// A parsed block bundle: metadata plus six raw sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBundle {
    /// `block.json`, key order preserved
    pub metadata: Map<String, Value>,
    pub config_source: String,
    pub registration_source: String,
    pub render_source: String,
    pub editor_script_source: String,
    pub universal_script_source: String,
    pub style_source: String,
}

impl ParsedBundle {
    /// `metadata.name`, or `""` when missing or not a string
    pub fn identifier(&self) -> &str {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Names derived from the identifier
    pub fn names(&self, conventions: &Conventions) -> BlockNames {
        BlockNames::derive(self.identifier(), conventions)
    }

    /// Raw source of a non-metadata section
    pub fn source(&self, name: SectionName) -> Option<&str> {
        let source = match name {
            SectionName::Metadata => return None,
            SectionName::Config => &self.config_source,
            SectionName::Registration => &self.registration_source,
            SectionName::Render => &self.render_source,
            SectionName::EditorScript => &self.editor_script_source,
            SectionName::UniversalScript => &self.universal_script_source,
            SectionName::Style => &self.style_source,
        };
        Some(source)
    }

    /// Metadata re-serialized as formatted JSON
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.metadata)?)
    }

    /// `(file name, contents)` for every section, in canonical order
    pub fn files(&self) -> Result<Vec<(&'static str, String)>> {
        SectionName::all()
            .map(|name| -> Result<(&'static str, String)> {
                let contents = match self.source(name) {
                    Some(source) => source.to_string(),
                    None => self.metadata_json()?,
                };
                Ok((name.file_name(), contents))
            })
            .collect()
    }

    /// Re-compose the delimited response text
    pub fn to_response_text(&self) -> Result<String> {
        let mut text = String::new();
        for (name, (_, contents)) in SectionName::all().zip(self.files()?) {
            text.push_str(SENTINEL);
            text.push('\n');
            text.push_str(name.marker());
            text.push('\n');
            text.push_str(contents.trim());
            text.push('\n');
        }
        text.push_str(SENTINEL);
        text.push('\n');
        Ok(text)
    }

    /// Write all seven files into `root/<identifier with '/' as '-'>/`.
    ///
    /// Returns the directory written to.
    pub fn write_to_dir(&self, root: &Path) -> Result<PathBuf> {
        let dir_name = self.identifier().replace('/', "-");
        if dir_name.is_empty() {
            return Err(Error::Other(
                "Cannot write bundle without a block name".to_string(),
            ));
        }

        // The directory must be a single plain component under `root`
        let mut components = Path::new(&dir_name).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_plain || dir_name.contains('\\') {
            return Err(Error::Other(format!(
                "Block name {:?} is not a valid directory name",
                self.identifier()
            )));
        }

        let dir = root.join(dir_name);
        self.write_files(&dir)?;
        Ok(dir)
    }

    /// Write all seven files directly into `dir`, overwriting existing ones
    pub fn write_files(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(Error::Io)?;
        for (file_name, contents) in self.files()? {
            std::fs::write(dir.join(file_name), contents).map_err(Error::Io)?;
        }

        tracing::info!(dir = %dir.display(), "bundle written");
        Ok(())
    }

    /// Read a bundle back from a block directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let read = |name: SectionName| -> Result<String> {
            let path = dir.join(name.file_name());
            std::fs::read_to_string(&path).map_err(|e| {
                Error::Other(format!("Failed to read {}: {}", path.display(), e))
            })
        };

        let metadata_text = read(SectionName::Metadata)?;
        Ok(Self {
            metadata: parse_metadata(&metadata_text)?,
            config_source: read(SectionName::Config)?,
            registration_source: read(SectionName::Registration)?,
            render_source: read(SectionName::Render)?,
            editor_script_source: read(SectionName::EditorScript)?,
            universal_script_source: read(SectionName::UniversalScript)?,
            style_source: read(SectionName::Style)?,
        })
    }
}

/// Parse the metadata document into a JSON object
pub fn parse_metadata(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).map_err(Error::MetadataParse)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::MetadataShape(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
