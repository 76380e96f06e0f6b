//! cmblocks project configuration
//!
//! Handles loading of `.cmblocks.yaml`, which carries the naming
//! conventions enforced by the compliance rules and the pipeline policy.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = ".cmblocks.yaml";

/// Root configuration (`.cmblocks.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CmBlocksConfig {
    /// Schema version for migrations
    pub version: u32,

    /// Naming conventions the generated bundle must follow
    #[serde(default)]
    pub conventions: Conventions,

    /// Pipeline behaviour
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for CmBlocksConfig {
    fn default() -> Self {
        Self {
            version: 1,
            conventions: Conventions::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Naming conventions shared by the validator and the auto-fixer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Conventions {
    /// Block namespace, without the trailing slash (`cm` -> `cm/my-block`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Required prefix of the block title
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,

    /// Required block category
    #[serde(default = "default_category")]
    pub category: String,

    /// Keyword that must lead the keyword list
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// CSS class prefix, without the leading dot
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,

    /// PHP namespace root for render callbacks
    #[serde(default = "default_php_namespace")]
    pub php_namespace: String,

    /// Theme directory that holds the block folders
    #[serde(default = "default_blocks_dir")]
    pub blocks_dir: String,
}

fn default_namespace() -> String {
    "cm".to_string()
}

fn default_title_prefix() -> String {
    "CM ".to_string()
}

fn default_category() -> String {
    "cm-blocks".to_string()
}

fn default_keyword() -> String {
    "cm".to_string()
}

fn default_class_prefix() -> String {
    "cm-".to_string()
}

fn default_php_namespace() -> String {
    "CompuMatter\\Blocks".to_string()
}

fn default_blocks_dir() -> String {
    "cm-blocks".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            title_prefix: default_title_prefix(),
            category: default_category(),
            keyword: default_keyword(),
            class_prefix: default_class_prefix(),
            php_namespace: default_php_namespace(),
            blocks_dir: default_blocks_dir(),
        }
    }
}

impl Conventions {
    /// Identifier prefix, e.g. `cm/`
    pub fn identifier_prefix(&self) -> String {
        format!("{}/", self.namespace)
    }

    /// Selector prefix, e.g. `.cm-`
    pub fn selector_prefix(&self) -> String {
        format!(".{}", self.class_prefix)
    }
}

/// What to do with violations that survive the auto-fix pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Report and continue
    #[default]
    Warn,
    /// Fail the request
    Strict,
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipelineConfig {
    /// Violation policy after auto-fix
    #[serde(default)]
    pub policy: Policy,

    /// Strip Markdown code fences wrapped around section bodies
    #[serde(default = "default_true")]
    pub strip_fences: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Warn,
            strip_fences: true,
        }
    }
}

impl CmBlocksConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: CmBlocksConfig = serde_norway::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;

        if config.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported {} version: {}",
                CONFIG_FILE, config.version
            )));
        }

        Ok(config)
    }

    /// Load `.cmblocks.yaml` from a directory, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_file = dir.join(CONFIG_FILE);
        if !config_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_file).map_err(Error::Io)?;
        Self::from_yaml(&content).map(Some)
    }

    /// Load from a directory, falling back to defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        Ok(Self::load_from_dir(dir)?.unwrap_or_default())
    }

    /// Serialize to YAML with a header comment
    pub fn to_yaml(&self) -> Result<String> {
        let mut content = String::from("# cmblocks configuration\n\n");
        content.push_str(&serde_norway::to_string(self)?);
        Ok(content)
    }
}
