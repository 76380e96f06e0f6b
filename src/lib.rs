// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # cmblocks: SSOT compliance for AI-generated WordPress blocks
//!
//! An AI model answers a block request with one text response holding seven
//! files, each introduced by a `---` sentinel and a section name. cmblocks
//! turns that response into a [`ParsedBundle`] and holds it to the CM
//! block conventions:
//!
//! - **Extract** each section by name ([`section`])
//! - **Parse** `BLOCK_JSON` as JSON and collect the six sources ([`parse`])
//! - **Validate** twelve cross-file invariants ([`compliance::validate`])
//! - **Fix** the common violations deterministically ([`compliance::fix`])
//! - **Re-validate** and report what is left ([`report`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cmblocks::{Pipeline, CmBlocksConfig};
//!
//! let config = CmBlocksConfig::load_or_default(&std::env::current_dir()?)?;
//! let outcome = Pipeline::new(&config).run(&response_text)?;
//!
//! for warning in outcome.warnings() {
//!     eprintln!("warning: {}", warning);
//! }
//! outcome.bundle.write_to_dir(std::path::Path::new("cm-blocks"))?;
//! ```
//!
//! ## Sections
//!
//! | Marker                | File              |
//! |-----------------------|-------------------|
//! | `BLOCK_JSON`          | `block.json`      |
//! | `CONFIG_PHP`          | `config.php`      |
//! | `REGISTERING_PHP`     | `registering.php` |
//! | `PHP_RENDER_CALLBACK` | `render.php`      |
//! | `EDITOR_JS`           | `editor.js`       |
//! | `CENTRALIZED_JS`      | `centralized.js`  |
//! | `CENTRALIZED_CSS`     | `centralized.css` |
//!
//! ## Policy
//!
//! Violations are warnings by default: the pipeline logs them, records them
//! in the [`ComplianceReport`] and still returns the bundle. Missing sections
//! and unparseable metadata are always fatal. Set `pipeline.policy: strict`
//! in `.cmblocks.yaml` (or pass `--strict`) to fail on leftover violations.

pub mod bundle;
pub mod compliance;
pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod section;

pub use bundle::{parse_metadata, ParsedBundle};
pub use compliance::{
    auto_fix, validate_bundle, AppliedFix, FixOutcome, FixStep, Violation, ViolationList,
};
pub use config::{CmBlocksConfig, Conventions, PipelineConfig, Policy, CONFIG_FILE};
pub use error::{Error, Result};
pub use naming::BlockNames;
pub use parse::{parse_bundle, ParseOptions};
pub use pipeline::{parse_response, Pipeline, PipelineOutcome, Stage};
pub use report::{ComplianceReport, ReportStatus};
pub use section::{
    duplicate_sections, extract_section, split_sections, SectionName, SECTIONS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
