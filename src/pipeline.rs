//! Pipeline driver
//!
//! Runs a response through extraction, parsing, validation, auto-fix and
//! re-validation:
//!
//! ```text
//! Extracted -> Parsed -> Validated -> Fixed -> Revalidated -> Done
//! ```
//!
//! Under the default warn-only policy the pipeline never branches on the
//! validation outcome. [`Policy::Strict`] turns leftover violations into
//! [`Error::Compliance`].

use crate::bundle::ParsedBundle;
use crate::compliance::{auto_fix, validate_bundle, FixOutcome};
use crate::config::{CmBlocksConfig, Conventions, Policy};
use crate::error::{Error, Result};
use crate::parse::{assemble, extract_all, ParseOptions};
use crate::report::{log_violations, ComplianceReport};
use crate::section::duplicate_sections;

/// Pipeline state, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracted,
    Parsed,
    Validated,
    Fixed,
    Revalidated,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Extracted => "extracted",
            Stage::Parsed => "parsed",
            Stage::Validated => "validated",
            Stage::Fixed => "fixed",
            Stage::Revalidated => "revalidated",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "pipeline stage");
}

/// Final bundle plus the report of how it got there
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub bundle: ParsedBundle,
    pub report: ComplianceReport,
}

impl PipelineOutcome {
    /// Messages of the violations left after auto-fix
    pub fn warnings(&self) -> Vec<String> {
        self.report.remaining()
    }
}

/// Configured pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    conventions: Conventions,
    policy: Policy,
    parse_options: ParseOptions,
    apply_fixes: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&CmBlocksConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: &CmBlocksConfig) -> Self {
        Self {
            conventions: config.conventions.clone(),
            policy: config.pipeline.policy,
            parse_options: ParseOptions {
                strip_fences: config.pipeline.strip_fences,
            },
            apply_fixes: true,
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate only; the bundle is returned as parsed
    pub fn without_fixes(mut self) -> Self {
        self.apply_fixes = false;
        self
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Run the whole pipeline over a delimited response.
    ///
    /// Missing sections and unparseable metadata are fatal. Violations are
    /// logged and reported; they only fail the run under the strict policy.
    pub fn run(&self, text: &str) -> Result<PipelineOutcome> {
        let raw = extract_all(text, self.parse_options)?;
        for name in duplicate_sections(text) {
            tracing::warn!(
                section = name.marker(),
                "section appears more than once; using the first occurrence"
            );
        }
        enter(Stage::Extracted);

        let bundle = assemble(raw)?;
        enter(Stage::Parsed);

        self.post_process(bundle, text)
    }

    /// Validate and fix an already-parsed bundle, e.g. one loaded from disk
    pub fn run_bundle(&self, bundle: ParsedBundle) -> Result<PipelineOutcome> {
        let input = bundle.to_response_text()?;
        self.post_process(bundle, &input)
    }

    fn post_process(&self, bundle: ParsedBundle, input: &str) -> Result<PipelineOutcome> {
        let before = validate_bundle(&bundle, &self.conventions);
        log_violations("validate", &before);
        enter(Stage::Validated);

        let FixOutcome { bundle, applied } = if self.apply_fixes {
            auto_fix(bundle, &self.conventions)
        } else {
            FixOutcome {
                bundle,
                applied: Vec::new(),
            }
        };
        if !applied.is_empty() {
            tracing::info!(fixes = applied.len(), "applied auto-fixes");
        }
        enter(Stage::Fixed);

        let after = validate_bundle(&bundle, &self.conventions);
        log_violations("revalidate", &after);
        enter(Stage::Revalidated);

        let report = ComplianceReport::new(bundle.identifier(), input, before, applied, after);
        enter(Stage::Done);

        if self.policy == Policy::Strict && !report.passed() {
            return Err(Error::Compliance {
                violations: report.remaining(),
            });
        }

        Ok(PipelineOutcome { bundle, report })
    }
}

/// Parse a response with default settings: warn-only, fences stripped,
/// auto-fix applied
pub fn parse_response(text: &str) -> Result<ParsedBundle> {
    Pipeline::default().run(text).map(|outcome| outcome.bundle)
}
