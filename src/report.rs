//! Compliance reports
//!
//! A [`ComplianceReport`] records one pipeline run: the violations found
//! before auto-fix, the fixes applied, and what remains afterwards. Reports
//! serialize to JSON for tooling and render to text through an embedded
//! MiniJinja template.

use crate::compliance::{AppliedFix, ViolationList};
use crate::error::Result;
use chrono::{DateTime, Utc};
use minijinja::{context, Environment};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

const REPORT_TEMPLATE: &str = include_str!("../templates/report.jinja");

/// Log target for compliance findings
pub const LOG_TARGET: &str = "cmblocks::compliance";

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// No violations at any stage
    Clean,
    /// Violations were found and auto-fix resolved all of them
    Fixed,
    /// Violations remain after auto-fix
    Failed,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReportStatus::Clean => "clean",
            ReportStatus::Fixed => "fixed",
            ReportStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Record of one validate / fix / re-validate run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    /// Block identifier, empty when the metadata has none
    pub block: String,
    /// SHA256 of the input, hex encoded
    pub input_digest: String,
    #[schemars(with = "String")]
    pub generated_at: DateTime<Utc>,
    pub status: ReportStatus,
    /// Violations found on the parsed bundle
    pub before: ViolationList,
    /// Fixes that changed the bundle, in application order
    pub fixes: Vec<AppliedFix>,
    /// Violations left on the fixed bundle
    pub after: ViolationList,
    /// cmblocks version that produced the report
    pub tool_version: String,
}

impl ComplianceReport {
    pub fn new(
        block: impl Into<String>,
        input: &str,
        before: ViolationList,
        fixes: Vec<AppliedFix>,
        after: ViolationList,
    ) -> Self {
        let status = if !after.is_empty() {
            ReportStatus::Failed
        } else if before.is_empty() {
            ReportStatus::Clean
        } else {
            ReportStatus::Fixed
        };

        Self {
            block: block.into(),
            input_digest: digest(input),
            generated_at: Utc::now(),
            status,
            before,
            fixes,
            after,
            tool_version: crate::VERSION.to_string(),
        }
    }

    /// True when nothing remains after auto-fix
    pub fn passed(&self) -> bool {
        self.after.is_empty()
    }

    /// Messages of the violations that survived auto-fix
    pub fn remaining(&self) -> Vec<String> {
        self.after.messages()
    }

    /// Pretty-printed JSON form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable form. The timestamp is left out so that the text is
    /// stable across runs on the same input.
    pub fn render_text(&self) -> Result<String> {
        let fixes: Vec<_> = self
            .fixes
            .iter()
            .map(|f| {
                context! {
                    number => f.step.number(),
                    description => &f.description,
                }
            })
            .collect();

        let template = engine().get_template("report.jinja")?;
        let text = template.render(context! {
            block => &self.block,
            input_digest => &self.input_digest,
            status => self.status.to_string(),
            before => &self.before,
            fixes => fixes,
            after => &self.after,
        })?;
        Ok(text)
    }
}

/// SHA256 of a string, hex encoded
pub fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Emit one log event per violation, or a single pass event
pub fn log_violations(stage: &str, violations: &ViolationList) {
    if violations.is_empty() {
        tracing::info!(target: LOG_TARGET, stage, "no SSOT violations");
        return;
    }
    for violation in violations {
        tracing::warn!(
            target: LOG_TARGET,
            stage,
            code = %violation.code,
            section = %violation.section,
            "{}",
            violation.message
        );
    }
}

/// Report template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template("report.jinja", REPORT_TEMPLATE)
        .expect("Failed to load report template");
    env
}

fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}
