//! SSOT compliance: validation and deterministic auto-fix
//!
//! - `validate`: twelve cross-file invariants, reported as [`Violation`]s
//! - `fix`: ordered, idempotent rewrites for the common violations
//!
//! Both halves share the text patterns in this module so that a fix always
//! satisfies the predicate that flagged it.

pub mod fix;
pub mod validate;

pub use fix::{auto_fix, AppliedFix, FixOutcome, FixStep};
pub use validate::{validate_bundle, REQUIRED_CONFIG_METHODS};

use crate::section::SectionName;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A broken invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// Stable rule code, e.g. `SSOT004`
    pub code: String,
    /// File the violation was found in
    pub section: SectionName,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Ordered result of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Messages only, in order
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }

    /// Rule codes only, in order
    pub fn codes(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.code.as_str()).collect()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.0.iter().any(|v| v.code == code)
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compiled patterns shared by validation and fixing
pub(crate) struct Patterns {
    /// `require_once __DIR__ . '/config.php'` and friends
    pub config_include: Regex,
    /// `function name(`
    pub function_def: Regex,
    /// Opening of an immediately-invoked function expression
    pub iife_open: Regex,
    /// `'BLOCK_NAME' => '...'`
    pub block_name_const: Regex,
    /// `register_block_type( '...'`
    pub register_block_type: Regex,
    /// Everything up to the first `/**` after the opening tag
    pub first_block_comment: Regex,
    /// A `namespace Foo\Bar;` declaration
    pub namespace_decl: Regex,
    /// `esc_attr( $wrapper_classes )`
    pub raw_wrapper_classes: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn init_patterns() -> Patterns {
    let compile = |pattern: &str| Regex::new(pattern).expect("Failed to compile built-in pattern");

    Patterns {
        config_include: compile(
            r#"(?:require|include)(?:_once)?\s*\(?\s*(?:__DIR__\s*\.\s*['"]/config\.php['"]|plugin_dir_path\(\s*__FILE__\s*\)\s*\.\s*['"]config\.php['"])"#,
        ),
        function_def: compile(r"\bfunction\s+([A-Za-z_][A-Za-z0-9_]*)\s*\("),
        iife_open: compile(
            r"^(?:\(\s*(?:async\s+)?function\b[\s\w$]*\(|\(\s*(?:async\s*)?\(\s*\)\s*=>|[!+~]\s*function\b[\s\w$]*\()",
        ),
        block_name_const: compile(r#"['"]BLOCK_NAME['"]\s*=>\s*['"][^'"]*['"]"#),
        register_block_type: compile(r#"register_block_type\(\s*['"][^'"]*['"]"#),
        first_block_comment: compile(r"(<\?php[\s\S]*?)(\s*/\*\*)"),
        namespace_decl: compile(r"(?m)^\s*namespace\s+[A-Za-z_\\]"),
        raw_wrapper_classes: compile(r"esc_attr\(\s*\$wrapper_classes\s*\)"),
    }
}

pub(crate) fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(init_patterns)
}

/// True when a PHP source pulls in the sibling `config.php`
pub(crate) fn includes_config(source: &str) -> bool {
    patterns().config_include.is_match(source)
}

/// Skip leading whitespace and comments
pub(crate) fn strip_leading_comments(mut source: &str) -> &str {
    loop {
        source = source.trim_start();
        if let Some(rest) = source.strip_prefix("//") {
            source = rest.split_once('\n').map(|(_, tail)| tail).unwrap_or("");
        } else if let Some(rest) = source.strip_prefix("/*") {
            source = rest.split_once("*/").map(|(_, tail)| tail).unwrap_or("");
        } else {
            return source;
        }
    }
}
