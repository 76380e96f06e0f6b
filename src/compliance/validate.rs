//! Bundle validation - detect SSOT convention violations
//!
//! Checks, in this order:
//! - block.json: namespace, title, category, keywords, isExample, asset lists
//! - config.php: derived config class and its eight required methods
//! - registering.php: config include, `wp_localize_script`, `filemtime()`
//! - editor.js: IIFE wrapper, client-global config
//! - centralized.js: no block registration, client-global config
//! - render.php: config include, config class calls
//! - centralized.css: class prefix
//!
//! Every check runs; nothing short-circuits. Rule codes are fixed so the
//! output is reproducible.

use super::{includes_config, patterns, strip_leading_comments, Violation, ViolationList};
use crate::bundle::ParsedBundle;
use crate::config::Conventions;
use crate::naming::BlockNames;
use crate::section::SectionName;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Methods every config class must define, with their rule codes
pub const REQUIRED_CONFIG_METHODS: [(&str, &str); 8] = [
    ("SSOT009", "get_defaults"),
    ("SSOT010", "get_asset_handles"),
    ("SSOT011", "get_file_paths"),
    ("SSOT012", "sanitize_attributes"),
    ("SSOT013", "get_enhanced_wrapper_classes"),
    ("SSOT014", "build_global_css_properties"),
    ("SSOT015", "get_javascript_constants"),
    ("SSOT016", "get_css_selectors"),
];

/// Validate a bundle against the SSOT conventions
pub fn validate_bundle(bundle: &ParsedBundle, conventions: &Conventions) -> ViolationList {
    let names = bundle.names(conventions);
    let mut violations = ViolationList::default();

    // 1. block.json
    check_metadata(&bundle.metadata, conventions, &mut violations);

    // 2. config.php
    check_config(&bundle.config_source, conventions, &names, &mut violations);

    // 3. registering.php
    check_registration(&bundle.registration_source, &mut violations);

    // 4. editor.js
    check_editor_script(
        &bundle.editor_script_source,
        conventions,
        &names,
        &mut violations,
    );

    // 5. centralized.js
    check_universal_script(
        &bundle.universal_script_source,
        conventions,
        &names,
        &mut violations,
    );

    // 6. render.php
    check_render(&bundle.render_source, conventions, &names, &mut violations);

    // 7. centralized.css
    if !bundle.style_source.contains(&conventions.selector_prefix()) {
        report(
            &mut violations,
            "SSOT026",
            SectionName::Style,
            format!(
                "centralized.css must use {} class prefixes",
                conventions.selector_prefix()
            ),
        );
    }

    violations
}

fn report(violations: &mut ViolationList, code: &str, section: SectionName, message: String) {
    violations.push(Violation {
        code: code.to_string(),
        section,
        message,
    });
}

fn check_metadata(
    metadata: &Map<String, Value>,
    conventions: &Conventions,
    violations: &mut ViolationList,
) {
    let text = |key: &str| string_field(metadata, key);
    let prefix = conventions.identifier_prefix();

    if !text("name").is_some_and(|name| name.starts_with(&prefix)) {
        report(
            violations,
            "SSOT001",
            SectionName::Metadata,
            format!(
                "Block name must use {} namespace (e.g., \"{}my-block\")",
                prefix, prefix
            ),
        );
    }

    if !text("title").is_some_and(|title| title.starts_with(&conventions.title_prefix)) {
        report(
            violations,
            "SSOT002",
            SectionName::Metadata,
            format!(
                "Block title must start with \"{}\" prefix",
                conventions.title_prefix
            ),
        );
    }

    if text("category") != Some(conventions.category.as_str()) {
        report(
            violations,
            "SSOT003",
            SectionName::Metadata,
            format!("Block category must be \"{}\"", conventions.category),
        );
    }

    let has_keyword = metadata
        .get("keywords")
        .and_then(Value::as_array)
        .is_some_and(|keywords| {
            keywords
                .iter()
                .any(|k| k.as_str() == Some(conventions.keyword.as_str()))
        });
    if !has_keyword {
        report(
            violations,
            "SSOT004",
            SectionName::Metadata,
            format!("Block keywords must include \"{}\"", conventions.keyword),
        );
    }

    let has_example_flag = metadata
        .get("attributes")
        .and_then(|attrs| attrs.get("isExample"))
        .and_then(|flag| flag.get("type"))
        .and_then(Value::as_str)
        == Some("boolean");
    if !has_example_flag {
        report(
            violations,
            "SSOT005",
            SectionName::Metadata,
            "Block must include a boolean isExample attribute for preview support".to_string(),
        );
    }

    if !references_asset(metadata, "editorStyle", "centralized-css") {
        report(
            violations,
            "SSOT006",
            SectionName::Metadata,
            "Block must reference centralized CSS in editorStyle".to_string(),
        );
    }

    if !references_asset(metadata, "viewScript", "centralized-js") {
        report(
            violations,
            "SSOT007",
            SectionName::Metadata,
            "Block must reference centralized JS in viewScript".to_string(),
        );
    }
}

fn string_field<'a>(metadata: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(Value::as_str)
}

/// True when `metadata[key]` is a list with an entry mentioning `needle`
fn references_asset(metadata: &Map<String, Value>, key: &str, needle: &str) -> bool {
    metadata
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|assets| {
            assets
                .iter()
                .filter_map(Value::as_str)
                .any(|asset| asset.contains(needle))
        })
}

fn check_config(
    source: &str,
    conventions: &Conventions,
    names: &BlockNames,
    violations: &mut ViolationList,
) {
    let class = names.config_class(conventions);
    let declares_class = source
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .windows(2)
        .any(|pair| pair[0] == "class" && pair[1] == class);
    if !declares_class {
        report(
            violations,
            "SSOT008",
            SectionName::Config,
            format!("config.php must implement {} class", class),
        );
    }

    let defined: HashSet<&str> = patterns()
        .function_def
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    for (code, method) in REQUIRED_CONFIG_METHODS {
        if !defined.contains(method) {
            report(
                violations,
                code,
                SectionName::Config,
                format!("config.php missing required method: {}()", method),
            );
        }
    }
}

fn check_registration(source: &str, violations: &mut ViolationList) {
    if !includes_config(source) {
        report(
            violations,
            "SSOT017",
            SectionName::Registration,
            "registering.php must include config.php".to_string(),
        );
    }

    if !source.contains("wp_localize_script") {
        report(
            violations,
            "SSOT018",
            SectionName::Registration,
            "registering.php must use wp_localize_script for config sharing".to_string(),
        );
    }

    if !source.contains("filemtime(") {
        report(
            violations,
            "SSOT019",
            SectionName::Registration,
            "registering.php must use filemtime() for cache-busting".to_string(),
        );
    }
}

fn check_editor_script(
    source: &str,
    conventions: &Conventions,
    names: &BlockNames,
    violations: &mut ViolationList,
) {
    if !patterns()
        .iife_open
        .is_match(strip_leading_comments(source))
    {
        report(
            violations,
            "SSOT020",
            SectionName::EditorScript,
            "editor.js must be wrapped in IIFE".to_string(),
        );
    }

    let global = names.js_global(conventions);
    if !source.contains(&global) {
        report(
            violations,
            "SSOT021",
            SectionName::EditorScript,
            format!("editor.js must import configuration from {}", global),
        );
    }
}

fn check_universal_script(
    source: &str,
    conventions: &Conventions,
    names: &BlockNames,
    violations: &mut ViolationList,
) {
    if source.contains("registerBlockType") {
        report(
            violations,
            "SSOT022",
            SectionName::UniversalScript,
            "centralized.js must NOT contain registerBlockType (should be in editor.js only)"
                .to_string(),
        );
    }

    let global = names.js_global(conventions);
    if !source.contains(&global) {
        report(
            violations,
            "SSOT023",
            SectionName::UniversalScript,
            format!("centralized.js must import configuration from {}", global),
        );
    }
}

fn check_render(
    source: &str,
    conventions: &Conventions,
    names: &BlockNames,
    violations: &mut ViolationList,
) {
    if !includes_config(source) {
        report(
            violations,
            "SSOT024",
            SectionName::Render,
            "render.php must include config.php".to_string(),
        );
    }

    let class = names.config_class(conventions);
    if !source.contains(&format!("{}::", class)) {
        report(
            violations,
            "SSOT025",
            SectionName::Render,
            format!("render.php must use {} class methods", class),
        );
    }
}
