//! Deterministic auto-fixes for common SSOT violations
//!
//! The block slug is derived first; the fixes then run in [`FixStep::ALL`]
//! order because later steps rely on the metadata the earlier ones settle.
//! Every step is idempotent and a step that cannot apply is a no-op.

use super::{includes_config, patterns};
use crate::bundle::ParsedBundle;
use crate::config::Conventions;
use crate::naming::BlockNames;
use regex::NoExpand;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Statement injected into render.php when config.php is not loaded
pub const CONFIG_REQUIRE: &str = "require_once __DIR__ . '/config.php';";

/// Legacy asset paths and their canonical replacements
const LEGACY_ASSET_PATHS: [(&str, &str, &str); 2] = [
    ("editorScript", "file:./index.js", "file:./editor.js"),
    ("editorStyle", "file:./index.css", "file:./centralized.css"),
];

/// One auto-fix, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FixStep {
    /// Sentinel keyword first, no duplicates
    Keywords,
    /// `index.js` / `index.css` asset paths
    LegacyAssetPaths,
    /// `isExample` boolean attribute
    ExampleAttribute,
    /// Scalar asset references become canonical lists
    AssetLists,
    /// `'BLOCK_NAME'` constant in config.php
    ConfigBlockName,
    /// `register_block_type` name and directory literals
    Registration,
    /// config.php include in render.php
    RenderConfigInclude,
    /// Fallback rule carrying the class prefix
    StylePrefix,
    /// Namespace declaration in render.php
    RenderNamespace,
    /// `implode()` around wrapper classes
    WrapperClassesJoin,
}

impl FixStep {
    pub const ALL: [FixStep; 10] = [
        FixStep::Keywords,
        FixStep::LegacyAssetPaths,
        FixStep::ExampleAttribute,
        FixStep::AssetLists,
        FixStep::ConfigBlockName,
        FixStep::Registration,
        FixStep::RenderConfigInclude,
        FixStep::StylePrefix,
        FixStep::RenderNamespace,
        FixStep::WrapperClassesJoin,
    ];

    /// Position in the fix sequence; slug derivation is step 1
    pub fn number(self) -> usize {
        self as usize + 2
    }
}

/// A fix that changed the bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AppliedFix {
    pub step: FixStep,
    pub description: String,
}

/// Result of [`auto_fix`]
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub bundle: ParsedBundle,
    pub applied: Vec<AppliedFix>,
}

/// Apply every fix step in order
pub fn auto_fix(mut bundle: ParsedBundle, conventions: &Conventions) -> FixOutcome {
    // Step 1: slug derivation
    let names = bundle.names(conventions);

    let mut applied = Vec::new();
    for step in FixStep::ALL {
        if let Some(description) = apply_step(step, &mut bundle, &names, conventions) {
            tracing::debug!(step = step.number(), "{}", description);
            applied.push(AppliedFix { step, description });
        }
    }

    FixOutcome { bundle, applied }
}

/// Apply one step, describing the change if anything changed
fn apply_step(
    step: FixStep,
    bundle: &mut ParsedBundle,
    names: &BlockNames,
    conventions: &Conventions,
) -> Option<String> {
    match step {
        FixStep::Keywords => fix_keywords(&mut bundle.metadata, conventions),
        FixStep::LegacyAssetPaths => fix_legacy_asset_paths(&mut bundle.metadata),
        FixStep::ExampleAttribute => fix_example_attribute(&mut bundle.metadata),
        FixStep::AssetLists => fix_asset_lists(&mut bundle.metadata, names, conventions),
        FixStep::ConfigBlockName => fix_config_block_name(&mut bundle.config_source, names),
        FixStep::Registration => {
            fix_registration(&mut bundle.registration_source, names, conventions)
        }
        FixStep::RenderConfigInclude => fix_render_config_include(&mut bundle.render_source),
        FixStep::StylePrefix => fix_style_prefix(&mut bundle.style_source, names, conventions),
        FixStep::RenderNamespace => {
            fix_render_namespace(&mut bundle.render_source, names, conventions)
        }
        FixStep::WrapperClassesJoin => fix_wrapper_classes_join(&mut bundle.render_source),
    }
}

fn fix_keywords(metadata: &mut Map<String, Value>, conventions: &Conventions) -> Option<String> {
    let keyword = conventions.keyword.as_str();
    let existing = match metadata.get("keywords") {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(single)) => vec![Value::String(single.clone())],
        _ => Vec::new(),
    };

    let mut keywords = vec![Value::String(keyword.to_string())];
    keywords.extend(
        existing
            .into_iter()
            .filter(|k| k.as_str() != Some(keyword)),
    );
    let keywords = Value::Array(keywords);

    if metadata.get("keywords") == Some(&keywords) {
        return None;
    }
    metadata.insert("keywords".to_string(), keywords);
    Some(format!("Added \"{}\" as the first keyword", keyword))
}

fn fix_legacy_asset_paths(metadata: &mut Map<String, Value>) -> Option<String> {
    let mut changed = Vec::new();
    for (key, legacy, canonical) in LEGACY_ASSET_PATHS {
        if metadata.get(key).and_then(Value::as_str) == Some(legacy) {
            metadata.insert(key.to_string(), Value::String(canonical.to_string()));
            changed.push(format!("{} {} -> {}", key, legacy, canonical));
        }
    }

    if changed.is_empty() {
        None
    } else {
        Some(format!("Normalized legacy asset paths: {}", changed.join(", ")))
    }
}

fn fix_example_attribute(metadata: &mut Map<String, Value>) -> Option<String> {
    let attributes = metadata
        .entry("attributes")
        .or_insert_with(|| Value::Object(Map::new()));
    if attributes.is_null() {
        *attributes = Value::Object(Map::new());
    }

    let Value::Object(attributes) = attributes else {
        return None;
    };
    if attributes.contains_key("isExample") {
        return None;
    }

    attributes.insert(
        "isExample".to_string(),
        json!({"type": "boolean", "default": false}),
    );
    Some("Added isExample attribute".to_string())
}

fn fix_asset_lists(
    metadata: &mut Map<String, Value>,
    names: &BlockNames,
    conventions: &Conventions,
) -> Option<String> {
    if names.is_empty() {
        return None;
    }

    let css = names.handle(conventions, "centralized-css");
    let js = names.handle(conventions, "centralized-js");
    let canonical = [
        ("editorStyle", json!([css.clone(), "file:./editor-styles.css"])),
        ("viewScript", json!([js])),
        ("viewStyle", json!([css])),
    ];

    let mut changed = Vec::new();
    for (key, list) in canonical {
        let is_scalar = metadata
            .get(key)
            .is_some_and(|v| !v.is_array() && !v.is_null());
        if is_scalar {
            metadata.insert(key.to_string(), list);
            changed.push(key);
        }
    }

    if changed.is_empty() {
        None
    } else {
        Some(format!("Updated asset references: {}", changed.join(", ")))
    }
}

fn fix_config_block_name(source: &mut String, names: &BlockNames) -> Option<String> {
    if !names.is_literal_safe() {
        return None;
    }

    let replacement = format!("'BLOCK_NAME' => '{}'", names.identifier);
    let fixed = patterns()
        .block_name_const
        .replace_all(source, NoExpand(&replacement));
    if fixed == source.as_str() {
        return None;
    }

    *source = fixed.into_owned();
    Some(format!(
        "Corrected BLOCK_NAME to '{}' in config.php",
        names.identifier
    ))
}

fn fix_registration(
    source: &mut String,
    names: &BlockNames,
    conventions: &Conventions,
) -> Option<String> {
    let original = source.clone();

    if names.is_literal_safe() {
        let replacement = format!("register_block_type('{}'", names.identifier);
        *source = patterns()
            .register_block_type
            .replace_all(source, NoExpand(&replacement))
            .into_owned();
    }

    let legacy_dir = format!("/blocks/{}", conventions.class_prefix);
    let canonical_dir = format!("/{}/{}", conventions.blocks_dir, conventions.class_prefix);
    if !canonical_dir.contains(&legacy_dir) {
        *source = source.replace(&legacy_dir, &canonical_dir);
    }

    if *source == original {
        None
    } else {
        Some("Corrected block registration and paths in registering.php".to_string())
    }
}

fn fix_render_config_include(source: &mut String) -> Option<String> {
    if includes_config(source) {
        return None;
    }

    let mut lines: Vec<&str> = source.split('\n').collect();
    let open_tag = lines.iter().position(|line| line.contains("<?php"))?;
    lines.insert(open_tag + 1, CONFIG_REQUIRE);
    *source = lines.join("\n");

    Some("Added config.php require to render.php".to_string())
}

fn fix_style_prefix(
    source: &mut String,
    names: &BlockNames,
    conventions: &Conventions,
) -> Option<String> {
    if names.is_empty() || source.contains(&conventions.selector_prefix()) {
        return None;
    }

    let class = names.css_class(conventions);
    *source = format!(".{} {{\n  /* Block styles */\n}}\n\n{}", class, source);
    Some(format!("Added .{} class to CSS", class))
}

fn fix_render_namespace(
    source: &mut String,
    names: &BlockNames,
    conventions: &Conventions,
) -> Option<String> {
    if names.is_empty() || patterns().namespace_decl.is_match(source) {
        return None;
    }

    let caps = patterns().first_block_comment.captures(source)?;
    let whole = caps.get(0)?;
    let namespace = names.php_namespace(conventions);
    let injected = format!(
        "{}\n\nnamespace {};\n{}",
        &caps[1], namespace, &caps[2]
    );

    let mut fixed = String::with_capacity(source.len() + injected.len());
    fixed.push_str(&source[..whole.start()]);
    fixed.push_str(&injected);
    fixed.push_str(&source[whole.end()..]);
    *source = fixed;

    Some(format!("Added namespace {} to render.php", namespace))
}

fn fix_wrapper_classes_join(source: &mut String) -> Option<String> {
    let fixed = patterns()
        .raw_wrapper_classes
        .replace_all(source, NoExpand("esc_attr( implode( ' ', $wrapper_classes ) )"));
    if fixed == source.as_str() {
        return None;
    }

    *source = fixed.into_owned();
    Some("Added implode() for wrapper classes array".to_string())
}
