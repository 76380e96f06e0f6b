//! Data-driven tests for the SSOT invariants
//!
//! Each case breaks exactly one part of the compliant fixture and checks the
//! rule codes reported for it.

mod common;

use cmblocks::*;
use common::*;
use rstest::rstest;

fn validate(text: &str) -> ViolationList {
    let bundle = parse_bundle(text, ParseOptions::default()).unwrap();
    validate_bundle(&bundle, &Conventions::default())
}

#[test]
fn test_compliant_bundle_has_no_violations() {
    let violations = validate(&compliant_response());
    assert!(violations.is_empty(), "{:?}", violations.messages());
}

// ============================================================================
// block.json
// ============================================================================

#[rstest]
#[case("name", r#""acme/demo""#, "SSOT001")]
#[case("title", r#""Demo""#, "SSOT002")]
#[case("category", r#""widgets""#, "SSOT003")]
#[case("keywords", r#"["demo"]"#, "SSOT004")]
#[case("keywords", r#""cm""#, "SSOT004")]
#[case("attributes", "{}", "SSOT005")]
#[case("attributes", r#"{"isExample": {"type": "string"}}"#, "SSOT005")]
#[case("editorStyle", r#""cm-demo-centralized-css""#, "SSOT006")]
#[case("editorStyle", r#"["file:./editor.css"]"#, "SSOT006")]
#[case("viewScript", r#""cm-demo-centralized-js""#, "SSOT007")]
#[case("viewScript", "[]", "SSOT007")]
fn test_metadata_rules(#[case] key: &str, #[case] value: &str, #[case] expected: &str) {
    let mut metadata: serde_json::Value = serde_json::from_str(METADATA).unwrap();
    metadata[key] = serde_json::from_str(value).unwrap();
    let metadata = serde_json::to_string(&metadata).unwrap();

    let violations = validate(&response_with(&[("BLOCK_JSON", &metadata)]));
    let codes: Vec<&str> = violations
        .codes()
        .into_iter()
        .filter(|code| *code <= "SSOT007")
        .collect();
    assert_eq!(codes, vec![expected], "{}: {}", key, value);
}

#[test]
fn test_renamed_block_breaks_derived_names() {
    let metadata = METADATA.replace("cm/demo", "cm/other");
    let violations = validate(&response_with(&[("BLOCK_JSON", &metadata)]));
    assert_eq!(
        violations.codes(),
        vec!["SSOT008", "SSOT021", "SSOT023", "SSOT025"]
    );
    assert_eq!(
        violations.messages()[0],
        "config.php must implement CM_Other_Config class"
    );
}

#[test]
fn test_empty_metadata_reports_every_metadata_rule() {
    let violations = validate(&response_with(&[("BLOCK_JSON", "{}")]));
    let codes = violations.codes();
    assert_eq!(
        &codes[..7],
        &["SSOT001", "SSOT002", "SSOT003", "SSOT004", "SSOT005", "SSOT006", "SSOT007"]
    );
}

// ============================================================================
// PHP and JS sources
// ============================================================================

#[rstest]
#[case::missing_class("CONFIG_PHP", "<?php\nclass CM_Demo_Settings {}", "SSOT008")]
#[case::class_name_is_prefix("CONFIG_PHP", "<?php\nclass CM_Demo_ConfigExtra {}", "SSOT008")]
#[case::missing_defaults("CONFIG_PHP", "<?php\nclass CM_Demo_Config {}", "SSOT009")]
#[case::missing_selectors("CONFIG_PHP", "<?php\nclass CM_Demo_Config { function get_css_selector_list() {} }", "SSOT016")]
#[case::registration_without_include("REGISTERING_PHP", "<?php\nwp_localize_script(); filemtime( 'x' );", "SSOT017")]
#[case::registration_without_localize("REGISTERING_PHP", "<?php\nrequire_once __DIR__ . '/config.php';\nfilemtime( 'x' );", "SSOT018")]
#[case::registration_without_filemtime("REGISTERING_PHP", "<?php\nrequire_once __DIR__ . '/config.php';\nwp_localize_script();", "SSOT019")]
#[case::editor_not_iife("EDITOR_JS", "const config = window.cmDemoConfig;", "SSOT020")]
#[case::editor_without_global("EDITOR_JS", "(function() { const config = {}; })();", "SSOT021")]
#[case::universal_registers("CENTRALIZED_JS", "(function() { window.cmDemoConfig; registerBlockType(); })();", "SSOT022")]
#[case::universal_without_global("CENTRALIZED_JS", "(function() {})();", "SSOT023")]
#[case::render_without_include("PHP_RENDER_CALLBACK", "<?php\nCM_Demo_Config::get_defaults();", "SSOT024")]
#[case::render_without_class_calls("PHP_RENDER_CALLBACK", "<?php\nrequire_once __DIR__ . '/config.php';\necho 1;", "SSOT025")]
#[case::style_without_prefix("CENTRALIZED_CSS", ".demo { color: red; }", "SSOT026")]
fn test_source_rules(#[case] marker: &str, #[case] body: &str, #[case] expected: &str) {
    let violations = validate(&response_with(&[(marker, body)]));
    assert!(
        violations.contains_code(expected),
        "{} not in {:?}",
        expected,
        violations.codes()
    );
}

#[rstest]
#[case::arrow_iife("(() => {\n  window.cmDemoConfig;\n})();")]
#[case::async_arrow_iife("(async () => {\n  window.cmDemoConfig;\n})();")]
#[case::named_function_iife("(function init() {\n  window.cmDemoConfig;\n})();")]
#[case::unary_iife("!function() {\n  window.cmDemoConfig;\n}();")]
#[case::leading_comment("/**\n * Editor\n */\n// entry\n(function() {\n  window.cmDemoConfig;\n})();")]
fn test_editor_iife_forms(#[case] editor: &str) {
    let violations = validate(&response_with(&[("EDITOR_JS", editor)]));
    assert!(violations.is_empty(), "{:?}", violations.messages());
}

#[test]
fn test_plugin_dir_include_is_accepted() {
    let registration = REGISTRATION.replace(
        "require_once __DIR__ . '/config.php';",
        "require_once plugin_dir_path( __FILE__ ) . 'config.php';",
    );
    let violations = validate(&response_with(&[("REGISTERING_PHP", &registration)]));
    assert!(violations.is_empty(), "{:?}", violations.messages());
}

#[test]
fn test_violation_order_is_stable() {
    let text = response_with(&[
        ("CENTRALIZED_CSS", "p {}"),
        ("EDITOR_JS", "x"),
        ("BLOCK_JSON", "{\"name\": \"cm/demo\"}"),
    ]);
    let first = validate(&text);
    let second = validate(&text);
    assert_eq!(first, second);

    let codes = first.codes();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
}
