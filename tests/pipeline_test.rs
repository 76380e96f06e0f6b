//! End-to-end tests for the extract / parse / validate / fix pipeline

mod common;

use cmblocks::*;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_compliant_response_is_clean() {
    let text = compliant_response();
    let outcome = Pipeline::default().run(&text).unwrap();

    assert!(outcome.report.before.is_empty(), "{:?}", outcome.report.before);
    assert!(outcome.report.fixes.is_empty(), "{:?}", outcome.report.fixes);
    assert!(outcome.report.after.is_empty());
    assert_eq!(outcome.report.status, ReportStatus::Clean);
    assert_eq!(outcome.report.block, "cm/demo");

    let parsed = parse_bundle(&text, ParseOptions::default()).unwrap();
    assert_eq!(outcome.bundle, parsed);
}

#[test]
fn test_every_field_populated() {
    let bundle = parse_response(&compliant_response()).unwrap();
    assert_eq!(bundle.identifier(), "cm/demo");
    assert_eq!(bundle.config_source, CONFIG);
    assert_eq!(bundle.registration_source, REGISTRATION);
    assert_eq!(bundle.render_source, RENDER);
    assert_eq!(bundle.editor_script_source, EDITOR);
    assert_eq!(bundle.universal_script_source, UNIVERSAL);
    assert_eq!(bundle.style_source, STYLE);
}

#[test]
fn test_scenario_keywords_and_example_attribute() {
    let metadata = r#"{"name":"cm/demo","title":"Demo","category":"cm-blocks","keywords":["demo"],"attributes":{},"editorStyle":["x"],"viewScript":["y"]}"#;
    let outcome = Pipeline::default()
        .run(&response_with(&[("BLOCK_JSON", metadata)]))
        .unwrap();

    assert_eq!(outcome.bundle.metadata["keywords"], json!(["cm", "demo"]));
    assert_eq!(
        outcome.bundle.metadata["attributes"],
        json!({"isExample": {"type": "boolean", "default": false}})
    );
    // The title and asset references are not auto-fixable
    assert!(outcome.report.after.contains_code("SSOT002"));
    assert!(outcome.report.after.contains_code("SSOT006"));
    assert!(outcome.report.after.contains_code("SSOT007"));
    assert!(!outcome.report.after.contains_code("SSOT004"));
    assert!(!outcome.report.after.contains_code("SSOT005"));
}

#[test]
fn test_scenario_block_name_constant() {
    let config = CONFIG.replace("'BLOCK_NAME' => 'cm/demo'", "'BLOCK_NAME' => 'cm-blocks/demo'");
    let outcome = Pipeline::default()
        .run(&response_with(&[("CONFIG_PHP", &config)]))
        .unwrap();

    assert!(outcome
        .bundle
        .config_source
        .contains("'BLOCK_NAME' => 'cm/demo'"));
    assert!(!outcome.bundle.config_source.contains("cm-blocks/demo"));
}

#[test]
fn test_scenario_render_config_include() {
    let render = "<?php\n/** doc */\n$wrapper_classes = CM_Demo_Config::get_enhanced_wrapper_classes( $attributes );";
    let outcome = Pipeline::default()
        .run(&response_with(&[("PHP_RENDER_CALLBACK", render)]))
        .unwrap();

    assert!(outcome.report.before.contains_code("SSOT024"));
    let lines: Vec<&str> = outcome.bundle.render_source.lines().collect();
    assert_eq!(lines[0], "<?php");
    assert_eq!(lines[1], "require_once __DIR__ . '/config.php';");
    assert!(!outcome.report.after.contains_code("SSOT024"));
}

#[test]
fn test_scenario_missing_section_is_fatal() {
    let err = Pipeline::default()
        .run(&response_without("PHP_RENDER_CALLBACK"))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::SectionNotFound {
            section: "PHP_RENDER_CALLBACK"
        }
    ));
    assert!(err.to_string().contains("PHP_RENDER_CALLBACK"));
}

#[test]
fn test_scenario_style_prefix() {
    let style = "p { margin: 0; }";
    let outcome = Pipeline::default()
        .run(&response_with(&[("CENTRALIZED_CSS", style)]))
        .unwrap();

    assert_eq!(
        outcome.bundle.style_source,
        ".cm-demo {\n  /* Block styles */\n}\n\np { margin: 0; }"
    );
    assert!(outcome.report.after.is_empty());
    assert_eq!(outcome.report.status, ReportStatus::Fixed);
}

#[test]
fn test_invalid_metadata_is_fatal() {
    let err = parse_response(&response_with(&[("BLOCK_JSON", "{ \"name\": ")])).unwrap_err();
    assert!(matches!(err, Error::MetadataParse(_)));
}

#[test]
fn test_non_object_metadata_is_fatal() {
    let err = parse_response(&response_with(&[("BLOCK_JSON", "[1, 2]")])).unwrap_err();
    assert!(matches!(err, Error::MetadataShape("an array")));
}

#[test]
fn test_warn_only_returns_bundle_with_warnings() {
    let outcome = Pipeline::default()
        .run(&response_with(&[("EDITOR_JS", "registerBlockType('cm/demo', {});")]))
        .unwrap();

    assert_eq!(
        outcome.warnings(),
        vec![
            "editor.js must be wrapped in IIFE".to_string(),
            "editor.js must import configuration from window.cmDemoConfig".to_string(),
        ]
    );
    assert_eq!(outcome.report.status, ReportStatus::Failed);
}

#[test]
fn test_strict_policy_fails_closed() {
    let text = response_with(&[("EDITOR_JS", "registerBlockType('cm/demo', {});")]);
    let err = Pipeline::default()
        .with_policy(Policy::Strict)
        .run(&text)
        .unwrap_err();

    let Error::Compliance { violations } = err else {
        panic!("expected a compliance error");
    };
    assert_eq!(violations.len(), 2);

    // Fixable violations do not trip strict mode
    let fixable = response_with(&[("CENTRALIZED_CSS", "p {}")]);
    assert!(Pipeline::default()
        .with_policy(Policy::Strict)
        .run(&fixable)
        .is_ok());
}

#[test]
fn test_strict_policy_from_config() {
    let config = CmBlocksConfig::from_yaml("version: 1\npipeline:\n  policy: strict\n").unwrap();
    let text = response_with(&[("CENTRALIZED_JS", "registerBlockType();")]);
    assert!(matches!(
        Pipeline::new(&config).run(&text),
        Err(Error::Compliance { .. })
    ));
}

#[test]
fn test_fenced_sections_are_unwrapped() {
    let fenced_metadata = format!("```json\n{}\n```", METADATA);
    let fenced_style = format!("```css\n{}\n```", STYLE);
    let outcome = Pipeline::default()
        .run(&response_with(&[
            ("BLOCK_JSON", &fenced_metadata),
            ("CENTRALIZED_CSS", &fenced_style),
        ]))
        .unwrap();

    assert_eq!(outcome.bundle.style_source, STYLE);
    assert!(outcome.report.after.is_empty());
}

#[test]
fn test_custom_conventions() {
    let config = CmBlocksConfig::from_yaml(
        r#"
version: 1
conventions:
  namespace: acme
  title_prefix: "ACME "
  category: acme-blocks
  keyword: acme
  class_prefix: acme-
"#,
    )
    .unwrap();

    let outcome = Pipeline::new(&config).run(&compliant_response()).unwrap();
    assert!(outcome.report.before.contains_code("SSOT001"));
    assert_eq!(outcome.bundle.metadata["keywords"][0], "acme");
}

#[test]
fn test_run_bundle_round_trips_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let outcome = Pipeline::default()
        .run(&response_with(&[("CENTRALIZED_CSS", "p {}")]))
        .unwrap();
    let written = outcome.bundle.write_to_dir(dir.path()).unwrap();
    assert_eq!(written, dir.path().join("cm-demo"));

    let loaded = ParsedBundle::load_from_dir(&written).unwrap();
    let again = Pipeline::default().run_bundle(loaded).unwrap();
    assert!(again.report.before.is_empty());
    assert!(again.report.fixes.is_empty());
    assert_eq!(
        again.report.input_digest,
        report::digest(&outcome.bundle.to_response_text().unwrap())
    );
}

#[test]
fn test_composed_text_parses_back() {
    let bundle = parse_response(&compliant_response()).unwrap();
    let composed = bundle.to_response_text().unwrap();
    assert_eq!(parse_response(&composed).unwrap(), bundle);
}

#[test]
fn test_text_report_is_reproducible() {
    let text = response_with(&[("CENTRALIZED_CSS", "p {}")]);
    let first = Pipeline::default().run(&text).unwrap().report.render_text().unwrap();
    let second = Pipeline::default().run(&text).unwrap().report.render_text().unwrap();
    assert_eq!(first, second);
    assert!(first.contains("[SSOT026] centralized.css: centralized.css must use .cm- class prefixes"));
    assert!(first.contains("9. Added .cm-demo class to CSS"));
}
