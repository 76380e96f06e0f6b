//! Shared fixtures for integration tests

#![allow(dead_code)]

use cmblocks::section::SECTIONS;

pub const METADATA: &str = r#"{
  "name": "cm/demo",
  "title": "CM Demo",
  "category": "cm-blocks",
  "keywords": ["cm", "demo"],
  "attributes": {
    "isExample": { "type": "boolean", "default": false }
  },
  "editorStyle": ["cm-demo-centralized-css", "file:./editor-styles.css"],
  "viewScript": ["cm-demo-centralized-js"],
  "viewStyle": ["cm-demo-centralized-css"]
}"#;

pub const CONFIG: &str = r#"<?php
class CM_Demo_Config {
    const BLOCK = array(
        'BLOCK_NAME' => 'cm/demo',
    );

    public static function get_defaults() { return array(); }
    public static function get_asset_handles() { return array(); }
    public static function get_file_paths() { return array(); }
    public static function sanitize_attributes( $attributes ) { return $attributes; }
    public static function get_enhanced_wrapper_classes( $attributes ) { return array( 'cm-demo' ); }
    public static function build_global_css_properties( $attributes ) { return ''; }
    public static function get_javascript_constants() { return array(); }
    public static function get_css_selectors() { return array(); }
}"#;

pub const REGISTRATION: &str = r#"<?php
require_once __DIR__ . '/config.php';

function cm_demo_register() {
    $dir = plugin_dir_path( __FILE__ );
    wp_register_script(
        'cm-demo-centralized-js',
        plugins_url( 'centralized.js', __FILE__ ),
        array(),
        filemtime( $dir . 'centralized.js' )
    );
    wp_localize_script( 'cm-demo-centralized-js', 'cmDemoConfig', CM_Demo_Config::get_javascript_constants() );
    register_block_type('cm/demo', array(
        'render_callback' => 'cm_demo_render',
    ));
}
add_action( 'init', 'cm_demo_register' );"#;

pub const RENDER: &str = r#"<?php
require_once __DIR__ . '/config.php';

namespace CompuMatter\Blocks\Demo;

/**
 * Server-side render for cm/demo
 */
$attributes = CM_Demo_Config::sanitize_attributes( $attributes );
$wrapper_classes = CM_Demo_Config::get_enhanced_wrapper_classes( $attributes );
echo '<div class="' . esc_attr( implode( ' ', $wrapper_classes ) ) . '"></div>';"#;

pub const EDITOR: &str = r#"(function() {
    const config = window.cmDemoConfig || {};
    wp.blocks.registerBlockType('cm/demo', {
        edit: function() { return null; },
        save: function() { return null; }
    });
})();"#;

pub const UNIVERSAL: &str = r#"(function() {
    const config = window.cmDemoConfig || {};
    document.querySelectorAll(config.selector || '.cm-demo');
})();"#;

pub const STYLE: &str = r#".cm-demo {
  display: block;
}"#;

/// Bodies of the compliant fixture in canonical section order
pub fn compliant_bodies() -> [&'static str; 7] {
    [METADATA, CONFIG, REGISTRATION, RENDER, EDITOR, UNIVERSAL, STYLE]
}

/// Delimited response from `(marker, body)` pairs, in the given order
pub fn response_from(sections: &[(&str, &str)]) -> String {
    let mut text = String::new();
    for (marker, body) in sections {
        text.push_str("---\n");
        text.push_str(marker);
        text.push('\n');
        text.push_str(body);
        text.push('\n');
    }
    text.push_str("---\n");
    text
}

/// Compliant response with some sections replaced
pub fn response_with(overrides: &[(&str, &str)]) -> String {
    let sections: Vec<(&str, &str)> = SECTIONS
        .iter()
        .zip(compliant_bodies())
        .map(|(spec, body)| {
            let body = overrides
                .iter()
                .find(|(marker, _)| *marker == spec.marker)
                .map(|(_, body)| *body)
                .unwrap_or(body);
            (spec.marker, body)
        })
        .collect();
    response_from(&sections)
}

/// Fully compliant response for `cm/demo`
pub fn compliant_response() -> String {
    response_with(&[])
}

/// Compliant response with one section left out
pub fn response_without(marker: &str) -> String {
    let sections: Vec<(&str, &str)> = SECTIONS
        .iter()
        .zip(compliant_bodies())
        .filter(|(spec, _)| spec.marker != marker)
        .map(|(spec, body)| (spec.marker, body))
        .collect();
    response_from(&sections)
}
