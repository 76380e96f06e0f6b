//! Block directory validation CLI command

use super::util::{build_pipeline, has_flag, positional, print_report};
use cmblocks::*;
use std::path::Path;

pub fn cmd_validate(args: &[String]) -> Result<()> {
    let Some(dir) = positional(args) else {
        return Err("Usage: cmblocks validate <block-dir> [--fix] [--strict] [--json]".into());
    };
    let dir = Path::new(dir);

    let json_output = has_flag(args, "--json");
    let apply_fixes = has_flag(args, "--fix");

    let bundle = ParsedBundle::load_from_dir(dir)?;
    let mut pipeline = build_pipeline(args)?;
    if !apply_fixes {
        pipeline = pipeline.without_fixes();
    }
    let outcome = pipeline.run_bundle(bundle)?;

    if apply_fixes && !outcome.report.fixes.is_empty() {
        outcome.bundle.write_files(dir)?;
        eprintln!(
            "✓ Applied {} fix(es) to {}",
            outcome.report.fixes.len(),
            dir.display()
        );
    }

    print_report(&outcome.report, json_output)
}
