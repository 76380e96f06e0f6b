//! CLI utility helpers

use cmblocks::{CmBlocksConfig, ComplianceReport, Error, Pipeline, Policy, Result};
use std::io::Read;
use std::path::PathBuf;

/// True when `flag` appears anywhere in the arguments
pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

/// Parse --out argument to determine the output root
pub fn parse_out_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--out" || arg == "-o" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// First argument, unless it is a flag
pub fn positional(args: &[String]) -> Option<&str> {
    args.first()
        .map(|s| s.as_str())
        .filter(|arg| !arg.starts_with("--"))
}

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(Error::Io)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .map_err(|e| Error::Other(format!("Failed to read {}: {}", path, e)))
}

/// Pipeline from `.cmblocks.yaml` in the working directory plus flags
pub fn build_pipeline(args: &[String]) -> Result<Pipeline> {
    let current_dir = std::env::current_dir().map_err(Error::Io)?;
    let config = CmBlocksConfig::load_or_default(&current_dir)?;

    let mut pipeline = Pipeline::new(&config);
    if has_flag(args, "--strict") {
        pipeline = pipeline.with_policy(Policy::Strict);
    }
    if has_flag(args, "--no-fix") {
        pipeline = pipeline.without_fixes();
    }
    Ok(pipeline)
}

/// Print a report as JSON or text on stdout
pub fn print_report(report: &ComplianceReport, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text()?);
    }
    Ok(())
}
