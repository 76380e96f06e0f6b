//! Response processing CLI commands

use super::util::{build_pipeline, has_flag, parse_out_arg, positional, print_report, read_input};
use cmblocks::*;
use std::path::Path;

pub fn cmd_process(args: &[String]) -> Result<()> {
    let Some(input) = positional(args) else {
        return Err(
            "Usage: cmblocks process <response.txt|-> [--out <dir>] [--strict] [--json] [--no-fix]"
                .into(),
        );
    };

    let json_output = has_flag(args, "--json");
    let out_root = parse_out_arg(args);

    let text = read_input(input)?;
    let outcome = build_pipeline(args)?.run(&text)?;

    if let Some(root) = out_root {
        let dir = outcome.bundle.write_to_dir(&root)?;
        eprintln!("Written to: {}", dir.display());
    }

    print_report(&outcome.report, json_output)
}

pub fn cmd_compose(args: &[String]) -> Result<()> {
    let Some(dir) = positional(args) else {
        return Err("Usage: cmblocks compose <block-dir>".into());
    };

    let bundle = ParsedBundle::load_from_dir(Path::new(dir))?;
    print!("{}", bundle.to_response_text()?);
    Ok(())
}
