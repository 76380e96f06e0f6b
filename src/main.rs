//! cmblocks CLI - SSOT compliance for AI-generated block bundles
//!
//! Commands:
//!   process   - Extract, validate and fix a delimited AI response
//!   validate  - Check a block directory, optionally fixing it in place
//!   compose   - Print a block directory as a delimited response
//!   schema    - Print JSON schemas for reports and config
//!   init      - Write a default .cmblocks.yaml

mod cli;

use cmblocks::logging::init_tracing;
use cmblocks::VERSION;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "process" => cli::cmd_process(&args[2..]),
        "validate" => cli::cmd_validate(&args[2..]),
        "compose" => cli::cmd_compose(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "init" => cli::cmd_init(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("cmblocks {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
cmblocks - SSOT compliance for AI-generated WordPress blocks

USAGE:
    cmblocks <COMMAND> [OPTIONS]

COMMANDS:
    process <response.txt|->      Extract, validate and auto-fix a response
        --out <dir>               Write the block files under <dir>
        --strict                  Fail when violations remain after auto-fix
        --no-fix                  Validate only
        --json                    Print the report as JSON
    validate <block-dir>          Validate a block directory
        --fix                     Apply auto-fixes in place
        --strict                  Fail when violations remain
        --json                    Print the report as JSON
    compose <block-dir>           Print a block directory as a response
    schema [report|config]        Print a JSON schema
    init [--force]                Write a default .cmblocks.yaml
    version                       Print version
    help                          Print this message

ENVIRONMENT:
    CMBLOCKS_LOG                  Log filter (default: cmblocks=info)
"#
    );
}
