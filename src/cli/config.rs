//! Config and schema CLI commands

use cmblocks::*;

pub fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("list");

    match schema_name {
        "list" => {
            println!("Available schemas: report, config");
            Ok(())
        }
        "report" => print_schema::<ComplianceReport>(),
        "config" => print_schema::<CmBlocksConfig>(),
        _ => Err(format!("Unknown schema: {}. Use 'report' or 'config'.", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

pub fn cmd_init(args: &[String]) -> Result<()> {
    let force = args.contains(&"--force".to_string());
    let current_dir = std::env::current_dir().map_err(Error::Io)?;
    let config_path = current_dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }

    let yaml = CmBlocksConfig::default().to_yaml()?;
    std::fs::write(&config_path, yaml).map_err(Error::Io)?;
    println!("✓ Created {}", config_path.display());
    Ok(())
}
