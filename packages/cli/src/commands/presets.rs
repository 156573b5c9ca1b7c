use anyhow::Result;
use clap::Args;
use colored::Colorize;
use parchment_presets::PresetLibrary;
use std::collections::BTreeSet;

#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Component type to list presets for (all types when omitted)
    pub component_type: Option<String>,

    /// Print presets as JSON
    #[arg(long)]
    pub json: bool,
}

/// List the global presets shipped with the catalog
pub fn presets(args: PresetsArgs, _cwd: &str) -> Result<()> {
    let library = PresetLibrary::builtin();

    let types: BTreeSet<&str> = match &args.component_type {
        Some(component_type) => [component_type.as_str()].into_iter().collect(),
        None => library
            .globals()
            .iter()
            .map(|p| p.component_type.as_str())
            .collect(),
    };

    for component_type in types {
        // No tenant is involved on the command line; only globals are listed.
        let listed = library.list_presets(component_type, "");

        if args.json {
            println!("{}", serde_json::to_string_pretty(&listed)?);
            continue;
        }

        println!("{}", component_type.bright_blue().bold());
        if listed.is_empty() {
            println!("  {}", "(no presets)".dimmed());
        }
        for preset in listed {
            let keys: Vec<&str> = preset.props.keys().map(String::as_str).collect();
            println!(
                "  {} {} {}",
                preset.name.bold(),
                format!("[{}]", preset.id).dimmed(),
                keys.join(", ")
            );
        }
    }

    Ok(())
}
