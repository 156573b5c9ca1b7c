use crate::config::Config;
use crate::pages::check_page_name;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use parchment_editor::TemplateLibrary;
use std::fs;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the page file to create (without extension)
    pub name: String,

    /// Template to start from
    #[arg(short, long, default_value = "blank")]
    pub template: String,

    /// Overwrite an existing page
    #[arg(short, long)]
    pub force: bool,
}

pub fn new_page(args: NewArgs, cwd: &str) -> Result<()> {
    check_page_name(&args.name)?;
    let config = Config::load(cwd)?;
    let src_dir = config.get_src_dir(cwd);
    let page_file = src_dir.join(format!("{}.json", args.name));

    if page_file.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            page_file.display()
        ));
    }

    let templates = TemplateLibrary::builtin();
    let document = templates.instantiate(&args.template).map_err(|e| {
        let available: Vec<&str> = templates.names().collect();
        anyhow!("{} (available: {})", e, available.join(", "))
    })?;

    fs::create_dir_all(&src_dir)?;
    fs::write(&page_file, serde_json::to_string_pretty(&document)?)?;

    println!(
        "  {} Created {} from the {} template",
        "✓".green(),
        page_file.display(),
        args.template.bright_white()
    );
    Ok(())
}
