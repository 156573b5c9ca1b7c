use crate::config::Config;
use crate::pages::{collect_pages, load_page, page_id};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use parchment_evaluator::{validate_document, Registry, ValidationLevel};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Page file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// List pages without issues too
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src_dir = config.get_src_dir(cwd);
    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => src_dir.clone(),
    };

    println!("🔍 {} page validation", "Starting".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let registry = Registry::with_builtins();
    let pages = collect_pages(&input)?;

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for page in &pages {
        let (errors, warnings) = validate_page(page, &src_dir, &registry, &args)?;
        total_errors += errors;
        total_warnings += warnings;
    }

    println!();
    println!(
        "✨ {} Validation complete!",
        if total_errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Pages checked: {}", pages.len());

    if total_errors > 0 {
        println!("   {} {}", "Errors:".red(), total_errors);
    }
    if total_warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), total_warnings);
    }
    if total_errors == 0 && total_warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    if total_errors > 0 {
        return Err(anyhow!("{} validation errors", total_errors));
    }
    Ok(())
}

fn validate_page(
    path: &Path,
    src_dir: &Path,
    registry: &Registry,
    args: &ValidateArgs,
) -> Result<(usize, usize)> {
    let id = page_id(path, src_dir);

    let document = match load_page(path) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{} Failed to load {}: {}", "✗".red(), id, err);
            return Ok((1, 0));
        }
    };

    let warnings = validate_document(&document, registry);
    let errors = warnings
        .iter()
        .filter(|w| w.level == ValidationLevel::Error)
        .count();

    if warnings.is_empty() {
        if args.verbose {
            println!("{} {}", "✓".green(), id);
        }
        return Ok((0, 0));
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
    } else {
        println!("{}", id);
        for warning in &warnings {
            let level = match warning.level {
                ValidationLevel::Error => "error".red().bold(),
                ValidationLevel::Warning => "warning".yellow().bold(),
            };
            match &warning.node_id {
                Some(node_id) => println!("  {} [{}] {}", level, node_id.dimmed(), warning.message),
                None => println!("  {} {}", level, warning.message),
            }
        }
    }

    Ok((errors, warnings.len() - errors))
}
