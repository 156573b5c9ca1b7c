use crate::config::Config;
use crate::pages::{collect_pages, load_page, page_id};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use parchment_compiler_html::{compile_to_html, CompileOptions};
use parchment_evaluator::{Evaluator, Registry, RenderMode, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Render mode: public or editor (overrides config)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Emit the page body only, without doctype and head
    #[arg(long)]
    pub fragment: bool,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src_dir = config.get_src_dir(cwd);
    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => src_dir.clone(),
    };

    let mode = match args.mode.as_deref() {
        None => config.render_mode,
        Some("public") => RenderMode::Public,
        Some("editor") => RenderMode::Editor,
        Some(other) => return Err(anyhow!("Unknown render mode: {} (use public or editor)", other)),
    };

    println!("{}", "🔨 Rendering pages...".bright_blue().bold());

    let pages = collect_pages(&input)?;
    if pages.is_empty() {
        println!("{}", "⚠️  No pages found".yellow());
        return Ok(());
    }
    println!("Found {} pages", pages.len());

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    let registry = Registry::with_builtins();
    let evaluator = Evaluator::with_options(&registry, RenderOptions { mode });

    let mut success_count = 0;
    let mut error_count = 0;

    for page in &pages {
        let id = page_id(page, &src_dir);
        match render_page(page, &id, &evaluator, &config, &args, &out_dir) {
            Ok(output) => {
                success_count += 1;
                println!("  {} {} → {}", "✓".green(), id, output);
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), id, e.to_string().red());
            }
        }
    }

    println!();
    if error_count == 0 {
        println!("{} Rendered {} pages successfully", "✅".green(), success_count);
        Ok(())
    } else {
        println!(
            "{} Rendered {} pages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} pages failed to render", error_count))
    }
}

fn render_page(
    path: &Path,
    id: &str,
    evaluator: &Evaluator<'_>,
    config: &Config,
    args: &RenderArgs,
    out_dir: &Path,
) -> Result<String> {
    let document = load_page(path)?;
    let vdom = evaluator.evaluate(&document);

    for diagnostic in &vdom.diagnostics {
        println!("    {} {:?}", "placeholder:".yellow(), diagnostic);
    }

    let options = CompileOptions {
        pretty: config.pretty && !args.compact,
        full_page: !args.fragment,
        title: Some(config.site_title.clone().unwrap_or_else(|| id.to_string())),
        ..Default::default()
    };
    let html = compile_to_html(&vdom, options)?;

    if args.stdout {
        println!("{}", html);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(format!("{}.html", id));
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, html)?;
    debug!(page = id, path = %output_file.display(), "Wrote page");

    Ok(output_file.display().to_string())
}
