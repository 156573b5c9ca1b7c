mod commands;
mod config;
mod pages;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, nav, new_page, presets, render, validate, InitArgs, NavArgs, NewArgs, PresetsArgs,
    RenderArgs, ValidateArgs,
};

/// Parchment CLI - page builder for parish websites
#[derive(Parser, Debug)]
#[command(name = "parchment")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new site in the current directory
    Init(InitArgs),

    /// Create a page from a template
    New(NewArgs),

    /// Render pages to HTML
    Render(RenderArgs),

    /// Check pages against the component catalog
    Validate(ValidateArgs),

    /// Edit the site navigation menu
    Nav(NavArgs),

    /// List built-in presets
    Presets(PresetsArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new_page(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Nav(args) => nav(args, &cwd),
        Command::Presets(args) => presets(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
