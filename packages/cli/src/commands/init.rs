use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::pages::NAVIGATION_FILE;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use parchment_editor::TemplateLibrary;
use parchment_navigation::{Link, NavigationItem, NavigationMenu};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "pages")]
    pub src_dir: String,

    /// Site title used for rendered pages
    #[arg(long)]
    pub site_title: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing parish site...".bright_blue().bold());

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let home_file = src_dir.join("home.json");
    if !home_file.exists() {
        let home = TemplateLibrary::builtin().instantiate("home")?;
        fs::write(&home_file, serde_json::to_string_pretty(&home)?)?;
        println!("  {} Created home.json", "✓".green());
    }

    let menu_file = src_dir.join(NAVIGATION_FILE);
    if !menu_file.exists() {
        let menu = NavigationMenu::new().add_item(
            None,
            NavigationItem::new("home", "Home").with_link(Link::Page("home".to_string())),
        )?;
        fs::write(&menu_file, menu.to_json()?)?;
        println!("  {} Created {}", "✓".green(), NAVIGATION_FILE);
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        site_title: args.site_title,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Add a page: parchment new about --template about");
    println!("  2. Run: parchment render");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
