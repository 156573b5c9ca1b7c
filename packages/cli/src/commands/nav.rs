use crate::config::Config;
use crate::pages::{page_directory, NAVIGATION_FILE};
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use parchment_navigation::{resolve, Direction, Link, NavigationItem, NavigationMenu, ResolvedItem};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct NavArgs {
    #[command(subcommand)]
    pub command: NavCommand,
}

#[derive(Debug, Subcommand)]
pub enum NavCommand {
    /// Print the menu with resolved links
    Show,

    /// Append an item to the top level or under a parent
    Add {
        label: String,

        /// Top-level item to nest under
        #[arg(long)]
        parent: Option<String>,

        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Link to a page of this site
        #[arg(long, conflicts_with = "url")]
        page: Option<String>,

        /// Link to an address
        #[arg(long)]
        url: Option<String>,
    },

    /// Swap an item with its neighbour
    Move {
        id: String,

        #[arg(value_enum)]
        direction: DirectionArg,

        /// Parent of the item, for nested items
        #[arg(long)]
        parent: Option<String>,
    },

    /// Remove an item (and its children)
    Remove {
        id: String,

        #[arg(long)]
        parent: Option<String>,
    },

    /// Point an item at a page, a URL, or nothing
    Link {
        id: String,

        #[arg(long, conflicts_with_all = ["url", "clear"])]
        page: Option<String>,

        #[arg(long, conflicts_with = "clear")]
        url: Option<String>,

        #[arg(long)]
        clear: bool,
    },

    /// Change an item's label
    Rename { id: String, label: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

pub fn nav(args: NavArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src_dir = config.get_src_dir(cwd);
    let menu_path = src_dir.join(NAVIGATION_FILE);
    let menu = load_menu(&menu_path)?;

    let updated = match args.command {
        NavCommand::Show => {
            let pages = page_directory(&src_dir)?;
            print_menu(&menu, &pages);
            return Ok(());
        }
        NavCommand::Add {
            label,
            parent,
            id,
            page,
            url,
        } => {
            let item = match id {
                Some(id) => NavigationItem::new(id, label),
                None => NavigationItem::labeled(label),
            }
            .with_link(link_from(page, url, false));
            let id = item.id.clone();
            let updated = menu.add_item(parent.as_deref(), item)?;
            println!("  {} Added {}", "✓".green(), id.bright_white());
            updated
        }
        NavCommand::Move {
            id,
            direction,
            parent,
        } => menu.move_item(&id, direction.into(), parent.as_deref())?,
        NavCommand::Remove { id, parent } => menu.remove_item(&id, parent.as_deref())?,
        NavCommand::Link {
            id,
            page,
            url,
            clear,
        } => menu.set_link(&id, link_from(page, url, clear))?,
        NavCommand::Rename { id, label } => menu.update_label(&id, label)?,
    };

    if updated == menu {
        println!("{}", "Menu unchanged".dimmed());
        return Ok(());
    }

    fs::create_dir_all(&src_dir)?;
    fs::write(&menu_path, updated.to_json()?)?;
    println!("  {} Saved {}", "✓".green(), NAVIGATION_FILE);
    Ok(())
}

fn load_menu(path: &Path) -> Result<NavigationMenu> {
    if !path.exists() {
        return Ok(NavigationMenu::new());
    }
    let json = fs::read_to_string(path)?;
    NavigationMenu::from_json(&json).map_err(|e| anyhow!("{}: {}", path.display(), e))
}

fn link_from(page: Option<String>, url: Option<String>, clear: bool) -> Link {
    match (page, url) {
        _ if clear => Link::None,
        (Some(page), _) => Link::Page(page),
        (None, Some(url)) => Link::Url(url),
        (None, None) => Link::None,
    }
}

fn print_menu(menu: &NavigationMenu, pages: &BTreeMap<String, String>) {
    if menu.is_empty() {
        println!("{}", "(empty menu)".dimmed());
        return;
    }

    let resolved = resolve(menu, pages);
    for (item, shown) in menu.items.iter().zip(&resolved) {
        print_item(item, shown, 0);
        for (child, shown_child) in item.children.iter().zip(&shown.children) {
            print_item(child, shown_child, 1);
        }
    }
}

fn print_item(item: &NavigationItem, resolved: &ResolvedItem, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let target = match (&resolved.href, item.link()) {
        (Some(href), _) => href.cyan().to_string(),
        (None, Link::Page(page_id)) => format!("missing page '{}'", page_id).red().to_string(),
        (None, _) => "(heading)".dimmed().to_string(),
    };
    println!(
        "{}{} {} {}",
        indent,
        item.label.bold(),
        format!("[{}]", item.id).dimmed(),
        target
    );
}
