//! Turning stored menu items into links the public site can print.

use crate::item::{Link, NavigationItem};
use crate::menu::NavigationMenu;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Maps a tenant's page ids to their public paths
pub trait PageDirectory {
    fn page_path(&self, page_id: &str) -> Option<String>;
}

impl PageDirectory for BTreeMap<String, String> {
    fn page_path(&self, page_id: &str) -> Option<String> {
        self.get(page_id).cloned()
    }
}

impl PageDirectory for HashMap<String, String> {
    fn page_path(&self, page_id: &str) -> Option<String> {
        self.get(page_id).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItem {
    pub label: String,
    /// `None` for headings and for pages that no longer exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedItem>,
}

/// Resolve every item of the menu, in order.
///
/// URLs pass through untouched. Page links go through `directory`; a page that
/// cannot be found leaves the item without an href rather than a broken link.
pub fn resolve(menu: &NavigationMenu, directory: &dyn PageDirectory) -> Vec<ResolvedItem> {
    menu.items
        .iter()
        .map(|item| resolve_item(item, directory))
        .collect()
}

fn resolve_item(item: &NavigationItem, directory: &dyn PageDirectory) -> ResolvedItem {
    let href = match item.link() {
        Link::Url(url) => Some(url),
        Link::Page(page_id) => {
            let path = directory.page_path(&page_id);
            if path.is_none() {
                warn!(item_id = %item.id, page_id = %page_id, "Menu item links to a missing page");
            }
            path
        }
        Link::None => None,
    };

    ResolvedItem {
        label: item.label.clone(),
        href,
        children: item
            .children
            .iter()
            .map(|child| resolve_item(child, directory))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_links() {
        let menu = NavigationMenu::new()
            .add_item(None, NavigationItem::new("home", "Home").with_link(Link::Page("p-home".into())))
            .unwrap()
            .add_item(None, NavigationItem::new("diocese", "Diocese").with_link(Link::Url("https://diocese.example".into())))
            .unwrap()
            .add_item(None, NavigationItem::new("about", "About"))
            .unwrap()
            .add_item(
                Some("about"),
                NavigationItem::new("old", "Old page").with_link(Link::Page("deleted".into())),
            )
            .unwrap();

        let mut pages = BTreeMap::new();
        pages.insert("p-home".to_string(), "/".to_string());

        let resolved = resolve(&menu, &pages);
        assert_eq!(resolved[0].href.as_deref(), Some("/"));
        assert_eq!(resolved[1].href.as_deref(), Some("https://diocese.example"));
        assert_eq!(resolved[2].href, None);
        assert_eq!(
            resolved[2].children,
            vec![ResolvedItem {
                label: "Old page".to_string(),
                href: None,
                children: Vec::new(),
            }]
        );
    }
}
