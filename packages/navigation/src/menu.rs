//! # Navigation Menu
//!
//! A tenant's site menu: an ordered list of top-level items, each of which may
//! hold one level of children. Every operation takes `&self` and returns a new
//! menu, or an error with nothing changed.
//!
//! Invariants kept by every operation:
//! - at most two levels,
//! - `page_id` and `url` never both set,
//! - `order` equals the item's position in its sibling list,
//! - ids are unique across the whole menu.

use crate::error::NavigationError;
use crate::item::{renumber, Link, NavigationItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Deepest allowed nesting; top-level items are depth 1
pub const MAX_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationMenu {
    pub items: Vec<NavigationItem>,
}

impl NavigationMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the top level, or to the children of `parent_id`
    pub fn add_item(
        &self,
        parent_id: Option<&str>,
        mut item: NavigationItem,
    ) -> Result<NavigationMenu, NavigationError> {
        let mut incoming = BTreeSet::new();
        for id in std::iter::once(&item).chain(&item.children).map(|i| &i.id) {
            if self.contains(id) || !incoming.insert(id.as_str()) {
                return Err(NavigationError::DuplicateId(id.clone()));
            }
        }
        check_item(&item, 1)?;

        let mut menu = self.clone();
        let siblings = match parent_id {
            None => &mut menu.items,
            Some(parent_id) => {
                if item.has_children() {
                    return Err(NavigationError::DepthExceeded {
                        parent_id: parent_id.to_string(),
                    });
                }
                menu.sibling_group_mut(Some(parent_id))?
            }
        };

        item.order = siblings.len();
        renumber(&mut item.children);
        debug!(item_id = %item.id, parent_id, "Added navigation item");
        siblings.push(item);
        Ok(menu)
    }

    /// Swap an item with its neighbour. Moving past either end is a no-op.
    pub fn move_item(
        &self,
        id: &str,
        direction: Direction,
        parent_id: Option<&str>,
    ) -> Result<NavigationMenu, NavigationError> {
        let mut menu = self.clone();
        let siblings = menu.sibling_group_mut(parent_id)?;
        let index = siblings
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| NavigationError::ItemNotFound(id.to_string()))?;

        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < siblings.len() => index + 1,
            _ => return Ok(menu),
        };

        siblings.swap(index, target);
        renumber(siblings);
        Ok(menu)
    }

    /// Remove an item; a top-level item takes its children with it
    pub fn remove_item(
        &self,
        id: &str,
        parent_id: Option<&str>,
    ) -> Result<NavigationMenu, NavigationError> {
        let mut menu = self.clone();
        let siblings = menu.sibling_group_mut(parent_id)?;
        let index = siblings
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| NavigationError::ItemNotFound(id.to_string()))?;

        let removed = siblings.remove(index);
        renumber(siblings);
        debug!(
            item_id = id,
            children = removed.children.len(),
            "Removed navigation item"
        );
        Ok(menu)
    }

    pub fn set_link(&self, id: &str, link: Link) -> Result<NavigationMenu, NavigationError> {
        let mut menu = self.clone();
        menu.find_mut(id)?.set_link(link);
        Ok(menu)
    }

    pub fn update_label(
        &self,
        id: &str,
        label: impl Into<String>,
    ) -> Result<NavigationMenu, NavigationError> {
        let mut menu = self.clone();
        menu.find_mut(id)?.label = label.into();
        Ok(menu)
    }

    /// Find an item at either level
    pub fn find(&self, id: &str) -> Option<&NavigationItem> {
        self.items.iter().find_map(|item| {
            if item.id == id {
                Some(item)
            } else {
                item.children.iter().find(|child| child.id == id)
            }
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Total number of items at both levels
    pub fn len(&self) -> usize {
        self.items.iter().map(|item| 1 + item.children.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check every invariant of a menu built outside this module
    pub fn validate(&self) -> Result<(), NavigationError> {
        let mut seen = BTreeSet::new();
        for item in &self.items {
            check_item(item, 1)?;
            for id in std::iter::once(item).chain(&item.children).map(|i| &i.id) {
                if !seen.insert(id.as_str()) {
                    return Err(NavigationError::DuplicateId(id.clone()));
                }
            }
        }
        Ok(())
    }

    /// Parse a stored menu (`{ "items": [...] }`).
    ///
    /// Sibling lists are sorted by their stored `order` and renumbered, so gaps
    /// or duplicates left by older writers are repaired on load.
    pub fn from_json(json: &str) -> Result<NavigationMenu, NavigationError> {
        let mut menu: NavigationMenu = serde_json::from_str(json)?;
        menu.validate()?;
        normalize(&mut menu.items);
        for item in &mut menu.items {
            normalize(&mut item.children);
        }
        Ok(menu)
    }

    pub fn to_json(&self) -> Result<String, NavigationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn sibling_group_mut(
        &mut self,
        parent_id: Option<&str>,
    ) -> Result<&mut Vec<NavigationItem>, NavigationError> {
        let Some(parent_id) = parent_id else {
            return Ok(&mut self.items);
        };

        if let Some(index) = self.items.iter().position(|item| item.id == parent_id) {
            return Ok(&mut self.items[index].children);
        }
        if self.contains(parent_id) {
            Err(NavigationError::DepthExceeded {
                parent_id: parent_id.to_string(),
            })
        } else {
            Err(NavigationError::ItemNotFound(parent_id.to_string()))
        }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut NavigationItem, NavigationError> {
        for item in &mut self.items {
            if item.id == id {
                return Ok(item);
            }
            if let Some(child) = item.children.iter_mut().find(|child| child.id == id) {
                return Ok(child);
            }
        }
        Err(NavigationError::ItemNotFound(id.to_string()))
    }
}

/// `depth` is the level the item would sit at
fn check_item(item: &NavigationItem, depth: usize) -> Result<(), NavigationError> {
    if item.page_id.is_some() && item.url.is_some() {
        return Err(NavigationError::ConflictingLink(item.id.clone()));
    }
    if item.has_children() && depth >= MAX_DEPTH {
        return Err(NavigationError::DepthExceeded {
            parent_id: item.id.clone(),
        });
    }
    for child in &item.children {
        check_item(child, depth + 1)?;
    }
    Ok(())
}

fn normalize(items: &mut [NavigationItem]) {
    items.sort_by_key(|item| item.order);
    renumber(items);
}
