//! Site navigation menus.
//!
//! Each tenant has one menu, stored as `{ "items": [...] }` apart from any page
//! document. The menu is a forest at most two levels deep. Items link to a
//! page of the site, to a URL, or to nothing (a heading for its children).
//!
//! ```
//! use parchment_navigation::{Direction, NavigationItem, NavigationMenu};
//!
//! let menu = NavigationMenu::new()
//!     .add_item(None, NavigationItem::new("a", "Mass Times")).unwrap()
//!     .add_item(None, NavigationItem::new("b", "Sacraments")).unwrap()
//!     .move_item("b", Direction::Up, None).unwrap();
//! assert_eq!(menu.items[0].id, "b");
//! ```

mod error;
mod item;
mod menu;
mod resolve;

pub use error::NavigationError;
pub use item::{Link, NavigationItem};
pub use menu::{Direction, NavigationMenu, MAX_DEPTH};
pub use resolve::{resolve, PageDirectory, ResolvedItem};
