use serde::{Deserialize, Serialize};

/// What a menu entry points at. Page and URL targets are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// A page of the tenant's own site
    Page(String),
    /// Any external or hand-written address
    Url(String),
    /// Non-clickable group heading
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            page_id: None,
            url: None,
            order: 0,
            children: Vec::new(),
        }
    }

    /// An item with a generated id
    pub fn labeled(label: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().simple().to_string(), label)
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.set_link(link);
        self
    }

    pub fn with_children(mut self, children: Vec<NavigationItem>) -> Self {
        self.children = children;
        renumber(&mut self.children);
        self
    }

    /// Point the item somewhere; the other kind of target is cleared
    pub fn set_link(&mut self, link: Link) {
        match link {
            Link::Page(page_id) => {
                self.page_id = Some(page_id);
                self.url = None;
            }
            Link::Url(url) => {
                self.url = Some(url);
                self.page_id = None;
            }
            Link::None => {
                self.page_id = None;
                self.url = None;
            }
        }
    }

    /// Current target. A stored item with both fields set reports the page.
    pub fn link(&self) -> Link {
        match (&self.page_id, &self.url) {
            (Some(page_id), _) => Link::Page(page_id.clone()),
            (None, Some(url)) => Link::Url(url.clone()),
            (None, None) => Link::None,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Make `order` match position
pub(crate) fn renumber(items: &mut [NavigationItem]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.order = index;
    }
}
