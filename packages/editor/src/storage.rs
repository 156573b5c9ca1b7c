//! # Persistence Adapters
//!
//! Documents are stored and loaded whole; there is no partial update. The
//! editor only talks to the [`DocumentStore`] and [`NavigationStore`] traits,
//! so the hosting application can plug in its own database. Two
//! implementations ship here: [`MemoryStore`] for tests and previews, and
//! [`FileStore`], which keeps one JSON file per page.
//!
//! File layout:
//!
//! ```text
//! <root>/<tenant>/pages/<page>.json
//! <root>/<tenant>/navigation.json
//! ```

use async_trait::async_trait;
use parchment_navigation::{NavigationError, NavigationMenu};
use parchment_schema::{deserialize, serialize, Document, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Identifies one page of one tenant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey {
    pub tenant: String,
    pub page: String,
}

impl DocumentKey {
    pub fn new(tenant: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            page: page.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant, self.page)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(DocumentKey),

    #[error("Invalid storage key component: {0:?}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document is invalid: {0}")]
    Schema(#[from] SchemaError),

    #[error("Stored menu is invalid: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, key: &DocumentKey) -> Result<Document, StoreError>;

    async fn save(&self, key: &DocumentKey, document: &Document) -> Result<(), StoreError>;

    /// Page names stored for a tenant, sorted
    async fn list_pages(&self, tenant: &str) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
pub trait NavigationStore: Send + Sync {
    /// A tenant without a stored menu gets an empty one
    async fn load_menu(&self, tenant: &str) -> Result<NavigationMenu, StoreError>;

    async fn save_menu(&self, tenant: &str, menu: &NavigationMenu) -> Result<(), StoreError>;
}

/// In-memory store. Documents are kept serialized, the same opaque blobs a
/// database would hold.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<DocumentKey, Vec<u8>>>,
    menus: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, key: &DocumentKey) -> Result<Document, StoreError> {
        let documents = self.documents.read().await;
        let bytes = documents
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        Ok(deserialize(bytes)?)
    }

    async fn save(&self, key: &DocumentKey, document: &Document) -> Result<(), StoreError> {
        let bytes = serialize(document)?;
        self.documents.write().await.insert(key.clone(), bytes);
        debug!(key = %key, "Stored document in memory");
        Ok(())
    }

    async fn list_pages(&self, tenant: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .documents
            .read()
            .await
            .keys()
            .filter(|key| key.tenant == tenant)
            .map(|key| key.page.clone())
            .collect())
    }
}

#[async_trait]
impl NavigationStore for MemoryStore {
    async fn load_menu(&self, tenant: &str) -> Result<NavigationMenu, StoreError> {
        match self.menus.read().await.get(tenant) {
            Some(json) => Ok(NavigationMenu::from_json(json)?),
            None => Ok(NavigationMenu::new()),
        }
    }

    async fn save_menu(&self, tenant: &str, menu: &NavigationMenu) -> Result<(), StoreError> {
        menu.validate()?;
        let json = menu.to_json()?;
        self.menus.write().await.insert(tenant.to_string(), json);
        Ok(())
    }
}

/// One JSON file per page under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pages_dir(&self, tenant: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(check_component(tenant)?).join("pages"))
    }

    fn document_path(&self, key: &DocumentKey) -> Result<PathBuf, StoreError> {
        Ok(self
            .pages_dir(&key.tenant)?
            .join(format!("{}.json", check_component(&key.page)?)))
    }

    fn menu_path(&self, tenant: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(check_component(tenant)?).join("navigation.json"))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self, key: &DocumentKey) -> Result<Document, StoreError> {
        let path = self.document_path(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(key.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(deserialize(&bytes)?)
    }

    async fn save(&self, key: &DocumentKey, document: &Document) -> Result<(), StoreError> {
        let path = self.document_path(key)?;
        write_atomically(&path, &serialize(document)?).await?;
        debug!(key = %key, path = %path.display(), "Wrote document");
        Ok(())
    }

    async fn list_pages(&self, tenant: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.pages_dir(tenant)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                pages.push(stem.to_string());
            }
        }
        pages.sort();
        Ok(pages)
    }
}

#[async_trait]
impl NavigationStore for FileStore {
    async fn load_menu(&self, tenant: &str) -> Result<NavigationMenu, StoreError> {
        let path = self.menu_path(tenant)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(json) => Ok(NavigationMenu::from_json(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(NavigationMenu::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_menu(&self, tenant: &str, menu: &NavigationMenu) -> Result<(), StoreError> {
        menu.validate()?;
        let path = self.menu_path(tenant)?;
        write_atomically(&path, menu.to_json()?.as_bytes()).await?;
        Ok(())
    }
}

/// Tenant and page names become path components
fn check_component(name: &str) -> Result<&str, StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(StoreError::InvalidKey(name.to_string()))
    }
}

/// Write to a sibling temp file, then rename over the target
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
