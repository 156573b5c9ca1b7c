//! End-to-end tests: storage → session → preview → storage

use async_trait::async_trait;
use parchment_editor::{
    Document, DocumentKey, DocumentStore, EditSession, EditorError, FileStore, MemoryStore,
    Mutation, NavigationStore, Pipeline, SessionState, StoreError, TemplateLibrary,
    SAVE_ABANDONED,
};
use parchment_evaluator::Registry;
use parchment_navigation::{Link, NavigationItem, NavigationMenu};
use parchment_presets::PresetLibrary;
use parchment_schema::Node;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fails the first `failures` saves, then delegates to memory
struct FlakyStore {
    inner: MemoryStore,
    failures: AtomicUsize,
}

impl FlakyStore {
    fn failing(failures: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn load(&self, key: &DocumentKey) -> Result<Document, StoreError> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &DocumentKey, document: &Document) -> Result<(), StoreError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::Backend("connection reset".to_string()));
        }
        self.inner.save(key, document).await
    }

    async fn list_pages(&self, tenant: &str) -> Result<Vec<String>, StoreError> {
        self.inner.list_pages(tenant).await
    }
}

/// Answers saves only after `delay`
struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

#[async_trait]
impl DocumentStore for SlowStore {
    async fn load(&self, key: &DocumentKey) -> Result<Document, StoreError> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &DocumentKey, document: &Document) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(key, document).await
    }

    async fn list_pages(&self, tenant: &str) -> Result<Vec<String>, StoreError> {
        self.inner.list_pages(tenant).await
    }
}

fn home_key() -> DocumentKey {
    DocumentKey::new("st-anne", "home")
}

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let doc = TemplateLibrary::builtin().instantiate("home").unwrap();
    store.save(&home_key(), &doc).await.unwrap();
    store
}

#[tokio::test]
async fn test_load_edit_save_cycle() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let mut session = EditSession::load(&store, home_key()).await?;
    assert_eq!(session.state(), SessionState::Loaded);
    assert!(!session.is_dirty());

    session.apply(Mutation::SetProp {
        node_id: "hero".into(),
        key: "title".into(),
        value: json!("Welcome to St. Anne"),
    })?;
    assert!(session.is_dirty());

    session.save(&store).await?;
    assert_eq!(session.state(), SessionState::Saved);
    assert!(!session.is_dirty());

    let reloaded = EditSession::load(&store, home_key()).await?;
    assert_eq!(reloaded.document(), session.document());
    assert_eq!(
        reloaded.document().get("hero").unwrap().props["title"],
        json!("Welcome to St. Anne")
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_document() {
    let store = MemoryStore::new();
    let result = EditSession::load(&store, DocumentKey::new("st-anne", "nope")).await;
    assert!(matches!(
        result,
        Err(EditorError::Store(StoreError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_failed_save_keeps_document_and_retries() {
    let store = FlakyStore::failing(1);
    store
        .inner
        .save(&home_key(), &Document::empty("root", "Container"))
        .await
        .unwrap();

    let mut session = EditSession::load(&store, home_key()).await.unwrap();
    session
        .apply(Mutation::InsertNode {
            parent_id: "root".into(),
            index: 0,
            node: Node::leaf("s", "Spacer"),
        })
        .unwrap();
    let edited = session.document().clone();

    let err = session.save(&store).await.unwrap_err();
    assert!(matches!(err, EditorError::SaveFailure(_)));
    assert_eq!(session.state(), SessionState::SaveFailed);
    assert_eq!(session.document(), &edited);
    assert!(session.should_warn_before_leave());

    session.save(&store).await.unwrap();
    assert_eq!(session.state(), SessionState::Saved);
    assert_eq!(store.load(&home_key()).await.unwrap(), edited);
}

#[tokio::test]
async fn test_timed_out_save_can_be_retried() {
    let slow = SlowStore {
        inner: seeded_store().await,
        delay: Duration::from_secs(5),
    };
    let mut session = EditSession::load(&slow, home_key()).await.unwrap();
    session
        .apply(Mutation::RemoveProp {
            node_id: "hero".into(),
            key: "subtitle".into(),
        })
        .unwrap();

    let timed_out = tokio::time::timeout(Duration::from_millis(50), session.save(&slow)).await;
    assert!(timed_out.is_err());
    assert_eq!(session.state(), SessionState::SaveFailed);
    assert_eq!(session.last_error(), Some(SAVE_ABANDONED));
    assert!(session.is_dirty());

    let store = MemoryStore::new();
    session.save(&store).await.unwrap();
    assert_eq!(session.state(), SessionState::Saved);
    assert_eq!(&store.load(&home_key()).await.unwrap(), session.document());
}

#[tokio::test]
async fn test_new_page_from_template_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let key = DocumentKey::new("st-anne", "about");

    let doc = TemplateLibrary::builtin().instantiate("about").unwrap();
    let mut session = EditSession::new_unsaved(key.clone(), doc);
    assert!(session.is_dirty());

    session.save(&store).await.unwrap();
    assert!(!session.is_dirty());
    assert_eq!(store.list_pages("st-anne").await.unwrap(), vec!["about"]);

    let loaded = store.load(&key).await.unwrap();
    assert_eq!(&loaded, session.document());
}

#[tokio::test]
async fn test_preview_follows_preset_application() {
    let store = seeded_store().await;
    let session = EditSession::load(&store, home_key()).await.unwrap();
    let mut pipeline = Pipeline::new(session, Arc::new(Registry::with_builtins()));

    let presets = PresetLibrary::builtin();
    let banner = presets
        .list_presets("HeroSection", "st-anne")
        .into_iter()
        .find(|p| p.name == "Welcome Banner")
        .unwrap()
        .clone();

    let result = pipeline
        .apply_mutation(Mutation::ApplyPreset {
            node_id: "hero".into(),
            preset: banner.clone(),
        })
        .unwrap();
    assert!(result.warnings.is_empty());

    let hero = pipeline.session().document().get("hero").unwrap();
    for (key, value) in &banner.props {
        assert_eq!(&hero.props[key], value);
    }
    assert_eq!(hero.props["ctaHref"], json!("/visit"));

    pipeline.session_mut().save(&store).await.unwrap();
    assert!(!pipeline.session().is_dirty());
}

#[tokio::test]
async fn test_navigation_persisted_per_tenant() {
    let store = MemoryStore::new();
    let menu = NavigationMenu::new()
        .add_item(None, NavigationItem::new("home", "Home"))
        .unwrap()
        .set_link("home", Link::Page("home".into()))
        .unwrap();

    store.save_menu("st-anne", &menu).await.unwrap();
    assert_eq!(store.load_menu("st-anne").await.unwrap(), menu);
    assert!(store.load_menu("st-mark").await.unwrap().is_empty());
}
