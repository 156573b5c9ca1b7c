//! Starter documents for new pages.
//!
//! Templates are kept in their stored JSON form and go through the same
//! validating `deserialize` as any page loaded from storage.

use crate::errors::EditorError;
use parchment_schema::{deserialize, Document};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub description: String,
    source: String,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: BTreeMap<String, Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The templates every tenant starts with
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.register("blank", "An empty page", include_str!("../templates/blank.json"));
        library.register(
            "home",
            "Welcome banner, Mass times, events and giving",
            include_str!("../templates/home.json"),
        );
        library.register(
            "about",
            "Parish history with a photo and contact button",
            include_str!("../templates/about.json"),
        );
        library
    }

    /// Add or replace a template from its stored JSON
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) {
        let name = name.into();
        self.templates.insert(
            name.clone(),
            Template {
                name,
                description: description.into(),
                source: source.into(),
            },
        );
    }

    /// A fresh document built from the named template
    pub fn instantiate(&self, name: &str) -> Result<Document, EditorError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| EditorError::TemplateNotFound(name.to_string()))?;
        Ok(deserialize(template.source.as_bytes())?)
    }

    /// Templates sorted by name
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parchment_evaluator::{render, validate_document, Registry};

    #[test]
    fn test_builtin_templates_are_valid_and_render_cleanly() {
        let library = TemplateLibrary::builtin();
        let registry = Registry::with_builtins();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["about", "blank", "home"]);

        for name in library.names() {
            let doc = library.instantiate(name).unwrap();
            assert!(
                validate_document(&doc, &registry).is_empty(),
                "template {} has warnings",
                name
            );
            assert!(!render(&doc, &registry).has_errors(), "template {} renders errors", name);
        }
    }

    #[test]
    fn test_unknown_template() {
        assert!(matches!(
            TemplateLibrary::builtin().instantiate("gallery"),
            Err(EditorError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_template_source_is_rejected() {
        let mut library = TemplateLibrary::new();
        library.register("broken", "", r#"{"rootId":"missing","nodes":{}}"#);
        assert!(matches!(
            library.instantiate("broken"),
            Err(EditorError::Schema(_))
        ));
    }
}
