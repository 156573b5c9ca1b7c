//! # Preset Library
//!
//! Holds the global presets and each tenant's own presets. Globals are fixed at
//! construction; tenant presets are added and removed one at a time and are
//! never allowed to touch a global, even one with the same name.

use crate::builtin::builtin_presets;
use crate::error::PresetError;
use crate::preset::{Preset, PresetScope};
use chrono::Utc;
use parchment_schema::Props;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    globals: Vec<Preset>,
    /// tenant id -> presets owned by that tenant
    tenants: BTreeMap<String, Vec<Preset>>,
}

impl PresetLibrary {
    /// An empty library with no globals
    pub fn new() -> Self {
        Self::default()
    }

    /// The library with the shipped global presets
    pub fn builtin() -> Self {
        Self::with_globals(builtin_presets())
    }

    pub fn with_globals(globals: Vec<Preset>) -> Self {
        Self {
            globals,
            tenants: BTreeMap::new(),
        }
    }

    /// Presets applicable to `component_type` for a tenant: globals first, then
    /// the tenant's own, each group ordered by name.
    pub fn list_presets(&self, component_type: &str, tenant_id: &str) -> Vec<&Preset> {
        let mut globals: Vec<&Preset> = self
            .globals
            .iter()
            .filter(|p| p.component_type == component_type)
            .collect();
        globals.sort_by(|a, b| by_name(a, b));

        let mut own: Vec<&Preset> = self
            .tenant_presets(tenant_id)
            .iter()
            .filter(|p| p.component_type == component_type)
            .collect();
        own.sort_by(|a, b| by_name(a, b));

        globals.extend(own);
        globals
    }

    /// Create a tenant preset. The new preset gets a fresh id, so an existing
    /// preset (global or not) with the same name is left alone.
    pub fn save_preset(
        &mut self,
        component_type: &str,
        tenant_id: &str,
        name: &str,
        props: Props,
    ) -> Result<Preset, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }

        let preset = Preset {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            component_type: component_type.to_string(),
            props,
            scope: PresetScope::tenant(tenant_id),
            created_at: Some(Utc::now()),
        };

        info!(
            tenant = tenant_id,
            preset_id = %preset.id,
            component_type,
            "Saved tenant preset"
        );
        self.tenants
            .entry(tenant_id.to_string())
            .or_default()
            .push(preset.clone());
        Ok(preset)
    }

    /// Remove one of the tenant's presets and return it
    pub fn delete_preset(&mut self, tenant_id: &str, preset_id: &str) -> Result<Preset, PresetError> {
        if self.globals.iter().any(|p| p.id == preset_id) {
            return Err(PresetError::GlobalPresetImmutable(preset_id.to_string()));
        }

        if let Some(own) = self.tenants.get_mut(tenant_id) {
            if let Some(index) = own.iter().position(|p| p.id == preset_id) {
                let removed = own.remove(index);
                debug!(tenant = tenant_id, preset_id, "Deleted tenant preset");
                return Ok(removed);
            }
        }

        let owned_elsewhere = self
            .tenants
            .values()
            .flatten()
            .any(|p| p.id == preset_id);
        if owned_elsewhere {
            Err(PresetError::NotOwner {
                preset_id: preset_id.to_string(),
            })
        } else {
            Err(PresetError::PresetNotFound(preset_id.to_string()))
        }
    }

    /// Look a preset up by id across globals and every tenant
    pub fn find(&self, preset_id: &str) -> Option<&Preset> {
        self.globals
            .iter()
            .chain(self.tenants.values().flatten())
            .find(|p| p.id == preset_id)
    }

    pub fn globals(&self) -> &[Preset] {
        &self.globals
    }

    pub fn tenant_presets(&self, tenant_id: &str) -> &[Preset] {
        self.tenants
            .get(tenant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace a tenant's presets with previously persisted ones.
    ///
    /// Entries scoped to another tenant, or marked global, are rejected.
    pub fn load_tenant_presets(
        &mut self,
        tenant_id: &str,
        presets: Vec<Preset>,
    ) -> Result<(), PresetError> {
        for preset in &presets {
            if preset.scope.tenant_id() != Some(tenant_id) {
                return Err(PresetError::Malformed(format!(
                    "preset '{}' is not scoped to tenant '{}'",
                    preset.id, tenant_id
                )));
            }
            if preset.name.trim().is_empty() {
                return Err(PresetError::EmptyName);
            }
        }
        debug!(tenant = tenant_id, count = presets.len(), "Loaded tenant presets");
        self.tenants.insert(tenant_id.to_string(), presets);
        Ok(())
    }

    /// A tenant's presets as JSON, for persistence
    pub fn export_tenant(&self, tenant_id: &str) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self.tenant_presets(tenant_id))?)
    }

    pub fn import_tenant(&mut self, tenant_id: &str, json: &str) -> Result<(), PresetError> {
        let presets: Vec<Preset> = serde_json::from_str(json)?;
        self.load_tenant_presets(tenant_id, presets)
    }
}

/// Case-insensitive name order, id as tie-break so equal names stay stable
fn by_name(a: &Preset, b: &Preset) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Props {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_builtin_globals_cover_catalog_types() {
        let library = PresetLibrary::builtin();
        for component_type in ["HeroSection", "TextBlock", "ButtonLink", "DonationCallout"] {
            assert!(
                !library.list_presets(component_type, "any").is_empty(),
                "no global preset for {}",
                component_type
            );
        }
        assert!(library.globals().iter().all(|p| p.scope.is_global()));
    }

    #[test]
    fn test_list_orders_globals_then_tenant() {
        let mut library = PresetLibrary::with_globals(vec![
            Preset::global("g2", "Zebra", "HeroSection", Props::new()),
            Preset::global("g1", "alpha", "HeroSection", Props::new()),
            Preset::global("g3", "Other type", "TextBlock", Props::new()),
        ]);
        library
            .save_preset("HeroSection", "st-anne", "Christmas", Props::new())
            .unwrap();
        library
            .save_preset("HeroSection", "st-anne", "Advent", Props::new())
            .unwrap();
        library
            .save_preset("HeroSection", "st-mark", "Another parish", Props::new())
            .unwrap();

        let names: Vec<&str> = library
            .list_presets("HeroSection", "st-anne")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "Zebra", "Advent", "Christmas"]);
    }

    #[test]
    fn test_save_rejects_blank_name() {
        let mut library = PresetLibrary::new();
        assert_eq!(
            library.save_preset("HeroSection", "st-anne", "   ", Props::new()),
            Err(PresetError::EmptyName)
        );
        assert!(library.tenant_presets("st-anne").is_empty());
    }

    #[test]
    fn test_save_does_not_shadow_global() {
        let mut library = PresetLibrary::builtin();
        let before = library.globals().to_vec();
        let saved = library
            .save_preset(
                "HeroSection",
                "st-anne",
                "Welcome Banner",
                props(json!({ "title": "Ours" })),
            )
            .unwrap();

        assert_eq!(library.globals(), before.as_slice());
        assert_eq!(saved.scope, PresetScope::tenant("st-anne"));
        assert!(saved.created_at.is_some());
        let listed = library.list_presets("HeroSection", "st-anne");
        assert_eq!(
            listed
                .iter()
                .filter(|p| p.name == "Welcome Banner")
                .count(),
            2
        );
    }

    #[test]
    fn test_delete_rules() {
        let mut library = PresetLibrary::builtin();
        let saved = library
            .save_preset("ButtonLink", "st-anne", "Mine", Props::new())
            .unwrap();

        assert_eq!(
            library.delete_preset("st-anne", "global-button-primary"),
            Err(PresetError::GlobalPresetImmutable(
                "global-button-primary".to_string()
            ))
        );
        assert_eq!(
            library.delete_preset("st-mark", &saved.id),
            Err(PresetError::NotOwner {
                preset_id: saved.id.clone()
            })
        );
        assert_eq!(
            library.delete_preset("st-anne", "nope"),
            Err(PresetError::PresetNotFound("nope".to_string()))
        );

        assert_eq!(library.delete_preset("st-anne", &saved.id), Ok(saved.clone()));
        assert!(library.find(&saved.id).is_none());
    }

    #[test]
    fn test_export_import_tenant() {
        let mut library = PresetLibrary::new();
        library
            .save_preset("TextBlock", "st-anne", "Bulletin", props(json!({ "text": "Hi" })))
            .unwrap();
        let json = library.export_tenant("st-anne").unwrap();

        let mut restored = PresetLibrary::new();
        restored.import_tenant("st-anne", &json).unwrap();
        assert_eq!(
            restored.tenant_presets("st-anne"),
            library.tenant_presets("st-anne")
        );

        let mut wrong = PresetLibrary::new();
        assert!(matches!(
            wrong.import_tenant("st-mark", &json),
            Err(PresetError::Malformed(_))
        ));
    }
}
