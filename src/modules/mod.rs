mod pagespeed;
mod search_console;

pub use pagespeed::register as register_pagespeed;
pub use search_console::register as register_search_console;

use crate::dashboard::DashboardContext;
use crate::registry::{Registry, RegistryError};
use eframe::egui;
use std::sync::Arc;

/// Setup or settings screen contributed by an integration module.
pub trait ModuleUi: Send {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>);
}

type ModuleUiFactory = Arc<dyn Fn() -> Box<dyn ModuleUi> + Send + Sync>;

/// One registered integration. Built once at bootstrap and never mutated.
#[derive(Clone)]
pub struct ModuleDefinition {
    slug: String,
    name: String,
    setup: ModuleUiFactory,
    settings: Option<ModuleUiFactory>,
}

impl ModuleDefinition {
    pub fn new(
        slug: &str,
        name: &str,
        setup: impl Fn() -> Box<dyn ModuleUi> + Send + Sync + 'static,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            setup: Arc::new(setup),
            settings: None,
        }
    }

    pub fn with_settings(
        mut self,
        settings: impl Fn() -> Box<dyn ModuleUi> + Send + Sync + 'static,
    ) -> Self {
        self.settings = Some(Arc::new(settings));
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_settings(&self) -> bool {
        self.settings.is_some()
    }

    pub fn create_setup(&self) -> Box<dyn ModuleUi> {
        (self.setup)()
    }

    pub fn create_settings(&self) -> Option<Box<dyn ModuleUi>> {
        self.settings.as_ref().map(|factory| factory())
    }
}

#[derive(Clone, Default)]
pub struct ModuleRegistry {
    inner: Registry<ModuleDefinition>,
}

impl ModuleRegistry {
    /// Register a module, replacing any previous registration for the slug.
    /// A definition without a display name is rejected up front rather than
    /// failing on some later render pass.
    pub fn register(&mut self, definition: ModuleDefinition) -> Result<(), RegistryError> {
        Self::validate(&definition)?;
        let slug = definition.slug.clone();
        self.inner.insert(&slug, definition)?;
        tracing::debug!(%slug, "module registered");
        Ok(())
    }

    /// Strict registration that rejects duplicate slugs.
    pub fn register_strict(&mut self, definition: ModuleDefinition) -> Result<(), RegistryError> {
        Self::validate(&definition)?;
        let slug = definition.slug.clone();
        self.inner.try_insert(&slug, definition)
    }

    fn validate(definition: &ModuleDefinition) -> Result<(), RegistryError> {
        if definition.name.trim().is_empty() {
            return Err(RegistryError::IncompleteDefinition {
                slug: definition.slug.clone(),
                field: "name",
            });
        }
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<&ModuleDefinition> {
        self.inner.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.inner.contains(slug)
    }

    /// Definitions in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.inner.iter().map(|(_, def)| def)
    }

    pub fn slugs(&self) -> Vec<String> {
        self.inner.slugs().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopUi;

    impl ModuleUi for NoopUi {
        fn ui(&mut self, _ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) {}
    }

    fn definition(slug: &str, name: &str) -> ModuleDefinition {
        ModuleDefinition::new(slug, name, || Box::new(NoopUi))
    }

    #[test]
    fn register_replaces_existing_definition() {
        let mut reg = ModuleRegistry::default();
        reg.register(definition("optimize", "Optimize")).unwrap();
        reg.register(definition("optimize", "Optimize v2")).unwrap();
        assert_eq!(reg.get("optimize").unwrap().name(), "Optimize v2");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let mut reg = ModuleRegistry::default();
        reg.register_strict(definition("optimize", "Optimize"))
            .unwrap();
        assert_eq!(
            reg.register_strict(definition("optimize", "Other")),
            Err(RegistryError::Duplicate("optimize".into()))
        );
    }

    #[test]
    fn incomplete_definition_is_rejected_at_registration() {
        let mut reg = ModuleRegistry::default();
        assert_eq!(
            reg.register(definition("optimize", "  ")),
            Err(RegistryError::IncompleteDefinition {
                slug: "optimize".into(),
                field: "name",
            })
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn settings_screen_is_optional() {
        let with = definition("a", "A").with_settings(|| Box::new(NoopUi));
        let without = definition("b", "B");
        assert!(with.has_settings());
        assert!(with.create_settings().is_some());
        assert!(!without.has_settings());
        assert!(without.create_settings().is_none());
    }
}
