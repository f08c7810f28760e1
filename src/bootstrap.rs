use crate::modules::{self, ModuleRegistry};
use crate::notifications::{attach_default_producers, NotificationBus};
use crate::page_context::PageContext;
use crate::widgets::WidgetRegistry;

/// The explicitly constructed registries every other component reads from.
/// Nothing registers itself through load-time side effects; everything goes
/// through [`bootstrap`].
#[derive(Default)]
pub struct AppRegistries {
    pub modules: ModuleRegistry,
    pub widgets: WidgetRegistry,
    pub notifications: NotificationBus,
}

/// A module's one-time registration hook.
pub type ModuleInit = fn(&mut AppRegistries) -> anyhow::Result<()>;

/// The stock integrations, in the order they register.
pub fn builtin_modules() -> &'static [ModuleInit] {
    const INITS: &[ModuleInit] = &[
        modules::register_search_console,
        modules::register_pagespeed,
    ];
    INITS
}

/// Run every module's registration hook in the given order, then attach the
/// notification producers selected by the page context. Must complete before
/// the first render pass; registries are read-only afterwards.
pub fn bootstrap(inits: &[ModuleInit], page: &PageContext) -> anyhow::Result<AppRegistries> {
    let mut registries = AppRegistries::default();
    for init in inits {
        init(&mut registries)?;
    }
    attach_default_producers(&mut registries.notifications, page);
    tracing::info!(
        modules = registries.modules.len(),
        widgets = registries.widgets.len(),
        "registries initialised"
    );
    Ok(registries)
}
