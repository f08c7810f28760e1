use super::{Widget, WidgetDescriptor, WidgetRegistry};
use crate::dashboard::DashboardContext;
use eframe::egui;
#[cfg(test)]
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

/// Which widgets currently produce visible output. Owned by the hosting view
/// and mutated only by the renderer, so sibling layout logic (e.g. the
/// empty-dashboard outro) can read it after the pass.
///
/// The map is re-derivable from scratch; it is never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveWidgets {
    map: HashMap<String, bool>,
}

impl ActiveWidgets {
    pub fn is_active(&self, slug: &str) -> bool {
        self.map.get(slug).copied().unwrap_or(false)
    }

    /// `None` when the renderer has never tracked the slug.
    pub fn state(&self, slug: &str) -> Option<bool> {
        self.map.get(slug).copied()
    }

    pub fn any_active(&self) -> bool {
        self.map.values().any(|active| *active)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    fn set(&mut self, slug: &str, active: bool) {
        self.map.insert(slug.to_string(), active);
    }
}

struct WidgetRuntime {
    factory_id: usize,
    settings: Value,
    widget: Box<dyn Widget>,
}

/// Resolves widget slugs against the registry and mounts the ones that have
/// content. Widget instances are cached per slug between passes; a slug whose
/// registration disappears or is replaced is rebuilt from scratch.
#[derive(Default)]
pub struct WidgetRenderer {
    instances: HashMap<String, WidgetRuntime>,
}

impl WidgetRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one widget slot. Produces no return value on purpose: activity
    /// is reported only through `active`, which siblings read after the pass.
    ///
    /// An unresolved slug is a normal state, not an error. It flips an active
    /// entry back to inactive but never creates one, so slugs that were never
    /// mountable stay untracked.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        registry: &WidgetRegistry,
        slug: &str,
        settings: &Value,
        cell: Option<egui::Rect>,
        ctx: &DashboardContext<'_>,
        active: &mut ActiveWidgets,
    ) {
        let Some(descriptor) = registry.descriptor(slug) else {
            self.instances.remove(slug);
            if active.state(slug).unwrap_or(false) {
                active.set(slug, false);
            }
            return;
        };

        let runtime = self.runtime_for(slug, descriptor, settings);

        if !runtime.widget.has_content(ctx) {
            active.set(slug, false);
            return;
        }
        if !active.is_active(slug) {
            active.set(slug, true);
        }

        match cell {
            Some(rect) => {
                let clip = rect.intersect(ui.clip_rect());
                ui.allocate_ui_at_rect(rect, |ui| {
                    ui.set_clip_rect(clip);
                    ui.set_min_size(rect.size());
                    mount(&mut runtime.widget, descriptor, ui, ctx);
                });
            }
            None => mount(&mut runtime.widget, descriptor, ui, ctx),
        }
    }

    fn runtime_for(
        &mut self,
        slug: &str,
        descriptor: &WidgetDescriptor,
        settings: &Value,
    ) -> &mut WidgetRuntime {
        let settings = if settings.is_null() {
            descriptor.default_settings()
        } else {
            settings.clone()
        };

        let rebuild = match self.instances.get(slug) {
            Some(runtime) => runtime.factory_id != descriptor.factory_id(),
            None => true,
        };
        if rebuild {
            self.instances.insert(
                slug.to_string(),
                WidgetRuntime {
                    factory_id: descriptor.factory_id(),
                    settings: settings.clone(),
                    widget: descriptor.create(&settings),
                },
            );
        }

        let runtime = self
            .instances
            .get_mut(slug)
            .expect("instance inserted above");
        if runtime.settings != settings {
            runtime.widget.on_config_updated(&settings);
            runtime.settings = settings;
        }
        runtime
    }
}

fn mount(
    widget: &mut Box<dyn Widget>,
    descriptor: &WidgetDescriptor,
    ui: &mut egui::Ui,
    ctx: &DashboardContext<'_>,
) {
    if descriptor.wrap_widget() {
        #[cfg(test)]
        CHROME_RECORDS
            .lock()
            .unwrap()
            .push(descriptor.title().to_string());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical(|ui| {
                ui.heading(descriptor.title());
                widget.render(ui, ctx);
            });
        });
    } else {
        widget.render(ui, ctx);
    }
}

#[cfg(test)]
static CHROME_RECORDS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));
