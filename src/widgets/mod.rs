mod popular_keywords;
mod renderer;
mod search_funnel;
mod speed_score;

pub use popular_keywords::PopularKeywordsWidget;
pub use renderer::{ActiveWidgets, WidgetRenderer};
pub use search_funnel::SearchFunnelWidget;
pub use speed_score::SpeedScoreWidget;

use crate::dashboard::DashboardContext;
use crate::registry::{Registry, RegistryError};
use eframe::egui;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Dashboard widget. `has_content` answers "would I show anything right now"
/// without rendering; it must be cheap and side-effect free because the
/// renderer consults it before every mount to keep the active-widget state
/// honest.
pub trait Widget: Send {
    fn has_content(&self, _ctx: &DashboardContext<'_>) -> bool {
        true
    }

    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>);

    fn on_config_updated(&mut self, _settings: &Value) {}
}

type WidgetCtor = Arc<dyn Fn(&Value) -> Box<dyn Widget> + Send + Sync>;

/// Registered description of a widget: how to build it from JSON settings,
/// what to title it, and whether the shared chrome applies.
#[derive(Clone)]
pub struct WidgetDescriptor {
    title: String,
    wrap_widget: bool,
    ctor: WidgetCtor,
    default_settings: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl WidgetDescriptor {
    pub fn new<T, C>(title: &str, build: fn(C) -> T) -> Self
    where
        T: Widget + 'static,
        C: DeserializeOwned + Serialize + Default + 'static,
    {
        Self {
            title: title.to_string(),
            wrap_widget: true,
            ctor: Arc::new(move |value| {
                let cfg = serde_json::from_value::<C>(value.clone()).unwrap_or_default();
                Box::new(build(cfg))
            }),
            default_settings: Arc::new(|| {
                serde_json::to_value(C::default()).unwrap_or_else(|_| json!({}))
            }),
        }
    }

    /// Skip the shared chrome; the widget draws its own frame.
    pub fn without_chrome(mut self) -> Self {
        self.wrap_widget = false;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn wrap_widget(&self) -> bool {
        self.wrap_widget
    }

    pub fn default_settings(&self) -> Value {
        (self.default_settings)()
    }

    pub fn create(&self, settings: &Value) -> Box<dyn Widget> {
        let settings = if settings.is_null() {
            self.default_settings()
        } else {
            settings.clone()
        };
        (self.ctor)(&settings)
    }

    /// Identity of the registered factory, used to detect re-registration
    /// between render passes.
    pub(crate) fn factory_id(&self) -> usize {
        Arc::as_ptr(&self.ctor) as *const () as usize
    }
}

#[derive(Clone, Default)]
pub struct WidgetRegistry {
    inner: Registry<WidgetDescriptor>,
}

impl WidgetRegistry {
    /// Register a widget, replacing any previous registration for the slug.
    pub fn register(&mut self, slug: &str, descriptor: WidgetDescriptor) -> Result<(), RegistryError> {
        self.inner.insert(slug, descriptor)?;
        Ok(())
    }

    /// Strict registration that rejects duplicate slugs.
    pub fn register_strict(
        &mut self,
        slug: &str,
        descriptor: WidgetDescriptor,
    ) -> Result<(), RegistryError> {
        self.inner.try_insert(slug, descriptor)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.inner.contains(slug)
    }

    pub fn descriptor(&self, slug: &str) -> Option<&WidgetDescriptor> {
        self.inner.get(slug)
    }

    pub fn default_settings(&self, slug: &str) -> Option<Value> {
        self.inner.get(slug).map(|d| d.default_settings())
    }

    /// Slugs in registration order.
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
    use serde::Deserialize;

    #[derive(Default, Serialize, Deserialize)]
    struct NullConfig;

    struct NullWidget;

    impl Widget for NullWidget {
        fn render(&mut self, _ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) {}
    }

    fn descriptor(title: &str) -> WidgetDescriptor {
        WidgetDescriptor::new(title, |_: NullConfig| NullWidget)
    }

    #[test]
    fn register_overwrites_by_default() {
        let mut reg = WidgetRegistry::default();
        reg.register("card", descriptor("First")).unwrap();
        reg.register("card", descriptor("Second")).unwrap();
        assert_eq!(reg.descriptor("card").unwrap().title(), "Second");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn strict_registration_errors_on_duplicate() {
        let mut reg = WidgetRegistry::default();
        reg.register_strict("card", descriptor("First")).unwrap();
        assert_eq!(
            reg.register_strict("card", descriptor("Second")),
            Err(RegistryError::Duplicate("card".into()))
        );
        assert_eq!(reg.descriptor("card").unwrap().title(), "First");
    }

    #[test]
    fn chrome_defaults_on_and_can_be_disabled() {
        assert!(descriptor("a").wrap_widget());
        assert!(!descriptor("a").without_chrome().wrap_widget());
    }

    #[test]
    fn null_settings_fall_back_to_defaults() {
        let d = descriptor("a");
        assert_eq!(d.default_settings(), json!(null));
        // A unit config serialises to null; object configs produce `{}`.
        let _widget = d.create(&Value::Null);
    }
}
