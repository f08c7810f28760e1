use eframe::egui;
use serde_json::{json, Value};
use site_console::bootstrap::{bootstrap, builtin_modules};
use site_console::dashboard::DashboardContext;
use site_console::data_cache::{DashboardDataCache, SearchQueryRow};
use site_console::page_context::PageContext;
use site_console::widgets::{ActiveWidgets, WidgetRenderer};

struct Fixture {
    registries: site_console::bootstrap::AppRegistries,
    data: DashboardDataCache,
    page: PageContext,
    renderer: WidgetRenderer,
    active: ActiveWidgets,
}

impl Fixture {
    fn new() -> Self {
        Self {
            registries: bootstrap(builtin_modules(), &PageContext::default()).unwrap(),
            data: DashboardDataCache::new(),
            page: PageContext::default(),
            renderer: WidgetRenderer::new(),
            active: ActiveWidgets::default(),
        }
    }

    fn render(&mut self, slug: &str, settings: &Value) {
        let ctx = DashboardContext {
            data_cache: &self.data,
            page: &self.page,
        };
        let renderer = &mut self.renderer;
        let registry = &self.registries.widgets;
        let active = &mut self.active;
        egui::__run_test_ui(|ui| {
            renderer.render(ui, registry, slug, settings, None, &ctx, active);
        });
    }
}

#[test]
fn never_registered_slug_leaves_state_unset() {
    let mut fixture = Fixture::new();
    fixture.render("does-not-exist", &Value::Null);
    assert_eq!(fixture.active.state("does-not-exist"), None);
    assert!(!fixture.active.any_active());
}

#[test]
fn search_funnel_without_data_is_inactive() {
    let mut fixture = Fixture::new();
    fixture.render("search-funnel", &Value::Null);
    assert_eq!(fixture.active.state("search-funnel"), Some(false));
    assert!(!fixture.active.any_active());
}

#[test]
fn search_funnel_with_data_becomes_active() {
    let mut fixture = Fixture::new();
    fixture.data.set_search_queries(vec![SearchQueryRow {
        query: "example".into(),
        clicks: 5,
        impressions: 100,
    }]);
    fixture.render("search-funnel", &json!({ "row_limit": 3 }));
    assert_eq!(fixture.active.state("search-funnel"), Some(true));
    assert!(fixture.active.any_active());
}

#[test]
fn data_disappearing_between_passes_flips_state_back() {
    let mut fixture = Fixture::new();
    fixture.data.set_search_queries(vec![SearchQueryRow {
        query: "example".into(),
        clicks: 5,
        impressions: 100,
    }]);
    fixture.render("popular-keywords", &Value::Null);
    assert_eq!(fixture.active.state("popular-keywords"), Some(true));

    fixture.data.set_search_queries(Vec::new());
    fixture.render("popular-keywords", &Value::Null);
    assert_eq!(fixture.active.state("popular-keywords"), Some(false));
}

#[test]
fn each_builtin_widget_tracks_its_own_state() {
    let mut fixture = Fixture::new();
    fixture.data.set_search_queries(vec![SearchQueryRow {
        query: "example".into(),
        clicks: 5,
        impressions: 100,
    }]);
    fixture.render("search-funnel", &Value::Null);
    fixture.render("speed-score", &Value::Null);

    assert_eq!(fixture.active.state("search-funnel"), Some(true));
    // No speed reports were pushed, so the speed widget stays inactive.
    assert_eq!(fixture.active.state("speed-score"), Some(false));
}
