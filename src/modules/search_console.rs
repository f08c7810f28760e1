use super::{ModuleDefinition, ModuleUi};
use crate::bootstrap::AppRegistries;
use crate::dashboard::DashboardContext;
use crate::widgets::{PopularKeywordsWidget, SearchFunnelWidget, WidgetDescriptor};
use eframe::egui;

#[derive(Default)]
struct SearchConsoleSetup {
    property: String,
}

impl ModuleUi for SearchConsoleSetup {
    fn ui(&mut self, ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) {
        ui.heading("Connect Search Console");
        ui.label("Enter the property this site is verified for.");
        ui.horizontal(|ui| {
            ui.label("Property");
            ui.text_edit_singleline(&mut self.property);
        });
        if self.property.trim().is_empty() {
            ui.small("A property URL is required before data can be fetched.");
        }
    }
}

#[derive(Default)]
struct SearchConsoleSettings {
    include_discover: bool,
}

impl ModuleUi for SearchConsoleSettings {
    fn ui(&mut self, ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) {
        ui.heading("Search Console");
        ui.checkbox(&mut self.include_discover, "Include Discover traffic");
    }
}

/// Register the Search Console integration and its dashboard widgets.
pub fn register(registries: &mut AppRegistries) -> anyhow::Result<()> {
    registries.modules.register(
        ModuleDefinition::new("search-console", "Search Console", || {
            Box::<SearchConsoleSetup>::default()
        })
        .with_settings(|| Box::<SearchConsoleSettings>::default()),
    )?;

    registries.widgets.register(
        "search-funnel",
        WidgetDescriptor::new("Search funnel", SearchFunnelWidget::new),
    )?;
    registries.widgets.register(
        "popular-keywords",
        WidgetDescriptor::new("Popular keywords", PopularKeywordsWidget::new),
    )?;

    Ok(())
}
