use super::{ModuleDefinition, ModuleUi};
use crate::bootstrap::AppRegistries;
use crate::dashboard::DashboardContext;
use crate::widgets::{SpeedScoreWidget, WidgetDescriptor};
use eframe::egui;

#[derive(Default)]
struct PagespeedSetup;

impl ModuleUi for PagespeedSetup {
    fn ui(&mut self, ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) {
        ui.heading("PageSpeed Insights");
        ui.label("No account is needed; reports are fetched for the public site URL.");
    }
}

/// Register the PageSpeed integration and its dashboard widget.
pub fn register(registries: &mut AppRegistries) -> anyhow::Result<()> {
    registries.modules.register(ModuleDefinition::new(
        "pagespeed",
        "PageSpeed Insights",
        || Box::<PagespeedSetup>::default(),
    ))?;

    // The score list draws its own frame, so the shared chrome is skipped.
    registries.widgets.register(
        "speed-score",
        WidgetDescriptor::new("Speed scores", SpeedScoreWidget::new).without_chrome(),
    )?;

    Ok(())
}
