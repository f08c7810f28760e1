use crate::bootstrap::AppRegistries;
use crate::dashboard::config::DashboardConfig;
use crate::dashboard::layout::GridPlan;
use crate::data_cache::DashboardDataCache;
use crate::notifications::{Notice, NotificationPoint, Severity};
use crate::page_context::PageContext;
use crate::widgets::{ActiveWidgets, WidgetRegistry, WidgetRenderer};
use eframe::egui;
#[cfg(test)]
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

/// Read-only state handed to widgets, module screens and notice producers on
/// every render pass. The view never fetches; the data layer fills the cache.
pub struct DashboardContext<'a> {
    pub data_cache: &'a DashboardDataCache,
    pub page: &'a PageContext,
}

/// The dashboard screen: notification slots on top, the widget grid below,
/// and an outro shown only when no widget produced output this pass.
pub struct DashboardView {
    config_path: PathBuf,
    pub config: DashboardConfig,
    pub plan: GridPlan,
    pub warnings: Vec<String>,
    renderer: WidgetRenderer,
    active: ActiveWidgets,
}

impl DashboardView {
    pub fn new(config_path: impl AsRef<Path>, widgets: &WidgetRegistry) -> Self {
        let path = config_path.as_ref().to_path_buf();
        let (config, plan, warnings) = load_layout(&path, widgets);
        Self {
            config_path: path,
            config,
            plan,
            warnings,
            renderer: WidgetRenderer::new(),
            active: ActiveWidgets::default(),
        }
    }

    pub fn reload(&mut self, widgets: &WidgetRegistry) {
        let (config, plan, warnings) = load_layout(&self.config_path, widgets);
        self.config = config;
        self.plan = plan;
        self.warnings = warnings;
        self.active.clear();
    }

    pub fn active_widgets(&self) -> &ActiveWidgets {
        &self.active
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, registries: &AppRegistries, ctx: &DashboardContext<'_>) {
        for notice in registries.notifications.resolve(NotificationPoint::Error, ctx) {
            notice_banner(ui, &notice);
        }
        for notice in registries
            .notifications
            .resolve(NotificationPoint::Dashboard, ctx)
        {
            notice_banner(ui, &notice);
        }

        self.grid_ui(ui, registries, ctx);

        if !self.active.any_active() {
            outro_ui(ui);
        }
    }

    fn grid_ui(&mut self, ui: &mut egui::Ui, registries: &AppRegistries, ctx: &DashboardContext<'_>) {
        let available = egui::vec2(ui.available_width(), ui.available_height());
        let col_width = available.x / self.plan.cols as f32;
        let row_height = available.y / self.plan.rows as f32;
        let (rect, _) = ui.allocate_exact_size(available, egui::Sense::hover());
        let mut child = ui.child_ui(rect, egui::Layout::top_down(egui::Align::LEFT));

        for slot in &self.plan.slots {
            let slot_rect = egui::Rect::from_min_size(
                rect.min
                    + egui::vec2(col_width * slot.col as f32, row_height * slot.row as f32),
                egui::vec2(
                    col_width * slot.col_span as f32,
                    row_height * slot.row_span as f32,
                ),
            );
            self.renderer.render(
                &mut child,
                &registries.widgets,
                &slot.widget,
                &slot.settings,
                Some(slot_rect),
                ctx,
                &mut self.active,
            );
        }
    }
}

fn load_layout(path: &Path, widgets: &WidgetRegistry) -> (DashboardConfig, GridPlan, Vec<String>) {
    let config = DashboardConfig::load(path, widgets).unwrap_or_default();
    let plan = GridPlan::build(&config, widgets);
    let mut warnings: Vec<String> = plan.rejected.iter().map(ToString::to_string).collect();
    if plan.slots.is_empty() {
        warnings.push("dashboard has no drawable slots".into());
    }
    (config, plan, warnings)
}

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Info => egui::Color32::LIGHT_BLUE,
        Severity::Success => egui::Color32::LIGHT_GREEN,
        Severity::Warning => egui::Color32::YELLOW,
        Severity::Error => egui::Color32::RED,
    }
}

fn notice_banner(ui: &mut egui::Ui, notice: &Notice) {
    #[cfg(test)]
    NOTICE_RECORDS.lock().unwrap().push(notice.id.clone());
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.colored_label(severity_color(notice.severity), &notice.title);
            ui.label(&notice.body);
        });
    });
}

fn outro_ui(ui: &mut egui::Ui) {
    #[cfg(test)]
    OUTRO_RECORDS.lock().unwrap().push(());
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("Nothing to show yet");
            ui.label("Connect a service to see its data here.");
        });
    });
}

#[cfg(test)]
static NOTICE_RECORDS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));
#[cfg(test)]
static OUTRO_RECORDS: Lazy<Mutex<Vec<()>>> = Lazy::new(|| Mutex::new(Vec::new()));
