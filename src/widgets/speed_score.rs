use super::Widget;
use crate::dashboard::DashboardContext;
use eframe::egui;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_slow_threshold() -> u8 {
    50
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeedScoreConfig {
    /// Scores below this are highlighted as slow.
    #[serde(default = "default_slow_threshold")]
    pub slow_threshold: u8,
}

impl Default for SpeedScoreConfig {
    fn default() -> Self {
        Self {
            slow_threshold: default_slow_threshold(),
        }
    }
}

/// Per-page performance scores from the speed report.
pub struct SpeedScoreWidget {
    cfg: SpeedScoreConfig,
}

impl SpeedScoreWidget {
    pub fn new(cfg: SpeedScoreConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for SpeedScoreWidget {
    fn has_content(&self, ctx: &DashboardContext<'_>) -> bool {
        !ctx.data_cache.snapshot().speed_reports.is_empty()
    }

    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) {
        let snapshot = ctx.data_cache.snapshot();
        // Registered without the shared chrome; the widget frames itself.
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong("Speed scores");
            for report in snapshot.speed_reports.iter() {
                ui.horizontal(|ui| {
                    ui.label(&report.page);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if report.score < self.cfg.slow_threshold {
                            ui.colored_label(egui::Color32::RED, report.score.to_string());
                        } else {
                            ui.label(report.score.to_string());
                        }
                    });
                });
            }
        });
    }

    fn on_config_updated(&mut self, settings: &Value) {
        if let Ok(cfg) = serde_json::from_value(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
