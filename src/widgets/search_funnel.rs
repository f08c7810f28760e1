use super::Widget;
use crate::dashboard::DashboardContext;
use eframe::egui;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_row_limit() -> usize {
    5
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFunnelConfig {
    #[serde(default = "default_row_limit")]
    pub row_limit: usize,
}

impl Default for SearchFunnelConfig {
    fn default() -> Self {
        Self {
            row_limit: default_row_limit(),
        }
    }
}

/// Impressions-to-clicks funnel over the search query report.
pub struct SearchFunnelWidget {
    cfg: SearchFunnelConfig,
}

impl SearchFunnelWidget {
    pub fn new(cfg: SearchFunnelConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for SearchFunnelWidget {
    fn has_content(&self, ctx: &DashboardContext<'_>) -> bool {
        !ctx.data_cache.snapshot().search_queries.is_empty()
    }

    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) {
        let snapshot = ctx.data_cache.snapshot();
        let impressions: u64 = snapshot
            .search_queries
            .iter()
            .map(|row| u64::from(row.impressions))
            .sum();
        let clicks: u64 = snapshot
            .search_queries
            .iter()
            .map(|row| u64::from(row.clicks))
            .sum();
        let ctr = if impressions > 0 {
            clicks as f64 / impressions as f64 * 100.0
        } else {
            0.0
        };

        ui.label(format!("{impressions} impressions"));
        ui.label(format!("{clicks} clicks ({ctr:.1}% CTR)"));
        ui.separator();
        for row in snapshot.search_queries.iter().take(self.cfg.row_limit) {
            ui.horizontal(|ui| {
                ui.label(&row.query);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} / {}", row.clicks, row.impressions));
                });
            });
        }
    }

    fn on_config_updated(&mut self, settings: &Value) {
        if let Ok(cfg) = serde_json::from_value(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
