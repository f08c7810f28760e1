use super::Widget;
use crate::dashboard::DashboardContext;
use crate::data_cache::SearchQueryRow;
use eframe::egui;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_keyword_limit() -> usize {
    10
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopularKeywordsConfig {
    #[serde(default = "default_keyword_limit")]
    pub limit: usize,
}

impl Default for PopularKeywordsConfig {
    fn default() -> Self {
        Self {
            limit: default_keyword_limit(),
        }
    }
}

/// Top search queries by click count.
pub struct PopularKeywordsWidget {
    cfg: PopularKeywordsConfig,
}

impl PopularKeywordsWidget {
    pub fn new(cfg: PopularKeywordsConfig) -> Self {
        Self { cfg }
    }

    fn top_rows(&self, rows: &[SearchQueryRow]) -> Vec<SearchQueryRow> {
        let mut rows = rows.to_vec();
        rows.sort_by(|a, b| b.clicks.cmp(&a.clicks));
        rows.truncate(self.cfg.limit);
        rows
    }
}

impl Widget for PopularKeywordsWidget {
    fn has_content(&self, ctx: &DashboardContext<'_>) -> bool {
        !ctx.data_cache.snapshot().search_queries.is_empty()
    }

    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) {
        let snapshot = ctx.data_cache.snapshot();
        for row in self.top_rows(&snapshot.search_queries) {
            ui.horizontal(|ui| {
                ui.label(&row.query);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} clicks", row.clicks));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn row(query: &str, clicks: u32) -> SearchQueryRow {
        SearchQueryRow {
            query: query.into(),
            clicks,
            impressions: clicks * 10,
        }
    }

    #[test]
    fn top_rows_sorts_by_clicks_and_truncates() {
        let widget = PopularKeywordsWidget::new(PopularKeywordsConfig { limit: 2 });
        let rows = widget.top_rows(&[row("a", 1), row("b", 9), row("c", 4)]);
        let queries: Vec<&str> = rows.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["b", "c"]);
    }
}
