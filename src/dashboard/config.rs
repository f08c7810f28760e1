use crate::widgets::WidgetRegistry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

fn default_version() -> u32 {
    1
}

fn default_rows() -> u8 {
    2
}

fn default_cols() -> u8 {
    2
}

fn default_span() -> u8 {
    1
}

/// Grid dimensions for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: u8,
    #[serde(default = "default_cols")]
    pub cols: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

/// One widget placement on the grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub widget: String,
    pub row: i32,
    pub col: i32,
    #[serde(default = "default_span")]
    pub row_span: u8,
    #[serde(default = "default_span")]
    pub col_span: u8,
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl SlotConfig {
    pub fn with_widget(widget: &str, row: i32, col: i32) -> Self {
        Self {
            id: None,
            widget: widget.to_string(),
            row,
            col,
            row_span: default_span(),
            col_span: default_span(),
            settings: serde_json::Value::Object(Default::default()),
        }
    }
}

/// Persisted dashboard layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            grid: GridConfig::default(),
            slots: vec![
                SlotConfig {
                    col_span: 2,
                    ..SlotConfig::with_widget("search-funnel", 0, 0)
                },
                SlotConfig::with_widget("popular-keywords", 1, 0),
                SlotConfig::with_widget("speed-score", 1, 1),
            ],
        }
    }
}

impl DashboardConfig {
    /// Load a layout from disk. A missing or empty file yields the default
    /// layout; slots for unknown widgets are dropped with a warning.
    pub fn load(path: impl AsRef<Path>, registry: &WidgetRegistry) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut cfg: DashboardConfig = serde_json::from_str(&content)?;
        for warning in cfg.sanitize(registry) {
            tracing::warn!("{warning}");
        }
        Ok(cfg)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Drop slots whose widget is not registered and fill null settings with
    /// the registered defaults.
    pub fn sanitize(&mut self, registry: &WidgetRegistry) -> Vec<String> {
        let mut warnings = Vec::new();
        self.slots.retain(|slot| {
            if slot.widget.is_empty() {
                return false;
            }
            if !registry.contains(&slot.widget) {
                warnings.push(format!("unknown dashboard widget '{}' dropped", slot.widget));
                return false;
            }
            true
        });
        for slot in &mut self.slots {
            if slot.settings.is_null() {
                slot.settings = registry
                    .default_settings(&slot.widget)
                    .unwrap_or_else(|| json!({}));
            }
        }
        warnings
    }
}
