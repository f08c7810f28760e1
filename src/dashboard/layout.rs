use crate::dashboard::config::{DashboardConfig, SlotConfig};
use crate::widgets::WidgetRegistry;
use serde_json::Value;
use thiserror::Error;

/// Why a configured slot was left out of the plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("widget '{0}' is not registered")]
    UnknownWidget(String),
    #[error("widget '{widget}' lies outside the {rows}x{cols} grid")]
    OutOfGrid {
        widget: String,
        rows: usize,
        cols: usize,
    },
    #[error("widget '{0}' overlaps an earlier slot")]
    Overlap(String),
}

/// A slot that passed placement checks, with grid coordinates resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSlot {
    pub widget: String,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
    pub settings: Value,
}

impl PlacedSlot {
    fn intersects(&self, row: usize, col: usize, row_span: usize, col_span: usize) -> bool {
        row < self.row + self.row_span
            && self.row < row + row_span
            && col < self.col + self.col_span
            && self.col < col + col_span
    }
}

/// Placement of the configured slots on the dashboard grid, built once per
/// reload. Slots that do not fit are collected as rejections so the view can
/// surface them instead of drawing garbage.
#[derive(Debug, Clone, Default)]
pub struct GridPlan {
    pub rows: usize,
    pub cols: usize,
    pub slots: Vec<PlacedSlot>,
    pub rejected: Vec<PlacementError>,
}

impl GridPlan {
    pub fn build(cfg: &DashboardConfig, registry: &WidgetRegistry) -> Self {
        let mut plan = Self {
            rows: usize::from(cfg.grid.rows.max(1)),
            cols: usize::from(cfg.grid.cols.max(1)),
            slots: Vec::new(),
            rejected: Vec::new(),
        };
        for slot in &cfg.slots {
            match plan.place(slot, registry) {
                Ok(placed) => plan.slots.push(placed),
                Err(err) => {
                    tracing::warn!("{err}");
                    plan.rejected.push(err);
                }
            }
        }
        plan
    }

    fn place(
        &self,
        slot: &SlotConfig,
        registry: &WidgetRegistry,
    ) -> Result<PlacedSlot, PlacementError> {
        if !registry.contains(&slot.widget) {
            return Err(PlacementError::UnknownWidget(slot.widget.clone()));
        }

        let row = usize::try_from(slot.row).map_err(|_| self.out_of_grid(slot))?;
        let col = usize::try_from(slot.col).map_err(|_| self.out_of_grid(slot))?;
        if row >= self.rows || col >= self.cols {
            return Err(self.out_of_grid(slot));
        }
        // Spans are clamped to the grid edge rather than rejected.
        let row_span = usize::from(slot.row_span.max(1)).min(self.rows - row);
        let col_span = usize::from(slot.col_span.max(1)).min(self.cols - col);

        if self
            .slots
            .iter()
            .any(|placed| placed.intersects(row, col, row_span, col_span))
        {
            return Err(PlacementError::Overlap(slot.widget.clone()));
        }

        Ok(PlacedSlot {
            widget: slot.widget.clone(),
            row,
            col,
            row_span,
            col_span,
            settings: slot.settings.clone(),
        })
    }

    fn out_of_grid(&self, slot: &SlotConfig) -> PlacementError {
        PlacementError::OutOfGrid {
            widget: slot.widget.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::config::GridConfig;
    use crate::dashboard::DashboardContext;
    use crate::widgets::{Widget, WidgetDescriptor};
    use serde::{Deserialize, Serialize};

    #[derive(Default, Serialize, Deserialize)]
    struct DummyConfig;

    struct DummyWidget;

    impl Widget for DummyWidget {
        fn render(&mut self, _ui: &mut eframe::egui::Ui, _ctx: &DashboardContext<'_>) {}
    }

    fn test_registry() -> WidgetRegistry {
        let mut reg = WidgetRegistry::default();
        reg.register(
            "test",
            WidgetDescriptor::new("Test", |_: DummyConfig| DummyWidget),
        )
        .unwrap();
        reg
    }

    fn config(grid: GridConfig, slots: Vec<SlotConfig>) -> DashboardConfig {
        DashboardConfig {
            version: 1,
            grid,
            slots,
        }
    }

    #[test]
    fn spans_clamp_to_the_grid_edge() {
        let cfg = config(
            GridConfig { rows: 2, cols: 2 },
            vec![SlotConfig {
                row_span: 5,
                col_span: 5,
                ..SlotConfig::with_widget("test", 0, 0)
            }],
        );
        let plan = GridPlan::build(&cfg, &test_registry());
        assert_eq!(plan.slots[0].row_span, 2);
        assert_eq!(plan.slots[0].col_span, 2);
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn overlapping_slots_are_rejected_with_a_reason() {
        let cfg = config(
            GridConfig { rows: 2, cols: 2 },
            vec![
                SlotConfig {
                    col_span: 2,
                    ..SlotConfig::with_widget("test", 0, 0)
                },
                SlotConfig::with_widget("test", 0, 1),
            ],
        );
        let plan = GridPlan::build(&cfg, &test_registry());
        assert_eq!(plan.slots.len(), 1);
        assert_eq!(plan.rejected, vec![PlacementError::Overlap("test".into())]);
    }

    #[test]
    fn adjacent_slots_all_fit() {
        let cfg = config(
            GridConfig { rows: 1, cols: 2 },
            vec![
                SlotConfig::with_widget("test", 0, 0),
                SlotConfig::with_widget("test", 0, 1),
            ],
        );
        let plan = GridPlan::build(&cfg, &test_registry());
        assert_eq!(plan.slots.len(), 2);
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn negative_positions_fall_outside_the_grid() {
        let cfg = config(
            GridConfig { rows: 2, cols: 2 },
            vec![SlotConfig::with_widget("test", -1, 0)],
        );
        let plan = GridPlan::build(&cfg, &test_registry());
        assert!(plan.slots.is_empty());
        assert_eq!(
            plan.rejected,
            vec![PlacementError::OutOfGrid {
                widget: "test".into(),
                rows: 2,
                cols: 2,
            }]
        );
    }

    #[test]
    fn unknown_widget_is_reported() {
        let cfg = config(
            GridConfig { rows: 2, cols: 2 },
            vec![SlotConfig::with_widget("nope", 0, 0)],
        );
        let plan = GridPlan::build(&cfg, &test_registry());
        assert!(plan.slots.is_empty());
        assert_eq!(
            plan.rejected,
            vec![PlacementError::UnknownWidget("nope".into())]
        );
    }
}
