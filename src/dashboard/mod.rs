pub mod config;
pub mod layout;
pub mod view;

pub use config::{DashboardConfig, GridConfig, SlotConfig};
pub use layout::{GridPlan, PlacedSlot, PlacementError};
pub use view::{DashboardContext, DashboardView};
