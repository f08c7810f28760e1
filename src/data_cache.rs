use crate::notifications::Notice;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchQueryRow {
    pub query: String,
    pub clicks: u32,
    pub impressions: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedReport {
    pub page: String,
    /// Lighthouse-style score in the 0..=100 range.
    pub score: u8,
}

/// Immutable view of the data the external fetch layer has resolved so far.
/// Widgets and notice producers only ever read snapshots; they never fetch.
#[derive(Clone, Default)]
pub struct DashboardDataSnapshot {
    pub search_queries: Arc<Vec<SearchQueryRow>>,
    pub speed_reports: Arc<Vec<SpeedReport>>,
    pub site_notices: Arc<Vec<Notice>>,
    pub module_alerts: Arc<Vec<Notice>>,
    pub wins: Arc<Vec<Notice>>,
}

impl DashboardDataSnapshot {
    fn with_search_queries(&self, rows: Vec<SearchQueryRow>) -> Self {
        Self {
            search_queries: Arc::new(rows),
            ..self.clone()
        }
    }

    fn with_speed_reports(&self, reports: Vec<SpeedReport>) -> Self {
        Self {
            speed_reports: Arc::new(reports),
            ..self.clone()
        }
    }

    fn with_site_notices(&self, notices: Vec<Notice>) -> Self {
        Self {
            site_notices: Arc::new(notices),
            ..self.clone()
        }
    }

    fn with_module_alerts(&self, notices: Vec<Notice>) -> Self {
        Self {
            module_alerts: Arc::new(notices),
            ..self.clone()
        }
    }

    fn with_wins(&self, notices: Vec<Notice>) -> Self {
        Self {
            wins: Arc::new(notices),
            ..self.clone()
        }
    }
}

/// Shared cache the data layer pushes resolved reports into. Each update
/// swaps in a fresh snapshot, so readers always see a consistent view within
/// one render pass.
pub struct DashboardDataCache {
    snapshot: Mutex<Arc<DashboardDataSnapshot>>,
}

impl DashboardDataCache {
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(Arc::new(DashboardDataSnapshot::default())),
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardDataSnapshot> {
        self.snapshot
            .lock()
            .map(|s| Arc::clone(&s))
            .unwrap_or_default()
    }

    pub fn set_search_queries(&self, rows: Vec<SearchQueryRow>) {
        self.update(|s| s.with_search_queries(rows));
    }

    pub fn set_speed_reports(&self, reports: Vec<SpeedReport>) {
        self.update(|s| s.with_speed_reports(reports));
    }

    pub fn set_site_notices(&self, notices: Vec<Notice>) {
        self.update(|s| s.with_site_notices(notices));
    }

    pub fn set_module_alerts(&self, notices: Vec<Notice>) {
        self.update(|s| s.with_module_alerts(notices));
    }

    pub fn set_wins(&self, notices: Vec<Notice>) {
        self.update(|s| s.with_wins(notices));
    }

    fn update(&self, apply: impl FnOnce(&DashboardDataSnapshot) -> DashboardDataSnapshot) {
        if let Ok(mut snapshot) = self.snapshot.lock() {
            let next = apply(&snapshot);
            *snapshot = Arc::new(next);
        }
    }
}

impl Default for DashboardDataCache {
    fn default() -> Self {
        Self::new()
    }
}
