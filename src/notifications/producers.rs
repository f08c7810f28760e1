use super::{Notice, NotificationBus, NotificationPoint, Severity};
use crate::dashboard::DashboardContext;
use crate::page_context::{DashboardBranch, PageContext, SetupOutcome};

/// Forwards notices pushed into the data snapshot by the host site itself.
struct CoreSiteAlerts;

impl super::NoticeProducer for CoreSiteAlerts {
    fn notices(&self, ctx: &DashboardContext<'_>) -> Vec<Notice> {
        ctx.data_cache.snapshot().site_notices.to_vec()
    }
}

/// One-shot notice describing the outcome of the authentication round trip
/// the user just completed.
struct SetupAlerts {
    outcome: SetupOutcome,
}

impl super::NoticeProducer for SetupAlerts {
    fn notices(&self, _ctx: &DashboardContext<'_>) -> Vec<Notice> {
        let notice = match self.outcome {
            SetupOutcome::Success => Notice::new(
                "setup-success",
                Severity::Success,
                "Connected",
                "Your account was connected and data will start to appear shortly.",
            ),
            SetupOutcome::Failure => Notice::new(
                "setup-failure",
                Severity::Error,
                "Connection failed",
                "The authentication attempt did not complete. Try connecting again.",
            ),
        };
        vec![notice]
    }
}

struct ModulesAlerts;

impl super::NoticeProducer for ModulesAlerts {
    fn notices(&self, ctx: &DashboardContext<'_>) -> Vec<Notice> {
        ctx.data_cache.snapshot().module_alerts.to_vec()
    }
}

struct WinsAlerts;

impl super::NoticeProducer for WinsAlerts {
    fn notices(&self, ctx: &DashboardContext<'_>) -> Vec<Notice> {
        ctx.data_cache.snapshot().wins.to_vec()
    }
}

struct AuthAlert;

impl super::NoticeProducer for AuthAlert {
    fn notices(&self, _ctx: &DashboardContext<'_>) -> Vec<Notice> {
        vec![Notice::new(
            "reauthenticate",
            Severity::Error,
            "Reauthentication required",
            "Access to your account has expired. Sign in again to keep data flowing.",
        )]
    }
}

/// Attach the stock producers for one page load.
///
/// The core-site producer is unconditional. The reauthentication alert is
/// gated only by its own flag, independent of which dashboard branch applies.
/// The dashboard point then gets exactly one branch: the setup outcome when
/// the user arrives from an authentication round trip, otherwise the module
/// and wins producers once the account is authenticated and verified.
pub fn attach_default_producers(bus: &mut NotificationBus, page: &PageContext) {
    bus.subscribe(
        NotificationPoint::Dashboard,
        "core-site-alerts",
        10,
        CoreSiteAlerts,
    );

    if page.need_reauthenticate {
        bus.subscribe(NotificationPoint::Error, "auth-alert", 1, AuthAlert);
    }

    match page.branch() {
        DashboardBranch::SetupOutcome(outcome) => {
            bus.subscribe(
                NotificationPoint::Dashboard,
                "setup-alerts",
                1,
                SetupAlerts { outcome },
            );
        }
        DashboardBranch::Active => {
            bus.subscribe(NotificationPoint::Dashboard, "modules-alerts", 1, ModulesAlerts);
            bus.subscribe(NotificationPoint::Dashboard, "wins-alerts", 1, WinsAlerts);
        }
        DashboardBranch::Passive => {}
    }
}
