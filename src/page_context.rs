use url::Url;

/// Authentication flags handed over by the host page bootstrap. Read-only
/// inputs; the console never mutates or refreshes them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetupFlags {
    pub need_reauthenticate: bool,
    pub is_authenticated: bool,
    pub is_verified: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupOutcome {
    Success,
    Failure,
}

/// Which set of dashboard notification producers applies to this page load.
/// At most one branch is ever taken, so the decision is captured once here
/// instead of being re-derived from raw flags at every call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardBranch {
    /// The page was reached straight after an authentication attempt.
    SetupOutcome(SetupOutcome),
    /// Fully authenticated and verified.
    Active,
    /// Not yet usable; only the always-on producers apply.
    Passive,
}

/// Snapshot of the host environment, evaluated once at bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageContext {
    pub need_reauthenticate: bool,
    branch: DashboardBranch,
}

impl PageContext {
    pub fn evaluate(flags: &SetupFlags, notification: Option<&str>) -> Self {
        let branch = match notification {
            Some("authentication_success") => {
                DashboardBranch::SetupOutcome(SetupOutcome::Success)
            }
            Some("authentication_failure") => {
                DashboardBranch::SetupOutcome(SetupOutcome::Failure)
            }
            _ if flags.is_authenticated && flags.is_verified => DashboardBranch::Active,
            _ => DashboardBranch::Passive,
        };
        Self {
            need_reauthenticate: flags.need_reauthenticate,
            branch,
        }
    }

    /// Evaluate against a full page URL, reading the `notification` query
    /// parameter the host appends after an authentication round trip.
    pub fn from_page_url(flags: &SetupFlags, page_url: &str) -> Self {
        let notification = query_parameter(page_url, "notification");
        Self::evaluate(flags, notification.as_deref())
    }

    pub fn branch(&self) -> DashboardBranch {
        self.branch
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::evaluate(&SetupFlags::default(), None)
    }
}

/// First value of a query parameter, or `None` if the URL does not parse or
/// the parameter is absent.
pub fn query_parameter(page_url: &str, name: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
