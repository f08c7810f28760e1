mod producers;

pub use producers::attach_default_producers;

use crate::dashboard::DashboardContext;
use std::collections::HashMap;

/// Named slots where independent feature areas contribute notices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationPoint {
    Dashboard,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One user-visible notice. The `id` is stable so the host can track
/// dismissals across page loads.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(id: &str, severity: Severity, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            severity,
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// A producer must be cheap and side-effect free; it is re-evaluated on every
/// resolution pass against the current snapshot.
pub trait NoticeProducer: Send + Sync {
    fn notices(&self, ctx: &DashboardContext<'_>) -> Vec<Notice>;
}

impl<F> NoticeProducer for F
where
    F: Fn(&DashboardContext<'_>) -> Vec<Notice> + Send + Sync,
{
    fn notices(&self, ctx: &DashboardContext<'_>) -> Vec<Notice> {
        self(ctx)
    }
}

struct Subscription {
    id: String,
    priority: i32,
    producer: Box<dyn NoticeProducer>,
}

/// Typed extension-point bus. Producers subscribe against a point with a
/// priority; resolution evaluates them in ascending priority order, ties
/// broken by registration order. Re-subscribing an id on the same point
/// replaces the previous entry in place, keeping its registration position.
#[derive(Default)]
pub struct NotificationBus {
    points: HashMap<NotificationPoint, Vec<Subscription>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        point: NotificationPoint,
        id: &str,
        priority: i32,
        producer: impl NoticeProducer + 'static,
    ) {
        let entries = self.points.entry(point).or_default();
        let producer: Box<dyn NoticeProducer> = Box::new(producer);
        if let Some(existing) = entries.iter_mut().find(|sub| sub.id == id) {
            existing.priority = priority;
            existing.producer = producer;
            tracing::debug!(?point, id, priority, "notification producer replaced");
            return;
        }
        entries.push(Subscription {
            id: id.to_string(),
            priority,
            producer,
        });
        tracing::debug!(?point, id, priority, "notification producer subscribed");
    }

    pub fn has_subscriber(&self, point: NotificationPoint, id: &str) -> bool {
        self.points
            .get(&point)
            .map(|entries| entries.iter().any(|sub| sub.id == id))
            .unwrap_or(false)
    }

    /// Subscribed (id, priority) pairs in registration order.
    pub fn subscribers(&self, point: NotificationPoint) -> Vec<(&str, i32)> {
        self.points
            .get(&point)
            .map(|entries| {
                entries
                    .iter()
                    .map(|sub| (sub.id.as_str(), sub.priority))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Evaluate every producer on the point and concatenate their output in
    /// priority order. Lower priority numbers resolve first.
    pub fn resolve(&self, point: NotificationPoint, ctx: &DashboardContext<'_>) -> Vec<Notice> {
        let Some(entries) = self.points.get(&point) else {
            return Vec::new();
        };
        let mut ordered: Vec<&Subscription> = entries.iter().collect();
        // Stable sort keeps registration order among equal priorities.
        ordered.sort_by_key(|sub| sub.priority);
        ordered
            .iter()
            .flat_map(|sub| sub.producer.notices(ctx))
            .collect()
    }
}
