pub mod bootstrap;
pub mod dashboard;
pub mod data_cache;
pub mod logging;
pub mod modules;
pub mod notifications;
pub mod page_context;
pub mod registry;
pub mod widgets;
