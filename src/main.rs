use eframe::egui;
use site_console::bootstrap::{bootstrap, builtin_modules, AppRegistries};
use site_console::dashboard::{DashboardContext, DashboardView};
use site_console::data_cache::{DashboardDataCache, SearchQueryRow, SpeedReport};
use site_console::modules::ModuleUi;
use site_console::notifications::{Notice, Severity};
use site_console::page_context::{PageContext, SetupFlags};

fn main() {
    site_console::logging::init(cfg!(debug_assertions));
    if let Err(err) = run() {
        tracing::error!("fatal: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // The host page bootstrap would supply these; default to a fresh install.
    let flags = SetupFlags {
        need_reauthenticate: false,
        is_authenticated: true,
        is_verified: true,
    };
    // The host appends ?notification=... after an authentication round trip.
    let page = match std::env::var("SITE_CONSOLE_PAGE_URL") {
        Ok(url) => PageContext::from_page_url(&flags, &url),
        Err(_) => PageContext::evaluate(&flags, None),
    };
    let registries = bootstrap(builtin_modules(), &page)?;

    let data = DashboardDataCache::new();
    seed_demo_data(&data);

    let config_path = std::env::var("SITE_CONSOLE_DASHBOARD")
        .unwrap_or_else(|_| "dashboard.json".to_string());
    let view = DashboardView::new(&config_path, &registries.widgets);
    for warning in &view.warnings {
        tracing::warn!("{warning}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Site Console",
        options,
        Box::new(move |_cc| {
            Box::new(ConsoleApp {
                registries,
                page,
                data,
                view,
                open_module: None,
            })
        }),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))?;
    Ok(())
}

/// Stand-in for the remote data layer while no fetcher is wired up.
fn seed_demo_data(data: &DashboardDataCache) {
    data.set_search_queries(vec![
        SearchQueryRow {
            query: "site console".into(),
            clicks: 120,
            impressions: 1900,
        },
        SearchQueryRow {
            query: "dashboard widgets".into(),
            clicks: 64,
            impressions: 880,
        },
        SearchQueryRow {
            query: "speed report".into(),
            clicks: 18,
            impressions: 420,
        },
    ]);
    data.set_speed_reports(vec![
        SpeedReport {
            page: "/".into(),
            score: 92,
        },
        SpeedReport {
            page: "/blog".into(),
            score: 41,
        },
    ]);
    data.set_site_notices(vec![Notice::new(
        "welcome",
        Severity::Info,
        "Welcome",
        "Your dashboard is ready.",
    )]);
}

struct ConsoleApp {
    registries: AppRegistries,
    page: PageContext,
    data: DashboardDataCache,
    view: DashboardView,
    open_module: Option<(String, Box<dyn ModuleUi>)>,
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("modules").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Modules:");
                for definition in self.registries.modules.modules() {
                    if ui.button(definition.name()).clicked() {
                        self.open_module =
                            Some((definition.name().to_string(), definition.create_setup()));
                    }
                }
                if self.open_module.is_some() && ui.button("Close").clicked() {
                    self.open_module = None;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let dctx = DashboardContext {
                data_cache: &self.data,
                page: &self.page,
            };
            match &mut self.open_module {
                Some((name, screen)) => {
                    ui.heading(name.as_str());
                    screen.ui(ui, &dctx);
                }
                None => self.view.ui(ui, &self.registries, &dctx),
            }
        });
    }
}
