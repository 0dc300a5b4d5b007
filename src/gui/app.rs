//! Portfolio Dashboard Main Application
//! Main window with the page sidebar and the report view.

use crate::export::export_report;
use crate::gui::{ReportView, Sidebar, SidebarAction};
use crate::pages::build_registry;
use crate::registry::{PageRegistry, SelectionState};
use crate::settings::Settings;
use crate::surface::ReportCanvas;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Outcome of one run cycle on the background thread.
struct RunResult {
    selection: SelectionState,
    canvas: ReportCanvas,
    error: Option<String>,
}

/// Main application window.
pub struct DashboardApp {
    registry: Arc<PageRegistry>,
    selection: SelectionState,
    settings: Settings,
    settings_path: PathBuf,
    sidebar: Sidebar,
    report_view: ReportView,

    // Async page rendering
    run_rx: Option<Receiver<RunResult>>,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        registry: PageRegistry,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Self {
        let titles = registry.titles().into_iter().map(str::to_string).collect();
        let mut app = Self {
            registry: Arc::new(registry),
            selection: SelectionState::with_preferred(settings.default_page.clone()),
            sidebar: Sidebar::new(titles, settings.datasets_dir.clone()),
            settings,
            settings_path,
            report_view: ReportView::new(),
            run_rx: None,
        };
        app.start_run();
        app
    }

    fn is_running(&self) -> bool {
        self.run_rx.is_some()
    }

    /// Render the selected page on a background thread.
    fn start_run(&mut self) {
        if self.is_running() {
            return;
        }

        let (tx, rx) = channel();
        self.run_rx = Some(rx);
        self.sidebar.busy = true;
        self.sidebar.set_status("Rendering...");

        let registry = Arc::clone(&self.registry);
        let mut selection = self.selection.clone();
        thread::spawn(move || {
            let mut canvas = ReportCanvas::new();
            let error = registry
                .run(&mut selection, &mut canvas)
                .err()
                .map(|e| format!("{:#}", e));
            let _ = tx.send(RunResult {
                selection,
                canvas,
                error,
            });
        });
    }

    /// Check for run results
    fn check_run_results(&mut self) {
        let Some(rx) = self.run_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.selection = result.selection;
                let page = self.selection.current().unwrap_or_default().to_string();
                match &result.error {
                    Some(error) => {
                        tracing::error!(page = %page, error = %error, "page failed to render");
                        self.sidebar.set_status(format!("Error: {}", error));
                    }
                    None => self.sidebar.set_status(format!("Rendered {}", page)),
                }
                self.sidebar.can_export = !result.canvas.is_empty();
                self.report_view.set_report(result.canvas, result.error);
                self.sidebar.busy = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.run_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.sidebar.set_status("Error: render thread stopped");
                self.sidebar.busy = false;
            }
        }
    }

    /// Pick a new datasets folder and rebuild the pages against it.
    fn handle_pick_datasets(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_directory(&self.settings.datasets_dir)
            .pick_folder()
        else {
            return;
        };

        tracing::info!(dir = %dir.display(), "datasets folder changed");
        self.registry = Arc::new(build_registry(&dir));
        self.settings.datasets_dir = dir.clone();
        self.sidebar.datasets_dir = dir;
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(error = %e, "could not save settings");
        }
        self.start_run();
    }

    /// Export the shown report to a chosen folder and open it.
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let (width, height) = self.settings.export_size;
        match export_report(&self.report_view.canvas, &dir, width, height) {
            Ok(files) => {
                self.sidebar
                    .set_status(format!("Exported {} files to {}", files.len(), dir.display()));
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(error = %e, "could not open export folder");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.sidebar.set_status(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_run_results();

        if self.is_running() {
            ctx.request_repaint();
        }

        SidePanel::left("sidebar")
            .min_width(280.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                let current = self.selection.current().map(str::to_string);
                match self.sidebar.show(ui, current.as_deref()) {
                    SidebarAction::Select(title) => {
                        self.selection.choose(title);
                        self.start_run();
                    }
                    SidebarAction::Rerun => self.start_run(),
                    SidebarAction::PickDatasets => self.handle_pick_datasets(),
                    SidebarAction::Export => self.handle_export(),
                    SidebarAction::None => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_view.show(ui);
        });
    }
}
