//! Portfolio Dashboard - multipage data analysis reports
//!
//! Opens the dashboard window by default; `list`, `show` and `export` run a
//! single page from the command line.

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use portfolio_dashboard::cli::{Cli, Command};
use portfolio_dashboard::export::export_report;
use portfolio_dashboard::gui::DashboardApp;
use portfolio_dashboard::registry::{FixedSelection, PageRegistry, PageSelector, SelectionState};
use portfolio_dashboard::settings::Settings;
use portfolio_dashboard::surface::{render_text, ReportCanvas};
use portfolio_dashboard::{logging, pages};
use std::io::Write;

fn selector(page: Option<String>) -> Box<dyn PageSelector> {
    match page {
        Some(title) => Box::new(FixedSelection(title)),
        None => Box::new(SelectionState::new()),
    }
}

fn render_page(registry: &PageRegistry, page: Option<String>) -> anyhow::Result<ReportCanvas> {
    let mut canvas = ReportCanvas::new();
    registry.run(selector(page).as_mut(), &mut canvas)?;
    Ok(canvas)
}

fn run_gui(registry: PageRegistry, settings: Settings, settings_path: std::path::PathBuf) -> anyhow::Result<()> {
    let (width, height) = settings.window_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Portfolio Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, registry, settings, settings_path)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    if let Some(dir) = cli.datasets {
        settings.datasets_dir = dir;
    }

    logging::init(settings.debug_logging || cli.verbose);
    tracing::debug!(?settings, "settings loaded");

    let registry = pages::build_registry(&settings.datasets_dir);

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(registry, settings, cli.settings),
        Command::List => {
            let mut out = std::io::stdout().lock();
            for title in registry.titles() {
                writeln!(out, "{}", title)?;
            }
            Ok(())
        }
        Command::Show { page, json } => {
            let canvas = render_page(&registry, page)?;
            let mut out = std::io::stdout().lock();
            if json {
                writeln!(out, "{}", canvas.to_json()?)?;
            } else {
                render_text(&canvas, &mut out)?;
            }
            Ok(())
        }
        Command::Export { page, out } => {
            let canvas = render_page(&registry, page)?;
            let (width, height) = settings.export_size;
            let files = export_report(&canvas, &out, width, height)?;
            for file in files {
                println!("{}", file.display());
            }
            Ok(())
        }
    }
}
