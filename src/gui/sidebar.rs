//! Sidebar Widget
//! Left side panel: page navigation, datasets folder, rerun and export.

use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Actions triggered by sidebar controls.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    None,
    Select(String),
    Rerun,
    PickDatasets,
    Export,
}

/// Left side panel listing the registered pages.
pub struct Sidebar {
    pub titles: Vec<String>,
    pub datasets_dir: PathBuf,
    pub status: String,
    pub busy: bool,
    pub can_export: bool,
}

impl Sidebar {
    pub fn new(titles: Vec<String>, datasets_dir: PathBuf) -> Self {
        Self {
            titles,
            datasets_dir,
            status: "Ready".to_string(),
            busy: false,
            can_export: false,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    fn status_color(&self) -> Color32 {
        if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Rendered") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        }
    }

    /// Draw the sidebar. `current` is highlighted in the page list.
    pub fn show(&mut self, ui: &mut egui::Ui, current: Option<&str>) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Portfolio")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Data analysis projects")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Navigation").size(14.0).strong());
        ui.add_space(5.0);

        ScrollArea::vertical()
            .id_salt("page_list")
            .max_height(ui.available_height() * 0.5)
            .show(ui, |ui| {
                for title in &self.titles {
                    let selected = current == Some(title.as_str());
                    let label = ui.add_enabled(
                        !self.busy,
                        egui::SelectableLabel::new(selected, RichText::new(title).size(13.0)),
                    );
                    if label.clicked() && !selected {
                        action = SidebarAction::Select(title.clone());
                    }
                }
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Datasets").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(self.datasets_dir.display().to_string())
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add_enabled(!self.busy, egui::Button::new("Browse")).clicked() {
                            action = SidebarAction::PickDatasets;
                        }
                    });
                });
            });

        ui.add_space(15.0);

        ui.vertical_centered(|ui| {
            let rerun = egui::Button::new(RichText::new("Rerun").size(16.0))
                .min_size(egui::vec2(200.0, 36.0));
            if ui.add_enabled(!self.busy, rerun).clicked() {
                action = SidebarAction::Rerun;
            }

            ui.add_space(8.0);

            let export = egui::Button::new(RichText::new("Export report").size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add_enabled(self.can_export && !self.busy, export).clicked() {
                action = SidebarAction::Export;
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            ui.label(RichText::new(&self.status).size(11.0).color(self.status_color()));
        });

        action
    }
}
