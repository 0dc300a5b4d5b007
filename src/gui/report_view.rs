//! Report View
//! Scrollable central panel drawing the blocks of the rendered page.

use crate::charts::ChartPlotter;
use crate::surface::{Block, ReportCanvas, TablePreview};
use egui::{Color32, RichText, ScrollArea};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

const CARD_SPACING: f32 = 12.0;

#[derive(Default)]
pub struct ReportView {
    pub canvas: ReportCanvas,
    pub error: Option<String>,
    markdown_cache: CommonMarkCache,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shown report. `error` is drawn above the partial output.
    pub fn set_report(&mut self, canvas: ReportCanvas, error: Option<String>) {
        self.canvas = canvas;
        self.error = error;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.canvas.is_empty() && self.error.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No page rendered").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(error) = &self.error {
                    egui::Frame::none()
                        .rounding(8.0)
                        .stroke(egui::Stroke::new(2.0, Color32::from_rgb(220, 53, 69)))
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(error)
                                    .color(Color32::from_rgb(220, 53, 69))
                                    .monospace(),
                            );
                        });
                    ui.add_space(CARD_SPACING);
                }

                for (idx, block) in self.canvas.blocks.iter().enumerate() {
                    match block {
                        Block::Markdown(md) => {
                            CommonMarkViewer::new().show(ui, &mut self.markdown_cache, &md.text);
                        }
                        Block::Table(table) => Self::draw_table(ui, table, idx),
                        Block::Figure(figure) => {
                            egui::Frame::none()
                                .rounding(8.0)
                                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                                .inner_margin(12.0)
                                .show(ui, |ui| ChartPlotter::draw_figure(ui, figure, idx));
                        }
                    }
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_table(ui: &mut egui::Ui, table: &TablePreview, idx: usize) {
        ScrollArea::horizontal()
            .id_salt(("table", idx))
            .show(ui, |ui| {
                egui::Grid::new(("table_grid", idx))
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for column in &table.columns {
                            ui.label(RichText::new(column).strong());
                        }
                        ui.end_row();

                        for row in &table.rows {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });

        if table.is_truncated() {
            ui.label(
                RichText::new(format!(
                    "{} of {} rows shown",
                    table.rows.len(),
                    table.total_rows
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        }
    }
}
