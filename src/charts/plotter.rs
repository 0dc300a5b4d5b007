//! Chart Plotter Module
//! Draws page figures interactively using egui_plot.

use crate::charts::{beeswarm_positions, series_color};
use crate::stats::{BoxSummary, StatsCalculator};
use crate::surface::{Figure, FigureKind, NamedValues, PointSeries};
use egui::Color32;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, PlotUi, Points,
};

const PLOT_HEIGHT: f32 = 320.0;

/// Draws figures with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    fn color(index: usize, own: Option<[u8; 3]>) -> Color32 {
        let [r, g, b] = series_color(index, own);
        Color32::from_rgb(r, g, b)
    }

    /// Axis formatter that shows category names at integer positions.
    fn category_formatter(
        categories: Vec<String>,
    ) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
        move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            categories.get(idx as usize).cloned().unwrap_or_default()
        }
    }

    /// Draw a figure. `id_salt` keeps plot state apart between figures.
    pub fn draw_figure(ui: &mut egui::Ui, figure: &Figure, id_salt: usize) {
        ui.label(egui::RichText::new(&figure.title).size(15.0).strong());

        let mut y_label = figure.y_label.clone();
        let mut x_label = figure.x_label.clone();
        if figure.log_values {
            // Strip plots put values on x
            if matches!(figure.kind, FigureKind::Strip { .. }) {
                x_label = format!("log10 {}", x_label);
            } else {
                y_label = format!("log10 {}", y_label);
            }
        }

        let mut plot = Plot::new(format!("figure_{}_{}", id_salt, figure.title))
            .height(PLOT_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label);

        match &figure.kind {
            FigureKind::Bars { categories, .. } => {
                plot = plot.x_axis_formatter(Self::category_formatter(categories.clone()));
            }
            FigureKind::Boxes { groups } => {
                let names = groups.iter().map(|g| g.name.clone()).collect();
                plot = plot.x_axis_formatter(Self::category_formatter(names));
            }
            FigureKind::Strip { groups } => {
                let names = groups.iter().map(|g| g.name.clone()).collect();
                plot = plot.y_axis_formatter(Self::category_formatter(names));
            }
            _ => {}
        }

        plot.show(ui, |plot_ui| match &figure.kind {
            FigureKind::Bars { categories, series } => {
                Self::draw_bars(plot_ui, figure, categories.len(), series)
            }
            FigureKind::Lines { series } => Self::draw_lines(plot_ui, figure, series),
            FigureKind::Scatter { series } => Self::draw_scatter(plot_ui, figure, series),
            FigureKind::Histogram { values, bins } => {
                Self::draw_histogram(plot_ui, figure, values, *bins)
            }
            FigureKind::Boxes { groups } => Self::draw_boxes(plot_ui, figure, groups),
            FigureKind::Strip { groups } => Self::draw_strip(plot_ui, figure, groups),
        });
    }

    fn draw_bars(plot_ui: &mut PlotUi, figure: &Figure, n_categories: usize, series: &[NamedValues]) {
        let n_series = series.len().max(1);
        let group_width = 0.8;
        let bar_width = group_width / n_series as f64;

        for (s_idx, s) in series.iter().enumerate() {
            let offset = -group_width / 2.0 + bar_width * (s_idx as f64 + 0.5);
            let bars: Vec<Bar> = s
                .values
                .iter()
                .take(n_categories)
                .enumerate()
                .filter_map(|(i, &v)| {
                    figure
                        .plotted_value(v)
                        .map(|h| Bar::new(i as f64 + offset, h).width(bar_width * 0.95))
                })
                .collect();

            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(Self::color(s_idx, None))
                    .name(&s.name),
            );
        }
    }

    fn plotted_points(figure: &Figure, series: &PointSeries) -> Vec<[f64; 2]> {
        series
            .points
            .iter()
            .filter_map(|&[x, y]| figure.plotted_value(y).map(|y| [x, y]))
            .collect()
    }

    fn draw_lines(plot_ui: &mut PlotUi, figure: &Figure, series: &[PointSeries]) {
        for (idx, s) in series.iter().enumerate() {
            let points = Self::plotted_points(figure, s);
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .color(Self::color(idx, s.color))
                    .width(2.0)
                    .name(&s.name),
            );
        }
    }

    fn draw_scatter(plot_ui: &mut PlotUi, figure: &Figure, series: &[PointSeries]) {
        for (idx, s) in series.iter().enumerate() {
            let points = Self::plotted_points(figure, s);
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(2.5)
                    .color(Self::color(idx, s.color).gamma_multiply(0.7))
                    .name(&s.name),
            );
        }
    }

    fn draw_histogram(plot_ui: &mut PlotUi, figure: &Figure, values: &[f64], bins: usize) {
        let plotted: Vec<f64> = values
            .iter()
            .filter_map(|&v| figure.plotted_value(v))
            .collect();

        let bars: Vec<Bar> = StatsCalculator::histogram(&plotted, bins)
            .into_iter()
            .map(|bin| {
                let width = bin.end - bin.start;
                Bar::new(bin.start + width / 2.0, bin.count as f64).width(width * 0.95)
            })
            .collect();

        plot_ui.bar_chart(BarChart::new(bars).color(Self::color(0, None)).name("count"));
    }

    fn draw_boxes(plot_ui: &mut PlotUi, figure: &Figure, groups: &[NamedValues]) {
        for (i, group) in groups.iter().enumerate() {
            let plotted: Vec<f64> = group
                .values
                .iter()
                .filter_map(|&v| figure.plotted_value(v))
                .collect();
            let Some(summary) = BoxSummary::from_values(&plotted) else {
                continue;
            };

            let color = Self::color(i, None);
            let elem = BoxElem::new(
                i as f64,
                BoxSpread::new(
                    summary.whisker_low,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.whisker_high,
                ),
            )
            .box_width(0.5)
            .fill(color.gamma_multiply(0.3))
            .stroke(egui::Stroke::new(1.5, color));

            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.name));

            // Outliers beyond the whiskers
            let outliers: PlotPoints = plotted
                .iter()
                .filter(|&&v| v < summary.whisker_low || v > summary.whisker_high)
                .map(|&v| [i as f64, v])
                .collect();
            plot_ui.points(Points::new(outliers).radius(2.0).color(color));
        }
    }

    fn draw_strip(plot_ui: &mut PlotUi, figure: &Figure, groups: &[NamedValues]) {
        for (i, group) in groups.iter().enumerate() {
            let plotted: Vec<f64> = group
                .values
                .iter()
                .filter_map(|&v| figure.plotted_value(v))
                .collect();
            let rows = beeswarm_positions(&plotted, i as f64, 0.6);
            let points: PlotPoints = plotted
                .iter()
                .zip(rows)
                .map(|(&x, y)| [x, y])
                .collect();

            plot_ui.points(
                Points::new(points)
                    .radius(3.0)
                    .color(Self::color(i, None).gamma_multiply(0.8))
                    .name(&group.name),
            );
        }
    }
}
