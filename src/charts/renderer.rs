//! Static Chart Renderer
//! Renders page figures to PNG with plotters, for exported reports.
//!
//! Every figure becomes one image: caption on top, mesh with axis labels,
//! and a legend in the upper right when there is more than one series.

use crate::charts::{beeswarm_positions, series_color};
use crate::stats::{BoxSummary, StatsCalculator};
use crate::surface::{Figure, FigureKind, NamedValues, PointSeries};
use image::{ImageFormat, RgbImage};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::io::Cursor;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image buffer has the wrong size")]
    Buffer,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn drawing_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

type Coords = Cartesian2d<RangedCoordf64, RangedCoordf64>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a figure to PNG bytes.
    pub fn render_png(figure: &Figure, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(RenderError::Buffer)?;
        let mut buffer = vec![0u8; len];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_err)?;
            Self::draw(&root, figure)?;
            root.present().map_err(drawing_err)?;
        }

        let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn rgb(index: usize, own: Option<[u8; 3]>) -> RGBColor {
        let [r, g, b] = series_color(index, own);
        RGBColor(r, g, b)
    }

    /// Pad a data range so points do not sit on the frame.
    fn padded(min: f64, max: f64) -> Range<f64> {
        if !min.is_finite() || !max.is_finite() {
            return 0.0..1.0;
        }
        if max <= min {
            return (min - 1.0)..(max + 1.0);
        }
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    }

    fn extent<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
        values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    fn build<'a, 'b>(
        root: &'a DrawingArea<BitMapBackend<'b>, plotters::coord::Shift>,
        figure: &Figure,
        x: Range<f64>,
        y: Range<f64>,
    ) -> Result<ChartContext<'a, BitMapBackend<'b>, Coords>, RenderError> {
        ChartBuilder::on(root)
            .caption(&figure.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x, y)
            .map_err(drawing_err)
    }

    fn value_label(figure: &Figure, label: &str) -> String {
        if figure.log_values {
            format!("log10 {}", label)
        } else {
            label.to_string()
        }
    }

    fn draw(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        figure: &Figure,
    ) -> Result<(), RenderError> {
        match &figure.kind {
            FigureKind::Bars { categories, series } => {
                Self::draw_bars(root, figure, categories, series)
            }
            FigureKind::Lines { series } => Self::draw_points(root, figure, series, true),
            FigureKind::Scatter { series } => Self::draw_points(root, figure, series, false),
            FigureKind::Histogram { values, bins } => {
                Self::draw_histogram(root, figure, values, *bins)
            }
            FigureKind::Boxes { groups } => Self::draw_boxes(root, figure, groups),
            FigureKind::Strip { groups } => Self::draw_strip(root, figure, groups),
        }
    }

    fn draw_bars(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        figure: &Figure,
        categories: &[String],
        series: &[NamedValues],
    ) -> Result<(), RenderError> {
        let (_, max) = Self::extent(
            series
                .iter()
                .flat_map(|s| s.values.iter().filter_map(|&v| figure.plotted_value(v))),
        );
        let top = if max.is_finite() && max > 0.0 { max * 1.08 } else { 1.0 };
        let n = categories.len().max(1);

        let mut chart = Self::build(root, figure, -0.5..(n as f64 - 0.5), 0.0..top)?;
        let label_of = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            categories.get(idx as usize).cloned().unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(40))
            .x_label_formatter(&label_of)
            .x_desc(figure.x_label.as_str())
            .y_desc(Self::value_label(figure, &figure.y_label))
            .draw()
            .map_err(drawing_err)?;

        let n_series = series.len().max(1);
        let group_width = 0.8;
        let bar_width = group_width / n_series as f64;

        for (s_idx, s) in series.iter().enumerate() {
            let color = Self::rgb(s_idx, None);
            let offset = -group_width / 2.0 + bar_width * s_idx as f64;
            let bars = s
                .values
                .iter()
                .take(categories.len())
                .enumerate()
                .filter_map(|(i, &v)| figure.plotted_value(v).map(|h| (i, h)))
                .map(move |(i, h)| {
                    let x0 = i as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + bar_width * 0.95, h)], color.filled())
                });
            chart
                .draw_series(bars)
                .map_err(drawing_err)?
                .label(s.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        if series.len() > 1 {
            Self::draw_legend(&mut chart)?;
        }
        Ok(())
    }

    fn draw_points(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        figure: &Figure,
        series: &[PointSeries],
        connect: bool,
    ) -> Result<(), RenderError> {
        let plotted: Vec<Vec<(f64, f64)>> = series
            .iter()
            .map(|s| {
                s.points
                    .iter()
                    .filter_map(|&[x, y]| figure.plotted_value(y).map(|y| (x, y)))
                    .filter(|(x, _)| x.is_finite())
                    .collect()
            })
            .collect();

        let (x_min, x_max) = Self::extent(plotted.iter().flatten().map(|p| p.0));
        let (y_min, y_max) = Self::extent(plotted.iter().flatten().map(|p| p.1));

        let mut chart = Self::build(
            root,
            figure,
            Self::padded(x_min, x_max),
            Self::padded(y_min, y_max),
        )?;
        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(Self::value_label(figure, &figure.y_label))
            .draw()
            .map_err(drawing_err)?;

        for (idx, (s, points)) in series.iter().zip(plotted).enumerate() {
            let color = Self::rgb(idx, s.color);
            let anno = if connect {
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(drawing_err)?
            } else {
                chart
                    .draw_series(
                        points
                            .into_iter()
                            .map(move |p| Circle::new(p, 3, color.mix(0.7).filled())),
                    )
                    .map_err(drawing_err)?
            };
            anno.label(s.name.as_str())
                .legend(move |(x, y)| Circle::new((x + 6, y), 4, color.filled()));
        }

        if series.len() > 1 {
            Self::draw_legend(&mut chart)?;
        }
        Ok(())
    }

    fn draw_histogram(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        figure: &Figure,
        values: &[f64],
        bins: usize,
    ) -> Result<(), RenderError> {
        let plotted: Vec<f64> = values
            .iter()
            .filter_map(|&v| figure.plotted_value(v))
            .collect();
        let buckets = StatsCalculator::histogram(&plotted, bins);

        let x = match (buckets.first(), buckets.last()) {
            (Some(first), Some(last)) => first.start..last.end,
            _ => 0.0..1.0,
        };
        let top = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.08;

        let mut chart = Self::build(root, figure, x, 0.0..top)?;
        chart
            .configure_mesh()
            .x_desc(Self::value_label(figure, &figure.x_label))
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(drawing_err)?;

        let color = Self::rgb(0, None);
        chart
            .draw_series(buckets.iter().map(|b| {
                Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.8).filled())
            }))
            .map_err(drawing_err)?;
        Ok(())
    }

    fn draw_boxes(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        figure: &Figure,
        groups: &[NamedValues],
    ) -> Result<(), RenderError> {
        let plotted: Vec<Vec<f64>> = groups
            .iter()
            .map(|g| g.values.iter().filter_map(|&v| figure.plotted_value(v)).collect())
            .collect();
        let (min, max) = Self::extent(plotted.iter().flatten().copied());
        let n = groups.len().max(1);

        let mut chart = Self::build(root, figure, -0.5..(n as f64 - 0.5), Self::padded(min, max))?;
        let label_of = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            groups
                .get(idx as usize)
                .map(|g| g.name.clone())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&label_of)
            .x_desc(figure.x_label.as_str())
            .y_desc(Self::value_label(figure, &figure.y_label))
            .draw()
            .map_err(drawing_err)?;

        for (i, values) in plotted.iter().enumerate() {
            let Some(s) = BoxSummary::from_values(values) else {
                continue;
            };
            let color = Self::rgb(i, None);
            let x = i as f64;
            let half = 0.25;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - half, s.q1), (x + half, s.q3)],
                    color.mix(0.3).filled(),
                )))
                .map_err(drawing_err)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - half, s.q1), (x + half, s.q3)],
                    color.stroke_width(2),
                )))
                .map_err(drawing_err)?;

            let segments = [
                vec![(x - half, s.median), (x + half, s.median)],
                vec![(x, s.q3), (x, s.whisker_high)],
                vec![(x, s.q1), (x, s.whisker_low)],
                vec![(x - half / 2.0, s.whisker_high), (x + half / 2.0, s.whisker_high)],
                vec![(x - half / 2.0, s.whisker_low), (x + half / 2.0, s.whisker_low)],
            ];
            chart
                .draw_series(
                    segments
                        .into_iter()
                        .map(|seg| PathElement::new(seg, color.stroke_width(2))),
                )
                .map_err(drawing_err)?;

            chart
                .draw_series(
                    values
                        .iter()
                        .filter(|&&v| v < s.whisker_low || v > s.whisker_high)
                        .map(|&v| Circle::new((x, v), 3, color)),
                )
                .map_err(drawing_err)?;
        }
        Ok(())
    }

    fn draw_strip(
        root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        figure: &Figure,
        groups: &[NamedValues],
    ) -> Result<(), RenderError> {
        let plotted: Vec<Vec<f64>> = groups
            .iter()
            .map(|g| g.values.iter().filter_map(|&v| figure.plotted_value(v)).collect())
            .collect();
        let (min, max) = Self::extent(plotted.iter().flatten().copied());
        let n = groups.len().max(1);

        let mut chart = Self::build(root, figure, Self::padded(min, max), -0.5..(n as f64 - 0.5))?;
        let label_of = |y: &f64| {
            let idx = y.round();
            if (y - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            groups
                .get(idx as usize)
                .map(|g| g.name.clone())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&label_of)
            .x_desc(Self::value_label(figure, &figure.x_label))
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(drawing_err)?;

        for (i, values) in plotted.iter().enumerate() {
            let color = Self::rgb(i, None);
            let rows = beeswarm_positions(values, i as f64, 0.6);
            chart
                .draw_series(
                    values
                        .iter()
                        .zip(rows)
                        .map(|(&x, y)| Circle::new((x, y), 3, color.mix(0.8).filled())),
                )
                .map_err(drawing_err)?;
        }
        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a>(
        chart: &mut ChartContext<'a, DB, Coords>,
    ) -> Result<(), RenderError> {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(StaticChartRenderer::padded(f64::INFINITY, f64::NEG_INFINITY), 0.0..1.0);
        assert_eq!(StaticChartRenderer::padded(3.0, 3.0), 2.0..4.0);
        let r = StaticChartRenderer::padded(0.0, 10.0);
        assert_eq!(r, -0.5..10.5);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let figure = Figure::new(
            "huge",
            FigureKind::Histogram {
                values: vec![1.0, 2.0],
                bins: 2,
            },
        );
        assert!(matches!(
            StaticChartRenderer::render_png(&figure, u32::MAX, u32::MAX),
            Err(RenderError::Buffer)
        ));
    }

    #[test]
    fn extent_of_values() {
        assert_eq!(StaticChartRenderer::extent([3.0, -1.0, 7.5]), (-1.0, 7.5));
    }
}
