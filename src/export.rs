//! Report Export Module
//! Writes a rendered page to a directory: `report.md` plus one PNG per figure.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::surface::{Block, ReportCanvas, TablePreview};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REPORT_FILE: &str = "report.md";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to render figure {index}: {source}")]
    Render { index: usize, source: RenderError },
}

fn figure_file_name(index: usize) -> String {
    format!("figure_{:02}.png", index + 1)
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

fn markdown_table(out: &mut String, table: &TablePreview) {
    let header: Vec<String> = table.columns.iter().map(|c| escape_cell(c)).collect();
    let _ = writeln!(out, "| {} |", header.join(" | "));
    let _ = writeln!(out, "|{}", "---|".repeat(table.columns.len().max(1)));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    if table.is_truncated() {
        let _ = writeln!(out, "\n_{} of {} rows shown_", table.rows.len(), table.total_rows);
    }
    out.push('\n');
}

/// Markdown document for `canvas`; figures link to `figure_NN.png`.
pub fn report_markdown(canvas: &ReportCanvas) -> String {
    let mut out = String::new();
    let mut figure_index = 0;
    for block in &canvas.blocks {
        match block {
            Block::Markdown(md) => {
                out.push_str(md.text.trim_end());
                out.push_str("\n\n");
            }
            Block::Table(table) => markdown_table(&mut out, table),
            Block::Figure(figure) => {
                let _ = writeln!(out, "![{}]({})\n", figure.title, figure_file_name(figure_index));
                figure_index += 1;
            }
        }
    }
    out
}

/// Export `canvas` into `dir`, creating it if needed.
///
/// Figures are rendered in parallel at `width` x `height`. Returns the
/// written files, figures first and `report.md` last.
pub fn export_report(
    canvas: &ReportCanvas,
    dir: &Path,
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>, ExportError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_err(dir))?;

    let figures: Vec<_> = canvas.figures().collect();
    let images = figures
        .par_iter()
        .enumerate()
        .map(|(index, figure)| {
            StaticChartRenderer::render_png(figure, width, height)
                .map_err(|source| ExportError::Render { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut written = Vec::with_capacity(images.len() + 1);
    for (index, bytes) in images.iter().enumerate() {
        let path = dir.join(figure_file_name(index));
        std::fs::write(&path, bytes).map_err(io_err(&path))?;
        written.push(path);
    }

    let report = dir.join(REPORT_FILE);
    std::fs::write(&report, report_markdown(canvas)).map_err(io_err(&report))?;
    written.push(report);

    tracing::info!(dir = %dir.display(), figures = images.len(), "report exported");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplaySurface, Figure, FigureKind};

    #[test]
    fn markdown_links_figures_in_order() {
        let mut canvas = ReportCanvas::new();
        canvas.markdown("# Title");
        canvas.figure(Figure::new("first", FigureKind::Histogram { values: vec![1.0], bins: 2 }));
        canvas.table(TablePreview::new(
            vec!["a".into(), "b|c".into()],
            vec![vec!["1".into(), "2".into()]],
        ));
        canvas.figure(Figure::new("second", FigureKind::Histogram { values: vec![1.0], bins: 2 }));

        let md = report_markdown(&canvas);
        let first = md.find("![first](figure_01.png)").unwrap();
        let table = md.find("| a | b\\|c |").unwrap();
        let second = md.find("![second](figure_02.png)").unwrap();
        assert!(md.starts_with("# Title"));
        assert!(first < table && table < second);
        assert!(md.contains("|---|---|"));
    }

    #[test]
    fn export_without_figures_writes_report_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("report");
        let mut canvas = ReportCanvas::new();
        canvas.markdown("hello");

        let written = export_report(&canvas, &out, 320, 200).unwrap();
        assert_eq!(written, vec![out.join(REPORT_FILE)]);
        assert_eq!(std::fs::read_to_string(out.join(REPORT_FILE)).unwrap(), "hello\n\n");
    }
}
