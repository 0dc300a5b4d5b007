//! Plain-text rendering of a canvas for terminal output.

use crate::surface::{Block, ReportCanvas, TablePreview};
use std::io::{self, Write};

/// Widest a single cell is allowed to print before being cut.
const MAX_CELL_WIDTH: usize = 40;

/// Write the canvas to `out`: markdown verbatim, tables as aligned columns,
/// figures as a one-line summary.
pub fn render_text<W: Write>(canvas: &ReportCanvas, out: &mut W) -> io::Result<()> {
    for (idx, block) in canvas.blocks.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        match block {
            Block::Markdown(md) => writeln!(out, "{}", md.text)?,
            Block::Table(table) => write_table(table, out)?,
            Block::Figure(fig) => writeln!(
                out,
                "[{}: {} ({} points)]",
                fig.kind_name(),
                fig.title,
                fig.point_count()
            )?,
        }
    }
    Ok(())
}

fn write_table<W: Write>(table: &TablePreview, out: &mut W) -> io::Result<()> {
    let cells: Vec<Vec<String>> = std::iter::once(&table.columns)
        .chain(table.rows.iter())
        .map(|row| row.iter().map(|c| clip(c)).collect())
        .collect();

    let mut widths = vec![0usize; table.columns.len()];
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    for (i, row) in cells.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            writeln!(out, "{}", rule.join("  "))?;
        }
    }

    if table.is_truncated() {
        writeln!(out, "... {} of {} rows shown", table.rows.len(), table.total_rows)?;
    }
    Ok(())
}

fn clip(cell: &str) -> String {
    if cell.chars().count() > MAX_CELL_WIDTH {
        let cut: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", cut)
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplaySurface, Figure, FigureKind};

    #[test]
    fn prints_blocks_in_order() {
        let mut canvas = ReportCanvas::new();
        canvas.markdown("## Apps");
        let mut table = TablePreview::new(
            vec!["App".into(), "Price".into()],
            vec![vec!["Calc".into(), "0".into()]],
        );
        table.total_rows = 3;
        canvas.table(table);
        canvas.figure(Figure::new(
            "Ratings",
            FigureKind::Histogram {
                values: vec![4.0, 4.5],
                bins: 10,
            },
        ));

        let mut out = Vec::new();
        render_text(&canvas, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "## Apps\n\
                        \n\
                        App   Price\n\
                        ----  -----\n\
                        Calc  0\n\
                        ... 1 of 3 rows shown\n\
                        \n\
                        [histogram: Ratings (2 points)]\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(100);
        assert_eq!(clip(&long).chars().count(), MAX_CELL_WIDTH);
    }
}
