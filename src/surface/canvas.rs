//! Report Canvas
//! Records the blocks a page emits, in the order it emits them.

use crate::surface::{Figure, TablePreview};
use serde::{Deserialize, Serialize};

/// Output sink shared by every report page.
///
/// Pages only ever append; the surface decides how (or whether) the blocks
/// are shown.
pub trait DisplaySurface {
    /// Emit markdown text.
    fn markdown(&mut self, text: &str);

    /// Emit a tabular preview.
    fn table(&mut self, table: TablePreview);

    /// Emit a chart figure.
    fn figure(&mut self, figure: Figure);
}

/// A single piece of page output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Markdown(MarkdownBlock),
    Table(TablePreview),
    Figure(Figure),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownBlock {
    pub text: String,
}

/// In-memory display surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportCanvas {
    pub blocks: Vec<Block>,
}

impl ReportCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Figures in emission order.
    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Figure(f) => Some(f),
            _ => None,
        })
    }

    /// Tables in emission order.
    pub fn tables(&self) -> impl Iterator<Item = &TablePreview> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Serialize the canvas as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DisplaySurface for ReportCanvas {
    fn markdown(&mut self, text: &str) {
        // Page sources indent their prose; strip the common indent so the
        // text renders as markdown rather than a code block.
        self.blocks.push(Block::Markdown(MarkdownBlock {
            text: dedent(text),
        }));
    }

    fn table(&mut self, table: TablePreview) {
        self.blocks.push(Block::Table(table));
    }

    fn figure(&mut self, figure: Figure) {
        self.blocks.push(Block::Figure(figure));
    }
}

/// Remove the smallest common leading whitespace and surrounding blank lines.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    // Indent is counted in chars so non-ASCII whitespace never splits a char
    let strip = |line: &str| -> usize {
        line.char_indices()
            .take(indent)
            .take_while(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .last()
            .unwrap_or(0)
    };
    let lines: Vec<&str> = text.lines().map(|l| &l[strip(l)..]).collect();

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e]
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FigureKind;

    #[test]
    fn blocks_keep_emission_order() {
        let mut canvas = ReportCanvas::new();
        canvas.markdown("# Title");
        canvas.table(TablePreview::new(vec!["a".into()], vec![vec!["1".into()]]));
        canvas.figure(Figure::new(
            "Ratings",
            FigureKind::Histogram {
                values: vec![1.0, 2.0],
                bins: 5,
            },
        ));
        canvas.markdown("done");

        assert_eq!(canvas.len(), 4);
        assert!(matches!(canvas.blocks[0], Block::Markdown(_)));
        assert!(matches!(canvas.blocks[1], Block::Table(_)));
        assert!(matches!(canvas.blocks[2], Block::Figure(_)));
        assert!(matches!(canvas.blocks[3], Block::Markdown(_)));
        assert_eq!(canvas.figures().count(), 1);
        assert_eq!(canvas.tables().count(), 1);
    }

    #[test]
    fn markdown_is_dedented() {
        let mut canvas = ReportCanvas::new();
        canvas.markdown(
            "
        # Heading
        Some text

            indented more
        ",
        );

        let Block::Markdown(md) = &canvas.blocks[0] else {
            panic!("expected markdown block");
        };
        assert_eq!(md.text, "# Heading\nSome text\n\n    indented more");
    }

    #[test]
    fn dedent_handles_wide_whitespace() {
        let mut canvas = ReportCanvas::new();
        canvas.markdown("\u{3000}\u{3000}# 見出し\n\u{3000}\u{3000}本文\n  short");
        let Block::Markdown(md) = &canvas.blocks[0] else {
            panic!("expected markdown");
        };
        assert_eq!(md.text, "# 見出し\n本文\nshort");
    }

    #[test]
    fn json_round_trip_keeps_block_tags() {
        let mut canvas = ReportCanvas::new();
        canvas.markdown("hello");
        let json = canvas.to_json().unwrap();
        assert!(json.contains("\"type\": \"markdown\""));
        let back: ReportCanvas = serde_json::from_str(&json).unwrap();
        assert_eq!(back, canvas);
    }
}
