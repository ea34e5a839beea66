//! Column alignment for rendered tables.
//!
//! Widths are measured on the uncolored text of each cell, in terminal
//! columns, so escape codes and wide glyphs never skew alignment.

use unicode_width::UnicodeWidthStr;

/// Spaces between two columns.
const PADDING: usize = 2;

/// One table cell: what is printed and how wide it is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = UnicodeWidthStr::width(text.as_str());
        Self { text, width }
    }

    /// A cell printed as `styled` but measured as `plain`.
    pub fn styled(plain: &str, styled: String) -> Self {
        Self {
            text: styled,
            width: UnicodeWidthStr::width(plain),
        }
    }

    pub fn empty() -> Self {
        Self::plain("")
    }
}

#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
    indent: String,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every rendered line with `indent`.
    pub fn indented(indent: &str) -> Self {
        Self {
            rows: Vec::new(),
            indent: indent.to_string(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Append the aligned rows to `out`. The last cell of a row is not
    /// padded, so lines carry no trailing whitespace.
    pub fn render_into(&self, out: &mut String) {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width);
            }
        }

        for row in &self.rows {
            let mut line = self.indent.clone();
            let last = row
                .iter()
                .rposition(|cell| cell.width > 0)
                .unwrap_or(0);
            for (i, cell) in row.iter().enumerate().take(last + 1) {
                line.push_str(&cell.text);
                if i < last {
                    let fill = widths[i] - cell.width + PADDING;
                    line.extend(std::iter::repeat_n(' ', fill));
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
}
