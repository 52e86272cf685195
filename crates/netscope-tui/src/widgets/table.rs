//! Shared pieces of the tabular views.
//!
//! Columns have fixed `Constraint::Length` widths; ratatui clips cell text
//! that does not fit. Tables never scroll, so callers take at most
//! [`capacity`] rows and say how many were left out with [`summary`].

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table},
};

/// Rows taken by the header line.
const HEADER_ROWS: u16 = 1;

/// A table column: header text and width in cells.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    pub width: u16,
}

impl Column {
    pub const fn new(title: &'static str, width: u16) -> Self {
        Self { title, width }
    }
}

/// A fixed-width table over `rows` with a styled header.
pub fn table<'a>(columns: &[Column], rows: Vec<Row<'a>>, header_style: Style) -> Table<'a> {
    let widths: Vec<Constraint> = columns
        .iter()
        .map(|column| Constraint::Length(column.width))
        .collect();
    let header = Row::new(
        columns
            .iter()
            .map(|column| Cell::from(column.title).style(header_style)),
    );
    Table::new(rows, widths).header(header).column_spacing(1)
}

/// Body rows that fit in `area` below the header.
pub fn capacity(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(HEADER_ROWS))
}

/// "3 interfaces", or "showing 6 of 20 connections" when rows were cut.
pub fn summary(shown: usize, total: usize, noun: &str) -> String {
    if shown < total {
        format!("showing {shown} of {total} {noun}")
    } else {
        format!("{total} {noun}")
    }
}
