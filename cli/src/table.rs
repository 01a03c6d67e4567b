// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

/// Plain-text table, one row per item with padded, optionally colored cells.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
    header: bool,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
            header: true,
        }
    }

    #[allow(dead_code)]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn column_widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<usize> = match self.header {
            true => self.columns.iter().map(|c| c.name().width()).collect(),
            false => vec![0; self.columns.len()],
        };
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();
        let widths = self.column_widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        if self.header {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = pad(&col.name(), widths[i], i == last);
                write!(f, "{}", cell.bold())?;
                write!(f, "{}", if i == last { "\n" } else { self.separator })?;
            }
        }

        for (item, row) in self.data.iter().zip(&rows) {
            for (i, (col, cell)) in self.columns.iter().zip(row).enumerate() {
                let cell = pad(cell, widths[i], i == last);
                match col.color(item) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                write!(f, "{}", if i == last { "\n" } else { self.separator })?;
            }
        }
        Ok(())
    }
}

/// Pads by display width, the last column is never padded.
fn pad(cell: &str, width: usize, last: bool) -> String {
    match last {
        true => cell.to_string(),
        false => format!("{cell}{}", " ".repeat(width.saturating_sub(cell.width()))),
    }
}
