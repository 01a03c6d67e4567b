// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::Color;
use recal_core::{Boundary, Event};

use crate::table::{Table, TableColumn};
use crate::util::{OutputFormat, format_boundary, truncate_to_width};

const MAX_TITLE_WIDTH: usize = 40;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Id,
    Span,
    Title,
    Recurrence,
    Series,
}

impl EventColumn {
    pub fn defaults(verbose: bool) -> Vec<Self> {
        match verbose {
            true => vec![Self::Id, Self::Span, Self::Title, Self::Recurrence, Self::Series],
            false => vec![Self::Id, Self::Span, Self::Title, Self::Recurrence],
        }
    }
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "ID",
            EventColumn::Span => "When",
            EventColumn::Title => "Title",
            EventColumn::Recurrence => "Repeats",
            EventColumn::Series => "Series",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self {
            EventColumn::Id => event.id.as_str().into(),
            EventColumn::Span => format_span(&event.start, &event.end).into(),
            EventColumn::Title => truncate_to_width(&event.title, MAX_TITLE_WIDTH).into(),
            EventColumn::Recurrence => match event.excluded_dates.len() {
                0 => event.recurrence().to_string().into(),
                n => format!("{} (except {n})", event.recurrence()).into(),
            },
            EventColumn::Series => event
                .originating_series_id
                .as_deref()
                .unwrap_or_default()
                .into(),
        }
    }

    fn color(&self, event: &Event) -> Option<Color> {
        match self {
            EventColumn::Id if event.is_series() => Some(Color::Cyan),
            EventColumn::Id if event.originating_series_id.is_some() => Some(Color::Yellow),
            _ => None,
        }
    }
}

fn format_span(start: &Boundary, end: &Boundary) -> String {
    let (start, end) = (format_boundary(start), format_boundary(end));
    match (start.split_once(' '), end.split_once(' ')) {
        (Some((sd, st)), Some((ed, et))) if sd == ed => format!("{sd} {st}~{et}"),
        _ if start == end => start,
        _ => format!("{start} ~ {end}"),
    }
}
